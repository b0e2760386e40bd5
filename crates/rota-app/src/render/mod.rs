//! Plain-text rendering of the week roster.
//!
//! Two sections: the staff-by-day table with weekly paid hours, then one
//! block per day listing each shift's position on the hour grid.

use chrono::{NaiveDate, TimeDelta};
use chrono_tz::Tz;
use rota_core::types::{Shift, StaffKey};
use rota_grid::group::{group_shifts_by_day, group_shifts_by_staff_and_day};
use rota_grid::layout::GridMetrics;
use rota_grid::week::{WeekDay, week_days, week_label, week_range};

use crate::view::RosterSnapshot;

const NAME_WIDTH: usize = 18;
const CELL_WIDTH: usize = 13;

/// Local `HH:MM-HH:MM` span of a shift.
#[must_use]
pub fn time_span(shift: &Shift, tz: Tz) -> String {
    format!(
        "{}-{}",
        shift.start_time.with_timezone(&tz).format("%H:%M"),
        shift.end_time.with_timezone(&tz).format("%H:%M")
    )
}

fn hours(delta: TimeDelta) -> String {
    let minutes = i32::try_from(delta.num_minutes()).unwrap_or(i32::MAX);
    format!("{:.1}h", f64::from(minutes) / 60.0)
}

fn fit(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    format!("{truncated:<width$}")
}

fn day_heading(day: &WeekDay) -> String {
    let marker = if day.is_today { "*" } else { "" };
    format!("{} {}{marker}", day.name, day.day_number)
}

/// Cell text: first shift, a `!` for blocking compliance warnings, and a
/// `+N` count for further shifts in the same cell.
fn cell(shifts: &[&Shift], tz: Tz) -> String {
    let Some(first) = shifts.first() else {
        return String::new();
    };
    let flag = if shifts.iter().any(|s| s.has_blocking_warnings()) {
        "!"
    } else {
        ""
    };
    match shifts.len() {
        1 => format!("{}{flag}", time_span(first, tz)),
        n => format!("{}{flag}+{}", time_span(first, tz), n - 1),
    }
}

/// ## Summary
/// Renders the staff table and day layouts for `snapshot`.
#[must_use]
pub fn render_roster(
    snapshot: &RosterSnapshot,
    tz: Tz,
    today: NaiveDate,
    metrics: &GridMetrics,
) -> String {
    let days = week_days(snapshot.reference, today);
    let range = week_range(snapshot.reference);
    let mut lines = vec![
        format!("Roster {} ({tz})", week_label(&range)),
        String::new(),
    ];

    let mut header = fit("Staff", NAME_WIDTH);
    for day in &days {
        header.push_str(" | ");
        header.push_str(&fit(&day_heading(day), CELL_WIDTH));
    }
    header.push_str(" | Total");
    lines.push(header);

    let grid = group_shifts_by_staff_and_day(
        &snapshot.shifts,
        snapshot.staff_keys(),
        snapshot.reference,
        tz,
    );
    for (row, (_, paid)) in grid.rows.iter().zip(grid.totals()) {
        let mut line = fit(&snapshot.staff_name(row.key), NAME_WIDTH);
        for day in &days {
            line.push_str(" | ");
            line.push_str(&fit(&cell(row.days.for_date(day.date), tz), CELL_WIDTH));
        }
        line.push_str(" | ");
        line.push_str(&hours(paid));
        lines.push(line.trim_end().to_string());
    }

    let buckets = group_shifts_by_day(&snapshot.shifts, snapshot.reference, tz);
    for day in &days {
        let bucket = buckets.for_date(day.date);
        if bucket.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("{} ({} shifts)", day_heading(day), bucket.len()));
        for placed in metrics.layout_day(bucket, tz) {
            lines.push(format!(
                "  {}  top {:>4.0}px  height {:>4.0}px  z{}  {} [{}]",
                time_span(placed.shift, tz),
                placed.position.top,
                placed.position.height,
                placed.z_index,
                snapshot.staff_name(StaffKey::from(placed.shift.user_id)),
                placed.shift.status,
            ));
        }
    }

    tracing::trace!(shifts = snapshot.shifts.len(), "Rendered roster");

    lines.join("\n")
}

#[cfg(test)]
mod tests;
