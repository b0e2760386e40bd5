//! End-to-end checks over the public grid API: a week of shifts is bucketed,
//! laid out and moved the way the roster screens use it.

use chrono::{Datelike, NaiveDate, TimeDelta, TimeZone, Utc, Weekday};
use rota_core::types::{Shift, ShiftStatus, StaffKey};
use rota_grid::dnd::{DropZoneId, resolve_drop};
use rota_grid::group::{group_shifts_by_day, group_shifts_by_staff_and_day};
use rota_grid::layout::{GridMetrics, MIN_SHIFT_HEIGHT, calculate_shift_position};
use rota_grid::week::{day_key, week_days, week_range};
use uuid::Uuid;

fn shift_at(day: u32, hour: u32, minutes: i64, user_id: Option<Uuid>) -> Shift {
    let start_time = Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap();
    Shift {
        id: Uuid::new_v4(),
        start_time,
        end_time: start_time + TimeDelta::minutes(minutes),
        status: ShiftStatus::Draft,
        user_id,
        location_id: None,
        color: None,
        break_minutes: None,
        compliance_warnings: Vec::new(),
    }
}

/// Shifts spread across three weeks of March 2025 at varied hours.
fn month_of_shifts(staff: &[Uuid]) -> Vec<Shift> {
    (3..=23)
        .flat_map(|day| {
            let hour = 4 + (day % 12);
            let user = staff.get(day as usize % (staff.len() + 1)).copied();
            [
                shift_at(day, hour, 8 * 60, user),
                shift_at(day, hour + 1, 15, None),
            ]
        })
        .collect()
}

#[test]
fn test_every_reference_day_yields_monday_to_sunday() {
    for day in 1..=31 {
        let reference = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        let range = week_range(reference);
        assert_eq!(range.monday().weekday(), Weekday::Mon);
        assert_eq!(range.sunday().weekday(), Weekday::Sun);
        assert_eq!(range.sunday() - range.monday(), TimeDelta::days(6));
        assert!(range.contains_date(reference));
    }
}

#[test]
fn test_grouping_counts_match_in_week_shifts() {
    let staff = [Uuid::new_v4(), Uuid::new_v4()];
    let shifts = month_of_shifts(&staff);
    let reference = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
    let range = week_range(reference);

    let expected = shifts
        .iter()
        .filter(|s| range.contains(s.start_time.naive_utc()))
        .count();

    let by_day = group_shifts_by_day(&shifts, reference, chrono_tz::UTC);
    assert_eq!(by_day.shift_count(), expected);

    let by_staff = group_shifts_by_staff_and_day(
        &shifts,
        staff.iter().copied().map(StaffKey::User),
        reference,
        chrono_tz::UTC,
    );
    assert_eq!(by_staff.shift_count(), expected);
}

#[test]
fn test_layout_bounds_hold_for_all_shifts() {
    let shifts = month_of_shifts(&[Uuid::new_v4()]);
    for shift in &shifts {
        let pos = calculate_shift_position(shift, chrono_tz::UTC);
        assert!(pos.top >= 0.0);
        assert!(pos.height >= MIN_SHIFT_HEIGHT);
    }
}

#[test]
fn test_headers_line_up_with_buckets() {
    let reference = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let buckets = group_shifts_by_day(&[], reference, chrono_tz::UTC);
    let header_keys: Vec<String> = week_days(reference, today)
        .into_iter()
        .map(|d| d.key)
        .collect();
    let bucket_keys: Vec<String> = buckets.entries().map(|(k, _)| k.to_string()).collect();
    assert_eq!(header_keys, bucket_keys);
}

#[test]
fn test_drag_to_other_staff_moves_shift_between_rows() {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let tz = chrono_tz::UTC;
    let reference = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
    let original = shift_at(10, 9, 8 * 60, Some(alice));

    let zone: DropZoneId = format!("staff:{bob}:2025-03-13").parse().unwrap();
    let moved = resolve_drop(original.id, zone)
        .apply_to(&original, tz)
        .unwrap();

    let shifts = vec![moved];
    let grid = group_shifts_by_staff_and_day(
        &shifts,
        [StaffKey::User(alice), StaffKey::User(bob)],
        reference,
        tz,
    );
    let thursday = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
    assert!(grid.cell(StaffKey::User(alice), thursday).is_empty());
    assert_eq!(grid.cell(StaffKey::User(bob), thursday).len(), 1);
    assert_eq!(day_key(thursday), "2025-03-13");

    let placed = GridMetrics::default().layout_day(grid.cell(StaffKey::User(bob), thursday), tz);
    assert!((placed[0].position.top - 180.0).abs() < 1e-9);
}
