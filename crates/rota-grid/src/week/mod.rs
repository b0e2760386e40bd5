//! Monday-start week windows and per-day keys.
//!
//! All calendar math happens on local dates in an explicit display timezone,
//! so a shift's day bucket does not depend on the machine's local zone.

use chrono::{
    DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc,
    Weekday,
};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{GridError, GridResult};

/// Number of days rendered per roster page
pub const DAYS_PER_WEEK: u64 = 7;

/// Local Monday 00:00:00 to Sunday 23:59:59.999 of one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl WeekRange {
    #[must_use]
    pub fn monday(&self) -> NaiveDate {
        self.start.date()
    }

    #[must_use]
    pub fn sunday(&self) -> NaiveDate {
        self.end.date()
    }

    #[must_use]
    pub fn contains(&self, local: NaiveDateTime) -> bool {
        self.start <= local && local <= self.end
    }

    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.monday() <= date && date <= self.sunday()
    }

    /// ## Summary
    /// Converts the week to a half-open UTC interval `[monday, next monday)`
    /// suitable for backend range queries.
    ///
    /// ## Errors
    /// Returns `GridError::NonexistentLocalTime` if neither midnight nor the
    /// following hour exists in `tz` (not the case for any real zone).
    pub fn utc_bounds(&self, tz: Tz) -> GridResult<(DateTime<Utc>, DateTime<Utc>)> {
        let next_monday = self.monday() + Days::new(DAYS_PER_WEEK);
        Ok((
            start_of_day(self.monday(), tz)?.with_timezone(&Utc),
            start_of_day(next_monday, tz)?.with_timezone(&Utc),
        ))
    }
}

/// Derived per-day view-model for the grid header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub key: String,
    pub name: String,
    pub day_number: u32,
    pub is_today: bool,
    pub is_weekend: bool,
}

/// ## Summary
/// Returns the Monday that starts the week containing `reference`.
///
/// Sunday belongs to the week that started six days earlier.
#[must_use]
pub fn week_start(reference: NaiveDate) -> NaiveDate {
    let offset = u64::from(reference.weekday().num_days_from_monday());
    reference - Days::new(offset)
}

/// ## Summary
/// Computes the local week window containing `reference`.
#[must_use]
pub fn week_range(reference: NaiveDate) -> WeekRange {
    let monday = week_start(reference);
    let sunday = monday + Days::new(DAYS_PER_WEEK - 1);
    WeekRange {
        start: monday.and_time(NaiveTime::MIN),
        end: sunday.and_time(end_of_day()),
    }
}

/// ## Summary
/// Computes the week window containing `instant` as seen in `tz`.
///
/// The bounds are local wall-clock times; use [`WeekRange::utc_bounds`] for
/// the matching UTC instants.
#[must_use]
pub fn week_range_in(instant: DateTime<Utc>, tz: Tz) -> WeekRange {
    week_range(local_date(instant, tz))
}

/// Calendar date of `instant` in `tz`.
#[must_use]
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// `YYYY-MM-DD` key for a calendar day.
#[must_use]
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Day key of the local calendar date of `instant` in `tz`.
#[must_use]
pub fn day_key_of(instant: DateTime<Utc>, tz: Tz) -> String {
    day_key(local_date(instant, tz))
}

/// The seven dates Monday through Sunday of the week containing `reference`.
#[must_use]
pub fn week_dates(reference: NaiveDate) -> Vec<NaiveDate> {
    let monday = week_start(reference);
    (0..DAYS_PER_WEEK)
        .map(|offset| monday + Days::new(offset))
        .collect()
}

/// ## Summary
/// Builds the header view-models for the week containing `reference`.
#[must_use]
pub fn week_days(reference: NaiveDate, today: NaiveDate) -> Vec<WeekDay> {
    week_dates(reference)
        .into_iter()
        .map(|date| WeekDay {
            date,
            key: day_key(date),
            name: date.format("%a").to_string(),
            day_number: date.day(),
            is_today: date == today,
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        })
        .collect()
}

/// Moves `reference` by whole weeks, for previous/next navigation.
#[must_use]
pub fn shift_week(reference: NaiveDate, weeks: i64) -> NaiveDate {
    reference + TimeDelta::weeks(weeks)
}

/// Human-readable label such as `13 Jan – 19 Jan 2025`.
#[must_use]
pub fn week_label(range: &WeekRange) -> String {
    let (monday, sunday) = (range.monday(), range.sunday());
    if monday.year() == sunday.year() {
        format!(
            "{} – {}",
            monday.format("%-d %b"),
            sunday.format("%-d %b %Y")
        )
    } else {
        format!(
            "{} – {}",
            monday.format("%-d %b %Y"),
            sunday.format("%-d %b %Y")
        )
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

/// First existing instant of `date` in `tz`.
fn start_of_day(date: NaiveDate, tz: Tz) -> GridResult<DateTime<Tz>> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            // Zones that spring forward at midnight start the day at 01:00
            tz.from_local_datetime(&(midnight + TimeDelta::hours(1)))
                .earliest()
        })
        .ok_or_else(|| GridError::NonexistentLocalTime(format!("{midnight} in {tz}")))
}
