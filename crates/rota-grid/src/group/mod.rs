//! Bucketing of a flat shift list into per-day and per-staff-per-day cells.
//!
//! Buckets are rebuilt from scratch on every call and borrow the input
//! shifts; nothing is cached between renders.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeDelta};
use chrono_tz::Tz;
use rota_core::types::{Shift, StaffKey};

use crate::week::{day_key, day_key_of, local_date, week_dates};

/// One bucket per day of the visible week, ordered Monday to Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBuckets<'a> {
    buckets: BTreeMap<String, Vec<&'a Shift>>,
}

impl<'a> DayBuckets<'a> {
    fn empty_week(dates: &[NaiveDate]) -> Self {
        Self {
            buckets: dates.iter().map(|d| (day_key(*d), Vec::new())).collect(),
        }
    }

    /// Appends `shift` to the bucket for `key`; returns false if the key is
    /// outside the visible week.
    fn push(&mut self, key: &str, shift: &'a Shift) -> bool {
        match self.buckets.get_mut(key) {
            Some(bucket) => {
                bucket.push(shift);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[&'a Shift]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    #[must_use]
    pub fn for_date(&self, date: NaiveDate) -> &[&'a Shift] {
        self.get(&day_key(date)).unwrap_or(&[])
    }

    /// Day keys with their shifts, in calendar order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[&'a Shift])> {
        self.buckets
            .iter()
            .map(|(key, shifts)| (key.as_str(), shifts.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of shifts across all buckets.
    #[must_use]
    pub fn shift_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    fn shifts(&self) -> impl Iterator<Item = &'a Shift> + '_ {
        self.buckets.values().flatten().copied()
    }
}

/// ## Summary
/// Groups `shifts` by the local start day of the week containing `reference`.
///
/// Shifts starting outside the visible week are dropped. Order within a
/// bucket follows input order.
#[must_use]
pub fn group_shifts_by_day<'a>(
    shifts: &'a [Shift],
    reference: NaiveDate,
    tz: Tz,
) -> DayBuckets<'a> {
    let mut buckets = DayBuckets::empty_week(&week_dates(reference));

    let mut dropped = 0usize;
    for shift in shifts {
        if !buckets.push(&day_key_of(shift.start_time, tz), shift) {
            dropped += 1;
        }
    }

    tracing::trace!(total = shifts.len(), dropped, "Grouped shifts by day");

    buckets
}

/// One row of the staff roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffRow<'a> {
    pub key: StaffKey,
    pub days: DayBuckets<'a>,
}

/// Staff-by-day matrix for one week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffDayGrid<'a> {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<StaffRow<'a>>,
}

impl<'a> StaffDayGrid<'a> {
    #[must_use]
    pub fn row(&self, key: StaffKey) -> Option<&StaffRow<'a>> {
        self.rows.iter().find(|row| row.key == key)
    }

    #[must_use]
    pub fn cell(&self, key: StaffKey, date: NaiveDate) -> &[&'a Shift] {
        self.row(key).map_or(&[], |row| row.days.for_date(date))
    }

    #[must_use]
    pub fn shift_count(&self) -> usize {
        self.rows.iter().map(|row| row.days.shift_count()).sum()
    }

    /// Paid time per row for the week, in row order.
    #[must_use]
    pub fn totals(&self) -> Vec<(StaffKey, TimeDelta)> {
        self.rows
            .iter()
            .map(|row| {
                let paid = row
                    .days
                    .shifts()
                    .map(Shift::paid_duration)
                    .fold(TimeDelta::zero(), |acc, d| acc + d);
                (row.key, paid)
            })
            .collect()
    }

    /// Index of the row for `key`, creating it before the unassigned row.
    fn row_index(&mut self, key: StaffKey) -> usize {
        if let Some(index) = self.rows.iter().position(|row| row.key == key) {
            return index;
        }
        let index = self
            .rows
            .iter()
            .position(|row| row.key == StaffKey::Unassigned)
            .unwrap_or(self.rows.len());
        self.rows.insert(
            index,
            StaffRow {
                key,
                days: DayBuckets::empty_week(&self.dates),
            },
        );
        index
    }
}

/// ## Summary
/// Groups `shifts` by staff member and then by local start day.
///
/// Every key in `staff` gets a full row even without shifts, followed by the
/// `unassigned` row. Assignees missing from `staff` get a row on demand.
/// Shifts starting outside the visible week are dropped.
#[must_use]
pub fn group_shifts_by_staff_and_day<'a>(
    shifts: &'a [Shift],
    staff: impl IntoIterator<Item = StaffKey>,
    reference: NaiveDate,
    tz: Tz,
) -> StaffDayGrid<'a> {
    let dates = week_dates(reference);
    let mut grid = StaffDayGrid {
        rows: Vec::new(),
        dates,
    };

    for key in staff {
        grid.row_index(key);
    }
    grid.row_index(StaffKey::Unassigned);

    let mut dropped = 0usize;
    for shift in shifts {
        let date = local_date(shift.start_time, tz);
        if !grid.dates.contains(&date) {
            dropped += 1;
            continue;
        }
        let index = grid.row_index(shift.staff_key());
        grid.rows[index].days.push(&day_key(date), shift);
    }

    tracing::trace!(
        total = shifts.len(),
        rows = grid.rows.len(),
        dropped,
        "Grouped shifts by staff and day"
    );

    grid
}
