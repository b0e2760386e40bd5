//! Drop-target resolution for dragging shifts between grid cells.
//!
//! The grid performs no optimistic update and no rollback. It resolves the
//! target cell and hands the move to a [`ShiftMover`]; persisting, conflict
//! checks and re-fetching belong to the caller.

use std::future::Future;
use std::str::FromStr;

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use rota_core::types::{Shift, StaffKey};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{GridError, GridResult};
use crate::week::day_key;

const DAY_ZONE_PREFIX: &str = "day";
const STAFF_ZONE_PREFIX: &str = "staff";

/// Identifier of a droppable grid cell.
///
/// Day grid cells are `day:YYYY-MM-DD`; staff grid cells are
/// `staff:<staff-key>:YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropZoneId {
    Day(NaiveDate),
    StaffDay { staff: StaffKey, date: NaiveDate },
}

impl DropZoneId {
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        match self {
            Self::Day(date) | Self::StaffDay { date, .. } => *date,
        }
    }
}

impl std::fmt::Display for DropZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{DAY_ZONE_PREFIX}:{}", day_key(*date)),
            Self::StaffDay { staff, date } => {
                write!(f, "{STAFF_ZONE_PREFIX}:{staff}:{}", day_key(*date))
            }
        }
    }
}

impl FromStr for DropZoneId {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GridError::InvalidDropZone(s.to_string());
        let parse_date =
            |raw: &str| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_e| invalid());

        let (prefix, rest) = s.split_once(':').ok_or_else(invalid)?;
        match prefix {
            DAY_ZONE_PREFIX => Ok(Self::Day(parse_date(rest)?)),
            STAFF_ZONE_PREFIX => {
                let (staff, date) = rest.rsplit_once(':').ok_or_else(invalid)?;
                Ok(Self::StaffDay {
                    staff: staff.parse().map_err(|_e| invalid())?,
                    date: parse_date(date)?,
                })
            }
            _ => Err(invalid()),
        }
    }
}

/// Target of a drop: the new calendar day and, from the staff grid, the new
/// assignee. `staff` is `None` when the assignee should stay unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reassignment {
    pub shift_id: Uuid,
    pub date: NaiveDate,
    pub staff: Option<StaffKey>,
}

impl Reassignment {
    /// ## Summary
    /// Previews the moved shift: same local time of day and duration on the
    /// target date, with the new assignee when one was chosen.
    ///
    /// ## Errors
    /// Returns `GridError::NonexistentLocalTime` if the start's wall-clock
    /// time does not exist on the target date.
    pub fn apply_to(&self, shift: &Shift, tz: Tz) -> GridResult<Shift> {
        let local_start = shift.start_time.with_timezone(&tz).naive_local();
        let target = self.date.and_time(local_start.time());
        let start_time = tz
            .from_local_datetime(&target)
            .earliest()
            .ok_or_else(|| GridError::NonexistentLocalTime(format!("{target} in {tz}")))?
            .with_timezone(&Utc);

        let mut moved = shift.clone();
        moved.start_time = start_time;
        moved.end_time = start_time + shift.duration();
        if let Some(staff) = self.staff {
            moved.user_id = staff.user_id();
        }
        Ok(moved)
    }
}

/// Resolves the drop of `shift_id` onto `zone`.
#[must_use]
pub fn resolve_drop(shift_id: Uuid, zone: DropZoneId) -> Reassignment {
    match zone {
        DropZoneId::Day(date) => Reassignment {
            shift_id,
            date,
            staff: None,
        },
        DropZoneId::StaffDay { staff, date } => Reassignment {
            shift_id,
            date,
            staff: Some(staff),
        },
    }
}

/// Persists a resolved drop.
pub trait ShiftMover {
    type Error: From<GridError>;

    fn move_shift(
        &self,
        reassignment: Reassignment,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// ## Summary
/// Resolves the drop zone identifier and invokes `mover` once.
///
/// ## Errors
/// Returns the mover's error, or a `GridError::InvalidDropZone` converted
/// into it when `zone_id` is malformed.
#[tracing::instrument(skip(mover))]
pub async fn handle_drop<M: ShiftMover + Sync>(
    mover: &M,
    shift_id: Uuid,
    zone_id: &str,
) -> Result<Reassignment, M::Error> {
    let zone: DropZoneId = zone_id.parse()?;
    let reassignment = resolve_drop(shift_id, zone);

    tracing::debug!(
        date = %reassignment.date,
        staff = ?reassignment.staff,
        "Resolved shift drop"
    );

    mover.move_shift(reassignment).await?;
    Ok(reassignment)
}

#[cfg(test)]
mod tests;
