use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{NewShift, ShiftStatus};
use crate::error::{CoreError, CoreResult};

/// Reusable start/end/break bundle used to prefill shift creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    pub id: Uuid,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub break_minutes: Option<u32>,
    #[serde(default)]
    pub location_id: Option<Uuid>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Body of a template create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTemplateInput {
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub break_minutes: Option<u32>,
    pub location_id: Option<Uuid>,
    pub color: Option<String>,
}

impl ShiftTemplate {
    /// ## Summary
    /// Builds a draft shift on `date` in the display timezone.
    ///
    /// A template whose end is not after its start spans midnight; the end
    /// lands on the following day.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` if a wall-clock time does not exist
    /// on that date (DST gap).
    pub fn instantiate(&self, date: NaiveDate, tz: Tz) -> CoreResult<NewShift> {
        let start_local = date.and_time(self.start_time);
        let mut end_local = date.and_time(self.end_time);
        if end_local <= start_local {
            end_local += TimeDelta::days(1);
        }

        Ok(NewShift {
            start_time: resolve_local(start_local, tz)?,
            end_time: resolve_local(end_local, tz)?,
            status: ShiftStatus::Draft,
            user_id: None,
            location_id: self.location_id,
            color: self.color.clone(),
            break_minutes: self.break_minutes,
        })
    }
}

/// Maps a wall-clock time to UTC, taking the earlier instant in a DST fold.
fn resolve_local(local: NaiveDateTime, tz: Tz) -> CoreResult<chrono::DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            CoreError::InvalidInput(format!("local time {local} does not exist in {tz}"))
        })
}
