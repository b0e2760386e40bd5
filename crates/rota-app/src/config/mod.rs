use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
pub use rota_core::config::*;

use crate::error::AppResult;

/// Settings resolved into the values the roster view needs.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub settings: Settings,
    pub timezone: Tz,
    pub reference: NaiveDate,
    pub today: NaiveDate,
}

impl ViewContext {
    /// ## Summary
    /// Resolves the display timezone and the week to show. Without a
    /// configured `display.week_of` the current local week is shown.
    ///
    /// ## Errors
    /// Returns a configuration error if the timezone is unknown.
    pub fn resolve(settings: Settings, now: DateTime<Utc>) -> AppResult<Self> {
        let timezone = settings.timezone()?;
        let today = now.with_timezone(&timezone).date_naive();
        let reference = settings.display.week_of.unwrap_or(today);
        Ok(Self {
            settings,
            timezone,
            reference,
            today,
        })
    }
}
