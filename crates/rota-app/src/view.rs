//! Fetch side of the roster screen: one week of shifts plus the staff list.

use chrono::NaiveDate;
use chrono_tz::Tz;
use rota_client::ApiClient;
use rota_client::poll::LatestOnly;
use rota_core::types::{Member, Shift, StaffKey};
use rota_grid::week::{shift_week, week_range};

use crate::config::ViewContext;
use crate::error::AppResult;

/// Backend data for one rendered week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSnapshot {
    pub reference: NaiveDate,
    pub shifts: Vec<Shift>,
    pub members: Vec<Member>,
}

impl RosterSnapshot {
    #[must_use]
    pub fn staff_keys(&self) -> Vec<StaffKey> {
        self.members
            .iter()
            .map(|member| StaffKey::User(member.user_id))
            .collect()
    }

    /// Display name for a staff row.
    #[must_use]
    pub fn staff_name(&self, key: StaffKey) -> String {
        match key {
            StaffKey::Unassigned => "Unassigned".to_string(),
            StaffKey::User(id) => self
                .members
                .iter()
                .find(|member| member.user_id == id)
                .map_or_else(
                    || id.simple().to_string().chars().take(8).collect(),
                    |member| member.display_name.clone(),
                ),
        }
    }
}

/// Week roster loader. Responses to superseded loads are discarded.
#[derive(Debug, Clone)]
pub struct RosterView {
    client: ApiClient,
    timezone: Tz,
    reference: NaiveDate,
    guard: LatestOnly,
}

impl RosterView {
    #[must_use]
    pub fn new(client: ApiClient, ctx: &ViewContext) -> Self {
        Self {
            client,
            timezone: ctx.timezone,
            reference: ctx.reference,
            guard: LatestOnly::new(),
        }
    }

    #[must_use]
    pub const fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Moves to another week; loads still in flight for the old week are dropped.
    pub fn navigate(&mut self, weeks: i64) {
        self.reference = shift_week(self.reference, weeks);
        self.guard.invalidate();
        tracing::debug!(reference = %self.reference, "Navigated roster week");
    }

    /// ## Summary
    /// Fetches the visible week's shifts and the organization members.
    ///
    /// ## Errors
    /// Returns API errors from either request.
    #[tracing::instrument(skip(self), fields(reference = %self.reference))]
    pub async fn fetch(&self) -> AppResult<RosterSnapshot> {
        let (start, end) = week_range(self.reference).utc_bounds(self.timezone)?;
        let (shifts, members) = tokio::try_join!(
            self.client.list_shifts(start, end),
            self.client.list_members()
        )?;
        Ok(RosterSnapshot {
            reference: self.reference,
            shifts,
            members,
        })
    }

    /// ## Summary
    /// Fetches like [`Self::fetch`] but yields `None` when a newer load or a
    /// navigation started meanwhile.
    ///
    /// ## Errors
    /// Returns API errors from either request.
    pub async fn refresh(&self) -> AppResult<Option<RosterSnapshot>> {
        let ticket = self.guard.begin();
        let snapshot = self.fetch().await?;
        Ok(ticket.accept(snapshot))
    }
}
