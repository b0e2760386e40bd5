use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use reqwest::{Method, Url};
use rota_core::constants::SHIFTS_ROUTE;
use rota_core::types::{NewShift, Shift, ShiftStatus, ShiftUpdate};
use rota_grid::dnd::{Reassignment, ShiftMover};
use serde::Serialize;
use uuid::Uuid;

use super::ApiClient;
use crate::error::{ApiError, ApiResult};

/// PATCH body moving a shift to another day and/or assignee.
///
/// `user_id` is omitted to keep the assignee, `null` to unassign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReassignBody {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Option<Uuid>>,
}

impl From<&Reassignment> for ReassignBody {
    fn from(reassignment: &Reassignment) -> Self {
        Self {
            date: reassignment.date,
            user_id: reassignment.staff.map(|staff| staff.user_id()),
        }
    }
}

/// Status transition endpoints, by target status.
fn status_action(status: ShiftStatus) -> Option<&'static str> {
    match status {
        ShiftStatus::Published => Some("publish"),
        ShiftStatus::Acknowledged => Some("acknowledge"),
        ShiftStatus::Completed => Some("complete"),
        ShiftStatus::Cancelled => Some("cancel"),
        ShiftStatus::Draft => None,
    }
}

impl ApiClient {
    pub(crate) fn shifts_url(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> ApiResult<Url> {
        let mut url = self.url(SHIFTS_ROUTE)?;
        url.query_pairs_mut()
            .append_pair("start", &start.to_rfc3339_opts(SecondsFormat::Millis, true))
            .append_pair("end", &end.to_rfc3339_opts(SecondsFormat::Millis, true));
        Ok(url)
    }

    fn shift_url(&self, id: Uuid, action: Option<&str>) -> ApiResult<Url> {
        match action {
            Some(action) => self.url(&format!("{SHIFTS_ROUTE}/{id}/{action}")),
            None => self.url(&format!("{SHIFTS_ROUTE}/{id}")),
        }
    }

    /// ## Summary
    /// Lists shifts starting in `[start, end)`.
    ///
    /// ## Errors
    /// Returns network, status or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn list_shifts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ApiResult<Vec<Shift>> {
        let shifts: Vec<Shift> = self.get_json(self.shifts_url(start, end)?).await?;
        tracing::debug!(count = shifts.len(), "Fetched shifts");
        Ok(shifts)
    }

    /// ## Errors
    /// Returns network, status or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn get_shift(&self, id: Uuid) -> ApiResult<Shift> {
        self.get_json(self.shift_url(id, None)?).await
    }

    /// ## Summary
    /// Creates a shift. Compliance rejections surface as `ApiError::Compliance`.
    ///
    /// ## Errors
    /// Returns network, validation, compliance, status or decode errors.
    #[tracing::instrument(skip(self, shift), fields(start = %shift.start_time))]
    pub async fn create_shift(&self, shift: &NewShift) -> ApiResult<Shift> {
        let created: Shift = self
            .send_json(Method::POST, self.url(SHIFTS_ROUTE)?, shift)
            .await?;
        tracing::info!(shift_id = %created.id, "Created shift");
        Ok(created)
    }

    /// ## Errors
    /// Returns network, validation, compliance, status or decode errors.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_shift(&self, id: Uuid, update: &ShiftUpdate) -> ApiResult<Shift> {
        self.send_json(Method::PATCH, self.shift_url(id, None)?, update)
            .await
    }

    /// ## Errors
    /// Returns network or status errors.
    #[tracing::instrument(skip(self))]
    pub async fn delete_shift(&self, id: Uuid) -> ApiResult<()> {
        self.send_empty(Method::DELETE, self.shift_url(id, None)?)
            .await?;
        tracing::info!(shift_id = %id, "Deleted shift");
        Ok(())
    }

    /// ## Summary
    /// Persists a drag-and-drop move.
    ///
    /// ## Errors
    /// Returns network, validation, compliance, status or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn reassign_shift(&self, reassignment: &Reassignment) -> ApiResult<Shift> {
        let body = ReassignBody::from(reassignment);
        self.send_json(
            Method::PATCH,
            self.shift_url(reassignment.shift_id, Some("reassign"))?,
            &body,
        )
        .await
    }

    /// ## Summary
    /// Moves a shift to `status` through its transition endpoint.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` for `Draft`, which has no transition,
    /// otherwise network, status or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn set_shift_status(&self, id: Uuid, status: ShiftStatus) -> ApiResult<Shift> {
        let action = status_action(status).ok_or_else(|| {
            rota_core::error::CoreError::InvalidInput(format!(
                "shifts cannot be moved back to {status}"
            ))
        })?;
        self.send_json(Method::POST, self.shift_url(id, Some(action))?, &serde_json::json!({}))
            .await
    }
}

impl ShiftMover for ApiClient {
    type Error = ApiError;

    async fn move_shift(&self, reassignment: Reassignment) -> ApiResult<()> {
        self.reassign_shift(&reassignment).await.map(|_moved| ())
    }
}
