use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StaffKey;

/// Lifecycle status of a shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    Draft,
    Published,
    Acknowledged,
    Completed,
    Cancelled,
}

impl ShiftStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Acknowledged => "acknowledged",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Colour used when a shift carries no custom colour
    #[must_use]
    pub const fn default_color(self) -> &'static str {
        match self {
            Self::Draft => "#9ca3af",
            Self::Published => "#3b82f6",
            Self::Acknowledged => "#10b981",
            Self::Completed => "#6b7280",
            Self::Cancelled => "#ef4444",
        }
    }
}

impl std::fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}

/// Labor-rule violation attached to a shift by the validation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceWarning {
    pub severity: WarningSeverity,
    pub message: String,
}

/// A scheduled work period as owned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ShiftStatus,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub location_id: Option<Uuid>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub break_minutes: Option<u32>,
    #[serde(default)]
    pub compliance_warnings: Vec<ComplianceWarning>,
}

impl Shift {
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end_time.signed_duration_since(self.start_time)
    }

    /// Duration minus the unpaid break, never negative.
    #[must_use]
    pub fn paid_duration(&self) -> TimeDelta {
        let unpaid = TimeDelta::minutes(i64::from(self.break_minutes.unwrap_or(0)));
        (self.duration() - unpaid).max(TimeDelta::zero())
    }

    #[must_use]
    pub fn display_color(&self) -> &str {
        self.color.as_deref().unwrap_or(self.status.default_color())
    }

    #[must_use]
    pub fn staff_key(&self) -> StaffKey {
        StaffKey::from(self.user_id)
    }

    #[must_use]
    pub fn has_blocking_warnings(&self) -> bool {
        self.compliance_warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Error)
    }
}

/// Body of a shift creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShift {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ShiftStatus,
    pub user_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub color: Option<String>,
    pub break_minutes: Option<u32>,
}

/// Partial shift update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_minutes: Option<u32>,
}
