use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::UNASSIGNED_STAFF_KEY;
use crate::error::CoreError;

/// Row key of the staff roster: a user id or the unassigned sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaffKey {
    User(Uuid),
    Unassigned,
}

impl StaffKey {
    #[must_use]
    pub const fn user_id(self) -> Option<Uuid> {
        match self {
            Self::User(id) => Some(id),
            Self::Unassigned => None,
        }
    }
}

impl From<Option<Uuid>> for StaffKey {
    fn from(user_id: Option<Uuid>) -> Self {
        user_id.map_or(Self::Unassigned, Self::User)
    }
}

impl std::fmt::Display for StaffKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User(id) => write!(f, "{id}"),
            Self::Unassigned => f.write_str(UNASSIGNED_STAFF_KEY),
        }
    }
}

impl FromStr for StaffKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == UNASSIGNED_STAFF_KEY {
            return Ok(Self::Unassigned);
        }
        Uuid::parse_str(s)
            .map(Self::User)
            .map_err(|e| CoreError::ParseError(format!("invalid staff key {s:?}: {e}")))
    }
}

impl Serialize for StaffKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StaffKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Organization member as listed by the members endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user_id: Uuid,
    pub display_name: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}
