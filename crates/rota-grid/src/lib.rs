//! Roster view-model: week windows, day and staff bucketing, vertical layout
//! of shifts on the hour grid, and drop-target resolution.

pub mod dnd;
pub mod error;
pub mod group;
pub mod layout;
pub mod week;
