//! Client for the roster backend REST API and helpers for keeping views
//! fresh: fixed-interval polling and stale-response suppression.

pub mod api;
pub mod error;
pub mod poll;

pub use api::ApiClient;
pub use error::{ApiError, ApiResult};
