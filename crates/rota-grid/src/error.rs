use thiserror::Error;

/// Roster grid errors
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Invalid drop zone: {0}")]
    InvalidDropZone(String),

    #[error("Nonexistent local time: {0}")]
    NonexistentLocalTime(String),

    #[error(transparent)]
    CoreError(#[from] rota_core::error::CoreError),
}

pub type GridResult<T> = std::result::Result<T, GridError>;
