use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ApiError(#[from] rota_client::error::ApiError),

    #[error(transparent)]
    GridError(#[from] rota_grid::error::GridError),

    #[error(transparent)]
    CoreError(#[from] rota_core::error::CoreError),
}

impl AppError {
    /// Message suitable for showing to the person running the tool.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiError(e) => e.toast_message(),
            Self::GridError(e) => e.to_string(),
            Self::CoreError(e) => e.to_string(),
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
