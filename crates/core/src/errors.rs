use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl SlotError {
    /// Stable, machine-readable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            SlotError::Validation(_) => "validation_error",
            SlotError::Authentication(_) => "authentication_error",
            SlotError::Storage(_) => "storage_error",
            SlotError::Internal(_) => "internal_error",
        }
    }
}

pub type SlotResult<T> = Result<T, SlotError>;
