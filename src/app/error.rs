//! Application error types

use crate::storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Persistence failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Tracker not found: {0}")]
    TrackerNotFound(String),

    #[error("Routine task not found: {0}")]
    TaskNotFound(String),

    #[error("Unknown mood: {0}")]
    UnknownMood(String),

    /// Sensory channel with no catalog entry or quick preset
    #[error("No {what} for sensory type: {kind}")]
    UnknownSensoryType { kind: String, what: &'static str },

    /// Form-level validation failed
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type AppResult<T> = Result<T, AppError>;
