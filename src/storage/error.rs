//! Storage error types
//!
//! Defines all errors that can occur in the persistence layer.

use thiserror::Error;

/// Errors that can occur while reading or writing persisted state
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value exists but does not parse
    #[error("Malformed value under key '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing an in-memory value failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Key is not usable as a storage name
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let source = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err = StorageError::Malformed {
            key: "trackers".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Malformed value under key 'trackers'"));

        let err = StorageError::InvalidKey("../x".to_string());
        assert_eq!(err.to_string(), "Invalid key: ../x");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let storage_err: StorageError = io_err.into();
        assert!(matches!(storage_err, StorageError::Io(_)));
    }
}
