//! Persistence error types.
//!
//! Storage backends return these; the game itself never surfaces them to the
//! player. Callers log and fall back to defaults.

use std::fmt;

/// Failure while reading or writing a persisted JSON document
#[derive(Debug)]
pub enum StoreError {
    /// Underlying file I/O failed
    Io {
        /// Storage key (file name) being accessed
        key: String,
        source: std::io::Error,
    },
    /// Document could not be encoded or decoded
    Json {
        key: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { key, source } => write!(f, "storage I/O failed for '{}': {}", key, source),
            StoreError::Json { key, source } => {
                write!(f, "malformed JSON in '{}': {}", key, source)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Json { source, .. } => Some(source),
        }
    }
}

/// Convenience alias: a `Result` using `StoreError` as the error type.
pub type StoreResult<T> = Result<T, StoreError>;
