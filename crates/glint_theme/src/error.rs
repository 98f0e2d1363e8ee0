//! Theme error types

use thiserror::Error;

/// Client storage failures. Never fatal to the theme store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Storage is disabled or not present (private browsing, sandboxed host)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Write rejected because it would exceed the storage quota
    #[error("storage quota exceeded writing {key} ({bytes} bytes)")]
    QuotaExceeded { key: String, bytes: usize },

    /// Backing file could not be read or written
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file exists but is not a key/value table
    #[error("storage contents are corrupt: {0}")]
    Corrupt(String),
}

/// Returned when a string is not one of the two theme tags
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown theme mode {0:?} (expected \"portfolio\" or \"kawaii\")")]
pub struct ParseThemeModeError(pub String);
