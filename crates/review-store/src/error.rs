//! Error types for the persistence layer.

use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by a [`crate::KeyValueStore`] or while encoding blobs.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to open, read or write the database.
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Failed to serialize or deserialize a blob.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored value or key is not valid UTF-8.
    #[error("Stored value for '{0}' is not valid UTF-8")]
    Encoding(String),
}
