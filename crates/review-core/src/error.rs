//! Error types for Radar Review Core.

use thiserror::Error;

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Core error type for evaluation sessions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The view could not be mounted.
    #[error("View error: {0}")]
    View(#[from] review_view::ViewError),

    /// Role configuration could not be loaded.
    #[error("Role configuration error: {0}")]
    Role(#[from] review_state::ConfigError),

    /// Store error passthrough.
    #[error("Store error: {0}")]
    Store(#[from] review_store::StoreError),

    /// The export routine failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// Settings file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
