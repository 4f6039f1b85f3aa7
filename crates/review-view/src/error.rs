//! Error types for view mounting.

use thiserror::Error;

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;

/// Errors raised while mounting a generated view.
#[derive(Debug, Error)]
pub enum ViewError {
    /// No element carries the requested container id.
    #[error("Container with id \"{0}\" not found")]
    MissingMountPoint(String),
}
