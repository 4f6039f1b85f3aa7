//! Error types for role configuration loading.
//!
//! Runtime state mutations never fail loudly: an invalid rating is reported
//! through [`crate::RatingChange::Rejected`] instead. Only configuration
//! problems are modelled as errors.

use thiserror::Error;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or validating a [`crate::RoleConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON for the schema.
    #[error("malformed role configuration: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("cannot read role configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A key (role, level or dimension) is empty.
    #[error("empty {kind} key")]
    EmptyKey {
        /// Which kind of key was empty.
        kind: &'static str,
    },

    /// The configuration declares no dimensions or no levels.
    #[error("role configuration '{role}' has no {kind}")]
    Empty {
        /// Role configuration key.
        role: String,
        /// "dimensions" or "levels".
        kind: &'static str,
    },

    /// Two levels share the same key.
    #[error("duplicate level key '{0}'")]
    DuplicateLevel(String),

    /// Two dimensions share the same key.
    #[error("duplicate dimension key '{0}'")]
    DuplicateDimension(String),

    /// A dimension lacks the behaviour text for one of the levels.
    #[error("dimension '{dimension}' has no behaviour text for level '{level}'")]
    MissingBehavior {
        /// Dimension key.
        dimension: String,
        /// Level key without text.
        level: String,
    },

    /// No built-in role matches the requested key.
    #[error("unknown role '{0}'")]
    UnknownRole(String),
}
