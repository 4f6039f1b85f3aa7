//! # Radar Review State
//!
//! Typed role configuration and the in-memory evaluation model.
//!
//! ## Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`RoleConfig`] | Levels and dimensions of one evaluation form |
//! | [`EvaluationState`] | Ratings, set flags and person info |
//! | [`OverallSummary`] | Average, sum and colour band of the set ratings |
//!
//! ## Quick Start
//!
//! ```rust
//! use review_state::{Band, EvaluationState, RoleConfig};
//!
//! let config = RoleConfig::builtin("software_engineer")?;
//! let mut state = EvaluationState::new(&config);
//!
//! let _ = state.set_rating("technicalExecution", 4);
//! let _ = state.set_rating("systemDesign", 5);
//!
//! let summary = state.overall_summary();
//! assert_eq!(summary.sum_text(), "9.0");
//! assert_eq!(summary.band, Some(Band::Purple));
//! # Ok::<(), review_state::ConfigError>(())
//! ```
//!
//! ## Notes
//!
//! - Only dimensions the user explicitly rated count towards the summary
//! - Unknown level keys are accepted; they simply highlight nothing
//! - Nothing here touches storage; persistence lives in `review-store`

mod error;
mod roles;
mod state;
mod summary;

pub use error::{ConfigError, Result};
pub use roles::{builtin_roles, Dimension, Level, RoleConfig, BUILTIN_ROLES};
pub use state::{
    EvaluationState, InvalidRating, PersistedEvaluation, PersonInfo, RatingChange,
    DEFAULT_RATING, MAX_RATING, MIN_RATING,
};
pub use summary::{one_decimal, Band, OverallSummary};
