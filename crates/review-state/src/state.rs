//! # Evaluation State
//!
//! In-memory model of one evaluation session: a rating per dimension, a flag
//! per dimension recording whether the user actually chose that rating, and
//! the evaluated person's name and level.
//!
//! ## Key set invariant
//!
//! `ratings` and `ratings_set` always hold exactly the dimension keys of the
//! configuration the state was built from. Persisted data from an older
//! configuration can carry keys that no longer exist; those entries are moved
//! aside into a retained map so they survive the next save, but they are never
//! rendered and never counted.
//!
//! ```rust
//! use review_state::{EvaluationState, RatingChange, RoleConfig};
//!
//! let config = RoleConfig::builtin("designer").unwrap();
//! let mut state = EvaluationState::new(&config);
//!
//! assert_eq!(state.rating("visualDesign"), Some(1));
//! assert!(!state.is_set("visualDesign"));
//!
//! assert_eq!(state.set_rating("visualDesign", 4), RatingChange::Applied);
//! assert!(state.is_set("visualDesign"));
//! assert_eq!(state.overall_summary().average, 4.0);
//! ```

use crate::roles::RoleConfig;
use crate::summary::OverallSummary;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Lowest selectable rating.
pub const MIN_RATING: u8 = 1;

/// Highest selectable rating.
pub const MAX_RATING: u8 = 5;

/// Rating every dimension starts with.
pub const DEFAULT_RATING: u8 = MIN_RATING;

/// Who is being evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonInfo {
    /// Free text, stored verbatim.
    pub name: String,
    /// Selected level key, empty when no level is chosen.
    pub level: String,
}

/// The three independently persisted structures.
///
/// Every field is optional: a field is `None` when it was never saved or when
/// the stored blob could not be parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedEvaluation {
    /// Rating per dimension key.
    pub ratings: Option<BTreeMap<String, Number>>,
    /// Set flag per dimension key.
    pub ratings_set: Option<BTreeMap<String, bool>>,
    /// Name and level.
    pub person_info: Option<PersonInfo>,
}

impl PersistedEvaluation {
    /// Returns true if nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.ratings.is_none() && self.ratings_set.is_none() && self.person_info.is_none()
    }
}

/// Why a rating change was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRating {
    /// Value outside `MIN_RATING..=MAX_RATING`.
    #[error("rating {0} is outside 1..=5")]
    OutOfRange(i64),
    /// The configuration has no such dimension.
    #[error("unknown dimension \"{0}\"")]
    UnknownDimension(String),
    /// Raw input that does not start with a number.
    #[error("\"{0}\" is not a rating")]
    NotANumber(String),
}

/// Result of [`EvaluationState::set_rating`].
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingChange {
    /// The rating was stored and the dimension marked as set.
    Applied,
    /// Nothing changed.
    Rejected(InvalidRating),
}

impl RatingChange {
    /// Returns true if the state changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, RatingChange::Applied)
    }
}

/// Ratings, set flags and person info for one role session.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationState {
    ratings: BTreeMap<String, u8>,
    ratings_set: BTreeMap<String, bool>,
    person_info: PersonInfo,
    retained_ratings: BTreeMap<String, Number>,
    retained_set: BTreeMap<String, bool>,
}

impl EvaluationState {
    /// Creates the default state for `config`: every dimension at 1, unset.
    pub fn new(config: &RoleConfig) -> Self {
        let ratings = config
            .dimension_keys()
            .map(|k| (k.to_string(), DEFAULT_RATING))
            .collect();
        let ratings_set = config
            .dimension_keys()
            .map(|k| (k.to_string(), false))
            .collect();

        Self {
            ratings,
            ratings_set,
            person_info: PersonInfo::default(),
            retained_ratings: BTreeMap::new(),
            retained_set: BTreeMap::new(),
        }
    }

    /// Creates the default state and overlays previously persisted data.
    pub fn restore(config: &RoleConfig, persisted: PersistedEvaluation) -> Self {
        let mut state = Self::new(config);
        state.reconcile(persisted);
        state
    }

    /// Merges persisted data key by key over the current values.
    ///
    /// Each field is handled independently. Keys unknown to the configuration
    /// are retained aside; dimensions missing from the persisted data keep
    /// their current value. Ratings outside the selectable range are clamped.
    pub fn reconcile(&mut self, persisted: PersistedEvaluation) {
        if let Some(ratings) = persisted.ratings {
            for (key, value) in ratings {
                match self.ratings.get_mut(&key) {
                    Some(slot) => *slot = clamp_rating(&value),
                    None => {
                        debug!(dimension = %key, "retaining stale rating");
                        self.retained_ratings.insert(key, value);
                    }
                }
            }
        }

        if let Some(flags) = persisted.ratings_set {
            for (key, flag) in flags {
                match self.ratings_set.get_mut(&key) {
                    Some(slot) => *slot = flag,
                    None => {
                        self.retained_set.insert(key, flag);
                    }
                }
            }
        }

        if let Some(info) = persisted.person_info {
            self.person_info = info;
        }
    }

    /// Stores a rating and marks the dimension as set.
    ///
    /// Out-of-range values and unknown dimensions leave the state untouched.
    pub fn set_rating(&mut self, dimension: &str, value: i64) -> RatingChange {
        if !(i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&value) {
            return RatingChange::Rejected(InvalidRating::OutOfRange(value));
        }
        let Some(slot) = self.ratings.get_mut(dimension) else {
            return RatingChange::Rejected(InvalidRating::UnknownDimension(dimension.to_string()));
        };

        // Range checked above.
        *slot = value as u8;
        self.ratings_set.insert(dimension.to_string(), true);
        RatingChange::Applied
    }

    /// Sets the level key verbatim. Unknown keys are accepted and simply
    /// match no level card.
    pub fn set_level(&mut self, level: impl Into<String>) {
        self.person_info.level = level.into();
    }

    /// Sets the person's name verbatim.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.person_info.name = name.into();
    }

    /// Returns every dimension to 1/unset, clears person info and drops
    /// retained stale entries.
    ///
    /// The owner is responsible for clearing persisted storage as well.
    pub fn reset(&mut self) {
        self.ratings.values_mut().for_each(|r| *r = DEFAULT_RATING);
        self.ratings_set.values_mut().for_each(|s| *s = false);
        self.person_info = PersonInfo::default();
        self.retained_ratings.clear();
        self.retained_set.clear();
    }

    /// Current rating of a dimension.
    pub fn rating(&self, dimension: &str) -> Option<u8> {
        self.ratings.get(dimension).copied()
    }

    /// Whether the user explicitly chose the rating of a dimension.
    pub fn is_set(&self, dimension: &str) -> bool {
        self.ratings_set.get(dimension).copied().unwrap_or(false)
    }

    /// Rating for a dimension if it has been set.
    pub fn set_rating_of(&self, dimension: &str) -> Option<u8> {
        self.is_set(dimension)
            .then(|| self.rating(dimension))
            .flatten()
    }

    /// All live ratings, keyed by dimension.
    pub fn ratings(&self) -> &BTreeMap<String, u8> {
        &self.ratings
    }

    /// All live set flags, keyed by dimension.
    pub fn ratings_set(&self) -> &BTreeMap<String, bool> {
        &self.ratings_set
    }

    /// Name and level.
    pub fn person_info(&self) -> &PersonInfo {
        &self.person_info
    }

    /// Persisted ratings whose keys are not part of the configuration.
    pub fn retained_ratings(&self) -> &BTreeMap<String, Number> {
        &self.retained_ratings
    }

    /// Average, sum and band over the explicitly set ratings.
    pub fn overall_summary(&self) -> OverallSummary {
        OverallSummary::from_ratings(
            self.ratings
                .iter()
                .filter(|(key, _)| self.is_set(key))
                .map(|(_, rating)| *rating),
        )
    }

    /// Everything that should be written to storage, retained entries included.
    pub fn to_persisted(&self) -> PersistedEvaluation {
        let mut ratings = self.retained_ratings.clone();
        ratings.extend(
            self.ratings
                .iter()
                .map(|(k, v)| (k.clone(), Number::from(*v))),
        );

        let mut ratings_set = self.retained_set.clone();
        ratings_set.extend(self.ratings_set.iter().map(|(k, v)| (k.clone(), *v)));

        PersistedEvaluation {
            ratings: Some(ratings),
            ratings_set: Some(ratings_set),
            person_info: Some(self.person_info.clone()),
        }
    }
}

fn clamp_rating(value: &Number) -> u8 {
    let raw = value.as_f64().unwrap_or(f64::from(DEFAULT_RATING));
    raw.round()
        .clamp(f64::from(MIN_RATING), f64::from(MAX_RATING)) as u8
}
