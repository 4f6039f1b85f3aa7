//! # Evaluation Persistence
//!
//! Maps the three evaluation structures onto independently keyed blobs in a
//! [`KeyValueStore`], namespaced by the role configuration key `K`:
//!
//! | Key | Blob |
//! |-----|------|
//! | `evaluation_<K>_ratings` | `{"dimensionKey": 3, ...}` |
//! | `evaluation_<K>_info` | `{"name": "...", "level": "..."}` |
//! | `evaluation_<K>_ratingsSet` | `{"dimensionKey": true, ...}` |
//!
//! Each blob is read on its own. A blob that is missing, unreadable or not
//! valid JSON for its structure loads as absent without affecting the other
//! two.

use crate::error::Result;
use crate::storage::KeyValueStore;
use review_state::PersistedEvaluation;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

const KEY_PREFIX: &str = "evaluation_";
const RATINGS_SUFFIX: &str = "_ratings";
const INFO_SUFFIX: &str = "_info";
const RATINGS_SET_SUFFIX: &str = "_ratingsSet";

/// Storage keys of one role namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Key of the ratings blob.
    pub ratings: String,
    /// Key of the person info blob.
    pub info: String,
    /// Key of the set-flags blob.
    pub ratings_set: String,
}

impl StorageKeys {
    /// Derives the keys for a role configuration key.
    pub fn for_role(role_key: &str) -> Self {
        let base = format!("{KEY_PREFIX}{role_key}");
        Self {
            ratings: format!("{base}{RATINGS_SUFFIX}"),
            info: format!("{base}{INFO_SUFFIX}"),
            ratings_set: format!("{base}{RATINGS_SET_SUFFIX}"),
        }
    }

    /// All three keys.
    pub fn all(&self) -> [&str; 3] {
        [
            self.ratings.as_str(),
            self.info.as_str(),
            self.ratings_set.as_str(),
        ]
    }
}

/// Reads and writes evaluations through a [`KeyValueStore`].
///
/// # Example
///
/// ```rust
/// use review_state::{EvaluationState, RoleConfig};
/// use review_store::{EvaluationStore, MemoryStore};
///
/// let config = RoleConfig::builtin("designer").unwrap();
/// let mut store = EvaluationStore::new(MemoryStore::new());
///
/// let mut state = EvaluationState::new(&config);
/// let _ = state.set_rating("visualDesign", 4);
/// store.save(&config.key, &state.to_persisted()).unwrap();
///
/// let restored = EvaluationState::restore(&config, store.load(&config.key));
/// assert_eq!(restored, state);
/// ```
#[derive(Debug, Clone)]
pub struct EvaluationStore<S> {
    store: S,
}

impl<S: KeyValueStore> EvaluationStore<S> {
    /// Wraps a key/value store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads whatever is persisted for `role_key`.
    ///
    /// Never fails: unreadable or unparseable blobs are logged and reported
    /// as absent.
    pub fn load(&self, role_key: &str) -> PersistedEvaluation {
        let keys = StorageKeys::for_role(role_key);
        let loaded = PersistedEvaluation {
            ratings: self.read_blob(&keys.ratings),
            ratings_set: self.read_blob(&keys.ratings_set),
            person_info: self.read_blob(&keys.info),
        };

        debug!(
            role = role_key,
            ratings = loaded.ratings.is_some(),
            ratings_set = loaded.ratings_set.is_some(),
            info = loaded.person_info.is_some(),
            "loaded persisted evaluation"
        );
        loaded
    }

    /// Writes every present structure under its own key.
    pub fn save(&mut self, role_key: &str, evaluation: &PersistedEvaluation) -> Result<()> {
        let keys = StorageKeys::for_role(role_key);

        if let Some(ratings) = &evaluation.ratings {
            self.write_blob(&keys.ratings, ratings)?;
        }
        if let Some(info) = &evaluation.person_info {
            self.write_blob(&keys.info, info)?;
        }
        if let Some(flags) = &evaluation.ratings_set {
            self.write_blob(&keys.ratings_set, flags)?;
        }

        Ok(())
    }

    /// Removes all three keys of the namespace.
    pub fn clear(&mut self, role_key: &str) -> Result<()> {
        let keys = StorageKeys::for_role(role_key);
        for key in keys.all() {
            self.store.remove(key)?;
        }
        debug!(role = role_key, "cleared persisted evaluation");
        Ok(())
    }

    /// Role keys that currently have at least one persisted structure.
    pub fn list_namespaces(&self) -> Result<Vec<String>> {
        let mut roles = BTreeSet::new();

        for key in self.store.keys()? {
            let Some(rest) = key.strip_prefix(KEY_PREFIX) else {
                continue;
            };
            // No suffix ends with another, so at most one matches.
            let role = [RATINGS_SET_SUFFIX, RATINGS_SUFFIX, INFO_SUFFIX]
                .iter()
                .find_map(|suffix| rest.strip_suffix(suffix));
            if let Some(role) = role.filter(|r| !r.is_empty()) {
                roles.insert(role.to_string());
            }
        }

        Ok(roles.into_iter().collect())
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Unwraps the store.
    pub fn into_inner(self) -> S {
        self.store
    }

    fn read_blob<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "cannot read stored blob, using defaults");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "malformed stored blob, using defaults");
                None
            }
        }
    }

    fn write_blob<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)
    }
}
