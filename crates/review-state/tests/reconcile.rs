//! # Reconciliation Tests
//!
//! Persisted data written under one configuration must load cleanly under
//! another: the live key set always equals the configured dimensions.

use review_state::{EvaluationState, PersistedEvaluation, PersonInfo, RoleConfig};
use serde_json::Number;
use std::collections::BTreeMap;

fn config_with(dimensions: &[&str]) -> RoleConfig {
    let dims: Vec<serde_json::Value> = dimensions
        .iter()
        .map(|key| {
            serde_json::json!({
                "key": key,
                "name": key.to_uppercase(),
                "levelBehaviors": {"junior": "j", "senior": "s"}
            })
        })
        .collect();

    let doc = serde_json::json!({
        "key": "sample",
        "title": "Sample",
        "roleName": "Sample",
        "levels": [{"key": "junior", "name": "Junior"}, {"key": "senior", "name": "Senior"}],
        "dimensions": dims,
    });
    RoleConfig::from_json(&doc.to_string()).unwrap()
}

fn persisted(ratings: &[(&str, i64)], set: &[(&str, bool)]) -> PersistedEvaluation {
    PersistedEvaluation {
        ratings: Some(
            ratings
                .iter()
                .map(|(k, v)| (k.to_string(), Number::from(*v)))
                .collect(),
        ),
        ratings_set: Some(set.iter().map(|(k, v)| (k.to_string(), *v)).collect()),
        person_info: None,
    }
}

fn keys<V>(map: &BTreeMap<String, V>) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

// =============================================================================
// Key set completeness
// =============================================================================

#[test]
fn test_overlapping_key_sets() {
    // D = {a, b, c}, D' = {b, c, d}
    let config = config_with(&["a", "b", "c"]);
    let loaded = persisted(&[("b", 4), ("c", 2), ("d", 5)], &[("b", true), ("d", true)]);

    let state = EvaluationState::restore(&config, loaded);

    assert_eq!(keys(state.ratings()), vec!["a", "b", "c"]);
    assert_eq!(keys(state.ratings_set()), vec!["a", "b", "c"]);
    assert_eq!(state.rating("a"), Some(1));
    assert!(!state.is_set("a"));
    assert_eq!(state.rating("b"), Some(4));
    assert!(state.is_set("b"));
    assert_eq!(state.rating("c"), Some(2));
    assert!(!state.is_set("c"));
}

#[test]
fn test_persisted_superset() {
    // D ⊂ D'
    let config = config_with(&["a"]);
    let loaded = persisted(&[("a", 3), ("b", 5)], &[("a", true), ("b", true)]);

    let state = EvaluationState::restore(&config, loaded);

    assert_eq!(keys(state.ratings()), vec!["a"]);
    assert_eq!(state.rating("a"), Some(3));
    assert!(state.retained_ratings().contains_key("b"));
    // Stale entries never count.
    assert_eq!(state.overall_summary().rated, 1);
    assert_eq!(state.overall_summary().sum, 3.0);
}

#[test]
fn test_persisted_subset() {
    // D' ⊂ D
    let config = config_with(&["a", "b", "c"]);
    let loaded = persisted(&[("c", 5)], &[("c", true)]);

    let state = EvaluationState::restore(&config, loaded);

    assert_eq!(keys(state.ratings()), vec!["a", "b", "c"]);
    assert_eq!(state.rating("a"), Some(1));
    assert_eq!(state.rating("c"), Some(5));
}

#[test]
fn test_identical_key_sets() {
    let config = config_with(&["a", "b"]);
    let loaded = persisted(&[("a", 2), ("b", 3)], &[("a", true), ("b", false)]);

    let state = EvaluationState::restore(&config, loaded);

    assert_eq!(state.rating("a"), Some(2));
    assert_eq!(state.rating("b"), Some(3));
    assert!(state.retained_ratings().is_empty());
}

#[test]
fn test_fields_reconcile_independently() {
    let config = config_with(&["a", "b"]);
    let loaded = PersistedEvaluation {
        ratings: None,
        ratings_set: Some([("a".to_string(), true)].into_iter().collect()),
        person_info: Some(PersonInfo {
            name: "Grace".into(),
            level: "senior".into(),
        }),
    };

    let state = EvaluationState::restore(&config, loaded);

    assert_eq!(state.rating("a"), Some(1));
    assert!(state.is_set("a"));
    assert_eq!(state.person_info().name, "Grace");
    assert_eq!(state.person_info().level, "senior");
}

#[test]
fn test_stale_entries_survive_save() {
    let config = config_with(&["a"]);
    let loaded = persisted(&[("a", 3), ("old", 4)], &[("old", true)]);

    let state = EvaluationState::restore(&config, loaded);
    let saved = state.to_persisted();

    let ratings = saved.ratings.unwrap();
    assert_eq!(ratings.get("old"), Some(&Number::from(4)));
    assert_eq!(ratings.get("a"), Some(&Number::from(3)));
    assert_eq!(saved.ratings_set.unwrap().get("old"), Some(&true));
}

// =============================================================================
// Reset
// =============================================================================

#[test]
fn test_reset_idempotent() {
    let config = config_with(&["a", "b", "c"]);
    let fresh = EvaluationState::new(&config);

    let mut state = EvaluationState::new(&config);
    let _ = state.set_rating("a", 5);
    state.set_name("Linus");
    state.set_level("junior");

    state.reset();
    let once = state.clone();
    state.reset();
    assert_eq!(state, once);
    assert_eq!(state, fresh);

    let _ = state.set_rating("b", 2);
    state.reset();
    assert_eq!(state, fresh);
}
