//! # View Integration Tests
//!
//! A mounted view patched with `Change::All` must match a freshly generated
//! view, whatever state it started from.

use review_state::{EvaluationState, RoleConfig};
use review_view::{generate, patches_for, style, Change, Document, Surface, ViewError};

fn patched(config: &RoleConfig, from: &EvaluationState, to: &EvaluationState) -> Document {
    let mut doc = Document::with_mount_point("app");
    doc.mount("app", generate(config, from)).unwrap();
    for patch in patches_for(config, to, &Change::All) {
        doc.apply(&patch);
    }
    doc
}

fn busy_state(config: &RoleConfig) -> EvaluationState {
    let mut state = EvaluationState::new(config);
    for (i, key) in config.dimension_keys().enumerate() {
        if i % 2 == 0 {
            let _ = state.set_rating(key, (i % 5 + 1) as i64);
        }
    }
    state.set_name("Grace Hopper");
    state.set_level(config.levels[1].key.clone());
    state
}

// =============================================================================
// Patch equivalence
// =============================================================================

#[test]
fn test_patch_from_default_matches_generation() {
    for config in review_state::builtin_roles().unwrap() {
        let from = EvaluationState::new(&config);
        let to = busy_state(&config);

        let doc = patched(&config, &from, &to);
        assert_eq!(doc.mounted(), Some(&generate(&config, &to)), "role {}", config.key);
    }
}

#[test]
fn test_patch_back_to_default_matches_generation() {
    for config in review_state::builtin_roles().unwrap() {
        let from = busy_state(&config);
        let mut to = from.clone();
        to.reset();

        let doc = patched(&config, &from, &to);
        assert_eq!(doc.mounted(), Some(&generate(&config, &to)), "role {}", config.key);
    }
}

#[test]
fn test_incremental_patches_match_generation() {
    let config = RoleConfig::builtin("product_manager").unwrap();
    let mut state = EvaluationState::new(&config);

    let mut doc = Document::with_mount_point("app");
    doc.mount("app", generate(&config, &state)).unwrap();

    let steps: Vec<Box<dyn Fn(&mut EvaluationState) -> Change>> = vec![
        Box::new(|s: &mut EvaluationState| {
            s.set_name("Marty");
            Change::Name
        }),
        Box::new(|s: &mut EvaluationState| {
            s.set_level("pm");
            Change::Level
        }),
        Box::new(|s: &mut EvaluationState| {
            let _ = s.set_rating("dataAnalysis", 3);
            Change::Rating("dataAnalysis".into())
        }),
        Box::new(|s: &mut EvaluationState| {
            let _ = s.set_rating("dataAnalysis", 5);
            Change::Rating("dataAnalysis".into())
        }),
        Box::new(|s: &mut EvaluationState| {
            s.set_level("unknown");
            Change::Level
        }),
    ];

    for step in steps {
        let change = step(&mut state);
        for patch in patches_for(&config, &state, &change) {
            doc.apply(&patch);
        }
        assert_eq!(doc.mounted(), Some(&generate(&config, &state)));
    }
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_rendered_html_is_stable() {
    let config = RoleConfig::builtin("software_engineer").unwrap();
    let state = busy_state(&config);
    assert_eq!(
        generate(&config, &state).to_html(),
        generate(&config, &state).to_html()
    );
}

#[test]
fn test_hidden_badges_in_html() {
    let config = RoleConfig::builtin("software_engineer").unwrap();
    let state = EvaluationState::new(&config);
    let html = generate(&config, &state).to_html();

    let hidden = html
        .matches(r#"class="selected-rating" data-dimension="#)
        .count();
    assert_eq!(hidden, config.dimensions.len());
    assert_eq!(html.matches(" hidden>").count(), config.dimensions.len());
}

#[test]
fn test_page_contains_stylesheet() {
    let config = RoleConfig::builtin("designer").unwrap();
    let mut doc = Document::with_mount_point("app");
    doc.mount("app", generate(&config, &EvaluationState::new(&config)))
        .unwrap();

    let page = doc.to_page(&config.title);
    assert!(page.contains(style::STYLESHEET));
    assert!(page.contains(r#"<div id="app"><div class="container evaluation""#));
}

// =============================================================================
// Mount errors
// =============================================================================

#[test]
fn test_missing_mount_point() {
    let config = RoleConfig::builtin("designer").unwrap();
    let mut doc = Document::new();
    let result = doc.mount("app", generate(&config, &EvaluationState::new(&config)));
    assert!(matches!(result, Err(ViewError::MissingMountPoint(_))));
}
