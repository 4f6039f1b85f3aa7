//! # Session Integration Tests
//!
//! Drives full sessions against in-memory and sled stores with recording
//! chart widgets, renderers and confirmations.

use review_core::{
    ChartWidget, EvaluationSession, ImageCard, ImageExporter, ImageRenderer, InputEvent,
    JsonFileExporter, Outcome, SessionError, RESET_PROMPT,
};
use review_state::{EvaluationState, InvalidRating, RoleConfig};
use review_store::{EvaluationStore, KeyValueStore, MemoryStore, SledStore};
use review_view::{generate, Document};
use std::cell::RefCell;
use std::rc::Rc;
use tempfile::TempDir;

// =============================================================================
// Fakes
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum ChartCall {
    Render {
        labels: Vec<String>,
        values: Vec<f64>,
        series: String,
    },
    Update {
        values: Vec<f64>,
        series: Option<String>,
    },
}

#[derive(Clone, Default)]
struct RecordingChart {
    calls: Rc<RefCell<Vec<ChartCall>>>,
}

impl RecordingChart {
    fn last(&self) -> Option<ChartCall> {
        self.calls.borrow().last().cloned()
    }
}

impl ChartWidget for RecordingChart {
    fn render(&mut self, labels: &[String], values: &[f64], series_label: &str) {
        self.calls.borrow_mut().push(ChartCall::Render {
            labels: labels.to_vec(),
            values: values.to_vec(),
            series: series_label.to_string(),
        });
    }

    fn update(&mut self, values: &[f64], series_label: Option<&str>) {
        self.calls.borrow_mut().push(ChartCall::Update {
            values: values.to_vec(),
            series: series_label.map(str::to_string),
        });
    }
}

struct FakeRenderer {
    cards: Rc<RefCell<Vec<ImageCard>>>,
}

impl ImageRenderer for FakeRenderer {
    fn render(&mut self, card: &ImageCard) -> review_core::Result<Vec<u8>> {
        self.cards.borrow_mut().push(card.clone());
        Ok(b"\x89PNG".to_vec())
    }
}

fn engineer() -> RoleConfig {
    RoleConfig::builtin("software_engineer").unwrap()
}

fn open(
    config: RoleConfig,
    store: MemoryStore,
) -> (EvaluationSession<MemoryStore, RecordingChart>, Document, RecordingChart) {
    let chart = RecordingChart::default();
    let mut session = EvaluationSession::open(config, store, chart.clone());
    let mut doc = Document::with_mount_point("app");
    session.mount(&mut doc, "app").unwrap();
    (session, doc, chart)
}

fn click(dimension: &str, value: u8) -> InputEvent {
    InputEvent::RatingLabelClicked {
        dimension: dimension.into(),
        value,
    }
}

fn slide(dimension: &str, raw: &str) -> InputEvent {
    InputEvent::SliderInput {
        dimension: dimension.into(),
        raw: raw.into(),
    }
}

// =============================================================================
// Rating input
// =============================================================================

#[test]
fn test_slider_and_label_click_are_equivalent() {
    let (mut by_label, mut doc_a, _) = open(engineer(), MemoryStore::new());
    let (mut by_slider, mut doc_b, _) = open(engineer(), MemoryStore::new());

    by_label.handle(&mut doc_a, click("systemDesign", 3)).unwrap();
    by_slider.handle(&mut doc_b, slide("systemDesign", "3")).unwrap();

    assert_eq!(by_label.state(), by_slider.state());
    assert_eq!(doc_a, doc_b);
}

#[test]
fn test_invalid_ratings_change_nothing() {
    let store = MemoryStore::new();
    let (mut session, mut doc, chart) = open(engineer(), store.clone());
    session.handle(&mut doc, click("impact", 2)).unwrap();

    let state = session.state().clone();
    let html = doc.to_html();
    let stored = store.len();
    let chart_calls = chart.calls.borrow().len();

    for event in [
        click("impact", 0),
        click("impact", 6),
        slide("impact", "9"),
        click("doesNotExist", 3),
    ] {
        let outcome = session.handle(&mut doc, event).unwrap();
        assert!(matches!(outcome, Outcome::Rejected(_)));
    }

    assert_eq!(session.state(), &state);
    assert_eq!(doc.to_html(), html);
    assert_eq!(store.len(), stored);
    assert_eq!(chart.calls.borrow().len(), chart_calls);

    assert_eq!(
        session.handle(&mut doc, click("nope", 3)).unwrap(),
        Outcome::Rejected(InvalidRating::UnknownDimension("nope".into()))
    );
}

#[test]
fn test_view_tracks_state_after_every_event() {
    let (mut session, mut doc, _) = open(engineer(), MemoryStore::new());

    let events = vec![
        InputEvent::NameChanged("Linus".into()),
        InputEvent::LevelSelected("senior".into()),
        click("impact", 5),
        slide("collaboration", "2.0"),
        InputEvent::LevelSelected("junior".into()),
        InputEvent::NameChanged(String::new()),
    ];

    for event in events {
        session.handle(&mut doc, event).unwrap();
        assert_eq!(
            doc.mounted(),
            Some(&generate(session.config(), session.state()))
        );
    }
}

// =============================================================================
// Chart
// =============================================================================

#[test]
fn test_chart_receives_values_in_dimension_order() {
    let config = engineer();
    let keys: Vec<String> = config.dimension_keys().map(str::to_string).collect();
    let (mut session, mut doc, chart) = open(config.clone(), MemoryStore::new());

    match chart.last() {
        Some(ChartCall::Render {
            labels,
            values,
            series,
        }) => {
            assert_eq!(labels, config.labels());
            assert_eq!(values, vec![1.0; keys.len()]);
            assert_eq!(series, "Software Engineer Rating");
        }
        other => panic!("expected initial render, got {other:?}"),
    }

    // Rate the last dimension first
    session.handle(&mut doc, click(&keys[keys.len() - 1], 5)).unwrap();
    session.handle(&mut doc, click(&keys[0], 3)).unwrap();

    let mut expected = vec![1.0; keys.len()];
    expected[0] = 3.0;
    expected[keys.len() - 1] = 5.0;
    assert_eq!(
        chart.last(),
        Some(ChartCall::Update {
            values: expected,
            series: None
        })
    );
}

#[test]
fn test_name_change_pushes_series_label() {
    let (mut session, mut doc, chart) = open(engineer(), MemoryStore::new());

    session
        .handle(&mut doc, InputEvent::NameChanged("Grace".into()))
        .unwrap();
    assert!(matches!(
        chart.last(),
        Some(ChartCall::Update { series: Some(ref s), .. }) if s == "Grace"
    ));

    session
        .handle(&mut doc, InputEvent::NameChanged(String::new()))
        .unwrap();
    assert!(matches!(
        chart.last(),
        Some(ChartCall::Update { series: Some(ref s), .. }) if s == "Software Engineer Rating"
    ));
}

// =============================================================================
// Reset
// =============================================================================

#[test]
fn test_declined_reset_leaves_everything_alone() {
    let store = MemoryStore::new();
    let prompts = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&prompts);

    let (session, mut doc, _) = open(engineer(), store.clone());
    let mut session = session.with_confirmation(move |prompt: &str| {
        seen.borrow_mut().push(prompt.to_string());
        false
    });

    session.handle(&mut doc, click("impact", 4)).unwrap();
    session
        .handle(&mut doc, InputEvent::NameChanged("Ken".into()))
        .unwrap();

    let state = session.state().clone();
    let blob = store.get("evaluation_software_engineer_ratings").unwrap();

    assert_eq!(
        session.handle(&mut doc, InputEvent::ResetRequested).unwrap(),
        Outcome::ResetCancelled
    );
    assert_eq!(session.state(), &state);
    assert_eq!(store.get("evaluation_software_engineer_ratings").unwrap(), blob);
    assert_eq!(prompts.borrow().as_slice(), [RESET_PROMPT.to_string()]);
}

#[test]
fn test_confirmed_reset_is_idempotent() {
    let config = engineer();
    let store = MemoryStore::new();
    let (session, mut doc, _) = open(config.clone(), store.clone());
    let mut session = session.with_confirmation(|_: &str| true);

    session.handle(&mut doc, click("impact", 4)).unwrap();
    session
        .handle(&mut doc, InputEvent::LevelSelected("mid".into()))
        .unwrap();

    assert_eq!(
        session.handle(&mut doc, InputEvent::ResetRequested).unwrap(),
        Outcome::Reset
    );
    assert!(store.keys().unwrap().is_empty());
    let once = session.state().clone();
    let html = doc.to_html();

    session.handle(&mut doc, InputEvent::ResetRequested).unwrap();
    assert_eq!(session.state(), &once);
    assert_eq!(doc.to_html(), html);
    assert!(store.keys().unwrap().is_empty());

    assert_eq!(once, EvaluationState::new(&config));
    assert_eq!(doc.mounted(), Some(&generate(&config, &once)));

    let reopened = EvaluationStore::new(store.clone());
    assert!(reopened.load(&config.key).is_empty());
    assert!(reopened.list_namespaces().unwrap().is_empty());
}

#[test]
fn test_change_after_reset_persists_again() {
    let config = engineer();
    let store = MemoryStore::new();
    let (session, mut doc, _) = open(config.clone(), store.clone());
    let mut session = session.with_confirmation(|_: &str| true);

    session.handle(&mut doc, click("impact", 4)).unwrap();
    session.handle(&mut doc, InputEvent::ResetRequested).unwrap();
    assert!(store.keys().unwrap().is_empty());

    session.handle(&mut doc, click("impact", 2)).unwrap();
    let restored = EvaluationState::restore(&config, EvaluationStore::new(store).load(&config.key));
    assert_eq!(restored.set_rating_of("impact"), Some(2));
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_session_restores_from_sled_after_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("review_store.db");
    let config = engineer();

    let saved = {
        let chart = RecordingChart::default();
        let mut session =
            EvaluationSession::open(config.clone(), SledStore::open(&path).unwrap(), chart);
        let mut doc = Document::with_mount_point("app");
        session.mount(&mut doc, "app").unwrap();

        session.handle(&mut doc, click("impact", 5)).unwrap();
        session
            .handle(&mut doc, InputEvent::NameChanged("Barbara".into()))
            .unwrap();
        session
            .handle(&mut doc, InputEvent::LevelSelected("senior".into()))
            .unwrap();

        let state = session.state().clone();
        session.into_store().flush().unwrap();
        state
    };

    let session = EvaluationSession::open(
        config,
        SledStore::open(&path).unwrap(),
        RecordingChart::default(),
    );
    assert_eq!(session.state(), &saved);
    assert!(session.state().is_set("impact"));
    assert!(!session.state().is_set("systemDesign"));
}

#[test]
fn test_two_roles_share_one_store() {
    let store = MemoryStore::new();
    let (mut engineer_session, mut doc_a, _) = open(engineer(), store.clone());
    let (mut designer_session, mut doc_b, _) =
        open(RoleConfig::builtin("designer").unwrap(), store.clone());

    engineer_session.handle(&mut doc_a, click("impact", 5)).unwrap();
    engineer_session
        .handle(&mut doc_a, InputEvent::NameChanged("Alan".into()))
        .unwrap();
    designer_session
        .handle(&mut doc_b, click("visualDesign", 2))
        .unwrap();

    let (engineer_again, _, _) = open(engineer(), store.clone());
    assert_eq!(engineer_again.state().person_info().name, "Alan");
    assert_eq!(engineer_again.state().set_rating_of("impact"), Some(5));
    assert!(!engineer_again.state().ratings().contains_key("visualDesign"));

    let (designer_again, _, _) = open(RoleConfig::builtin("designer").unwrap(), store);
    assert_eq!(designer_again.state().person_info().name, "");
    assert_eq!(designer_again.state().set_rating_of("visualDesign"), Some(2));
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn test_json_export_writes_bundle() {
    let out = TempDir::new().unwrap();
    let (session, mut doc, _) = open(engineer(), MemoryStore::new());
    let mut session = session.with_exporter(JsonFileExporter::new(out.path()));

    session
        .handle(&mut doc, InputEvent::NameChanged("Ada".into()))
        .unwrap();
    session.handle(&mut doc, click("impact", 4)).unwrap();
    let before = session.state().clone();

    let outcome = session.handle(&mut doc, InputEvent::ExportRequested).unwrap();
    let path = match outcome {
        Outcome::Exported(path) => path,
        other => panic!("expected export, got {other:?}"),
    };
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "software engineer_evaluation_Ada.json"
    );

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["personInfo"]["name"], "Ada");
    assert_eq!(written["ratings"]["impact"], 4);
    assert_eq!(written["ratingsSet"]["systemDesign"], false);
    assert_eq!(written["config"]["key"], "software_engineer");
    assert!(written["timestamp"].as_str().unwrap().ends_with('Z'));

    // Export mutates nothing
    assert_eq!(session.state(), &before);
}

#[test]
fn test_image_export_composes_card() {
    let out = TempDir::new().unwrap();
    let cards = Rc::new(RefCell::new(Vec::new()));
    let renderer = FakeRenderer {
        cards: Rc::clone(&cards),
    };

    let (session, mut doc, _) = open(engineer(), MemoryStore::new());
    let mut session = session.with_exporter(ImageExporter::new(out.path(), renderer));

    session
        .handle(&mut doc, InputEvent::NameChanged("Ada  Lovelace".into()))
        .unwrap();
    session
        .handle(&mut doc, InputEvent::LevelSelected("mid".into()))
        .unwrap();
    session.handle(&mut doc, click("impact", 3)).unwrap();

    let Outcome::Exported(path) = session.handle(&mut doc, InputEvent::ExportRequested).unwrap()
    else {
        panic!("expected export");
    };

    let file_name = path.file_name().unwrap().to_str().unwrap().to_string();
    assert!(file_name.starts_with("Ada-Lovelace_evaluation_"));
    assert!(file_name.ends_with(".png"));
    assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG");

    let cards = cards.borrow();
    let card = &cards[0];
    assert_eq!(card.level_badge.as_deref(), Some("Mid-Level"));
    assert_eq!(card.average, "3.0");
}

#[test]
fn test_export_failure_is_reported() {
    let out = TempDir::new().unwrap();
    let missing = out.path().join("does/not/exist");
    let (session, mut doc, _) = open(engineer(), MemoryStore::new());
    let mut session = session.with_exporter(JsonFileExporter::new(missing));

    let err = session
        .handle(&mut doc, InputEvent::ExportRequested)
        .unwrap_err();
    assert!(matches!(err, SessionError::Export(_)));
}

#[test]
fn test_mount_into_missing_container() {
    let mut session = EvaluationSession::open(engineer(), MemoryStore::new(), RecordingChart::default());
    let mut doc = Document::new();
    let err = session.mount(&mut doc, "app").unwrap_err();
    assert!(matches!(err, SessionError::View(_)));
    assert!(!session.chart().is_rendered());
}
