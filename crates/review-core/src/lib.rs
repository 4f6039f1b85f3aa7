//! # Radar Review Core
//!
//! The interaction controller: an [`EvaluationSession`] binds input events to
//! state mutations, persists after every change, patches the mounted view and
//! keeps the radar chart in sync.
//!
//! ## Event Cycle
//!
//! ```text
//!  InputEvent
//!      │
//!      ▼
//!  EvaluationState ──▶ EvaluationStore ──▶ Surface (patches) ──▶ ChartWidget
//! ```
//!
//! ## Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`EvaluationSession`] | Owns state, store, chart and collaborators |
//! | [`ChartAdapter`] | Positional chart values and series label |
//! | [`ExportBundle`] | Snapshot handed to an [`Exporter`] |
//! | [`SessionConfig`] | TOML settings for storage, view and session |
//!
//! ## Quick Start
//!
//! ```rust
//! use review_core::{ChartWidget, EvaluationSession, InputEvent, Outcome};
//! use review_state::RoleConfig;
//! use review_store::MemoryStore;
//! use review_view::Document;
//!
//! struct NoChart;
//! impl ChartWidget for NoChart {
//!     fn render(&mut self, _: &[String], _: &[f64], _: &str) {}
//!     fn update(&mut self, _: &[f64], _: Option<&str>) {}
//! }
//!
//! let config = RoleConfig::builtin("designer")?;
//! let mut session = EvaluationSession::open(config, MemoryStore::new(), NoChart);
//! let mut doc = Document::with_mount_point("app");
//! session.mount(&mut doc, "app")?;
//!
//! let outcome = session.handle(
//!     &mut doc,
//!     InputEvent::RatingLabelClicked { dimension: "visualDesign".into(), value: 4 },
//! )?;
//! assert_eq!(outcome, Outcome::Updated);
//! assert_eq!(session.state().overall_summary().average_text(), "4.0");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Notes
//!
//! - Storage failures inside a handler are logged, never returned
//! - Invalid ratings are an [`Outcome`], not an error
//! - Resets always go through a [`Confirm`] step

mod chart;
mod config;
mod error;
mod export;
mod session;

pub use chart::{chart_values, series_label, ChartAdapter, ChartWidget, SCALE_MAX, SCALE_MIN, SCALE_STEP};
pub use config::{SessionConfig, SessionSettings, StorageConfig, ViewConfig};
pub use error::{Result, SessionError};
pub use export::{
    image_file_name, ExportBundle, Exporter, ImageCard, ImageExporter, ImageRenderer,
    JsonFileExporter,
};
pub use session::{parse_slider, Confirm, EvaluationSession, InputEvent, Outcome, RESET_PROMPT};

#[cfg(test)]
mod tests;
