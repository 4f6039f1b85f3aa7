//! # Export
//!
//! Snapshots an evaluation into an [`ExportBundle`] and hands it to an
//! [`Exporter`]. Two exporters ship with the crate:
//!
//! | Exporter | Output | File name |
//! |----------|--------|-----------|
//! | [`JsonFileExporter`] | Pretty-printed bundle | `<rolename>_evaluation_<name>.json` |
//! | [`ImageExporter`] | Card drawn by an [`ImageRenderer`] | `<name-with-hyphens>_evaluation_<YYYY-MM-DD>.png` |
//!
//! Missing names fall back to `unnamed` in both file names.

use crate::chart::{chart_values, series_label};
use crate::error::{Result, SessionError};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use indexmap::IndexMap;
use review_state::{EvaluationState, OverallSummary, PersonInfo, RoleConfig};
use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};
use tracing::info;

const UNNAMED: &str = "unnamed";

/// Everything an export routine receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    /// The full role configuration.
    pub config: RoleConfig,
    /// Name and level.
    pub person_info: PersonInfo,
    /// Ratings keyed by dimension, in configuration order.
    pub ratings: IndexMap<String, u8>,
    /// Set flags keyed by dimension, in configuration order.
    pub ratings_set: IndexMap<String, bool>,
    /// When the export was requested, UTC.
    #[serde(serialize_with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl ExportBundle {
    /// Snapshots `state` at `timestamp`.
    pub fn new(config: &RoleConfig, state: &EvaluationState, timestamp: DateTime<Utc>) -> Self {
        Self {
            config: config.clone(),
            person_info: state.person_info().clone(),
            ratings: config
                .dimension_keys()
                .filter_map(|key| state.rating(key).map(|r| (key.to_string(), r)))
                .collect(),
            ratings_set: config
                .dimension_keys()
                .map(|key| (key.to_string(), state.is_set(key)))
                .collect(),
            timestamp,
        }
    }

    /// Snapshots `state` now.
    pub fn now(config: &RoleConfig, state: &EvaluationState) -> Self {
        Self::new(config, state, Utc::now())
    }

    /// Pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SessionError::Export(e.to_string()))
    }

    /// `<rolename>_evaluation_<name>.json`, path separators in the name
    /// replaced with hyphens.
    pub fn json_file_name(&self) -> String {
        let name = if self.person_info.name.is_empty() {
            UNNAMED.to_string()
        } else {
            self.person_info.name.replace(['/', '\\'], "-")
        };
        format!(
            "{}_evaluation_{}.json",
            self.config.role_name.to_lowercase(),
            name
        )
    }

    /// `<name-with-hyphens>_evaluation_<YYYY-MM-DD>.<extension>`.
    pub fn image_file_name(&self, extension: &str) -> String {
        image_file_name(&self.person_info.name, self.timestamp.date_naive(), extension)
    }
}

fn iso_millis<S: Serializer>(timestamp: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Image file name for `name` exported on `date`.
///
/// Whitespace runs become single hyphens.
pub fn image_file_name(name: &str, date: NaiveDate, extension: &str) -> String {
    let slug = name
        .split_whitespace()
        .map(|part| part.replace(['/', '\\'], "-"))
        .collect::<Vec<_>>()
        .join("-");
    let slug = if slug.is_empty() { UNNAMED.to_string() } else { slug };
    format!("{slug}_evaluation_{}.{extension}", date.format("%Y-%m-%d"))
}

/// Content of the shareable image card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageCard {
    pub width: u32,
    pub height: u32,
    /// Person name, or `<roleName> Rating` when empty.
    pub name: String,
    /// Level display name, absent when no level is selected.
    pub level_badge: Option<String>,
    /// Chart axis labels in dimension order.
    pub labels: Vec<String>,
    /// Chart values in dimension order.
    pub values: Vec<f64>,
    /// Overall average, one decimal.
    pub average: String,
    /// Overall total, one decimal.
    pub total: String,
}

impl ImageCard {
    /// Card width in pixels.
    pub const WIDTH: u32 = 2160;
    /// Card height in pixels.
    pub const HEIGHT: u32 = 3840;

    /// Lays out the card for a bundle.
    pub fn compose(bundle: &ExportBundle) -> Self {
        let config = &bundle.config;
        let info = &bundle.person_info;

        let summary = OverallSummary::from_ratings(
            config
                .dimension_keys()
                .filter(|key| bundle.ratings_set.get(*key) == Some(&true))
                .filter_map(|key| bundle.ratings.get(key).copied()),
        );

        let level_badge = (!info.level.is_empty()).then(|| {
            config
                .level(&info.level)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| info.level.clone())
        });

        Self {
            width: Self::WIDTH,
            height: Self::HEIGHT,
            name: series_label(config, &info.name),
            level_badge,
            labels: config.labels(),
            values: chart_values(config, |key| bundle.ratings.get(key).copied()),
            average: summary.average_text(),
            total: summary.sum_text(),
        }
    }
}

/// Draws an [`ImageCard`] into encoded image bytes.
pub trait ImageRenderer {
    /// Encodes the card.
    fn render(&mut self, card: &ImageCard) -> Result<Vec<u8>>;

    /// File extension of the encoded format.
    fn extension(&self) -> &str {
        "png"
    }
}

/// Receives export bundles.
pub trait Exporter {
    /// Exports the bundle, returning where it went.
    fn export(&mut self, bundle: &ExportBundle) -> Result<PathBuf>;
}

/// Writes the bundle as pretty-printed JSON into a directory.
#[derive(Debug, Clone)]
pub struct JsonFileExporter {
    dir: PathBuf,
}

impl JsonFileExporter {
    /// Exports into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Exporter for JsonFileExporter {
    fn export(&mut self, bundle: &ExportBundle) -> Result<PathBuf> {
        let path = self.dir.join(bundle.json_file_name());
        write_file(&path, bundle.to_json_pretty()?.as_bytes())?;
        info!(path = %path.display(), "exported evaluation as JSON");
        Ok(path)
    }
}

/// Composes an [`ImageCard`] and writes what the renderer draws.
#[derive(Debug, Clone)]
pub struct ImageExporter<R> {
    dir: PathBuf,
    renderer: R,
}

impl<R: ImageRenderer> ImageExporter<R> {
    /// Exports into `dir` using `renderer`.
    pub fn new(dir: impl Into<PathBuf>, renderer: R) -> Self {
        Self {
            dir: dir.into(),
            renderer,
        }
    }

    /// The wrapped renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

impl<R: ImageRenderer> Exporter for ImageExporter<R> {
    fn export(&mut self, bundle: &ExportBundle) -> Result<PathBuf> {
        let card = ImageCard::compose(bundle);
        let bytes = self.renderer.render(&card)?;

        let path = self
            .dir
            .join(bundle.image_file_name(self.renderer.extension()));
        write_file(&path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "exported evaluation card");
        Ok(path)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)
        .map_err(|e| SessionError::Export(format!("cannot write {}: {e}", path.display())))
}
