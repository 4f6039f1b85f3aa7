//! The evaluation session facade.
//!
//! An [`EvaluationSession`] owns everything one evaluation needs: the role
//! configuration, the state, a handle on the store, the chart adapter and
//! the export and confirmation collaborators. Nothing is global, so several
//! sessions (one per role, say) can share one store.

use crate::chart::{ChartAdapter, ChartWidget};
use crate::error::{Result, SessionError};
use crate::export::{ExportBundle, Exporter};

use review_state::{EvaluationState, InvalidRating, RatingChange, RoleConfig};
use review_store::{EvaluationStore, KeyValueStore};
use review_view::{generate, patches_for, Change, Surface};

use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Prompt shown before a reset.
pub const RESET_PROMPT: &str =
    "Are you sure you want to reset all ratings and information? This cannot be undone.";

/// Asks the user a yes/no question.
pub trait Confirm {
    /// Returns true if the user agreed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The name field changed.
    NameChanged(String),
    /// A level toggle was selected.
    LevelSelected(String),
    /// The slider of a dimension moved. `raw` is the input's text value.
    SliderInput { dimension: String, raw: String },
    /// A rating label was clicked.
    RatingLabelClicked { dimension: String, value: u8 },
    /// The reset button was pressed.
    ResetRequested,
    /// The export button was pressed.
    ExportRequested,
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed, was persisted and the view and chart were refreshed.
    Updated,
    /// The input was invalid, nothing changed.
    Rejected(InvalidRating),
    /// The user declined the reset.
    ResetCancelled,
    /// Everything was returned to defaults.
    Reset,
    /// The export routine wrote its output here.
    Exported(PathBuf),
}

/// One interactive evaluation for one role.
///
/// Every mutating event runs the same cycle, in this order:
///
/// ```text
/// mutate state ──▶ persist ──▶ patch view ──▶ update chart
/// ```
///
/// Reset skips the persist step and leaves the role's namespace empty.
/// Export reads a snapshot and mutates nothing.
///
/// # Example
///
/// ```rust,ignore
/// let mut session = EvaluationSession::open(config, MemoryStore::new(), widget)
///     .with_confirmation(|_: &str| true);
/// let mut doc = Document::with_mount_point("app");
/// session.mount(&mut doc, "app")?;
///
/// session.handle(&mut doc, InputEvent::NameChanged("Ada".into()))?;
/// ```
pub struct EvaluationSession<S, C> {
    /// Role configuration.
    config: RoleConfig,

    /// Ratings, flags and person info.
    state: EvaluationState,

    /// Namespaced persistence.
    store: EvaluationStore<S>,

    /// Radar chart feed.
    chart: ChartAdapter<C>,

    /// Export routine, if any.
    exporter: Option<Box<dyn Exporter>>,

    /// Reset confirmation.
    confirm: Box<dyn Confirm>,
}

impl<S: KeyValueStore, C: ChartWidget> EvaluationSession<S, C> {
    /// Opens a session, restoring whatever `store` holds for the role.
    ///
    /// Resets are declined until a confirmation is configured with
    /// [`with_confirmation`](Self::with_confirmation).
    pub fn open(config: RoleConfig, store: S, widget: C) -> Self {
        let store = EvaluationStore::new(store);
        let state = EvaluationState::restore(&config, store.load(&config.key));

        info!(
            role = %config.key,
            rated = state.overall_summary().rated,
            "evaluation session opened"
        );

        Self {
            config,
            state,
            store,
            chart: ChartAdapter::new(widget),
            exporter: None,
            confirm: Box::new(|_: &str| false),
        }
    }

    /// Sets the export routine.
    pub fn with_exporter(mut self, exporter: impl Exporter + 'static) -> Self {
        self.exporter = Some(Box::new(exporter));
        self
    }

    /// Sets the reset confirmation.
    pub fn with_confirmation(mut self, confirm: impl Confirm + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    /// Renders the view into `container_id` and draws the chart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::View`] if the surface has no such container.
    pub fn mount<V: Surface + ?Sized>(&mut self, surface: &mut V, container_id: &str) -> Result<()> {
        surface.mount(container_id, generate(&self.config, &self.state))?;
        self.chart.render(&self.config, &self.state);
        debug!(container = container_id, "session mounted");
        Ok(())
    }

    /// Handles one input event.
    ///
    /// # Errors
    ///
    /// Only export can fail, with [`SessionError::Export`]. Invalid ratings
    /// are reported as [`Outcome::Rejected`] and storage failures are logged.
    pub fn handle<V: Surface + ?Sized>(&mut self, surface: &mut V, event: InputEvent) -> Result<Outcome> {
        debug!(?event, "handling input");

        match event {
            InputEvent::NameChanged(name) => {
                self.state.set_name(name);
                self.sync(surface, &Change::Name, true);
                Ok(Outcome::Updated)
            }
            InputEvent::LevelSelected(level) => {
                self.state.set_level(level);
                self.sync(surface, &Change::Level, false);
                Ok(Outcome::Updated)
            }
            InputEvent::SliderInput { dimension, raw } => match parse_slider(&raw) {
                Some(value) => Ok(self.rate(surface, &dimension, value)),
                None => {
                    debug!(dimension = %dimension, raw = %raw, "unparseable slider input");
                    Ok(Outcome::Rejected(InvalidRating::NotANumber(raw)))
                }
            },
            InputEvent::RatingLabelClicked { dimension, value } => {
                Ok(self.rate(surface, &dimension, i64::from(value)))
            }
            InputEvent::ResetRequested => Ok(self.reset(surface)),
            InputEvent::ExportRequested => self.export().map(Outcome::Exported),
        }
    }

    fn rate<V: Surface + ?Sized>(&mut self, surface: &mut V, dimension: &str, value: i64) -> Outcome {
        match self.state.set_rating(dimension, value) {
            RatingChange::Applied => {
                self.sync(surface, &Change::Rating(dimension.to_string()), false);
                Outcome::Updated
            }
            RatingChange::Rejected(reason) => {
                debug!(dimension, value, %reason, "rating rejected");
                Outcome::Rejected(reason)
            }
        }
    }

    fn reset<V: Surface + ?Sized>(&mut self, surface: &mut V) -> Outcome {
        if !self.confirm.confirm(RESET_PROMPT) {
            debug!("reset declined");
            return Outcome::ResetCancelled;
        }

        self.state.reset();
        if let Err(e) = self.store.clear(&self.config.key) {
            warn!(role = %self.config.key, error = %e, "failed to clear stored evaluation");
        }
        // Storage stays empty until the next change.
        self.refresh(surface, &Change::All, true);
        info!(role = %self.config.key, "evaluation reset");
        Outcome::Reset
    }

    fn export(&mut self) -> Result<PathBuf> {
        let bundle = ExportBundle::now(&self.config, &self.state);
        let exporter = self
            .exporter
            .as_mut()
            .ok_or_else(|| SessionError::Export("no export routine configured".to_string()))?;
        exporter.export(&bundle)
    }

    /// Persist, then refresh.
    fn sync<V: Surface + ?Sized>(&mut self, surface: &mut V, change: &Change, label_changed: bool) {
        self.persist();
        self.refresh(surface, change, label_changed);
    }

    /// Patch the view, update the chart.
    fn refresh<V: Surface + ?Sized>(&mut self, surface: &mut V, change: &Change, label_changed: bool) {
        for patch in patches_for(&self.config, &self.state, change) {
            surface.apply(&patch);
        }
        self.chart.update(&self.config, &self.state, label_changed);
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.config.key, &self.state.to_persisted()) {
            warn!(role = %self.config.key, error = %e, "failed to persist evaluation");
        }
    }

    /// Role configuration.
    pub fn config(&self) -> &RoleConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> &EvaluationState {
        &self.state
    }

    /// The chart adapter.
    pub fn chart(&self) -> &ChartAdapter<C> {
        &self.chart
    }

    /// The underlying store.
    pub fn store(&self) -> &EvaluationStore<S> {
        &self.store
    }

    /// Closes the session, handing back the store.
    pub fn into_store(self) -> S {
        self.store.into_inner()
    }
}

/// Reads a slider value the way integer parsing of the input text does:
/// optional leading whitespace and sign, then the leading digits.
///
/// `"3"`, `"3.0"` and `"4abc"` read as 3, 3 and 4; `"abc"` reads as nothing.
pub fn parse_slider(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
