//! # Chart Adapter
//!
//! Translates the evaluation state into the shape a radar chart widget
//! expects: one label and one value per dimension, positionally matched to
//! the configuration's dimension order.
//!
//! ```text
//! RoleConfig.dimensions = [X, Y, Z]
//!                          │  │  │
//! values                = [ratings[X], ratings[Y], ratings[Z]]
//! ```
//!
//! The order never depends on the order ratings were set in or on the key
//! order of any map.

use review_state::{EvaluationState, RoleConfig};
use tracing::trace;

/// Lowest value on the radial axis.
pub const SCALE_MIN: f64 = 0.0;
/// Highest value on the radial axis.
pub const SCALE_MAX: f64 = 5.0;
/// Distance between radial grid lines.
pub const SCALE_STEP: f64 = 1.0;

/// Chart values in dimension order, looked up through `rating`. Missing
/// ratings plot as 0.
pub fn chart_values(config: &RoleConfig, rating: impl Fn(&str) -> Option<u8>) -> Vec<f64> {
    config
        .dimension_keys()
        .map(|key| f64::from(rating(key).unwrap_or_default()))
        .collect()
}

/// The person's name, or `<roleName> Rating` while the name is empty.
pub fn series_label(config: &RoleConfig, name: &str) -> String {
    if name.is_empty() {
        config.default_series_label()
    } else {
        name.to_string()
    }
}

/// External radar chart widget.
pub trait ChartWidget {
    /// Draws the chart for the first time.
    fn render(&mut self, labels: &[String], values: &[f64], series_label: &str);

    /// Replaces the plotted values, and the series label when given.
    fn update(&mut self, values: &[f64], series_label: Option<&str>);
}

/// Feeds a [`ChartWidget`] from evaluation state.
#[derive(Debug)]
pub struct ChartAdapter<C> {
    widget: C,
    rendered: bool,
}

impl<C: ChartWidget> ChartAdapter<C> {
    /// Wraps a widget that has not been drawn yet.
    pub fn new(widget: C) -> Self {
        Self {
            widget,
            rendered: false,
        }
    }

    /// Draws the chart with labels, values and series label.
    pub fn render(&mut self, config: &RoleConfig, state: &EvaluationState) {
        let labels = config.labels();
        let values = chart_values(config, |key| state.rating(key));
        let label = series_label(config, &state.person_info().name);

        trace!(?values, series = %label, "chart render");
        self.widget.render(&labels, &values, &label);
        self.rendered = true;
    }

    /// Pushes new values. Before the first render this renders instead.
    pub fn update(&mut self, config: &RoleConfig, state: &EvaluationState, label_changed: bool) {
        if !self.rendered {
            self.render(config, state);
            return;
        }

        let values = chart_values(config, |key| state.rating(key));
        let label = label_changed.then(|| series_label(config, &state.person_info().name));

        trace!(?values, ?label, "chart update");
        self.widget.update(&values, label.as_deref());
    }

    /// Whether the widget has been drawn.
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    /// The wrapped widget.
    pub fn widget(&self) -> &C {
        &self.widget
    }

    /// Unwraps the widget.
    pub fn into_inner(self) -> C {
        self.widget
    }
}
