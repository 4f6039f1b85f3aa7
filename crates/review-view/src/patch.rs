//! # View Patches
//!
//! Incremental updates to a generated tree. Patches are derived purely from
//! the configuration, the state and what changed, then applied to whichever
//! [`Surface`](crate::Surface) holds the tree.
//!
//! ```text
//! event ──▶ state mutation ──▶ patches_for(change) ──▶ Surface::apply
//! ```
//!
//! Applying `patches_for(.., Change::All)` for a state to a tree generated
//! from any other state of the same configuration yields exactly the tree
//! generated from that state.

use crate::markup::Element;
use crate::style::{self, attrs, classes, ids};
use review_state::{Band, EvaluationState, RoleConfig, MAX_RATING, MIN_RATING};

/// What part of the state changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// The person's name.
    Name,
    /// The selected level.
    Level,
    /// The rating of one dimension.
    Rating(String),
    /// Everything, e.g. after a reset.
    All,
}

/// One incremental update of the view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewPatch {
    /// Value of the name field.
    Name { value: String },
    /// Active toggle and highlighted level cards.
    LevelSelection { level: String },
    /// Slider position and active label of one dimension.
    RatingSelector {
        dimension: String,
        value: u8,
        set: bool,
    },
    /// Numeric badge of one dimension, hidden when `None`.
    RatingBadge {
        dimension: String,
        value: Option<u8>,
    },
    /// Overall card numbers and band.
    Overall {
        average: String,
        total: String,
        band: Option<Band>,
    },
}

/// Derives the patches for `change`. The overall card patch always comes last.
pub fn patches_for(config: &RoleConfig, state: &EvaluationState, change: &Change) -> Vec<ViewPatch> {
    let mut patches = Vec::new();

    match change {
        Change::Name => patches.push(name_patch(state)),
        Change::Level => patches.push(level_patch(state)),
        Change::Rating(dimension) => {
            if config.has_dimension(dimension) {
                patches.extend(rating_patches(state, dimension));
            }
        }
        Change::All => {
            patches.push(name_patch(state));
            patches.push(level_patch(state));
            for dimension in config.dimension_keys() {
                patches.extend(rating_patches(state, dimension));
            }
        }
    }

    let summary = state.overall_summary();
    patches.push(ViewPatch::Overall {
        average: summary.average_text(),
        total: summary.sum_text(),
        band: summary.band,
    });
    patches
}

fn name_patch(state: &EvaluationState) -> ViewPatch {
    ViewPatch::Name {
        value: state.person_info().name.clone(),
    }
}

fn level_patch(state: &EvaluationState) -> ViewPatch {
    ViewPatch::LevelSelection {
        level: state.person_info().level.clone(),
    }
}

fn rating_patches(state: &EvaluationState, dimension: &str) -> [ViewPatch; 2] {
    let set = state.is_set(dimension);
    let value = state.rating(dimension).unwrap_or(MIN_RATING);
    [
        ViewPatch::RatingSelector {
            dimension: dimension.to_string(),
            value,
            set,
        },
        ViewPatch::RatingBadge {
            dimension: dimension.to_string(),
            value: set.then_some(value),
        },
    ]
}

/// Applies one patch to a tree produced by [`generate`](crate::generate).
pub fn apply(tree: &mut Element, patch: &ViewPatch) {
    match patch {
        ViewPatch::Name { value } => {
            if let Some(input) = tree.find_by_id_mut(ids::PERSON_NAME) {
                input.set_attr("value", value.as_str());
            }
        }
        ViewPatch::LevelSelection { level } => {
            tree.update_where(
                &|e: &Element| e.has_class(classes::LEVEL_TOGGLE),
                &mut |e: &mut Element| {
                    let on = e.get_attr(attrs::LEVEL) == Some(level.as_str());
                    e.toggle_class(classes::ACTIVE, on);
                },
            );
            tree.update_where(
                &|e: &Element| e.has_class(classes::LEVEL_CARD),
                &mut |e: &mut Element| {
                    let on = e.get_attr(attrs::LEVEL) == Some(level.as_str());
                    e.toggle_class(classes::HIGHLIGHTED, on);
                },
            );
        }
        ViewPatch::RatingSelector {
            dimension,
            value,
            set,
        } => {
            tree.update_where(
                &|e: &Element| is_for(e, classes::RATING_SELECTOR, dimension),
                &mut |selector: &mut Element| update_selector(selector, *value, *set),
            );
        }
        ViewPatch::RatingBadge { dimension, value } => {
            tree.update_where(
                &|e: &Element| is_for(e, classes::SELECTED_RATING, dimension),
                &mut |badge: &mut Element| update_badge(badge, *value),
            );
        }
        ViewPatch::Overall {
            average,
            total,
            band,
        } => {
            if let Some(e) = tree.find_by_id_mut(ids::OVERALL_RATING) {
                e.set_text(average);
            }
            if let Some(e) = tree.find_by_id_mut(ids::TOTAL_SCORE) {
                e.set_text(total);
            }
            tree.update_where(
                &|e: &Element| e.has_class(classes::OVERALL_CARD),
                &mut |card: &mut Element| {
                    for b in Band::ALL {
                        card.remove_class(&style::band_class(b));
                    }
                    if let Some(b) = band {
                        card.add_class(&style::band_class(*b));
                    }
                },
            );
        }
    }
}

fn is_for(e: &Element, class: &str, dimension: &str) -> bool {
    e.has_class(class) && e.get_attr(attrs::DIMENSION) == Some(dimension)
}

fn update_selector(selector: &mut Element, value: u8, set: bool) {
    let value_text = value.to_string();
    selector.update_where(
        &|e: &Element| e.has_class(classes::RANGE),
        &mut |range: &mut Element| range.set_attr("value", value_text.as_str()),
    );
    selector.update_where(
        &|e: &Element| e.has_class(classes::RATING_LABEL),
        &mut |label: &mut Element| {
            let on = set && label.get_attr(attrs::VALUE) == Some(value_text.as_str());
            label.toggle_class(classes::ACTIVE, on);
        },
    );
}

fn update_badge(badge: &mut Element, value: Option<u8>) {
    for v in MIN_RATING..=MAX_RATING {
        badge.remove_class(&style::rating_class(v));
    }
    match value {
        Some(v) => {
            badge.remove_attr(attrs::HIDDEN);
            badge.add_class(&style::rating_class(v));
            badge.set_text(&v.to_string());
        }
        None => {
            badge.set_text("");
            badge.set_flag(attrs::HIDDEN);
        }
    }
}
