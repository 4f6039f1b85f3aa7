//! # View Generator
//!
//! Pure mapping from a role configuration and an evaluation state to a
//! markup tree. The output depends on nothing else, so the same inputs always
//! produce the same tree.
//!
//! ## Layout
//!
//! ```text
//! evaluation
//! ├── header                title + description
//! ├── person-info           name field + one toggle per level
//! └── grid
//!     ├── ratings-section   one card per dimension, then the overall card
//!     └── chart-section     radar chart placeholder
//! ```
//!
//! Every class that changes at runtime (`active`, `highlighted`, `rating-N`,
//! the band class) is emitted last in its element's class list, and the
//! `hidden` flag last in its attribute list. Patches append in the same
//! positions, so a patched tree is identical to a freshly generated one.

use crate::markup::{escape, Element};
use crate::style::{self, attrs, classes, ids, RATING_CAPTIONS};
use review_state::{Dimension, EvaluationState, Level, OverallSummary, RoleConfig, MAX_RATING, MIN_RATING};

/// Builds the complete evaluation view.
pub fn generate(config: &RoleConfig, state: &EvaluationState) -> Element {
    Element::new("div")
        .class("container evaluation")
        .attr("data-role", config.key.as_str())
        .child(header(config))
        .child(person_info(config, state))
        .child(
            Element::new("div")
                .class("grid")
                .child(ratings_section(config, state))
                .child(chart_section()),
        )
}

fn header(config: &RoleConfig) -> Element {
    Element::new("div")
        .class("header text-center")
        .child(Element::new("h1").text(config.title.as_str()))
        .child(Element::new("p").class("text-gray-600").text(config.description.as_str()))
}

fn person_info(config: &RoleConfig, state: &EvaluationState) -> Element {
    let info = state.person_info();
    let placeholder = format!("Enter the {}'s name...", config.role_name.to_lowercase());

    let toggles = config
        .levels
        .iter()
        .map(|level| level_toggle(level, &info.level));

    Element::new("div")
        .class("card person-info")
        .child(
            Element::new("h2")
                .class("card-title")
                .text(format!("👤 {} Information", config.role_name)),
        )
        .child(
            Element::new("input")
                .id(ids::PERSON_NAME)
                .class("typeform-input")
                .attr("type", "text")
                .attr("placeholder", placeholder)
                .attr("value", info.name.as_str()),
        )
        .child(
            Element::new("div")
                .class("level-select")
                .child(Element::new("span").class("label-text").text("Evaluation Level"))
                .child(
                    Element::new("div")
                        .id(ids::LEVEL_GROUP)
                        .class("join")
                        .children(toggles),
                ),
        )
}

fn level_toggle(level: &Level, selected: &str) -> Element {
    Element::new("button")
        .class("btn")
        .class(classes::LEVEL_TOGGLE)
        .class(&format!("{}-toggle", level.key))
        .attr("type", "button")
        .attr(attrs::LEVEL, level.key.as_str())
        .class_if(level.key == selected, classes::ACTIVE)
        .child(Element::new("span").class("font-semibold").text(level.name.as_str()))
}

fn ratings_section(config: &RoleConfig, state: &EvaluationState) -> Element {
    Element::new("div")
        .class("ratings-section")
        .children(
            config
                .dimensions
                .iter()
                .map(|dimension| dimension_card(config, dimension, state)),
        )
        .child(overall_card(&state.overall_summary()))
}

fn dimension_card(config: &RoleConfig, dimension: &Dimension, state: &EvaluationState) -> Element {
    let selected_level = state.person_info().level.as_str();
    let value = state.rating(&dimension.key).unwrap_or(MIN_RATING);
    let set = state.is_set(&dimension.key);

    let mut content = Element::new("div").class("collapse-content");
    if !dimension.description.is_empty() {
        content = content.child(
            Element::new("p")
                .class("dimension-description")
                .text(dimension.description.as_str()),
        );
    }

    let level_cards = config
        .levels
        .iter()
        .enumerate()
        .map(|(index, level)| level_card(level, index, dimension, selected_level));

    content = content
        .child(Element::new("div").class("level-cards").children(level_cards))
        .child(rating_selector(&dimension.key, value, set));

    Element::new("div")
        .class("card rating-card")
        .child(
            Element::new("div")
                .class("collapse collapse-arrow")
                .child(Element::new("input").attr("type", "checkbox").class("peer"))
                .child(
                    Element::new("div")
                        .class("collapse-title")
                        .child(rating_badge(&dimension.key, set.then_some(value)))
                        .child(Element::new("span").class("emoji").text(dimension.emoji.as_str()))
                        .child(Element::new("span").class("dimension-name").text(dimension.name.as_str())),
                )
                .child(content),
        )
}

/// Numeric badge of a dimension. Unset dimensions get an empty, hidden badge.
pub(crate) fn rating_badge(dimension: &str, value: Option<u8>) -> Element {
    let badge = Element::new("span")
        .class(classes::SELECTED_RATING)
        .attr(attrs::DIMENSION, dimension);

    match value {
        Some(v) => badge.class(&style::rating_class(v)).text(v.to_string()),
        None => badge.flag_if(true, attrs::HIDDEN),
    }
}

fn level_card(level: &Level, index: usize, dimension: &Dimension, selected: &str) -> Element {
    let color = style::level_color(index);

    Element::new("div")
        .class(classes::LEVEL_CARD)
        .class(&format!("{}-level", level.key))
        .class(&format!("card bg-{color}-50 border-{color}-200"))
        .attr(attrs::LEVEL, level.key.as_str())
        .class_if(level.key == selected, classes::HIGHLIGHTED)
        .child(Element::new("div").class("level-icon").text(style::level_icon(&level.key)))
        .child(
            Element::new("div")
                .child(Element::new("h4").class(&format!("text-{color}-800")).text(level.name.as_str()))
                .child(
                    Element::new("p")
                        .class(&format!("text-{color}-700"))
                        .text(dimension.behavior(&level.key)),
                ),
        )
}

fn rating_selector(dimension: &str, value: u8, set: bool) -> Element {
    let labels = (MIN_RATING..=MAX_RATING).map(|n| {
        let (emoji, caption) = RATING_CAPTIONS[usize::from(n - MIN_RATING)];
        Element::new("div")
            .class(classes::RATING_LABEL)
            .attr(attrs::VALUE, n.to_string())
            .class_if(set && n == value, classes::ACTIVE)
            .text(n.to_string())
            .child(Element::new("br"))
            .text(emoji)
            .child(Element::new("br"))
            .text(caption)
    });

    Element::new("div")
        .class("form-control")
        .class(classes::RATING_SELECTOR)
        .attr(attrs::DIMENSION, dimension)
        .child(
            Element::new("input")
                .class(classes::RANGE)
                .attr("type", "range")
                .attr("min", MIN_RATING.to_string())
                .attr("max", MAX_RATING.to_string())
                .attr("step", "1")
                .attr("value", value.to_string())
                .attr(attrs::DIMENSION, dimension),
        )
        .child(Element::new("div").class("rating-labels").children(labels))
}

fn overall_card(summary: &OverallSummary) -> Element {
    let mut card = Element::new("div").class("card").class(classes::OVERALL_CARD);
    if let Some(band) = summary.band {
        card = card.class(&style::band_class(band));
    }

    card
        .child(Element::new("h3").class("card-title").text("🎯 Overall Rating"))
        .child(
            Element::new("div")
                .class("grid grid-cols-2")
                .child(score_block(ids::OVERALL_RATING, &summary.average_text(), "Average"))
                .child(score_block(ids::TOTAL_SCORE, &summary.sum_text(), "Total")),
        )
        .child(
            Element::new("div")
                .class("actions")
                .child(Element::new("button").class("btn btn-sm").id(ids::RESET_BUTTON).text("🔄 Reset"))
                .child(Element::new("button").class("btn btn-sm").id(ids::EXPORT_BUTTON).text("📤 Export")),
        )
}

fn score_block(id: &str, value: &str, caption: &str) -> Element {
    Element::new("div")
        .class("text-center")
        .child(Element::new("div").class("score").id(id).text(value))
        .child(Element::new("div").class("caption").text(caption))
}

fn chart_section() -> Element {
    Element::new("div")
        .class("chart-section card")
        .child(Element::new("h3").class("card-title").text("📊 Evaluation Chart"))
        .child(
            Element::new("div")
                .class("chart-container")
                .child(Element::new("canvas").id(ids::RADAR_CHART)),
        )
}

/// Wraps rendered markup into a standalone HTML page.
pub fn page(title: &str, body: &Element) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\
         <title>{}</title><style>{}</style></head><body>{}</body></html>",
        escape(title),
        style::STYLESHEET,
        body.to_html()
    )
}
