//! Presentation constants shared by the generator and the patcher.

use review_state::Band;

/// Element ids.
pub mod ids {
    pub const PERSON_NAME: &str = "personName";
    pub const LEVEL_GROUP: &str = "levelButtonGroup";
    pub const OVERALL_RATING: &str = "overallRating";
    pub const TOTAL_SCORE: &str = "totalScore";
    pub const RESET_BUTTON: &str = "resetBtn";
    pub const EXPORT_BUTTON: &str = "exportBtn";
    pub const RADAR_CHART: &str = "radarChart";
}

/// Class names toggled at runtime.
pub mod classes {
    pub const ACTIVE: &str = "active";
    pub const HIGHLIGHTED: &str = "highlighted";
    pub const LEVEL_TOGGLE: &str = "level-toggle";
    pub const LEVEL_CARD: &str = "level-card";
    pub const SELECTED_RATING: &str = "selected-rating";
    pub const RATING_SELECTOR: &str = "rating-selector";
    pub const RATING_LABEL: &str = "rating-label";
    pub const RANGE: &str = "range";
    pub const OVERALL_CARD: &str = "overall-rating-card";
}

/// Attribute names used to address elements.
pub mod attrs {
    pub const DIMENSION: &str = "data-dimension";
    pub const LEVEL: &str = "data-level";
    pub const VALUE: &str = "data-value";
    pub const HIDDEN: &str = "hidden";
}

/// Level colours cycle in this order by level index.
const LEVEL_COLORS: [&str; 3] = ["green", "blue", "purple"];

/// Colour name of the level at `index`.
pub fn level_color(index: usize) -> &'static str {
    LEVEL_COLORS[index % LEVEL_COLORS.len()]
}

/// Icon shown on a level card.
pub fn level_icon(level_key: &str) -> &'static str {
    match level_key {
        "junior" => "🌱",
        "mid" => "🚀",
        "senior" => "⭐",
        _ => "📊",
    }
}

/// Emoji and caption of each rating value, index 0 is rating 1.
pub const RATING_CAPTIONS: [(&str, &str); 5] = [
    ("😰", "Below Expectations"),
    ("😐", "Slightly Below"),
    ("😊", "Meets Expectations"),
    ("🌟", "Often Exceeds"),
    ("🚀", "Greatly Exceeds"),
];

/// Badge class for a rating value.
pub fn rating_class(value: u8) -> String {
    format!("rating-{value}")
}

/// Overall card class for a band.
pub fn band_class(band: Band) -> String {
    format!("rating-{band}")
}

/// Stylesheet embedded in standalone pages.
pub const STYLESHEET: &str = "\
body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Ubuntu,Arial,sans-serif;margin:24px;color:#1f2937}\
.card{border-radius:.75rem;box-shadow:0 4px 12px rgba(0,0,0,.08);padding:1rem;margin-bottom:1rem}\
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(320px,1fr));gap:1rem}\
.rating-labels{display:grid;grid-template-columns:repeat(5,1fr);gap:.5rem;margin-top:.5rem}\
.rating-label{text-align:center;font-size:.75rem;padding:.25rem;border-radius:.25rem;background:rgba(0,0,0,.05);cursor:pointer}\
.rating-label.active{background:rgba(147,51,234,.2);color:rgb(147,51,234);font-weight:600}\
.level-card{opacity:.6;transition:all .3s ease}\
.level-card.highlighted{opacity:1;transform:scale(1.02)}\
.level-toggle.active{color:#fff;background:rgb(147,51,234)}\
.selected-rating{display:inline-flex;align-items:center;justify-content:center;width:2rem;height:2rem;border-radius:50%;color:#fff;font-weight:bold}\
.selected-rating[hidden]{display:none}\
.selected-rating.rating-1,.overall-rating-card.rating-red{background:rgb(239,68,68)}\
.selected-rating.rating-2,.overall-rating-card.rating-orange{background:rgb(249,115,22)}\
.selected-rating.rating-3,.overall-rating-card.rating-green{background:rgb(34,197,94)}\
.selected-rating.rating-4,.overall-rating-card.rating-blue{background:rgb(59,130,246)}\
.selected-rating.rating-5,.overall-rating-card.rating-purple{background:rgb(147,51,234)}\
.overall-rating-card{color:#fff;background:linear-gradient(135deg,rgb(147,51,234),rgb(59,130,246))}\
.typeform-input{border:none;border-bottom:3px solid #e5e7eb;font-size:2rem;font-weight:700;width:100%}\
";
