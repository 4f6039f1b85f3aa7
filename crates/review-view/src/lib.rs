//! # Radar Review View
//!
//! Declarative presentation of an evaluation: a pure generator from
//! configuration and state to a markup tree, incremental patches, and render
//! surfaces that hold the mounted tree.
//!
//! ## Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`generate`] | Builds the full view from `(RoleConfig, EvaluationState)` |
//! | [`patches_for`] | Derives [`ViewPatch`]es for one kind of [`Change`] |
//! | [`Surface`] | Mount point and patch target |
//! | [`Document`] | In-memory [`Surface`] with HTML serialization |
//!
//! ## Quick Start
//!
//! ```rust
//! use review_state::{EvaluationState, RoleConfig};
//! use review_view::{generate, patches_for, Change, Document, Surface};
//!
//! let config = RoleConfig::builtin("software_engineer")?;
//! let mut state = EvaluationState::new(&config);
//!
//! let mut doc = Document::with_mount_point("app");
//! doc.mount("app", generate(&config, &state))?;
//!
//! let _ = state.set_rating("impact", 5);
//! for patch in patches_for(&config, &state, &Change::Rating("impact".into())) {
//!     doc.apply(&patch);
//! }
//!
//! assert_eq!(doc.mounted(), Some(&generate(&config, &state)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Notes
//!
//! - Generation never reads anything but its two arguments
//! - Unset dimensions render a hidden badge even though their value is 1
//! - Unknown level keys highlight no level card

mod document;
mod error;
mod generator;
mod markup;
mod patch;
pub mod style;

pub use document::{Document, Surface};
pub use error::{Result, ViewError};
pub use generator::{generate, page};
pub use markup::{escape, Element, Node};
pub use patch::{apply, patches_for, Change, ViewPatch};
