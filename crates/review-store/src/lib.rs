//! # Radar Review Store
//!
//! Persistence adapter for evaluation sessions. The engine treats storage as
//! an external string key/value store; this crate supplies that contract,
//! two backends, and the namespaced evaluation layout on top.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │       EvaluationStore        │  load / save / clear per role key
//! └──────────────┬───────────────┘
//!                │ KeyValueStore
//!        ┌───────┴────────┐
//!        ▼                ▼
//!  ┌───────────┐   ┌─────────────┐
//!  │ SledStore │   │ MemoryStore │
//!  └───────────┘   └─────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use review_state::{EvaluationState, RoleConfig};
//! use review_store::{EvaluationStore, SledStore};
//!
//! let config = RoleConfig::builtin("software_engineer").unwrap();
//! let mut store = EvaluationStore::new(SledStore::open("./review_store.db").unwrap());
//!
//! let state = EvaluationState::restore(&config, store.load(&config.key));
//! store.save(&config.key, &state.to_persisted()).unwrap();
//! ```
//!
//! ## Notes
//!
//! - Loading never fails; damaged blobs fall back to defaults per structure
//! - Namespaces are independent: clearing one role leaves others intact

mod error;
mod persistence;
mod storage;

pub use error::{Result, StoreError};
pub use persistence::{EvaluationStore, StorageKeys};
pub use storage::{KeyValueStore, MemoryStore, SledStore};
