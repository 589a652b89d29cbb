//! Merge engine for map style documents.
//!
//! Folds an ordered list of styles into one: sources are deduplicated or
//! renamed on collision, layers are appended in order with ids and group
//! references rewired, and every conflict is reported as an index-tagged
//! [`Diagnostic`] instead of aborting the merge.
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use stylemerge::StyleMerger;
//!
//! let styles = json!([
//!     {"version": 8, "name": "A", "sources": {}, "layers": [{"id": "bg"}]},
//!     {"version": 8, "name": "B", "sources": {}, "layers": [{"id": "bg"}]}
//! ]);
//! let result = StyleMerger::default().merge_values(&styles).unwrap();
//! assert!(result.errors.is_none());
//! assert_eq!(result.style.name.as_deref(), Some("A + B"));
//! assert_eq!(result.style.layers[1].id, "bg1");
//! ```

pub mod config;
pub mod equality;
pub mod error;
pub mod keys;
pub mod merger;

pub use config::MergeConfig;
pub use equality::{deep_equal, shallow_equal};
pub use error::{MergeError, Result};
pub use keys::next_new_key;
pub use merger::{merge, MergeResult, StyleMerger};

pub use stylemerge_types::{Diagnostic, Layer, Metadata, Severity, StyleDocument, Visibility};
