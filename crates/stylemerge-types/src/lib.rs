//! Foundation types for StyleMerge.
//!
//! This crate provides the document model shared by the merge engine: style
//! documents, their layers and metadata, and the diagnostics a merge reports.
//! Parsing from raw JSON goes through [`StyleDocument::from_json`], which
//! validates the structure a merge relies on.
//!
//! # Key Types
//!
//! - [`StyleDocument`] — A parsed style: sources, layers, sprite, glyphs, metadata
//! - [`Layer`] — A single rendering rule referencing at most one source
//! - [`Metadata`] / [`MetadataEntry`] — Document metadata with the `mapbox:groups` key split out
//! - [`Visibility`] — Public or private styles
//! - [`Diagnostic`] / [`Diagnostics`] / [`Severity`] — Index-tagged merge findings

pub mod diagnostic;
pub mod document;
pub mod error;
pub mod layer;
pub mod metadata;
pub mod reference;

pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use document::{StyleDocument, Visibility, PROVENANCE_FIELDS, TYPED_FIELDS};
pub use error::{Result, TypeError};
pub use layer::Layer;
pub use metadata::{Metadata, MetadataEntry, GROUPS_KEY, GROUP_KEY};
pub use reference::LATEST_VERSION;
