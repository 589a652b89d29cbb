//! Error types for document parsing and validation.

use thiserror::Error;

/// Errors produced while turning raw JSON into a [`StyleDocument`](crate::StyleDocument).
///
/// Every variant carries the 0-based position of the offending document in
/// the merge input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The document was not a JSON object.
    #[error("style {index} must be an object, got {found}")]
    NotAnObject { index: usize, found: &'static str },

    /// The document did not match the style shape (missing `sources`,
    /// mistyped `layers`, and so on).
    #[error("style {index} is malformed: {reason}")]
    Malformed { index: usize, reason: String },

    /// A layer had an empty `id`.
    #[error("style {index}: layer at position {position} has an empty id")]
    EmptyLayerId { index: usize, position: usize },

    /// Two layers of the same document share an `id`.
    #[error("style {index}: duplicate layer id {id:?}")]
    DuplicateLayerId { index: usize, id: String },

    /// A layer names a source its document does not define.
    #[error("style {index}: layer {layer:?} references unknown source {source_id:?}")]
    UnknownSource {
        index: usize,
        layer: String,
        source_id: String,
    },
}

/// Convenience type alias for document operations.
pub type Result<T> = std::result::Result<T, TypeError>;
