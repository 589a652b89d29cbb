//! Error types for the merge crate.

use stylemerge_types::TypeError;

/// Failures that stop a merge before any document is folded.
///
/// Conflicts between well-formed documents are not errors of this kind; they
/// are reported as diagnostics on the [`MergeResult`](crate::MergeResult).
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The merge input was not a JSON array.
    #[error("styles must be an array, got {found}")]
    NotAnArray { found: &'static str },

    /// One of the input documents failed parsing or validation.
    #[error(transparent)]
    Document(#[from] TypeError),

    /// The merge configuration could not be loaded.
    #[error("invalid merge configuration: {0}")]
    Config(String),
}

/// Convenience alias for merge results.
pub type Result<T> = std::result::Result<T, MergeError>;
