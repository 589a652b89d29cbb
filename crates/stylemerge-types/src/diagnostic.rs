//! Merge diagnostics.
//!
//! A merge never aborts on a conflict. It records a [`Diagnostic`] tagged with
//! the index of the document that caused it and keeps going. Findings that do
//! not belong to any document carry `index: None`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How serious a diagnostic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The merged style is likely wrong (version mismatch, glyph conflict).
    Error,
    /// The merge had to pick or rename something.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single finding, serialized as `{"index": …, "message": …}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Position of the originating document, or `None` for input-wide issues.
    pub index: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// A diagnostic attributed to the document at `index`.
    pub fn at(index: usize, message: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            message: message.into(),
        }
    }

    /// A diagnostic not attributed to any document.
    pub fn global(message: impl Into<String>) -> Self {
        Self {
            index: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "[style {index}] {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Ordered error and warning lists collected over one merge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic under the given severity.
    pub fn push(&mut self, severity: Severity, diagnostic: Diagnostic) {
        match severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    /// Errors recorded so far.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Warnings recorded so far.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Split into `(errors, warnings)`, mapping an empty list to `None`.
    pub fn into_parts(self) -> (Option<Vec<Diagnostic>>, Option<Vec<Diagnostic>>) {
        (non_empty(self.errors), non_empty(self.warnings))
    }
}

fn non_empty(list: Vec<Diagnostic>) -> Option<Vec<Diagnostic>> {
    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}
