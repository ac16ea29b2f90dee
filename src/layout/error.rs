//! Warnings produced by the layout engine
//!
//! Layout never fails: every problem degrades to "positions left as given"
//! and is reported as a [`LayoutWarning`] next to the resulting nodes.

use thiserror::Error;

/// A recoverable problem encountered while computing a layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutWarning {
    /// No node matched the center-node predicate; input returned unchanged
    #[error("no center node found among {node_count} nodes; positions left unchanged")]
    MissingRoot { node_count: usize },

    /// A retired layout identifier was requested
    #[error("layout '{requested}' is deprecated; using '{fallback}'")]
    DeprecatedLayout {
        requested: String,
        fallback: &'static str,
    },

    /// An unrecognised layout identifier was requested
    #[error("unknown layout '{requested}'; using '{fallback}'")]
    UnknownLayout {
        requested: String,
        fallback: &'static str,
    },
}

impl LayoutWarning {
    /// Create a missing-root warning
    pub fn missing_root(node_count: usize) -> Self {
        Self::MissingRoot { node_count }
    }

    /// Create a deprecated-layout warning
    pub fn deprecated(requested: impl Into<String>, fallback: &'static str) -> Self {
        Self::DeprecatedLayout {
            requested: requested.into(),
            fallback,
        }
    }

    /// Create an unknown-layout warning
    pub fn unknown(requested: impl Into<String>, fallback: &'static str) -> Self {
        Self::UnknownLayout {
            requested: requested.into(),
            fallback,
        }
    }

    /// Whether the engine skipped layout entirely
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingRoot { .. })
    }
}
