//! List-response normalization.
//!
//! The backend returns collections either as a bare JSON array or wrapped
//! in the paginated envelope `{"count": ..., "results": [...]}` depending
//! on the view. Both shapes collapse to the inner items at the boundary so
//! store code never probes response shapes dynamically.

use serde::Deserialize;

/// A list response in either of the two shapes the backend produces.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// Paginated envelope.
    Paginated {
        /// Total item count across pages.
        count: i64,
        /// Next-page URL, if any.
        #[serde(default)]
        next: Option<String>,
        /// Previous-page URL, if any.
        #[serde(default)]
        previous: Option<String>,
        /// Items on this page.
        results: Vec<T>,
    },
    /// Bare array.
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Unwrap to the inner items, discarding pagination metadata.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Paginated { results, .. } => results,
            Self::Plain(items) => items,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
