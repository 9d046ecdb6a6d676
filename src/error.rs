//! Error types for extractor configuration
//!
//! Extraction itself is best-effort and never fails: malformed markup,
//! dangling `itemref` targets, and missing attributes all degrade to empty
//! or absent values. The only fallible operation is building an
//! [`Extractor`](crate::Extractor) with a limiter that does not form a
//! valid CSS selector.

/// Errors that can occur while configuring an extractor
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The limiter fragments did not compose into a parseable CSS selector
    ///
    /// The composed selector (limiter fragments joined and suffixed with
    /// `[itemscope]`) is included to help locate the offending fragment.
    #[error("Failed to parse selector '{selector}': {error}")]
    InvalidSelector { selector: String, error: String },
}
