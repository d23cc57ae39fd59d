//! Error types for the Journalscout plugin.
//!
//! This module defines the centralized error type [`ScoutError`] and a type alias
//! [`Result`] used throughout the crate. Search failures, clipboard failures, and
//! configuration problems all flow through the same enum so callers can match on
//! the failure class without string inspection.

use thiserror::Error;

/// The main error type for Journalscout operations.
///
/// Only `Config` is ever surfaced as a startup failure. Every other variant is
/// scoped to a single search attempt or export and is converted into state
/// (empty results, a status message) at the boundary that observes it.
///
/// # Examples
///
/// ```
/// use journalscout::ScoutError;
///
/// let err = ScoutError::Transport { status: 502, body: "bad gateway".into() };
/// assert!(err.is_search_failure());
/// ```
#[derive(Debug, Error)]
pub enum ScoutError {
    /// The search service answered with a non-success HTTP status.
    #[error("Search failed with HTTP {status}: {body}")]
    Transport {
        /// HTTP status code returned by the service.
        status: u16,
        /// Response body text, kept for diagnostics.
        body: String,
    },

    /// The response envelope was not `{ success: true, data: [...] }`.
    #[error("Invalid response format: {0}")]
    Protocol(String),

    /// Copying export text to the clipboard failed.
    ///
    /// Logged and answered with the fallback copy mechanism; never shown as a
    /// blocking error.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Configuration is invalid or a required value is missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScoutError {
    /// Returns `true` for the two failure classes that end a search attempt.
    #[must_use]
    pub const fn is_search_failure(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Protocol(_))
    }
}

/// A specialized `Result` type for Journalscout operations.
pub type Result<T> = std::result::Result<T, ScoutError>;
