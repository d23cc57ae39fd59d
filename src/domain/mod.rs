//! Domain layer for the Journalscout plugin.
//!
//! Core types that do not depend on Zellij, the search service, or the
//! rendering layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`journal`]: Journal record and its compound identity key

pub mod error;
pub mod journal;

pub use error::{Result, ScoutError};
pub use journal::{Journal, JournalKey};
