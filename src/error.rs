//! Error types for tweaklab.
//!
//! Errors are strongly typed using thiserror. Only constructors and the raw
//! boundary parsers return them; the interactive path (store writes, link
//! restore, text import) never fails and logs instead.

use thiserror::Error;

/// Validation errors raised while building a catalogue or a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Decision '{id}' has an empty domain")]
    EmptyDomain {
        id: String,
    },

    #[error("Default {default} of decision '{id}' is not in its domain")]
    DefaultNotInDomain {
        id: String,
        default: String,
    },

    #[error("Decision '{id}' appears more than once in the catalogue")]
    DuplicateDecision {
        id: String,
    },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

/// Errors raised while decoding exported or shared state.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Link fragment is not valid percent-encoded UTF-8: {message}")]
    Decode {
        message: String,
    },

    #[error("Snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Snapshot must be a JSON object, found {found}")]
    NotAnObject {
        found: &'static str,
    },
}

/// Top-level error type for tweaklab.
#[derive(Debug, Error)]
pub enum LabError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl LabError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a snapshot error.
    #[must_use]
    pub const fn is_snapshot(&self) -> bool {
        matches!(self, Self::Snapshot(_))
    }
}

/// Result type alias for tweaklab operations.
pub type LabResult<T> = Result<T, LabError>;
