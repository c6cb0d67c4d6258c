//! Error taxonomy for extraction phases.
//!
//! Only [`ExtractionError::Write`] is allowed to fail a phase. Every other
//! kind is recovered where it happens: the site logs a warning and the
//! offending symbol, command, or domain contributes nothing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// A symbol or category has no matching corpus file
    #[error("No corpus file found for {0}")]
    NotFound(String),

    /// Text could not be read, or an artifact is not valid JSON
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// A single declaration or parameter does not fit the expected shape
    #[error("Unrecognized {what}: {text}")]
    PatternMismatch { what: &'static str, text: String },

    /// The optional semantic-search collaborator is missing or erroring
    #[error("Search collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    /// An artifact could not be persisted
    #[error("Failed to write artifact {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractionError {
    /// Short taxonomy label used in logs and run summaries
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionError::NotFound(_) => "not_found",
            ExtractionError::Decode { .. } => "decode_failure",
            ExtractionError::PatternMismatch { .. } => "pattern_mismatch",
            ExtractionError::CollaboratorUnavailable(_) => "collaborator_unavailable",
            ExtractionError::Write { .. } => "write_failure",
            ExtractionError::Io(_) | ExtractionError::Json(_) => "write_failure",
        }
    }

    /// Whether the error must surface as a phase failure
    pub fn is_fatal_for_phase(&self) -> bool {
        matches!(
            self,
            ExtractionError::Write { .. } | ExtractionError::Io(_) | ExtractionError::Json(_)
        )
    }
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;
