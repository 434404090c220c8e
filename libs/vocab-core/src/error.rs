//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while reading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing '=' separator at line {line}")]
    MissingSeparator { line: usize },

    #[error("empty term at line {line}")]
    EmptyTerm { line: usize },

    #[error("duplicate word id {id}")]
    DuplicateId { id: String },
}

/// Errors from validating user settings.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("mastery threshold must be at least 1, got {0}")]
    MasteryThreshold(u32),

    #[error("{name} must be in (0, 1], got {value}")]
    SimilarityThreshold { name: &'static str, value: f64 },

    #[error("words per session must be at least 1")]
    SessionSize,
}
