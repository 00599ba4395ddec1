//! Error types for similarity ranking.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use thiserror::Error;

/// Errors surfaced by the ranking engine.
///
/// Degenerate similarity (empty tag sets, zero vectors) is not an error and
/// scores `0.0`; only invalid input lands here.
#[derive(Error, Debug)]
pub enum SimilarError {
    /// A required field is missing or has the wrong shape
    #[error("Malformed input in `{field}`: {reason}")]
    MalformedInput {
        /// Field or record the problem was found in
        field: String,
        /// What was wrong with it
        reason: String,
    },

    /// Two records share an identifier where identifiers must be unique
    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    /// A vector space model was requested over zero documents
    #[error("Cannot fit a vector space model on an empty corpus")]
    EmptyCorpus,

    /// A query referenced an identifier not present in the catalog or pool
    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// YAML configuration could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SimilarError {
    /// Shorthand for [`SimilarError::MalformedInput`].
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Prefix a malformed field with the row it came from.
    pub(crate) fn at_row(self, row: usize) -> Self {
        match self {
            Self::MalformedInput { field, reason } => Self::MalformedInput {
                field: format!("row {row}: {field}"),
                reason,
            },
            other => other,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimilarError>;
