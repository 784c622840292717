use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A search query field is missing or outside its allowed range.
    InvalidQuery { field: &'static str, reason: String },
    /// A recommendation record violates one of its field invariants.
    InvalidRecord {
        location: String,
        field: &'static str,
        reason: String,
    },
}

impl ModelError {
    pub(crate) fn query(field: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidQuery {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ModelError::InvalidQuery { field, .. }
            | ModelError::InvalidRecord { field, .. } => field,
        }
    }
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidQuery { field, reason } => {
                write!(f, "invalid search query: {field} {reason}")
            }
            ModelError::InvalidRecord {
                location,
                field,
                reason,
            } => write!(f, "invalid record for {location}: {field} {reason}"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
