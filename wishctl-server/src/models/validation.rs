//! Validation error types

use std::fmt;

/// Validation error for caller-supplied input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Request body could not be decoded (missing field, wrong type, bad JSON)
    Malformed { detail: String },

    /// Path id is not an integer
    InvalidId { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::Malformed { detail } => write!(f, "malformed request body: {}", detail),
            Self::InvalidId { value } => {
                write!(f, "wish id must be an integer, got '{}'", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
