//! Validation error types

use std::fmt;

/// Validation error for request bodies and configured names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Request body is not well-formed JSON
    InvalidJson,

    /// Required field is absent or not a string
    MissingField { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson => write!(f, "Invalid JSON"),
            Self::MissingField { field } => write!(f, "Missing '{}' field", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}
