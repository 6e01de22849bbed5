//! Table / collection name validation
//!
//! The relational table name is interpolated into SQL text, so it is
//! restricted to a plain identifier.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for table and collection names (PostgreSQL NAMEDATALEN - 1)
const MAX_STORAGE_NAME_LEN: usize = 63;

static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("invalid identifier regex"));

/// Validated table or collection name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageName(String);

impl StorageName {
    /// Create a new storage name.
    ///
    /// # Rules
    /// - 1 to 63 characters
    /// - ASCII letters, digits and underscores
    /// - Must not start with a digit
    ///
    /// # Example
    /// ```
    /// use listapi_server::models::StorageName;
    ///
    /// assert!(StorageName::new("lists").is_ok());
    /// assert!(StorageName::new("lists; DROP TABLE lists").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::MissingField { field: "storage name" });
        }

        if s.len() > MAX_STORAGE_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "storage name",
                max: MAX_STORAGE_NAME_LEN,
            });
        }

        if !IDENT_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "storage name",
                reason: "must be letters, digits or underscores, not starting with a digit",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StorageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StorageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for StorageName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
