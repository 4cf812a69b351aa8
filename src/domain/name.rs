//! Display name for projects, categories, templates, and column headers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest name accepted, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// A validated, trimmed display name.
///
/// # Validation Rules
/// - Non-empty after trimming
/// - At most [`MAX_NAME_LEN`] characters
/// - No control characters (names are shown on a single line)
///
/// # Examples
///
/// ```
/// use tabula::domain::Name;
///
/// let name = Name::new("  Budget 2024 ").unwrap();
/// assert_eq!(name.as_str(), "Budget 2024");
/// assert!(Name::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

/// Error returned when a name fails validation.
#[derive(Debug, Clone)]
pub struct ParseNameError(String);

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseNameError {}

impl Name {
    /// Creates a new Name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ParseNameError` if the name is empty after trimming, too long,
    /// or contains control characters.
    pub fn new(s: &str) -> Result<Self, ParseNameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ParseNameError("name cannot be empty".to_string()));
        }

        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(ParseNameError(format!(
                "name is too long: at most {} characters allowed",
                MAX_NAME_LEN
            )));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(ParseNameError(
                "name cannot contain control characters".to_string(),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the name, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Name {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}
