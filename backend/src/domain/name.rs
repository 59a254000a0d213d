//! Display names shared by categories and products.
//!
//! The predicates are plain functions so the create and update paths of both
//! entity kinds apply exactly the same rules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum allowed length for a catalogue name, in characters.
pub const NAME_MIN: usize = 2;
/// Maximum allowed length for a catalogue name, in characters.
pub const NAME_MAX: usize = 100;
/// Characters a catalogue name must not contain.
pub const FORBIDDEN_NAME_CHARS: [char; 10] = ['!', '@', '#', '$', '%', '^', '&', '*', '(', ')'];

/// Validation errors returned by [`CatalogName::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameValidationError {
    #[error("name must be at least {min} characters")]
    TooShort { min: usize },
    #[error("name must be at most {max} characters")]
    TooLong { max: usize },
    #[error("name must not contain special characters")]
    ForbiddenCharacters,
}

impl NameValidationError {
    /// Stable code surfaced in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TooShort { .. } => "name_too_short",
            Self::TooLong { .. } => "name_too_long",
            Self::ForbiddenCharacters => "name_forbidden_characters",
        }
    }
}

/// Return `true` when `value` has between [`NAME_MIN`] and [`NAME_MAX`]
/// characters.
pub fn has_valid_length(value: &str) -> bool {
    (NAME_MIN..=NAME_MAX).contains(&value.chars().count())
}

/// Return `true` when `value` contains any of [`FORBIDDEN_NAME_CHARS`].
pub fn contains_forbidden_characters(value: &str) -> bool {
    value.chars().any(|ch| FORBIDDEN_NAME_CHARS.contains(&ch))
}

/// Validated category or product name.
///
/// # Examples
/// ```
/// use catalog::domain::CatalogName;
///
/// let name = CatalogName::new("Electronics").expect("valid name");
/// assert_eq!(name.as_ref(), "Electronics");
/// assert!(CatalogName::new("Sale!").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CatalogName(String);

impl CatalogName {
    /// Validate and construct a name.
    pub fn new(value: impl Into<String>) -> Result<Self, NameValidationError> {
        Self::from_owned(value.into())
    }

    fn from_owned(value: String) -> Result<Self, NameValidationError> {
        if !has_valid_length(&value) {
            return Err(if value.chars().count() < NAME_MIN {
                NameValidationError::TooShort { min: NAME_MIN }
            } else {
                NameValidationError::TooLong { max: NAME_MAX }
            });
        }
        if contains_forbidden_characters(&value) {
            return Err(NameValidationError::ForbiddenCharacters);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for CatalogName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CatalogName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CatalogName> for String {
    fn from(value: CatalogName) -> Self {
        value.0
    }
}

impl TryFrom<String> for CatalogName {
    type Error = NameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}
