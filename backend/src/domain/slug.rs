//! URL slugs derived from catalogue names.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens. Non-ASCII input is transliterated first, so
//! `"Смартфоны"` becomes `"smartfony"`.

use std::fmt;

use super::CatalogName;

/// Return `true` when `value` is a well-formed slug.
pub fn is_valid_slug(value: &str) -> bool {
    is_trimmed_non_empty(value) && has_allowed_slug_chars(value)
}

fn is_trimmed_non_empty(value: &str) -> bool {
    !value.is_empty() && value.trim() == value
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Errors raised when a slug cannot be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    /// The name has no letters or digits left after transliteration.
    #[error("name must contain at least one letter or digit")]
    Empty,
}

/// Unique secondary key derived from a name.
///
/// Slugs have no length cap of their own: transliteration can stretch a
/// [`NAME_MAX`](super::NAME_MAX) character name to several times its length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Derive the slug for `name`.
    ///
    /// Derivation is deterministic: the same name always yields the same slug.
    ///
    /// # Examples
    /// ```
    /// use catalog::domain::{CatalogName, Slug};
    ///
    /// let name = CatalogName::new("Smart Phones").expect("valid name");
    /// let slug = Slug::from_name(&name).expect("slug");
    /// assert_eq!(slug.as_ref(), "smart-phones");
    /// ```
    pub fn from_name(name: &CatalogName) -> Result<Self, SlugError> {
        let value = slug::slugify(name.as_ref());
        if !is_valid_slug(&value) {
            return Err(SlugError::Empty);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}
