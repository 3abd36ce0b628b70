//! Cross-reference identifiers and tag validation

use serde::{Deserialize, Serialize};

use crate::errors::{GedcomError, Result};

/// A cross-reference identifier, stored without the surrounding `@`
///
/// Identifiers are non-empty and contain neither `@`, whitespace nor control
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Xref(String);

impl Xref {
    /// Validate and wrap an identifier
    ///
    /// # Errors
    ///
    /// Returns `InvalidXref` if the identifier is empty or contains `@`,
    /// whitespace or control characters.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty()
            || id
                .chars()
                .any(|c| c == '@' || c.is_whitespace() || c.is_control())
        {
            return Err(GedcomError::InvalidXref { xref: id });
        }
        Ok(Self(id))
    }

    /// Build an identifier from a type prefix and a counter value
    ///
    /// # Errors
    ///
    /// Returns `InvalidXref` if the prefix contains reserved characters.
    pub fn generated(prefix: &str, counter: u64) -> Result<Self> {
        Self::new(format!("{prefix}{counter}"))
    }

    /// Get the bare identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render as a pointer value (`@ID@`)
    pub fn pointer(&self) -> String {
        format!("@{}@", self.0)
    }

    /// Parse a pointer value (`@ID@`)
    ///
    /// Returns `None` when the text is not bracketed or the identifier is
    /// invalid.
    pub fn from_pointer(text: &str) -> Option<Self> {
        let inner = text.strip_prefix('@')?.strip_suffix('@')?;
        Self::new(inner).ok()
    }
}

impl std::fmt::Display for Xref {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Xref {
    type Error = GedcomError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Xref> for String {
    fn from(xref: Xref) -> Self {
        xref.0
    }
}

/// Check that a tag can be written as a single token
///
/// # Errors
///
/// Returns `InvalidTag` if the tag is empty or contains anything other than
/// ASCII alphanumerics and `_`.
pub fn validate_tag(tag: &str) -> Result<()> {
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(GedcomError::InvalidTag {
            tag: tag.to_string(),
        });
    }
    Ok(())
}
