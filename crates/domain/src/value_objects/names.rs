//! Character name newtype.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Limit in chars, not bytes.
pub const MAX_CHARACTER_NAME_CHARS: usize = 200;

/// A trimmed, non-blank character name of at most
/// [`MAX_CHARACTER_NAME_CHARS`] characters.
///
/// Deserialization goes through [`CharacterName::new`], so a stored document
/// with a blank name fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterName(String);

impl CharacterName {
    /// # Errors
    ///
    /// `DomainError::Validation` when the trimmed name is blank or too long.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let raw = name.into();
        let name = raw.trim();
        match name.chars().count() {
            0 => Err(DomainError::validation("Character name cannot be empty")),
            n if n > MAX_CHARACTER_NAME_CHARS => Err(DomainError::validation(format!(
                "Character name cannot exceed {MAX_CHARACTER_NAME_CHARS} characters"
            ))),
            _ => Ok(Self(name.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CharacterName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CharacterName {
    type Error = DomainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<CharacterName> for String {
    fn from(name: CharacterName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_name_is_trimmed() {
        let name = CharacterName::new("  Kaiden Arvek  ").unwrap();
        assert_eq!(name.as_str(), "Kaiden Arvek");
    }

    #[test]
    fn empty_name_rejected() {
        assert!(CharacterName::new("").is_err());
        assert!(CharacterName::new("   ").is_err());
    }

    #[test]
    fn too_long_name_rejected() {
        let long = "a".repeat(201);
        let result = CharacterName::new(long);
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(CharacterName::new("a".repeat(200)).is_ok());
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        assert!(CharacterName::new("é".repeat(200)).is_ok());
    }

    #[test]
    fn deserialize_validates() {
        let ok: CharacterName = serde_json::from_str("\"Mira\"").unwrap();
        assert_eq!(ok.as_str(), "Mira");
        assert!(serde_json::from_str::<CharacterName>("\"  \"").is_err());
    }
}
