//! Character operation errors.

use chronicle_domain::{CharacterId, DomainError};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during character operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("Character not found: {0}")]
    NotFound(CharacterId),

    #[error("No character is open")]
    NoCharacterOpen,

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Errors that can occur while importing a character document.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// Not JSON, or missing `name`, `class` or `abilityScores`.
    #[error("Unrecognized character format: {0}")]
    UnrecognizedFormat(String),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
