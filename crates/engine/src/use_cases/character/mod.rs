//! Character use cases.
//!
//! Record lifecycle (create, list, load, delete) and document transfer
//! (import, export). Field edits go through [`crate::stores::CharacterSession`].

use std::sync::Arc;

mod crud;
mod error;
mod transfer;

pub use crud::{CreateCharacter, DeleteCharacter, ListCharacters, LoadCharacter};
pub use error::{CharacterError, ImportError};
pub use transfer::{parse_character_document, ExportCharacter, ImportCharacter};

/// Container for character use cases.
pub struct CharacterUseCases {
    pub create: Arc<CreateCharacter>,
    pub list: Arc<ListCharacters>,
    pub load: Arc<LoadCharacter>,
    pub delete: Arc<DeleteCharacter>,
    pub import: Arc<ImportCharacter>,
    pub export: Arc<ExportCharacter>,
}
