//! Character document import and export.

use std::sync::Arc;

use chronicle_domain::{Character, CharacterId, UserId};

use crate::infrastructure::ports::{CharacterRecord, CharacterRepo, ClockPort};

use super::{CharacterError, ImportError};

/// Parse a standalone character document.
///
/// The stored level is recomputed from experience points and a missing id
/// is generated. Anything that is not a complete document is rejected.
pub fn parse_character_document(json: &str) -> Result<Character, ImportError> {
    serde_json::from_str(json).map_err(|e| ImportError::UnrecognizedFormat(e.to_string()))
}

/// Ingests a document as a new character owned by the importing user.
pub struct ImportCharacter {
    repo: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl ImportCharacter {
    pub fn new(repo: Arc<dyn CharacterRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { repo, clock }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        json: &str,
    ) -> Result<CharacterRecord, ImportError> {
        let mut character = parse_character_document(json)?;
        let source_id = character.id();
        character.assign_id(CharacterId::new());

        let record = CharacterRecord::new(user_id, character, self.clock.now());
        self.repo.insert(&record).await?;

        tracing::info!(
            character_id = %record.id(),
            source_id = %source_id,
            user_id = %user_id,
            "Imported character"
        );
        Ok(record)
    }
}

pub struct ExportCharacter {
    repo: Arc<dyn CharacterRepo>,
}

impl ExportCharacter {
    pub fn new(repo: Arc<dyn CharacterRepo>) -> Self {
        Self { repo }
    }

    /// Pretty-printed JSON document of a stored character.
    pub async fn execute(&self, id: CharacterId) -> Result<String, CharacterError> {
        let record = self
            .repo
            .get(id)
            .await?
            .ok_or(CharacterError::NotFound(id))?;
        Self::to_document(&record.character)
    }

    pub fn to_document(character: &Character) -> Result<String, CharacterError> {
        serde_json::to_string_pretty(character).map_err(|e| CharacterError::Export(e.to_string()))
    }
}
