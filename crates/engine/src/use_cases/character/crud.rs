//! Create, list, load and delete character records.

use std::sync::Arc;

use chronicle_domain::{Character, CharacterId, CharacterName, UserId};

use crate::infrastructure::autosave::AutosaveScheduler;
use crate::infrastructure::ports::{CharacterRecord, CharacterRepo, ClockPort};

use super::CharacterError;

/// Creates a character with the default baseline values.
pub struct CreateCharacter {
    repo: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CreateCharacter {
    pub fn new(repo: Arc<dyn CharacterRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { repo, clock }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        name: &str,
    ) -> Result<CharacterRecord, CharacterError> {
        let name = CharacterName::new(name)?;
        let record = CharacterRecord::new(user_id, Character::new(name), self.clock.now());
        self.repo.insert(&record).await?;

        tracing::info!(
            character_id = %record.id(),
            user_id = %user_id,
            "Created character"
        );
        Ok(record)
    }
}

pub struct ListCharacters {
    repo: Arc<dyn CharacterRepo>,
}

impl ListCharacters {
    pub fn new(repo: Arc<dyn CharacterRepo>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<Vec<CharacterRecord>, CharacterError> {
        Ok(self.repo.list_for_user(user_id).await?)
    }
}

pub struct LoadCharacter {
    repo: Arc<dyn CharacterRepo>,
}

impl LoadCharacter {
    pub fn new(repo: Arc<dyn CharacterRepo>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: CharacterId) -> Result<CharacterRecord, CharacterError> {
        self.repo
            .get(id)
            .await?
            .ok_or(CharacterError::NotFound(id))
    }
}

/// Deletes a character after dropping any pending autosave for it, so a
/// late write cannot bring the record back.
pub struct DeleteCharacter {
    repo: Arc<dyn CharacterRepo>,
    autosave: Arc<AutosaveScheduler>,
}

impl DeleteCharacter {
    pub fn new(repo: Arc<dyn CharacterRepo>, autosave: Arc<AutosaveScheduler>) -> Self {
        Self { repo, autosave }
    }

    pub async fn execute(&self, id: CharacterId) -> Result<(), CharacterError> {
        let cancelled = self.autosave.cancel(id).await;
        self.repo.delete(id).await?;

        tracing::info!(
            character_id = %id,
            cancelled_autosave = cancelled,
            "Deleted character"
        );
        Ok(())
    }
}
