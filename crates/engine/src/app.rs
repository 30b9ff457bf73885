//! Application state and composition.

use std::sync::Arc;

use chronicle_domain::{CharacterId, Dnd5eSystem, GameSystem};

use crate::infrastructure::{
    autosave::AutosaveScheduler,
    config::EngineConfig,
    ports::{CharacterRepo, ClockPort},
};
use crate::stores::{CharacterSession, Notifications};
use crate::use_cases;
use crate::use_cases::character::CharacterError;

/// Main application state.
///
/// Holds the repository, use cases and the shared autosave scheduler that
/// every session writes through.
pub struct App {
    pub config: EngineConfig,
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub autosave: Arc<AutosaveScheduler>,
    pub notifications: Notifications,
    pub system: Arc<dyn GameSystem>,
    clock: Arc<dyn ClockPort>,
}

/// Container for all repository ports.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub character: use_cases::CharacterUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        config: EngineConfig,
        character_repo: Arc<dyn CharacterRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let notifications = Notifications::new();
        let autosave = Arc::new(AutosaveScheduler::new(
            character_repo.clone(),
            notifications.clone(),
            config.autosave_delay,
        ));

        let character = use_cases::CharacterUseCases {
            create: Arc::new(use_cases::character::CreateCharacter::new(
                character_repo.clone(),
                clock.clone(),
            )),
            list: Arc::new(use_cases::character::ListCharacters::new(
                character_repo.clone(),
            )),
            load: Arc::new(use_cases::character::LoadCharacter::new(
                character_repo.clone(),
            )),
            delete: Arc::new(use_cases::character::DeleteCharacter::new(
                character_repo.clone(),
                autosave.clone(),
            )),
            import: Arc::new(use_cases::character::ImportCharacter::new(
                character_repo.clone(),
                clock.clone(),
            )),
            export: Arc::new(use_cases::character::ExportCharacter::new(
                character_repo.clone(),
            )),
        };

        Self {
            config,
            repositories: Repositories {
                character: character_repo,
            },
            use_cases: UseCases { character },
            autosave,
            notifications,
            system: Arc::new(Dnd5eSystem::new()),
            clock,
        }
    }

    /// A fresh editing session using the configured rules.
    pub fn session(&self) -> CharacterSession {
        CharacterSession::new(
            self.autosave.clone(),
            self.clock.clone(),
            self.system.clone(),
            self.config.rules,
        )
    }

    /// Load a stored character and make it the session's open character.
    pub async fn select(
        &self,
        session: &mut CharacterSession,
        id: CharacterId,
    ) -> Result<(), CharacterError> {
        let record = self.use_cases.character.load.execute(id).await?;
        session.open(record).await;
        Ok(())
    }

    /// Delete a stored character, closing `session` if it has it open.
    pub async fn delete(
        &self,
        session: &mut CharacterSession,
        id: CharacterId,
    ) -> Result<(), CharacterError> {
        let name = self
            .repositories
            .character
            .get(id)
            .await?
            .map(|record| record.character.name().to_string());
        self.use_cases.character.delete.execute(id).await?;

        if session.selected_id() == Some(id) {
            session.close().await;
        }
        if let Some(name) = name {
            self.notifications.info(format!("Deleted {}", name)).await;
        }
        Ok(())
    }
}
