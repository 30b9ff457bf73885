//! The character currently open for editing.
//!
//! Edits are applied to the in-memory record immediately and then handed
//! to the autosave scheduler. The session also owns the subclass prompt
//! history, so prompts are tracked per session rather than globally.

use std::sync::Arc;

use chronicle_domain::{
    Ability, Character, CharacterId, CharacterUpdate, DerivedStats, DomainError, GameSystem,
    RuleOptions, Spell, SpellcastingConfig, Subclass, SubclassGate, SubclassPromptTracker,
};

use crate::infrastructure::autosave::AutosaveScheduler;
use crate::infrastructure::ports::{CharacterRecord, ClockPort};
use crate::use_cases::character::CharacterError;

pub struct CharacterSession {
    autosave: Arc<AutosaveScheduler>,
    clock: Arc<dyn ClockPort>,
    system: Arc<dyn GameSystem>,
    rules: RuleOptions,
    prompts: SubclassPromptTracker,
    current: Option<CharacterRecord>,
}

/// Resolved spellcasting for systems that may not support it.
fn casting_config(
    system: &dyn GameSystem,
    character: &Character,
    rules: RuleOptions,
) -> SpellcastingConfig {
    match system.spellcasting_system() {
        Some(casting) => casting.spellcasting_config(character, rules),
        None => SpellcastingConfig {
            enabled: false,
            ability: Ability::Intelligence,
        },
    }
}

impl CharacterSession {
    pub fn new(
        autosave: Arc<AutosaveScheduler>,
        clock: Arc<dyn ClockPort>,
        system: Arc<dyn GameSystem>,
        rules: RuleOptions,
    ) -> Self {
        Self {
            autosave,
            clock,
            system,
            rules,
            prompts: SubclassPromptTracker::new(),
            current: None,
        }
    }

    pub fn rules(&self) -> RuleOptions {
        self.rules
    }

    pub fn current(&self) -> Option<&CharacterRecord> {
        self.current.as_ref()
    }

    pub fn selected_id(&self) -> Option<CharacterId> {
        self.current.as_ref().map(CharacterRecord::id)
    }

    /// Open `record`, cancelling the pending save of a different character.
    pub async fn open(&mut self, record: CharacterRecord) {
        if let Some(previous) = self.selected_id().filter(|id| *id != record.id()) {
            self.autosave.cancel(previous).await;
        }
        tracing::debug!(character_id = %record.id(), "Opened character");
        self.current = Some(record);
    }

    /// Close the open character and drop its pending save.
    pub async fn close(&mut self) -> Option<CharacterRecord> {
        let record = self.current.take()?;
        self.autosave.cancel(record.id()).await;
        Some(record)
    }

    /// Run a fallible edit against the open character.
    ///
    /// On success the record is stamped and an autosave is scheduled. On
    /// error nothing is scheduled. A character left holding a subclass has
    /// its prompt history cleared, so losing the subclass later prompts again.
    pub async fn edit<T>(
        &mut self,
        edit: impl FnOnce(&mut Character, &SpellcastingConfig) -> Result<T, DomainError>,
    ) -> Result<T, CharacterError> {
        let record = self.current.as_mut().ok_or(CharacterError::NoCharacterOpen)?;
        let casting = casting_config(self.system.as_ref(), &record.character, self.rules);

        let value = edit(&mut record.character, &casting)?;
        if record.character.subclass().is_some() {
            self.prompts.reset(record.id());
        }
        record.touch(self.clock.now());
        self.autosave.schedule(record.clone()).await;
        Ok(value)
    }

    pub async fn apply_update(&mut self, update: CharacterUpdate) -> Result<(), CharacterError> {
        self.edit(|character, _| character.apply_update(update)).await
    }

    pub async fn choose_subclass(&mut self, subclass: Subclass) -> Result<(), CharacterError> {
        self.edit(|character, _| character.choose_subclass(subclass))
            .await
    }

    pub async fn add_experience(&mut self, amount: u32) -> Result<(), CharacterError> {
        self.edit(|character, _| {
            character.add_experience(amount);
            Ok(())
        })
        .await
    }

    /// Returns `false` when spellcasting is disabled and nothing changed.
    pub async fn expend_spell_slot(&mut self, level: u8) -> Result<bool, CharacterError> {
        self.edit(|character, casting| character.expend_spell_slot(level, casting))
            .await
    }

    /// Returns `false` when spellcasting is disabled and nothing changed.
    pub async fn recover_spell_slot(&mut self, level: u8) -> Result<bool, CharacterError> {
        self.edit(|character, casting| character.recover_spell_slot(level, casting))
            .await
    }

    /// Returns `false` when spellcasting is disabled and nothing changed.
    pub async fn add_spell(&mut self, spell: Spell) -> Result<bool, CharacterError> {
        self.edit(|character, casting| Ok(character.add_spell(spell, casting)))
            .await
    }

    /// Whether the subclass prompt should open now. Fires once per level.
    pub fn evaluate_subclass_prompt(&mut self) -> bool {
        match &self.current {
            Some(record) => self.prompts.evaluate(&record.character, self.rules),
            None => false,
        }
    }

    pub fn subclass_gate(&self) -> Option<SubclassGate> {
        let record = self.current.as_ref()?;
        Some(self.prompts.state(&record.character, self.rules))
    }

    pub fn spellcasting_config(&self) -> Option<SpellcastingConfig> {
        let record = self.current.as_ref()?;
        Some(casting_config(
            self.system.as_ref(),
            &record.character,
            self.rules,
        ))
    }

    pub fn derived(&self) -> Option<DerivedStats> {
        let record = self.current.as_ref()?;
        Some(DerivedStats::compute(
            self.system.as_ref(),
            &record.character,
            self.rules,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::MockCharacterRepo;
    use crate::stores::Notifications;
    use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
    use chronicle_domain::{CharacterClass, CharacterName, Dnd5eSystem, UserId};
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    const DELAY: Duration = Duration::from_millis(1000);

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap()
    }

    fn edited_at() -> DateTime<Utc> {
        created_at() + ChronoDuration::hours(2)
    }

    fn test_record(name: &str) -> CharacterRecord {
        let character = Character::new(CharacterName::new(name).unwrap());
        CharacterRecord::new(UserId::new(), character, created_at())
    }

    fn session_with(
        saved: Arc<StdMutex<Vec<CharacterRecord>>>,
        rules: RuleOptions,
    ) -> CharacterSession {
        let mut repo = MockCharacterRepo::new();
        repo.expect_update().returning(move |record| {
            saved.lock().unwrap().push(record.clone());
            Ok(())
        });
        let autosave = Arc::new(AutosaveScheduler::new(
            Arc::new(repo),
            Notifications::new(),
            DELAY,
        ));
        CharacterSession::new(
            autosave,
            Arc::new(FixedClock(edited_at())),
            Arc::new(Dnd5eSystem::new()),
            rules,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn edit_without_open_character_fails() {
        let saved = Arc::new(StdMutex::new(Vec::new()));
        let mut session = session_with(saved, RuleOptions::standard());
        let result = session.add_experience(100).await;
        assert!(matches!(result, Err(CharacterError::NoCharacterOpen)));
        assert!(session.derived().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn edits_are_visible_immediately_and_saved_once() {
        let saved = Arc::new(StdMutex::new(Vec::new()));
        let mut session = session_with(saved.clone(), RuleOptions::standard());
        session.open(test_record("Bram")).await;

        session.add_experience(300).await.unwrap();
        assert_eq!(session.current().unwrap().character.level(), 2);
        session
            .apply_update(CharacterUpdate {
                race: Some("Halfling".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(session.current().unwrap().updated_at, edited_at());

        tokio::time::sleep(DELAY * 2).await;
        let saved = saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].character.race(), "Halfling");
        assert_eq!(saved[0].character.experience_points(), 300);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_edit_schedules_nothing() {
        let saved = Arc::new(StdMutex::new(Vec::new()));
        let mut session = session_with(saved.clone(), RuleOptions::standard());
        session.open(test_record("Bram")).await;

        let result = session.choose_subclass(Subclass::LifeDomain).await;
        assert!(matches!(result, Err(CharacterError::Domain(_))));
        assert!(session.current().unwrap().character.subclass().is_none());

        tokio::time::sleep(DELAY * 2).await;
        assert!(saved.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn switching_characters_cancels_pending_save() {
        let saved = Arc::new(StdMutex::new(Vec::new()));
        let mut session = session_with(saved.clone(), RuleOptions::standard());
        session.open(test_record("First")).await;
        session.add_experience(50).await.unwrap();

        session.open(test_record("Second")).await;
        tokio::time::sleep(DELAY * 2).await;
        assert!(saved.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn subclass_prompt_fires_once_and_rearms_after_choice() {
        let saved = Arc::new(StdMutex::new(Vec::new()));
        let mut session = session_with(saved, RuleOptions::standard());
        session.open(test_record("Vex")).await;
        assert!(!session.evaluate_subclass_prompt());

        session.add_experience(900).await.unwrap();
        assert_eq!(session.subclass_gate(), Some(SubclassGate::PromptPending));
        assert!(session.evaluate_subclass_prompt());
        assert!(!session.evaluate_subclass_prompt());

        session.choose_subclass(Subclass::Champion).await.unwrap();
        assert_eq!(session.subclass_gate(), Some(SubclassGate::SubclassChosen));

        session
            .apply_update(CharacterUpdate {
                class: Some(CharacterClass::Monk),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(session.evaluate_subclass_prompt());
    }

    #[tokio::test(start_paused = true)]
    async fn prompt_rearms_when_subclass_set_by_update_is_lost() {
        let saved = Arc::new(StdMutex::new(Vec::new()));
        let mut session = session_with(saved, RuleOptions::standard());
        session.open(test_record("Vex")).await;

        session.add_experience(900).await.unwrap();
        assert!(session.evaluate_subclass_prompt());

        session
            .apply_update(CharacterUpdate {
                subclass: Some(Some(Subclass::Champion)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(session.subclass_gate(), Some(SubclassGate::SubclassChosen));

        session
            .apply_update(CharacterUpdate {
                class: Some(CharacterClass::Monk),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(session.current().unwrap().character.subclass(), None);
        assert_eq!(session.subclass_gate(), Some(SubclassGate::PromptPending));
        assert!(session.evaluate_subclass_prompt());
        assert!(!session.evaluate_subclass_prompt());
    }

    #[tokio::test(start_paused = true)]
    async fn spell_slots_ignored_for_martial_classes() {
        let saved = Arc::new(StdMutex::new(Vec::new()));
        let mut session = session_with(saved, RuleOptions::standard());
        session.open(test_record("Grunt")).await;

        assert!(!session.expend_spell_slot(1).await.unwrap());
        assert!(session.current().unwrap().character.spell_slots().is_empty());
        assert!(!session.spellcasting_config().unwrap().enabled);
    }

    #[tokio::test(start_paused = true)]
    async fn simplified_rules_allow_any_caster() {
        let saved = Arc::new(StdMutex::new(Vec::new()));
        let mut session = session_with(saved, RuleOptions::simplified());
        session.open(test_record("Grunt")).await;

        assert!(session.expend_spell_slot(1).await.unwrap());
        let slots = session.current().unwrap().character.spell_slots()[&1];
        assert_eq!((slots.total(), slots.used()), (2, 1));
        assert!(session.recover_spell_slot(1).await.unwrap());
        assert!(session
            .add_spell(Spell::new("Magic Missile", 1).unwrap())
            .await
            .unwrap());

        let derived = session.derived().unwrap();
        assert!(derived.spellcasting.unwrap().enabled);
    }

    #[tokio::test(start_paused = true)]
    async fn close_drops_pending_save() {
        let saved = Arc::new(StdMutex::new(Vec::new()));
        let mut session = session_with(saved.clone(), RuleOptions::standard());
        session.open(test_record("Brief")).await;
        session.add_experience(10).await.unwrap();

        let closed = session.close().await.unwrap();
        assert_eq!(closed.character.experience_points(), 10);
        assert!(session.current().is_none());
        tokio::time::sleep(DELAY * 2).await;
        assert!(saved.lock().unwrap().is_empty());
    }
}
