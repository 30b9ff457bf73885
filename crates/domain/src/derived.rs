//! Derived sheet values.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregates::Character;
use crate::entities::CompanionStats;
use crate::game_systems::GameSystem;
use crate::value_objects::{
    Ability, DeathStatus, Encumbrance, Modifier, RuleOptions, Skill, SpellStatistics, XpProgress,
};

/// Every value a character sheet displays but never stores.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub level: u8,
    pub proficiency_bonus: i32,
    pub ability_modifiers: BTreeMap<Ability, Modifier>,
    pub saving_throws: BTreeMap<Ability, Modifier>,
    pub skills: BTreeMap<Skill, Modifier>,
    pub passive_perception: i32,
    /// Absent for systems without spellcasting.
    pub spellcasting: Option<SpellStatistics>,
    pub encumbrance: Encumbrance,
    pub experience: XpProgress,
    pub death_status: DeathStatus,
    pub companion: Option<CompanionStats>,
}

impl DerivedStats {
    /// Resolve every derived value for `character`.
    pub fn compute(system: &dyn GameSystem, character: &Character, options: RuleOptions) -> Self {
        let engine = system.calculation_engine();

        let ability_modifiers = character
            .ability_scores()
            .iter()
            .map(|(ability, score)| (ability, Modifier::new(engine.ability_modifier(score))))
            .collect();
        let saving_throws = Ability::ALL
            .iter()
            .map(|&ability| {
                let value = engine.saving_throw_modifier(character, ability);
                (ability, Modifier::new(value))
            })
            .collect();
        let skills = Skill::ALL
            .iter()
            .map(|&skill| (skill, Modifier::new(engine.skill_modifier(character, skill))))
            .collect();

        Self {
            level: character.level(),
            proficiency_bonus: engine.effective_proficiency_bonus(character),
            ability_modifiers,
            saving_throws,
            skills,
            passive_perception: engine.passive_perception(character),
            spellcasting: system
                .spellcasting_system()
                .map(|casting| casting.spell_statistics(character, options)),
            encumbrance: engine.encumbrance(character),
            experience: engine.xp_progress(character.experience_points()),
            death_status: character.death_saves().status(),
            companion: engine.companion_stats(character),
        }
    }
}
