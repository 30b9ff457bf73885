//! Game system traits for rules-specific calculations.
//!
//! These traits define the interface between a character snapshot and the
//! derived values shown on its sheet. Every method is a pure function of its
//! inputs.

use serde::{Deserialize, Serialize};

use super::classes::{CharacterClass, Subclass};
use crate::aggregates::Character;
use crate::entities::CompanionStats;
use crate::value_objects::{
    Ability, Encumbrance, RuleOptions, Skill, SpellStatistics, SpellcastingConfig, XpProgress,
};

/// Core trait every game system implements.
pub trait GameSystem: Send + Sync {
    /// Unique identifier for this game system (e.g., "dnd5e").
    fn system_id(&self) -> &str;

    /// Human-readable display name (e.g., "D&D 5th Edition").
    fn display_name(&self) -> &str;

    /// Get the calculation engine for this system.
    fn calculation_engine(&self) -> &dyn CalculationEngine;

    /// Get the spellcasting system if this system has spellcasting.
    fn spellcasting_system(&self) -> Option<&dyn SpellcastingSystem> {
        None
    }
}

/// Progression and derived-stat formulas.
pub trait CalculationEngine: Send + Sync {
    /// Calculate ability modifier from score.
    ///
    /// For D&D-like systems: floor((score - 10) / 2)
    fn ability_modifier(&self, score: i32) -> i32;

    /// Calculate proficiency bonus from character level.
    fn proficiency_bonus(&self, level: u8) -> i32;

    /// Resolve the level reached with `xp` experience points.
    fn level_from_xp(&self, xp: u32) -> u8;

    /// Position between the current and next level thresholds.
    fn xp_progress(&self, xp: u32) -> XpProgress;

    /// Get the hit die size for a class.
    fn hit_die(&self, class: CharacterClass) -> u8;

    /// Proficiency bonus after applying the character's override.
    fn effective_proficiency_bonus(&self, character: &Character) -> i32 {
        character
            .proficiency_bonus_override()
            .unwrap_or_else(|| self.proficiency_bonus(character.level()))
    }

    /// Calculate skill check modifier.
    fn skill_modifier(&self, character: &Character, skill: Skill) -> i32 {
        let modifier = self.ability_modifier(character.ability_scores().get(skill.ability()));
        if character.is_proficient_in_skill(skill) {
            modifier + self.effective_proficiency_bonus(character)
        } else {
            modifier
        }
    }

    /// Calculate saving throw modifier.
    fn saving_throw_modifier(&self, character: &Character, ability: Ability) -> i32 {
        let modifier = self.ability_modifier(character.ability_scores().get(ability));
        if character.is_proficient_in_save(ability) {
            modifier + self.effective_proficiency_bonus(character)
        } else {
            modifier
        }
    }

    /// Calculate passive perception.
    fn passive_perception(&self, character: &Character) -> i32 {
        10 + self.skill_modifier(character, Skill::Perception)
    }

    /// Carried weight against Strength-derived capacity.
    fn encumbrance(&self, character: &Character) -> Encumbrance;

    /// Whether the character's companion is active.
    fn companion_visible(&self, character: &Character) -> bool;

    /// Companion modifiers, or `None` while the companion is inactive.
    fn companion_stats(&self, character: &Character) -> Option<CompanionStats>;
}

/// For systems with spellcasting.
pub trait SpellcastingSystem: Send + Sync {
    /// Caster type of a class/subclass pair, if it can cast.
    fn caster_type(&self, class: CharacterClass, subclass: Option<Subclass>) -> Option<CasterType>;

    /// Whether the character can cast and which ability it uses.
    fn spellcasting_config(&self, character: &Character, options: RuleOptions)
        -> SpellcastingConfig;

    /// Spell save DC and attack bonus, honouring user overrides.
    fn spell_statistics(&self, character: &Character, options: RuleOptions) -> SpellStatistics;
}

/// Type of spellcaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasterType {
    /// Full caster (Wizard, Cleric, Druid, Sorcerer, Bard)
    Full,
    /// Half caster (Paladin, Ranger)
    Half,
    /// Third caster (Eldritch Knight, Arcane Trickster)
    Third,
    /// Pact magic (Warlock)
    Pact,
}

/// How a class gains access to its spells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellsModel {
    Prepared,
    Known,
    None,
}
