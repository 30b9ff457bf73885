//! Value objects - Immutable objects defined by their attributes

mod ability;
mod encumbrance;
mod names;
mod progression;
mod rule_options;
mod skill;
mod spellcasting;
mod vitals;

pub use ability::{Ability, AbilityScores, Modifier, MAX_ABILITY_SCORE, MIN_ABILITY_SCORE};
pub use encumbrance::{Encumbrance, EncumbranceTier};
pub use names::CharacterName;
pub use progression::XpProgress;
pub use rule_options::RuleOptions;
pub use skill::Skill;
pub use spellcasting::{SpellStatistics, SpellcastingConfig, NOT_APPLICABLE};
pub use vitals::{DeathSaveKind, DeathSaves, DeathStatus, HitPoints, DEATH_SAVE_MARKS};
