//! Character aggregate, rule tables and the derived-stat engine.
//!
//! Everything here is synchronous and free of I/O: resolvers take a
//! character snapshot and return derived values.

pub mod aggregates;
pub mod derived;
pub mod entities;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod subclass_gate;
pub mod value_objects;

pub use aggregates::{Biography, Character, CharacterUpdate, Proficiencies};
pub use derived::DerivedStats;
pub use entities::{
    Companion, CompanionAttack, CompanionHitPoints, CompanionStats, InventoryItem, Spell,
    SpellSlotPool, Weapon, COMPANION_MAX_SKILLS, MAX_SPELL_LEVEL,
};
pub use error::DomainError;
pub use subclass_gate::{SubclassGate, SubclassPromptTracker};

// Re-export game system traits and types
pub use game_systems::{
    class_metadata, level_from_xp, xp_for_level, CalculationEngine, CasterType, CharacterClass,
    ClassMetadata, Dnd5eSystem, GameSystem, SpellcastingSystem, SpellsModel, Subclass,
};

// Re-export ID types
pub use ids::{CharacterId, ItemId, SpellId, UserId};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    Ability, AbilityScores, CharacterName, DeathSaveKind, DeathSaves, DeathStatus, Encumbrance,
    EncumbranceTier, HitPoints, Modifier, RuleOptions, Skill, SpellStatistics,
    SpellcastingConfig, XpProgress, NOT_APPLICABLE,
};
