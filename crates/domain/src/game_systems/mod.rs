//! Game system rules.
//!
//! The rules that turn a character snapshot into derived sheet values live
//! behind the traits in `traits.rs`. D&D 5th Edition (`dnd5e`) is the only
//! system implemented.

mod classes;
mod dnd5e;
mod traits;

// D&D 5e exports
pub use dnd5e::{
    companion_unlocked, level_from_xp, skill_ability as dnd5e_skill_ability, xp_for_level,
    Dnd5eSystem, COMPANION_MIN_LEVEL, MAX_LEVEL,
};

// Class tables
pub use classes::{
    class_metadata, hybrid_caster, CharacterClass, ClassMetadata, HybridCaster, Subclass,
    DEFAULT_SUBCLASS_LEVEL,
};

// Core traits
pub use traits::{CalculationEngine, CasterType, GameSystem, SpellcastingSystem, SpellsModel};
