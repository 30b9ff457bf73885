//! Entities owned by the character aggregate

mod companion;
mod inventory;
mod spell;

pub use companion::{
    Companion, CompanionAttack, CompanionHitPoints, CompanionStats, COMPANION_MAX_SKILLS,
};
pub use inventory::{InventoryItem, Weapon};
pub use spell::{check_slot_level, Spell, SpellSlotPool, DEFAULT_SLOT_TOTAL, MAX_SPELL_LEVEL};
