//! Spellbook entries and spell slot pools.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{lenient_id, SpellId};

/// Highest spell level.
pub const MAX_SPELL_LEVEL: u8 = 9;

/// Total given to a slot pool the first time a level is touched.
pub const DEFAULT_SLOT_TOTAL: u8 = 2;

/// A spell in the character's spellbook. Level 0 is a cantrip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: SpellId,
    pub name: String,
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub prepared: bool,
    #[serde(default)]
    pub description: String,
}

impl Spell {
    /// Create an unprepared spell.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a blank name or a level above 9.
    pub fn new(name: impl Into<String>, level: u8) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("Spell name cannot be empty"));
        }
        if level > MAX_SPELL_LEVEL {
            return Err(DomainError::validation(format!(
                "Spell level must be between 0 and {}, got {}",
                MAX_SPELL_LEVEL, level
            )));
        }
        Ok(Self {
            id: SpellId::new(),
            name,
            level,
            prepared: false,
            description: String::new(),
        })
    }

    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }
}

/// Slots of one spell level. `used` never exceeds `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSlotPool {
    total: u8,
    used: u8,
}

impl Default for SpellSlotPool {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_TOTAL)
    }
}

impl SpellSlotPool {
    /// Create a pool with every slot available.
    pub fn new(total: u8) -> Self {
        Self { total, used: 0 }
    }

    pub fn total(&self) -> u8 {
        self.total
    }

    pub fn used(&self) -> u8 {
        self.used
    }

    pub fn available(&self) -> u8 {
        self.total.saturating_sub(self.used)
    }

    /// Mark one more slot as used, up to the total.
    pub fn expend(&mut self) {
        self.used = self.used.saturating_add(1).min(self.total);
    }

    /// Give back one used slot.
    pub fn recover(&mut self) {
        self.used = self.used.saturating_sub(1);
    }

    /// Restore all slots.
    pub fn restore(&mut self) {
        self.used = 0;
    }

    /// Change the total, keeping `used` within it.
    pub fn set_total(&mut self, total: u8) {
        self.total = total;
        self.used = self.used.min(total);
    }

    /// Pull a deserialized pool back into a consistent state.
    pub(crate) fn normalized(self) -> Self {
        Self {
            total: self.total,
            used: self.used.min(self.total),
        }
    }
}

/// Validate a slot level (1..=9).
pub fn check_slot_level(level: u8) -> Result<(), DomainError> {
    if (1..=MAX_SPELL_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(DomainError::constraint(format!(
            "spell slot level must be between 1 and {}, got {}",
            MAX_SPELL_LEVEL, level
        )))
    }
}
