//! Carried items and weapons.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{lenient_id, ItemId};
use crate::value_objects::Modifier;

fn default_quantity() -> u32 {
    1
}

/// An item in a character's inventory.
///
/// List order is the user's display order and carries no rule meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: ItemId,
    pub name: String,
    /// Weight of a single unit.
    #[serde(default)]
    pub weight: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub equipped: bool,
}

impl InventoryItem {
    /// Create an unequipped item with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the name is blank, the weight is
    /// negative or not finite, or the quantity is zero.
    pub fn new(name: impl Into<String>, weight: f64, quantity: u32) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("Item name cannot be empty"));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(DomainError::validation(format!(
                "Item weight must be a non-negative number, got {}",
                weight
            )));
        }
        if quantity == 0 {
            return Err(DomainError::validation("Item quantity must be at least 1"));
        }
        Ok(Self {
            id: ItemId::new(),
            name,
            weight,
            quantity,
            description: String::new(),
            equipped: false,
        })
    }

    /// Weight of the whole stack.
    pub fn total_weight(&self) -> f64 {
        self.weight * f64::from(self.quantity)
    }
}

/// A weapon line on the sheet. Free text apart from the attack bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub name: String,
    #[serde(default)]
    pub attack_bonus: Modifier,
    #[serde(default)]
    pub damage: String,
    /// Handling, e.g. "one-handed" or "versatile".
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}
