//! Carried weight against Strength-derived capacity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Encumbrance tiers in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncumbranceTier {
    Normal,
    LightlyEncumbered,
    HeavilyEncumbered,
    OverLimit,
}

impl fmt::Display for EncumbranceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EncumbranceTier::Normal => "normal",
            EncumbranceTier::LightlyEncumbered => "lightly encumbered",
            EncumbranceTier::HeavilyEncumbered => "heavily encumbered",
            EncumbranceTier::OverLimit => "over limit",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encumbrance {
    pub total_weight: f64,
    pub capacity: f64,
    pub tier: EncumbranceTier,
    /// Share of capacity in use, capped at 100.
    pub load_percent: f64,
}
