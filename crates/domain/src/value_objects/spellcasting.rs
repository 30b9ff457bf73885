//! Resolved spellcasting configuration and statistics.

use serde::{Deserialize, Serialize};

use super::{Ability, Modifier};

/// Shown in place of a spell statistic when the character cannot cast.
pub const NOT_APPLICABLE: &str = "—";

/// Whether a character can cast, and with which ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellcastingConfig {
    pub enabled: bool,
    pub ability: Ability,
}

/// Spell save DC and spell attack bonus.
///
/// Both are `None` when spellcasting is disabled. That is distinct from a DC
/// of zero or a `+0` bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellStatistics {
    pub enabled: bool,
    pub ability: Ability,
    pub save_dc: Option<i32>,
    pub attack_bonus: Option<Modifier>,
}

impl SpellStatistics {
    pub fn disabled(ability: Ability) -> Self {
        Self {
            enabled: false,
            ability,
            save_dc: None,
            attack_bonus: None,
        }
    }

    pub fn save_dc_display(&self) -> String {
        self.save_dc
            .map(|dc| dc.to_string())
            .unwrap_or_else(|| NOT_APPLICABLE.to_string())
    }

    pub fn attack_bonus_display(&self) -> String {
        self.attack_bonus
            .map(|bonus| bonus.to_string())
            .unwrap_or_else(|| NOT_APPLICABLE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_statistics_show_marker() {
        let stats = SpellStatistics::disabled(Ability::Intelligence);
        assert_eq!(stats.save_dc_display(), NOT_APPLICABLE);
        assert_eq!(stats.attack_bonus_display(), NOT_APPLICABLE);
    }

    #[test]
    fn enabled_statistics_show_numbers() {
        let stats = SpellStatistics {
            enabled: true,
            ability: Ability::Wisdom,
            save_dc: Some(13),
            attack_bonus: Some(Modifier::new(5)),
        };
        assert_eq!(stats.save_dc_display(), "13");
        assert_eq!(stats.attack_bonus_display(), "+5");
    }
}
