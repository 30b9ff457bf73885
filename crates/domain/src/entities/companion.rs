//! Animal companion stat block.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::value_objects::{Ability, AbilityScores, Modifier, Skill};

/// A companion may be proficient in at most this many skills.
pub const COMPANION_MAX_SKILLS: usize = 2;

/// Hit points of a companion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionHitPoints {
    pub current: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionAttack {
    pub name: String,
    /// Melee or ranged.
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub reach: String,
    #[serde(default)]
    pub bonus: Modifier,
    #[serde(default)]
    pub damage: String,
}

impl CompanionAttack {
    /// The attack a freshly added row starts with.
    pub fn bite() -> Self {
        Self {
            name: "Bite".to_string(),
            kind: "Melee".to_string(),
            reach: "1.5m".to_string(),
            bonus: Modifier::new(0),
            damage: "1d6".to_string(),
        }
    }
}

/// A beast companion's stat block.
///
/// Saving throws are all proficient. Skill proficiencies are capped at
/// [`COMPANION_MAX_SKILLS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Companion {
    pub name: String,
    #[serde(default)]
    pub species: String,
    pub ability_scores: AbilityScores,
    pub armor_class: i32,
    pub hit_points: CompanionHitPoints,
    #[serde(default)]
    pub hit_dice: String,
    #[serde(default)]
    pub speed: String,
    /// Flat bonus added on top of the Dexterity modifier.
    #[serde(default)]
    pub initiative_bonus: i32,
    #[serde(default)]
    skill_proficiencies: BTreeSet<Skill>,
    #[serde(default)]
    pub attacks: Vec<CompanionAttack>,
    #[serde(default)]
    pub personality_trait: String,
    #[serde(default)]
    pub flaw: String,
}

impl Default for Companion {
    /// A wolf.
    fn default() -> Self {
        Self {
            name: "Companion".to_string(),
            species: "Wolf".to_string(),
            ability_scores: AbilityScores::new(12, 15, 12, 3, 12, 6),
            armor_class: 13,
            hit_points: CompanionHitPoints {
                current: 11,
                max: 11,
            },
            hit_dice: "2d8".to_string(),
            speed: "12m".to_string(),
            initiative_bonus: 0,
            skill_proficiencies: BTreeSet::new(),
            attacks: Vec::new(),
            personality_trait: String::new(),
            flaw: String::new(),
        }
    }
}

impl Companion {
    pub fn skill_proficiencies(&self) -> &BTreeSet<Skill> {
        &self.skill_proficiencies
    }

    pub fn is_proficient_in(&self, skill: Skill) -> bool {
        self.skill_proficiencies.contains(&skill)
    }

    /// Remove the skill when held, add it when a slot is free.
    ///
    /// Returns whether anything changed. A third skill is ignored.
    pub fn toggle_skill(&mut self, skill: Skill) -> bool {
        if self.skill_proficiencies.remove(&skill) {
            return true;
        }
        if self.skill_proficiencies.len() < COMPANION_MAX_SKILLS {
            self.skill_proficiencies.insert(skill);
            return true;
        }
        false
    }

    pub fn add_attack(&mut self) {
        self.attacks.push(CompanionAttack::bite());
    }

    pub fn remove_attack(&mut self, index: usize) -> Option<CompanionAttack> {
        (index < self.attacks.len()).then(|| self.attacks.remove(index))
    }

    /// Pull deserialized data back within its limits.
    pub(crate) fn normalized(mut self) -> Self {
        self.ability_scores = self.ability_scores.clamped();
        while self.skill_proficiencies.len() > COMPANION_MAX_SKILLS {
            self.skill_proficiencies.pop_last();
        }
        self
    }
}

/// Derived companion modifiers, using the owner's proficiency bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionStats {
    pub proficiency_bonus: i32,
    pub ability_modifiers: BTreeMap<Ability, i32>,
    pub saving_throws: BTreeMap<Ability, i32>,
    pub skills: BTreeMap<Skill, i32>,
    pub initiative: i32,
    pub armor_class: i32,
}
