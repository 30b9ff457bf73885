//! Ability identifiers, ability score sets and signed modifiers.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Lowest score an ability can hold.
pub const MIN_ABILITY_SCORE: i32 = 0;
/// Highest score an ability can hold.
pub const MAX_ABILITY_SCORE: i32 = 30;

/// One of the six fixed abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    #[serde(rename = "STR")]
    Strength,
    #[serde(rename = "DEX")]
    Dexterity,
    #[serde(rename = "CON")]
    Constitution,
    #[serde(rename = "INT")]
    Intelligence,
    #[serde(rename = "WIS")]
    Wisdom,
    #[serde(rename = "CHA")]
    Charisma,
}

impl Ability {
    /// All abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Three-letter abbreviation used on the wire.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Ability::ALL
            .into_iter()
            .find(|a| {
                a.abbreviation().eq_ignore_ascii_case(needle)
                    || a.display_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| DomainError::parse(format!("Unknown ability: {}", s)))
    }
}

fn default_score() -> i32 {
    10
}

/// The six ability scores of a creature, each kept within 0..=30.
///
/// On the wire the keys are the abbreviations `STR`..`CHA`. Missing entries
/// default to 10; any other key is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AbilityScores {
    #[serde(rename = "STR", default = "default_score")]
    strength: i32,
    #[serde(rename = "DEX", default = "default_score")]
    dexterity: i32,
    #[serde(rename = "CON", default = "default_score")]
    constitution: i32,
    #[serde(rename = "INT", default = "default_score")]
    intelligence: i32,
    #[serde(rename = "WIS", default = "default_score")]
    wisdom: i32,
    #[serde(rename = "CHA", default = "default_score")]
    charisma: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::uniform(10)
    }
}

impl AbilityScores {
    /// Build a score set in STR, DEX, CON, INT, WIS, CHA order.
    pub fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        let mut scores = Self::default();
        let values = [strength, dexterity, constitution, intelligence, wisdom, charisma];
        for (ability, score) in Ability::ALL.into_iter().zip(values) {
            scores.set(ability, score);
        }
        scores
    }

    /// Every ability set to the same score.
    pub fn uniform(score: i32) -> Self {
        let score = clamp_score(score);
        Self {
            strength: score,
            dexterity: score,
            constitution: score,
            intelligence: score,
            wisdom: score,
            charisma: score,
        }
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// Set a score, clamping it into 0..=30.
    pub fn set(&mut self, ability: Ability, score: i32) {
        let score = clamp_score(score);
        match ability {
            Ability::Strength => self.strength = score,
            Ability::Dexterity => self.dexterity = score,
            Ability::Constitution => self.constitution = score,
            Ability::Intelligence => self.intelligence = score,
            Ability::Wisdom => self.wisdom = score,
            Ability::Charisma => self.charisma = score,
        }
    }

    /// Same set with any out-of-range value pulled back into 0..=30.
    pub fn clamped(self) -> Self {
        Self::new(
            self.strength,
            self.dexterity,
            self.constitution,
            self.intelligence,
            self.wisdom,
            self.charisma,
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::ALL.into_iter().map(move |a| (a, self.get(a)))
    }
}

fn clamp_score(score: i32) -> i32 {
    score.clamp(MIN_ABILITY_SCORE, MAX_ABILITY_SCORE)
}

/// A signed bonus such as `+3` or `-1`.
///
/// Serialized as its signed string form. Deserializes from either that
/// string form or a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Modifier(i32);

impl Modifier {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for Modifier {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for Modifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        digits
            .parse::<i32>()
            .map(Self)
            .map_err(|_| DomainError::parse(format!("Invalid modifier: {}", s)))
    }
}

impl Serialize for Modifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Modifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ModifierVisitor)
    }
}

struct ModifierVisitor;

impl<'de> Visitor<'de> for ModifierVisitor {
    type Value = Modifier;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a signed modifier such as \"+3\" or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        i32::try_from(v).map(Modifier).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i32::try_from(v).map(Modifier).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ability_round_trips_through_abbreviation() {
        for ability in Ability::ALL {
            let parsed: Ability = ability.abbreviation().parse().unwrap();
            assert_eq!(parsed, ability);
        }
        assert_eq!("wisdom".parse::<Ability>().unwrap(), Ability::Wisdom);
        assert!("LCK".parse::<Ability>().is_err());
    }

    #[test]
    fn ability_serializes_as_abbreviation() {
        let json = serde_json::to_string(&Ability::Charisma).unwrap();
        assert_eq!(json, "\"CHA\"");
    }

    #[test]
    fn scores_clamp_on_set() {
        let mut scores = AbilityScores::default();
        scores.set(Ability::Strength, 42);
        scores.set(Ability::Dexterity, -3);
        assert_eq!(scores.get(Ability::Strength), 30);
        assert_eq!(scores.get(Ability::Dexterity), 0);
        assert_eq!(scores.get(Ability::Wisdom), 10);
    }

    #[test]
    fn scores_default_missing_entries_to_ten() {
        let scores: AbilityScores = serde_json::from_str(r#"{"STR":16,"CHA":8}"#).unwrap();
        assert_eq!(scores.get(Ability::Strength), 16);
        assert_eq!(scores.get(Ability::Charisma), 8);
        assert_eq!(scores.get(Ability::Intelligence), 10);
    }

    #[test]
    fn scores_reject_unknown_keys() {
        let result = serde_json::from_str::<AbilityScores>(r#"{"strength":18,"dexterity":16}"#);
        assert!(result.is_err());
        let result = serde_json::from_str::<AbilityScores>(r#"{"STR":18,"str":3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn clamped_pulls_wire_values_into_range() {
        let scores: AbilityScores = serde_json::from_str(r#"{"STR":99,"DEX":-5}"#).unwrap();
        let scores = scores.clamped();
        assert_eq!(scores.get(Ability::Strength), 30);
        assert_eq!(scores.get(Ability::Dexterity), 0);
    }

    #[test]
    fn modifier_display_is_signed() {
        assert_eq!(Modifier::new(3).to_string(), "+3");
        assert_eq!(Modifier::new(0).to_string(), "+0");
        assert_eq!(Modifier::new(-2).to_string(), "-2");
    }

    #[test]
    fn modifier_accepts_string_or_number() {
        let m: Modifier = serde_json::from_str("\"+5\"").unwrap();
        assert_eq!(m.value(), 5);
        let m: Modifier = serde_json::from_str("\"-1\"").unwrap();
        assert_eq!(m.value(), -1);
        let m: Modifier = serde_json::from_str("4").unwrap();
        assert_eq!(m.value(), 4);
        assert!(serde_json::from_str::<Modifier>("\"five\"").is_err());
        assert_eq!(serde_json::to_string(&Modifier::new(2)).unwrap(), "\"+2\"");
    }
}
