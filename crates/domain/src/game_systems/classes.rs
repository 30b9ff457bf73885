//! Static class and subclass tables.
//!
//! Classes, their subclasses, caster metadata and subclass choice levels are
//! fixed configuration. Every rule that depends on class or subclass reads
//! these tables instead of branching on identifiers at the call site.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::traits::{CasterType, SpellsModel};
use crate::error::DomainError;
use crate::value_objects::Ability;

/// Subclass choice level for any class without its own entry.
pub const DEFAULT_SUBCLASS_LEVEL: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 12] = [
        CharacterClass::Barbarian,
        CharacterClass::Bard,
        CharacterClass::Cleric,
        CharacterClass::Druid,
        CharacterClass::Fighter,
        CharacterClass::Monk,
        CharacterClass::Paladin,
        CharacterClass::Ranger,
        CharacterClass::Rogue,
        CharacterClass::Sorcerer,
        CharacterClass::Warlock,
        CharacterClass::Wizard,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CharacterClass::Barbarian => "Barbarian",
            CharacterClass::Bard => "Bard",
            CharacterClass::Cleric => "Cleric",
            CharacterClass::Druid => "Druid",
            CharacterClass::Fighter => "Fighter",
            CharacterClass::Monk => "Monk",
            CharacterClass::Paladin => "Paladin",
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Sorcerer => "Sorcerer",
            CharacterClass::Warlock => "Warlock",
            CharacterClass::Wizard => "Wizard",
        }
    }

    pub fn metadata(&self) -> &'static ClassMetadata {
        class_metadata(*self)
    }

    /// Level at which this class picks its subclass.
    pub fn subclass_choice_level(&self) -> u8 {
        SUBCLASS_LEVELS
            .iter()
            .find(|(class, _)| class == self)
            .map(|(_, level)| *level)
            .unwrap_or(DEFAULT_SUBCLASS_LEVEL)
    }

    /// Subclasses this class may choose from.
    pub fn subclasses(&self) -> impl Iterator<Item = Subclass> + '_ {
        Subclass::ALL.into_iter().filter(move |s| s.class() == *self)
    }

    pub fn allows_subclass(&self, subclass: Subclass) -> bool {
        subclass.class() == *self
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CharacterClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        CharacterClass::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DomainError::parse(format!("Unknown class: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subclass {
    // Barbarian
    Berserker,
    TotemWarrior,
    // Bard
    CollegeOfLore,
    CollegeOfValor,
    // Cleric
    KnowledgeDomain,
    LifeDomain,
    LightDomain,
    NatureDomain,
    TempestDomain,
    TrickeryDomain,
    WarDomain,
    // Druid
    CircleOfTheLand,
    CircleOfTheMoon,
    // Fighter
    Champion,
    BattleMaster,
    EldritchKnight,
    // Monk
    WayOfTheOpenHand,
    WayOfShadow,
    WayOfTheFourElements,
    // Paladin
    OathOfDevotion,
    OathOfTheAncients,
    OathOfVengeance,
    // Ranger
    Hunter,
    BeastMaster,
    // Rogue
    Thief,
    Assassin,
    ArcaneTrickster,
    // Sorcerer
    DraconicBloodline,
    WildMagic,
    // Warlock
    Archfey,
    Fiend,
    GreatOldOne,
    // Wizard
    SchoolOfAbjuration,
    SchoolOfDivination,
    SchoolOfConjuration,
    SchoolOfEnchantment,
    SchoolOfEvocation,
    SchoolOfIllusion,
    SchoolOfNecromancy,
    SchoolOfTransmutation,
}

impl Subclass {
    pub const ALL: [Subclass; 40] = [
        Subclass::Berserker,
        Subclass::TotemWarrior,
        Subclass::CollegeOfLore,
        Subclass::CollegeOfValor,
        Subclass::KnowledgeDomain,
        Subclass::LifeDomain,
        Subclass::LightDomain,
        Subclass::NatureDomain,
        Subclass::TempestDomain,
        Subclass::TrickeryDomain,
        Subclass::WarDomain,
        Subclass::CircleOfTheLand,
        Subclass::CircleOfTheMoon,
        Subclass::Champion,
        Subclass::BattleMaster,
        Subclass::EldritchKnight,
        Subclass::WayOfTheOpenHand,
        Subclass::WayOfShadow,
        Subclass::WayOfTheFourElements,
        Subclass::OathOfDevotion,
        Subclass::OathOfTheAncients,
        Subclass::OathOfVengeance,
        Subclass::Hunter,
        Subclass::BeastMaster,
        Subclass::Thief,
        Subclass::Assassin,
        Subclass::ArcaneTrickster,
        Subclass::DraconicBloodline,
        Subclass::WildMagic,
        Subclass::Archfey,
        Subclass::Fiend,
        Subclass::GreatOldOne,
        Subclass::SchoolOfAbjuration,
        Subclass::SchoolOfDivination,
        Subclass::SchoolOfConjuration,
        Subclass::SchoolOfEnchantment,
        Subclass::SchoolOfEvocation,
        Subclass::SchoolOfIllusion,
        Subclass::SchoolOfNecromancy,
        Subclass::SchoolOfTransmutation,
    ];

    /// The class this subclass belongs to.
    pub fn class(&self) -> CharacterClass {
        use CharacterClass as C;
        use Subclass as S;
        match self {
            S::Berserker | S::TotemWarrior => C::Barbarian,
            S::CollegeOfLore | S::CollegeOfValor => C::Bard,
            S::KnowledgeDomain
            | S::LifeDomain
            | S::LightDomain
            | S::NatureDomain
            | S::TempestDomain
            | S::TrickeryDomain
            | S::WarDomain => C::Cleric,
            S::CircleOfTheLand | S::CircleOfTheMoon => C::Druid,
            S::Champion | S::BattleMaster | S::EldritchKnight => C::Fighter,
            S::WayOfTheOpenHand | S::WayOfShadow | S::WayOfTheFourElements => C::Monk,
            S::OathOfDevotion | S::OathOfTheAncients | S::OathOfVengeance => C::Paladin,
            S::Hunter | S::BeastMaster => C::Ranger,
            S::Thief | S::Assassin | S::ArcaneTrickster => C::Rogue,
            S::DraconicBloodline | S::WildMagic => C::Sorcerer,
            S::Archfey | S::Fiend | S::GreatOldOne => C::Warlock,
            S::SchoolOfAbjuration
            | S::SchoolOfDivination
            | S::SchoolOfConjuration
            | S::SchoolOfEnchantment
            | S::SchoolOfEvocation
            | S::SchoolOfIllusion
            | S::SchoolOfNecromancy
            | S::SchoolOfTransmutation => C::Wizard,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Subclass::Berserker => "Path of the Berserker",
            Subclass::TotemWarrior => "Path of the Totem Warrior",
            Subclass::CollegeOfLore => "College of Lore",
            Subclass::CollegeOfValor => "College of Valor",
            Subclass::KnowledgeDomain => "Knowledge Domain",
            Subclass::LifeDomain => "Life Domain",
            Subclass::LightDomain => "Light Domain",
            Subclass::NatureDomain => "Nature Domain",
            Subclass::TempestDomain => "Tempest Domain",
            Subclass::TrickeryDomain => "Trickery Domain",
            Subclass::WarDomain => "War Domain",
            Subclass::CircleOfTheLand => "Circle of the Land",
            Subclass::CircleOfTheMoon => "Circle of the Moon",
            Subclass::Champion => "Champion",
            Subclass::BattleMaster => "Battle Master",
            Subclass::EldritchKnight => "Eldritch Knight",
            Subclass::WayOfTheOpenHand => "Way of the Open Hand",
            Subclass::WayOfShadow => "Way of Shadow",
            Subclass::WayOfTheFourElements => "Way of the Four Elements",
            Subclass::OathOfDevotion => "Oath of Devotion",
            Subclass::OathOfTheAncients => "Oath of the Ancients",
            Subclass::OathOfVengeance => "Oath of Vengeance",
            Subclass::Hunter => "Hunter",
            Subclass::BeastMaster => "Beast Master",
            Subclass::Thief => "Thief",
            Subclass::Assassin => "Assassin",
            Subclass::ArcaneTrickster => "Arcane Trickster",
            Subclass::DraconicBloodline => "Draconic Bloodline",
            Subclass::WildMagic => "Wild Magic",
            Subclass::Archfey => "The Archfey",
            Subclass::Fiend => "The Fiend",
            Subclass::GreatOldOne => "The Great Old One",
            Subclass::SchoolOfAbjuration => "School of Abjuration",
            Subclass::SchoolOfDivination => "School of Divination",
            Subclass::SchoolOfConjuration => "School of Conjuration",
            Subclass::SchoolOfEnchantment => "School of Enchantment",
            Subclass::SchoolOfEvocation => "School of Evocation",
            Subclass::SchoolOfIllusion => "School of Illusion",
            Subclass::SchoolOfNecromancy => "School of Necromancy",
            Subclass::SchoolOfTransmutation => "School of Transmutation",
        }
    }
}

impl fmt::Display for Subclass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Subclass {
    type Err = DomainError;

    /// Accepts display names ("Eldritch Knight") and wire names ("eldritch_knight").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', " ");
        Subclass::ALL
            .into_iter()
            .find(|sub| {
                let display = sub.display_name().to_ascii_lowercase();
                display == normalized
                    || ["the ", "path of the "]
                        .iter()
                        .any(|prefix| display.strip_prefix(prefix) == Some(normalized.as_str()))
            })
            .ok_or_else(|| DomainError::parse(format!("Unknown subclass: {}", s)))
    }
}

/// Static rules for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMetadata {
    pub is_spellcaster: bool,
    pub caster_type: Option<CasterType>,
    pub spell_ability: Option<Ability>,
    pub spells_model: SpellsModel,
    /// Hit die size, e.g. 10 for a d10.
    pub hit_die: u8,
}

const fn caster(
    caster_type: CasterType,
    ability: Ability,
    spells_model: SpellsModel,
    hit_die: u8,
) -> ClassMetadata {
    ClassMetadata {
        is_spellcaster: true,
        caster_type: Some(caster_type),
        spell_ability: Some(ability),
        spells_model,
        hit_die,
    }
}

const fn martial(hit_die: u8) -> ClassMetadata {
    ClassMetadata {
        is_spellcaster: false,
        caster_type: None,
        spell_ability: None,
        spells_model: SpellsModel::None,
        hit_die,
    }
}

/// Rows follow the declaration order of [`CharacterClass`].
static CLASS_METADATA: [(CharacterClass, ClassMetadata); 12] = [
    (CharacterClass::Barbarian, martial(12)),
    (
        CharacterClass::Bard,
        caster(CasterType::Full, Ability::Charisma, SpellsModel::Known, 8),
    ),
    (
        CharacterClass::Cleric,
        caster(CasterType::Full, Ability::Wisdom, SpellsModel::Prepared, 8),
    ),
    (
        CharacterClass::Druid,
        caster(CasterType::Full, Ability::Wisdom, SpellsModel::Prepared, 8),
    ),
    (CharacterClass::Fighter, martial(10)),
    (CharacterClass::Monk, martial(8)),
    (
        CharacterClass::Paladin,
        caster(CasterType::Half, Ability::Charisma, SpellsModel::Prepared, 10),
    ),
    (
        CharacterClass::Ranger,
        caster(CasterType::Half, Ability::Wisdom, SpellsModel::Known, 10),
    ),
    (CharacterClass::Rogue, martial(8)),
    (
        CharacterClass::Sorcerer,
        caster(CasterType::Full, Ability::Charisma, SpellsModel::Known, 6),
    ),
    (
        CharacterClass::Warlock,
        caster(CasterType::Pact, Ability::Charisma, SpellsModel::Known, 8),
    ),
    (
        CharacterClass::Wizard,
        caster(CasterType::Full, Ability::Intelligence, SpellsModel::Prepared, 6),
    ),
];

static SUBCLASS_LEVELS: [(CharacterClass, u8); 12] = [
    (CharacterClass::Cleric, 1),
    (CharacterClass::Sorcerer, 1),
    (CharacterClass::Warlock, 1),
    (CharacterClass::Wizard, 2),
    (CharacterClass::Druid, 2),
    (CharacterClass::Barbarian, 3),
    (CharacterClass::Bard, 3),
    (CharacterClass::Fighter, 3),
    (CharacterClass::Monk, 3),
    (CharacterClass::Paladin, 3),
    (CharacterClass::Ranger, 3),
    (CharacterClass::Rogue, 3),
];

/// A subclass that grants spellcasting to a class that otherwise has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HybridCaster {
    pub subclass: Subclass,
    pub ability: Ability,
    pub caster_type: CasterType,
}

static HYBRID_CASTERS: [HybridCaster; 2] = [
    HybridCaster {
        subclass: Subclass::EldritchKnight,
        ability: Ability::Intelligence,
        caster_type: CasterType::Third,
    },
    HybridCaster {
        subclass: Subclass::ArcaneTrickster,
        ability: Ability::Intelligence,
        caster_type: CasterType::Third,
    },
];

pub fn class_metadata(class: CharacterClass) -> &'static ClassMetadata {
    &CLASS_METADATA[class as usize].1
}

/// Hybrid caster entry for a class/subclass pair, if any.
pub fn hybrid_caster(class: CharacterClass, subclass: Option<Subclass>) -> Option<&'static HybridCaster> {
    let subclass = subclass?;
    HYBRID_CASTERS
        .iter()
        .find(|h| h.subclass == subclass && h.subclass.class() == class)
}
