//! D&D 5th Edition game system implementation.
//!
//! Implements progression, derived-stat and spellcasting rules for D&D 5e.

use std::collections::BTreeMap;

use super::classes::{class_metadata, hybrid_caster, CharacterClass, Subclass};
use super::traits::{CalculationEngine, CasterType, GameSystem, SpellcastingSystem};
use crate::aggregates::Character;
use crate::entities::CompanionStats;
use crate::value_objects::{
    Ability, Encumbrance, EncumbranceTier, Modifier, RuleOptions, Skill, SpellStatistics,
    SpellcastingConfig, XpProgress,
};

/// XP thresholds for each level in D&D 5e.
/// Index is level - 1 (so level 1 = index 0).
const XP_THRESHOLDS: [u32; 20] = [
    0,      // Level 1
    300,    // Level 2
    900,    // Level 3
    2700,   // Level 4
    6500,   // Level 5
    14000,  // Level 6
    23000,  // Level 7
    34000,  // Level 8
    48000,  // Level 9
    64000,  // Level 10
    85000,  // Level 11
    100000, // Level 12
    120000, // Level 13
    140000, // Level 14
    165000, // Level 15
    195000, // Level 16
    225000, // Level 17
    265000, // Level 18
    305000, // Level 19
    355000, // Level 20
];

pub const MAX_LEVEL: u8 = 20;

/// Lowest level at which a Beast Master's companion joins.
pub const COMPANION_MIN_LEVEL: u8 = 3;

/// Get XP required for a given level. 0 outside 1..=20.
pub fn xp_for_level(level: u8) -> u32 {
    if level == 0 || level > MAX_LEVEL {
        return 0;
    }
    XP_THRESHOLDS[usize::from(level - 1)]
}

/// Calculate level from current XP.
///
/// A threshold is the minimum XP of its level, so `xp == 300` is level 2.
pub fn level_from_xp(xp: u32) -> u8 {
    for (i, &threshold) in XP_THRESHOLDS.iter().enumerate().rev() {
        if xp >= threshold {
            return (i + 1) as u8;
        }
    }
    1
}

/// Ability each skill is rolled with.
pub fn skill_ability(skill: Skill) -> Ability {
    match skill {
        Skill::Athletics => Ability::Strength,
        Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
        Skill::Arcana
        | Skill::History
        | Skill::Investigation
        | Skill::Nature
        | Skill::Religion => Ability::Intelligence,
        Skill::AnimalHandling
        | Skill::Insight
        | Skill::Medicine
        | Skill::Perception
        | Skill::Survival => Ability::Wisdom,
        Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
            Ability::Charisma
        }
    }
}

/// Whether a class/subclass/level combination has an active companion.
pub fn companion_unlocked(class: CharacterClass, subclass: Option<Subclass>, level: u8) -> bool {
    class == CharacterClass::Ranger
        && subclass == Some(Subclass::BeastMaster)
        && level >= COMPANION_MIN_LEVEL
}

/// D&D 5th Edition game system.
pub struct Dnd5eSystem;

impl Default for Dnd5eSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Dnd5eSystem {
    /// Create a new D&D 5e system instance.
    pub fn new() -> Self {
        Self
    }
}

impl GameSystem for Dnd5eSystem {
    fn system_id(&self) -> &str {
        "dnd5e"
    }

    fn display_name(&self) -> &str {
        "D&D 5th Edition"
    }

    fn calculation_engine(&self) -> &dyn CalculationEngine {
        self
    }

    fn spellcasting_system(&self) -> Option<&dyn SpellcastingSystem> {
        Some(self)
    }
}

impl CalculationEngine for Dnd5eSystem {
    fn ability_modifier(&self, score: i32) -> i32 {
        // Rust's / rounds toward zero, the table rounds down
        let diff = score - 10;
        if diff >= 0 {
            diff / 2
        } else {
            (diff - 1) / 2
        }
    }

    fn proficiency_bonus(&self, level: u8) -> i32 {
        ((i32::from(level.max(1)) - 1) / 4) + 2
    }

    fn level_from_xp(&self, xp: u32) -> u8 {
        level_from_xp(xp)
    }

    fn xp_progress(&self, xp: u32) -> XpProgress {
        let level = level_from_xp(xp);
        let current_level_xp = xp_for_level(level);
        if level >= MAX_LEVEL {
            return XpProgress {
                level,
                current_level_xp,
                next_level_xp: None,
                progress_percent: 100.0,
            };
        }

        let next = xp_for_level(level + 1);
        let span = f64::from(next - current_level_xp);
        let gained = f64::from(xp - current_level_xp);
        XpProgress {
            level,
            current_level_xp,
            next_level_xp: Some(next),
            progress_percent: (gained / span * 100.0).clamp(0.0, 100.0),
        }
    }

    fn hit_die(&self, class: CharacterClass) -> u8 {
        class_metadata(class).hit_die
    }

    fn encumbrance(&self, character: &Character) -> Encumbrance {
        let strength = f64::from(character.ability_scores().get(Ability::Strength));
        let total_weight: f64 = character
            .inventory()
            .iter()
            .map(|item| item.total_weight())
            .sum();
        let capacity = strength * 15.0;

        let tier = if total_weight > capacity {
            EncumbranceTier::OverLimit
        } else if total_weight > strength * 10.0 {
            EncumbranceTier::HeavilyEncumbered
        } else if total_weight > strength * 5.0 {
            EncumbranceTier::LightlyEncumbered
        } else {
            EncumbranceTier::Normal
        };

        let load_percent = if capacity > 0.0 {
            (total_weight / capacity * 100.0).min(100.0)
        } else if total_weight > 0.0 {
            100.0
        } else {
            0.0
        };

        Encumbrance {
            total_weight,
            capacity,
            tier,
            load_percent,
        }
    }

    fn companion_visible(&self, character: &Character) -> bool {
        companion_unlocked(character.class(), character.subclass(), character.level())
    }

    fn companion_stats(&self, character: &Character) -> Option<CompanionStats> {
        if !self.companion_visible(character) {
            return None;
        }
        let companion = character.companion()?;
        let proficiency_bonus = self.effective_proficiency_bonus(character);

        let ability_modifiers: BTreeMap<Ability, i32> = companion
            .ability_scores
            .iter()
            .map(|(ability, score)| (ability, self.ability_modifier(score)))
            .collect();
        let modifier_of = |ability: Ability| ability_modifiers.get(&ability).copied().unwrap_or(0);

        let saving_throws = Ability::ALL
            .iter()
            .map(|&ability| (ability, modifier_of(ability) + proficiency_bonus))
            .collect();
        let skills = Skill::ALL
            .iter()
            .map(|&skill| {
                let bonus = if companion.is_proficient_in(skill) {
                    proficiency_bonus
                } else {
                    0
                };
                (skill, modifier_of(skill_ability(skill)) + bonus)
            })
            .collect();

        Some(CompanionStats {
            proficiency_bonus,
            initiative: modifier_of(Ability::Dexterity) + companion.initiative_bonus,
            armor_class: companion.armor_class,
            ability_modifiers,
            saving_throws,
            skills,
        })
    }
}

impl SpellcastingSystem for Dnd5eSystem {
    fn caster_type(&self, class: CharacterClass, subclass: Option<Subclass>) -> Option<CasterType> {
        hybrid_caster(class, subclass)
            .map(|hybrid| hybrid.caster_type)
            .or(class_metadata(class).caster_type)
    }

    fn spellcasting_config(
        &self,
        character: &Character,
        options: RuleOptions,
    ) -> SpellcastingConfig {
        let metadata = class_metadata(character.class());
        let hybrid = hybrid_caster(character.class(), character.subclass());

        let enabled = options.simplified_rules || metadata.is_spellcaster || hybrid.is_some();
        let ability = character
            .spellcasting_ability_override()
            .or(hybrid.map(|h| h.ability))
            .or(metadata.spell_ability)
            .unwrap_or(Ability::Intelligence);

        SpellcastingConfig { enabled, ability }
    }

    fn spell_statistics(&self, character: &Character, options: RuleOptions) -> SpellStatistics {
        let config = self.spellcasting_config(character, options);
        if !config.enabled {
            return SpellStatistics::disabled(config.ability);
        }

        let modifier = self.ability_modifier(character.ability_scores().get(config.ability));
        let proficiency_bonus = self.effective_proficiency_bonus(character);

        SpellStatistics {
            enabled: true,
            ability: config.ability,
            save_dc: Some(
                character
                    .spell_save_dc_override()
                    .unwrap_or(8 + modifier + proficiency_bonus),
            ),
            attack_bonus: Some(
                character
                    .spell_attack_bonus_override()
                    .unwrap_or(Modifier::new(modifier + proficiency_bonus)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::InventoryItem;
    use crate::value_objects::{CharacterName, NOT_APPLICABLE};

    fn create_test_character() -> Character {
        Character::new(CharacterName::new("Test Hero").unwrap())
    }

    fn character_with(class: CharacterClass, subclass: Option<Subclass>, xp: u32) -> Character {
        let mut c = create_test_character();
        c.set_class(class);
        if let Some(subclass) = subclass {
            c.choose_subclass(subclass).unwrap();
        }
        c.set_experience_points(xp);
        c
    }

    #[test]
    fn ability_modifier_calculation() {
        let system = Dnd5eSystem::new();
        assert_eq!(system.ability_modifier(10), 0);
        assert_eq!(system.ability_modifier(11), 0);
        assert_eq!(system.ability_modifier(12), 1);
        assert_eq!(system.ability_modifier(20), 5);
        assert_eq!(system.ability_modifier(9), -1);
        assert_eq!(system.ability_modifier(8), -1);
        assert_eq!(system.ability_modifier(7), -2);
        assert_eq!(system.ability_modifier(1), -5);
        assert_eq!(system.ability_modifier(0), -5);
        assert_eq!(system.ability_modifier(30), 10);
    }

    #[test]
    fn proficiency_bonus_progression() {
        let system = Dnd5eSystem::new();
        assert_eq!(system.proficiency_bonus(1), 2);
        assert_eq!(system.proficiency_bonus(4), 2);
        assert_eq!(system.proficiency_bonus(5), 3);
        assert_eq!(system.proficiency_bonus(8), 3);
        assert_eq!(system.proficiency_bonus(9), 4);
        assert_eq!(system.proficiency_bonus(13), 5);
        assert_eq!(system.proficiency_bonus(17), 6);
        assert_eq!(system.proficiency_bonus(20), 6);
    }

    #[test]
    fn level_thresholds_belong_to_upper_level() {
        assert_eq!(level_from_xp(0), 1);
        assert_eq!(level_from_xp(299), 1);
        assert_eq!(level_from_xp(300), 2);
        assert_eq!(level_from_xp(899), 2);
        assert_eq!(level_from_xp(900), 3);
        assert_eq!(level_from_xp(354_999), 19);
        assert_eq!(level_from_xp(355_000), 20);
        assert_eq!(level_from_xp(u32::MAX), 20);
    }

    #[test]
    fn level_is_monotonic() {
        let mut previous = 1;
        for xp in (0..400_000).step_by(250) {
            let level = level_from_xp(xp);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn xp_for_level_outside_range_is_zero() {
        assert_eq!(xp_for_level(0), 0);
        assert_eq!(xp_for_level(1), 0);
        assert_eq!(xp_for_level(5), 6500);
        assert_eq!(xp_for_level(21), 0);
    }

    #[test]
    fn xp_progress_between_levels() {
        let system = Dnd5eSystem::new();
        let progress = system.xp_progress(600);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.current_level_xp, 300);
        assert_eq!(progress.next_level_xp, Some(900));
        assert!((progress.progress_percent - 50.0).abs() < 1e-9);

        let capped = system.xp_progress(400_000);
        assert_eq!(capped.level, 20);
        assert!(capped.is_max_level());
        assert!((capped.progress_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn skill_modifier_with_proficiency_and_override() {
        let system = Dnd5eSystem::new();
        let mut c = create_test_character();
        c.set_ability_score(Ability::Wisdom, 14);
        assert_eq!(system.skill_modifier(&c, Skill::Perception), 2);
        assert_eq!(system.passive_perception(&c), 12);

        c.toggle_skill_proficiency(Skill::Perception);
        assert_eq!(system.skill_modifier(&c, Skill::Perception), 4);

        c.set_proficiency_bonus_override(Some(5));
        assert_eq!(system.skill_modifier(&c, Skill::Perception), 7);
        assert_eq!(system.passive_perception(&c), 17);
    }

    #[test]
    fn saving_throw_uses_save_proficiency() {
        let system = Dnd5eSystem::new();
        let mut c = create_test_character();
        c.set_ability_score(Ability::Constitution, 16);
        c.set_experience_points(6500);
        assert_eq!(system.saving_throw_modifier(&c, Ability::Constitution), 3);
        c.toggle_save_proficiency(Ability::Constitution);
        assert_eq!(system.saving_throw_modifier(&c, Ability::Constitution), 6);
    }

    #[test]
    fn every_skill_maps_to_an_ability() {
        assert_eq!(skill_ability(Skill::Athletics), Ability::Strength);
        assert_eq!(skill_ability(Skill::Stealth), Ability::Dexterity);
        assert_eq!(skill_ability(Skill::Arcana), Ability::Intelligence);
        assert_eq!(skill_ability(Skill::Survival), Ability::Wisdom);
        assert_eq!(skill_ability(Skill::Persuasion), Ability::Charisma);
        let strength_skills = Skill::ALL
            .iter()
            .filter(|s| skill_ability(**s) == Ability::Strength)
            .count();
        assert_eq!(strength_skills, 1);
    }

    #[test]
    fn hit_die_by_class() {
        let system = Dnd5eSystem::new();
        assert_eq!(system.hit_die(CharacterClass::Barbarian), 12);
        assert_eq!(system.hit_die(CharacterClass::Fighter), 10);
        assert_eq!(system.hit_die(CharacterClass::Rogue), 8);
        assert_eq!(system.hit_die(CharacterClass::Wizard), 6);
    }

    fn carrying(weight: f64) -> Character {
        let mut c = create_test_character();
        if weight > 0.0 {
            c.add_item(InventoryItem::new("Load", weight, 1).unwrap());
        }
        c
    }

    #[test]
    fn encumbrance_boundaries_are_strict() {
        let system = Dnd5eSystem::new();
        let cases = [
            (0.0, EncumbranceTier::Normal),
            (50.0, EncumbranceTier::Normal),
            (51.0, EncumbranceTier::LightlyEncumbered),
            (100.0, EncumbranceTier::LightlyEncumbered),
            (101.0, EncumbranceTier::HeavilyEncumbered),
            (150.0, EncumbranceTier::HeavilyEncumbered),
            (151.0, EncumbranceTier::OverLimit),
        ];
        for (weight, tier) in cases {
            let result = system.encumbrance(&carrying(weight));
            assert_eq!(result.tier, tier, "weight {}", weight);
            assert!((result.capacity - 150.0).abs() < f64::EPSILON);
        }
        let over = system.encumbrance(&carrying(300.0));
        assert!((over.load_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn encumbrance_sums_quantities() {
        let system = Dnd5eSystem::new();
        let mut c = create_test_character();
        c.add_item(InventoryItem::new("Torch", 1.0, 10).unwrap());
        c.add_item(InventoryItem::new("Rope", 5.0, 2).unwrap());
        let result = system.encumbrance(&c);
        assert!((result.total_weight - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn encumbrance_with_zero_strength() {
        let system = Dnd5eSystem::new();
        let mut c = carrying(1.0);
        c.set_ability_score(Ability::Strength, 0);
        let result = system.encumbrance(&c);
        assert_eq!(result.tier, EncumbranceTier::OverLimit);
        assert!((result.load_percent - 100.0).abs() < f64::EPSILON);

        let empty = system.encumbrance(&{
            let mut c = create_test_character();
            c.set_ability_score(Ability::Strength, 0);
            c
        });
        assert_eq!(empty.tier, EncumbranceTier::Normal);
        assert!(empty.load_percent.abs() < f64::EPSILON);
    }

    #[test]
    fn spellcasting_disabled_for_martial_classes() {
        let system = Dnd5eSystem::new();
        let c = create_test_character();
        let stats = system.spell_statistics(&c, RuleOptions::standard());
        assert!(!stats.enabled);
        assert_eq!(stats.save_dc, None);
        assert_eq!(stats.save_dc_display(), NOT_APPLICABLE);
        assert_eq!(stats.attack_bonus_display(), NOT_APPLICABLE);
    }

    #[test]
    fn simplified_rules_enable_everyone() {
        let system = Dnd5eSystem::new();
        let c = create_test_character();
        let config = system.spellcasting_config(&c, RuleOptions::simplified());
        assert!(config.enabled);
        assert_eq!(config.ability, Ability::Intelligence);
    }

    #[test]
    fn wizard_spell_statistics() {
        let system = Dnd5eSystem::new();
        let mut c = character_with(CharacterClass::Wizard, None, 0);
        c.set_ability_score(Ability::Intelligence, 16);
        let stats = system.spell_statistics(&c, RuleOptions::standard());
        assert_eq!(stats.ability, Ability::Intelligence);
        assert_eq!(stats.save_dc, Some(13));
        assert_eq!(stats.attack_bonus_display(), "+5");
    }

    #[test]
    fn overrides_win_unconditionally() {
        let system = Dnd5eSystem::new();
        let mut c = character_with(CharacterClass::Cleric, None, 0);
        c.set_spellcasting_ability_override(Some(Ability::Charisma));
        c.set_ability_score(Ability::Charisma, 18);
        let stats = system.spell_statistics(&c, RuleOptions::standard());
        assert_eq!(stats.ability, Ability::Charisma);
        assert_eq!(stats.save_dc, Some(14));

        c.set_spell_save_dc_override(Some(20));
        c.set_spell_attack_bonus_override(Some(Modifier::new(-1)));
        c.set_ability_score(Ability::Charisma, 8);
        let stats = system.spell_statistics(&c, RuleOptions::standard());
        assert_eq!(stats.save_dc, Some(20));
        assert_eq!(stats.attack_bonus_display(), "-1");
    }

    #[test]
    fn hybrid_casters_use_intelligence() {
        let system = Dnd5eSystem::new();
        let c = character_with(CharacterClass::Fighter, Some(Subclass::EldritchKnight), 900);
        let config = system.spellcasting_config(&c, RuleOptions::standard());
        assert!(config.enabled);
        assert_eq!(config.ability, Ability::Intelligence);
        assert_eq!(
            system.caster_type(CharacterClass::Fighter, Some(Subclass::EldritchKnight)),
            Some(CasterType::Third)
        );

        let champion = character_with(CharacterClass::Fighter, Some(Subclass::Champion), 900);
        assert!(!system.spellcasting_config(&champion, RuleOptions::standard()).enabled);
        assert_eq!(system.caster_type(CharacterClass::Fighter, None), None);
        assert_eq!(
            system.caster_type(CharacterClass::Warlock, None),
            Some(CasterType::Pact)
        );
    }

    #[test]
    fn companion_requires_level_three_beast_master() {
        let system = Dnd5eSystem::new();
        let mut c = character_with(CharacterClass::Ranger, Some(Subclass::BeastMaster), 300);
        c.companion_mut();
        assert!(!system.companion_visible(&c));
        assert!(system.companion_stats(&c).is_none());

        c.set_experience_points(900);
        assert!(system.companion_visible(&c));

        let hunter = character_with(CharacterClass::Ranger, Some(Subclass::Hunter), 900);
        assert!(!system.companion_visible(&hunter));
    }

    #[test]
    fn companion_borrows_owner_proficiency() {
        let system = Dnd5eSystem::new();
        let mut c = character_with(CharacterClass::Ranger, Some(Subclass::BeastMaster), 6500);
        c.toggle_companion_skill(Skill::Stealth);

        let stats = system.companion_stats(&c).unwrap();
        assert_eq!(stats.proficiency_bonus, 3);
        // Wolf: DEX 15, INT 3
        assert_eq!(stats.ability_modifiers[&Ability::Dexterity], 2);
        assert_eq!(stats.saving_throws[&Ability::Intelligence], -4 + 3);
        assert_eq!(stats.skills[&Skill::Stealth], 5);
        assert_eq!(stats.skills[&Skill::Acrobatics], 2);
        assert_eq!(stats.initiative, 2);
        assert_eq!(stats.armor_class, 13);

        c.set_proficiency_bonus_override(Some(6));
        let stats = system.companion_stats(&c).unwrap();
        assert_eq!(stats.skills[&Skill::Stealth], 8);
    }

    #[test]
    fn visible_without_companion_record_has_no_stats() {
        let system = Dnd5eSystem::new();
        let c = character_with(CharacterClass::Ranger, Some(Subclass::BeastMaster), 900);
        assert!(system.companion_visible(&c));
        assert!(system.companion_stats(&c).is_none());
    }
}
