//! Character aggregate - the root of a character sheet
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: `level` can only change through experience, so it
//!   always matches the threshold table
//! - **Newtypes**: `CharacterName`, `AbilityScores`, `DeathSaves`
//! - **Validate before mutate**: every fallible operation checks its input
//!   first and leaves the character untouched on error
//! - **Serde via wire format**: the stored `level` is ignored on read and
//!   recomputed from experience points

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

use crate::entities::{
    check_slot_level, Companion, InventoryItem, Spell, SpellSlotPool, Weapon,
};
use crate::error::DomainError;
use crate::game_systems::{level_from_xp, CharacterClass, Subclass};
use crate::ids::{lenient_id, CharacterId, ItemId, SpellId};
use crate::value_objects::{
    Ability, AbilityScores, CharacterName, DeathSaveKind, DeathSaves, HitPoints, Modifier, Skill,
    SpellcastingConfig,
};

/// Skill, save, language and tool proficiencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proficiencies {
    #[serde(default)]
    pub skills: BTreeSet<Skill>,
    /// Reserved; expertise does not change any derived value yet.
    #[serde(default)]
    pub expertise: BTreeSet<Skill>,
    #[serde(default)]
    pub saves: BTreeSet<Ability>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

impl Default for Proficiencies {
    fn default() -> Self {
        Self {
            skills: BTreeSet::new(),
            expertise: BTreeSet::new(),
            saves: BTreeSet::new(),
            languages: vec!["Common".to_string()],
            tools: Vec::new(),
        }
    }
}

/// Free-text personality and history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Biography {
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub ideals: String,
    #[serde(default)]
    pub bonds: String,
    #[serde(default)]
    pub flaws: String,
    #[serde(default)]
    pub backstory: String,
}

/// A player character sheet.
///
/// # Invariants
///
/// - `level` always equals the level reached with `experience_points`
/// - `subclass`, when set, belongs to `class`
/// - ability scores stay within 0..=30
/// - spell slot pools never have more used slots than total slots
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    id: CharacterId,
    name: CharacterName,
    level: u8,
    experience_points: u32,
    class: CharacterClass,
    subclass: Option<Subclass>,
    race: String,
    background: String,
    alignment: String,
    inspiration: u32,
    hit_points: HitPoints,
    death_saves: DeathSaves,
    armor_class: i32,
    initiative_bonus: i32,
    speed: String,
    ability_scores: AbilityScores,
    proficiency_bonus_override: Option<i32>,
    proficiencies: Proficiencies,
    biography: Biography,
    inventory: Vec<InventoryItem>,
    weapons: Vec<Weapon>,
    spells: Vec<Spell>,
    spell_slots: BTreeMap<u8, SpellSlotPool>,
    spellcasting_ability_override: Option<Ability>,
    spell_save_dc_override: Option<i32>,
    spell_attack_bonus_override: Option<Modifier>,
    totem_animal: Option<String>,
    fighting_styles: Vec<String>,
    companion: Option<Companion>,
}

impl Character {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a level 1 Fighter with every ability at 10.
    pub fn new(name: CharacterName) -> Self {
        Self {
            id: CharacterId::new(),
            name,
            level: 1,
            experience_points: 0,
            class: CharacterClass::Fighter,
            subclass: None,
            race: String::new(),
            background: String::new(),
            alignment: String::new(),
            inspiration: 0,
            hit_points: HitPoints::full(10),
            death_saves: DeathSaves::default(),
            armor_class: 10,
            initiative_bonus: 0,
            speed: "9m".to_string(),
            ability_scores: AbilityScores::default(),
            proficiency_bonus_override: None,
            proficiencies: Proficiencies::default(),
            biography: Biography::default(),
            inventory: Vec::new(),
            weapons: Vec::new(),
            spells: Vec::new(),
            spell_slots: BTreeMap::new(),
            spellcasting_ability_override: None,
            spell_save_dc_override: None,
            spell_attack_bonus_override: None,
            totem_animal: None,
            fighting_styles: Vec::new(),
            companion: None,
        }
    }

    // =========================================================================
    // Identity Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    #[inline]
    pub fn race(&self) -> &str {
        &self.race
    }

    #[inline]
    pub fn background(&self) -> &str {
        &self.background
    }

    #[inline]
    pub fn alignment(&self) -> &str {
        &self.alignment
    }

    #[inline]
    pub fn biography(&self) -> &Biography {
        &self.biography
    }

    // =========================================================================
    // Progression Accessors
    // =========================================================================

    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[inline]
    pub fn experience_points(&self) -> u32 {
        self.experience_points
    }

    #[inline]
    pub fn class(&self) -> CharacterClass {
        self.class
    }

    #[inline]
    pub fn subclass(&self) -> Option<Subclass> {
        self.subclass
    }

    #[inline]
    pub fn ability_scores(&self) -> &AbilityScores {
        &self.ability_scores
    }

    #[inline]
    pub fn proficiency_bonus_override(&self) -> Option<i32> {
        self.proficiency_bonus_override
    }

    #[inline]
    pub fn proficiencies(&self) -> &Proficiencies {
        &self.proficiencies
    }

    pub fn is_proficient_in_skill(&self, skill: Skill) -> bool {
        self.proficiencies.skills.contains(&skill)
    }

    pub fn is_proficient_in_save(&self, ability: Ability) -> bool {
        self.proficiencies.saves.contains(&ability)
    }

    #[inline]
    pub fn totem_animal(&self) -> Option<&str> {
        self.totem_animal.as_deref()
    }

    #[inline]
    pub fn fighting_styles(&self) -> &[String] {
        &self.fighting_styles
    }

    // =========================================================================
    // Combat Accessors
    // =========================================================================

    #[inline]
    pub fn inspiration(&self) -> u32 {
        self.inspiration
    }

    #[inline]
    pub fn hit_points(&self) -> HitPoints {
        self.hit_points
    }

    #[inline]
    pub fn death_saves(&self) -> DeathSaves {
        self.death_saves
    }

    #[inline]
    pub fn armor_class(&self) -> i32 {
        self.armor_class
    }

    #[inline]
    pub fn initiative_bonus(&self) -> i32 {
        self.initiative_bonus
    }

    #[inline]
    pub fn speed(&self) -> &str {
        &self.speed
    }

    #[inline]
    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    // =========================================================================
    // Inventory & Spell Accessors
    // =========================================================================

    #[inline]
    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    #[inline]
    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    #[inline]
    pub fn spell_slots(&self) -> &BTreeMap<u8, SpellSlotPool> {
        &self.spell_slots
    }

    #[inline]
    pub fn spellcasting_ability_override(&self) -> Option<Ability> {
        self.spellcasting_ability_override
    }

    #[inline]
    pub fn spell_save_dc_override(&self) -> Option<i32> {
        self.spell_save_dc_override
    }

    #[inline]
    pub fn spell_attack_bonus_override(&self) -> Option<Modifier> {
        self.spell_attack_bonus_override
    }

    #[inline]
    pub fn companion(&self) -> Option<&Companion> {
        self.companion.as_ref()
    }

    // =========================================================================
    // Progression Mutations
    // =========================================================================

    /// Replace the id, e.g. when a document is imported as a new character.
    pub fn assign_id(&mut self, id: CharacterId) {
        self.id = id;
    }

    pub fn set_name(&mut self, name: CharacterName) {
        self.name = name;
    }

    /// Set experience points and recompute the level.
    pub fn set_experience_points(&mut self, xp: u32) {
        self.experience_points = xp;
        self.level = level_from_xp(xp);
    }

    /// Add experience points (saturating) and recompute the level.
    pub fn add_experience(&mut self, amount: u32) {
        self.set_experience_points(self.experience_points.saturating_add(amount));
    }

    /// Set one ability score, clamped into 0..=30.
    pub fn set_ability_score(&mut self, ability: Ability, score: i32) {
        self.ability_scores.set(ability, score);
    }

    pub fn set_proficiency_bonus_override(&mut self, bonus: Option<i32>) {
        self.proficiency_bonus_override = bonus;
    }

    /// Flip a skill proficiency. Returns whether the skill is now proficient.
    pub fn toggle_skill_proficiency(&mut self, skill: Skill) -> bool {
        toggle(&mut self.proficiencies.skills, skill)
    }

    /// Flip a saving throw proficiency. Returns whether the save is now proficient.
    pub fn toggle_save_proficiency(&mut self, ability: Ability) -> bool {
        toggle(&mut self.proficiencies.saves, ability)
    }

    /// Change class.
    ///
    /// Clears a subclass the new class does not offer, fighting styles unless
    /// the new class is Fighter, and the totem animal unless it is Barbarian.
    pub fn set_class(&mut self, class: CharacterClass) {
        self.class = class;
        if self
            .subclass
            .is_some_and(|subclass| !class.allows_subclass(subclass))
        {
            self.subclass = None;
        }
        if class != CharacterClass::Fighter {
            self.fighting_styles.clear();
        }
        if class != CharacterClass::Barbarian {
            self.totem_animal = None;
        }
    }

    /// Choose a subclass for the current class.
    ///
    /// Choosing any subclass other than Totem Warrior clears the totem animal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the class does not offer the
    /// subclass. The character is left unchanged.
    pub fn choose_subclass(&mut self, subclass: Subclass) -> Result<(), DomainError> {
        check_subclass(self.class, subclass)?;
        self.subclass = Some(subclass);
        if subclass != Subclass::TotemWarrior {
            self.totem_animal = None;
        }
        Ok(())
    }

    pub fn clear_subclass(&mut self) {
        self.subclass = None;
        self.totem_animal = None;
    }

    /// # Errors
    ///
    /// Returns `DomainError::Constraint` unless the character is a Barbarian.
    pub fn set_totem_animal(&mut self, animal: Option<String>) -> Result<(), DomainError> {
        if animal.is_some() && self.class != CharacterClass::Barbarian {
            return Err(DomainError::constraint(
                "only barbarians can choose a totem animal",
            ));
        }
        self.totem_animal = animal;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DomainError::Constraint` unless the character is a Fighter.
    pub fn set_fighting_styles(&mut self, styles: Vec<String>) -> Result<(), DomainError> {
        if !styles.is_empty() && self.class != CharacterClass::Fighter {
            return Err(DomainError::constraint(
                "only fighters can choose fighting styles",
            ));
        }
        self.fighting_styles = styles;
        Ok(())
    }

    // =========================================================================
    // Combat Mutations
    // =========================================================================

    pub fn set_hit_points(&mut self, hit_points: HitPoints) {
        self.hit_points = hit_points;
    }

    pub fn toggle_death_save(&mut self, kind: DeathSaveKind, index: u8) {
        self.death_saves.toggle(kind, index);
    }

    pub fn reset_death_saves(&mut self) {
        self.death_saves.reset();
    }

    pub fn add_weapon(&mut self, weapon: Weapon) {
        self.weapons.push(weapon);
    }

    pub fn remove_weapon(&mut self, index: usize) -> Option<Weapon> {
        (index < self.weapons.len()).then(|| self.weapons.remove(index))
    }

    // =========================================================================
    // Inventory Mutations
    // =========================================================================

    /// Append an item at the end of the inventory.
    pub fn add_item(&mut self, item: InventoryItem) {
        self.inventory.push(item);
    }

    /// # Errors
    ///
    /// Returns `DomainError::NotFound` when no item has that id.
    pub fn remove_item(&mut self, item_id: ItemId) -> Result<InventoryItem, DomainError> {
        let index = self
            .inventory
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| DomainError::not_found("InventoryItem", item_id.to_string()))?;
        Ok(self.inventory.remove(index))
    }

    /// Flip the equipped flag. Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` when no item has that id.
    pub fn toggle_equipped(&mut self, item_id: ItemId) -> Result<bool, DomainError> {
        let item = self
            .inventory
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| DomainError::not_found("InventoryItem", item_id.to_string()))?;
        item.equipped = !item.equipped;
        Ok(item.equipped)
    }

    // =========================================================================
    // Spell Mutations
    // =========================================================================

    /// Add a spell. Ignored while spellcasting is disabled.
    ///
    /// Returns whether the spell was added.
    pub fn add_spell(&mut self, spell: Spell, casting: &SpellcastingConfig) -> bool {
        if !casting.enabled {
            return false;
        }
        self.spells.push(spell);
        true
    }

    /// # Errors
    ///
    /// Returns `DomainError::NotFound` when no spell has that id.
    pub fn remove_spell(&mut self, spell_id: SpellId) -> Result<Spell, DomainError> {
        let index = self
            .spells
            .iter()
            .position(|spell| spell.id == spell_id)
            .ok_or_else(|| DomainError::not_found("Spell", spell_id.to_string()))?;
        Ok(self.spells.remove(index))
    }

    /// Flip the prepared flag. Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` when no spell has that id.
    pub fn toggle_spell_prepared(&mut self, spell_id: SpellId) -> Result<bool, DomainError> {
        let spell = self
            .spells
            .iter_mut()
            .find(|spell| spell.id == spell_id)
            .ok_or_else(|| DomainError::not_found("Spell", spell_id.to_string()))?;
        spell.prepared = !spell.prepared;
        Ok(spell.prepared)
    }

    /// Use one slot of `level`, creating a two-slot pool on first use.
    ///
    /// A no-op returning `Ok(false)` while spellcasting is disabled.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` when `level` is outside 1..=9.
    pub fn expend_spell_slot(
        &mut self,
        level: u8,
        casting: &SpellcastingConfig,
    ) -> Result<bool, DomainError> {
        self.edit_slot_pool(level, casting, SpellSlotPool::expend)
    }

    /// Give back one used slot of `level`.
    ///
    /// A no-op returning `Ok(false)` while spellcasting is disabled.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` when `level` is outside 1..=9.
    pub fn recover_spell_slot(
        &mut self,
        level: u8,
        casting: &SpellcastingConfig,
    ) -> Result<bool, DomainError> {
        self.edit_slot_pool(level, casting, SpellSlotPool::recover)
    }

    /// Set the slot total for `level`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` when `level` is outside 1..=9.
    pub fn set_spell_slot_total(
        &mut self,
        level: u8,
        total: u8,
        casting: &SpellcastingConfig,
    ) -> Result<bool, DomainError> {
        self.edit_slot_pool(level, casting, |pool| pool.set_total(total))
    }

    /// Restore every used slot.
    pub fn restore_spell_slots(&mut self) {
        self.spell_slots.values_mut().for_each(SpellSlotPool::restore);
    }

    fn edit_slot_pool(
        &mut self,
        level: u8,
        casting: &SpellcastingConfig,
        edit: impl FnOnce(&mut SpellSlotPool),
    ) -> Result<bool, DomainError> {
        check_slot_level(level)?;
        if !casting.enabled {
            return Ok(false);
        }
        edit(self.spell_slots.entry(level).or_default());
        Ok(true)
    }

    pub fn set_spellcasting_ability_override(&mut self, ability: Option<Ability>) {
        self.spellcasting_ability_override = ability;
    }

    pub fn set_spell_save_dc_override(&mut self, dc: Option<i32>) {
        self.spell_save_dc_override = dc;
    }

    pub fn set_spell_attack_bonus_override(&mut self, bonus: Option<Modifier>) {
        self.spell_attack_bonus_override = bonus;
    }

    // =========================================================================
    // Companion Mutations
    // =========================================================================

    /// The companion, created from the default wolf on first access.
    pub fn companion_mut(&mut self) -> &mut Companion {
        self.companion.get_or_insert_with(Companion::default)
    }

    /// Returns whether the companion's skills changed.
    pub fn toggle_companion_skill(&mut self, skill: Skill) -> bool {
        self.companion_mut().toggle_skill(skill)
    }

    // =========================================================================
    // Partial Updates
    // =========================================================================

    /// Apply a partial update.
    ///
    /// Every field is validated before anything is written, so a rejected
    /// update leaves the character unchanged. A class change is applied
    /// before a subclass in the same update, and an experience change
    /// recomputes the level.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for an invalid name or a subclass
    /// the resulting class does not offer.
    pub fn apply_update(&mut self, update: CharacterUpdate) -> Result<(), DomainError> {
        let name = update.name.map(CharacterName::new).transpose()?;
        let target_class = update.class.unwrap_or(self.class);
        if let Some(Some(subclass)) = update.subclass {
            check_subclass(target_class, subclass)?;
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(class) = update.class {
            self.set_class(class);
        }
        match update.subclass {
            Some(Some(subclass)) => self.choose_subclass(subclass)?,
            Some(None) => self.clear_subclass(),
            None => {}
        }
        if let Some(xp) = update.experience_points {
            self.set_experience_points(xp);
        }
        if let Some(scores) = update.ability_scores {
            self.ability_scores = scores.clamped();
        }
        if let Some(bonus) = update.proficiency_bonus_override {
            self.proficiency_bonus_override = bonus;
        }
        if let Some(skills) = update.skill_proficiencies {
            self.proficiencies.skills = skills;
        }
        if let Some(saves) = update.saving_throw_proficiencies {
            self.proficiencies.saves = saves;
        }
        if let Some(languages) = update.languages {
            self.proficiencies.languages = languages;
        }
        if let Some(tools) = update.tools {
            self.proficiencies.tools = tools;
        }
        if let Some(race) = update.race {
            self.race = race;
        }
        if let Some(background) = update.background {
            self.background = background;
        }
        if let Some(alignment) = update.alignment {
            self.alignment = alignment;
        }
        if let Some(inspiration) = update.inspiration {
            self.inspiration = inspiration;
        }
        if let Some(hit_points) = update.hit_points {
            self.hit_points = hit_points;
        }
        if let Some(armor_class) = update.armor_class {
            self.armor_class = armor_class;
        }
        if let Some(initiative_bonus) = update.initiative_bonus {
            self.initiative_bonus = initiative_bonus;
        }
        if let Some(speed) = update.speed {
            self.speed = speed;
        }
        if let Some(biography) = update.biography {
            self.biography = biography;
        }
        if let Some(ability) = update.spellcasting_ability_override {
            self.spellcasting_ability_override = ability;
        }
        if let Some(dc) = update.spell_save_dc_override {
            self.spell_save_dc_override = dc;
        }
        if let Some(bonus) = update.spell_attack_bonus_override {
            self.spell_attack_bonus_override = bonus;
        }
        Ok(())
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

fn check_subclass(class: CharacterClass, subclass: Subclass) -> Result<(), DomainError> {
    if class.allows_subclass(subclass) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "{} is not a {} subclass",
            subclass, class
        )))
    }
}

// ============================================================================
// Partial Update
// ============================================================================

/// A field-level partial update from the presentation layer.
///
/// `None` leaves a field alone. Clearable fields use `Option<Option<T>>`:
/// `Some(None)` (JSON `null`) clears the value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterUpdate {
    pub name: Option<String>,
    pub class: Option<CharacterClass>,
    #[serde(deserialize_with = "double_option")]
    pub subclass: Option<Option<Subclass>>,
    pub experience_points: Option<u32>,
    pub ability_scores: Option<AbilityScores>,
    #[serde(deserialize_with = "double_option")]
    pub proficiency_bonus_override: Option<Option<i32>>,
    pub skill_proficiencies: Option<BTreeSet<Skill>>,
    pub saving_throw_proficiencies: Option<BTreeSet<Ability>>,
    pub languages: Option<Vec<String>>,
    pub tools: Option<Vec<String>>,
    pub race: Option<String>,
    pub background: Option<String>,
    pub alignment: Option<String>,
    pub inspiration: Option<u32>,
    pub hit_points: Option<HitPoints>,
    pub armor_class: Option<i32>,
    pub initiative_bonus: Option<i32>,
    pub speed: Option<String>,
    pub biography: Option<Biography>,
    #[serde(deserialize_with = "double_option")]
    pub spellcasting_ability_override: Option<Option<Ability>>,
    #[serde(deserialize_with = "double_option")]
    pub spell_save_dc_override: Option<Option<i32>>,
    #[serde(deserialize_with = "double_option")]
    pub spell_attack_bonus_override: Option<Option<Modifier>>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Intermediate format for serialization that matches the wire format
///
/// `name`, `class` and `abilityScores` are required; everything else has a
/// default so partial documents still load.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CharacterWireFormat {
    #[serde(default, deserialize_with = "lenient_id")]
    id: CharacterId,
    name: CharacterName,
    #[serde(default)]
    level: u8,
    #[serde(default)]
    experience_points: u32,
    class: CharacterClass,
    #[serde(default)]
    subclass: Option<Subclass>,
    #[serde(default)]
    race: String,
    #[serde(default)]
    background: String,
    #[serde(default)]
    alignment: String,
    #[serde(default)]
    inspiration: u32,
    #[serde(default)]
    hit_points: HitPoints,
    #[serde(default)]
    death_saves: DeathSaves,
    #[serde(default = "default_armor_class")]
    armor_class: i32,
    #[serde(default)]
    initiative_bonus: i32,
    #[serde(default)]
    speed: String,
    ability_scores: AbilityScores,
    #[serde(default)]
    proficiency_bonus_override: Option<i32>,
    #[serde(default)]
    proficiencies: Proficiencies,
    #[serde(default)]
    biography: Biography,
    #[serde(default)]
    inventory: Vec<InventoryItem>,
    #[serde(default)]
    weapons: Vec<Weapon>,
    #[serde(default)]
    spells: Vec<Spell>,
    #[serde(default)]
    spell_slots: BTreeMap<u8, SpellSlotPool>,
    #[serde(default)]
    spellcasting_ability_override: Option<Ability>,
    #[serde(default)]
    spell_save_dc_override: Option<i32>,
    #[serde(default)]
    spell_attack_bonus_override: Option<Modifier>,
    #[serde(default)]
    totem_animal: Option<String>,
    #[serde(default)]
    fighting_styles: Vec<String>,
    #[serde(default)]
    companion: Option<Companion>,
}

fn default_armor_class() -> i32 {
    10
}

impl Serialize for Character {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = CharacterWireFormat {
            id: self.id,
            name: self.name.clone(),
            level: self.level,
            experience_points: self.experience_points,
            class: self.class,
            subclass: self.subclass,
            race: self.race.clone(),
            background: self.background.clone(),
            alignment: self.alignment.clone(),
            inspiration: self.inspiration,
            hit_points: self.hit_points,
            death_saves: self.death_saves,
            armor_class: self.armor_class,
            initiative_bonus: self.initiative_bonus,
            speed: self.speed.clone(),
            ability_scores: self.ability_scores,
            proficiency_bonus_override: self.proficiency_bonus_override,
            proficiencies: self.proficiencies.clone(),
            biography: self.biography.clone(),
            inventory: self.inventory.clone(),
            weapons: self.weapons.clone(),
            spells: self.spells.clone(),
            spell_slots: self.spell_slots.clone(),
            spellcasting_ability_override: self.spellcasting_ability_override,
            spell_save_dc_override: self.spell_save_dc_override,
            spell_attack_bonus_override: self.spell_attack_bonus_override,
            totem_animal: self.totem_animal.clone(),
            fighting_styles: self.fighting_styles.clone(),
            companion: self.companion.clone(),
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Character {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = CharacterWireFormat::deserialize(deserializer)?;

        if let Some(subclass) = wire.subclass {
            check_subclass(wire.class, subclass).map_err(D::Error::custom)?;
        }

        let spell_slots = wire
            .spell_slots
            .into_iter()
            .filter(|(level, _)| check_slot_level(*level).is_ok())
            .map(|(level, pool)| (level, pool.normalized()))
            .collect();

        Ok(Character {
            id: wire.id,
            name: wire.name,
            // Stored level may be stale.
            level: level_from_xp(wire.experience_points),
            experience_points: wire.experience_points,
            class: wire.class,
            subclass: wire.subclass,
            race: wire.race,
            background: wire.background,
            alignment: wire.alignment,
            inspiration: wire.inspiration,
            hit_points: wire.hit_points,
            death_saves: DeathSaves::new(wire.death_saves.successes(), wire.death_saves.failures()),
            armor_class: wire.armor_class,
            initiative_bonus: wire.initiative_bonus,
            speed: wire.speed,
            ability_scores: wire.ability_scores.clamped(),
            proficiency_bonus_override: wire.proficiency_bonus_override,
            proficiencies: wire.proficiencies,
            biography: wire.biography,
            inventory: wire.inventory,
            weapons: wire.weapons,
            spells: wire.spells,
            spell_slots,
            spellcasting_ability_override: wire.spellcasting_ability_override,
            spell_save_dc_override: wire.spell_save_dc_override,
            spell_attack_bonus_override: wire.spell_attack_bonus_override,
            totem_animal: wire.totem_animal,
            fighting_styles: wire.fighting_styles,
            companion: wire.companion.map(Companion::normalized),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
