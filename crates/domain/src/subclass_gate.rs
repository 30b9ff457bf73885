//! Subclass unlock gate.
//!
//! A character that reaches its class's subclass level without a subclass
//! gets one prompt per level. The tracker holding which prompts were already
//! shown belongs to the session that renders the character.

use std::collections::HashSet;

use crate::aggregates::Character;
use crate::ids::CharacterId;
use crate::value_objects::RuleOptions;

/// Where a character stands with respect to its subclass choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubclassGate {
    /// Below the choice level, or no subclass yet and already prompted.
    NoSubclass,
    /// Eligible and not yet prompted at this level.
    PromptPending,
    SubclassChosen,
}

/// Remembers which (character, level) pairs have already been prompted.
#[derive(Debug, Clone, Default)]
pub struct SubclassPromptTracker {
    prompted: HashSet<(CharacterId, u8)>,
}

impl SubclassPromptTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gate state without recording anything.
    pub fn state(&self, character: &Character, options: RuleOptions) -> SubclassGate {
        if character.subclass().is_some() {
            return SubclassGate::SubclassChosen;
        }
        if options.simplified_rules
            || character.level() < character.class().subclass_choice_level()
            || self.was_prompted(character.id(), character.level())
        {
            return SubclassGate::NoSubclass;
        }
        SubclassGate::PromptPending
    }

    /// Returns `true` exactly once per (character, level) while a prompt is
    /// pending, and records the prompt as shown.
    ///
    /// Under simplified rules the prompt never opens on its own. Seeing a
    /// character with a subclass forgets its earlier prompts.
    pub fn evaluate(&mut self, character: &Character, options: RuleOptions) -> bool {
        match self.state(character, options) {
            SubclassGate::PromptPending => {
                self.prompted.insert((character.id(), character.level()))
            }
            SubclassGate::SubclassChosen => {
                self.reset(character.id());
                false
            }
            SubclassGate::NoSubclass => false,
        }
    }

    pub fn was_prompted(&self, id: CharacterId, level: u8) -> bool {
        self.prompted.contains(&(id, level))
    }

    /// Forget every prompt shown for a character.
    pub fn reset(&mut self, id: CharacterId) {
        self.prompted.retain(|(character_id, _)| *character_id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_systems::{CharacterClass, Subclass};
    use crate::value_objects::CharacterName;

    fn fighter_at(xp: u32) -> Character {
        let mut c = Character::new(CharacterName::new("Gate Tester").unwrap());
        c.set_experience_points(xp);
        c
    }

    #[test]
    fn below_choice_level_never_prompts() {
        let mut tracker = SubclassPromptTracker::new();
        let c = fighter_at(300);
        assert_eq!(
            tracker.state(&c, RuleOptions::standard()),
            SubclassGate::NoSubclass
        );
        assert!(!tracker.evaluate(&c, RuleOptions::standard()));
    }

    #[test]
    fn prompts_once_per_level() {
        let mut tracker = SubclassPromptTracker::new();
        let mut c = fighter_at(900);
        assert_eq!(
            tracker.state(&c, RuleOptions::standard()),
            SubclassGate::PromptPending
        );
        assert!(tracker.evaluate(&c, RuleOptions::standard()));
        assert!(!tracker.evaluate(&c, RuleOptions::standard()));

        c.set_experience_points(2700);
        assert!(tracker.evaluate(&c, RuleOptions::standard()));
        assert!(!tracker.evaluate(&c, RuleOptions::standard()));
    }

    #[test]
    fn early_casters_prompt_at_level_one() {
        let mut tracker = SubclassPromptTracker::new();
        let mut c = fighter_at(0);
        c.set_class(CharacterClass::Cleric);
        assert!(tracker.evaluate(&c, RuleOptions::standard()));
    }

    #[test]
    fn chosen_subclass_is_terminal() {
        let mut tracker = SubclassPromptTracker::new();
        let mut c = fighter_at(900);
        c.choose_subclass(Subclass::BattleMaster).unwrap();
        assert_eq!(
            tracker.state(&c, RuleOptions::standard()),
            SubclassGate::SubclassChosen
        );
        assert!(!tracker.evaluate(&c, RuleOptions::standard()));
    }

    #[test]
    fn simplified_rules_suppress_prompt() {
        let mut tracker = SubclassPromptTracker::new();
        let c = fighter_at(900);
        assert!(!tracker.evaluate(&c, RuleOptions::simplified()));
        assert!(!tracker.was_prompted(c.id(), 3));
    }

    #[test]
    fn losing_subclass_after_reset_prompts_again() {
        let mut tracker = SubclassPromptTracker::new();
        let mut c = fighter_at(900);
        assert!(tracker.evaluate(&c, RuleOptions::standard()));

        c.choose_subclass(Subclass::Champion).unwrap();
        tracker.reset(c.id());
        c.set_class(CharacterClass::Rogue);
        assert!(c.subclass().is_none());
        assert!(tracker.evaluate(&c, RuleOptions::standard()));
    }

    #[test]
    fn observing_a_subclass_rearms_the_prompt() {
        let mut tracker = SubclassPromptTracker::new();
        let mut c = fighter_at(900);
        assert!(tracker.evaluate(&c, RuleOptions::standard()));

        c.choose_subclass(Subclass::Champion).unwrap();
        assert!(!tracker.evaluate(&c, RuleOptions::standard()));
        assert!(!tracker.was_prompted(c.id(), 3));

        c.set_class(CharacterClass::Monk);
        assert_eq!(
            tracker.state(&c, RuleOptions::standard()),
            SubclassGate::PromptPending
        );
        assert!(tracker.evaluate(&c, RuleOptions::standard()));
    }

    #[test]
    fn prompts_are_tracked_per_character() {
        let mut tracker = SubclassPromptTracker::new();
        let first = fighter_at(900);
        let second = fighter_at(900);
        assert!(tracker.evaluate(&first, RuleOptions::standard()));
        assert!(tracker.evaluate(&second, RuleOptions::standard()));
        tracker.reset(first.id());
        assert!(!tracker.was_prompted(first.id(), 3));
        assert!(tracker.was_prompted(second.id(), 3));
    }
}
