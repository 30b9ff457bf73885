//! Hit points and death saving throws.

use serde::{Deserialize, Serialize};

/// Number of marks on each side of the death save track.
pub const DEATH_SAVE_MARKS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitPoints {
    #[serde(default)]
    pub current: i32,
    #[serde(default)]
    pub max: i32,
    #[serde(default)]
    pub temp: i32,
}

impl HitPoints {
    pub fn full(max: i32) -> Self {
        Self {
            current: max,
            max,
            temp: 0,
        }
    }
}

impl Default for HitPoints {
    fn default() -> Self {
        Self::full(10)
    }
}

/// Which side of the death save track a mark belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathSaveKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathStatus {
    Stable,
    /// Two failures marked; one more is fatal.
    NearlyDead,
    Dead,
}

/// Death saving throw track. Both counters stay within 0..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeathSaves {
    #[serde(default)]
    successes: u8,
    #[serde(default)]
    failures: u8,
}

impl DeathSaves {
    pub fn new(successes: u8, failures: u8) -> Self {
        Self {
            successes: successes.min(DEATH_SAVE_MARKS),
            failures: failures.min(DEATH_SAVE_MARKS),
        }
    }

    pub fn successes(&self) -> u8 {
        self.successes
    }

    pub fn failures(&self) -> u8 {
        self.failures
    }

    pub fn set(&mut self, kind: DeathSaveKind, count: u8) {
        let count = count.min(DEATH_SAVE_MARKS);
        match kind {
            DeathSaveKind::Success => self.successes = count,
            DeathSaveKind::Failure => self.failures = count,
        }
    }

    /// Click on the mark at `index` (1-based).
    ///
    /// Clicking the highest filled mark clears it; clicking any other mark
    /// fills the track up to that mark.
    pub fn toggle(&mut self, kind: DeathSaveKind, index: u8) {
        let current = match kind {
            DeathSaveKind::Success => self.successes,
            DeathSaveKind::Failure => self.failures,
        };
        let next = if index == current {
            index.saturating_sub(1)
        } else {
            index
        };
        self.set(kind, next);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn status(&self) -> DeathStatus {
        match self.failures {
            f if f >= DEATH_SAVE_MARKS => DeathStatus::Dead,
            2 => DeathStatus::NearlyDead,
            _ => DeathStatus::Stable,
        }
    }
}
