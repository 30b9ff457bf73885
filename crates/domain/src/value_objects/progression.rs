use serde::{Deserialize, Serialize};

/// Where a character stands between its current and next level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpProgress {
    pub level: u8,
    /// Experience required to reach the current level.
    pub current_level_xp: u32,
    /// Experience required for the next level, absent at level 20.
    pub next_level_xp: Option<u32>,
    /// 0.0..=100.0, and 100.0 at level 20.
    pub progress_percent: f64,
}

impl XpProgress {
    pub fn is_max_level(&self) -> bool {
        self.next_level_xp.is_none()
    }
}
