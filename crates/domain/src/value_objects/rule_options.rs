use serde::{Deserialize, Serialize};

/// Table-wide rule toggles that change how derived values are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOptions {
    /// Every class may cast and class features are not enforced.
    ///
    /// Spellcasting is always enabled and the subclass prompt never opens on
    /// its own.
    #[serde(default)]
    pub simplified_rules: bool,
}

impl RuleOptions {
    pub fn simplified() -> Self {
        Self {
            simplified_rules: true,
        }
    }

    pub fn standard() -> Self {
        Self::default()
    }
}
