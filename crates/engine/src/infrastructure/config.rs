//! Engine configuration from environment variables.

use std::time::Duration;

use chronicle_domain::RuleOptions;

pub const DATABASE_URL_VAR: &str = "CHRONICLE_DATABASE_URL";
pub const AUTOSAVE_DELAY_VAR: &str = "CHRONICLE_AUTOSAVE_DELAY_MS";
pub const SIMPLIFIED_RULES_VAR: &str = "CHRONICLE_SIMPLIFIED_RULES";

const DEFAULT_DATABASE_URL: &str = "sqlite:chronicle.db?mode=rwc";
const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub database_url: String,
    /// Quiet period after the last edit before a snapshot is written.
    pub autosave_delay: Duration,
    pub rules: RuleOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            autosave_delay: Duration::from_millis(DEFAULT_AUTOSAVE_DELAY_MS),
            rules: RuleOptions::standard(),
        }
    }
}

impl EngineConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let database_url = lookup(DATABASE_URL_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.database_url);

        let autosave_delay = match lookup(AUTOSAVE_DELAY_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(e) => {
                    tracing::warn!(
                        value = %raw,
                        error = %e,
                        "Invalid {}, using default of {}ms",
                        AUTOSAVE_DELAY_VAR,
                        DEFAULT_AUTOSAVE_DELAY_MS
                    );
                    defaults.autosave_delay
                }
            },
            None => defaults.autosave_delay,
        };

        let simplified_rules = match lookup(SIMPLIFIED_RULES_VAR) {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Invalid {}, rules stay standard", SIMPLIFIED_RULES_VAR);
                false
            }),
            None => false,
        };

        Self {
            database_url,
            autosave_delay,
            rules: RuleOptions { simplified_rules },
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
