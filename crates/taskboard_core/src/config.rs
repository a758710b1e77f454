//! Environment-driven configuration.
//!
//! # Responsibility
//! - Resolve database path, logging and seeding settings from
//!   `TASKBOARD_*` variables with defaults.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - Invalid values are reported, never silently replaced by defaults.

use crate::logging::normalize_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "TASKBOARD_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "TASKBOARD_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "TASKBOARD_LOG_DIR";
pub const SEED_VAR: &str = "TASKBOARD_SEED";

const DEFAULT_DB_FILE_NAME: &str = "taskboard.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    InvalidBool { var: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::InvalidBool { var, value } => {
                write!(f, "{var} must be true|false, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Core runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    /// Explicitly configured level, already normalized.
    pub log_level: Option<&'static str>,
    /// Rolling log directory; `None` keeps logs off the filesystem.
    pub log_dir: Option<String>,
    /// Whether the default user/todo are seeded at startup.
    pub seed: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_level: None,
            log_dir: None,
            seed: true,
        }
    }
}

impl CoreConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_VAR) {
            config.set_log_level(&level)?;
        }
        config.log_dir = read(LOG_DIR_VAR);
        if let Some(seed) = read(SEED_VAR) {
            config.seed = parse_bool(SEED_VAR, &seed)?;
        }
        Ok(config)
    }

    /// Overrides the log level, validating it first.
    pub fn set_log_level(&mut self, level: &str) -> Result<(), ConfigError> {
        self.log_level = Some(normalize_level(level).map_err(ConfigError::InvalidLogLevel)?);
        Ok(())
    }
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, DB_PATH_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR, SEED_VAR};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = CoreConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert!(config.seed);
        assert!(config.db_path.ends_with("taskboard.sqlite3"));
    }

    #[test]
    fn values_are_trimmed_and_blank_means_unset() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (DB_PATH_VAR, " /var/lib/taskboard.db "),
            (LOG_LEVEL_VAR, "WARNING"),
            (LOG_DIR_VAR, "   "),
            (SEED_VAR, "off"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/var/lib/taskboard.db"));
        assert_eq!(config.log_level, Some("warn"));
        assert_eq!(config.log_dir, None);
        assert!(!config.seed);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = CoreConfig::from_lookup(lookup_from(&[(SEED_VAR, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBool { var: SEED_VAR, .. }));

        let err = CoreConfig::from_lookup(lookup_from(&[(LOG_LEVEL_VAR, "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }
}
