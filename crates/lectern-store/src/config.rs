//! # Library Configuration
//!
//! Capacity ceilings for the item and patron repositories.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LECTERN_ITEM_CAPACITY=500                                          │
//! │     LECTERN_PATRON_CAPACITY=200                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/lectern/lectern.toml (Linux)                             │
//! │     ~/Library/Application Support/org.lectern.lectern/... (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     100 items, 100 patrons                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # lectern.toml
//! [items]
//! capacity = 100
//!
//! [patrons]
//! capacity = 100
//! ```

use std::path::PathBuf;

use lectern_core::{DEFAULT_ITEM_CAPACITY, DEFAULT_PATRON_CAPACITY};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

const ITEM_CAPACITY_ENV: &str = "LECTERN_ITEM_CAPACITY";
const PATRON_CAPACITY_ENV: &str = "LECTERN_PATRON_CAPACITY";

// =============================================================================
// Sections
// =============================================================================

/// Item repository settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSettings {
    /// Maximum number of stored items.
    #[serde(default = "default_item_capacity")]
    pub capacity: usize,
}

/// Patron repository settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatronSettings {
    /// Maximum number of registered patrons.
    #[serde(default = "default_patron_capacity")]
    pub capacity: usize,
}

fn default_item_capacity() -> usize {
    DEFAULT_ITEM_CAPACITY
}

fn default_patron_capacity() -> usize {
    DEFAULT_PATRON_CAPACITY
}

impl Default for ItemSettings {
    fn default() -> Self {
        ItemSettings {
            capacity: default_item_capacity(),
        }
    }
}

impl Default for PatronSettings {
    fn default() -> Self {
        PatronSettings {
            capacity: default_patron_capacity(),
        }
    }
}

// =============================================================================
// Library Configuration
// =============================================================================

/// Complete library configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Item repository settings.
    #[serde(default)]
    pub items: ItemSettings,

    /// Patron repository settings.
    #[serde(default)]
    pub patrons: PatronSettings,
}

impl LibraryConfig {
    /// Creates a config with explicit ceilings.
    pub fn with_capacities(item_capacity: usize, patron_capacity: usize) -> Self {
        LibraryConfig {
            items: ItemSettings {
                capacity: item_capacity,
            },
            patrons: PatronSettings {
                capacity: patron_capacity,
            },
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`lectern.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading library config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load library config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing sections fall back to defaults.
    pub fn from_toml(contents: &str) -> StoreResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.items.capacity == 0 {
            return Err(StoreError::InvalidConfig(
                "items.capacity must be greater than 0".into(),
            ));
        }

        if self.patrons.capacity == 0 {
            return Err(StoreError::InvalidConfig(
                "patrons.capacity must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Some(capacity) = read_capacity_env(ITEM_CAPACITY_ENV) {
            debug!(capacity, "Overriding item capacity from environment");
            self.items.capacity = capacity;
        }

        if let Some(capacity) = read_capacity_env(PATRON_CAPACITY_ENV) {
            debug!(capacity, "Overriding patron capacity from environment");
            self.patrons.capacity = capacity;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "lectern", "lectern")
            .map(|dirs| dirs.config_dir().join("lectern.toml"))
    }
}

fn read_capacity_env(name: &str) -> Option<usize> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(capacity) => Some(capacity),
        Err(_) => {
            warn!(var = name, value = %raw, "Ignoring non-numeric capacity in environment");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LibraryConfig::default();
        assert_eq!(config.items.capacity, 100);
        assert_eq!(config.patrons.capacity, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = LibraryConfig::from_toml("[items]\ncapacity = 250\n").unwrap();
        assert_eq!(config.items.capacity, 250);
        assert_eq!(config.patrons.capacity, 100);
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = LibraryConfig::from_toml("[items]\ncapacity = \"lots\"\n").unwrap_err();
        assert!(matches!(err, StoreError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_zero_capacity_is_invalid() {
        let config = LibraryConfig::with_capacities(0, 10);
        assert!(matches!(
            config.validate(),
            Err(StoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("lectern-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[patrons]\ncapacity = 7\n").unwrap();

        let config = LibraryConfig::load(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.patrons.capacity, 7);
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&LibraryConfig::default()).unwrap();
        assert!(toml_str.contains("[items]"));
        assert!(toml_str.contains("[patrons]"));
    }
}
