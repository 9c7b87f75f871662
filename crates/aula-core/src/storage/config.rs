//! TOML-based application configuration.
//!
//! Stores the session parameters: group pool size, sector count, and the
//! countdown duration. Stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Session parameters, fixed at session construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Total assignable group numbers (`1..=group_count`).
    #[serde(default = "default_group_count")]
    pub group_count: u32,
    /// Number of assignment slots.
    #[serde(default = "default_sector_count")]
    pub sector_count: usize,
    /// Countdown length in seconds.
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
}

// Default functions
fn default_group_count() -> u32 {
    18
}
fn default_sector_count() -> usize {
    2
}
fn default_duration_seconds() -> u32 {
    300
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            group_count: default_group_count(),
            sector_count: default_sector_count(),
            duration_seconds: default_duration_seconds(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults on first use.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed, fails
    /// validation, or if the default config cannot be written.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Reject parameter combinations the picker and timer cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.sector_count == 0 {
            return Err(ConfigError::InvalidValue {
                key: "session.sector_count".into(),
                message: "must be at least 1".into(),
            });
        }
        if (self.session.group_count as usize) < self.session.sector_count {
            return Err(ConfigError::InvalidValue {
                key: "session.group_count".into(),
                message: format!(
                    "must be at least sector_count ({})",
                    self.session.sector_count
                ),
            });
        }
        if self.session.duration_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "session.duration_seconds".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(match current {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    /// Returns an error on unknown keys, unparsable values, or values that
    /// fail validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        let mut parts = key.split('.').peekable();
        let mut current = &mut json;
        while let Some(part) = parts.next() {
            let obj = current
                .as_object_mut()
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
            if parts.peek().is_none() {
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let new_value = match existing {
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as number"),
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as bool"),
                        })?,
                    ),
                    _ => serde_json::Value::String(value.into()),
                };
                obj.insert(part.to_string(), new_value);
                break;
            }
            current = obj
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_session_contract() {
        let cfg = Config::default();
        assert_eq!(cfg.session.group_count, 18);
        assert_eq!(cfg.session.sector_count, 2);
        assert_eq!(cfg.session.duration_seconds, 300);
        cfg.validate().unwrap();
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        let mut cfg = Config::default();
        cfg.session.sector_count = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.session.group_count = 1;
        assert!(cfg.validate().is_err(), "fewer groups than sectors");

        let mut cfg = Config::default();
        cfg.session.duration_seconds = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn get_by_dot_path() {
        let cfg = Config::default();
        assert_eq!(cfg.get("session.group_count").as_deref(), Some("18"));
        assert_eq!(cfg.get("session.nope"), None);
        assert_eq!(cfg.get(""), None);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("[session]\ngroup_count = 10\n").unwrap();
        assert_eq!(cfg.session.group_count, 10);
        assert_eq!(cfg.session.sector_count, 2);
        assert_eq!(cfg.session.duration_seconds, 300);
    }

    #[test]
    fn load_writes_defaults_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut on_disk = Config::load_from(&path).unwrap();
        on_disk.session.duration_seconds = 600;
        on_disk.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), on_disk);
    }

    #[test]
    fn load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nsector_count = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        std::fs::write(&path, "not toml at all {{{").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
