mod config;
pub mod database;

pub use config::{Config, SessionConfig};
pub use database::Database;

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::Result;

/// Keyed record store for serialized session state.
///
/// The session controller persists through this port; [`Database`] is the
/// on-disk implementation, [`MemoryStore`] the in-memory one for tests and
/// ephemeral sessions.
pub trait StateStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn delete(&mut self, key: &str) -> Result<()>;
}

/// In-memory store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.records.remove(key);
        Ok(())
    }
}

/// Returns `~/.config/aula[-dev]/` based on AULA_ENV.
///
/// Set AULA_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("AULA_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("aula-dev")
    } else {
        base_dir.join("aula")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
