//! Persistent key-value settings.
//!
//! The command only ever touches one key, but the store is a flat string
//! table so it can be inspected and edited by hand. [`FileSettingsStore`]
//! keeps it as TOML on disk; [`MemoryStore`] is the in-process variant.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Key under which the credential file path is stored.
pub const SERVICE_ACCOUNT_PATH_KEY: &str = "gatop_service_account_path";

pub trait SettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Settings persisted as a TOML table of strings.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file: {}", self.path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", self.path.display()))
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_table()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut table = self.read_table()?;
        table.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory: {}", parent.display()))?;
        }

        let content = toml::to_string(&table).context("Failed to serialize settings")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings file: {}", self.path.display()))?;

        debug!(key, path = %self.path.display(), "Setting saved");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("settings lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("settings lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("settings.toml"));
        assert_eq!(store.get(SERVICE_ACCOUNT_PATH_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_parents_and_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let store = FileSettingsStore::new(&path);

        store.set(SERVICE_ACCOUNT_PATH_KEY, "keys/old.json").unwrap();
        store.set(SERVICE_ACCOUNT_PATH_KEY, "keys/new.json").unwrap();

        assert!(path.exists());
        assert_eq!(
            store.get(SERVICE_ACCOUNT_PATH_KEY).unwrap().as_deref(),
            Some("keys/new.json")
        );
    }

    #[test]
    fn test_file_store_keeps_unrelated_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "other = \"value\"\n").unwrap();

        let store = FileSettingsStore::new(&path);
        store.set(SERVICE_ACCOUNT_PATH_KEY, "").unwrap();

        assert_eq!(store.get("other").unwrap().as_deref(), Some("value"));
        assert_eq!(store.get(SERVICE_ACCOUNT_PATH_KEY).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_file_store_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "not = [valid").unwrap();

        let store = FileSettingsStore::new(&path);
        assert!(store.get(SERVICE_ACCOUNT_PATH_KEY).is_err());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::with_value("a", "1");
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.get("b").unwrap(), None);
    }
}
