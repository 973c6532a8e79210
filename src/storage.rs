//! Preference stores: where the chosen language survives between page loads.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value store holding the language preference.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store, for tests and one-shot runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    value: String,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    entries: BTreeMap<String, StoredEntry>,
}

/// JSON file on disk, re-read on every `get` the way a page reload re-reads
/// local storage.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last write time of `key`, if stored.
    pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.load()?.entries.get(key).map(|entry| entry.updated_at))
    }

    fn load(&self) -> Result<StoreFile> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(StoreFile::default());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.entries.get(key).map(|entry| entry.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut file = self.load()?;
        file.entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                updated_at: Utc::now(),
            },
        );

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwitchError;
    use tempfile::TempDir;

    const KEY: &str = "autodrive-preferred-language";

    // ==================== MemoryStore Tests ====================

    #[test]
    fn test_memory_store_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.get(KEY).unwrap(), None);
    }

    #[test]
    fn test_memory_store_set_then_get() {
        let mut store = MemoryStore::new();
        store.set(KEY, "ar").unwrap();
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("ar"));
        store.set(KEY, "en").unwrap();
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn test_memory_store_with_entry() {
        let store = MemoryStore::with_entry(KEY, "ar");
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("ar"));
        assert_eq!(store.get("other").unwrap(), None);
    }

    // ==================== FileStore Tests ====================

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.get(KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = FileStore::new(&path);
        store.set(KEY, "ar").unwrap();
        assert!(path.exists());

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(KEY).unwrap().as_deref(), Some("ar"));
        assert!(reopened.updated_at(KEY).unwrap().is_some());
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("prefs.json"));
        store.set("theme", "dark").unwrap();
        store.set(KEY, "ar").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_store_empty_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "").unwrap();
        assert_eq!(FileStore::new(&path).get(KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();
        let result = FileStore::new(&path).get(KEY);
        assert!(matches!(result, Err(SwitchError::Json(_))));
    }
}
