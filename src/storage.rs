//! Where the last entered amount is remembered.
//!
//! The estimator only needs get/set/remove of a single value, so the store is
//! injected rather than reached for globally.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub trait AmountStore {
    fn get(&self) -> anyhow::Result<Option<String>>;
    fn set(&mut self, value: &str) -> anyhow::Result<()>;
    fn remove(&mut self) -> anyhow::Result<()>;
}

/// Keeps the value in memory for the lifetime of the store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    value: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        MemoryStore {
            value: Some(value.into()),
        }
    }
}

impl AmountStore for MemoryStore {
    fn get(&self) -> anyhow::Result<Option<String>> {
        Ok(self.value.clone())
    }

    fn set(&mut self, value: &str) -> anyhow::Result<()> {
        self.value = Some(value.to_string());
        Ok(())
    }

    fn remove(&mut self) -> anyhow::Result<()> {
        self.value = None;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredAmount {
    last_amount: String,
}

/// Persists the value as a small JSON document: `{"last_amount":"10000"}`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AmountStore for FileStore {
    fn get(&self) -> anyhow::Result<Option<String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read '{}'", self.path.display()));
            }
        };

        let stored: StoredAmount = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse '{}'", self.path.display()))?;
        Ok(Some(stored.last_amount))
    }

    fn set(&mut self, value: &str) -> anyhow::Result<()> {
        let stored = StoredAmount {
            last_amount: value.to_string(),
        };
        let json = serde_json::to_string(&stored)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write '{}'", self.path.display()))
    }

    fn remove(&mut self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove '{}'", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get().unwrap(), None);
        store.set("2500").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("2500"));
        store.remove().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_between_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("last_amount.json");

        let mut store = FileStore::new(&path);
        assert_eq!(store.get().unwrap(), None);
        store.set("10000").unwrap();

        let json = fs::read_to_string(&path).unwrap();
        assert_eq!(json, r#"{"last_amount":"10000"}"#);
        assert_eq!(FileStore::new(&path).get().unwrap().as_deref(), Some("10000"));
    }

    #[test]
    fn test_file_store_remove_missing_is_ok() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("absent.json"));
        assert!(store.remove().is_ok());
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("last_amount.json");
        fs::write(&path, "garbage").unwrap();
        assert!(FileStore::new(&path).get().is_err());
    }
}
