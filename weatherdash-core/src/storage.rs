//! Durable local key-value storage backed by a single JSON file.
//!
//! The file is read once when the store is opened; every write replaces the
//! value of one key and rewrites the whole file. A missing or unreadable file
//! is treated as an empty store.

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl LocalStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_entries(&path);
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value stored under `key`, or `None` when absent or not decodable as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::warn!(key, error = %err, "Ignoring malformed stored value");
                None
            }
        }
    }

    /// Replace the value under `key` and flush the store to disk.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("Failed to serialize stored value for '{key}'"))?;
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize local state")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write state file: {}", self.path.display()))
    }
}

fn read_entries(path: &Path) -> BTreeMap<String, Value> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Failed to read state file");
            return BTreeMap::new();
        }
    };

    serde_json::from_str(&contents).unwrap_or_else(|err| {
        tracing::warn!(
            path = %path.display(),
            error = %err,
            "State file is malformed, starting empty"
        );
        BTreeMap::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = LocalStore::open(dir.path().join("state.json"));
        assert_eq!(store.get::<String>("theme"), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("state.json");

        let mut store = LocalStore::open(&path);
        store.set("recentSearches", &vec!["Paris", "Tokyo"]).expect("set");
        store.set("theme", &"dark").expect("set");

        let reopened = LocalStore::open(&path);
        assert_eq!(
            reopened.get::<Vec<String>>("recentSearches"),
            Some(vec!["Paris".to_string(), "Tokyo".to_string()])
        );
        assert_eq!(reopened.get::<String>("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn set_replaces_previous_value() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("state.json");

        let mut store = LocalStore::open(&path);
        store.set("theme", &"dark").expect("set");
        store.set("theme", &"light").expect("set");

        assert_eq!(LocalStore::open(&path).get::<String>("theme").as_deref(), Some("light"));
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").expect("write");

        let store = LocalStore::open(&path);
        assert_eq!(store.get::<Vec<String>>("recentSearches"), None);
    }

    #[test]
    fn wrongly_typed_value_reads_as_absent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"recentSearches": 42}"#).expect("write");

        let store = LocalStore::open(&path);
        assert_eq!(store.get::<Vec<String>>("recentSearches"), None);
    }
}
