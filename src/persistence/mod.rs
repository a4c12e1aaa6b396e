//! Key/value persistence for small JSON documents
//!
//! Features:
//! - `Storage` trait keyed by document name (settings, high scores)
//! - `FileStorage`: one JSON file per key inside a directory
//! - `MemoryStorage`: in-process map for tests and headless runs
//! - Missing documents read as `None`; corrupt ones surface as `StoreError::Json`

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{StoreError, StoreResult};

/// Backend holding raw JSON text by key
pub trait Storage {
    /// Read a document; `Ok(None)` when it has never been written
    fn read(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replace a document
    fn write(&mut self, key: &str, contents: &str) -> StoreResult<()>;
}

/// Stores each key as `<dir>/<key>`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, contents: &str) -> StoreResult<()> {
        std::fs::write(self.path(key), contents).map_err(|source| StoreError::Io {
            key: key.to_string(),
            source,
        })
    }
}

/// Volatile storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    docs: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.docs.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> StoreResult<()> {
        self.docs.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

/// Decode a document, `Ok(None)` if absent
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> StoreResult<Option<T>> {
    let Some(text) = storage.read(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })
}

/// Encode and write a document (pretty-printed)
pub fn save_json<T: Serialize>(storage: &mut dyn Storage, key: &str, value: &T) -> StoreResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        key: key.to_string(),
        source,
    })?;
    storage.write(key, &text)
}
