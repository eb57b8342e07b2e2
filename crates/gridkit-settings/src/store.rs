//! Key/value document stores
//!
//! The configuration is kept as one JSON text under a fixed key. The file
//! store maps a key to `<dir>/<key>.json`; the memory store backs tests and
//! sessions that should not touch the disk.

use crate::error::{SettingsError, SettingsResult};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "gridkit";

/// Storage for whole JSON documents
pub trait StateStore {
    /// Stored text for `key`, or `None` when nothing is stored.
    fn read(&self, key: &str) -> SettingsResult<Option<String>>;

    fn write(&mut self, key: &str, document: &str) -> SettingsResult<()>;

    /// Remove the document; removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> SettingsResult<()>;
}

/// Stores each document as a JSON file in one directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform config directory
    pub fn open_default() -> SettingsResult<Self> {
        Ok(Self::new(Self::default_dir()?))
    }

    pub fn default_dir() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                SettingsError::StateDirectory("No config or home directory".to_string())
            })?;
        Ok(base.join(APP_DIR_NAME))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StateStore for FileStore {
    fn read(&self, key: &str) -> SettingsResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SettingsError::Read { path, source }),
        }
    }

    fn write(&mut self, key: &str, document: &str) -> SettingsResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            SettingsError::StateDirectory(format!("{}: {}", self.dir.display(), e))
        })?;

        let path = self.path_for(key);
        fs::write(&path, document).map_err(|source| SettingsError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(bytes = document.len(), "Wrote {}", path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SettingsResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(key: &str, document: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), document.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl StateStore for MemoryStore {
    fn read(&self, key: &str) -> SettingsResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, document: &str) -> SettingsResult<()> {
        self.entries.insert(key.to_string(), document.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SettingsResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
