//! Key-value persistence backends.

use crate::models::TournamentError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// String key-value storage the tournament store is saved into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, TournamentError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), TournamentError>;
}

/// In-memory backend (tests, or hosts that persist elsewhere).
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, TournamentError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), TournamentError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, TournamentError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TournamentError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), TournamentError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            TournamentError::Storage(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|e| {
            TournamentError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}
