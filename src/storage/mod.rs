//! Key-value storage behind an injected interface.
//!
//! The portal historically kept all state in browser local storage under a
//! handful of well-known keys. The same layout is preserved here: one
//! JSON-encoded collection per key, whole-collection replace on every write,
//! last-write-wins with no locking.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage abstraction so every component can be exercised against an
/// in-memory fake. Values are the JSON text stored under each key.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Error enumeration for backend failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("failed to access storage file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage file {path} does not hold a valid JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The well-known key layout. Key strings are kept byte-for-byte compatible
/// with what the portal has always written.
pub mod keys {
    /// Shared submissions list predating per-agent keys. Read-only support.
    pub const LEGACY_AGENT_SUBMISSIONS: &str = "agentSubmissions";
    /// Every agent's submissions, mirrored for the admin console.
    pub const ALL_AGENT_SUBMISSIONS: &str = "allAgentSubmissions";
    /// Single-slot logged-in agent session.
    pub const AGENT_SESSION: &str = "agentData";

    pub fn agent_submissions(agent_id: &str) -> String {
        format!("agentSubmissions_{agent_id}")
    }

    pub fn agent_drafts(agent_id: &str) -> String {
        format!("agentDrafts_{agent_id}")
    }

    /// Legacy single-draft slot, superseded by `agentDrafts_<agentId>`.
    pub fn legacy_draft(id: i64) -> String {
        format!("draft_{id}")
    }
}

/// In-memory backend used by tests and short-lived tooling.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored key, for assertions in tests.
    pub fn keys(&self) -> Vec<String> {
        match self.entries.lock() {
            Ok(entries) => entries.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl StorageBackend for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// File-backed backend for the demo binary: the whole key space is one JSON
/// object on disk, re-read and rewritten around every operation. Adequate for
/// a single-user tool; concurrent writers overwrite each other silently.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };

        serde_json::from_str(&text).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(map).map_err(|source| StorageError::Encode {
            key: self.path.display().to_string(),
            source,
        })?;
        fs::write(&self.path, text).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl StorageBackend for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}
