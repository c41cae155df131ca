use std::{collections::HashMap, fs, path::PathBuf, sync::Mutex};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::TOKEN_STORAGE_KEY;
use crate::errors::{Error, Result};

/// Durable storage for the single bearer token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

const CURRENT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Default)]
struct StoredEntries {
    version: u32,
    entries: HashMap<String, String>,
}

fn parse_entries(raw: &[u8]) -> serde_json::Result<HashMap<String, String>> {
    serde_json::from_slice::<StoredEntries>(raw).map(|stored| stored.entries)
}

/// Keeps the token in a small JSON file so a restart can resume the session.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Read-modify-write under the lock. A file that no longer parses is
    /// replaced, so a torn write never blocks saving or clearing the token.
    fn with_entries<F>(&self, op: F) -> Result<()>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::TokenStore("Token store lock poisoned".into()))?;
        let mut entries = match self.read_locked()? {
            Some(raw) => parse_entries(&raw).unwrap_or_else(|e| {
                warn!("Overwriting corrupt token file {}: {}", self.path.display(), e);
                HashMap::new()
            }),
            None => HashMap::new(),
        };
        op(&mut entries);
        self.write_locked(entries)
    }

    /// Raw file contents, `None` when the file is missing or empty.
    fn read_locked(&self) -> Result<Option<Vec<u8>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read(&self.path)?;
        Ok(if raw.is_empty() { None } else { Some(raw) })
    }

    fn write_locked(&self, entries: HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredEntries {
            version: CURRENT_VERSION,
            entries,
        };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| Error::TokenStore(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::TokenStore("Token store lock poisoned".into()))?;
        match self.read_locked()? {
            Some(raw) => {
                let mut entries = parse_entries(&raw)
                    .map_err(|e| Error::TokenStore(format!("Corrupt token file: {e}")))?;
                Ok(entries.remove(TOKEN_STORAGE_KEY))
            }
            None => Ok(None),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(TOKEN_STORAGE_KEY.to_string(), token.to_string());
        })
    }

    fn clear(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.with_entries(|entries| {
            entries.remove(TOKEN_STORAGE_KEY);
        })
    }
}

/// Process-local store, for tests and `--no-persist` runs.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let guard = self
            .token
            .lock()
            .map_err(|_| Error::TokenStore("Token store lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| Error::TokenStore("Token store lock poisoned".into()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| Error::TokenStore("Token store lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}
