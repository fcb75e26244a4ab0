//! # Favorites Store
//!
//! An ordered set of country codes persisted under a single key as a JSON
//! array. Consumers get a cloneable [`FavoritesStore`] handle; the storage
//! backend is injected, so the TUI uses a file and tests use memory.
//!
//! Every operation reads and writes the whole value. There is no cross-process
//! coordination: two instances toggling at once means last writer wins.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::{debug, info, warn};

/// Storage key holding the favorites array.
pub const FAVORITES_KEY: &str = "favoriteCountries";

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Encode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "storage I/O error: {e}"),
            StoreError::Encode(e) => write!(f, "storage encode error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Encode(e)
    }
}

/// String key-value storage, read and written one whole value at a time.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile storage for tests and `--ephemeral` runs.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| poisoned())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn poisoned() -> StoreError {
    StoreError::Io(io::Error::other("storage lock poisoned"))
}

/// A JSON object file of `key → value` strings.
///
/// Writes go to `<file>.tmp` and are renamed over the original.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.atlas/storage.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".atlas").join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&json)?)
    }

    fn atomic_write(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(values)?)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = match self.load() {
            Ok(values) => values,
            Err(e) => {
                warn!("Storage file {} unreadable, starting fresh: {}", self.path.display(), e);
                BTreeMap::new()
            }
        };
        values.insert(key.to_string(), value.to_string());
        self.atomic_write(&values)
    }
}

/// Shared handle to the persisted favorites.
#[derive(Clone)]
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Codes are compared upper-cased and trimmed ("bra " == "BRA").
    fn normalize(code: &str) -> String {
        code.trim().to_ascii_uppercase()
    }

    /// Current persisted list. Absent → written as `[]`. Corrupt → treated as empty.
    fn read(&self) -> Vec<String> {
        match self.storage.get(FAVORITES_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("Favorites value is not a JSON array of codes ({}); treating as empty", e);
                Vec::new()
            }),
            Ok(None) => {
                if let Err(e) = self.write(&[]) {
                    warn!("Failed to initialise favorites: {}", e);
                }
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to read favorites: {}", e);
                Vec::new()
            }
        }
    }

    fn write(&self, codes: &[String]) -> Result<(), StoreError> {
        let json = serde_json::to_string(codes)?;
        self.storage.set(FAVORITES_KEY, &json)
    }

    pub fn is_favorite(&self, code: &str) -> bool {
        let code = Self::normalize(code);
        self.read().contains(&code)
    }

    /// Removes `code` if present, appends it otherwise, then persists.
    /// Returns the new membership.
    pub fn toggle_favorite(&self, code: &str) -> Result<bool, StoreError> {
        let code = Self::normalize(code);
        let mut codes = self.read();
        let now_favorite = if let Some(pos) = codes.iter().position(|c| *c == code) {
            codes.remove(pos);
            false
        } else {
            codes.push(code.clone());
            true
        };
        self.write(&codes)?;
        info!("Favorite {} -> {}", code, now_favorite);
        Ok(now_favorite)
    }

    /// Persisted codes in insertion order.
    pub fn list_favorites(&self) -> Vec<String> {
        self.read()
    }

    pub fn clear_favorites(&self) -> Result<(), StoreError> {
        debug!("Clearing favorites");
        self.write(&[])
    }

    #[cfg(test)]
    fn raw(&self) -> Option<String> {
        self.storage.get(FAVORITES_KEY).ok().flatten()
    }
}
