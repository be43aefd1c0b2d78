//! # Session Persistence
//!
//! Key-value persistence for the two session payloads that outlive a
//! visit: the signed-in identity and the open cart.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Store                                      │
//! │                                                                         │
//! │  Key                  Value (JSON string, opaque here)                  │
//! │  ─────────────────    ───────────────────────────────────               │
//! │  tenantflow.user      {"id":"u1","name":"Maria", ...}                   │
//! │  tenantflow.cart      {"storeId":"s1","items":[...], ...}               │
//! │                                                                         │
//! │  Startup:  get(key) ──► restore identity / cart                         │
//! │  Mutation: set(key, json) ──► rewrite the snapshot                      │
//! │  Logout / clear cart: remove(key)                                       │
//! │                                                                         │
//! │  The store never parses the values. Serialization lives with the        │
//! │  services that own the types.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Implementations
//! - [`MemorySessionStore`] - HashMap, gone on drop. Tests and demos.
//! - [`FileSessionStore`] - one JSON file, rewritten on every change.
//!
//! A session snapshot is a cache of recoverable state: losing it logs
//! the customer out and empties their cart, nothing worse. Load
//! problems therefore degrade to an empty session instead of failing
//! startup; only writes report errors.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// Session key holding the signed-in identity.
pub const SESSION_USER_KEY: &str = "tenantflow.user";

/// Session key holding the open cart snapshot.
pub const SESSION_CART_KEY: &str = "tenantflow.cart";

/// Key-value persistence for session payloads.
///
/// Values are JSON strings the caller produced; the store treats them
/// as opaque. Implementations use interior mutability so services can
/// share one store behind an `Arc<dyn SessionStore>`.
pub trait SessionStore: Send + Sync {
    /// Returns the stored value for a key, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores a value under a key, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// MemorySessionStore
// =============================================================================

/// In-memory session store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Creates an empty session store.
    pub fn new() -> Self {
        MemorySessionStore::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("session lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .lock()
            .expect("session lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries
            .lock()
            .expect("session lock poisoned")
            .remove(key);
        Ok(())
    }
}

// =============================================================================
// FileSessionStore
// =============================================================================

/// File-backed session store.
///
/// All keys live in one JSON object; every `set`/`remove` rewrites the
/// whole file. The payload is two small JSON strings, so rewriting
/// beats tracking dirty keys.
///
/// ## Usage
/// ```rust,ignore
/// let sessions = FileSessionStore::new(config.session_file());
/// sessions.set(SESSION_USER_KEY, &json)?;
/// ```
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileSessionStore {
    /// Opens a session store backed by the given file.
    ///
    /// A missing file starts an empty session. An unreadable or corrupt
    /// file logs a warning and also starts empty; the next `set`
    /// replaces it with a valid snapshot.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);

        debug!(
            path = %path.display(),
            keys = entries.len(),
            "Opened session file"
        );

        FileSessionStore {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrites the backing file from the in-memory entries.
    fn persist(&self, entries: &HashMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Persistence(format!("{}: {e}", parent.display())))?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)
            .map_err(|e| StoreError::Persistence(format!("{}: {e}", self.path.display())))?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("session lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().expect("session lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().expect("session lock poisoned");
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries)
    }
}

/// Reads the session file, degrading to empty on any problem.
fn load_entries(path: &Path) -> HashMap<String, String> {
    if !path.exists() {
        return HashMap::new();
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Session file unreadable, starting empty");
            return HashMap::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Session file corrupt, starting empty");
            HashMap::new()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        assert!(store.get(SESSION_USER_KEY).is_none());

        store.set(SESSION_USER_KEY, r#"{"id":"u1"}"#).unwrap();
        assert_eq!(store.get(SESSION_USER_KEY).unwrap(), r#"{"id":"u1"}"#);

        store.remove(SESSION_USER_KEY).unwrap();
        assert!(store.get(SESSION_USER_KEY).is_none());

        // Removing again is fine.
        store.remove(SESSION_USER_KEY).unwrap();
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileSessionStore::new(&path);
        store.set(SESSION_USER_KEY, r#"{"id":"u1"}"#).unwrap();
        store.set(SESSION_CART_KEY, r#"{"storeId":"s1"}"#).unwrap();
        drop(store);

        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.get(SESSION_USER_KEY).unwrap(), r#"{"id":"u1"}"#);
        assert_eq!(reopened.get(SESSION_CART_KEY).unwrap(), r#"{"storeId":"s1"}"#);
    }

    #[test]
    fn test_file_store_remove_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileSessionStore::new(&path);
        store.set(SESSION_USER_KEY, r#"{"id":"u1"}"#).unwrap();
        store.remove(SESSION_USER_KEY).unwrap();
        drop(store);

        let reopened = FileSessionStore::new(&path);
        assert!(reopened.get(SESSION_USER_KEY).is_none());
    }

    #[test]
    fn test_file_store_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("never-written.json"));
        assert!(store.get(SESSION_USER_KEY).is_none());
    }

    #[test]
    fn test_file_store_corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ not valid json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.get(SESSION_USER_KEY).is_none());

        // The next write replaces the corrupt snapshot.
        store.set(SESSION_USER_KEY, r#"{"id":"u1"}"#).unwrap();
        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.get(SESSION_USER_KEY).unwrap(), r#"{"id":"u1"}"#);
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("session.json");

        let store = FileSessionStore::new(&path);
        store.set(SESSION_CART_KEY, "{}").unwrap();
        assert!(path.exists());
    }
}
