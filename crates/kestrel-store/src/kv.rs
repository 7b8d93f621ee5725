//! The external key-value store boundary.
//!
//! The wallet store only requires atomic single-key reads and writes —
//! no multi-key transactions, no iteration. [`SledStore`] is the
//! production backend; [`MemoryStore`] backs tests and ephemeral
//! sessions.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use kestrel_types::{KestrelError, Result};

// ---------------------------------------------------------------------------
// KeyValueStore
// ---------------------------------------------------------------------------

/// A string-keyed, string-valued store with atomic single-key access.
///
/// Implementations must make each individual `get`/`set`/`remove`
/// atomic, but need not provide multi-key transactions; callers that
/// perform multi-key updates accept the crash window between writes.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes the value under `key`. Deleting a missing key is a no-op.
    fn remove(&self, key: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|_| KestrelError::Storage {
            reason: "memory store lock poisoned".into(),
        })
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SledStore
// ---------------------------------------------------------------------------

/// Sled-backed store for durable wallet persistence.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Opens (or creates) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`KestrelError::Storage`] if the database cannot be
    /// opened.
    pub fn open(path: &Path) -> Result<Self> {
        let db = sled::open(path).map_err(|e| KestrelError::Storage {
            reason: format!("failed to open sled database: {e}"),
        })?;
        Ok(Self { db })
    }

    /// Flushes all pending writes to disk.
    ///
    /// # Errors
    ///
    /// Returns [`KestrelError::Storage`] if the flush fails.
    pub fn flush(&self) -> Result<()> {
        self.db.flush().map_err(|e| KestrelError::Storage {
            reason: format!("failed to flush database: {e}"),
        })?;
        Ok(())
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.db.get(key).map_err(|e| KestrelError::Storage {
            reason: format!("read of '{key}' failed: {e}"),
        })?;
        match value {
            Some(bytes) => {
                let text =
                    String::from_utf8(bytes.to_vec()).map_err(|_| KestrelError::Storage {
                        reason: format!("value under '{key}' is not valid UTF-8"),
                    })?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key, value.as_bytes())
            .map_err(|e| KestrelError::Storage {
                reason: format!("write of '{key}' failed: {e}"),
            })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db.remove(key).map_err(|e| KestrelError::Storage {
            reason: format!("delete of '{key}' failed: {e}"),
        })?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() -> Result<()> {
        let store = MemoryStore::new();
        assert_eq!(store.get("k")?, None);

        store.set("k", "v1")?;
        assert_eq!(store.get("k")?, Some("v1".to_string()));

        store.set("k", "v2")?;
        assert_eq!(store.get("k")?, Some("v2".to_string()));

        store.remove("k")?;
        assert_eq!(store.get("k")?, None);
        Ok(())
    }

    #[test]
    fn memory_store_remove_missing_is_noop() -> Result<()> {
        let store = MemoryStore::new();
        store.remove("absent")?;
        Ok(())
    }
}
