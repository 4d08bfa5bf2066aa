//! In-memory implementation of the store repository.
//!
//! Stores serialized snapshots in a shared map keyed by path, so tests can
//! exercise persistence without touching the filesystem.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, error::Error, ports::StoreRepository, store::StateStore};

/// Repository that keeps MessagePack bytes in memory.
///
/// Clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.storage.lock().map_err(|_| Error::StoreUnavailable {
            message: "in-memory repository lock poisoned".to_string(),
        })
    }

    /// Number of stores currently saved
    pub fn count(&self) -> usize {
        self.storage().map_or(0, |storage| storage.len())
    }

    pub fn clear(&self) {
        if let Ok(mut storage) = self.storage() {
            storage.clear();
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        let key = path.to_string_lossy().to_string();
        self.storage()
            .is_ok_and(|storage| storage.contains_key(&key))
    }
}

impl StoreRepository for InMemoryRepository {
    fn save(&self, store: &StateStore, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();

        let bytes = rmp_serde::to_vec_named(&store.snapshot()).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize store for in-memory storage".to_string(),
                message: e.to_string(),
            }
        })?;

        self.storage()?.insert(key, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<StateStore> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage()?;

        let bytes = storage.get(&key).ok_or_else(|| Error::Io {
            operation: format!("load store from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize store from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }
}
