//! Keyed payload cache.
//!
//! Remembers the last successfully read bytes per resource path so that
//! re-mounting a page does not re-read an unchanged resource. Entries live
//! until explicitly invalidated.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

/// One cached payload.
#[derive(Debug, Clone)]
pub struct CachedPayload {
    /// Raw bytes as read from the source.
    pub bytes: Arc<Vec<u8>>,
    /// When the bytes were read.
    pub fetched_at: DateTime<Utc>,
}

/// Thread-safe cache of raw payloads keyed by resource path.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: RwLock<HashMap<String, CachedPayload>>,
}

impl DatasetCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<String, CachedPayload>> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<String, CachedPayload>> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached payload for `path`, if any.
    pub fn get(&self, path: &str) -> Option<CachedPayload> {
        self.read_entries().get(path).cloned()
    }

    /// Store a payload, replacing any previous one.
    pub fn insert(&self, path: &str, bytes: Vec<u8>) -> CachedPayload {
        let payload = CachedPayload {
            bytes: Arc::new(bytes),
            fetched_at: Utc::now(),
        };
        self.write_entries()
            .insert(path.to_string(), payload.clone());
        payload
    }

    /// Drop the payload for `path`. Returns whether one was present.
    pub fn invalidate(&self, path: &str) -> bool {
        let removed = self.write_entries().remove(path).is_some();
        if removed {
            log::debug!("Invalidated cached payload for '{path}'");
        }
        removed
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.write_entries().clear();
    }

    /// True if `path` is cached.
    pub fn contains(&self, path: &str) -> bool {
        self.read_entries().contains_key(path)
    }

    /// Number of cached paths.
    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }
}
