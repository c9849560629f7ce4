use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::GalleryResult;

pub mod featured;
pub mod tags;

/// Key-value storage behind the gallery caches.
pub trait CacheBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn invalidate(&self, key: &str);
}

/// Process-lifetime cache. Entries never expire on their own.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheBackend for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        map.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        map.insert(key.to_string(), value);
    }

    fn invalidate(&self, key: &str) {
        let mut map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        map.remove(key);
    }
}

/// Cache handle shared by the tag index and the featured image.
/// Values are stored as JSON so any backend only has to deal in strings.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn CacheBackend>,
}

impl Cache {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Cache { backend }
    }

    pub fn in_memory() -> Self {
        Cache::new(Arc::new(MemoryCache::new()))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.backend.get(key)
    }

    pub fn set(&self, key: &str, value: String) {
        self.backend.set(key, value)
    }

    pub fn invalidate(&self, key: &str) {
        self.backend.invalidate(key)
    }

    /// An entry that no longer decodes is treated as a miss.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("Dropping undecodable cache entry {}: {}", key, e);
                self.invalidate(key);
                None
            }
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> GalleryResult<()> {
        self.set(key, serde_json::to_string(value)?);
        Ok(())
    }
}
