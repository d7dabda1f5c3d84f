//! Key-value persistence over browser `localStorage`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Tokens and the cached profile snapshot must survive reloads but must
//! never crash the app when storage is denied (private browsing, disabled
//! storage). Unavailability is a first-class state: reads return `None`
//! and writes no-op.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Minimal string key-value capability with explicit availability.
pub trait KeyValueStore: Send + Sync {
    fn available(&self) -> bool;
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// `localStorage`-backed store. Only meaningful in the browser.
#[cfg(feature = "hydrate")]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn raw() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStore for BrowserStorage {
    fn available(&self) -> bool {
        Self::raw().is_some()
    }

    fn get(&self, key: &str) -> Option<String> {
        Self::raw()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::raw() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::raw() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store used on the server and in tests.
#[derive(Default)]
pub struct MemoryStore {
    available: bool,
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            available: true,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// A store that behaves like denied browser storage.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn available(&self) -> bool {
        self.available
    }

    fn get(&self, key: &str) -> Option<String> {
        if !self.available {
            return None;
        }
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if !self.available {
            return;
        }
        self.entries.lock().unwrap().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        if !self.available {
            return;
        }
        self.entries.lock().unwrap().remove(key);
    }
}

/// The store appropriate for the current build target.
pub fn platform_store() -> SharedStore {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(BrowserStorage)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Arc::new(MemoryStore::new())
    }
}

/// Load a JSON value for `key`, tolerating junk left by older builds.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    if raw.is_empty() || raw == "undefined" || raw == "null" {
        return None;
    }
    serde_json::from_str(&raw).ok()
}

/// Save a JSON value for `key`. Serialization failures are dropped.
pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let Ok(raw) = serde_json::to_string(value) else {
        return;
    };
    store.set(key, &raw);
}
