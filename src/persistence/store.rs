use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

/// Storage key for the task list
pub const TASKS_KEY: &str = "ff_tasks";
/// Storage key for the current mood symbol
pub const MOOD_KEY: &str = "ff_mood";
/// Storage key for the mood history
pub const MOOD_LOG_KEY: &str = "ff_moodLog";
/// Storage key for the selected timer duration (seconds)
pub const SELECTED_SECONDS_KEY: &str = "ff_selectedSeconds";

/// Every key the app writes, used when wiping stored state
pub const ALL_KEYS: [&str; 4] = [TASKS_KEY, MOOD_KEY, MOOD_LOG_KEY, SELECTED_SECONDS_KEY];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("quota exceeded writing key `{key}` ({needed} bytes, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },
    #[error("failed to encode value for key `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw string key-value medium
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store, optionally limited to a total byte quota
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once the total stored bytes would exceed `bytes`
    #[cfg(test)]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            let available = quota.saturating_sub(self.used_bytes_excluding(key));
            let needed = key.len() + value.len();
            if needed > available {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Shared handle to the durable store.
///
/// Reads decode JSON and fall back to the caller's default on any failure; writes are
/// best-effort and never surface an error to the caller. Clones share the same backend.
#[derive(Clone)]
pub struct Store {
    backend: Rc<RefCell<dyn KeyValueStore>>,
}

impl Store {
    pub fn new<S: KeyValueStore + 'static>(backend: S) -> Self {
        Self {
            backend: Rc::new(RefCell::new(backend)),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Read and decode the value under `key`, or `default` if it is missing, empty or malformed
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.borrow().get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                log::warn!("event=store_read_failed key={} error={}", key, e);
                return default;
            }
        };

        if raw.trim().is_empty() {
            return default;
        }

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("event=store_decode_failed key={} error={}", key, e);
                default
            }
        }
    }

    /// Encode `value` and write it under `key`. Failures are logged and dropped.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            log::warn!("event=store_write_failed key={} error={}", key, e);
        }
    }

    fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.borrow_mut().set(key, &json)
    }

    /// Delete the value under `key`. Failures are logged and dropped.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.borrow_mut().remove(key) {
            log::warn!("event=store_remove_failed key={} error={}", key, e);
        }
    }

    /// Raw stored text, bypassing decoding
    #[cfg(test)]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.backend.borrow().get(key).ok().flatten()
    }

    /// Write raw text, bypassing encoding
    #[cfg(test)]
    pub fn put_raw(&self, key: &str, value: &str) {
        let _ = self.backend.borrow_mut().set(key, value);
    }
}
