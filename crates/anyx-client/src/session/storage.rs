//! Storage seam for the persisted session record
//!
//! The record itself lives in whatever key-value store the host provides
//! (browser local storage in the original deployment). The client only ever
//! touches it through this trait.

use std::collections::HashMap;
use std::sync::Mutex;

/// Well-known key the session record is stored under
pub const SESSION_STORAGE_KEY: &str = "anyx.auth.session";

/// Key-value store holding the serialized session record
pub trait SessionStorage: Send + Sync {
    /// Read the raw value stored under `key`, if any
    fn read(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn write(&self, key: &str, value: &str);

    /// Remove the value stored under `key`
    fn remove(&self, key: &str);
}

/// In-process storage backend, used in tests and by hosts without a
/// persistent store of their own
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read_remove_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read(SESSION_STORAGE_KEY), None);

        storage.write(SESSION_STORAGE_KEY, "{\"access_token\":\"abc\"}");
        assert_eq!(
            storage.read(SESSION_STORAGE_KEY).as_deref(),
            Some("{\"access_token\":\"abc\"}")
        );

        storage.remove(SESSION_STORAGE_KEY);
        assert_eq!(storage.read(SESSION_STORAGE_KEY), None);
    }

    #[test]
    fn test_keys_are_independent() {
        let storage = MemoryStorage::new();
        storage.write("a", "1");
        storage.write("b", "2");
        storage.remove("a");

        assert_eq!(storage.read("a"), None);
        assert_eq!(storage.read("b").as_deref(), Some("2"));
    }
}
