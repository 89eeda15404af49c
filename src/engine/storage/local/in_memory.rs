use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{anyhow, Result};

use crate::engine::storage::area::StorageArea;

/// In‑memory local storage (no persistence). Used by tests and as the default
/// backend when no database path is configured.
#[derive(Default)]
pub struct InMemoryLocalStore {
    map: RwLock<HashMap<String, String>>,
}

impl InMemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with raw `(key, value)` pairs, e.g. a dump of a browser profile.
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            map: RwLock::new(
                items
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl StorageArea for InMemoryLocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.map.read().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.map
            .write()
            .map_err(|_| anyhow!("in-memory storage lock poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn len(&self) -> usize {
        self.map.read().map(|m| m.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_contract() {
        let store = InMemoryLocalStore::new();

        assert_eq!(store.len(), 0);
        assert!(store.get_item("missing").is_none());

        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_item("a").as_deref(), Some("1"));
        assert_eq!(store.get_item("b").as_deref(), Some("2"));

        // overwrite keeps len
        store.set_item("a", "ONE").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_item("a").as_deref(), Some("ONE"));
    }

    #[test]
    fn seeded_items_are_visible() {
        let store = InMemoryLocalStore::with_items([("bookedSeats-S100", r#"{"C3":true}"#)]);
        assert_eq!(
            store.get_item("bookedSeats-S100").as_deref(),
            Some(r#"{"C3":true}"#)
        );
        assert_eq!(store.len(), 1);
    }
}
