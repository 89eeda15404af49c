//! String and JSON access on top of a [`StorageArea`].
//!
//! # Malformed state policy
//!
//! [`LocalStorage::get_json`] never fails: an absent key and a value that
//! does not decode both yield the caller's default. Corrupted state is
//! therefore indistinguishable from absent state on the regular read path,
//! and every caller always receives a usable value. The substitution happens
//! in exactly one place, [`LocalStorage::substitute_default`], which logs the
//! discarded value.
//!
//! [`LocalStorage::try_get_json`] is the strict counterpart for diagnostics.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::area::StorageArea;
use crate::engine::errors::StoreError;

#[derive(Clone)]
pub struct LocalStorage {
    area: Arc<dyn StorageArea>,
}

impl LocalStorage {
    pub fn new(area: Arc<dyn StorageArea>) -> Self {
        Self { area }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.area.get_item(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.area
            .set_item(key, value)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                source: e.into(),
            })
    }

    /// Decodes the value at `key`, or returns `default` when it is absent or malformed.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(raw) = self.get(key) else {
            return default;
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => Self::substitute_default(key, &raw, e, default),
        }
    }

    /// Decodes the value at `key`; `Ok(None)` when absent.
    pub fn try_get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Malformed {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.set(key, &raw)
    }

    fn substitute_default<T>(key: &str, raw: &str, err: serde_json::Error, default: T) -> T {
        log::warn!(
            "local storage: discarding malformed value at {key} ({} bytes): {err}",
            raw.len()
        );
        default
    }
}
