use anyhow::Result;

/// Object-safe key/value storage area (the shape of the DOM's `localStorage`).
///
/// Backends are synchronous and internally synchronized. A missing key is
/// never an error; write failures (quota, I/O, database) are.
pub trait StorageArea: Send + Sync {
    /// Retrieves the value associated with the given key, or `None` if not found.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Sets the value for the given key, overwriting any existing value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Returns the number of items in the storage area.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryLocalStore;
    use std::sync::Arc;

    #[test]
    fn storagearea_basic_contract() {
        let area: Arc<dyn StorageArea> = Arc::new(InMemoryLocalStore::new());

        // starts empty
        assert!(area.is_empty());
        assert!(area.get_item("bookedSeats-S098").is_none());

        area.set_item("bookedSeats-S098", "{}").unwrap();
        area.set_item("bookedSeats-S099", r#"{"A1":true}"#).unwrap();
        assert_eq!(area.len(), 2);
        assert_eq!(area.get_item("bookedSeats-S098").as_deref(), Some("{}"));

        // overwrite keeps len()
        area.set_item("bookedSeats-S098", r#"{"B2":true}"#).unwrap();
        assert_eq!(area.len(), 2);
        assert_eq!(
            area.get_item("bookedSeats-S098").as_deref(),
            Some(r#"{"B2":true}"#)
        );
    }
}
