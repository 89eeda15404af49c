//! Local storage for the reservation engine.
//!
//! This module defines the traits, types, and implementations behind the
//! engine's persistent key/value state: the seat availability maps and the
//! booking records. It mirrors the browser's **localStorage**: string keys,
//! string values, synchronous access, last writer wins.
//!
//! # Concepts
//!
//! - [`StorageArea`]: Object-safe trait for a raw backend (`get_item`,
//!   `set_item`, `len`). Injected everywhere as `Arc<dyn StorageArea>` so
//!   tests can bind an in-memory fake.
//! - [`LocalStorage`]: Adapter adding JSON access and the fail-open read
//!   policy for malformed values.
//! - [`StorageService`]: Owns the backend and publishes a [`StorageEvent`]
//!   for every committed write, like the browser `storage` event.
//!
//! # Choosing a backend
//!
//! - For persistence across restarts, use [`SqliteLocalStore`]
//!   (`sqlite_store` feature, enabled by default).
//! - For tests or throwaway sessions, use [`InMemoryLocalStore`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use seatbook::storage::{InMemoryLocalStore, LocalStorage, StorageService};
//!
//! let service = StorageService::new(Arc::new(InMemoryLocalStore::new()));
//! let mut events = service.subscribe();
//!
//! let storage = LocalStorage::new(service.local());
//! storage.set("greeting", "hello").unwrap();
//!
//! assert_eq!(storage.get("greeting").as_deref(), Some("hello"));
//! assert_eq!(events.try_recv().unwrap().key, "greeting");
//! ```

/// Storage area module, defining the key/value storage interface.
pub mod area;
/// String/JSON adapter with the malformed-state policy.
pub mod adapter;
/// Event module, providing storage change events.
pub mod event;
/// Service module, wrapping a backend with change notifications.
pub mod service;

/// Local storage backends.
pub mod local {
    /// In-memory local storage implementation.
    pub mod in_memory;
    /// SQLite-backed local storage implementation.
    #[cfg(feature = "sqlite_store")]
    pub mod sqlite_store;
}

pub use adapter::LocalStorage;
pub use area::StorageArea;
pub use event::StorageEvent;
pub use local::in_memory::InMemoryLocalStore;
#[cfg(feature = "sqlite_store")]
pub use local::sqlite_store::SqliteLocalStore;
pub use service::{StorageService, Subscription};
