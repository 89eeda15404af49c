use super::area::StorageArea;
use super::event::StorageEvent;
use crate::engine::DEFAULT_CHANNEL_CAPACITY;
use anyhow::Result;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::broadcast;

/// A handle for receiving storage change notifications.
pub type Subscription = broadcast::Receiver<StorageEvent>;

#[derive(Debug)]
struct StorageBus {
    tx: broadcast::Sender<StorageEvent>,
}

impl Default for StorageBus {
    fn default() -> Self {
        let (tx, _rx) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);
        Self { tx }
    }
}

impl StorageBus {
    fn subscribe(&self) -> Subscription {
        self.tx.subscribe()
    }
    fn publish(&self, ev: StorageEvent) {
        // send() only fails when nobody is subscribed
        let _ = self.tx.send(ev);
    }
}

/// Owns the local storage backend and hands out an area that announces
/// every committed write on a broadcast bus.
#[derive(Clone)]
pub struct StorageService {
    local: Arc<dyn StorageArea>,
    bus: Arc<StorageBus>,
}

impl Debug for StorageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageService").finish_non_exhaustive()
    }
}

impl StorageService {
    pub fn new(local: Arc<dyn StorageArea>) -> Self {
        Self {
            local,
            bus: Arc::new(StorageBus::default()),
        }
    }

    pub fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }

    /// The local storage area, wrapped so writes are published.
    pub fn local(&self) -> Arc<dyn StorageArea> {
        Arc::new(NotifyingArea {
            inner: self.local.clone(),
            bus: self.bus.clone(),
        })
    }
}

struct NotifyingArea {
    inner: Arc<dyn StorageArea>,
    bus: Arc<StorageBus>,
}

impl StorageArea for NotifyingArea {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.get_item(key)
    }
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let old = self.inner.get_item(key);
        self.inner.set_item(key, value)?;
        self.bus.publish(StorageEvent {
            key: key.to_string(),
            old_value: old,
            new_value: value.to_string(),
        });
        Ok(())
    }
    fn len(&self) -> usize {
        self.inner.len()
    }
}
