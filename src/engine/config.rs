//! Engine configuration.
//!
//! `EngineConfig` selects the storage backend, carries the fixed
//! [`Catalog`] and sets the front-desk delays. Defaults come from
//! [`Default`]; [`EngineConfig::builder()`] customizes with validation.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use seatbook::config::{EngineConfig, StorageBackend};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = EngineConfig::builder()
//!     .storage(StorageBackend::InMemory)
//!     .booking_delay(Duration::from_secs(2))
//!     .return_delay(Duration::from_secs(5))
//!     .build()?; // returns Result<EngineConfig, ConfigError>
//! assert_eq!(cfg.catalog.buses.len(), 3);
//! # Ok(()) }
//! ```
//!
//! # Fields (summary)
//! - `catalog`: bus fleet, seat layout, destinations and departure times.
//! - `storage`: where local storage lives (default: in memory).
//! - `booking_delay`: pause before a submitted booking is written (default: none).
//! - `return_delay`: pause before a confirmation navigates back (default: none).

use std::collections::HashSet;
use std::fmt;
#[cfg(feature = "sqlite_store")]
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::catalog::{BusId, Catalog, SeatLayout};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    InMemory,
    /// SQLite database file, created on first use.
    #[cfg(feature = "sqlite_store")]
    Sqlite(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineConfig {
    pub catalog: Catalog,
    pub storage: StorageBackend,
    pub booking_delay: Duration,
    pub return_delay: Duration,
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    inner: EngineConfig,
}

impl EngineConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut EngineConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn catalog(self, catalog: Catalog) -> Self { self.map(|c| c.catalog = catalog) }
    pub fn buses<I, S>(self, buses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<BusId>,
    {
        self.map(|c| c.catalog.buses = buses.into_iter().map(Into::into).collect())
    }
    pub fn layout(self, layout: SeatLayout) -> Self { self.map(|c| c.catalog.layout = layout) }
    pub fn storage(self, storage: StorageBackend) -> Self { self.map(|c| c.storage = storage) }
    #[cfg(feature = "sqlite_store")]
    pub fn sqlite<P: Into<PathBuf>>(self, path: P) -> Self { self.map(|c| c.storage = StorageBackend::Sqlite(path.into())) }
    pub fn booking_delay(self, delay: Duration) -> Self { self.map(|c| c.booking_delay = delay) }
    pub fn return_delay(self, delay: Duration) -> Self { self.map(|c| c.return_delay = delay) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut EngineConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoBuses,
    DuplicateBus(BusId),
    EmptyLayout,
    NoDestinations,
    NoTimes,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoBuses => write!(f, "catalog must list at least one bus"),
            ConfigError::DuplicateBus(bus) => write!(f, "bus {bus} is listed more than once"),
            ConfigError::EmptyLayout => write!(f, "seat layout must have at least one row and column"),
            ConfigError::NoDestinations => write!(f, "catalog must list at least one destination"),
            ConfigError::NoTimes => write!(f, "catalog must list at least one departure time"),
        }
    }
}
impl std::error::Error for ConfigError {}

fn validate(c: &EngineConfig) -> Result<(), ConfigError> {
    let catalog = &c.catalog;
    if catalog.buses.is_empty() {
        return Err(ConfigError::NoBuses);
    }
    let mut seen = HashSet::new();
    if let Some(dup) = catalog.buses.iter().find(|b| !seen.insert(*b)) {
        return Err(ConfigError::DuplicateBus(dup.clone()));
    }
    if catalog.layout.is_empty() {
        return Err(ConfigError::EmptyLayout);
    }
    if catalog.destinations.is_empty() {
        return Err(ConfigError::NoDestinations);
    }
    if catalog.times.is_empty() {
        return Err(ConfigError::NoTimes);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = EngineConfig::builder().build().unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.storage, StorageBackend::InMemory);
        assert!(cfg.booking_delay.is_zero());
        assert!(cfg.return_delay.is_zero());
    }

    #[test]
    fn rejects_empty_fleet_and_duplicates() {
        let empty: Vec<&str> = Vec::new();
        assert_eq!(
            EngineConfig::builder().buses(empty).build().unwrap_err(),
            ConfigError::NoBuses
        );
        assert_eq!(
            EngineConfig::builder().buses(["S098", "S099", "S098"]).build().unwrap_err(),
            ConfigError::DuplicateBus(BusId::new("S098"))
        );
    }

    #[test]
    fn rejects_empty_layout_and_lists() {
        let err = EngineConfig::builder()
            .layout(SeatLayout { rows: vec!['A'], columns: 0 })
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyLayout);

        let err = EngineConfig::builder()
            .with(|c| c.catalog.times.clear())
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "catalog must list at least one departure time");

        let err = EngineConfig::builder()
            .with(|c| c.catalog.destinations.clear())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::NoDestinations);
    }

    #[test]
    fn catalog_loads_from_json_with_default_layout() {
        let catalog: Catalog = serde_json::from_str(
            r#"{"buses":["X1"],"destinations":["Uttara"],"times":["8:00 AM"]}"#,
        )
        .unwrap();
        let cfg = EngineConfig::builder().catalog(catalog).build().unwrap();
        assert_eq!(cfg.catalog.layout, SeatLayout::default());
        assert_eq!(cfg.catalog.buses, vec![BusId::new("X1")]);
    }
}
