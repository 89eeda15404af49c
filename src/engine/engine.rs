use std::sync::Arc;

use crate::engine::booking::{BookingService, SeatKey};
use crate::engine::catalog::BusId;
use crate::engine::config::{EngineConfig, StorageBackend};
use crate::engine::errors::{EngineError, RouteError};
use crate::engine::frontdesk::{Frontdesk, SeatMapView};
use crate::engine::route::Route;
use crate::storage::{InMemoryLocalStore, StorageArea, StorageService, Subscription};

/// What a location resolves to, ready to draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    SeatMap(SeatMapView),
    /// Fleet to pick from before opening a bus's seat map in admin mode.
    AdminPanel { buses: Vec<BusId> },
    /// Form for one seat, with the options the catalog allows.
    BookingForm {
        key: SeatKey,
        destinations: Vec<String>,
        times: Vec<String>,
    },
}

/// Wires local storage, the booking service and the front desk together.
pub struct ReservationEngine {
    /// Configuration for the whole engine.
    config: Arc<EngineConfig>,
    /// Owns the backend; publishes every write.
    storage: StorageService,
    frontdesk: Frontdesk,
}

impl ReservationEngine {
    /// Create a new engine, opening the configured storage backend.
    ///
    /// If `config` is `None`, [`EngineConfig::default`] is used.
    ///
    /// ```
    /// # use seatbook as sb;
    /// let engine = sb::ReservationEngine::new(None).unwrap();
    /// assert!(engine.bookings().availability(&"S098".into()).is_empty());
    /// ```
    pub fn new(config: Option<EngineConfig>) -> Result<Self, EngineError> {
        let config = config.unwrap_or_default();
        config.validate()?;

        let area: Arc<dyn StorageArea> = match &config.storage {
            StorageBackend::InMemory => Arc::new(InMemoryLocalStore::new()),
            #[cfg(feature = "sqlite_store")]
            StorageBackend::Sqlite(path) => {
                let store = crate::storage::SqliteLocalStore::new(path).map_err(EngineError::Storage)?;
                log::info!("local storage at {}", path.display());
                Arc::new(store)
            }
        };
        Self::with_storage(config, area)
    }

    /// Create an engine over an existing backend, ignoring `config.storage`.
    pub fn with_storage(config: EngineConfig, area: Arc<dyn StorageArea>) -> Result<Self, EngineError> {
        config.validate()?;
        let config = Arc::new(config);

        let storage = StorageService::new(area);
        let service = BookingService::new(Arc::new(config.catalog.clone()), storage.local());
        let frontdesk = Frontdesk::new(service, config.booking_delay, config.return_delay);

        log::debug!(
            "reservation engine ready: {} buses, {} seats each",
            config.catalog.buses.len(),
            config.catalog.layout.len()
        );

        Ok(Self {
            config,
            storage,
            frontdesk,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn frontdesk(&self) -> &Frontdesk {
        &self.frontdesk
    }

    pub fn bookings(&self) -> &BookingService {
        self.frontdesk.service()
    }

    /// Receive a [`StorageEvent`](crate::storage::StorageEvent) for every write.
    pub fn subscribe(&self) -> Subscription {
        self.storage.subscribe()
    }

    pub fn route(&self, location: &str) -> Result<Route, RouteError> {
        Route::parse(location, &self.config.catalog)
    }

    /// Resolve a location into the screen to show.
    pub fn open(&self, location: &str) -> Result<Screen, RouteError> {
        let catalog = &self.config.catalog;
        let screen = match self.route(location)? {
            Route::SeatMap(ctx) => Screen::SeatMap(self.frontdesk.seat_map(&ctx)),
            Route::AdminPanel => Screen::AdminPanel {
                buses: catalog.buses.clone(),
            },
            Route::BookSeat(key) => Screen::BookingForm {
                key,
                destinations: catalog.destinations.clone(),
                times: catalog.times.clone(),
            },
        };
        Ok(screen)
    }
}
