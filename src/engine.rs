//! Seat reservation engine.
//!
//! [`ReservationEngine`] ties a [local storage](storage) backend to the
//! [booking service](booking::BookingService) and the [front desk](frontdesk::Frontdesk).

pub mod booking;
pub mod catalog;
pub mod config;
mod engine;
pub mod errors;
pub mod frontdesk;
pub mod route;
pub mod storage;

pub use booking::{BookingRecord, BookingRequest, BookingService, SeatKey};
pub use catalog::{BusId, Catalog, SeatId, SeatLayout};
pub use config::{ConfigError, EngineConfig, StorageBackend};
pub use engine::{ReservationEngine, Screen};
pub use errors::{BookingError, EngineError, RouteError, StoreError, ValidationError};
pub use frontdesk::{BookingConfirmation, Frontdesk, SeatMapView, SeatSelection};
pub use route::{Route, ViewContext};

/// Capacity of the storage change broadcast bus.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 128;
