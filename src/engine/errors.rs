use crate::engine::booking::keys::SeatKey;
use crate::engine::catalog::{BusId, SeatId};
use crate::engine::config::ConfigError;

/// Rejected booking input. Nothing has been written when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill out all fields.")]
    MissingFields(Vec<&'static str>),

    #[error("Unknown bus {0}")]
    UnknownBus(BusId),

    #[error("Seat {seat} does not exist on bus {bus}")]
    UnknownSeat { bus: BusId, seat: SeatId },

    #[error("Unknown destination {0:?}")]
    UnknownDestination(String),

    #[error("Unknown departure time {0:?}")]
    UnknownTime(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Only reported by the strict read path; regular reads substitute defaults.
    #[error("Stored value at {key} is not valid JSON: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot encode value for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Write to {key} failed: {source}")]
    Write {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Seat {} is already booked.", .0.seat)]
    AlreadyBooked(SeatKey),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BookingError {
    /// Validation failures and already-booked seats are fixed by the user
    /// resubmitting; storage failures are not.
    pub fn is_user_correctable(&self) -> bool {
        !matches!(self, BookingError::Store(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Invalid location {0:?}: {1}")]
    InvalidLocation(String, url::ParseError),

    #[error("No route for path {0}")]
    NotFound(String),

    #[error("Missing query parameter {0:?}")]
    MissingParameter(&'static str),

    #[error("Catalog has no buses")]
    EmptyFleet,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot open local storage: {0}")]
    Storage(anyhow::Error),
}
