use serde::{Deserialize, Serialize};

use super::keys::{SeatKey, StorageKey};
use crate::engine::errors::{BookingError, ValidationError};
use crate::storage::LocalStorage;

/// One passenger's reservation for one seat on one bus.
///
/// Stored as `{ name, seatNumber, busNumber, destination, time }`. Missing
/// fields decode as empty strings, so a stored `{}` reads back as the empty
/// record of an unbooked seat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingRecord {
    pub name: String,
    pub seat_number: String,
    pub bus_number: String,
    pub destination: String,
    pub time: String,
}

impl BookingRecord {
    pub fn new(
        key: &SeatKey,
        name: impl Into<String>,
        destination: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            seat_number: key.seat.to_string(),
            bus_number: key.bus.to_string(),
            destination: destination.into(),
            time: time.into(),
        }
    }

    pub fn key(&self) -> SeatKey {
        SeatKey::new(self.bus_number.as_str(), self.seat_number.as_str())
    }

    /// Names of the empty fields, in storage order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("seatNumber", &self.seat_number),
            ("busNumber", &self.bus_number),
            ("destination", &self.destination),
            ("time", &self.time),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }
}

/// Reads and writes [`BookingRecord`]s at `seat-{seat}-{bus}`.
#[derive(Clone)]
pub struct BookingRecords {
    storage: LocalStorage,
}

impl BookingRecords {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// The stored record, or the empty record when absent or malformed.
    pub fn load(&self, key: &SeatKey) -> BookingRecord {
        let record = self
            .storage
            .get_json(&StorageKey::Booking(key).render(), BookingRecord::default());
        log::debug!("loaded booking record for {}/{}", key.bus, key.seat);
        record
    }

    /// Validates `record` and overwrites whatever is stored for its seat.
    pub fn save(&self, record: &BookingRecord) -> Result<(), BookingError> {
        record.validate()?;
        let key = record.key();
        self.storage
            .set_json(&StorageKey::Booking(&key).render(), record)?;
        Ok(())
    }

    /// Strict read for diagnostics; malformed values are reported, not hidden.
    pub(crate) fn inspect(&self, key: &SeatKey) -> Result<Option<BookingRecord>, BookingError> {
        Ok(self
            .storage
            .try_get_json(&StorageKey::Booking(key).render())?)
    }
}
