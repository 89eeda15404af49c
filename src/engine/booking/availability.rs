use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::keys::StorageKey;
use crate::engine::catalog::{BusId, SeatId};
use crate::engine::errors::StoreError;
use crate::storage::LocalStorage;

/// Per-bus seat → "is booked" flags. An absent seat is not booked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatAvailabilityMap(BTreeMap<SeatId, bool>);

impl SeatAvailabilityMap {
    pub fn is_booked(&self, seat: &SeatId) -> bool {
        self.0.get(seat).copied().unwrap_or(false)
    }

    /// The raw flag, `None` when the seat was never written.
    pub fn get(&self, seat: &SeatId) -> Option<bool> {
        self.0.get(seat).copied()
    }

    pub fn booked_seats(&self) -> impl Iterator<Item = &SeatId> {
        self.0
            .iter()
            .filter(|(_, booked)| **booked)
            .map(|(seat, _)| seat)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sets the flag; returns false when it was already set.
    fn mark(&mut self, seat: &SeatId) -> bool {
        self.0.insert(seat.clone(), true) != Some(true)
    }
}

/// A seat and its booked flag, as drawn on the seat map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeatStatus {
    pub seat: SeatId,
    pub booked: bool,
}

/// Reads and writes the availability map of each bus at `bookedSeats-{bus}`.
#[derive(Clone)]
pub struct SeatAvailability {
    storage: LocalStorage,
}

impl SeatAvailability {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// The bus's map; empty when absent or malformed.
    pub fn load(&self, bus: &BusId) -> SeatAvailabilityMap {
        self.storage.get_json(
            &StorageKey::Availability(bus).render(),
            SeatAvailabilityMap::default(),
        )
    }

    /// Marks `seat` booked and persists the whole map. `seat` must belong to
    /// the layout; the booking service checks this before calling.
    pub fn mark_booked(&self, bus: &BusId, seat: &SeatId) -> Result<SeatAvailabilityMap, StoreError> {
        let mut map = self.load(bus);
        if map.mark(seat) {
            self.storage
                .set_json(&StorageKey::Availability(bus).render(), &map)?;
        } else {
            log::debug!("seat {seat} on bus {bus} already marked booked");
        }
        Ok(map)
    }

    pub(crate) fn inspect(&self, bus: &BusId) -> Result<Option<SeatAvailabilityMap>, StoreError> {
        self.storage
            .try_get_json(&StorageKey::Availability(bus).render())
    }
}
