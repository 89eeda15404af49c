use std::fmt;

use crate::engine::catalog::{BusId, SeatId};

/// Composite identity of one seat on one bus. At most one booking record
/// exists per key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatKey {
    pub bus: BusId,
    pub seat: SeatId,
}

impl SeatKey {
    pub fn new(bus: impl Into<BusId>, seat: impl Into<SeatId>) -> Self {
        Self {
            bus: bus.into(),
            seat: seat.into(),
        }
    }
}

/// Names a value in local storage. [`StorageKey::render`] is the only place
/// storage key strings are built.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StorageKey<'a> {
    /// `bookedSeats-{bus}`
    Availability(&'a BusId),
    /// `seat-{seat}-{bus}`
    Booking(&'a SeatKey),
}

impl StorageKey<'_> {
    pub fn render(&self) -> String {
        match self {
            StorageKey::Availability(bus) => format!("bookedSeats-{bus}"),
            StorageKey::Booking(key) => format!("seat-{}-{}", key.seat, key.bus),
        }
    }
}

impl fmt::Display for StorageKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
