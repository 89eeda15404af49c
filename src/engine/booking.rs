//! Seat availability maps, booking records, and the service that keeps the
//! two consistent.
//!
//! A seat is *unbooked* until [`BookingService::book_seat`] succeeds for it,
//! and *booked* from then on; [`BookingService::update_booking`] replaces the
//! record in place. No operation returns a seat to unbooked.

pub mod availability;
pub mod keys;
pub mod record;
pub mod service;

pub use availability::{SeatAvailability, SeatAvailabilityMap, SeatStatus};
pub use keys::{SeatKey, StorageKey};
pub use record::{BookingRecord, BookingRecords};
pub use service::{BookingRequest, BookingService};
