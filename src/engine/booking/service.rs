use std::sync::Arc;

use super::availability::{SeatAvailability, SeatAvailabilityMap, SeatStatus};
use super::keys::{SeatKey, StorageKey};
use super::record::{BookingRecord, BookingRecords};
use crate::engine::catalog::{BusId, Catalog, SeatId};
use crate::engine::errors::{BookingError, ValidationError};
use crate::storage::{LocalStorage, StorageArea};

/// Booking form input, as submitted by the booking form or the admin editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingRequest {
    pub bus: BusId,
    pub seat: SeatId,
    pub passenger_name: String,
    pub destination: String,
    pub time: String,
}

impl BookingRequest {
    pub fn new(
        bus: impl Into<BusId>,
        seat: impl Into<SeatId>,
        passenger_name: impl Into<String>,
        destination: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            bus: bus.into(),
            seat: seat.into(),
            passenger_name: passenger_name.into(),
            destination: destination.into(),
            time: time.into(),
        }
    }

    pub fn key(&self) -> SeatKey {
        SeatKey {
            bus: self.bus.clone(),
            seat: self.seat.clone(),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("busNumber", self.bus.as_str()),
            ("seatNumber", self.seat.as_str()),
            ("name", self.passenger_name.as_str()),
            ("destination", self.destination.as_str()),
            ("time", self.time.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Booking orchestration over the availability maps and booking records.
///
/// Holds no state of its own: every call reads the current values from
/// local storage, validates, and writes back. Nothing checks whether a seat
/// is already booked, so a second booking for the same seat replaces the
/// first one.
#[derive(Clone)]
pub struct BookingService {
    catalog: Arc<Catalog>,
    availability: SeatAvailability,
    records: BookingRecords,
}

impl BookingService {
    pub fn new(catalog: Arc<Catalog>, area: Arc<dyn StorageArea>) -> Self {
        let storage = LocalStorage::new(area);
        Self {
            catalog,
            availability: SeatAvailability::new(storage.clone()),
            records: BookingRecords::new(storage),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Checks the request without touching storage.
    pub fn validate(&self, request: &BookingRequest) -> Result<(), ValidationError> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        self.catalog.check_bus(&request.bus)?;
        self.catalog.check_seat(&request.bus, &request.seat)?;
        self.catalog.check_destination(&request.destination)?;
        self.catalog.check_time(&request.time)?;
        Ok(())
    }

    /// Books a seat: saves the record, then flags the seat. Returns the
    /// bus's updated availability map.
    pub fn book_seat(&self, request: &BookingRequest) -> Result<SeatAvailabilityMap, BookingError> {
        let map = self.commit(request)?;
        log::info!(
            "booked seat {} on bus {} for {} ({} at {})",
            request.seat,
            request.bus,
            request.passenger_name,
            request.destination,
            request.time
        );
        Ok(map)
    }

    /// Replaces the record of a seat from the admin editor. Same checks and
    /// overwrite semantics as [`book_seat`](Self::book_seat); the booked
    /// flag is re-asserted.
    pub fn update_booking(&self, request: &BookingRequest) -> Result<SeatAvailabilityMap, BookingError> {
        let map = self.commit(request)?;
        log::info!("updated booking of seat {} on bus {}", request.seat, request.bus);
        Ok(map)
    }

    fn commit(&self, request: &BookingRequest) -> Result<SeatAvailabilityMap, BookingError> {
        if let Err(e) = self.validate(request) {
            log::debug!("rejected booking of {}/{}: {e:?}", request.bus, request.seat);
            return Err(e.into());
        }

        let key = request.key();
        let record = BookingRecord::new(
            &key,
            request.passenger_name.as_str(),
            request.destination.as_str(),
            request.time.as_str(),
        );
        self.records.save(&record)?;
        Ok(self.availability.mark_booked(&key.bus, &key.seat)?)
    }

    pub fn availability(&self, bus: &BusId) -> SeatAvailabilityMap {
        self.availability.load(bus)
    }

    /// The stored record for a seat; empty when the seat was never booked.
    pub fn booking(&self, key: &SeatKey) -> BookingRecord {
        self.records.load(key)
    }

    pub fn is_booked(&self, key: &SeatKey) -> bool {
        self.availability.load(&key.bus).is_booked(&key.seat)
    }

    /// Every seat of the layout with its flag, in layout order.
    pub fn seat_statuses(&self, bus: &BusId) -> Vec<SeatStatus> {
        let map = self.availability.load(bus);
        self.catalog
            .layout
            .seats()
            .into_iter()
            .map(|seat| SeatStatus {
                booked: map.is_booked(&seat),
                seat,
            })
            .collect()
    }

    /// Complete records of the booked seats on a bus, in layout order.
    pub fn bookings(&self, bus: &BusId) -> Vec<BookingRecord> {
        let map = self.availability.load(bus);
        self.catalog
            .layout
            .seats()
            .into_iter()
            .filter(|seat| map.is_booked(seat))
            .map(|seat| self.records.load(&SeatKey { bus: bus.clone(), seat }))
            .filter(BookingRecord::is_complete)
            .collect()
    }

    /// Storage keys of the bus whose values no longer decode. Regular reads
    /// treat those as absent.
    pub fn corrupted_keys(&self, bus: &BusId) -> Vec<String> {
        let mut corrupted = Vec::new();
        if self.availability.inspect(bus).is_err() {
            corrupted.push(StorageKey::Availability(bus).render());
        }
        for seat in self.catalog.layout.seats() {
            let key = SeatKey { bus: bus.clone(), seat };
            if self.records.inspect(&key).is_err() {
                corrupted.push(StorageKey::Booking(&key).render());
            }
        }
        corrupted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::errors::StoreError;
    use crate::storage::InMemoryLocalStore;

    fn service() -> (BookingService, Arc<InMemoryLocalStore>) {
        let area = Arc::new(InMemoryLocalStore::new());
        (
            BookingService::new(Arc::new(Catalog::default()), area.clone()),
            area,
        )
    }

    fn alice() -> BookingRequest {
        BookingRequest::new("S098", "A1", "Alice", "Uttara", "8:00 AM")
    }

    #[test]
    fn booking_flags_seat_and_stores_record() {
        let (svc, _) = service();
        let key = SeatKey::new("S098", "A1");
        assert!(!svc.is_booked(&key));

        let map = svc.book_seat(&alice()).unwrap();
        assert!(map.is_booked(&"A1".into()));
        assert!(svc.availability(&"S098".into()).is_booked(&"A1".into()));

        let record = svc.booking(&key);
        assert_eq!(
            record,
            BookingRecord {
                name: "Alice".into(),
                seat_number: "A1".into(),
                bus_number: "S098".into(),
                destination: "Uttara".into(),
                time: "8:00 AM".into(),
            }
        );
    }

    #[test]
    fn empty_fields_fail_and_write_nothing() {
        for request in [
            BookingRequest::new("S098", "A1", "", "Uttara", "8:00 AM"),
            BookingRequest::new("S098", "A1", "Alice", "", "8:00 AM"),
            BookingRequest::new("S098", "A1", "Alice", "Uttara", ""),
        ] {
            let (svc, area) = service();
            let err = svc.book_seat(&request).unwrap_err();
            assert!(matches!(
                err,
                BookingError::Validation(ValidationError::MissingFields(_))
            ));
            assert_eq!(area.len(), 0);
        }
    }

    #[test]
    fn rejected_booking_keeps_prior_state() {
        let (svc, _) = service();
        svc.book_seat(&BookingRequest::new("S098", "B1", "Dana", "Gulshan", "5:00 PM"))
            .unwrap();
        let before = svc.availability(&"S098".into());

        let nameless = BookingRequest::new("S098", "A1", "", "Uttara", "8:00 AM");
        assert!(svc.book_seat(&nameless).is_err());

        let after = svc.availability(&"S098".into());
        assert_eq!(before, after);
        assert_eq!(after.get(&"A1".into()), None);
    }

    #[test]
    fn catalog_violations_are_validation_errors() {
        let (svc, area) = service();
        let cases = [
            BookingRequest::new("S200", "A1", "Alice", "Uttara", "8:00 AM"),
            BookingRequest::new("S098", "F9", "Alice", "Uttara", "8:00 AM"),
            BookingRequest::new("S098", "A+1", "Alice", "Uttara", "8:00 AM"),
            BookingRequest::new("S098", "A-1", "Alice", "Uttara", "8:00 AM"),
            BookingRequest::new("S098", "A1", "Alice", "Banani", "8:00 AM"),
            BookingRequest::new("S098", "A1", "Alice", "Uttara", "7:15 AM"),
        ];
        for request in cases {
            assert!(matches!(
                svc.book_seat(&request),
                Err(BookingError::Validation(_))
            ));
        }
        assert_eq!(area.len(), 0);
    }

    #[test]
    fn buses_are_isolated() {
        let (svc, _) = service();
        svc.book_seat(&alice()).unwrap();

        assert!(svc.availability(&"S099".into()).is_empty());
        assert!(svc.booking(&SeatKey::new("S099", "A1")).is_empty());
    }

    #[test]
    fn admin_update_replaces_record_and_keeps_flag() {
        let (svc, _) = service();
        svc.book_seat(&alice()).unwrap();

        let bob = BookingRequest::new("S098", "A1", "Bob", "Gulshan", "9:00 AM");
        let map = svc.update_booking(&bob).unwrap();
        assert!(map.is_booked(&"A1".into()));

        let record = svc.booking(&SeatKey::new("S098", "A1"));
        assert_eq!(record.name, "Bob");
        assert_eq!(record.destination, "Gulshan");
        assert_eq!(record.time, "9:00 AM");
    }

    #[test]
    fn rejected_update_keeps_existing_booking() {
        let (svc, _) = service();
        svc.book_seat(&alice()).unwrap();
        let key = SeatKey::new("S098", "A1");

        for request in [
            BookingRequest::new("S098", "A1", "", "Gulshan", "9:00 AM"),
            BookingRequest::new("S098", "A1", "Bob", "", "9:00 AM"),
            BookingRequest::new("S098", "A1", "Bob", "Gulshan", ""),
        ] {
            assert!(matches!(
                svc.update_booking(&request),
                Err(BookingError::Validation(ValidationError::MissingFields(_)))
            ));
            assert_eq!(svc.booking(&key), BookingRecord::new(&key, "Alice", "Uttara", "8:00 AM"));
            assert!(svc.is_booked(&key));
        }
    }

    #[test]
    fn second_booking_overwrites_first() {
        let (svc, _) = service();
        svc.book_seat(&alice()).unwrap();
        svc.book_seat(&BookingRequest::new("S098", "A1", "Eve", "Dhanmondi", "6:00 PM"))
            .unwrap();
        assert_eq!(svc.booking(&SeatKey::new("S098", "A1")).name, "Eve");
    }

    #[test]
    fn malformed_availability_reads_empty() {
        let (svc, area) = service();
        area.set_item("bookedSeats-S098", "oops").unwrap();
        assert!(svc.availability(&"S098".into()).is_empty());
        assert_eq!(svc.corrupted_keys(&"S098".into()), vec!["bookedSeats-S098"]);
    }

    #[test]
    fn seat_statuses_follow_layout() {
        let (svc, _) = service();
        svc.book_seat(&BookingRequest::new("S100", "B2", "Farid", "Uttara", "9:00 AM"))
            .unwrap();
        let statuses = svc.seat_statuses(&"S100".into());
        assert_eq!(statuses.len(), 15);
        let booked: Vec<&str> = statuses
            .iter()
            .filter(|s| s.booked)
            .map(|s| s.seat.as_str())
            .collect();
        assert_eq!(booked, ["B2"]);
    }

    #[test]
    fn bookings_lists_complete_records_in_layout_order() {
        let (svc, area) = service();
        svc.book_seat(&BookingRequest::new("S099", "C1", "Gita", "Uttara", "8:00 AM"))
            .unwrap();
        svc.book_seat(&BookingRequest::new("S099", "A2", "Hasan", "Gulshan", "5:00 PM"))
            .unwrap();
        // flagged seat whose record got lost
        area.set_item("bookedSeats-S099", r#"{"A2":true,"C1":true,"E3":true}"#)
            .unwrap();

        let names: Vec<String> = svc
            .bookings(&"S099".into())
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["Hasan", "Gita"]);
    }

    #[test]
    fn storage_failures_surface_as_store_errors() {
        struct Full;
        impl StorageArea for Full {
            fn get_item(&self, _key: &str) -> Option<String> {
                None
            }
            fn set_item(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
                anyhow::bail!("quota exceeded")
            }
            fn len(&self) -> usize {
                0
            }
        }

        let svc = BookingService::new(Arc::new(Catalog::default()), Arc::new(Full));
        let err = svc.book_seat(&alice()).unwrap_err();
        assert!(matches!(err, BookingError::Store(StoreError::Write { .. })));
    }
}
