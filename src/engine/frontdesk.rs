//! Front desk: what the seat map, the booking form and the admin editor ask
//! of the engine.
//!
//! The front desk owns the user-facing timing (the pause while a booking is
//! "processed", and the pause before returning to the seat map) and the
//! feedback texts. The underlying [`BookingService`] stays synchronous.

use std::time::Duration;

use serde::Serialize;

use crate::engine::booking::{
    BookingRecord, BookingRequest, BookingService, SeatAvailabilityMap, SeatKey, SeatStatus,
};
use crate::engine::catalog::{BusId, SeatId};
use crate::engine::errors::BookingError;
use crate::engine::route::{Route, ViewContext};

/// Seat map of one bus, split at the aisle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeatMapView {
    pub bus: BusId,
    pub admin: bool,
    /// Column 1 of every row.
    pub left: Vec<SeatStatus>,
    /// The remaining columns, row by row.
    pub right: Vec<SeatStatus>,
}

impl SeatMapView {
    pub fn booked_count(&self) -> usize {
        self.left.iter().chain(&self.right).filter(|s| s.booked).count()
    }
}

/// Outcome of clicking a seat on the seat map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeatSelection {
    /// Admin mode: the stored record, empty when the seat was never booked.
    Details(BookingRecord),
    /// Navigate to the booking form for the seat.
    BookingForm(Route),
}

#[derive(Clone, Debug, PartialEq)]
pub struct BookingConfirmation {
    pub map: SeatAvailabilityMap,
    pub message: String,
    /// Where to go once `return_after` has elapsed.
    pub return_to: Route,
    pub return_after: Duration,
}

impl BookingConfirmation {
    /// Waits out the return delay and yields the route to navigate to.
    pub async fn wait_for_return(self) -> Route {
        if !self.return_after.is_zero() {
            tokio::time::sleep(self.return_after).await;
        }
        self.return_to
    }
}

#[derive(Clone)]
pub struct Frontdesk {
    service: BookingService,
    booking_delay: Duration,
    return_delay: Duration,
}

impl Frontdesk {
    pub fn new(service: BookingService, booking_delay: Duration, return_delay: Duration) -> Self {
        Self {
            service,
            booking_delay,
            return_delay,
        }
    }

    pub fn service(&self) -> &BookingService {
        &self.service
    }

    pub fn seat_map(&self, ctx: &ViewContext) -> SeatMapView {
        let statuses = self.service.seat_statuses(&ctx.bus);
        let (left_ids, _) = self.service.catalog().layout.aisle_split();
        let (left, right): (Vec<SeatStatus>, Vec<SeatStatus>) = statuses
            .into_iter()
            .partition(|status| left_ids.contains(&status.seat));

        SeatMapView {
            bus: ctx.bus.clone(),
            admin: ctx.admin,
            left,
            right,
        }
    }

    pub fn select_seat(&self, ctx: &ViewContext, seat: SeatId) -> Result<SeatSelection, BookingError> {
        let catalog = self.service.catalog();
        catalog.check_bus(&ctx.bus)?;
        catalog.check_seat(&ctx.bus, &seat)?;

        let key = SeatKey {
            bus: ctx.bus.clone(),
            seat,
        };
        if ctx.admin {
            return Ok(SeatSelection::Details(self.service.booking(&key)));
        }
        if self.service.is_booked(&key) {
            return Err(BookingError::AlreadyBooked(key));
        }
        Ok(SeatSelection::BookingForm(Route::BookSeat(key)))
    }

    /// Validates, waits out the booking delay, then books. Invalid input is
    /// rejected before the delay.
    pub async fn submit_booking(&self, request: BookingRequest) -> Result<BookingConfirmation, BookingError> {
        self.service.validate(&request)?;

        if !self.booking_delay.is_zero() {
            log::debug!("holding booking of {}/{} for {:?}", request.bus, request.seat, self.booking_delay);
            tokio::time::sleep(self.booking_delay).await;
        }

        let map = self.service.book_seat(&request)?;
        // the fleet is non-empty once the request validated
        let return_to = Route::home(self.service.catalog()).unwrap_or_else(|_| {
            Route::SeatMap(ViewContext {
                bus: request.bus.clone(),
                admin: false,
            })
        });

        Ok(BookingConfirmation {
            map,
            message: format!(
                "Seat {} booked for {} on bus {} to {} at {}.",
                request.seat, request.passenger_name, request.bus, request.destination, request.time
            ),
            return_to,
            return_after: self.return_delay,
        })
    }

    /// Saves an edit from the admin seat modal and returns the toast text.
    pub fn save_edit(&self, request: BookingRequest) -> Result<String, BookingError> {
        self.service.update_booking(&request)?;
        Ok(format!("Seat {} updated successfully!", request.seat))
    }
}
