use seatbook::{
    BookingError, BookingRequest, EngineConfig, EngineError, ReservationEngine, Screen, SeatSelection,
    ViewContext,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), EngineError> {
    env_logger::init();

    // Bookings live in a SQLite file next to the binary's working directory, so running the
    // walkthrough twice shows the seats booked by the first run.
    let engine_cfg = EngineConfig::builder()
        .sqlite("seatbook-walkthrough.db")
        .booking_delay(Duration::from_millis(500))
        .return_delay(Duration::from_secs(1))
        .build()?;

    let engine = ReservationEngine::new(Some(engine_cfg))?;

    // Every write to local storage is announced. Other views would refresh from these.
    let mut events = engine.subscribe();
    tokio::spawn(async move {
        while let Ok(ev) = events.recv().await {
            // rewriting a record with identical details changes nothing
            if ev.is_noop() {
                continue;
            }
            println!("  [storage] {} = {}", ev.key, ev.new_value);
        }
    });

    // Open the seat map of the default bus, the same way the landing page does.
    if let Ok(Screen::SeatMap(view)) = engine.open("/") {
        println!("bus {}: {} of {} seats booked", view.bus, view.booked_count(), view.left.len() + view.right.len());
    }

    // Click a seat. A free seat leads to the booking form, a booked one is refused.
    let desk = engine.frontdesk();
    let ctx = ViewContext::new("S098", false);
    match desk.select_seat(&ctx, "A1".into()) {
        Ok(SeatSelection::BookingForm(route)) => println!("opening {}", route.href()),
        Ok(SeatSelection::Details(record)) => println!("details: {record:?}"),
        Err(e @ BookingError::AlreadyBooked(_)) => println!("{e}"),
        Err(e) => println!("cannot select seat: {e}"),
    }

    // A submission with an empty field is rejected right away.
    let incomplete = BookingRequest::new("S098", "A2", "", "Uttara", "8:00 AM");
    if let Err(e) = desk.submit_booking(incomplete).await {
        println!("{e}");
    }

    // Submit the booking form and follow the confirmation back to the seat map.
    let request = BookingRequest::new("S098", "A1", "Alice", "Uttara", "8:00 AM");
    match desk.submit_booking(request).await {
        Ok(confirmation) => {
            println!("{}", confirmation.message);
            let back = confirmation.wait_for_return().await;
            println!("returning to {}", back.href());
        }
        Err(e) if e.is_user_correctable() => println!("{e}"),
        Err(e) => println!("booking failed: {e}"),
    }

    // The admin opens the seat map in admin mode and corrects the record.
    let admin = ViewContext::new("S098", true);
    if let Ok(SeatSelection::Details(record)) = desk.select_seat(&admin, "A1".into()) {
        println!("admin sees: {} to {} at {}", record.name, record.destination, record.time);
    }
    let edit = BookingRequest::new("S098", "A1", "Bob", "Gulshan", "9:00 AM");
    match desk.save_edit(edit) {
        Ok(message) => println!("{message}"),
        Err(e) if e.is_user_correctable() => println!("{e}"),
        Err(e) => println!("update failed: {e}"),
    }

    for record in engine.bookings().bookings(&"S098".into()) {
        println!("{} {}: {} ({} at {})", record.bus_number, record.seat_number, record.name, record.destination, record.time);
    }

    // Give the event printer a moment to drain.
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(())
}
