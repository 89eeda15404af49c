//! Navigation between the seat map, the admin panel and the booking form.
//!
//! Locations look like `/?bus=S099&admin=true`, `/admin` and
//! `/book-seat?seat=A1&bus=S098`. They are resolved against a fixed base so
//! both bare paths and query strings parse.

use url::form_urlencoded;
use url::Url;

use crate::engine::booking::SeatKey;
use crate::engine::catalog::{BusId, Catalog};
use crate::engine::errors::RouteError;

const BASE: &str = "seatbook://app/";

/// Which bus the seat map shows, and whether clicks open the admin editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewContext {
    pub bus: BusId,
    pub admin: bool,
}

impl ViewContext {
    pub fn new(bus: impl Into<BusId>, admin: bool) -> Self {
        Self {
            bus: bus.into(),
            admin,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/`
    SeatMap(ViewContext),
    /// `/admin`
    AdminPanel,
    /// `/book-seat`
    BookSeat(SeatKey),
}

impl Route {
    pub fn parse(location: &str, catalog: &Catalog) -> Result<Route, RouteError> {
        let base = Url::parse(BASE).map_err(|e| RouteError::InvalidLocation(BASE.to_string(), e))?;
        let url = base
            .join(location)
            .map_err(|e| RouteError::InvalidLocation(location.to_string(), e))?;

        let query = |name: &str| {
            url.query_pairs()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.into_owned())
        };

        match url.path() {
            "/" | "" => {
                let bus = match query("bus").filter(|b| !b.is_empty()) {
                    Some(bus) => BusId::new(bus),
                    None => catalog.default_bus().cloned().ok_or(RouteError::EmptyFleet)?,
                };
                let admin = query("admin").as_deref() == Some("true");
                Ok(Route::SeatMap(ViewContext { bus, admin }))
            }
            "/admin" => Ok(Route::AdminPanel),
            "/book-seat" => {
                let seat = query("seat")
                    .filter(|s| !s.is_empty())
                    .ok_or(RouteError::MissingParameter("seat"))?;
                let bus = query("bus")
                    .filter(|b| !b.is_empty())
                    .ok_or(RouteError::MissingParameter("bus"))?;
                Ok(Route::BookSeat(SeatKey::new(bus.as_str(), seat.as_str())))
            }
            other => Err(RouteError::NotFound(other.to_string())),
        }
    }

    /// The seat map of a bus with admin mode on, as opened from the admin panel.
    pub fn admin_details(bus: &BusId) -> Route {
        Route::SeatMap(ViewContext {
            bus: bus.clone(),
            admin: true,
        })
    }

    /// The seat map of the catalog's default bus.
    pub fn home(catalog: &Catalog) -> Result<Route, RouteError> {
        Route::parse("/", catalog)
    }

    pub fn href(&self) -> String {
        match self {
            Route::SeatMap(ctx) => {
                let mut query = form_urlencoded::Serializer::new(String::new());
                query.append_pair("bus", ctx.bus.as_str());
                if ctx.admin {
                    query.append_pair("admin", "true");
                }
                format!("/?{}", query.finish())
            }
            Route::AdminPanel => "/admin".to_string(),
            Route::BookSeat(key) => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("seat", key.seat.as_str())
                    .append_pair("bus", key.bus.as_str())
                    .finish();
                format!("/book-seat?{query}")
            }
        }
    }
}
