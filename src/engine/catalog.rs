//! Fixed reservation catalog: the bus fleet, the seat layout shared by every
//! bus, and the destinations and departure times a booking may name.
//!
//! The catalog is configuration, never derived from stored state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::errors::ValidationError;

/// Bus identifier such as `S098`. Partition key of all stored state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusId(String);

impl BusId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BusId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Seat identifier: row letter followed by column number, e.g. `A1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(String);

impl SeatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn at(row: char, column: u8) -> Self {
        Self(format!("{row}{column}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeatId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Rows of seats, `columns` seats per row. Column 1 sits alone on the
/// left of the aisle, the remaining columns on the right.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatLayout {
    pub rows: Vec<char>,
    pub columns: u8,
}

impl Default for SeatLayout {
    fn default() -> Self {
        Self {
            rows: vec!['A', 'B', 'C', 'D', 'E'],
            columns: 3,
        }
    }
}

impl SeatLayout {
    /// All seats in row-major order (`A1, A2, A3, B1, ...`).
    pub fn seats(&self) -> Vec<SeatId> {
        self.rows
            .iter()
            .flat_map(|&row| (1..=self.columns).map(move |col| SeatId::at(row, col)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len() * self.columns as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, seat: &SeatId) -> bool {
        let mut chars = seat.as_str().chars();
        let Some(row) = chars.next() else {
            return false;
        };
        let column = chars.as_str();
        // digits only, no leading zero: rejects "A01", "A+1", "A-1"
        if column.is_empty() || column.starts_with('0') || !column.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        match column.parse::<u8>() {
            Ok(col) => self.rows.contains(&row) && (1..=self.columns).contains(&col),
            Err(_) => false,
        }
    }

    /// Splits the seats at the aisle: column 1 on the left, the rest on the right.
    pub fn aisle_split(&self) -> (Vec<SeatId>, Vec<SeatId>) {
        let mut left = Vec::with_capacity(self.rows.len());
        let mut right = Vec::with_capacity(self.len().saturating_sub(self.rows.len()));
        for &row in &self.rows {
            for col in 1..=self.columns {
                let seat = SeatId::at(row, col);
                if col == 1 {
                    left.push(seat);
                } else {
                    right.push(seat);
                }
            }
        }
        (left, right)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub buses: Vec<BusId>,
    #[serde(default)]
    pub layout: SeatLayout,
    pub destinations: Vec<String>,
    pub times: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            buses: ["S098", "S099", "S100"].into_iter().map(BusId::new).collect(),
            layout: SeatLayout::default(),
            destinations: ["Mirpur 11", "Uttara", "Gulshan", "Dhanmondi"]
                .into_iter()
                .map(String::from)
                .collect(),
            times: ["8:00 AM", "9:00 AM", "5:00 PM", "6:00 PM"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Catalog {
    /// The bus shown when navigation names none.
    pub fn default_bus(&self) -> Option<&BusId> {
        self.buses.first()
    }

    pub fn has_bus(&self, bus: &BusId) -> bool {
        self.buses.contains(bus)
    }

    pub fn check_bus(&self, bus: &BusId) -> Result<(), ValidationError> {
        if self.has_bus(bus) {
            Ok(())
        } else {
            Err(ValidationError::UnknownBus(bus.clone()))
        }
    }

    pub fn check_seat(&self, bus: &BusId, seat: &SeatId) -> Result<(), ValidationError> {
        if self.layout.contains(seat) {
            Ok(())
        } else {
            Err(ValidationError::UnknownSeat {
                bus: bus.clone(),
                seat: seat.clone(),
            })
        }
    }

    pub fn check_destination(&self, destination: &str) -> Result<(), ValidationError> {
        if self.destinations.iter().any(|d| d == destination) {
            Ok(())
        } else {
            Err(ValidationError::UnknownDestination(destination.to_string()))
        }
    }

    pub fn check_time(&self, time: &str) -> Result<(), ValidationError> {
        if self.times.iter().any(|t| t == time) {
            Ok(())
        } else {
            Err(ValidationError::UnknownTime(time.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_has_fifteen_seats_row_major() {
        let layout = SeatLayout::default();
        let seats = layout.seats();
        assert_eq!(seats.len(), 15);
        assert_eq!(layout.len(), 15);
        assert_eq!(seats.first(), Some(&SeatId::new("A1")));
        assert_eq!(seats[3], SeatId::new("B1"));
        assert_eq!(seats.last(), Some(&SeatId::new("E3")));
    }

    #[test]
    fn layout_membership() {
        let layout = SeatLayout::default();
        assert!(layout.contains(&"A1".into()));
        assert!(layout.contains(&"E3".into()));
        assert!(!layout.contains(&"E4".into()));
        assert!(!layout.contains(&"F1".into()));
        assert!(!layout.contains(&"A0".into()));
        assert!(!layout.contains(&"A01".into()));
        assert!(!layout.contains(&"".into()));
        assert!(!layout.contains(&"a1".into()));
        assert!(!layout.contains(&"A+1".into()));
        assert!(!layout.contains(&"A-1".into()));
        assert!(!layout.contains(&"A 1".into()));
        assert!(!layout.contains(&"A".into()));
    }

    #[test]
    fn aisle_split_puts_first_column_left() {
        let (left, right) = SeatLayout::default().aisle_split();
        let left: Vec<&str> = left.iter().map(SeatId::as_str).collect();
        assert_eq!(left, ["A1", "B1", "C1", "D1", "E1"]);
        assert_eq!(right.len(), 10);
        assert_eq!(right[0], SeatId::new("A2"));
        assert_eq!(right[1], SeatId::new("A3"));
    }

    #[test]
    fn default_catalog_matches_fleet() {
        let catalog = Catalog::default();
        assert_eq!(catalog.default_bus(), Some(&BusId::new("S098")));
        assert!(catalog.check_bus(&"S100".into()).is_ok());
        assert_eq!(
            catalog.check_bus(&"S101".into()),
            Err(ValidationError::UnknownBus("S101".into()))
        );
        assert!(catalog.check_destination("Mirpur 11").is_ok());
        assert!(catalog.check_destination("Banani").is_err());
        assert!(catalog.check_time("6:00 PM").is_ok());
        assert!(catalog.check_time("7:00 PM").is_err());
    }

    #[test]
    fn catalog_loads_from_json_with_default_layout() {
        let catalog: Catalog = serde_json::from_str(
            r#"{"buses":["X1"],"destinations":["Uttara"],"times":["8:00 AM"]}"#,
        )
        .unwrap();
        assert_eq!(catalog.buses, vec![BusId::new("X1")]);
        assert_eq!(catalog.layout, SeatLayout::default());
    }
}
