//! Reservation model.
//!
//! A reservation binds a restaurant to a day with a seat capacity. Only
//! `confirmed` reservations contribute usable capacity to the optimizer;
//! `unavailable` permanently removes the slot from advisor suggestions;
//! `pending` is tracked but otherwise ignored.

use serde::{Deserialize, Serialize};

/// Booking state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Booking is locked in; the slot's capacity is usable.
    Confirmed,
    /// The restaurant could not accommodate; never suggest this slot.
    Unavailable,
    /// Request outstanding; treated as no reservation by the optimizer.
    #[default]
    Pending,
}

/// A restaurant reservation for a specific day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Restaurant name.
    pub restaurant: String,
    /// Day name (lowercase).
    pub day: String,
    /// Seats booked.
    #[serde(default)]
    pub capacity: u32,
    /// Booking state (defaults to pending).
    #[serde(default)]
    pub status: ReservationStatus,
}

impl Reservation {
    /// Creates a pending reservation with zero capacity.
    pub fn new(restaurant: impl Into<String>, day: impl Into<String>) -> Self {
        Self {
            restaurant: restaurant.into(),
            day: day.into(),
            capacity: 0,
            status: ReservationStatus::Pending,
        }
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Shorthand for a confirmed reservation.
    pub fn confirmed(restaurant: impl Into<String>, day: impl Into<String>, capacity: u32) -> Self {
        Self::new(restaurant, day)
            .with_capacity(capacity)
            .with_status(ReservationStatus::Confirmed)
    }
}

/// A proposed next reservation to pursue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSuggestion {
    /// Restaurant to call.
    pub restaurant: String,
    /// Day to book.
    pub day: String,
    /// Party size to ask for.
    pub capacity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_builder() {
        let res = Reservation::confirmed("Bistro", "tuesday", 8);
        assert_eq!(res.restaurant, "Bistro");
        assert_eq!(res.day, "tuesday");
        assert_eq!(res.capacity, 8);
        assert_eq!(res.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn test_status_defaults_to_pending() {
        // Entries without a status field deserialize as pending.
        let res: Reservation =
            serde_json::from_str(r#"{"restaurant": "Bistro", "day": "tuesday"}"#).unwrap();
        assert_eq!(res.status, ReservationStatus::Pending);
        assert_eq!(res.capacity, 0);
    }

    #[test]
    fn test_status_lowercase_names() {
        let res: Reservation = serde_json::from_str(
            r#"{"restaurant": "Bistro", "day": "tuesday", "capacity": 6, "status": "unavailable"}"#,
        )
        .unwrap();
        assert_eq!(res.status, ReservationStatus::Unavailable);
    }
}
