//! Booking lifecycle status.
//!
//! A closed enum rather than free-form strings; the storage layer's label
//! vocabulary is mapped exhaustively at the boundary via [`BookingStatus::from_label`].

use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking.
///
/// Only active statuses ([`Pending`](BookingStatus::Pending) and
/// [`Confirmed`](BookingStatus::Confirmed)) block other bookings; completed
/// and cancelled bookings are never conflict sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// True when this booking occupies its time slot.
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    /// Map a storage-layer label to a status. Case-insensitive; unknown
    /// labels return `None` rather than defaulting to anything.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "PENDING" => Some(BookingStatus::Pending),
            "CONFIRMED" => Some(BookingStatus::Confirmed),
            "COMPLETED" => Some(BookingStatus::Completed),
            "CANCELLED" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// The canonical storage-layer label for this status.
    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_round_trip_is_exhaustive() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::from_label(status.label()), Some(status));
        }
    }

    #[test]
    fn from_label_is_case_insensitive_and_closed() {
        assert_eq!(
            BookingStatus::from_label("confirmed"),
            Some(BookingStatus::Confirmed)
        );
        assert_eq!(BookingStatus::from_label("NO_SHOW"), None);
        assert_eq!(BookingStatus::from_label(""), None);
    }

    #[test]
    fn only_pending_and_confirmed_are_active() {
        assert!(BookingStatus::Pending.is_active());
        assert!(BookingStatus::Confirmed.is_active());
        assert!(!BookingStatus::Completed.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
    }
}
