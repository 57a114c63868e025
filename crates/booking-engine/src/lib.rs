//! # booking-engine
//!
//! Availability slot generation and booking conflict detection for
//! multi-tenant scheduling backends.
//!
//! Both entry points are pure computations over caller-supplied data: the
//! engine never reads the system clock and performs no I/O of its own beyond
//! the [`BookingSource`] query the conflict check is handed. That keeps every
//! result deterministic and testable in isolation.
//!
//! ## Modules
//!
//! - [`availability`] — business-hours slot grid with buffer and capacity rules
//! - [`conflict`] — pre-flight overlap check for booking create/reschedule
//! - [`hours`] — business-hours configuration and settings normalization
//! - [`interval`] — busy intervals and the half-open overlap predicate
//! - [`source`] — the booking data-source trait the conflict check queries
//! - [`status`] — closed booking-status enum with boundary label mapping
//! - [`error`] — error types
//!
//! ## Concurrency note
//!
//! [`check_booking_conflict`] is advisory: it is a fast pre-flight check, not
//! a lock. Two concurrent requests for the same slot can both pass it before
//! either commits. The storage layer must be the final arbiter of exclusivity
//! (unique constraint or serializable transaction over the resource and
//! window) and its rejection is the authoritative conflict signal.

pub mod availability;
pub mod conflict;
pub mod error;
pub mod hours;
pub mod interval;
pub mod source;
pub mod status;

pub use availability::{generate_availability, AvailabilityOptions, Slot};
pub use conflict::{
    check_booking_conflict, ConflictCheckRequest, ConflictDetails, ConflictReason, ConflictResult,
};
pub use error::EngineError;
pub use hours::{BusinessHours, DayWindow};
pub use interval::{ranges_overlap, BusyInterval};
pub use source::{BookingQuery, BookingSource, ExistingBooking, InMemoryBookingSource};
pub use status::BookingStatus;
