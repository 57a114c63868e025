//! Booking data-source abstraction for the conflict check.
//!
//! The conflict detector is pure over whatever the source returns; the trait
//! is the single seam where storage (or a fixture) is injected. Sources must
//! surface their own failures as errors — the detector propagates them
//! distinctly so "could not check" is never conflated with "is available".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::status::BookingStatus;

/// A booking row as the conflict detector sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingBooking {
    pub id: String,
    pub service_id: String,
    #[serde(default)]
    pub team_member_id: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub start: DateTime<Utc>,
    pub duration_minutes: u32,
    pub status: BookingStatus,
}

impl ExistingBooking {
    pub fn end(&self) -> DateTime<Utc> {
        self.start + chrono::Duration::minutes(self.duration_minutes as i64)
    }
}

/// Scope and pre-filter window for a booking query.
///
/// The window is an optimization hint so sources can bound their scan; it is
/// NOT a correctness requirement — the detector re-tests overlap on every
/// returned candidate.
#[derive(Debug, Clone, Copy)]
pub struct BookingQuery<'a> {
    pub service_id: &'a str,
    pub team_member_id: Option<&'a str>,
    pub tenant_id: Option<&'a str>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

/// Source of existing bookings, typically backed by the storage layer.
///
/// Implementations should scope results to the query's service (and team
/// member / tenant when present) and may pre-filter to the query window.
/// Returning extra rows is harmless; dropping in-window rows is not.
pub trait BookingSource {
    fn bookings_in_window(
        &self,
        query: &BookingQuery<'_>,
    ) -> std::result::Result<Vec<ExistingBooking>, SourceError>;
}

/// A `Vec`-backed [`BookingSource`] that applies the query's scope filters.
///
/// Used by tests and by embeddings (e.g. WASM) where the caller has already
/// fetched the candidate bookings.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingSource {
    bookings: Vec<ExistingBooking>,
}

impl InMemoryBookingSource {
    pub fn new(bookings: Vec<ExistingBooking>) -> Self {
        Self { bookings }
    }
}

impl BookingSource for InMemoryBookingSource {
    fn bookings_in_window(
        &self,
        query: &BookingQuery<'_>,
    ) -> std::result::Result<Vec<ExistingBooking>, SourceError> {
        let rows = self
            .bookings
            .iter()
            .filter(|b| b.service_id == query.service_id)
            .filter(|b| match query.team_member_id {
                Some(member) => b.team_member_id.as_deref() == Some(member),
                None => true,
            })
            .filter(|b| match query.tenant_id {
                Some(tenant) => b.tenant_id.as_deref() == Some(tenant),
                None => true,
            })
            .filter(|b| b.status.is_active())
            .filter(|b| b.start < query.window_end && b.end() > query.window_start)
            .cloned()
            .collect();
        Ok(rows)
    }
}
