//! Booking conflict detection.
//!
//! Pre-flight overlap check run immediately before a booking create or
//! reschedule commits. Adjacent bookings (one ends exactly when the next
//! starts) are NOT conflicts.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::interval::ranges_overlap;
use crate::source::{BookingQuery, BookingSource};

/// Hours of padding around the proposed window when querying the source.
/// A pre-filter bound only; correctness comes from the overlap test below.
const QUERY_PAD_HOURS: i64 = 24;

/// A proposed booking interval to check for collisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictCheckRequest {
    pub service_id: String,
    pub start: DateTime<Utc>,
    pub duration_minutes: u32,
    /// Booking to ignore during the check — a reschedule must not conflict
    /// with its own soon-to-be-replaced interval.
    #[serde(default)]
    pub exclude_booking_id: Option<String>,
    /// Scope the search to one team member in addition to the service.
    #[serde(default)]
    pub team_member_id: Option<String>,
    /// Scope the search to one tenant in multi-tenant deployments.
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// Why a proposed booking was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictReason {
    Overlap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictDetails {
    pub reason: ConflictReason,
    #[serde(default)]
    pub conflicting_booking_id: Option<String>,
}

/// Outcome of a conflict check. A conflict is a normal, expected result
/// (HTTP 409 territory), not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictResult {
    pub conflict: bool,
    #[serde(default)]
    pub details: Option<ConflictDetails>,
}

impl ConflictResult {
    /// No collision found.
    pub fn clear() -> Self {
        Self {
            conflict: false,
            details: None,
        }
    }

    /// Collision with the given existing booking.
    pub fn overlap(conflicting_booking_id: impl Into<String>) -> Self {
        Self {
            conflict: true,
            details: Some(ConflictDetails {
                reason: ConflictReason::Overlap,
                conflicting_booking_id: Some(conflicting_booking_id.into()),
            }),
        }
    }
}

/// Check whether a proposed booking interval collides with an existing
/// active booking for the same service (and team member / tenant when
/// scoped).
///
/// The check is read-only and advisory: it cannot prevent two concurrent
/// requests for the same slot from both passing before either commits. The
/// storage layer must enforce exclusivity at commit time (unique constraint
/// or serializable transaction over the resource and window); treat its
/// rejection as the authoritative conflict signal.
///
/// # Errors
/// Returns a validation error for a zero duration or empty `service_id`,
/// and [`EngineError::Source`] when the data source fails — never "no
/// conflict" in either case.
pub fn check_booking_conflict(
    source: &dyn BookingSource,
    request: &ConflictCheckRequest,
) -> Result<ConflictResult> {
    if request.duration_minutes == 0 {
        return Err(EngineError::InvalidDuration(
            "booking duration must be a positive number of minutes".to_string(),
        ));
    }
    if request.service_id.is_empty() {
        return Err(EngineError::InvalidRequest(
            "service_id is required".to_string(),
        ));
    }

    let proposed_start = request.start;
    let proposed_end = proposed_start + Duration::minutes(request.duration_minutes as i64);

    let query = BookingQuery {
        service_id: &request.service_id,
        team_member_id: request.team_member_id.as_deref(),
        tenant_id: request.tenant_id.as_deref(),
        window_start: proposed_start - Duration::hours(QUERY_PAD_HOURS),
        window_end: proposed_end + Duration::hours(QUERY_PAD_HOURS),
    };

    let candidates = source
        .bookings_in_window(&query)
        .map_err(EngineError::Source)?;

    for booking in &candidates {
        if Some(booking.id.as_str()) == request.exclude_booking_id.as_deref() {
            continue;
        }
        // Sources normally return active rows only; re-check in case one
        // returns unfiltered history.
        if !booking.status.is_active() {
            continue;
        }
        if ranges_overlap(proposed_start, proposed_end, booking.start, booking.end()) {
            return Ok(ConflictResult::overlap(booking.id.clone()));
        }
    }

    Ok(ConflictResult::clear())
}
