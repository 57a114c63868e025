//! WASM bindings for booking-engine.
//!
//! Exposes availability generation and the booking conflict check to
//! JavaScript via `wasm-bindgen`. All complex types cross the boundary as
//! JSON strings with camelCase field names, matching the shapes the web
//! portal already sends and receives.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p booking-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/booking-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/booking_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use booking_engine::{
    check_booking_conflict, generate_availability, AvailabilityOptions, BookingStatus,
    BusinessHours, BusyInterval, ConflictCheckRequest, ExistingBooking, InMemoryBookingSource,
};

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    start: String,
    end: String,
    available: bool,
}

/// Input format for busy intervals passed from JavaScript.
#[derive(Deserialize)]
struct BusyInput {
    start: String,
    end: String,
}

/// Availability options as the portal sends them. `businessHours` accepts
/// any of the stored settings-blob shapes.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct OptionsInput {
    booking_buffer_minutes: Option<u32>,
    skip_weekends: Option<bool>,
    max_daily_bookings: Option<u32>,
    business_hours: Option<serde_json::Value>,
    now: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestInput {
    service_id: String,
    start: String,
    duration_minutes: u32,
    #[serde(default)]
    exclude_booking_id: Option<String>,
    #[serde(default)]
    team_member_id: Option<String>,
    #[serde(default)]
    tenant_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingInput {
    id: String,
    service_id: String,
    #[serde(default)]
    team_member_id: Option<String>,
    #[serde(default)]
    tenant_id: Option<String>,
    start: String,
    duration_minutes: u32,
    status: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictDetailsDto {
    reason: String,
    conflicting_booking_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictResultDto {
    conflict: bool,
    details: Option<ConflictDetailsDto>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with timezone offset, e.g., "2026-03-02T14:00:00Z")
/// and naive local time (e.g., "2026-03-02T14:00:00"), which is interpreted
/// as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_busy_json(json: &str) -> Result<Vec<BusyInterval>, JsValue> {
    let inputs: Vec<BusyInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid busy intervals JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            Ok(BusyInterval::new(
                parse_datetime(&input.start)?,
                parse_datetime(&input.end)?,
            ))
        })
        .collect()
}

fn parse_options_json(json: Option<String>) -> Result<AvailabilityOptions, JsValue> {
    let input: OptionsInput = match json {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| JsValue::from_str(&format!("Invalid options JSON: {}", e)))?,
        None => OptionsInput::default(),
    };

    let defaults = AvailabilityOptions::default();
    let now = input.now.as_deref().map(parse_datetime).transpose()?;

    Ok(AvailabilityOptions {
        business_hours: input
            .business_hours
            .as_ref()
            .and_then(BusinessHours::from_settings),
        skip_weekends: input.skip_weekends.unwrap_or(defaults.skip_weekends),
        booking_buffer_minutes: input
            .booking_buffer_minutes
            .unwrap_or(defaults.booking_buffer_minutes),
        max_daily_bookings: input.max_daily_bookings,
        now,
    })
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate the availability slot grid for a date range.
///
/// `from` and `to` are ISO 8601 datetime strings bounding an inclusive
/// calendar-day range. `busy_json` is a JSON array of `{start, end}`
/// objects; `options_json` optionally carries `{bookingBufferMinutes,
/// skipWeekends, maxDailyBookings, businessHours, now}`. Returns a JSON
/// array of `{start, end, available}` objects with RFC 3339 datetimes.
#[wasm_bindgen(js_name = "generateAvailability")]
pub fn generate_availability_json(
    from: &str,
    to: &str,
    slot_duration_minutes: u32,
    busy_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let from = parse_datetime(from)?;
    let to = parse_datetime(to)?;
    let busy = parse_busy_json(busy_json)?;
    let options = parse_options_json(options_json)?;

    let slots = generate_availability(from, to, slot_duration_minutes, &busy, &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let dtos: Vec<SlotDto> = slots
        .iter()
        .map(|s| SlotDto {
            start: s.start.to_rfc3339(),
            end: s.end.to_rfc3339(),
            available: s.available,
        })
        .collect();

    serde_json::to_string(&dtos)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Check a proposed booking against existing bookings.
///
/// `request_json` carries `{serviceId, start, durationMinutes,
/// excludeBookingId?, teamMemberId?, tenantId?}`; `bookings_json` is a JSON
/// array of existing bookings (`{id, serviceId, teamMemberId?, tenantId?,
/// start, durationMinutes, status}`) backing an in-memory source. Returns a
/// JSON `{conflict, details?}` object.
///
/// The result is advisory: storage must still enforce exclusivity at commit
/// time.
#[wasm_bindgen(js_name = "checkBookingConflict")]
pub fn check_booking_conflict_json(
    request_json: &str,
    bookings_json: &str,
) -> Result<String, JsValue> {
    let input: RequestInput = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid request JSON: {}", e)))?;
    let rows: Vec<BookingInput> = serde_json::from_str(bookings_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid bookings JSON: {}", e)))?;

    let bookings = rows
        .into_iter()
        .map(|row| {
            let status = BookingStatus::from_label(&row.status)
                .ok_or_else(|| JsValue::from_str(&format!("Unknown status '{}'", row.status)))?;
            Ok(ExistingBooking {
                id: row.id,
                service_id: row.service_id,
                team_member_id: row.team_member_id,
                tenant_id: row.tenant_id,
                start: parse_datetime(&row.start)?,
                duration_minutes: row.duration_minutes,
                status,
            })
        })
        .collect::<Result<Vec<_>, JsValue>>()?;

    let request = ConflictCheckRequest {
        service_id: input.service_id,
        start: parse_datetime(&input.start)?,
        duration_minutes: input.duration_minutes,
        exclude_booking_id: input.exclude_booking_id,
        team_member_id: input.team_member_id,
        tenant_id: input.tenant_id,
    };

    let source = InMemoryBookingSource::new(bookings);
    let result = check_booking_conflict(&source, &request)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let dto = ConflictResultDto {
        conflict: result.conflict,
        details: result.details.map(|d| ConflictDetailsDto {
            reason: match d.reason {
                booking_engine::ConflictReason::Overlap => "overlap".to_string(),
            },
            conflicting_booking_id: d.conflicting_booking_id,
        }),
    };

    serde_json::to_string(&dto)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
