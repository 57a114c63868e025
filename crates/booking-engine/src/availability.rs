//! Availability slot generation.
//!
//! Walks each calendar day in a range, lays a fixed-duration slot grid over
//! the day's business-hours window, and marks each slot available or not
//! against buffer-expanded busy intervals. Days at their daily booking cap
//! yield no slots at all (fail-closed).
//!
//! The generator is a pure function: identical inputs produce identical
//! output, and "now" is injected rather than read from the system clock.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::hours::BusinessHours;
use crate::interval::{ranges_overlap, BusyInterval};

/// A candidate bookable slot. `end - start` is always the requested slot
/// duration; out-of-hours times are never emitted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub available: bool,
}

/// Configuration for [`generate_availability`]. All fields have defaults;
/// production callers are expected to supply explicit `business_hours`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityOptions {
    /// Working windows per weekday. `None` falls back to
    /// [`BusinessHours::standard_week`] (Mon–Fri 09:00–17:00).
    pub business_hours: Option<BusinessHours>,
    /// Skip Saturday/Sunday unless an explicit `business_hours` entry exists
    /// for that weekday. An explicit weekend entry always wins.
    pub skip_weekends: bool,
    /// Minutes to block before and after each busy interval.
    pub booking_buffer_minutes: u32,
    /// Daily booking cap. Once the count of busy intervals starting on a
    /// calendar day reaches the cap, that entire day yields zero slots —
    /// a day-level gate, not a per-slot decrement. `None` = unlimited.
    pub max_daily_bookings: Option<u32>,
    /// Reference time for past-slot exclusion; slots starting at or before
    /// this instant are omitted from the output. `None` disables the filter.
    /// Always injected — the engine never reads a clock.
    pub now: Option<DateTime<Utc>>,
}

impl Default for AvailabilityOptions {
    fn default() -> Self {
        Self {
            business_hours: None,
            skip_weekends: true,
            booking_buffer_minutes: 0,
            max_daily_bookings: None,
            now: None,
        }
    }
}

/// Generate the ordered slot grid for each calendar day in `[from, to]`.
///
/// `from`/`to` bound an inclusive day range; their time-of-day components
/// are normalized away. `busy` may be empty or unsorted. Slots blocked by a
/// (buffer-expanded) busy interval are emitted with `available = false` so a
/// UI can gray them out; the last slot of a window is dropped entirely when
/// it would extend past the window's end.
///
/// The output is strictly increasing by start time with no duplicates or
/// overlaps, and identical inputs always yield identical output.
///
/// # Errors
/// Returns [`EngineError::InvalidDuration`] when `slot_duration_minutes` is
/// zero, and [`EngineError::InvalidRange`] when `from`'s day is after `to`'s.
pub fn generate_availability(
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    slot_duration_minutes: u32,
    busy: &[BusyInterval],
    options: &AvailabilityOptions,
) -> Result<Vec<Slot>> {
    if slot_duration_minutes == 0 {
        return Err(EngineError::InvalidDuration(
            "slot duration must be a positive number of minutes".to_string(),
        ));
    }

    let first_day = from.date_naive();
    let last_day = to.date_naive();
    if first_day > last_day {
        return Err(EngineError::InvalidRange(format!(
            "from day {} is after to day {}",
            first_day, last_day
        )));
    }

    let hours = options
        .business_hours
        .clone()
        .unwrap_or_else(BusinessHours::standard_week);
    let slot_len = Duration::minutes(slot_duration_minutes as i64);
    let buffer = Duration::minutes(options.booking_buffer_minutes as i64);

    let mut slots = Vec::new();
    let mut day = first_day;
    while day <= last_day {
        day_slots(day, slot_len, buffer, busy, &hours, options, &mut slots);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    Ok(slots)
}

/// Emit the slot grid for a single calendar day into `out`.
fn day_slots(
    day: NaiveDate,
    slot_len: Duration,
    buffer: Duration,
    busy: &[BusyInterval],
    hours: &BusinessHours,
    options: &AvailabilityOptions,
    out: &mut Vec<Slot>,
) {
    let weekday = day.weekday();
    let window = hours.window_for(weekday);

    // Weekend skip applies only when no explicit entry exists for the day.
    let weekend = matches!(weekday, Weekday::Sat | Weekday::Sun);
    if options.skip_weekends && weekend && window.is_none() {
        return;
    }
    let Some(window) = window else {
        return;
    };

    let day_start = day.and_time(NaiveTime::MIN).and_utc();
    let day_end = day_start + Duration::hours(24);

    // Day-level capacity gate: at the cap, the whole day closes.
    if let Some(cap) = options.max_daily_bookings {
        let existing = busy
            .iter()
            .filter(|b| b.start >= day_start && b.start < day_end)
            .count() as u32;
        if existing >= cap {
            return;
        }
    }

    let window_start = day_start + Duration::minutes(window.start_minutes as i64);
    let window_end = day_start + Duration::minutes(window.end_minutes as i64);
    if window_end <= window_start {
        return;
    }

    // Buffer-expand each busy interval, clamped to this day, keeping only
    // those whose expanded form touches the day.
    let blocked: Vec<BusyInterval> = busy
        .iter()
        .map(|b| b.expand(buffer))
        .filter(|b| ranges_overlap(b.start, b.end, day_start, day_end))
        .map(|b| BusyInterval::new(b.start.max(day_start), b.end.min(day_end)))
        .collect();

    let mut slot_start = window_start;
    loop {
        let slot_end = slot_start + slot_len;
        if slot_end > window_end {
            break;
        }

        // Past slots are excluded from the output entirely.
        let past = options.now.is_some_and(|now| slot_start <= now);
        if !past {
            let conflicts = blocked
                .iter()
                .any(|b| ranges_overlap(slot_start, slot_end, b.start, b.end));
            out.push(Slot {
                start: slot_start,
                end: slot_end,
                available: !conflicts,
            });
        }

        slot_start = slot_end;
    }
}
