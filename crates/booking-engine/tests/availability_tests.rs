//! Tests for availability slot generation.

use booking_engine::{
    generate_availability, AvailabilityOptions, BusinessHours, BusyInterval, DayWindow,
    EngineError,
};
use chrono::{DateTime, Duration, TimeZone, Timelike, Utc, Weekday};

// ── Helpers ─────────────────────────────────────────────────────────────────

/// 2026-03-02 is a Monday; the first full week of March 2026 runs Mon 02 …
/// Sun 08.
fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, min, 0).unwrap()
}

fn busy(day: u32, start_hour: u32, end_hour: u32) -> BusyInterval {
    BusyInterval::new(at(day, start_hour, 0), at(day, end_hour, 0))
}

fn nine_to_five(weekday: Weekday) -> AvailabilityOptions {
    AvailabilityOptions {
        business_hours: Some(BusinessHours::new().with(weekday, DayWindow::new(9 * 60, 17 * 60))),
        ..AvailabilityOptions::default()
    }
}

fn starts(slots: &[booking_engine::Slot]) -> Vec<DateTime<Utc>> {
    slots.iter().map(|s| s.start).collect()
}

// ── Basic grid ──────────────────────────────────────────────────────────────

#[test]
fn monday_nine_to_five_hourly_yields_eight_available_slots() {
    let slots = generate_availability(at(2, 0, 0), at(2, 0, 0), 60, &[], &nine_to_five(Weekday::Mon))
        .unwrap();

    assert_eq!(slots.len(), 8);
    assert!(slots.iter().all(|s| s.available));
    assert_eq!(slots[0].start, at(2, 9, 0));
    assert_eq!(slots[7].start, at(2, 16, 0));
    assert_eq!(slots[7].end, at(2, 17, 0));
}

#[test]
fn trailing_partial_slot_is_dropped() {
    // Window 09:00-10:30 with 60-minute slots: only 09:00-10:00 fits.
    let options = AvailabilityOptions {
        business_hours: Some(
            BusinessHours::new().with(Weekday::Mon, DayWindow::new(9 * 60, 10 * 60 + 30)),
        ),
        ..AvailabilityOptions::default()
    };
    let slots = generate_availability(at(2, 0, 0), at(2, 0, 0), 60, &[], &options).unwrap();

    assert_eq!(starts(&slots), vec![at(2, 9, 0)]);
}

#[test]
fn inverted_window_yields_no_slots() {
    let options = AvailabilityOptions {
        business_hours: Some(
            BusinessHours::new().with(Weekday::Mon, DayWindow::new(17 * 60, 9 * 60)),
        ),
        ..AvailabilityOptions::default()
    };
    let slots = generate_availability(at(2, 0, 0), at(2, 0, 0), 60, &[], &options).unwrap();

    assert!(slots.is_empty());
}

#[test]
fn default_hours_cover_weekdays_only() {
    // Full week Mon 02 .. Sun 08 with no explicit hours: Mon-Fri 09:00-17:00.
    let slots =
        generate_availability(at(2, 0, 0), at(8, 0, 0), 60, &[], &AvailabilityOptions::default())
            .unwrap();

    assert_eq!(slots.len(), 5 * 8);
    assert!(slots.iter().all(|s| {
        let minutes = s.start.time().hour() * 60 + s.start.time().minute();
        minutes >= 9 * 60 && minutes < 17 * 60
    }));
}

// ── Weekend policy ──────────────────────────────────────────────────────────

#[test]
fn weekend_without_explicit_entry_yields_zero_slots() {
    // Sat 07 .. Sun 08, busy content irrelevant.
    let weekend_busy = [busy(7, 10, 11)];
    let slots = generate_availability(
        at(7, 0, 0),
        at(8, 0, 0),
        60,
        &weekend_busy,
        &AvailabilityOptions::default(),
    )
    .unwrap();

    assert!(slots.is_empty());
}

#[test]
fn explicit_weekend_entry_beats_skip_weekends() {
    let options = AvailabilityOptions {
        business_hours: Some(
            BusinessHours::new().with(Weekday::Sat, DayWindow::new(10 * 60, 12 * 60)),
        ),
        skip_weekends: true,
        ..AvailabilityOptions::default()
    };
    let slots = generate_availability(at(7, 0, 0), at(7, 0, 0), 60, &[], &options).unwrap();

    assert_eq!(starts(&slots), vec![at(7, 10, 0), at(7, 11, 0)]);
}

// ── Busy intervals and buffers ──────────────────────────────────────────────

#[test]
fn blocked_in_hours_slot_is_emitted_as_unavailable() {
    let slots = generate_availability(
        at(2, 0, 0),
        at(2, 0, 0),
        60,
        &[busy(2, 10, 11)],
        &nine_to_five(Weekday::Mon),
    )
    .unwrap();

    // The grid shape is unchanged; only availability flips.
    assert_eq!(slots.len(), 8);
    let ten = slots.iter().find(|s| s.start == at(2, 10, 0)).unwrap();
    assert!(!ten.available);
    assert!(slots.iter().filter(|s| s.available).count() == 7);
}

#[test]
fn buffer_widens_busy_interval_on_both_sides() {
    // Busy 13:00-14:00 with a 30-minute buffer blocks 12:30-14:30. On an
    // hourly grid the 12:00, 13:00 and 14:00 starts all overlap it; 11:00
    // and 15:00 do not.
    let options = AvailabilityOptions {
        booking_buffer_minutes: 30,
        ..nine_to_five(Weekday::Mon)
    };
    let slots =
        generate_availability(at(2, 0, 0), at(2, 0, 0), 60, &[busy(2, 13, 14)], &options).unwrap();

    let available: Vec<bool> = slots.iter().map(|s| s.available).collect();
    let expected_starts: Vec<DateTime<Utc>> = (9..17).map(|h| at(2, h, 0)).collect();
    assert_eq!(starts(&slots), expected_starts);
    // 09 10 11 free, 12 13 14 blocked, 15 16 free.
    assert_eq!(
        available,
        vec![true, true, true, false, false, false, true, true]
    );
}

#[test]
fn buffer_boundaries_are_half_open_on_a_half_hour_grid() {
    // Same busy block on a 30-minute grid. The expanded window is
    // 12:30-14:30: the 12:00-12:30 slot touches it and stays available,
    // 12:30 through 14:00 starts are blocked, 14:30 is the first available
    // start afterwards.
    let options = AvailabilityOptions {
        booking_buffer_minutes: 30,
        ..nine_to_five(Weekday::Mon)
    };
    let slots =
        generate_availability(at(2, 0, 0), at(2, 0, 0), 30, &[busy(2, 13, 14)], &options).unwrap();

    let availability_at = |t: DateTime<Utc>| slots.iter().find(|s| s.start == t).unwrap().available;
    assert!(availability_at(at(2, 12, 0)));
    assert!(!availability_at(at(2, 12, 30)));
    assert!(!availability_at(at(2, 13, 30)));
    assert!(!availability_at(at(2, 14, 0)));
    assert!(availability_at(at(2, 14, 30)));
}

// ── Daily capacity gate ─────────────────────────────────────────────────────

#[test]
fn capacity_gate_closes_the_whole_day() {
    // Two non-overlapping bookings against a cap of 2: zero slots, not
    // "remaining" slots.
    let day_busy = [busy(2, 9, 10), busy(2, 11, 12)];
    let capped = AvailabilityOptions {
        max_daily_bookings: Some(2),
        ..nine_to_five(Weekday::Mon)
    };
    let slots = generate_availability(at(2, 0, 0), at(2, 0, 0), 60, &day_busy, &capped).unwrap();
    assert!(slots.is_empty());

    // Below the cap, the day still opens.
    let roomy = AvailabilityOptions {
        max_daily_bookings: Some(3),
        ..nine_to_five(Weekday::Mon)
    };
    let slots = generate_availability(at(2, 0, 0), at(2, 0, 0), 60, &day_busy, &roomy).unwrap();
    assert_eq!(slots.len(), 8);
}

#[test]
fn capacity_of_zero_closes_every_day() {
    let options = AvailabilityOptions {
        max_daily_bookings: Some(0),
        ..nine_to_five(Weekday::Mon)
    };
    let slots = generate_availability(at(2, 0, 0), at(2, 0, 0), 60, &[], &options).unwrap();

    assert!(slots.is_empty());
}

#[test]
fn capacity_counts_bookings_starting_on_the_day() {
    // A booking that starts Sunday 23:00 and spills into Monday does not
    // count against Monday's cap.
    let overnight = [BusyInterval::new(at(1, 23, 0), at(2, 1, 0))];
    let options = AvailabilityOptions {
        max_daily_bookings: Some(1),
        ..nine_to_five(Weekday::Mon)
    };
    let slots = generate_availability(at(2, 0, 0), at(2, 0, 0), 60, &overnight, &options).unwrap();

    assert_eq!(slots.len(), 8);
}

// ── Past-slot exclusion ─────────────────────────────────────────────────────

#[test]
fn slots_starting_at_or_before_now_are_excluded() {
    let options = AvailabilityOptions {
        now: Some(at(2, 12, 0)),
        ..nine_to_five(Weekday::Mon)
    };
    let slots = generate_availability(at(2, 0, 0), at(2, 0, 0), 60, &[], &options).unwrap();

    // 09:00 through 12:00 starts are gone; 13:00 onward remain.
    assert_eq!(
        starts(&slots),
        vec![at(2, 13, 0), at(2, 14, 0), at(2, 15, 0), at(2, 16, 0)]
    );
}

// ── Ordering, purity, validation ────────────────────────────────────────────

#[test]
fn output_is_strictly_ordered_and_idempotent() {
    let week_busy = [busy(2, 10, 11), busy(4, 14, 16), busy(5, 9, 12)];
    let options = AvailabilityOptions {
        booking_buffer_minutes: 15,
        ..AvailabilityOptions::default()
    };

    let first = generate_availability(at(2, 0, 0), at(8, 0, 0), 45, &week_busy, &options).unwrap();
    let second = generate_availability(at(2, 0, 0), at(8, 0, 0), 45, &week_busy, &options).unwrap();

    assert_eq!(first, second);
    for pair in first.windows(2) {
        assert!(pair[0].start < pair[1].start, "starts strictly increasing");
        assert!(pair[0].end <= pair[1].start, "slots never overlap");
    }
    for slot in &first {
        assert_eq!(slot.end - slot.start, Duration::minutes(45));
    }
}

#[test]
fn zero_duration_is_rejected() {
    let err = generate_availability(at(2, 0, 0), at(2, 0, 0), 0, &[], &AvailabilityOptions::default())
        .unwrap_err();

    assert!(matches!(err, EngineError::InvalidDuration(_)));
    assert!(err.is_validation());
}

#[test]
fn from_after_to_is_rejected() {
    let err = generate_availability(at(3, 0, 0), at(2, 0, 0), 60, &[], &AvailabilityOptions::default())
        .unwrap_err();

    assert!(matches!(err, EngineError::InvalidRange(_)));
}

#[test]
fn time_of_day_components_are_normalized_to_day_bounds() {
    // from/to carry mid-day times but still bound the full Monday.
    let slots = generate_availability(
        at(2, 15, 30),
        at(2, 16, 45),
        60,
        &[],
        &nine_to_five(Weekday::Mon),
    )
    .unwrap();

    assert_eq!(slots.len(), 8);
    assert_eq!(slots[0].start, at(2, 9, 0));
}
