//! Property-based tests for overlap detection and slot generation using proptest.
//!
//! These tests verify invariants that should hold for *any* window layout and
//! booking set, not just the examples in `slots_tests.rs`.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use slot_engine::time::day_of_week;
use slot_engine::{
    generate_slots, has_overlap, to_minutes, to_time_string, AvailabilityWindow, Booking,
    BookingStatus, TimeOfDay, WindowId, WindowRange,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A valid `[start, end)` range on one weekday, in 5-minute steps.
fn arb_range() -> impl Strategy<Value = WindowRange> {
    (0u8..=6, 0u32..=286, 1u32..=288).prop_filter_map("empty range", |(dow, a, len)| {
        let start = a * 5;
        let end = (start + len * 5).min(1440);
        if start >= end {
            return None;
        }
        WindowRange::new(
            dow,
            TimeOfDay::from_minutes(start).ok()?,
            TimeOfDay::from_minutes(end).ok()?,
        )
        .ok()
    })
}

fn arb_window() -> impl Strategy<Value = AvailabilityWindow> {
    (arb_range(), 1u32..=5, 0u32..=30).prop_map(|(range, capacity, buffer)| AvailabilityWindow {
        id: WindowId(1),
        provider_id: "p1".to_string(),
        day_of_week: range.day_of_week,
        start_time: range.start_time,
        end_time: range.end_time,
        max_sessions_per_slot: capacity,
        buffer_minutes: buffer,
        active: true,
    })
}

fn arb_status() -> impl Strategy<Value = BookingStatus> {
    prop_oneof![
        Just(BookingStatus::Pending),
        Just(BookingStatus::Confirmed),
        Just(BookingStatus::Rejected),
        Just(BookingStatus::Cancelled),
    ]
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

/// Bookings within the first two weeks after `base_date`.
fn arb_booking() -> impl Strategy<Value = Booking> {
    (0i64..14, 0u32..=287, 15u32..=120, arb_status()).prop_map(|(offset, slot, dur, status)| {
        Booking {
            provider_id: "p1".to_string(),
            date: base_date() + Duration::days(offset),
            requested_time: TimeOfDay::from_minutes(slot * 5).unwrap(),
            duration_minutes: dur,
            status,
        }
    })
}

fn arb_duration() -> impl Strategy<Value = u32> {
    15u32..=120
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Overlap is symmetric
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn overlap_is_symmetric(a in arb_window(), b in arb_window()) {
        let ab = has_overlap(std::slice::from_ref(&a), &b.range(), None);
        let ba = has_overlap(std::slice::from_ref(&b), &a.range(), None);
        prop_assert_eq!(ab, ba);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Generation is deterministic
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn generation_is_deterministic(
        window in arb_window(),
        bookings in prop::collection::vec(arb_booking(), 0..20),
        dur in arb_duration(),
    ) {
        let end = base_date() + Duration::days(13);
        let windows = [window];
        let first = generate_slots("p1", base_date(), end, dur, &windows, &bookings);
        let second = generate_slots("p1", base_date(), end, dur, &windows, &bookings);
        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Every slot fits in its window and has 1..=max capacity
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_fit_inside_window(
        window in arb_window(),
        bookings in prop::collection::vec(arb_booking(), 0..20),
        dur in arb_duration(),
    ) {
        let end = base_date() + Duration::days(13);
        let windows = [window.clone()];
        let slots = generate_slots("p1", base_date(), end, dur, &windows, &bookings);

        for slot in &slots {
            prop_assert_eq!(day_of_week(slot.date), window.day_of_week);
            prop_assert!(slot.time >= window.start_time);
            prop_assert!(slot.time.minutes() + dur <= window.end_time.minutes());
            prop_assert!(slot.available_capacity >= 1);
            prop_assert!(slot.available_capacity <= slot.max_capacity);
            prop_assert_eq!(slot.max_capacity, window.max_sessions_per_slot);
            let offset = slot.time.minutes() - window.start_time.minutes();
            prop_assert_eq!(offset % (dur + window.buffer_minutes), 0);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Capacity equals max minus overlapping live bookings
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn capacity_matches_overlapping_bookings(
        window in arb_window(),
        bookings in prop::collection::vec(arb_booking(), 0..20),
        dur in arb_duration(),
    ) {
        let end = base_date() + Duration::days(13);
        let windows = [window.clone()];
        let slots = generate_slots("p1", base_date(), end, dur, &windows, &bookings);

        for slot in &slots {
            let start = slot.time.minutes();
            let taken = bookings
                .iter()
                .filter(|b| b.status.is_active())
                .filter(|b| b.overlaps(slot.date, start, dur))
                .count() as u32;
            prop_assert_eq!(slot.available_capacity, window.max_sessions_per_slot - taken);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Output is strictly ordered by (date, time)
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn output_strictly_ordered(window in arb_window(), dur in arb_duration()) {
        let end = base_date() + Duration::days(27);
        let slots = generate_slots("p1", base_date(), end, dur, &[window], &[]);

        for pair in slots.windows(2) {
            prop_assert!((pair[0].date, pair[0].time) < (pair[1].date, pair[1].time));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Formatting then parsing a time is the identity
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn time_string_parses_back(minutes in 0u32..=1440) {
        prop_assert_eq!(to_minutes(&to_time_string(minutes)).unwrap(), minutes);
    }
}
