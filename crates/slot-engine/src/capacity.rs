//! Direct "can I book this exact slot" checks.
//!
//! A narrow counterpart to [`crate::slots`] for interactive booking: it looks
//! at one date and time only instead of enumerating a whole range.

use chrono::NaiveDate;

use crate::booking::Booking;
use crate::time::{day_of_week, TimeOfDay};
use crate::window::AvailabilityWindow;

/// Whether a booking at `date`/`time` still fits under the containing window's capacity.
///
/// The window is the active one for `provider_id` on that weekday whose
/// `[start, end)` range contains `time`; windows never overlap, so there is at
/// most one. No such window means the slot is not bookable.
///
/// `duration_minutes` is accepted for parity with slot generation; only the
/// start time is matched against the window.
pub fn is_available(
    provider_id: &str,
    date: NaiveDate,
    time: TimeOfDay,
    _duration_minutes: u32,
    windows: &[AvailabilityWindow],
    booking_count_for_exact_slot: usize,
) -> bool {
    let dow = day_of_week(date);

    windows
        .iter()
        .filter(|w| w.active && w.provider_id == provider_id)
        .find(|w| w.range().contains(dow, time))
        .is_some_and(|w| booking_count_for_exact_slot < w.max_sessions_per_slot as usize)
}

/// Count pending/confirmed bookings that start exactly at `time` on `date`.
pub fn count_bookings_at(bookings: &[Booking], date: NaiveDate, time: TimeOfDay) -> usize {
    bookings
        .iter()
        .filter(|b| b.status.is_active())
        .filter(|b| b.date == date && b.requested_time == time)
        .count()
}
