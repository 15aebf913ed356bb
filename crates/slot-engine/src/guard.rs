//! Booking conflict guard for window changes.
//!
//! A booking belongs to whichever window contains its start time on its day of
//! the week. Shrinking, moving, deactivating or deleting a window must not leave
//! a future pending/confirmed booking outside every window. The guard only
//! reports; the caller turns a hit into a rejected mutation.

use chrono::NaiveDate;

use crate::booking::Booking;
use crate::time::{day_of_week, TimeOfDay};
use crate::window::WindowRange;

/// Future bookings that still hold a place (pending or confirmed, dated today or later).
fn live_bookings(bookings: &[Booking], today: NaiveDate) -> impl Iterator<Item = &Booking> {
    bookings
        .iter()
        .filter(|b| b.status.is_active())
        .filter(move |b| b.date >= today)
}

fn starts_inside(range: &WindowRange, booking: &Booking) -> bool {
    range.contains(day_of_week(booking.date), booking.requested_time)
}

/// Whether any live booking on `day_of_week` starts inside `[start_time, end_time)`.
pub fn has_conflicting_bookings(
    bookings: &[Booking],
    day_of_week: u8,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
    today: NaiveDate,
) -> bool {
    let range = WindowRange {
        day_of_week,
        start_time,
        end_time,
    };
    live_bookings(bookings, today).any(|b| starts_inside(&range, b))
}

/// Live bookings that start inside `old` but would not start inside `new`.
///
/// Pass `new = None` when the range disappears entirely (delete or deactivate);
/// every live booking inside `old` is then orphaned.
pub fn find_orphaned_bookings<'a>(
    bookings: &'a [Booking],
    old: &WindowRange,
    new: Option<&WindowRange>,
    today: NaiveDate,
) -> Vec<&'a Booking> {
    live_bookings(bookings, today)
        .filter(|b| starts_inside(old, b))
        .filter(|b| !new.is_some_and(|range| starts_inside(range, b)))
        .collect()
}
