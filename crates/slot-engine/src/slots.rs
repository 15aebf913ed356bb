//! Generate bookable slots from weekly windows and existing bookings.
//!
//! For each calendar day in the requested range, every active window of the
//! provider on that weekday is cut into fixed-duration slots spaced by
//! `duration + buffer`. Bookings overlapping a slot (half-open) consume its
//! capacity; full slots are dropped.
//!
//! Generation is pure: the same inputs always produce the same slots, and the
//! sequence can be iterated any number of times.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::time::{day_of_week, TimeOfDay};
use crate::window::AvailabilityWindow;

/// A bookable slot with remaining capacity. Computed, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: TimeOfDay,
    /// Always at least 1 for emitted slots.
    pub available_capacity: u32,
    pub max_capacity: u32,
}

/// Borrowed inputs for slot generation over an inclusive date range.
#[derive(Debug, Clone, Copy)]
pub struct SlotGenerator<'a> {
    provider_id: &'a str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    duration_minutes: u32,
    windows: &'a [AvailabilityWindow],
    bookings: &'a [Booking],
}

impl<'a> SlotGenerator<'a> {
    pub fn new(
        provider_id: &'a str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        duration_minutes: u32,
        windows: &'a [AvailabilityWindow],
        bookings: &'a [Booking],
    ) -> Self {
        Self {
            provider_id,
            start_date,
            end_date,
            duration_minutes,
            windows,
            bookings,
        }
    }

    /// Lazily walk the range, day by day, in date then time order.
    ///
    /// Each call starts a fresh pass over the same inputs.
    pub fn iter(&self) -> impl Iterator<Item = Slot> + 'a {
        let this = *self;
        // A zero duration would never advance past the window start.
        let days = if this.duration_minutes == 0 {
            None
        } else {
            Some(this.start_date.iter_days().take_while(move |d| *d <= this.end_date))
        };

        days.into_iter()
            .flatten()
            .flat_map(move |date| this.slots_for_day(date))
    }

    fn slots_for_day(self, date: NaiveDate) -> Vec<Slot> {
        let dow = day_of_week(date);

        let mut windows: Vec<&AvailabilityWindow> = self
            .windows
            .iter()
            .filter(|w| w.active && w.provider_id == self.provider_id && w.day_of_week == dow)
            .collect();
        windows.sort_by_key(|w| (w.start_time, w.end_time));

        let day_bookings: Vec<&Booking> = self
            .bookings
            .iter()
            .filter(|b| b.provider_id == self.provider_id)
            .filter(|b| b.status.is_active() && b.date == date)
            .collect();

        let mut slots = Vec::new();
        for window in windows {
            let step = self.duration_minutes.saturating_add(window.buffer_minutes);
            let end = window.end_time.minutes();
            let mut t = window.start_time.minutes();

            // `end` is at most one day, so a saturated sum always ends the walk.
            while t.saturating_add(self.duration_minutes) <= end {
                let booking_count = day_bookings
                    .iter()
                    .filter(|b| b.overlaps(date, t, self.duration_minutes))
                    .count() as u32;
                let available_capacity = window.max_sessions_per_slot.saturating_sub(booking_count);

                if available_capacity > 0 {
                    if let Ok(time) = TimeOfDay::from_minutes(t) {
                        slots.push(Slot {
                            date,
                            time,
                            available_capacity,
                            max_capacity: window.max_sessions_per_slot,
                        });
                    }
                }
                t = t.saturating_add(step);
            }
        }
        slots
    }
}

/// Generate every bookable slot for `provider_id` between `start_date` and
/// `end_date` (inclusive).
///
/// Returns an empty list when the provider has no active windows, when
/// `start_date > end_date`, or when `duration_minutes` is zero.
pub fn generate_slots(
    provider_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    duration_minutes: u32,
    windows: &[AvailabilityWindow],
    bookings: &[Booking],
) -> Vec<Slot> {
    let slots: Vec<Slot> = SlotGenerator::new(
        provider_id,
        start_date,
        end_date,
        duration_minutes,
        windows,
        bookings,
    )
    .iter()
    .collect();

    tracing::debug!(
        provider_id = %provider_id,
        %start_date,
        %end_date,
        duration_minutes,
        slots = slots.len(),
        "generated slots"
    );
    slots
}
