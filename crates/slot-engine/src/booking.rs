//! Bookings as read from the booking subsystem.
//!
//! The engine never creates or cancels bookings; it only counts them against
//! slot capacity and checks them before windows change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::TimeOfDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    /// Statuses that hold capacity and block window changes.
    pub const ACTIVE: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Confirmed];

    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub provider_id: String,
    pub date: NaiveDate,
    pub requested_time: TimeOfDay,
    pub duration_minutes: u32,
    pub status: BookingStatus,
}

impl Booking {
    /// End of the booked session in minutes since midnight. Saturates rather
    /// than wrapping for oversized durations.
    pub fn end_minutes(&self) -> u32 {
        self.requested_time.minutes().saturating_add(self.duration_minutes)
    }

    /// Half-open overlap of this booking with `[start, start + duration)` on the same date.
    pub fn overlaps(&self, date: NaiveDate, start: u32, duration_minutes: u32) -> bool {
        self.date == date
            && self.requested_time.minutes() < start.saturating_add(duration_minutes)
            && self.end_minutes() > start
    }
}
