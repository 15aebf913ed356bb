//! Error types for slot-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::store::StoreError;
use crate::time::TimeOfDay;
use crate::window::WindowId;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Caller-correctable input problem (malformed time, `start >= end`, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The candidate window overlaps an active window on the same day.
    #[error(
        "Window {start_time}-{end_time} on day {day_of_week} overlaps existing window {existing}"
    )]
    OverlapConflict {
        existing: WindowId,
        day_of_week: u8,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    },

    /// The mutation would leave pending/confirmed bookings outside any window.
    #[error("Change would orphan {count} booking(s), first on {date} at {time}")]
    BookingConflict {
        count: usize,
        date: NaiveDate,
        time: TimeOfDay,
    },

    #[error("Window not found: {0}")]
    NotFound(WindowId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
