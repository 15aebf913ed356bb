//! Recurring weekly availability windows.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::time::{TimeOfDay, MINUTES_PER_DAY};

/// Store-assigned window identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A half-open `[start, end)` wall-clock range on one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRange {
    /// `0` = Sunday through `6` = Saturday.
    pub day_of_week: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl WindowRange {
    /// Build a range, rejecting a bad day or an empty/inverted interval.
    pub fn new(day_of_week: u8, start_time: TimeOfDay, end_time: TimeOfDay) -> Result<Self> {
        validate_range(day_of_week, start_time, end_time)?;
        Ok(Self {
            day_of_week,
            start_time,
            end_time,
        })
    }

    /// Whether `time` falls inside `[start, end)` on the given day.
    pub fn contains(&self, day_of_week: u8, time: TimeOfDay) -> bool {
        self.day_of_week == day_of_week && self.start_time <= time && time < self.end_time
    }

    /// Half-open overlap: adjacent ranges (one ends where the other starts) do not overlap.
    pub fn overlaps(&self, other: &WindowRange) -> bool {
        self.day_of_week == other.day_of_week
            && self.start_time < other.end_time
            && self.end_time > other.start_time
    }
}

/// A provider's recurring availability on one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub id: WindowId,
    pub provider_id: String,
    /// `0` = Sunday through `6` = Saturday.
    pub day_of_week: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// How many bookings a single slot of this window can hold.
    pub max_sessions_per_slot: u32,
    /// Idle minutes between consecutive slots.
    #[serde(default)]
    pub buffer_minutes: u32,
    pub active: bool,
}

impl AvailabilityWindow {
    pub fn range(&self) -> WindowRange {
        WindowRange {
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    /// Check every field-level invariant of the window.
    pub fn validate(&self) -> Result<()> {
        validate_range(self.day_of_week, self.start_time, self.end_time)?;
        validate_capacity(self.max_sessions_per_slot)?;
        validate_buffer(self.buffer_minutes)
    }

    /// Apply a patch, returning the merged window. Does not validate.
    pub fn merged(&self, patch: &WindowPatch) -> AvailabilityWindow {
        AvailabilityWindow {
            id: self.id,
            provider_id: self.provider_id.clone(),
            day_of_week: patch.day_of_week.unwrap_or(self.day_of_week),
            start_time: patch.start_time.unwrap_or(self.start_time),
            end_time: patch.end_time.unwrap_or(self.end_time),
            max_sessions_per_slot: patch
                .max_sessions_per_slot
                .unwrap_or(self.max_sessions_per_slot),
            buffer_minutes: patch.buffer_minutes.unwrap_or(self.buffer_minutes),
            active: patch.active.unwrap_or(self.active),
        }
    }
}

/// Input for creating a window. New windows are always active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWindow {
    pub provider_id: String,
    pub day_of_week: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub max_sessions_per_slot: u32,
    #[serde(default)]
    pub buffer_minutes: u32,
}

impl NewWindow {
    pub fn range(&self) -> WindowRange {
        WindowRange {
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.provider_id.trim().is_empty() {
            return Err(EngineError::Validation("provider_id is required".to_string()));
        }
        validate_range(self.day_of_week, self.start_time, self.end_time)?;
        validate_capacity(self.max_sessions_per_slot)?;
        validate_buffer(self.buffer_minutes)
    }
}

/// Partial update for an existing window. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowPatch {
    pub day_of_week: Option<u8>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub max_sessions_per_slot: Option<u32>,
    pub buffer_minutes: Option<u32>,
    pub active: Option<bool>,
}

fn validate_range(day_of_week: u8, start_time: TimeOfDay, end_time: TimeOfDay) -> Result<()> {
    if day_of_week > 6 {
        return Err(EngineError::Validation(format!(
            "day_of_week must be 0-6, got {}",
            day_of_week
        )));
    }
    if start_time >= end_time {
        return Err(EngineError::Validation(format!(
            "start time {} must be before end time {}",
            start_time, end_time
        )));
    }
    Ok(())
}

fn validate_capacity(max_sessions_per_slot: u32) -> Result<()> {
    if max_sessions_per_slot == 0 {
        return Err(EngineError::Validation(
            "max_sessions_per_slot must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_buffer(buffer_minutes: u32) -> Result<()> {
    if buffer_minutes > MINUTES_PER_DAY {
        return Err(EngineError::Validation(format!(
            "buffer_minutes must be at most {}, got {}",
            MINUTES_PER_DAY, buffer_minutes
        )));
    }
    Ok(())
}
