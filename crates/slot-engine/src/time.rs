//! Wall-clock time arithmetic -- `"HH:MM"` strings to minutes since midnight and back.
//!
//! Every interval comparison in the engine is done on integer minutes. Times are
//! already normalized to the provider's local wall clock before they reach here.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Minutes in a day. `"24:00"` is accepted as an end-of-day bound.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse an `"HH:MM"` string into minutes since midnight.
///
/// Hours must be `00`-`23` and minutes `00`-`59`, both exactly two digits. The
/// single value `"24:00"` is also accepted so a window can run until midnight.
///
/// # Errors
/// Returns `EngineError::Validation` for anything else.
pub fn to_minutes(t: &str) -> Result<u32> {
    let malformed = || EngineError::Validation(format!("malformed time '{}', expected HH:MM", t));

    let (hh, mm) = t.split_once(':').ok_or_else(malformed)?;
    if hh.len() != 2 || mm.len() != 2 {
        return Err(malformed());
    }
    if !hh.bytes().chain(mm.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let hours: u32 = hh.parse().map_err(|_| malformed())?;
    let minutes: u32 = mm.parse().map_err(|_| malformed())?;

    match (hours, minutes) {
        (24, 0) => Ok(MINUTES_PER_DAY),
        (h, m) if h < 24 && m < 60 => Ok(h * 60 + m),
        _ => Err(malformed()),
    }
}

/// Format minutes since midnight as a zero-padded `"HH:MM"` string.
pub fn to_time_string(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Day of week for a calendar date, `0` = Sunday through `6` = Saturday.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// A wall-clock time of day, stored as minutes since midnight.
///
/// Serializes as the `"HH:MM"` string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Build from minutes since midnight. Values past `24:00` are rejected.
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if minutes > MINUTES_PER_DAY {
            return Err(EngineError::Validation(format!(
                "{} minutes is past the end of the day",
                minutes
            )));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        to_minutes(s).map(Self)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_time_string(self.0))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
