//! Caller-facing slot queries backed by the window and booking stores.
//!
//! Results are a snapshot of the stores at read time. A booking made against a
//! previously returned slot must be re-checked with [`SlotQueryService::check_slot`]
//! when it is committed.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::booking::BookingStatus;
use crate::capacity::{count_bookings_at, is_available};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::slots::{generate_slots, Slot};
use crate::store::{BookingStore, WindowStore};
use crate::time::{TimeOfDay, MINUTES_PER_DAY};

pub struct SlotQueryService {
    windows: Arc<dyn WindowStore>,
    bookings: Arc<dyn BookingStore>,
    config: EngineConfig,
}

impl SlotQueryService {
    pub fn new(
        windows: Arc<dyn WindowStore>,
        bookings: Arc<dyn BookingStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            windows,
            bookings,
            config,
        }
    }

    /// Bookable slots for a provider between two dates (inclusive).
    ///
    /// # Errors
    /// `Validation` for a zero or longer-than-a-day duration, an inverted
    /// range, or a range longer than `max_range_days`. Store failures pass through.
    pub fn get_slots(
        &self,
        provider_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        duration_minutes: u32,
    ) -> Result<Vec<Slot>> {
        validate_duration(duration_minutes)?;
        if start_date > end_date {
            return Err(EngineError::Validation(format!(
                "start date {} is after end date {}",
                start_date, end_date
            )));
        }
        let days = (end_date - start_date).num_days() + 1;
        if days > i64::from(self.config.max_range_days) {
            return Err(EngineError::Validation(format!(
                "range of {} days exceeds the limit of {}",
                days, self.config.max_range_days
            )));
        }

        let windows = self.windows.list_active_windows(provider_id)?;
        if windows.is_empty() {
            debug!(provider_id = %provider_id, "no active windows");
            return Ok(Vec::new());
        }
        let bookings = self.bookings.list_bookings_for_date_range(
            provider_id,
            start_date,
            end_date,
            &BookingStatus::ACTIVE,
        )?;

        Ok(generate_slots(
            provider_id,
            start_date,
            end_date,
            duration_minutes,
            &windows,
            &bookings,
        ))
    }

    /// Whether one more booking fits at exactly `date`/`time`.
    ///
    /// # Errors
    /// `Validation` for a zero or longer-than-a-day duration. Store failures
    /// pass through.
    pub fn check_slot(
        &self,
        provider_id: &str,
        date: NaiveDate,
        time: TimeOfDay,
        duration_minutes: u32,
    ) -> Result<bool> {
        validate_duration(duration_minutes)?;

        let windows = self.windows.list_active_windows(provider_id)?;
        let bookings = self.bookings.list_bookings_for_date_range(
            provider_id,
            date,
            date,
            &BookingStatus::ACTIVE,
        )?;
        let booked = count_bookings_at(&bookings, date, time);

        let available = is_available(provider_id, date, time, duration_minutes, &windows, booked);
        debug!(provider_id = %provider_id, %date, %time, booked, available, "checked slot");
        Ok(available)
    }
}

fn validate_duration(duration_minutes: u32) -> Result<()> {
    if duration_minutes == 0 {
        return Err(EngineError::Validation(
            "duration_minutes must be greater than 0".to_string(),
        ));
    }
    if duration_minutes > MINUTES_PER_DAY {
        return Err(EngineError::Validation(format!(
            "duration_minutes must be at most {}, got {}",
            MINUTES_PER_DAY, duration_minutes
        )));
    }
    Ok(())
}
