//! Store interfaces the engine reads windows and bookings through.
//!
//! The engine performs no I/O of its own. Persistence lives behind these
//! traits; [`memory`] provides in-process implementations for tests and the CLI.
//!
//! Implementations backed by a database must serve the reads that precede a
//! window write from a snapshot consistent with that write (serializable
//! transaction or a per-`(provider, day)` lock), otherwise two concurrent
//! creates can both pass the overlap check.

use chrono::NaiveDate;
use thiserror::Error;

use crate::booking::{Booking, BookingStatus};
use crate::window::{AvailabilityWindow, NewWindow, WindowId};

pub mod memory;

pub use memory::{InMemoryBookingStore, InMemoryWindowStore};

/// Failure inside a store. Passed through the engine unchanged.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store data corrupt: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence for availability windows.
pub trait WindowStore: Send + Sync {
    /// All active windows of a provider, any day of the week.
    fn list_active_windows(&self, provider_id: &str) -> StoreResult<Vec<AvailabilityWindow>>;

    /// Load a window by id. Returns `Ok(None)` if it doesn't exist.
    fn get(&self, id: WindowId) -> StoreResult<Option<AvailabilityWindow>>;

    /// Persist a new active window and return it with its assigned id.
    fn insert(&self, window: NewWindow) -> StoreResult<AvailabilityWindow>;

    /// Replace a stored window. Returns `Ok(None)` if the id doesn't exist.
    fn update(&self, window: AvailabilityWindow) -> StoreResult<Option<AvailabilityWindow>>;

    /// Remove a window. Returns `Ok(false)` if the id doesn't exist.
    fn delete(&self, id: WindowId) -> StoreResult<bool>;
}

/// Read access to bookings owned by the booking subsystem.
pub trait BookingStore: Send + Sync {
    /// Bookings dated `today` or later with one of `statuses`.
    fn list_future_bookings(
        &self,
        provider_id: &str,
        statuses: &[BookingStatus],
        today: NaiveDate,
    ) -> StoreResult<Vec<Booking>>;

    /// Bookings between `start_date` and `end_date` (inclusive) with one of `statuses`.
    fn list_bookings_for_date_range(
        &self,
        provider_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        statuses: &[BookingStatus],
    ) -> StoreResult<Vec<Booking>>;
}
