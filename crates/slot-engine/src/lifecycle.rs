//! Create, update and delete availability windows.
//!
//! Every mutation validates first and writes last, so a rejected call leaves
//! the store untouched:
//!
//! - **create** -- field validation, then the overlap check.
//! - **update** -- merge, field validation, overlap check (excluding the window
//!   itself) when the range moves or the window is re-activated, and the
//!   booking guard when the range moves or the window is deactivated.
//! - **delete** -- the booking guard against the window's current range.
//!
//! Writes through one service are serialized so the reads feeding the checks
//! and the write that follows cannot interleave with another writer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::booking::{Booking, BookingStatus};
use crate::clock::Clock;
use crate::error::{EngineError, Result};
use crate::guard::find_orphaned_bookings;
use crate::overlap::find_overlap;
use crate::store::{BookingStore, WindowStore};
use crate::window::{AvailabilityWindow, NewWindow, WindowId, WindowPatch, WindowRange};

pub struct WindowLifecycleService {
    windows: Arc<dyn WindowStore>,
    bookings: Arc<dyn BookingStore>,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl WindowLifecycleService {
    pub fn new(
        windows: Arc<dyn WindowStore>,
        bookings: Arc<dyn BookingStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            windows,
            bookings,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        // The guarded unit carries no data, so a poisoned lock is still usable.
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a new active window.
    ///
    /// # Errors
    /// `Validation` for bad fields, `OverlapConflict` if the range overlaps an
    /// active window of the same provider and day.
    pub fn create_window(&self, input: NewWindow) -> Result<AvailabilityWindow> {
        input.validate()?;
        let _writes = self.lock_writes();

        self.ensure_no_overlap(&input.provider_id, &input.range(), None)?;

        let created = self.windows.insert(input)?;
        info!(
            window_id = %created.id,
            provider_id = %created.provider_id,
            day_of_week = created.day_of_week,
            start = %created.start_time,
            end = %created.end_time,
            "created availability window"
        );
        Ok(created)
    }

    /// Apply a partial update to an existing window.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `Validation` if the merged window is
    /// invalid, `OverlapConflict` or `BookingConflict` if the change would
    /// overlap another window or orphan a future booking.
    pub fn update_window(&self, id: WindowId, patch: WindowPatch) -> Result<AvailabilityWindow> {
        let _writes = self.lock_writes();

        let current = self.windows.get(id)?.ok_or(EngineError::NotFound(id))?;
        let updated = current.merged(&patch);
        updated.validate()?;

        let range_changed = updated.range() != current.range();
        let reactivated = updated.active && !current.active;

        if updated.active && (range_changed || reactivated) {
            self.ensure_no_overlap(&updated.provider_id, &updated.range(), Some(id))?;
        }

        let deactivated = current.active && !updated.active;
        if current.active && (range_changed || deactivated) {
            let new_range = updated.active.then(|| updated.range());
            let bookings = self.future_bookings(&current.provider_id)?;
            let orphaned = find_orphaned_bookings(
                &bookings,
                &current.range(),
                new_range.as_ref(),
                self.clock.today(),
            );
            if let Some(err) = booking_conflict(&orphaned) {
                warn!(window_id = %id, orphaned = orphaned.len(), "update would orphan bookings");
                return Err(err);
            }
        }

        let stored = self
            .windows
            .update(updated)?
            .ok_or(EngineError::NotFound(id))?;
        info!(window_id = %id, active = stored.active, "updated availability window");
        Ok(stored)
    }

    /// Remove a window.
    ///
    /// The guard runs whether or not the window is active. An inactive window
    /// may share its range with an active sibling, so a booking held by the
    /// sibling also blocks deleting the inactive one; deactivated windows stay
    /// in place until those bookings are in the past.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `BookingConflict` if any future
    /// pending/confirmed booking starts inside the window's range.
    pub fn delete_window(&self, id: WindowId) -> Result<()> {
        let _writes = self.lock_writes();

        let current = self.windows.get(id)?.ok_or(EngineError::NotFound(id))?;
        let bookings = self.future_bookings(&current.provider_id)?;
        let orphaned =
            find_orphaned_bookings(&bookings, &current.range(), None, self.clock.today());

        if let Some(err) = booking_conflict(&orphaned) {
            warn!(window_id = %id, orphaned = orphaned.len(), "delete blocked by bookings");
            return Err(err);
        }

        if !self.windows.delete(id)? {
            return Err(EngineError::NotFound(id));
        }
        info!(window_id = %id, provider_id = %current.provider_id, "deleted availability window");
        Ok(())
    }

    fn ensure_no_overlap(
        &self,
        provider_id: &str,
        candidate: &WindowRange,
        exclude: Option<WindowId>,
    ) -> Result<()> {
        let existing = self.windows.list_active_windows(provider_id)?;
        match find_overlap(&existing, candidate, exclude) {
            Some(other) => {
                warn!(
                    provider_id = %provider_id,
                    existing = %other.id,
                    day_of_week = candidate.day_of_week,
                    "window overlaps an existing window"
                );
                Err(EngineError::OverlapConflict {
                    existing: other.id,
                    day_of_week: candidate.day_of_week,
                    start_time: candidate.start_time,
                    end_time: candidate.end_time,
                })
            }
            None => Ok(()),
        }
    }

    fn future_bookings(&self, provider_id: &str) -> Result<Vec<Booking>> {
        Ok(self
            .bookings
            .list_future_bookings(provider_id, &BookingStatus::ACTIVE, self.clock.today())?)
    }
}

/// The conflict for a set of orphaned bookings, reported by the earliest one.
/// `None` when nothing is orphaned.
fn booking_conflict(orphaned: &[&Booking]) -> Option<EngineError> {
    orphaned
        .iter()
        .min_by_key(|b| (b.date, b.requested_time))
        .map(|first| EngineError::BookingConflict {
            count: orphaned.len(),
            date: first.date,
            time: first.requested_time,
        })
}
