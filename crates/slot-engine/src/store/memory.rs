//! In-memory window and booking stores.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use super::{BookingStore, StoreError, StoreResult, WindowStore};
use crate::booking::{Booking, BookingStatus};
use crate::overlap::find_overlap;
use crate::window::{AvailabilityWindow, NewWindow, WindowId};

fn read<T>(lock: &RwLock<T>) -> StoreResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> StoreResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
}

/// Window store keyed by id, assigning ids sequentially.
#[derive(Debug, Default)]
pub struct InMemoryWindowStore {
    inner: RwLock<WindowStoreInner>,
}

#[derive(Debug, Default)]
struct WindowStoreInner {
    windows: BTreeMap<WindowId, AvailabilityWindow>,
    next_id: u64,
}

impl InMemoryWindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing windows. New ids continue after the highest one.
    ///
    /// # Errors
    /// `Corrupt` if a window fails field validation, two windows share an id,
    /// or two active windows of one provider overlap.
    pub fn with_windows(windows: Vec<AvailabilityWindow>) -> StoreResult<Self> {
        check_loaded(&windows)?;
        let next_id = windows
            .iter()
            .map(|w| w.id.0.saturating_add(1))
            .max()
            .unwrap_or(0);
        let windows = windows.into_iter().map(|w| (w.id, w)).collect();
        Ok(Self {
            inner: RwLock::new(WindowStoreInner { windows, next_id }),
        })
    }

    /// Every stored window, active or not, ordered by id.
    pub fn all(&self) -> StoreResult<Vec<AvailabilityWindow>> {
        Ok(read(&self.inner)?.windows.values().cloned().collect())
    }
}

/// Windows loaded from outside the lifecycle service must already hold its invariants.
fn check_loaded(windows: &[AvailabilityWindow]) -> StoreResult<()> {
    let mut ids = BTreeSet::new();
    let mut by_provider: BTreeMap<&str, Vec<AvailabilityWindow>> = BTreeMap::new();
    for window in windows {
        window
            .validate()
            .map_err(|err| StoreError::Corrupt(format!("window {}: {}", window.id, err)))?;
        if !ids.insert(window.id) {
            return Err(StoreError::Corrupt(format!("duplicate window id {}", window.id)));
        }
        by_provider
            .entry(window.provider_id.as_str())
            .or_default()
            .push(window.clone());
    }

    for group in by_provider.values() {
        for window in group.iter().filter(|w| w.active) {
            if let Some(other) = find_overlap(group, &window.range(), Some(window.id)) {
                return Err(StoreError::Corrupt(format!(
                    "window {} overlaps window {}",
                    window.id, other.id
                )));
            }
        }
    }
    Ok(())
}

impl WindowStore for InMemoryWindowStore {
    fn list_active_windows(&self, provider_id: &str) -> StoreResult<Vec<AvailabilityWindow>> {
        Ok(read(&self.inner)?
            .windows
            .values()
            .filter(|w| w.active && w.provider_id == provider_id)
            .cloned()
            .collect())
    }

    fn get(&self, id: WindowId) -> StoreResult<Option<AvailabilityWindow>> {
        Ok(read(&self.inner)?.windows.get(&id).cloned())
    }

    fn insert(&self, window: NewWindow) -> StoreResult<AvailabilityWindow> {
        let mut inner = write(&self.inner)?;
        let id = WindowId(inner.next_id);
        inner.next_id += 1;

        let stored = AvailabilityWindow {
            id,
            provider_id: window.provider_id,
            day_of_week: window.day_of_week,
            start_time: window.start_time,
            end_time: window.end_time,
            max_sessions_per_slot: window.max_sessions_per_slot,
            buffer_minutes: window.buffer_minutes,
            active: true,
        };
        inner.windows.insert(id, stored.clone());
        Ok(stored)
    }

    fn update(&self, window: AvailabilityWindow) -> StoreResult<Option<AvailabilityWindow>> {
        let mut inner = write(&self.inner)?;
        match inner.windows.get_mut(&window.id) {
            Some(slot) => {
                *slot = window.clone();
                Ok(Some(window))
            }
            None => Ok(None),
        }
    }

    fn delete(&self, id: WindowId) -> StoreResult<bool> {
        Ok(write(&self.inner)?.windows.remove(&id).is_some())
    }
}

/// Booking store over a plain list.
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    bookings: RwLock<Vec<Booking>>,
}

impl InMemoryBookingStore {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: RwLock::new(bookings),
        }
    }

    /// Add a booking, as the booking subsystem would.
    pub fn push(&self, booking: Booking) -> StoreResult<()> {
        write(&self.bookings)?.push(booking);
        Ok(())
    }

    pub fn all(&self) -> StoreResult<Vec<Booking>> {
        Ok(read(&self.bookings)?.clone())
    }

    fn select(&self, predicate: impl Fn(&Booking) -> bool) -> StoreResult<Vec<Booking>> {
        Ok(read(&self.bookings)?
            .iter()
            .filter(|&b| predicate(b))
            .cloned()
            .collect())
    }
}

impl BookingStore for InMemoryBookingStore {
    fn list_future_bookings(
        &self,
        provider_id: &str,
        statuses: &[BookingStatus],
        today: NaiveDate,
    ) -> StoreResult<Vec<Booking>> {
        self.select(|b| {
            b.provider_id == provider_id && statuses.contains(&b.status) && b.date >= today
        })
    }

    fn list_bookings_for_date_range(
        &self,
        provider_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        statuses: &[BookingStatus],
    ) -> StoreResult<Vec<Booking>> {
        self.select(|b| {
            b.provider_id == provider_id
                && statuses.contains(&b.status)
                && b.date >= start_date
                && b.date <= end_date
        })
    }
}
