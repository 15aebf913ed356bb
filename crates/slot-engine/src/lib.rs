//! # slot-engine
//!
//! Turns a provider's recurring weekly availability into concrete, bookable
//! time slots.
//!
//! Availability windows never silently overlap, and window changes never
//! orphan an already-placed pending or confirmed booking. All computation is
//! synchronous and pure over inputs read from the [`store`] traits.
//!
//! ## Modules
//!
//! - [`time`] — `"HH:MM"` ↔ minutes since midnight, day-of-week
//! - [`window`] / [`booking`] — data model
//! - [`overlap`] — detect overlapping windows on the same weekday
//! - [`guard`] — detect bookings a window change would orphan
//! - [`slots`] — generate bookable slots over a date range
//! - [`capacity`] — single-slot "can I book this" check
//! - [`lifecycle`] — create/update/delete windows with the checks above
//! - [`query`] — slot queries against the stores
//! - [`store`] — window/booking store traits and in-memory implementations
//! - [`clock`] / [`config`] / [`error`] — supporting types

pub mod booking;
pub mod capacity;
pub mod clock;
pub mod config;
pub mod error;
pub mod guard;
pub mod lifecycle;
pub mod overlap;
pub mod query;
pub mod slots;
pub mod store;
pub mod time;
pub mod window;

pub use booking::{Booking, BookingStatus};
pub use capacity::is_available;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use error::EngineError;
pub use guard::{find_orphaned_bookings, has_conflicting_bookings};
pub use lifecycle::WindowLifecycleService;
pub use overlap::has_overlap;
pub use query::SlotQueryService;
pub use slots::{generate_slots, Slot, SlotGenerator};
pub use store::{BookingStore, InMemoryBookingStore, InMemoryWindowStore, WindowStore};
pub use time::{to_minutes, to_time_string, TimeOfDay};
pub use window::{AvailabilityWindow, NewWindow, WindowId, WindowPatch, WindowRange};
