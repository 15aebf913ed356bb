//! Detect overlapping availability windows for a provider.
//!
//! Windows are compared as half-open `[start, end)` minute ranges on the same
//! day of the week. Adjacent windows (one ends exactly when another starts) are
//! NOT overlapping. Inactive windows never conflict.

use crate::window::{AvailabilityWindow, WindowId, WindowRange};

/// Find the first active window on the candidate's day whose range overlaps it.
///
/// `exclude` skips one window id, so an updated window is not compared with
/// its own stored version.
pub fn find_overlap<'a>(
    existing: &'a [AvailabilityWindow],
    candidate: &WindowRange,
    exclude: Option<WindowId>,
) -> Option<&'a AvailabilityWindow> {
    existing
        .iter()
        .filter(|w| w.active)
        .filter(|w| Some(w.id) != exclude)
        // candidate.start < existing.end && candidate.end > existing.start
        .find(|w| candidate.overlaps(&w.range()))
}

/// Whether the candidate range overlaps any active window on the same day.
pub fn has_overlap(
    existing: &[AvailabilityWindow],
    candidate: &WindowRange,
    exclude: Option<WindowId>,
) -> bool {
    find_overlap(existing, candidate, exclude).is_some()
}
