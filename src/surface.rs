//! Seam to the external rendering surface: per-render marker handle lookup,
//! the two-phase popup-open protocol, and presentation mappings the surface
//! consumes as-is.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Notify;

use crate::model::{SelectionRef, TicketStatus};

/// Default viewport when nothing is selected.
pub const DEFAULT_CENTER: (f64, f64) = (16.303771, 80.435537);
pub const DEFAULT_ZOOM: u8 = 16;

/// Zoom used when flying to a selected ticket.
pub const FOCUS_ZOOM: u8 = 18;

/// Fallback wait before consulting the handle index when the surface never
/// signals readiness; covers surfaces that register handles asynchronously.
pub const HANDLE_REGISTRATION_GRACE: Duration = Duration::from_millis(800);

/// Pin icon for a status, named by accent rather than asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerIcon {
    Default,
    Accent1,
    Accent2,
    Accent3,
}

impl MarkerIcon {
    /// open maps to the default pin, in_progress to accent-1, assigned to
    /// accent-2, resolved and closed to accent-3.
    pub fn for_status(status: Option<&str>) -> Self {
        match TicketStatus::classify(status) {
            TicketStatus::Open => MarkerIcon::Default,
            TicketStatus::InProgress => MarkerIcon::Accent1,
            TicketStatus::Assigned => MarkerIcon::Accent2,
            TicketStatus::Resolved | TicketStatus::Closed => MarkerIcon::Accent3,
        }
    }
}

/// Human-readable issue type: `"pothole_damage"` becomes `"Pothole Damage"`.
pub fn display_issue_type(issue_type: Option<&str>) -> String {
    let Some(issue_type) = issue_type.filter(|s| !s.is_empty()) else {
        return "Not specified".to_string();
    };

    issue_type
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// External map link for a marker ("open in Google Maps").
pub fn external_map_url(latitude: f64, longitude: f64) -> String {
    format!("https://www.google.com/maps?q={},{}&z=18", latitude, longitude)
}

/// Where the surface should fly when a selection carries coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusTarget {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

/// Focus target for an active selection, once markers are ready. A
/// selection without coordinates focuses nothing.
pub fn focus_target(reference: &SelectionRef, markers_ready: bool) -> Option<FocusTarget> {
    if !markers_ready {
        return None;
    }
    reference
        .coordinate()
        .map(|(latitude, longitude)| FocusTarget {
            latitude,
            longitude,
            zoom: FOCUS_ZOOM,
        })
}

/// A live pin on the rendering surface, able to open its own detail popup.
pub trait PopupHandle {
    fn open_popup(&self);
}

/// Lookup from unique_id to the surface's live marker handles. Rebuilt from
/// scratch on every render pass and append-only within one; the marker
/// sequence stays the authoritative data.
#[derive(Debug)]
pub struct MarkerIndex<H> {
    handles: HashMap<String, H>,
}

impl<H> MarkerIndex<H> {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }

    pub fn register(&mut self, unique_id: impl Into<String>, handle: H) {
        self.handles.insert(unique_id.into(), handle);
    }

    pub fn get(&self, unique_id: &str) -> Option<&H> {
        self.handles.get(unique_id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<H> Default for MarkerIndex<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-phase popup opener: the surface signals once a render pass has
/// registered every handle, then the resolved marker's popup is opened. The
/// grace period is only a fallback for surfaces that never signal;
/// resolution itself is delay-independent.
#[derive(Debug)]
pub struct PopupOpener {
    ready: Notify,
    grace: Duration,
}

impl PopupOpener {
    pub fn new() -> Self {
        Self::with_grace(HANDLE_REGISTRATION_GRACE)
    }

    pub fn with_grace(grace: Duration) -> Self {
        Self {
            ready: Notify::new(),
            grace,
        }
    }

    /// Called by the surface after handle registration. Stores a permit, so
    /// signaling before the opener waits still releases it.
    pub fn handles_ready(&self) {
        self.ready.notify_one();
    }

    /// Waits for readiness (or the grace fallback), then opens the popup
    /// for `unique_id`. Returns whether one was opened; a missing handle is
    /// silently ignored.
    pub async fn open_when_ready<H: PopupHandle>(
        &self,
        unique_id: &str,
        index: &MarkerIndex<H>,
    ) -> bool {
        tokio::select! {
            _ = self.ready.notified() => {}
            _ = tokio::time::sleep(self.grace) => {}
        }

        match index.get(unique_id) {
            Some(handle) => {
                handle.open_popup();
                true
            }
            None => false,
        }
    }
}

impl Default for PopupOpener {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/surface_tests.rs"]
mod tests;
