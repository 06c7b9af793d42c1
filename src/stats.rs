use serde::Serialize;

use crate::model::{Marker, TicketStatus};

/// Status counters derived from a marker sequence. Recomputed wholesale on
/// every sequence change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub assigned: usize,
    pub resolved: usize,
    pub closed: usize,
}

impl StatusCounts {
    /// Markers still needing attention.
    pub fn active(&self) -> usize {
        self.open + self.in_progress + self.assigned
    }
}

/// Counts markers per status, case-insensitively. Unrecognized or missing
/// statuses count as open; the markers themselves are left untouched.
pub fn aggregate(markers: &[Marker]) -> StatusCounts {
    let mut counts = StatusCounts {
        total: markers.len(),
        ..StatusCounts::default()
    };

    for marker in markers {
        match TicketStatus::classify(marker.status.as_deref()) {
            TicketStatus::Open => counts.open += 1,
            TicketStatus::InProgress => counts.in_progress += 1,
            TicketStatus::Assigned => counts.assigned += 1,
            TicketStatus::Resolved => counts.resolved += 1,
            TicketStatus::Closed => counts.closed += 1,
        }
    }

    counts
}

#[cfg(test)]
#[path = "tests/stats_tests.rs"]
mod tests;
