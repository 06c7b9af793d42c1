//! Resolves a selection reference against the current marker sequence.

use std::collections::HashMap;

use crate::model::{Marker, SelectionKey, SelectionRef};

/// Absolute tolerance for coordinate matching, one unit in the sixth
/// decimal place. Matches the precision the detail popup displays.
const COORD_TOLERANCE: f64 = 1e-6;

/// Determines which marker a selection reference points at, if any.
///
/// Candidates are tried tier by tier: exact unique-id lookup, then a scan
/// matching a bare id against either side of the pair, then a 6-decimal
/// coordinate match. The first hit wins. An unresolved reference is not an
/// error; the caller simply opens no popup.
///
/// Callers invoke this once markers are loaded; against an empty sequence
/// nothing can resolve. The result is independent of any delay the rendering
/// surface needs before its handles exist.
pub fn resolve_selection(reference: &SelectionRef, markers: &[Marker]) -> Option<String> {
    if markers.is_empty() {
        return None;
    }

    let by_unique_id: HashMap<&str, &Marker> = markers
        .iter()
        .map(|marker| (marker.unique_id.as_str(), marker))
        .collect();

    for key in reference.keys_by_tier() {
        let hit = match key {
            SelectionKey::ByIds { ticket_id, sub_id } => {
                let target = format!("{}_{}", ticket_id, sub_id);
                by_unique_id.get(target.as_str()).copied()
            }
            SelectionKey::ById(id) => markers
                .iter()
                .find(|marker| marker.sub_id == *id || marker.ticket_id == *id),
            SelectionKey::ByCoordinate {
                latitude,
                longitude,
            } => markers.iter().find(|marker| {
                coords_match(marker.latitude, *latitude)
                    && coords_match(marker.longitude, *longitude)
            }),
        };

        if let Some(marker) = hit {
            return Some(marker.unique_id.clone());
        }
    }

    None
}

fn coords_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= COORD_TOLERANCE
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;
