//! Flattens the nested ticket/sub-ticket payload into the deduplicated,
//! map-ready marker sequence.

use std::collections::HashSet;

use crate::model::{LooseFloat, Marker, RawTicket};

/// Builds the marker sequence for a raw ticket set.
///
/// Markers come only from sub-tickets; a ticket without any contributes
/// nothing, and top-level coordinates on such tickets are ignored. Records
/// with missing or unparseable coordinates are dropped, never reported.
/// Pure: the same input always yields the same output.
pub fn normalize(tickets: &[RawTicket]) -> Vec<Marker> {
    let mut seen = HashSet::new();
    let mut markers = Vec::new();

    for ticket in tickets {
        for sub in &ticket.sub_tickets {
            let Some(latitude) = coordinate(sub.latitude.as_ref(), ticket.latitude.as_ref())
            else {
                continue;
            };
            let Some(longitude) = coordinate(sub.longitude.as_ref(), ticket.longitude.as_ref())
            else {
                continue;
            };

            // First occurrence wins. The key is the id pair, not the
            // coordinates, so two sub-tickets at the same spot both appear.
            let unique_id = format!("{}_{}", ticket.ticket_id, sub.sub_id);
            if !seen.insert(unique_id.clone()) {
                continue;
            }

            markers.push(Marker {
                ticket_id: ticket.ticket_id.clone(),
                sub_id: sub.sub_id.clone(),
                latitude,
                longitude,
                issue_type: present(sub.issue_type.as_deref()),
                status: fall_back(sub.status.as_deref(), ticket.status.as_deref()),
                area: fall_back(sub.area.as_deref(), ticket.area.as_deref()),
                district: fall_back(sub.district.as_deref(), ticket.district.as_deref()),
                confidence: confidence(sub.confidence.as_ref(), ticket.confidence.as_ref()),
                created_at: fall_back(sub.created_at.as_deref(), ticket.created_at.as_deref()),
                user_name: present(ticket.user_name.as_deref()),
                unique_id,
            });
        }
    }

    markers
}

/// Picks the sub-ticket coordinate if one was filled in, else the parent's,
/// then parses it. A selected value that fails to parse drops the record; it
/// does not fall through to the parent.
fn coordinate(own: Option<&LooseFloat>, parent: Option<&LooseFloat>) -> Option<f64> {
    [own, parent]
        .into_iter()
        .flatten()
        .find(|value| value.is_present())?
        .as_finite()
}

/// Sub-ticket confidence unless it is absent or zero, else the parent's.
fn confidence(own: Option<&LooseFloat>, parent: Option<&LooseFloat>) -> Option<f64> {
    own.and_then(LooseFloat::as_finite)
        .filter(|value| *value != 0.0)
        .or_else(|| parent.and_then(LooseFloat::as_finite))
}

fn fall_back(own: Option<&str>, parent: Option<&str>) -> Option<String> {
    present(own).or_else(|| present(parent))
}

fn present(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
