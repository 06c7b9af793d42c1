use std::sync::Mutex;

use serde::{Deserialize, Deserializer};

use super::ticket::{LooseFloat, TicketId};

/// One way of pointing at a marker. Resolution tries keys in tier order
/// (exact pair, bare id, coordinate) regardless of attachment order.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionKey {
    /// Exact (ticket, sub-ticket) pair; resolves by direct unique-id lookup.
    ByIds { ticket_id: TicketId, sub_id: TicketId },
    /// A bare id matched against either side of the pair.
    ById(TicketId),
    /// Coordinates compared at 6-decimal precision.
    ByCoordinate { latitude: f64, longitude: f64 },
}

impl SelectionKey {
    pub(crate) fn tier(&self) -> u8 {
        match self {
            SelectionKey::ByIds { .. } => 0,
            SelectionKey::ById(_) => 1,
            SelectionKey::ByCoordinate { .. } => 2,
        }
    }
}

/// The "ticket the user came from". Navigation hands this over in a loose
/// shape that may carry several keys at once; all of them are kept so
/// resolution can fall through tier by tier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionRef {
    keys: Vec<SelectionKey>,
}

impl SelectionRef {
    pub fn by_ids(ticket_id: impl Into<TicketId>, sub_id: impl Into<TicketId>) -> Self {
        Self::default().and(SelectionKey::ByIds {
            ticket_id: ticket_id.into(),
            sub_id: sub_id.into(),
        })
    }

    pub fn by_id(id: impl Into<TicketId>) -> Self {
        Self::default().and(SelectionKey::ById(id.into()))
    }

    pub fn by_coordinate(latitude: f64, longitude: f64) -> Self {
        Self::default().and(SelectionKey::ByCoordinate {
            latitude,
            longitude,
        })
    }

    pub fn and(mut self, key: SelectionKey) -> Self {
        self.keys.push(key);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys sorted into resolution order: exact pair, bare id, coordinate.
    pub fn keys_by_tier(&self) -> Vec<&SelectionKey> {
        let mut keys: Vec<&SelectionKey> = self.keys.iter().collect();
        keys.sort_by_key(|key| key.tier());
        keys
    }

    /// Coordinates carried by this reference, if any. Used for viewport
    /// focus, independent of which tier resolution ends up matching.
    pub fn coordinate(&self) -> Option<(f64, f64)> {
        self.keys.iter().find_map(|key| match key {
            SelectionKey::ByCoordinate {
                latitude,
                longitude,
            } => Some((*latitude, *longitude)),
            _ => None,
        })
    }
}

impl<'de> Deserialize<'de> for SelectionRef {
    /// Decodes the loose navigation shape: a nested `selectedTicket` pair,
    /// a flat `ticketId`, and/or bare `latitude`/`longitude`.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct NestedIds {
            ticket_id: TicketId,
            sub_id: TicketId,
        }

        #[derive(Deserialize)]
        struct Wire {
            #[serde(default, rename = "selectedTicket")]
            selected_ticket: Option<NestedIds>,
            #[serde(default, rename = "ticketId")]
            ticket_id: Option<TicketId>,
            #[serde(default)]
            latitude: Option<LooseFloat>,
            #[serde(default)]
            longitude: Option<LooseFloat>,
        }

        let wire = Wire::deserialize(deserializer)?;
        let mut reference = SelectionRef::default();

        if let Some(ids) = wire.selected_ticket {
            reference = reference.and(SelectionKey::ByIds {
                ticket_id: ids.ticket_id,
                sub_id: ids.sub_id,
            });
        }
        if let Some(id) = wire.ticket_id {
            reference = reference.and(SelectionKey::ById(id));
        }
        if let (Some(latitude), Some(longitude)) = (
            wire.latitude.as_ref().and_then(LooseFloat::as_finite),
            wire.longitude.as_ref().and_then(LooseFloat::as_finite),
        ) {
            reference = reference.and(SelectionKey::ByCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(reference)
    }
}

/// One-shot slot for the reference handed over by navigation. Reading takes
/// the value, so a reload never re-triggers auto-selection.
#[derive(Debug, Default)]
pub struct SelectionInbox {
    slot: Mutex<Option<SelectionRef>>,
}

impl SelectionInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a reference, replacing any unread one. At most one selection
    /// is active at a time.
    pub fn put(&self, reference: SelectionRef) {
        *self.slot.lock().unwrap() = Some(reference);
    }

    pub fn take(&self) -> Option<SelectionRef> {
        self.slot.lock().unwrap().take()
    }
}

#[cfg(test)]
#[path = "../tests/model/selection_tests.rs"]
mod tests;
