//! Wire types for the ticket API.

use serde::{Deserialize, Serialize};

use crate::model::RawTicket;

/// Envelope the ticket listing returns. Lenient: a response without a
/// `tickets` field is an empty set, not an error.
#[derive(Debug, Default, Deserialize)]
pub struct TicketsResponse {
    #[serde(default)]
    pub tickets: Vec<RawTicket>,
}

/// Query filters for the ticket listing. The map feed fetches unfiltered.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TicketFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
}
