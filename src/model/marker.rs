use serde::{Deserialize, Serialize};

use super::ticket::TicketId;

/// Flattened, map-ready representation of one sub-ticket. Immutable once
/// created; the whole sequence is rebuilt on every fetch cycle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub ticket_id: TicketId,
    pub sub_id: TicketId,
    pub latitude: f64,
    pub longitude: f64,
    pub issue_type: Option<String>,
    pub status: Option<String>,
    pub area: Option<String>,
    pub district: Option<String>,
    pub confidence: Option<f64>,
    pub created_at: Option<String>,
    pub user_name: Option<String>,

    /// Composite key `{ticket_id}_{sub_id}`, unique within a sequence.
    pub unique_id: String,
}

/// The fixed status vocabulary markers are classified into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Assigned,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// Case-insensitive classification. Unrecognized or missing statuses
    /// count as open for display purposes only; the marker text is never
    /// rewritten.
    pub fn classify(status: Option<&str>) -> Self {
        match status.unwrap_or("").to_ascii_lowercase().as_str() {
            "in_progress" => TicketStatus::InProgress,
            "assigned" => TicketStatus::Assigned,
            "resolved" => TicketStatus::Resolved,
            "closed" => TicketStatus::Closed,
            _ => TicketStatus::Open,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Assigned => "assigned",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }
}
