use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Ticket and sub-ticket identifiers. Older backend versions emit these as
/// bare JSON numbers, newer ones as strings; both decode to the same key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TicketId(pub String);

impl TicketId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TicketId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TicketId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for TicketId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Int(i64),
            Num(f64),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Text(s) => TicketId(s),
            Wire::Int(n) => TicketId(n.to_string()),
            Wire::Num(n) => TicketId(n.to_string()),
        })
    }
}

/// Coordinates and confidence values arrive as numbers or numeric strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseFloat {
    Num(f64),
    Text(String),
}

impl LooseFloat {
    /// Present means the wire carried a fillable value; an empty string
    /// stands for "not filled in" and is treated as absent.
    pub fn is_present(&self) -> bool {
        match self {
            LooseFloat::Num(_) => true,
            LooseFloat::Text(s) => !s.trim().is_empty(),
        }
    }

    /// Finite numeric value, if this scalar parses to one.
    pub fn as_finite(&self) -> Option<f64> {
        let value = match self {
            LooseFloat::Num(n) => *n,
            LooseFloat::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for LooseFloat {
    fn from(value: f64) -> Self {
        LooseFloat::Num(value)
    }
}

impl From<&str> for LooseFloat {
    fn from(value: &str) -> Self {
        LooseFloat::Text(value.to_string())
    }
}

/// A reported complaint as the ticket API returns it. Everything except the
/// id is optional; located issue instances live in `sub_tickets`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawTicket {
    pub ticket_id: TicketId,

    #[serde(default)]
    pub latitude: Option<LooseFloat>,
    #[serde(default)]
    pub longitude: Option<LooseFloat>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub confidence: Option<LooseFloat>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub sub_tickets: Vec<RawSubTicket>,
}

/// One located issue instance under a ticket. Missing geo/status/area/
/// district/confidence/created_at fields inherit from the parent ticket
/// (parent is fallback, not override).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawSubTicket {
    pub sub_id: TicketId,

    #[serde(default)]
    pub latitude: Option<LooseFloat>,
    #[serde(default)]
    pub longitude: Option<LooseFloat>,
    #[serde(default)]
    pub issue_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub confidence: Option<LooseFloat>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
#[path = "../tests/model/ticket_tests.rs"]
mod tests;
