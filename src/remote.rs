use anyhow::{Context, Result};

use crate::model::{FeedConfig, RawTicket};

mod http_client;
use self::http_client::{ensure_ok, with_retries};

mod types;
pub use self::types::*;

/// Async client for the ticket backend.
pub struct TicketClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl TicketClient {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("wardmap")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retrieves the ticket set. The map feed calls this with empty filters
    /// to get everything; a missing `tickets` field decodes as empty.
    pub async fn fetch_tickets(&self, filters: &TicketFilters) -> Result<Vec<RawTicket>> {
        let response: TicketsResponse = with_retries("fetch tickets", || {
            let mut request = self.client.get(self.url("/tickets")).query(filters);
            if let Some(token) = &self.token {
                request =
                    request.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
            }
            async move {
                let resp = request.send().await.context("send")?;
                ensure_ok(resp, "fetch tickets")?
                    .json::<TicketsResponse>()
                    .await
                    .context("parse tickets response")
            }
        })
        .await?;

        Ok(response.tickets)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
