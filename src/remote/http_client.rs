use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};

pub(super) async fn with_retries<T, F, Fut>(label: &str, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    const ATTEMPTS: usize = 3;
    let mut last: Option<anyhow::Error> = None;
    for i in 0..ATTEMPTS {
        match f().await {
            Ok(v) => return Ok(v),
            Err(err) => {
                last = Some(err);
                if i + 1 < ATTEMPTS {
                    tokio::time::sleep(Duration::from_millis(200 * (1 << i))).await;
                }
            }
        }
    }
    Err(last
        .unwrap_or_else(|| anyhow::anyhow!("unknown error"))
        .context(label.to_string()))
}

pub(super) fn ensure_ok(resp: reqwest::Response, label: &str) -> Result<reqwest::Response> {
    if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
        anyhow::bail!("unauthorized (token invalid/expired; run `wardmap init --url ... --token ... --force`)");
    }
    if resp.status() == reqwest::StatusCode::FORBIDDEN {
        anyhow::bail!("forbidden (insufficient permissions for the ticket backend)");
    }
    resp.error_for_status()
        .with_context(|| format!("{} status", label))
}
