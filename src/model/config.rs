use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "wardmap.json";
pub const DEFAULT_REFRESH_SECS: u64 = 30;

/// Feed configuration, stored as pretty JSON next to wherever the feed runs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedConfig {
    pub version: u32,

    /// Ticket backend base URL, e.g. `http://localhost:8000`.
    pub base_url: String,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub refresh_secs: Option<u64>,
}

impl FeedConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            version: 1,
            base_url: base_url.into(),
            token: None,
            refresh_secs: None,
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.unwrap_or(DEFAULT_REFRESH_SECS))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("read {} (run `wardmap init --url ...`)", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self).context("serialize config")?;
        write_atomic(path, &bytes).with_context(|| format!("write {}", path.display()))
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/model/config_tests.rs"]
mod tests;
