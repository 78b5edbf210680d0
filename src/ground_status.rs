use std::env;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::net::fetch_text;

const GROUND_STATUS_URL: &str =
    "https://script.google.com/macros/s/AKfycby_kAXDcQKQ1tJQmRCii91iXPn-mxB0hRq6NTf09U1nUMt9nt0xjjy1oTo0hiLx8af-/exec";

/// Signal from the grounds committee. `is_closed` suppresses the ticker in
/// favour of the closure note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GroundStatus {
    pub is_closed: bool,
    pub note: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

fn feed_url() -> String {
    env::var("GROUND_STATUS_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| GROUND_STATUS_URL.to_string())
}

/// Fetched fresh on every load; closure notices are never cached.
pub fn load_ground_status() -> Result<GroundStatus> {
    let body = fetch_text(&feed_url()).context("ground status request failed")?;
    parse_ground_status_json(&body)
}

pub fn parse_ground_status_json(raw: &str) -> Result<GroundStatus> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(GroundStatus::default());
    }
    serde_json::from_str(trimmed).context("invalid ground status json")
}
