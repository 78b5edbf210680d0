use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::feed_cache::feed_cache;
use crate::net::fetch_text;

const RESULTS_FEED_URL: &str =
    "https://api.apify.com/v2/datasets/yoBLwX2yoAmMG6N8e/items?clean=true&format=json&limit=1000";
const CLUB_NAME_PATTERN: &str = "dudley redhead";

pub const RESULTS_CACHE_KEY: &str = "dudley_apify_results_v1";
pub const RESULTS_TTL: Duration = Duration::from_secs(30 * 60);

// Scraped feeds write dates in whatever shape the source site used that week.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
];
const DAY_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d %b %Y", "%d %B %Y"];

/// One validated result. `kickoff` is always a comparable instant; records
/// failing both date parses never get this far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub home: String,
    pub away: String,
    pub kickoff: NaiveDateTime,
    pub score: String,
    pub status: String,
    pub round: String,
}

/// Case-insensitive substring pattern naming the tracked club.
pub fn club_pattern() -> String {
    env::var("CLUB_NAME_PATTERN")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim().to_lowercase())
        .unwrap_or_else(|| CLUB_NAME_PATTERN.to_string())
}

fn feed_url() -> String {
    env::var("RESULTS_FEED_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| RESULTS_FEED_URL.to_string())
}

/// Cache read-through: a hit inside the TTL never touches the network.
pub fn load_results() -> Result<Vec<MatchRecord>> {
    if let Some(cached) = feed_cache().get(RESULTS_CACHE_KEY) {
        return parse_results_json(&cached);
    }
    let body = fetch_text(&feed_url()).context("results feed request failed")?;
    // Only bodies that parse take up the cache window.
    let records = parse_results_json(&body)?;
    feed_cache().put(RESULTS_CACHE_KEY, &body, RESULTS_TTL);
    Ok(records)
}

pub fn parse_results_json(raw: &str) -> Result<Vec<MatchRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid results json")?;
    let Some(items) = root.as_array() else {
        return Ok(Vec::new());
    };
    Ok(items.iter().filter_map(parse_record).collect())
}

fn parse_record(v: &Value) -> Option<MatchRecord> {
    let kickoff = pick_string(v, &["date_iso"])
        .and_then(|s| parse_feed_date(&s))
        .or_else(|| pick_string(v, &["date"]).and_then(|s| parse_feed_date(&s)))?;

    Some(MatchRecord {
        home: pick_string(v, &["home"]).unwrap_or_default(),
        away: pick_string(v, &["away"]).unwrap_or_default(),
        kickoff,
        score: pick_string(v, &["score"]).unwrap_or_default(),
        status: pick_string(v, &["status"]).unwrap_or_default(),
        round: pick_string(v, &["round"]).unwrap_or_default(),
    })
}

pub fn parse_feed_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    for fmt in DAY_FORMATS {
        if let Ok(day) = NaiveDate::parse_from_str(trimmed, fmt) {
            return day.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// The side of the match belonging to the tracked club, if any. When both
/// sides match the pattern (intra-club fixtures), home wins.
pub fn club_side<'a>(record: &'a MatchRecord, pattern: &str) -> Option<&'a str> {
    if record.home.to_lowercase().contains(pattern) {
        return Some(&record.home);
    }
    if record.away.to_lowercase().contains(pattern) {
        return Some(&record.away);
    }
    None
}

pub fn involves_club(record: &MatchRecord, pattern: &str) -> bool {
    club_side(record, pattern).is_some()
}

/// Ticker eligibility: an actual outcome or a live status. Outcome-less
/// records still belong in the results table.
pub fn has_outcome(record: &MatchRecord) -> bool {
    !record.score.is_empty() || !record.status.is_empty()
}

pub(crate) fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(*key)
            && let Some(s) = as_string(v)
        {
            return Some(s);
        }
    }
    None
}

pub(crate) fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
