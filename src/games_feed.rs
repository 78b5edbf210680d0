use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::feed_cache::feed_cache;
use crate::net::fetch_text;
use crate::results_feed::{parse_feed_date, pick_string};

const GAMES_FEED_URL: &str = "https://dudleymagpiesjfc.com.au/games.json";

pub const GAMES_CACHE_KEY: &str = "dudley_games_cache_v1";
pub const GAMES_TTL: Duration = Duration::from_secs(6 * 60 * 60);
pub const UPCOMING_GAMES_SHOWN: usize = 5;

// Shipped schedule used when the games feed is unreachable and the cache is
// cold. Mirrors the published draw at release time.
const SAMPLE_GAMES_JSON: &str = r#"[
  { "date": "2026-04-11T09:00:00", "opponent": "Charlestown Azzurri", "venue": "Ulinga Oval", "homeAway": "Home" },
  { "date": "2026-04-18T10:30:00", "opponent": "Valentine Phoenix", "venue": "Croudace Bay", "homeAway": "Away" },
  { "date": "2026-05-02T09:00:00", "opponent": "Cardiff City", "venue": "Ulinga Oval", "homeAway": "Home" },
  { "date": "2026-05-09T11:00:00", "opponent": "Dudley Redhead", "venue": "Ulinga Oval", "homeAway": "Home" }
]"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFixture {
    pub date: NaiveDateTime,
    pub opponent: String,
    pub venue: String,
    pub home_away: String,
}

fn feed_url() -> String {
    env::var("GAMES_FEED_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| GAMES_FEED_URL.to_string())
}

/// Cache read-through with the long fixtures TTL. The caller falls back to
/// [`sample_games`] when this errors with a cold cache.
pub fn load_games() -> Result<Vec<GameFixture>> {
    if let Some(cached) = feed_cache().get(GAMES_CACHE_KEY) {
        return parse_games_json(&cached);
    }
    let body = fetch_text(&feed_url()).context("games feed request failed")?;
    let games = parse_games_json(&body)?;
    feed_cache().put(GAMES_CACHE_KEY, &body, GAMES_TTL);
    Ok(games)
}

pub fn parse_games_json(raw: &str) -> Result<Vec<GameFixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid games json")?;
    let Some(items) = root.as_array() else {
        return Ok(Vec::new());
    };
    Ok(items.iter().filter_map(parse_game).collect())
}

fn parse_game(v: &Value) -> Option<GameFixture> {
    let date = pick_string(v, &["date"]).and_then(|s| parse_feed_date(&s))?;
    Some(GameFixture {
        date,
        opponent: pick_string(v, &["opponent"]).unwrap_or_default(),
        venue: pick_string(v, &["venue"]).unwrap_or_default(),
        home_away: pick_string(v, &["homeAway"]).unwrap_or_default(),
    })
}

pub fn sample_games() -> Vec<GameFixture> {
    parse_games_json(SAMPLE_GAMES_JSON).unwrap_or_default()
}

/// Future games, soonest first, capped for the panel.
pub fn upcoming_games(games: &[GameFixture], now: NaiveDateTime) -> Vec<GameFixture> {
    let mut upcoming: Vec<GameFixture> = games.iter().filter(|g| g.date >= now).cloned().collect();
    upcoming.sort_by_key(|g| g.date);
    upcoming.truncate(UPCOMING_GAMES_SHOWN);
    upcoming
}

pub fn is_gameday(games: &[GameFixture], today: NaiveDate) -> bool {
    games.iter().any(|g| g.date.date() == today)
}

pub fn next_game_date(games: &[GameFixture], now: NaiveDateTime) -> Option<NaiveDateTime> {
    games.iter().filter(|g| g.date >= now).map(|g| g.date).min()
}
