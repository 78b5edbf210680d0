use std::collections::HashSet;

use crate::results_feed::{MatchRecord, club_side, has_outcome, involves_club};
use crate::team_label::{TeamIdentity, resolve_team};

pub const TABLE_MAX_ROWS: usize = 50;
pub const TICKER_MAX_TEAMS: usize = 10;

/// The one freshest record for a team key. Rebuilt from scratch on every
/// feed load; never mutated.
#[derive(Debug, Clone)]
pub struct TeamLatest {
    pub team: TeamIdentity,
    pub record: MatchRecord,
}

/// The global ordering: most recent first. Stable, so equal kickoffs keep
/// feed order and the dedup walk stays deterministic.
pub fn sort_by_kickoff_desc(records: &mut [MatchRecord]) {
    records.sort_by(|a, b| b.kickoff.cmp(&a.kickoff));
}

/// Latest result per team key across every club record.
pub fn latest_per_team(records: &[MatchRecord], pattern: &str) -> Vec<TeamLatest> {
    collapse_latest(records.iter(), pattern)
}

/// Ticker snapshot: one outcome-bearing record per team, youngest age group
/// first, then division, ungraded teams last.
pub fn ticker_entries(records: &[MatchRecord], pattern: &str) -> Vec<TeamLatest> {
    let mut entries = collapse_latest(records.iter().filter(|r| has_outcome(r)), pattern);
    entries.sort_by_key(|e| (e.team.age_order(), e.team.division_order()));
    entries.truncate(TICKER_MAX_TEAMS);
    entries
}

/// Table history: the full club record list, date descending, capped.
/// No per-team collapsing — the table is a history, the ticker a snapshot.
pub fn table_rows(records: &[MatchRecord], pattern: &str) -> Vec<MatchRecord> {
    let mut rows: Vec<MatchRecord> = records
        .iter()
        .filter(|r| involves_club(r, pattern))
        .cloned()
        .collect();
    sort_by_kickoff_desc(&mut rows);
    rows.truncate(TABLE_MAX_ROWS);
    rows
}

/// Result column text: status if present, else score, else "-".
pub fn result_label(record: &MatchRecord) -> String {
    if !record.status.is_empty() {
        record.status.clone()
    } else if !record.score.is_empty() {
        record.score.clone()
    } else {
        "-".to_string()
    }
}

// Sort descending once, then a single linear pass: the first record seen
// for a key is that team's latest.
fn collapse_latest<'a>(
    records: impl Iterator<Item = &'a MatchRecord>,
    pattern: &str,
) -> Vec<TeamLatest> {
    let mut sorted: Vec<&MatchRecord> = records.collect();
    sorted.sort_by(|a, b| b.kickoff.cmp(&a.kickoff));

    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for record in sorted {
        let Some(side) = club_side(record, pattern) else {
            continue;
        };
        let team = resolve_team(side);
        if seen.insert(team.key.clone()) {
            out.push(TeamLatest {
                team,
                record: record.clone(),
            });
        }
    }
    out
}
