use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chrono::NaiveDate;

use magpies_terminal::rankings::{latest_per_team, table_rows, ticker_entries};
use magpies_terminal::results_feed::{MatchRecord, parse_results_json};
use magpies_terminal::team_label::resolve_team;
use magpies_terminal::ticker::TickerTrack;

static RESULTS_JSON: &str = include_str!("../tests/fixtures/results_feed.json");

const CLUB: &str = "dudley redhead";

fn synthetic_season(weeks: u64, teams: u32) -> Vec<MatchRecord> {
    let base = NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
    let mut records = Vec::new();
    for week in 0..weeks {
        for team in 0..teams {
            let age = 6 + (team % 12);
            let division = team % 3;
            records.push(MatchRecord {
                home: format!("Dudley Redhead U{age} Div {division}"),
                away: format!("Visitor {team}"),
                kickoff: base
                    .checked_add_days(chrono::Days::new(week * 7))
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
                score: format!("{} - {}", week % 5, team % 4),
                status: String::new(),
                round: format!("Round {week}"),
            });
        }
    }
    records
}

fn bench_results_parse(c: &mut Criterion) {
    c.bench_function("results_parse", |b| {
        b.iter(|| {
            let records = parse_results_json(black_box(RESULTS_JSON)).unwrap();
            black_box(records.len());
        })
    });
}

fn bench_team_resolve(c: &mut Criterion) {
    c.bench_function("team_resolve", |b| {
        b.iter(|| {
            let team = resolve_team(black_box("Dudley Redhead JFC Under 14 Division 2"));
            black_box(team.key.len());
        })
    });
}

fn bench_rankings(c: &mut Criterion) {
    let records = synthetic_season(26, 40);

    c.bench_function("latest_per_team", |b| {
        b.iter(|| {
            let latest = latest_per_team(black_box(&records), CLUB);
            black_box(latest.len());
        })
    });

    c.bench_function("ticker_entries", |b| {
        b.iter(|| {
            let entries = ticker_entries(black_box(&records), CLUB);
            black_box(entries.len());
        })
    });

    c.bench_function("table_rows", |b| {
        b.iter(|| {
            let rows = table_rows(black_box(&records), CLUB);
            black_box(rows.len());
        })
    });
}

fn bench_ticker_build(c: &mut Criterion) {
    let records = synthetic_season(26, 40);
    let entries = ticker_entries(&records, CLUB);

    c.bench_function("ticker_build_and_window", |b| {
        b.iter(|| {
            let mut track = TickerTrack::build(black_box(&entries));
            track.ensure_timed();
            black_box(track.window(17, 120).len());
        })
    });
}

criterion_group!(
    perf,
    bench_results_parse,
    bench_team_resolve,
    bench_rankings,
    bench_ticker_build
);
criterion_main!(perf);
