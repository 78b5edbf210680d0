use chrono::NaiveDate;

use magpies_terminal::ground_status::GroundStatus;
use magpies_terminal::results_feed::MatchRecord;
use magpies_terminal::state::{
    AppState, Delta, EMPTY_PLACEHOLDER, FAILED_PLACEHOLDER, ResultsState, apply_delta,
};
use magpies_terminal::ticker::NO_RESULTS_MESSAGE;

fn fresh_state() -> AppState {
    let mut state = AppState::new();
    // Pin the pattern so an inherited CLUB_NAME_PATTERN cannot skew tests.
    state.club_pattern = "dudley redhead".to_string();
    state
}

fn club_record(team: &str, day: u32, score: &str) -> MatchRecord {
    MatchRecord {
        home: team.to_string(),
        away: "Opponent".to_string(),
        kickoff: NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
        score: score.to_string(),
        status: String::new(),
        round: String::new(),
    }
}

#[test]
fn set_results_builds_both_views() {
    let mut state = fresh_state();
    apply_delta(
        &mut state,
        Delta::SetResults(vec![
            club_record("Dudley Redhead U12", 4, "3 - 1"),
            club_record("Dudley Redhead U12", 11, "0 - 0"),
            club_record("Dudley Redhead U14", 4, "2 - 2"),
        ]),
    );

    assert_eq!(state.results_state, ResultsState::Loaded);
    // Table keeps the full history, ticker one entry per team.
    assert_eq!(state.table_rows.len(), 3);
    assert_eq!(state.ticker_entries.len(), 2);
    assert!(state.ticker.is_animated());
    assert!(state.table_placeholder().is_none());
}

#[test]
fn empty_results_show_the_empty_placeholder() {
    let mut state = fresh_state();
    apply_delta(&mut state, Delta::SetResults(Vec::new()));

    assert_eq!(state.results_state, ResultsState::Loaded);
    assert_eq!(state.table_placeholder(), Some(EMPTY_PLACEHOLDER));
    assert!(!state.ticker.is_animated());
    assert_eq!(state.ticker.content(), NO_RESULTS_MESSAGE);
}

#[test]
fn failed_results_show_the_failure_placeholder() {
    let mut state = fresh_state();
    apply_delta(
        &mut state,
        Delta::ResultsFailed("Results load failed: http 500".to_string()),
    );

    assert_eq!(state.results_state, ResultsState::Failed);
    assert_eq!(state.table_placeholder(), Some(FAILED_PLACEHOLDER));
    assert!(!state.ticker.is_animated());
    assert!(state.logs.iter().any(|l| l.starts_with("[WARN]")));
}

#[test]
fn ground_closure_takes_over_the_ticker_and_releases_it() {
    let mut state = fresh_state();
    apply_delta(
        &mut state,
        Delta::SetResults(vec![club_record("Dudley Redhead U12", 4, "3 - 1")]),
    );
    assert!(state.ticker.is_animated());

    apply_delta(
        &mut state,
        Delta::SetGroundStatus(GroundStatus {
            is_closed: true,
            note: Some("Waterlogged".to_string()),
            updated_at: None,
        }),
    );
    assert!(state.ground_closed());
    assert!(!state.ticker.is_animated());
    assert!(state.ticker.content().contains("Waterlogged"));
    // The ranked data is suppressed, not discarded.
    assert_eq!(state.ticker_entries.len(), 1);

    // Results arriving while closed must not resurrect the marquee.
    apply_delta(
        &mut state,
        Delta::SetResults(vec![club_record("Dudley Redhead U14", 11, "1 - 0")]),
    );
    assert!(!state.ticker.is_animated());

    // Reopening rebuilds the marquee from the retained entries.
    apply_delta(
        &mut state,
        Delta::SetGroundStatus(GroundStatus::default()),
    );
    assert!(state.ticker.is_animated());
    assert!(state.ticker.content().contains("U14"));
}

#[test]
fn scrolling_clamps_and_toggles_ticker_visibility() {
    let mut state = fresh_state();
    let records: Vec<MatchRecord> = (1..=9)
        .map(|day| club_record("Dudley Redhead U12", day, "1 - 0"))
        .collect();
    apply_delta(&mut state, Delta::SetResults(records));

    assert!(state.ticker_visible());
    for _ in 0..20 {
        state.scroll_down();
    }
    // Clamped to the last row, and far enough down to hide the ticker.
    assert_eq!(state.table_scroll, 8);
    assert!(!state.ticker_visible());

    for _ in 0..20 {
        state.scroll_up();
    }
    assert_eq!(state.table_scroll, 0);
    assert!(state.ticker_visible());
}

#[test]
fn console_log_is_capped() {
    let mut state = fresh_state();
    for i in 0..120 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] line {i}")));
    }
    assert_eq!(state.logs.len(), 50);
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] line 119"));
}

#[test]
fn games_delta_records_sample_provenance() {
    let mut state = fresh_state();
    apply_delta(
        &mut state,
        Delta::SetGames {
            games: Vec::new(),
            from_sample: true,
        },
    );
    assert!(state.games_from_sample);
}
