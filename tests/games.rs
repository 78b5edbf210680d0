use chrono::{NaiveDate, NaiveDateTime};

use magpies_terminal::games_feed::{
    GameFixture, UPCOMING_GAMES_SHOWN, is_gameday, next_game_date, upcoming_games,
};

fn game(y: i32, m: u32, d: u32, opponent: &str) -> GameFixture {
    GameFixture {
        date: NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
        opponent: opponent.to_string(),
        venue: "Ulinga Oval".to_string(),
        home_away: "Home".to_string(),
    }
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 4, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn upcoming_filters_sorts_and_caps() {
    let mut games = vec![
        game(2026, 5, 2, "Cardiff City"),
        game(2026, 3, 7, "Valentine Phoenix"),
        game(2026, 4, 11, "Charlestown Azzurri"),
    ];
    for week in 0..6 {
        games.push(game(2026, 6, 1 + week * 2, "Filler"));
    }

    let upcoming = upcoming_games(&games, now());
    assert_eq!(upcoming.len(), UPCOMING_GAMES_SHOWN);
    // Past games are gone, the rest run soonest-first.
    assert_eq!(upcoming[0].opponent, "Charlestown Azzurri");
    assert_eq!(upcoming[1].opponent, "Cardiff City");
    assert!(upcoming.windows(2).all(|w| w[0].date <= w[1].date));
}

#[test]
fn gameday_matches_on_the_calendar_day() {
    let games = vec![game(2026, 4, 1, "Cardiff City")];
    assert!(is_gameday(&games, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
    assert!(!is_gameday(&games, NaiveDate::from_ymd_opt(2026, 4, 2).unwrap()));
    assert!(!is_gameday(&[], NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
}

#[test]
fn next_game_is_the_soonest_future_fixture() {
    let games = vec![
        game(2026, 5, 2, "Cardiff City"),
        game(2026, 4, 11, "Charlestown Azzurri"),
        game(2026, 3, 7, "Valentine Phoenix"),
    ];
    assert_eq!(
        next_game_date(&games, now()).map(|dt| dt.date()),
        NaiveDate::from_ymd_opt(2026, 4, 11)
    );
    assert!(next_game_date(&[], now()).is_none());
}
