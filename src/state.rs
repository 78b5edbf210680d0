use std::collections::VecDeque;

use crate::games_feed::GameFixture;
use crate::ground_status::GroundStatus;
use crate::rankings::{self, TeamLatest};
use crate::results_feed::{self, MatchRecord};
use crate::ticker::{self, TickerTrack};

pub const CONSOLE_MAX_LINES: usize = 50;

pub const FAILED_PLACEHOLDER: &str = "Failed to load results";
pub const EMPTY_PLACEHOLDER: &str = "No results available";
pub const LOADING_PLACEHOLDER: &str = "Loading results…";
pub const NO_GAMES_PLACEHOLDER: &str = "No upcoming games scheduled. Check back soon!";

/// Messages from the provider thread to the UI.
pub enum Delta {
    SetResults(Vec<MatchRecord>),
    ResultsFailed(String),
    SetGames {
        games: Vec<GameFixture>,
        from_sample: bool,
    },
    SetGroundStatus(GroundStatus),
    Log(String),
}

pub enum ProviderCommand {
    Reload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsState {
    Loading,
    Loaded,
    Failed,
}

pub struct AppState {
    pub club_pattern: String,
    /// Canonical record set as parsed; the ticker and table views below are
    /// derived from it independently and rebuilt whenever it changes.
    pub results: Vec<MatchRecord>,
    pub results_state: ResultsState,
    pub table_rows: Vec<MatchRecord>,
    pub ticker_entries: Vec<TeamLatest>,
    pub ticker: TickerTrack,
    pub games: Vec<GameFixture>,
    pub games_from_sample: bool,
    pub ground: Option<GroundStatus>,
    pub table_scroll: usize,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            club_pattern: results_feed::club_pattern(),
            results: Vec::new(),
            results_state: ResultsState::Loading,
            table_rows: Vec::new(),
            ticker_entries: Vec::new(),
            ticker: TickerTrack::build(&[]),
            games: Vec::new(),
            games_from_sample: false,
            ground: None,
            table_scroll: 0,
            help_overlay: false,
            logs: VecDeque::new(),
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.push_back(line.into());
        while self.logs.len() > CONSOLE_MAX_LINES {
            self.logs.pop_front();
        }
    }

    pub fn ground_closed(&self) -> bool {
        self.ground.as_ref().is_some_and(|g| g.is_closed)
    }

    /// Presentation toggle only; the ranked data stays put while hidden.
    pub fn ticker_visible(&self) -> bool {
        ticker::ticker_visible(self.table_scroll)
    }

    /// The single row shown in place of match rows when there are none.
    pub fn table_placeholder(&self) -> Option<&'static str> {
        if !self.table_rows.is_empty() {
            return None;
        }
        match self.results_state {
            ResultsState::Failed => Some(FAILED_PLACEHOLDER),
            ResultsState::Loaded => Some(EMPTY_PLACEHOLDER),
            ResultsState::Loading => Some(LOADING_PLACEHOLDER),
        }
    }

    pub fn scroll_down(&mut self) {
        let max = self.table_rows.len().saturating_sub(1);
        if self.table_scroll < max {
            self.table_scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.table_scroll = self.table_scroll.saturating_sub(1);
    }

    fn rebuild_ticker(&mut self) {
        if let Some(ground) = self.ground.as_ref()
            && ground.is_closed
        {
            self.ticker = TickerTrack::closed(ground.note.as_deref());
            return;
        }
        self.ticker = TickerTrack::build(&self.ticker_entries);
    }

    fn rebuild_views(&mut self) {
        self.table_rows = rankings::table_rows(&self.results, &self.club_pattern);
        self.ticker_entries = rankings::ticker_entries(&self.results, &self.club_pattern);
        let max = self.table_rows.len().saturating_sub(1);
        self.table_scroll = self.table_scroll.min(max);
        self.rebuild_ticker();
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetResults(records) => {
            state.results = records;
            state.results_state = ResultsState::Loaded;
            state.rebuild_views();
        }
        Delta::ResultsFailed(reason) => {
            state.results = Vec::new();
            state.results_state = ResultsState::Failed;
            state.push_log(format!("[WARN] {reason}"));
            state.rebuild_views();
        }
        Delta::SetGames { games, from_sample } => {
            state.games = games;
            state.games_from_sample = from_sample;
        }
        Delta::SetGroundStatus(status) => {
            if status.is_closed {
                let note = status.note.as_deref().unwrap_or("no note");
                state.push_log(format!("[WARN] Ground closed: {note}"));
            }
            state.ground = Some(status);
            state.rebuild_ticker();
        }
        Delta::Log(line) => state.push_log(line),
    }
}
