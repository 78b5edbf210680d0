use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use magpies_terminal::feed;
use magpies_terminal::games_feed::{is_gameday, next_game_date, upcoming_games};
use magpies_terminal::rankings::result_label;
use magpies_terminal::state::{self, AppState, Delta, ProviderCommand, apply_delta};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.request_reload(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }

    fn request_reload(&mut self) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Reload unavailable");
            return;
        };
        if tx.send(ProviderCommand::Reload).is_err() {
            self.state.push_log("[WARN] Reload request failed");
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    feed::spawn_provider(tx, cmd_rx);

    let mut app = App::new(Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;
        // Measure only after the track has been drawn at least once.
        app.state.ticker.ensure_timed();

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let ticker_rows: u16 = if app.state.ticker_visible() { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(ticker_rows),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    if app.state.ticker_visible() {
        render_ticker(frame, chunks[1], &app.state);
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(38)])
        .split(chunks[2]);
    render_results_table(frame, body[0], &app.state);
    render_games_panel(frame, body[1], &app.state);

    render_console(frame, chunks[3], &app.state);

    let footer = Paragraph::new("j/k/↑/↓ Scroll | r Reload | ? Help | q Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[4]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let now = Local::now().naive_local();
    let mut title = "DUDLEY MAGPIES — RESULTS".to_string();
    if is_gameday(&state.games, now.date()) {
        title.push_str("  ● GAME DAY");
    }
    let next = match next_game_date(&state.games, now) {
        Some(date) => date.format("%-d %b").to_string(),
        None => "TBA".to_string(),
    };
    format!("{title}\nNext game: {next}")
}

fn render_ticker(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.height == 0 {
        return;
    }
    let cols = area.width as usize;
    let line = if state.ticker.is_animated() {
        let offset = state.ticker.offset_at(Instant::now());
        state.ticker.window(offset, cols)
    } else {
        state.ticker.content().to_string()
    };
    let style = if state.ground_closed() {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    frame.render_widget(Paragraph::new(line).style(style), area);
}

const DATE_COL: usize = 7;
const ROUND_COL: usize = 9;
const TEAM_COL: usize = 24;
const RESULT_COL: usize = 12;

fn render_results_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::RIGHT).title("RESULTS");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(
            "{} {} {} {} {}",
            fit("DATE", DATE_COL),
            fit("ROUND", ROUND_COL),
            fit("HOME", TEAM_COL),
            fit("RESULT", RESULT_COL),
            fit("AWAY", TEAM_COL),
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    if let Some(placeholder) = state.table_placeholder() {
        lines.push(Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let visible = (inner.height as usize).saturating_sub(1);
        for record in state.table_rows.iter().skip(state.table_scroll).take(visible) {
            lines.push(Line::from(format!(
                "{} {} {} {} {}",
                fit(&record.kickoff.format("%-d %b").to_string(), DATE_COL),
                fit(&record.round, ROUND_COL),
                fit(&record.home, TEAM_COL),
                fit(&result_label(record), RESULT_COL),
                fit(&record.away, TEAM_COL),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_games_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = if state.games_from_sample {
        "UPCOMING (sample)"
    } else {
        "UPCOMING"
    };
    let block = Block::default().borders(Borders::NONE).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let now = Local::now().naive_local();
    let upcoming = upcoming_games(&state.games, now);
    let mut lines: Vec<Line> = Vec::new();
    if upcoming.is_empty() {
        lines.push(Line::from(Span::styled(
            state::NO_GAMES_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        )));
    }
    for game in &upcoming {
        let marker = if game.home_away.eq_ignore_ascii_case("home") {
            "vs"
        } else {
            "@"
        };
        lines.push(Line::from(format!(
            "{}  {marker} {}",
            game.date.format("%a %-d %b %H:%M"),
            game.opponent
        )));
        lines.push(Line::from(Span::styled(
            format!("      {}", game.venue),
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_console(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::TOP).title("CONSOLE");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let shown = inner.height as usize;
    let lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(shown)
        .rev()
        .map(|l| Line::from(l.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 44.min(area.width);
    let height = 8.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, popup);
    let text = "j/k or ↑/↓  scroll results\nr           reload all feeds\n?           toggle this help\nEsc         close help\nq           quit\n\nScrolling down hides the ticker.";
    let help = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("HELP"));
    frame.render_widget(help, popup);
}

fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let used = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}
