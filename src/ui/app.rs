use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use crate::ai::{Agent, Difficulty};
use crate::config::{AppConfig, UiConfig};
use crate::error::MoveError;
use crate::game::{Coord, GameMode, GameResult, GameSession, Player};

use super::game_view::{self, GameView};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Blinking highlight of a winning line, shown before the next game starts.
struct Highlight {
    winner: Player,
    cells: Vec<Coord>,
    step: usize,
    next_toggle: Instant,
}

pub struct App {
    session: GameSession,
    agent: Box<dyn Agent>,
    difficulty: Difficulty,
    timing: UiConfig,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    ai_due: Option<Instant>,
    highlight: Option<Highlight>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_agent(config, config.game.difficulty.agent(None))
    }

    /// Build the app around a specific computer player.
    pub fn with_agent(config: &AppConfig, agent: Box<dyn Agent>) -> Self {
        let session = GameSession::new(&config.board, config.game.mode);
        let selected_column = session.board().cols() / 2;
        App {
            session,
            agent,
            difficulty: config.game.difficulty,
            timing: config.ui,
            selected_column,
            should_quit: false,
            message: None,
            ai_due: None,
            highlight: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.tick(Instant::now());
        }
        Ok(())
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        let timeout = self
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .map_or(POLL_INTERVAL, |wait| wait.min(POLL_INTERVAL));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn next_deadline(&self) -> Option<Instant> {
        let blink = self.highlight.as_ref().map(|h| h.next_toggle);
        match (self.ai_due, blink) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => {
                self.new_game();
                self.message = Some("New game started!".to_string());
            }
            _ if self.highlight.is_some() => {}
            KeyCode::Left => {
                self.message = None;
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                self.message = None;
                if self.selected_column + 1 < self.session.board().cols() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(Instant::now());
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                if column < self.session.board().cols() {
                    self.selected_column = column;
                    self.drop_piece(Instant::now());
                }
            }
            KeyCode::Char('u') => {
                self.undo();
            }
            _ => {}
        }
    }

    /// Advance timed presentation steps: the delayed computer reply and the
    /// win highlight.
    pub fn tick(&mut self, now: Instant) {
        if let Some(highlight) = &mut self.highlight {
            if now >= highlight.next_toggle {
                highlight.step += 1;
                highlight.next_toggle = now + Duration::from_millis(self.timing.blink_interval_ms);
                if highlight.step >= self.timing.blink_count {
                    let winner = highlight.winner;
                    self.finish_game(Some(winner));
                }
            }
            return;
        }

        if let Some(due) = self.ai_due {
            if now >= due {
                self.ai_due = None;
                self.computer_move(now);
            }
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self, now: Instant) {
        self.message = None;
        if self.session.ai_to_move() {
            self.message = Some("Wait for the computer to move.".to_string());
            return;
        }

        match self.session.play(self.selected_column) {
            Ok(_) => self.after_move(now),
            Err(MoveError::ColumnFull { .. }) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn { .. }) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over! Press 'r' to restart.".to_string());
            }
            Err(MoveError::NotYourTurn) => {
                self.message = Some("Wait for the computer to move.".to_string());
            }
        }
    }

    fn computer_move(&mut self, now: Instant) {
        if !self.session.ai_to_move() {
            return;
        }
        match self.session.play_ai(self.agent.as_mut()) {
            Ok(record) => {
                log::debug!("{} plays column {}", self.agent.name(), record.col);
                self.after_move(now);
            }
            Err(err) => {
                log::error!("computer move failed: {err}");
                self.message = Some(format!("Computer could not move: {err}"));
            }
        }
    }

    fn after_move(&mut self, now: Instant) {
        match self.session.result() {
            GameResult::Win { player, cells } => {
                if self.timing.blink_count == 0 {
                    self.finish_game(Some(*player));
                } else {
                    self.highlight = Some(Highlight {
                        winner: *player,
                        cells: cells.clone(),
                        step: 0,
                        next_toggle: now,
                    });
                    self.message = Some(format!("{} wins!", player.name()));
                }
            }
            GameResult::Draw => self.finish_game(None),
            GameResult::InProgress => {
                if self.session.ai_to_move() {
                    self.ai_due = Some(now + Duration::from_millis(self.timing.ai_delay_ms));
                }
            }
        }
    }

    fn finish_game(&mut self, winner: Option<Player>) {
        let verdict = match winner {
            Some(player) => format!("{player} wins!"),
            None => "It's a draw!".to_string(),
        };
        self.new_game();
        self.message = Some(format!("{verdict} New game started."));
    }

    fn new_game(&mut self) {
        self.session.reset();
        self.selected_column = self.session.board().cols() / 2;
        self.ai_due = None;
        self.highlight = None;
    }

    fn undo(&mut self) {
        self.ai_due = None;
        self.message = Some(match self.session.undo() {
            0 => "Nothing to undo.".to_string(),
            1 => "Undid 1 move.".to_string(),
            n => format!("Undid {n} moves."),
        });
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let highlight = self
            .highlight
            .as_ref()
            .filter(|h| h.step % 2 == 1)
            .map(|h| h.cells.as_slice());

        let mode = match self.session.mode() {
            GameMode::Single => format!("{} vs {}", GameMode::Single.label(), self.difficulty.label()),
            GameMode::Two => GameMode::Two.label().to_string(),
        };

        game_view::render(
            frame,
            &GameView {
                session: &self.session,
                selected_column: self.selected_column,
                message: self.message.as_deref(),
                mode: &mode,
                highlight,
                thinking: self.ai_due.is_some(),
            },
        );
    }
}
