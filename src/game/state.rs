use crate::ai::Agent;
use crate::config::BoardConfig;
use crate::error::{MoveError, SearchError};

use super::board::{Board, Coord};
use super::player::Player;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Win { player: Player, cells: Vec<Coord> },
    Draw,
}

impl GameResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Win { player, .. } => Some(*player),
            _ => None,
        }
    }
}

/// Who controls the second seat.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Human plays Red against the computer as Yellow.
    Single,
    /// Two humans share the keyboard.
    Two,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Single => "Single player",
            GameMode::Two => "Two players",
        }
    }
}

/// A committed move in the game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub row: usize,
    pub col: usize,
    pub player: Player,
}

/// The single owner of a game in progress: board, side to move and history.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current_player: Player,
    mode: GameMode,
    history: Vec<MoveRecord>,
    result: GameResult,
}

impl GameSession {
    /// Start a new game. Red moves first.
    pub fn new(config: &BoardConfig, mode: GameMode) -> Self {
        GameSession {
            board: config.build(),
            current_player: Player::Red,
            mode,
            history: Vec::new(),
            result: GameResult::InProgress,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn result(&self) -> &GameResult {
        &self.result
    }

    /// Committed moves, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.result.is_terminal()
    }

    /// Get list of legal columns (not full). Empty once the game is over.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    /// Whether the computer should move next.
    pub fn ai_to_move(&self) -> bool {
        self.mode == GameMode::Single
            && !self.is_terminal()
            && self.current_player == Player::Yellow
    }

    /// Play a human move for the side to move.
    pub fn play(&mut self, column: usize) -> Result<MoveRecord, MoveError> {
        if self.ai_to_move() {
            return Err(MoveError::NotYourTurn);
        }
        self.apply(column)
    }

    /// Let `agent` pick and play a move for the side to move.
    pub fn play_ai(&mut self, agent: &mut dyn Agent) -> Result<MoveRecord, SessionError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver.into());
        }
        let column = agent.select_action(&self.board, self.current_player)?;
        Ok(self.apply(column)?)
    }

    fn apply(&mut self, column: usize) -> Result<MoveRecord, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let player = self.current_player;
        let row = self.board.drop_piece(column, player)?;
        let record = MoveRecord {
            row,
            col: column,
            player,
        };
        self.history.push(record);

        // Only the mover can have completed a run.
        self.result = if let Some(cells) = self.board.check_win(player) {
            GameResult::Win { player, cells }
        } else if self.board.is_full() {
            GameResult::Draw
        } else {
            GameResult::InProgress
        };

        self.current_player = player.other();
        Ok(record)
    }

    /// Take back moves. Returns the number of plies undone.
    ///
    /// Two-player games undo one ply. Single-player games undo the computer's
    /// reply together with the human move before it, so the human is to move
    /// again; a trailing human move (no reply yet) is undone alone.
    pub fn undo(&mut self) -> usize {
        let plies = match (self.mode, self.history.last()) {
            (_, None) => 0,
            (GameMode::Two, Some(_)) => 1,
            (GameMode::Single, Some(last)) if last.player == Player::Yellow => {
                self.history.len().min(2)
            }
            (GameMode::Single, Some(_)) => 1,
        };

        for _ in 0..plies {
            if let Some(record) = self.history.pop() {
                self.board.undo_last(record.col, record.row);
                self.current_player = record.player;
            }
        }

        if plies > 0 {
            self.result = GameResult::InProgress;
        }
        plies
    }

    /// Clear the board and history. Red moves first.
    pub fn reset(&mut self) {
        self.board = Board::new(
            self.board.rows(),
            self.board.cols(),
            self.board.connect_target(),
        );
        self.history.clear();
        self.current_player = Player::Red;
        self.result = GameResult::InProgress;
    }
}

/// Errors from letting an agent move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Search(#[from] SearchError),
}
