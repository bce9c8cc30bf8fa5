//! Core connect-N game logic: the gravity board, players, and the game
//! session that owns the board and the committed move history.

mod board;
mod player;
mod state;

pub use board::{
    sanitize_dimensions, Board, Cell, Coord, DEFAULT_COLS, DEFAULT_CONNECT, DEFAULT_ROWS,
    MIN_COLS, MIN_CONNECT, MIN_ROWS,
};
pub(crate) use board::DIRECTIONS;
pub use player::Player;
pub use state::{GameMode, GameResult, GameSession, MoveRecord, SessionError};
