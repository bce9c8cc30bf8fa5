use crate::error::SearchError;
use crate::game::{Board, Player};

use super::minimax::MinimaxAgent;
use super::random::RandomAgent;

/// Universal interface for computer players.
pub trait Agent {
    /// Select a column for `player` to drop into. The board is not modified.
    fn select_action(&mut self, board: &Board, player: Player) -> Result<usize, SearchError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Computer strength. Each level maps to an agent.
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
pub enum Difficulty {
    /// Random legal column, no search.
    Easy,
    /// Two-ply minimax.
    Medium,
    /// Four-ply minimax.
    Hard,
}

impl Difficulty {
    /// Map a 1-3 level to a difficulty. Anything else is easy.
    pub fn from_level(level: u8) -> Self {
        match level {
            2 => Difficulty::Medium,
            3 => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Search depth in plies, `None` for random play.
    pub fn search_depth(self) -> Option<u32> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(2),
            Difficulty::Hard => Some(4),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Build the agent for this level, seeded when `seed` is given.
    pub fn agent(self, seed: Option<u64>) -> Box<dyn Agent> {
        match (self.search_depth(), seed) {
            (None, Some(seed)) => Box::new(RandomAgent::with_seed(seed)),
            (None, None) => Box::new(RandomAgent::new()),
            (Some(depth), Some(seed)) => Box::new(MinimaxAgent::with_seed(depth, seed)),
            (Some(depth), None) => Box::new(MinimaxAgent::new(depth)),
        }
    }
}
