//! Headless games between two agents, and win/draw bookkeeping over a series
//! of them.

use crate::ai::Agent;
use crate::config::BoardConfig;
use crate::game::{GameMode, GameResult, GameSession, Player, SessionError};

/// Result of a single finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub winner: Option<Player>,
    pub length: usize,
}

/// Play one game to the end. `red` moves first.
pub fn play_game(
    red: &mut dyn Agent,
    yellow: &mut dyn Agent,
    board: &BoardConfig,
) -> Result<GameRecord, SessionError> {
    let mut session = GameSession::new(board, GameMode::Two);

    while !session.is_terminal() {
        let agent: &mut dyn Agent = match session.current_player() {
            Player::Red => &mut *red,
            Player::Yellow => &mut *yellow,
        };
        let record = session.play_ai(agent)?;
        log::trace!(
            "{} ({}) plays column {}",
            record.player.name(),
            agent.name(),
            record.col
        );
    }

    log::debug!("final position:\n{}", session.board());

    let winner = match session.result() {
        GameResult::Win { player, .. } => Some(*player),
        _ => None,
    };
    Ok(GameRecord {
        winner,
        length: session.history().len(),
    })
}

/// Running tally over a series of games.
#[derive(Debug, Clone, Default)]
pub struct MatchStats {
    red_wins: usize,
    yellow_wins: usize,
    draws: usize,
    total_moves: usize,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, game: &GameRecord) {
        match game.winner {
            Some(Player::Red) => self.red_wins += 1,
            Some(Player::Yellow) => self.yellow_wins += 1,
            None => self.draws += 1,
        }
        self.total_moves += game.length;
    }

    pub fn total_games(&self) -> usize {
        self.red_wins + self.yellow_wins + self.draws
    }

    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::Red => self.red_wins,
            Player::Yellow => self.yellow_wins,
        }
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn win_rate(&self, player: Player) -> f32 {
        self.rate(self.wins(player))
    }

    pub fn draw_rate(&self) -> f32 {
        self.rate(self.draws)
    }

    pub fn average_game_length(&self) -> f32 {
        self.rate(self.total_moves)
    }

    fn rate(&self, count: usize) -> f32 {
        let n = self.total_games();
        if n == 0 {
            return 0.0;
        }
        count as f32 / n as f32
    }
}
