use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SearchError;
use crate::game::{Board, Player};

use super::agent::Agent;

/// Uniformly random legal column.
pub fn random_column<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<usize, SearchError> {
    let columns = board.legal_columns();
    if columns.is_empty() {
        return Err(SearchError::NoLegalMoves);
    }
    Ok(columns[rng.random_range(0..columns.len())])
}

/// An agent that selects uniformly at random from legal actions.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, board: &Board, _player: Player) -> Result<usize, SearchError> {
        random_column(board, &mut self.rng)
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_agent_selects_legal_action() {
        let mut agent = RandomAgent::new();
        let mut board = Board::default();
        for _ in 0..board.rows() {
            board.drop_piece(2, Player::Red).unwrap();
        }
        let legal = board.legal_columns();

        for _ in 0..100 {
            let action = agent.select_action(&board, Player::Yellow).unwrap();
            assert!(legal.contains(&action), "Action {} is not legal", action);
        }
    }

    #[test]
    fn test_seeded_agents_agree() {
        let board = Board::default();
        let mut a = RandomAgent::with_seed(9);
        let mut b = RandomAgent::with_seed(9);
        for _ in 0..20 {
            assert_eq!(
                a.select_action(&board, Player::Red),
                b.select_action(&board, Player::Red)
            );
        }
    }

    #[test]
    fn test_full_board_is_an_error() {
        let mut board = Board::new(4, 4, 3);
        for col in 0..4 {
            for _ in 0..4 {
                board.drop_piece(col, Player::Red).unwrap();
            }
        }
        let mut agent = RandomAgent::with_seed(1);
        assert_eq!(
            agent.select_action(&board, Player::Yellow),
            Err(SearchError::NoLegalMoves)
        );
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
