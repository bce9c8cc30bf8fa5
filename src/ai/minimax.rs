use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SearchError;
use crate::game::{Board, Player};

use super::agent::Agent;
use super::heuristic::{ConnectHeuristic, Heuristic};
use super::random::random_column;

static STANDARD_HEURISTIC: ConnectHeuristic = ConnectHeuristic::new();

/// Outcome of a search from the root position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Best column, `None` when the root itself is a leaf.
    pub column: Option<usize>,
    /// `+inf` for a forced AI win, `-inf` for a forced loss.
    pub score: f64,
    /// Positions visited, the root included.
    pub nodes: u64,
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// The AI maximizes and the opponent minimizes. The search plays moves on the
/// board it is given and takes every one of them back before returning.
pub struct Minimax<'h> {
    ai: Player,
    opponent: Player,
    heuristic: &'h dyn Heuristic,
    pruning: bool,
    nodes: u64,
}

impl Minimax<'static> {
    pub fn new(ai: Player, opponent: Player) -> Self {
        Minimax::with_heuristic(ai, opponent, &STANDARD_HEURISTIC)
    }
}

impl<'h> Minimax<'h> {
    pub fn with_heuristic(ai: Player, opponent: Player, heuristic: &'h dyn Heuristic) -> Self {
        Minimax {
            ai,
            opponent,
            heuristic,
            pruning: true,
            nodes: 0,
        }
    }

    /// Visit every node. Scores match the pruned search.
    pub fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }

    pub fn search<R: Rng + ?Sized>(
        &mut self,
        board: &mut Board,
        depth: u32,
        rng: &mut R,
    ) -> SearchResult {
        self.nodes = 0;
        let (column, score) = self.minimax(
            board,
            depth,
            true,
            f64::NEG_INFINITY,
            f64::INFINITY,
            rng,
        );
        log::debug!(
            "{} search depth {depth}: column {column:?}, score {score}, {} nodes",
            self.ai.name(),
            self.nodes
        );
        SearchResult {
            column,
            score,
            nodes: self.nodes,
        }
    }

    fn minimax<R: Rng + ?Sized>(
        &mut self,
        board: &mut Board,
        depth: u32,
        maximizing: bool,
        mut alpha: f64,
        mut beta: f64,
        rng: &mut R,
    ) -> (Option<usize>, f64) {
        self.nodes += 1;

        // Leaf priority: AI win, opponent win, draw, then the heuristic.
        if board.has_win(self.ai) {
            return (None, f64::INFINITY);
        }
        if board.has_win(self.opponent) {
            return (None, f64::NEG_INFINITY);
        }
        if board.is_full() {
            return (None, 0.0);
        }
        if depth == 0 {
            return (None, self.heuristic.evaluate(board, self.ai));
        }

        let candidates = board.legal_columns();
        let mut best_column = candidates[rng.random_range(0..candidates.len())];
        let (piece, mut best_score) = if maximizing {
            (self.ai, f64::NEG_INFINITY)
        } else {
            (self.opponent, f64::INFINITY)
        };

        for col in candidates {
            let Ok(row) = board.drop_piece(col, piece) else {
                continue;
            };
            let (_, score) = self.minimax(board, depth - 1, !maximizing, alpha, beta, rng);
            board.undo_last(col, row);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_column = col;
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_column = col;
                }
                beta = beta.min(best_score);
            }

            if self.pruning && alpha >= beta {
                break;
            }
        }

        (Some(best_column), best_score)
    }
}

/// Pick a column for `ai` by searching `depth` plies on `board`.
///
/// The board is borrowed for the duration of the search and is unchanged
/// afterwards. Tie-breaks draw from `rng`; pass a seeded generator for a
/// reproducible choice.
pub fn choose_move<R: Rng + ?Sized>(
    board: &mut Board,
    depth: u32,
    ai: Player,
    opponent: Player,
    rng: &mut R,
) -> Result<usize, SearchError> {
    if board.legal_columns().is_empty() {
        return Err(SearchError::NoLegalMoves);
    }
    let result = Minimax::new(ai, opponent).search(board, depth, rng);
    match result.column {
        Some(column) => Ok(column),
        None => random_column(board, rng),
    }
}

/// Minimax agent searching a fixed number of plies.
pub struct MinimaxAgent {
    depth: u32,
    heuristic: Box<dyn Heuristic>,
    rng: StdRng,
    name: String,
}

impl MinimaxAgent {
    pub fn new(depth: u32) -> Self {
        Self::build(depth, Box::new(ConnectHeuristic::new()), StdRng::from_os_rng())
    }

    pub fn with_seed(depth: u32, seed: u64) -> Self {
        Self::build(
            depth,
            Box::new(ConnectHeuristic::new()),
            StdRng::seed_from_u64(seed),
        )
    }

    pub fn with_heuristic(depth: u32, heuristic: Box<dyn Heuristic>) -> Self {
        Self::build(depth, heuristic, StdRng::from_os_rng())
    }

    fn build(depth: u32, heuristic: Box<dyn Heuristic>, rng: StdRng) -> Self {
        MinimaxAgent {
            depth,
            heuristic,
            rng,
            name: format!("Minimax (depth {depth})"),
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, board: &Board, player: Player) -> Result<usize, SearchError> {
        let mut scratch = board.clone_for_search();
        if scratch.legal_columns().is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let result = Minimax::with_heuristic(player, player.other(), self.heuristic.as_ref())
            .search(&mut scratch, self.depth, &mut self.rng);
        match result.column {
            Some(column) => Ok(column),
            None => random_column(&scratch, &mut self.rng),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
