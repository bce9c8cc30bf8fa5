use crate::game::{Board, Cell, Player, DIRECTIONS};

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, board: &Board, player: Player) -> f64;
}

/// Scoring weights for [`ConnectHeuristic`].
///
/// Own patterns weigh slightly more than the opponent's so the searching
/// side prefers building its own lines over pure defence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    /// Per own piece in the middle column.
    pub center: f64,
    pub own_two: f64,
    pub own_three: f64,
    pub opp_two: f64,
    pub opp_three: f64,
}

impl Weights {
    pub const fn standard() -> Self {
        Weights {
            center: 3.0,
            own_two: 5.0,
            own_three: 50.0,
            opp_two: 4.0,
            opp_three: 40.0,
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::standard()
    }
}

/// Unblocked two- and three-piece windows for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenRuns {
    pub twos: usize,
    pub threes: usize,
}

/// Count the open 2- and 3-in-a-rows of `player`.
///
/// For every cell holding one of `player`'s pieces and every direction
/// (right, down, down-right, down-left), look at the `connect_target` cells
/// starting there. A window that leaves the board or holds an opponent piece
/// is blocked. Otherwise it counts as an open k-in-a-row when it holds
/// exactly k own pieces and `connect_target - k` empty cells.
///
/// The same line is counted once per anchoring piece, so well-supported
/// lines weigh more.
pub fn count_open_runs(board: &Board, player: Player) -> OpenRuns {
    let own = player.to_cell();
    let target = board.connect_target();
    let mut runs = OpenRuns::default();

    for row in 0..board.rows() {
        for col in 0..board.cols() {
            if board.get(row, col) != own {
                continue;
            }
            for dir in DIRECTIONS {
                let Some(window) = board.window(row, col, dir) else {
                    continue;
                };

                let mut pieces = 0;
                let mut empty = 0;
                let mut blocked = false;
                for (r, c) in window {
                    match board.get(r, c) {
                        Cell::Empty => empty += 1,
                        cell if cell == own => pieces += 1,
                        _ => {
                            blocked = true;
                            break;
                        }
                    }
                }
                if blocked {
                    continue;
                }

                if pieces == 2 && empty == target - 2 {
                    runs.twos += 1;
                }
                if pieces == 3 && empty == target - 3 {
                    runs.threes += 1;
                }
            }
        }
    }

    runs
}

/// Number of `player`'s pieces in column `cols / 2`.
pub fn center_count(board: &Board, player: Player) -> usize {
    let center = board.cols() / 2;
    let own = player.to_cell();
    (0..board.rows())
        .filter(|&row| board.get(row, center) == own)
        .count()
}

/// Center-column bonus plus weighted open-run counts for both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConnectHeuristic {
    weights: Weights,
}

impl ConnectHeuristic {
    pub const fn new() -> Self {
        ConnectHeuristic {
            weights: Weights::standard(),
        }
    }

    pub fn with_weights(weights: Weights) -> Self {
        ConnectHeuristic { weights }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }
}

impl Heuristic for ConnectHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> f64 {
        let w = &self.weights;
        let own = count_open_runs(board, player);
        let opp = count_open_runs(board, player.other());

        w.center * center_count(board, player) as f64
            + w.own_two * own.twos as f64
            + w.own_three * own.threes as f64
            - w.opp_two * opp.twos as f64
            - w.opp_three * opp.threes as f64
    }
}
