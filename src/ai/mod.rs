//! Computer opponents: the alpha-beta minimax search, its heuristic
//! evaluator, and the agents each difficulty level plays with.

mod agent;
pub mod heuristic;
pub mod minimax;
mod random;

pub use agent::{Agent, Difficulty};
pub use heuristic::{ConnectHeuristic, Heuristic, OpenRuns, Weights};
pub use minimax::{choose_move, Minimax, MinimaxAgent, SearchResult};
pub use random::{random_column, RandomAgent};
