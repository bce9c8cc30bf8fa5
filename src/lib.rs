//! # Connect-N
//!
//! A configurable connect-N game on a gravity board, with a minimax
//! alpha-beta computer opponent and a terminal UI built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, game session
//! - [`ai`]: Agent trait, minimax search, heuristic evaluator, random agent
//! - [`arena`]: Headless agent-vs-agent games and match statistics
//! - [`ui`]: Terminal UI: game view and input handling
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
