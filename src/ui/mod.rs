//! Terminal UI: an interactive game screen with a column selector, a delayed
//! computer reply, and a blinking highlight of the winning line.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
