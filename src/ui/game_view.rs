use crate::game::{Coord, GameResult, GameSession, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::board_lines;

/// Everything the game screen needs for one frame.
pub struct GameView<'a> {
    pub session: &'a GameSession,
    pub selected_column: usize,
    pub message: Option<&'a str>,
    pub mode: &'a str,
    /// Winning cells to draw highlighted this frame.
    pub highlight: Option<&'a [Coord]>,
    pub thinking: bool,
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

pub fn render(frame: &mut Frame, view: &GameView) {
    let board_height = view.session.board().rows() as u16 + 4;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),         // Header
            Constraint::Min(board_height), // Board
            Constraint::Length(3),         // Message
            Constraint::Length(4),         // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    render_board(frame, view, chunks[1]);
    render_message(frame, view.message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, view: &GameView, area: Rect) {
    let session = view.session;
    let board = session.board();
    let title = format!(
        "Connect {} ({}x{})",
        board.connect_target(),
        board.rows(),
        board.cols()
    );

    let (status, color) = match session.result() {
        GameResult::Win { player, .. } => (
            format!("{} wins!  |  {}", player.name(), view.mode),
            player_color(*player),
        ),
        GameResult::Draw => (format!("Draw  |  {}", view.mode), Color::White),
        GameResult::InProgress => {
            let player = session.current_player();
            let turn = if view.thinking {
                "Computer is thinking...".to_string()
            } else {
                format!("Current Player: {}", player.name())
            };
            (format!("{turn}  |  {}", view.mode), player_color(player))
        }
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, view: &GameView, area: Rect) {
    let lines = board_lines(
        view.session.board(),
        Some(view.selected_column),
        view.highlight,
    );
    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("\u{2190}/\u{2192}: Move  |  Enter/Space: Drop  |  1-9: Drop in column");
    let line2 = Line::from("U: Undo  |  R: Restart  |  Q/Esc: Quit");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
