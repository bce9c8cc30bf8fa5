use crate::game::{Board, Cell, Coord};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const CELL_WIDTH: usize = 3;

fn cell_span(cell: Cell, highlighted: bool) -> Span<'static> {
    let (symbol, color) = match cell {
        Cell::Empty => (" . ", Color::DarkGray),
        Cell::Red => (" \u{25cf} ", Color::Red),
        Cell::Yellow => (" \u{25cf} ", Color::Yellow),
    };
    if highlighted {
        Span::styled(
            symbol,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(symbol, Style::default().fg(color))
    }
}

/// Lines for a bordered board of any size: column numbers, the grid, and a
/// marker under `selected`. Cells listed in `highlight` are drawn in green.
pub fn board_lines(
    board: &Board,
    selected: Option<usize>,
    highlight: Option<&[Coord]>,
) -> Vec<Line<'static>> {
    let cols = board.cols();
    let inner = "\u{2550}".repeat(cols * CELL_WIDTH + 1);
    let selected_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let mut lines = Vec::with_capacity(board.rows() + 4);

    let mut header = vec![Span::raw("   ")];
    for col in 0..cols {
        // Wide boards need two digits per column.
        let label = format!("{:^width$}", col + 1, width = CELL_WIDTH);
        if Some(col) == selected {
            header.push(Span::styled(label, selected_style));
        } else {
            header.push(Span::raw(label));
        }
    }
    header.push(Span::raw("  "));
    lines.push(Line::from(header));

    lines.push(Line::from(format!("  \u{2554}{inner}\u{2557}")));
    for row in 0..board.rows() {
        let mut spans = vec![Span::raw("  \u{2551}")];
        for col in 0..cols {
            let lit = highlight.is_some_and(|cells| cells.contains(&(row, col)));
            spans.push(cell_span(board.get(row, col), lit));
        }
        spans.push(Span::raw(" \u{2551}"));
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(format!("  \u{255a}{inner}\u{255d}")));

    let mut marker = vec![Span::raw("   ")];
    for col in 0..cols {
        if Some(col) == selected {
            marker.push(Span::styled(" \u{25b2} ", Style::default().fg(Color::Cyan)));
        } else {
            marker.push(Span::raw("   "));
        }
    }
    marker.push(Span::raw("  "));
    lines.push(Line::from(marker));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    #[test]
    fn test_lines_match_board_size() {
        let board = Board::new(5, 9, 4);
        let lines = board_lines(&board, Some(0), None);
        assert_eq!(lines.len(), 5 + 4);
        let widths: Vec<usize> = lines.iter().map(Line::width).collect();
        assert!(widths.iter().all(|&w| w == widths[1]), "{widths:?}");
    }

    #[test]
    fn test_highlight_colours_winning_cells() {
        let mut board = Board::new(4, 4, 3);
        for _ in 0..3 {
            board.drop_piece(0, Player::Red).unwrap();
        }
        let cells = board.check_win(Player::Red).unwrap();
        let lines = board_lines(&board, None, Some(&cells));

        // Grid row 3 is the bottom row; span 0 is the left border.
        let bottom = &lines[2 + 3];
        assert_eq!(bottom.spans[1].style.fg, Some(Color::Green));
        assert_eq!(bottom.spans[2].style.fg, Some(Color::DarkGray));
    }
}
