use std::fmt;

use crate::error::MoveError;

use super::player::Player;
use super::state::GameResult;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;
pub const DEFAULT_CONNECT: usize = 4;

pub const MIN_ROWS: usize = 4;
pub const MIN_COLS: usize = 4;
pub const MIN_CONNECT: usize = 3;

/// A `(row, col)` board coordinate. Row 0 is the top row.
pub type Coord = (usize, usize);

/// A step between neighbouring cells as `(d_row, d_col)`.
pub(crate) type Direction = (isize, isize);

/// Line directions in canonical scan order: horizontal, vertical,
/// diagonal down-right, diagonal down-left.
pub(crate) const DIRECTIONS: [Direction; 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// The player owning this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }
}

/// A `rows x cols` connect-N grid with gravity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    connect_target: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board.
    ///
    /// Dimensions below the minimums are replaced by the defaults
    /// (6 rows, 7 columns, connect 4) instead of failing.
    pub fn new(rows: usize, cols: usize, connect_target: usize) -> Self {
        let sanitized = sanitize_dimensions(rows, cols, connect_target);
        if sanitized != (rows, cols, connect_target) {
            log::warn!(
                "invalid board {rows}x{cols} connect {connect_target}, using {}x{} connect {}",
                sanitized.0,
                sanitized.1,
                sanitized.2
            );
        }
        let (rows, cols, connect_target) = sanitized;

        Board {
            rows,
            cols,
            connect_target,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// `R`/`r` is Red, `Y`/`y` is Yellow, anything else is empty. Pieces are
    /// dropped bottom-up per column, so they settle under gravity.
    pub fn from_rows(rows: &[&str], connect_target: usize) -> Result<Self, MoveError> {
        let cols = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut board = Board::new(rows.len(), cols, connect_target);

        for line in rows.iter().rev() {
            for (col, ch) in line.chars().enumerate() {
                let player = match ch {
                    'R' | 'r' => Player::Red,
                    'Y' | 'y' => Player::Yellow,
                    _ => continue,
                };
                board.drop_piece(col, player)?;
            }
        }

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn connect_target(&self) -> usize {
        self.connect_target
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Columns that can still take a piece, in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Drop a piece in a column, returns the row where it landed.
    ///
    /// On error the board is left untouched.
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn {
                column: col,
                cols: self.cols,
            });
        }

        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull { column: col });
        }

        // Find the lowest empty row in this column
        let row = (0..self.rows)
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
            .ok_or(MoveError::ColumnFull { column: col })?;
        self.set(row, col, player.to_cell());
        Ok(row)
    }

    /// Clear a cell previously filled by [`Board::drop_piece`].
    pub fn undo_last(&mut self, col: usize, row: usize) {
        debug_assert!(row < self.rows && col < self.cols);
        self.set(row, col, Cell::Empty);
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Find the first run of `connect_target` pieces belonging to `player`.
    ///
    /// Directions are tried horizontal, vertical, down-right, down-left;
    /// within a direction anchors are scanned row-major. The returned cells
    /// start at the anchor.
    pub fn check_win(&self, player: Player) -> Option<Vec<Coord>> {
        let cell = player.to_cell();

        for dir in DIRECTIONS {
            for row in 0..self.rows {
                for col in 0..self.cols {
                    if self.get(row, col) != cell {
                        continue;
                    }
                    let Some(mut window) = self.window(row, col, dir) else {
                        continue;
                    };
                    if window.all(|(r, c)| self.get(r, c) == cell) {
                        return self.window(row, col, dir).map(|w| w.collect());
                    }
                }
            }
        }

        None
    }

    /// Whether `player` has a winning run anywhere.
    pub fn has_win(&self, player: Player) -> bool {
        self.check_win(player).is_some()
    }

    /// Classify the position: Red win, then Yellow win, then draw.
    pub fn result(&self) -> GameResult {
        for player in Player::BOTH {
            if let Some(cells) = self.check_win(player) {
                return GameResult::Win { player, cells };
            }
        }
        if self.is_full() {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }

    /// Deep copy used as a scratch board by the search.
    pub fn clone_for_search(&self) -> Board {
        self.clone()
    }

    /// The `connect_target` cells starting at `(row, col)` and stepping by
    /// `dir`, or `None` if the window leaves the board.
    pub(crate) fn window(
        &self,
        row: usize,
        col: usize,
        (dr, dc): Direction,
    ) -> Option<impl Iterator<Item = Coord>> {
        let span = self.connect_target as isize - 1;
        let last_row = row as isize + dr * span;
        let last_col = col as isize + dc * span;
        if last_row < 0
            || last_row >= self.rows as isize
            || last_col < 0
            || last_col >= self.cols as isize
        {
            return None;
        }

        Some((0..=span).map(move |k| {
            (
                (row as isize + dr * k) as usize,
                (col as isize + dc * k) as usize,
            )
        }))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(DEFAULT_ROWS, DEFAULT_COLS, DEFAULT_CONNECT)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .map(|col| match self.get(row, col) {
                    Cell::Empty => '.',
                    Cell::Red => 'R',
                    Cell::Yellow => 'Y',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Replace any dimension below its minimum with the default.
///
/// Returns `(rows, cols, connect_target)`.
pub fn sanitize_dimensions(
    rows: usize,
    cols: usize,
    connect_target: usize,
) -> (usize, usize, usize) {
    let or_default = |value: usize, min: usize, default: usize| {
        if value < min {
            default
        } else {
            value
        }
    };
    (
        or_default(rows, MIN_ROWS, DEFAULT_ROWS),
        or_default(cols, MIN_COLS, DEFAULT_COLS),
        or_default(connect_target, MIN_CONNECT, DEFAULT_CONNECT),
    )
}
