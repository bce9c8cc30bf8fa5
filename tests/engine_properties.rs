//! Property tests for the board, the search, and the evaluator.
//!
//! Invariants covered:
//! - Undoing drops in reverse order restores the board exactly.
//! - `check_win` reports a line iff one exists, and the line is genuine.
//! - Search always proposes a legal column and leaves the board untouched.
//! - Pruning never changes the root score.
//! - The evaluator is the weighted sum of its feature counts.
use connect_n::ai::heuristic::{center_count, count_open_runs};
use connect_n::ai::{choose_move, ConnectHeuristic, Heuristic, Minimax, Weights};
use connect_n::config::BoardConfig;
use connect_n::error::{MoveError, SearchError};
use connect_n::game::{Board, Cell, Coord, GameMode, GameResult, GameSession, Player};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Fill a board by dropping into `moves` in turn, skipping full columns.
fn fill(board: &mut Board, moves: &[usize]) -> Vec<(usize, usize)> {
    let mut placed = Vec::new();
    let mut player = Player::Red;
    for &m in moves {
        let col = m % board.cols();
        if let Ok(row) = board.drop_piece(col, player) {
            placed.push((row, col));
            player = player.other();
        }
    }
    placed
}

/// Play `moves` as a real game, stopping at the first win or a full board.
fn play_out(board: &mut Board, moves: &[usize]) -> Player {
    let mut player = Player::Red;
    for &m in moves {
        if board.result().is_terminal() {
            break;
        }
        let col = m % board.cols();
        if board.drop_piece(col, player).is_ok() {
            player = player.other();
        }
    }
    player
}

fn brute_force_line(board: &Board, player: Player) -> bool {
    let n = board.connect_target() as isize;
    let (rows, cols) = (board.rows() as isize, board.cols() as isize);
    let target = player.to_cell();
    for r in 0..rows {
        for c in 0..cols {
            for (dr, dc) in [(0, 1), (1, 0), (1, 1), (1, -1)] {
                let all = (0..n).all(|i| {
                    let (rr, cc) = (r + dr * i, c + dc * i);
                    rr >= 0
                        && rr < rows
                        && cc >= 0
                        && cc < cols
                        && board.get(rr as usize, cc as usize) == target
                });
                if all {
                    return true;
                }
            }
        }
    }
    false
}

fn is_straight_line(cells: &[Coord]) -> bool {
    let step = |a: Coord, b: Coord| (b.0 as isize - a.0 as isize, b.1 as isize - a.1 as isize);
    let first = step(cells[0], cells[1]);
    first.0.abs() <= 1
        && first.1.abs() <= 1
        && first != (0, 0)
        && cells.windows(2).all(|w| step(w[0], w[1]) == first)
}

fn dims() -> impl Strategy<Value = (usize, usize, usize)> {
    (4usize..=7, 4usize..=8, 3usize..=4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn undo_in_reverse_restores_board(
        (rows, cols, n) in dims(),
        moves in prop::collection::vec(0usize..8, 0..60),
    ) {
        let mut board = Board::new(rows, cols, n);
        let empty = board.clone();
        let placed = fill(&mut board, &moves);
        prop_assert_eq!(board.piece_count(), placed.len());

        for &(row, col) in placed.iter().rev() {
            board.undo_last(col, row);
        }
        prop_assert_eq!(board, empty);
    }

    #[test]
    fn check_win_agrees_with_brute_force(
        (rows, cols, n) in dims(),
        moves in prop::collection::vec(0usize..8, 0..60),
    ) {
        let mut board = Board::new(rows, cols, n);
        fill(&mut board, &moves);

        for player in Player::BOTH {
            let found = board.check_win(player);
            prop_assert_eq!(found.is_some(), brute_force_line(&board, player));
            if let Some(cells) = found {
                prop_assert_eq!(cells.len(), n);
                prop_assert!(is_straight_line(&cells), "{:?}", cells);
                for (r, c) in cells {
                    prop_assert_eq!(board.get(r, c), player.to_cell());
                }
            }
        }
    }

    #[test]
    fn search_picks_legal_column_and_restores_board(
        (rows, cols, n) in dims(),
        moves in prop::collection::vec(0usize..8, 0..30),
        depth in 1u32..=3,
        seed in any::<u64>(),
    ) {
        let mut board = Board::new(rows, cols, n);
        let to_move = play_out(&mut board, &moves);
        let before = board.clone();
        let mut rng = StdRng::seed_from_u64(seed);

        let result = Minimax::new(to_move, to_move.other()).search(&mut board, depth, &mut rng);
        prop_assert_eq!(&board, &before);
        if let Some(col) = result.column {
            prop_assert!(!board.is_column_full(col));
        }

        match choose_move(&mut board, depth, to_move, to_move.other(), &mut rng) {
            Ok(col) => prop_assert!(board.legal_columns().contains(&col)),
            Err(SearchError::NoLegalMoves) => prop_assert!(board.is_full()),
        }
        prop_assert_eq!(&board, &before);
    }

    #[test]
    fn pruning_preserves_root_score(
        moves in prop::collection::vec(0usize..7, 0..16),
        depth in 1u32..=3,
        seed in any::<u64>(),
    ) {
        let mut board = Board::default();
        let to_move = play_out(&mut board, &moves);

        let pruned = Minimax::new(to_move, to_move.other())
            .search(&mut board, depth, &mut StdRng::seed_from_u64(seed));
        let full = Minimax::new(to_move, to_move.other())
            .without_pruning()
            .search(&mut board, depth, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(pruned.score, full.score);
        prop_assert!(pruned.nodes <= full.nodes);
    }

    #[test]
    fn evaluation_is_weighted_feature_sum(
        moves in prop::collection::vec(0usize..7, 0..30),
    ) {
        let mut board = Board::default();
        fill(&mut board, &moves);
        let w = Weights::standard();
        let heuristic = ConnectHeuristic::new();

        for player in Player::BOTH {
            let own = count_open_runs(&board, player);
            let opp = count_open_runs(&board, player.other());
            let expected = w.center * center_count(&board, player) as f64
                + w.own_two * own.twos as f64
                + w.own_three * own.threes as f64
                - w.opp_two * opp.twos as f64
                - w.opp_three * opp.threes as f64;
            prop_assert_eq!(heuristic.evaluate(&board, player), expected);
        }
    }
}

#[test]
fn vertical_four_ends_game_for_red() {
    let mut session = GameSession::new(&BoardConfig::default(), GameMode::Two);
    for col in [3, 0, 3, 0, 3, 0, 3] {
        session.play(col).unwrap();
    }
    match session.result() {
        GameResult::Win { player, cells } => {
            assert_eq!(*player, Player::Red);
            let mut sorted = cells.clone();
            sorted.sort();
            assert_eq!(sorted, vec![(2, 3), (3, 3), (4, 3), (5, 3)]);
        }
        other => panic!("expected a win, got {other:?}"),
    }
    assert_eq!(session.play(1), Err(MoveError::GameOver));
}

#[test]
fn seventh_drop_into_column_is_rejected() {
    let mut session = GameSession::new(&BoardConfig::default(), GameMode::Two);
    for _ in 0..6 {
        session.play(0).unwrap();
    }
    assert_eq!(session.play(0), Err(MoveError::ColumnFull { column: 0 }));
    assert_eq!(session.history().len(), 6);
    assert_eq!(session.current_player(), Player::Red);
    assert!(!session.legal_columns().contains(&0));
}

#[test]
fn full_board_without_line_is_a_draw() {
    let rows = ["RRYYRRY", "YYRRYYR"].repeat(3);
    let mut board = Board::from_rows(&rows, 4).unwrap();
    assert!(board.is_full());
    assert_eq!(board.result(), GameResult::Draw);
    assert_eq!(board.get(0, 0), Cell::Red);
    assert_eq!(
        choose_move(&mut board, 4, Player::Yellow, Player::Red, &mut StdRng::seed_from_u64(0)),
        Err(SearchError::NoLegalMoves)
    );
}
