//! Board tests - grid queries, locking and row compaction

use blockfall::core::Board;
use blockfall::types::{Cell, CellRef, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, PLAYABLE_CELLS};

const W: CellRef = BOARD_WIDTH as CellRef;

fn fill_row(board: &mut Board, row: usize, kind: PieceKind) {
    for col in 0..BOARD_WIDTH as usize {
        assert!(board.set(row, col, Some(kind)));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for row in 0..BOARD_HEIGHT as usize {
        for col in 0..BOARD_WIDTH as usize {
            assert_eq!(board.get_at(row, col), Some(Cell::Empty), "({row}, {col})");
        }
    }
    assert!(board.is_empty());
}

#[test]
fn test_floor_row_is_taken() {
    let board = Board::new();
    for col in 0..W {
        let floor = PLAYABLE_CELLS as CellRef + col;
        assert_eq!(board.get(floor), Some(Cell::Floor));
        assert!(board.is_taken(floor));
    }
}

#[test]
fn test_is_taken_out_of_range() {
    let board = Board::new();
    // Above the board is open so pieces can hang over the top.
    assert!(!board.is_taken(-1));
    assert!(!board.is_taken(-3 * W));
    // Past the floor is solid.
    assert!(board.is_taken(10_000));
}

#[test]
fn test_set_out_of_bounds() {
    let mut board = Board::new();
    assert!(!board.set(BOARD_HEIGHT as usize, 0, Some(PieceKind::T)));
    assert!(!board.set(0, BOARD_WIDTH as usize, Some(PieceKind::T)));
    assert!(board.is_empty());
}

#[test]
fn test_edges() {
    assert!(Board::is_at_left_edge(&[5, 10, 11, 12]));
    assert!(!Board::is_at_left_edge(&[1, 2, 11, 12]));
    assert!(Board::is_at_right_edge(&[8, 9, 18, 19]));
    assert!(!Board::is_at_right_edge(&[7, 8, 17, 18]));
}

#[test]
fn test_lock_never_touches_floor() {
    let mut board = Board::new();
    let floor = PLAYABLE_CELLS as CellRef;
    let written = board.lock(&[-W, floor - 1, floor, floor + 1], PieceKind::S);
    assert_eq!(written, 1);
    assert_eq!(board.get(floor), Some(Cell::Floor));
    assert_eq!(board.get(floor - 1), Some(Cell::Locked(PieceKind::S)));
}

#[test]
fn test_clear_single_bottom_row() {
    let mut board = Board::new();
    let cells: Vec<CellRef> = (0..W).map(|col| 19 * W + col).collect();
    board.lock(&cells, PieceKind::I);

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.len(), 1);
    assert_eq!(cleared[0], 19);
    assert!(board.is_empty());
}

#[test]
fn test_clear_keeps_partial_rows_in_order() {
    let mut board = Board::new();
    board.set(15, 0, Some(PieceKind::T));
    fill_row(&mut board, 16, PieceKind::I);
    board.set(17, 1, Some(PieceKind::S));
    fill_row(&mut board, 18, PieceKind::I);
    board.set(19, 2, Some(PieceKind::Z));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[16, 18]);

    assert_eq!(board.get_at(17, 0), Some(Cell::Locked(PieceKind::T)));
    assert_eq!(board.get_at(18, 1), Some(Cell::Locked(PieceKind::S)));
    assert_eq!(board.get_at(19, 2), Some(Cell::Locked(PieceKind::Z)));
    assert_eq!(board.locked_count(), 3);
    for row in 0..17 {
        assert!(board.row(row).unwrap().iter().all(|c| *c == Cell::Empty));
    }
}

#[test]
fn test_clear_whole_stack() {
    let mut board = Board::new();
    for row in 0..BOARD_HEIGHT as usize {
        fill_row(&mut board, row, PieceKind::O);
    }
    let cleared = board.clear_full_rows();
    assert_eq!(cleared.len(), BOARD_HEIGHT as usize);
    assert!(board.is_empty());
}

#[test]
fn test_no_full_rows_is_noop() {
    let mut board = Board::new();
    board.set(19, 3, Some(PieceKind::L));
    let before = board.clone();
    assert!(board.clear_full_rows().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_clear_resets_playable_cells_only() {
    let mut board = Board::new();
    fill_row(&mut board, 4, PieceKind::J);
    board.clear();
    assert!(board.is_empty());
    assert_eq!(board.get(PLAYABLE_CELLS as CellRef), Some(Cell::Floor));
}
