//! Board tests - grid store, merge and line clears

use tui_coinfall::core::shapes::standard_shape;
use tui_coinfall::core::{Board, Piece};
use tui_coinfall::types::{Cell, CoinKind, ShapeKind, SpecialTag, BOARD_HEIGHT, BOARD_WIDTH};

const BTC: Cell = Cell::Coin(CoinKind::Btc);
const ETH: Cell = Cell::Coin(CoinKind::Eth);

fn full_row(cell: Cell) -> [Cell; 10] {
    [cell; 10]
}

/// Row with one gap so it never clears
fn holed_row(cell: Cell, hole: usize) -> [Cell; 10] {
    let mut row = [cell; 10];
    row[hole] = Cell::Empty;
    row
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(Cell::Empty));
            assert!(!board.is_occupied(x, y), "cell ({}, {}) should be free", x, y);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
    assert!(!board.is_occupied(-1, 5));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, ETH));
    assert_eq!(board.get(5, 10), Some(ETH));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, Cell::Empty));
    assert!(!board.is_occupied(5, 10));

    assert!(!board.set(10, 0, BTC));
}

#[test]
fn test_merge_skips_cells_above_grid() {
    let mut board = Board::new();
    // Vertical I, top two cells above row 0
    let piece = Piece::from_rows(standard_shape(ShapeKind::I), || BTC)
        .rotated_cw()
        .at(3, -2);

    assert_eq!(board.merge(&piece), 2);
    assert_eq!(board.get(3, 0), Some(BTC));
    assert_eq!(board.get(3, 1), Some(BTC));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_merge_writes_labels() {
    let mut board = Board::new();
    let piece = Piece::from_rows(standard_shape(ShapeKind::O), || Cell::Special(SpecialTag::Gold)).at(0, 18);
    assert_eq!(board.merge(&piece), 4);
    for (x, y) in [(0, 18), (1, 18), (0, 19), (1, 19)] {
        assert_eq!(board.get(x, y), Some(Cell::Special(SpecialTag::Gold)));
    }
}

#[test]
fn test_clear_single_row_reports_contents() {
    let mut board = Board::new();
    let mut row = full_row(BTC);
    row[3] = ETH;
    board.fill_row(19, row);
    board.set(2, 18, ETH);

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.len(), 1);
    assert_eq!(cleared[0].row, 19);
    assert_eq!(cleared[0].cells, row);

    // The row above dropped into 19, the top is fresh
    assert_eq!(board.get(2, 19), Some(ETH));
    assert!(board.row(0).unwrap().iter().all(|c| c.is_empty()));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_clear_non_adjacent_rows_keeps_order() {
    let mut board = Board::new();
    board.fill_row(19, full_row(BTC));
    board.fill_row(18, holed_row(ETH, 0));
    board.fill_row(17, full_row(ETH));
    board.fill_row(16, holed_row(BTC, 9));

    let cleared = board.clear_full_rows();
    let rows: Vec<usize> = cleared.iter().map(|c| c.row).collect();
    // 19 goes first; 17 has shifted to 18 by the time it is removed
    assert_eq!(rows, vec![19, 18]);

    assert_eq!(board.row(19).unwrap(), &holed_row(ETH, 0));
    assert_eq!(board.row(18).unwrap(), &holed_row(BTC, 9));
    assert_eq!(board.filled_count(), 18);
}

#[test]
fn test_clear_preserves_row_count_and_only_removes_full_rows() {
    let mut board = Board::new();
    for y in 10..20 {
        if y % 3 == 0 {
            board.fill_row(y, holed_row(BTC, y % 10));
        } else {
            board.fill_row(y, full_row(ETH));
        }
    }
    let before: Vec<[Cell; 10]> = (10..20)
        .filter(|y| y % 3 == 0)
        .map(|y| holed_row(BTC, y % 10))
        .collect();

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.len(), 10 - before.len());
    assert!((0..BOARD_HEIGHT as usize).all(|y| !board.is_row_full(y)));

    // Survivors keep their relative order at the bottom
    let survivors: Vec<&[Cell]> = (20 - before.len()..20).map(|y| board.row(y).unwrap()).collect();
    for (row, expected) in survivors.iter().zip(before.iter()) {
        assert_eq!(*row, &expected[..]);
    }
}

#[test]
fn test_clear_whole_board() {
    let mut board = Board::new();
    for y in 0..20 {
        board.fill_row(y, full_row(BTC));
    }
    let cleared = board.clear_full_rows();
    assert_eq!(cleared.len(), 20);
    assert!(cleared.iter().all(|c| c.row == 19));
    assert_eq!(board.filled_count(), 0);
}
