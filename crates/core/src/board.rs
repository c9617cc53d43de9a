//! Board module - the grid store
//!
//! The board is a 10x20 grid where each cell is empty or holds a coin/special label.
//! Uses a flat array for cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! The board is only ever written by [`Board::merge`] and compacted by
//! [`Board::clear_full_rows`].

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// One row of cells
pub type Row = [Cell; BOARD_WIDTH as usize];

/// A full row removed by [`Board::clear_full_rows`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearedRow {
    /// Row index at the moment of removal
    pub row: usize,
    /// Contents before removal, left to right
    pub cells: Row,
}

/// Rows removed by a single clear pass (never more than the board height)
pub type ClearedRows = ArrayVec<ClearedRow, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True if the cell is within bounds and non-empty
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(cell) if cell.is_filled())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(Cell::is_filled))
            .unwrap_or(false)
    }

    /// Borrow one row, top row is 0
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Overwrite one row (test and scenario setup)
    pub fn fill_row(&mut self, y: usize, cells: Row) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        self.cells[start..start + BOARD_WIDTH as usize].copy_from_slice(&cells);
        true
    }

    /// Commit a piece's occupied cells into the grid.
    ///
    /// Cells outside the grid (typically above row 0 right after spawn) are
    /// skipped. Returns the number of cells written.
    pub fn merge(&mut self, piece: &Piece) -> usize {
        let mut written = 0;
        for (x, y, cell) in piece.cells() {
            if self.set(x, y, cell) {
                written += 1;
            }
        }
        written
    }

    /// Remove row `y` and shift all rows above it down by one, leaving an empty top row
    fn remove_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(Cell::Empty);
    }

    /// Clear all full rows, scanning bottom to top.
    ///
    /// After a removal the same index is examined again, because the rows
    /// above have shifted into it. Each entry reports the row index at the
    /// moment it was removed together with its pre-clear contents.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut y = BOARD_HEIGHT as usize;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                let start = row * width;
                let mut cells = [Cell::Empty; BOARD_WIDTH as usize];
                cells.copy_from_slice(&self.cells[start..start + width]);
                cleared.push(ClearedRow { row, cells });
                self.remove_row(row);
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Number of filled cells on the whole board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a row-major 2D array
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * BOARD_WIDTH as usize;
            row.copy_from_slice(&self.cells[start..start + BOARD_WIDTH as usize]);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
