//! Piece module - the falling piece and its rotation transform
//!
//! A piece is a label matrix (at most 5x5) plus the grid position of the
//! matrix's top-left corner. A position is occupied exactly when its label is
//! not [`Cell::Empty`], so occupancy and labels travel together through every
//! transform.

use crate::shapes::{ShapeRows, MAX_SHAPE_DIM};
use crate::types::{Cell, BOARD_WIDTH};

const PIECE_CELLS: usize = MAX_SHAPE_DIM * MAX_SHAPE_DIM;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    rows: u8,
    cols: u8,
    /// Row-major labels with a fixed stride of `MAX_SHAPE_DIM`
    labels: [Cell; PIECE_CELLS],
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Build a piece from occupancy rows, asking `label` for each occupied cell
    /// in row-major order. The piece starts at (0, 0).
    pub fn from_rows(shape: ShapeRows, mut label: impl FnMut() -> Cell) -> Self {
        let rows = shape.len().min(MAX_SHAPE_DIM);
        let cols = shape.first().map_or(0, |r| r.len()).min(MAX_SHAPE_DIM);
        let mut labels = [Cell::Empty; PIECE_CELLS];

        for (r, row) in shape.iter().take(rows).enumerate() {
            for (c, &bit) in row.iter().take(cols).enumerate() {
                if bit != 0 {
                    labels[r * MAX_SHAPE_DIM + c] = label();
                }
            }
        }

        Self {
            rows: rows as u8,
            cols: cols as u8,
            labels,
            x: 0,
            y: 0,
        }
    }

    /// Same piece at another grid position
    pub fn at(self, x: i8, y: i8) -> Self {
        Self { x, y, ..self }
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Place the piece horizontally centred on the board at row `y`
    pub fn centered(self, y: i8) -> Self {
        let x = (BOARD_WIDTH as i8) / 2 - (self.cols as i8) / 2;
        self.at(x, y)
    }

    /// Matrix height
    pub fn height(&self) -> u8 {
        self.rows
    }

    /// Matrix width
    pub fn width(&self) -> u8 {
        self.cols
    }

    /// Label at matrix position (r, c); `Empty` outside the matrix
    pub fn label(&self, r: usize, c: usize) -> Cell {
        if r >= self.rows as usize || c >= self.cols as usize {
            return Cell::Empty;
        }
        self.labels[r * MAX_SHAPE_DIM + c]
    }

    pub fn is_occupied(&self, r: usize, c: usize) -> bool {
        self.label(r, c).is_filled()
    }

    /// Occupancy matrix, row by row
    pub fn occupancy(&self) -> Vec<Vec<bool>> {
        (0..self.rows as usize)
            .map(|r| (0..self.cols as usize).map(|c| self.is_occupied(r, c)).collect())
            .collect()
    }

    /// Occupied cells as absolute grid positions with their labels
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize).filter_map(move |c| {
                let cell = self.label(r, c);
                cell.is_filled()
                    .then(|| (self.x + c as i8, self.y + r as i8, cell))
            })
        })
    }

    /// Number of occupied cells
    pub fn cell_count(&self) -> usize {
        self.labels.iter().filter(|c| c.is_filled()).count()
    }

    /// True when every occupied cell carries `pred`-matching label
    pub fn all_labels(&self, pred: impl Fn(Cell) -> bool) -> bool {
        self.labels.iter().filter(|c| c.is_filled()).all(|&c| pred(c))
    }

    /// Clockwise 90° rotation in place: `rotated[c][R-1-r] = source[r][c]`.
    ///
    /// Position is unchanged; callers decide where the rotated matrix goes.
    pub fn rotated_cw(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut labels = [Cell::Empty; PIECE_CELLS];

        for r in 0..rows {
            for c in 0..cols {
                labels[c * MAX_SHAPE_DIM + (rows - 1 - r)] = self.labels[r * MAX_SHAPE_DIM + c];
            }
        }

        Self {
            rows: self.cols,
            cols: self.rows,
            labels,
            x: self.x,
            y: self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::standard_shape;
    use crate::types::{CoinKind, ShapeKind};

    #[test]
    fn test_from_rows_labels_only_occupied_cells() {
        let piece = Piece::from_rows(standard_shape(ShapeKind::T), || Cell::Coin(CoinKind::Eth));
        assert_eq!(piece.width(), 3);
        assert_eq!(piece.height(), 2);
        assert_eq!(piece.label(0, 0), Cell::Empty);
        assert_eq!(piece.label(0, 1), Cell::Coin(CoinKind::Eth));
        assert_eq!(piece.cell_count(), 4);
    }

    #[test]
    fn test_rotation_moves_labels_with_cells() {
        // J: [1,0,0] / [1,1,1]; label cells in draw order.
        let kinds = [CoinKind::Btc, CoinKind::Eth, CoinKind::Doge, CoinKind::Sol];
        let mut i = 0;
        let piece = Piece::from_rows(standard_shape(ShapeKind::J), || {
            let cell = Cell::Coin(kinds[i]);
            i += 1;
            cell
        });

        let rotated = piece.rotated_cw();
        assert_eq!(rotated.height(), 3);
        assert_eq!(rotated.width(), 2);
        // source (0,0)=BTC -> (0,1); (1,0)=ETH -> (0,0); (1,2)=SOL -> (2,0)
        assert_eq!(rotated.label(0, 1), Cell::Coin(CoinKind::Btc));
        assert_eq!(rotated.label(0, 0), Cell::Coin(CoinKind::Eth));
        assert_eq!(rotated.label(1, 0), Cell::Coin(CoinKind::Doge));
        assert_eq!(rotated.label(2, 0), Cell::Coin(CoinKind::Sol));
        assert_eq!(rotated.label(1, 1), Cell::Empty);
    }

    #[test]
    fn test_centered_spawn_column() {
        let i = Piece::from_rows(standard_shape(ShapeKind::I), || Cell::Coin(CoinKind::Xrp));
        assert_eq!(i.centered(0).x, 3);
        let o = Piece::from_rows(standard_shape(ShapeKind::O), || Cell::Coin(CoinKind::Xrp));
        assert_eq!(o.centered(0).x, 4);
    }
}
