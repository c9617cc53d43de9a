//! Shape library - occupancy matrices for every piece the generator can hand out
//!
//! Shapes are written row by row, top row first, `1` marking an occupied cell.
//! Standard tetrominoes are at most 4 wide; the letter shapes are 4-5 wide and
//! 5 tall, which is why pieces reserve a 5x5 footprint.

use crate::types::{LetterShape, ShapeKind};

/// A shape as rows of 0/1 occupancy flags
pub type ShapeRows = &'static [&'static [u8]];

/// Largest side of any shape in the library
pub const MAX_SHAPE_DIM: usize = 5;

const I_ROWS: ShapeRows = &[&[1, 1, 1, 1]];
const O_ROWS: ShapeRows = &[&[1, 1], &[1, 1]];
const T_ROWS: ShapeRows = &[&[0, 1, 0], &[1, 1, 1]];
const S_ROWS: ShapeRows = &[&[0, 1, 1], &[1, 1, 0]];
const Z_ROWS: ShapeRows = &[&[1, 1, 0], &[0, 1, 1]];
const J_ROWS: ShapeRows = &[&[1, 0, 0], &[1, 1, 1]];
const L_ROWS: ShapeRows = &[&[0, 0, 1], &[1, 1, 1]];

const F_ROWS: ShapeRows = &[
    &[1, 1, 1, 1],
    &[1, 0, 0, 0],
    &[1, 1, 1, 0],
    &[1, 0, 0, 0],
    &[1, 0, 0, 0],
];

const U_ROWS: ShapeRows = &[
    &[1, 0, 0, 1],
    &[1, 0, 0, 1],
    &[1, 0, 0, 1],
    &[1, 0, 0, 1],
    &[1, 1, 1, 1],
];

const N_ROWS: ShapeRows = &[
    &[1, 0, 0, 0, 1],
    &[1, 1, 0, 0, 1],
    &[1, 0, 1, 0, 1],
    &[1, 0, 0, 1, 1],
    &[1, 0, 0, 0, 1],
];

const SINGLE_ROWS: ShapeRows = &[&[1]];

/// Spawn orientation of a standard tetromino
pub fn standard_shape(kind: ShapeKind) -> ShapeRows {
    match kind {
        ShapeKind::I => I_ROWS,
        ShapeKind::O => O_ROWS,
        ShapeKind::T => T_ROWS,
        ShapeKind::S => S_ROWS,
        ShapeKind::Z => Z_ROWS,
        ShapeKind::J => J_ROWS,
        ShapeKind::L => L_ROWS,
    }
}

/// Letter shape handed out at the end of a Gold event
pub fn letter_shape(letter: LetterShape) -> ShapeRows {
    match letter {
        LetterShape::F => F_ROWS,
        LetterShape::U => U_ROWS,
        LetterShape::N => N_ROWS,
    }
}

/// The 1x1 block used by the Doge event
pub fn single_cell_shape() -> ShapeRows {
    SINGLE_ROWS
}

/// Number of occupied cells in a shape
pub fn occupied_count(rows: ShapeRows) -> usize {
    rows.iter()
        .map(|row| row.iter().filter(|&&v| v != 0).count())
        .sum()
}
