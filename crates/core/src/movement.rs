//! Collision and movement - the single predicate behind gravity, shifting and rotation

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Horizontal offsets tried after a rotation, in order
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// Would `piece`, moved by (dx, dy), overlap a wall, the floor or a filled cell?
///
/// Cells above the grid (`y < 0`) only collide with the side walls, so a
/// piece may spawn partly off-screen and fall into view.
pub fn collides(piece: &Piece, board: &Board, dx: i8, dy: i8) -> bool {
    piece.cells().any(|(x, y, _)| {
        let x = x + dx;
        let y = y + dy;
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        y >= 0 && board.is_occupied(x, y)
    })
}

/// Rotate clockwise and search the kick offsets for a free position.
///
/// Returns the placed piece and the accepted horizontal kick, or `None` when
/// every offset collides (the caller keeps the unrotated piece).
pub fn try_rotate(piece: &Piece, board: &Board) -> Option<(Piece, i8)> {
    let rotated = piece.rotated_cw();
    KICK_OFFSETS.iter().find_map(|&dx| {
        let candidate = rotated.shifted(dx, 0);
        (!collides(&candidate, board, 0, 0)).then_some((candidate, dx))
    })
}

/// Rows the piece can fall before landing
pub fn drop_distance(piece: &Piece, board: &Board) -> i8 {
    let mut distance = 0;
    while !collides(piece, board, 0, distance + 1) {
        distance += 1;
    }
    distance
}
