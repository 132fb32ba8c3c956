//! Ray walking shared by the sliding pieces.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};

/// Pushes every square along `direction` from `from`, stopping before a
/// piece of `color` and after the first piece of the other color.
pub fn trace_ray(
    board: &Board,
    from: Square,
    color: Color,
    direction: (i8, i8),
    out: &mut Vec<Square>,
) {
    let (d_row, d_col) = direction;
    let mut cursor = from.offset(d_row, d_col);
    while let Some(sq) = cursor {
        match board.piece_at(sq) {
            None => out.push(sq),
            Some(piece) => {
                if piece.color != color {
                    out.push(sq);
                }
                return;
            }
        }
        cursor = sq.offset(d_row, d_col);
    }
}

pub fn trace_rays(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for direction in directions {
        trace_ray(board, from, color, *direction, out);
    }
}

/// Pushes each on-board `from + offset` not holding a piece of `color`.
pub fn step_targets(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for (d_row, d_col) in offsets {
        let Some(to) = from.offset(*d_row, *d_col) else {
            continue;
        };
        if board.piece_at(to).is_none_or(|piece| piece.color != color) {
            out.push(to);
        }
    }
}
