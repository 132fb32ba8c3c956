//! Pawn capture geometry. Pushes are generated in legal pawn move generation
//! because they depend on occupancy rather than attack.

use crate::game_state::chess_types::{Color, Square};

/// The (up to two) forward diagonals a pawn of `color` on `from` attacks,
/// whether or not anything stands there.
#[inline]
pub fn pawn_attacks(color: Color, from: Square) -> Vec<Square> {
    let d_row = color.pawn_direction();
    [-1i8, 1]
        .into_iter()
        .filter_map(|d_col| from.offset(d_row, d_col))
        .collect()
}
