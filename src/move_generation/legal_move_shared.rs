use crate::game_state::chess_types::{Move, Square};

/// Turns plain destination squares into moves from `from`.
#[inline]
pub fn push_target_moves(from: Square, targets: Vec<Square>, out: &mut Vec<Move>) {
    out.extend(targets.into_iter().map(|to| Move::new(from, to)));
}
