//! Capture-first move ordering.

use std::cmp::Reverse;

use crate::game_state::board::Board;
use crate::game_state::chess_types::Move;

/// Most-valuable-victim / least-valuable-attacker score. Quiet moves score 0,
/// and so does en passant, whose destination square is empty.
#[inline]
pub fn mvv_lva(board: &Board, mv: &Move) -> i32 {
    let (Some(victim), Some(attacker)) = (board.piece_at(mv.to), board.piece_at(mv.from)) else {
        return 0;
    };
    10 * victim.kind.value() - attacker.kind.value()
}

/// Highest score first; equal scores keep generation order.
pub fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_key(|mv| Reverse(mvv_lva(board, mv)));
}
