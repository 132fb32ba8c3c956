//! The single legality gate.
//!
//! Every move the game accepts, from a click or from the search, passes
//! through `legal_moves`: pseudo-legal generation filtered by the self-check
//! simulation.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::would_expose_check;
use crate::move_generation::move_generator::pseudo_legal_moves;

/// Legal moves for the piece on `square`; empty for an empty square.
pub fn legal_moves(position: &Position, square: Square) -> Vec<Move> {
    let Some(piece) = position.board.piece_at(square) else {
        return Vec::new();
    };
    let mut moves = pseudo_legal_moves(position, square);
    moves.retain(|mv| !would_expose_check(position, mv, piece.color));
    moves
}

/// All legal moves for `color`, in row-major origin order.
pub fn legal_moves_for_color(position: &Position, color: Color) -> Vec<Move> {
    position
        .board
        .pieces_of(color)
        .flat_map(|(sq, _)| legal_moves(position, sq))
        .collect()
}

pub fn has_any_legal_move(position: &Position, color: Color) -> bool {
    position
        .board
        .pieces_of(color)
        .any(|(sq, _)| !legal_moves(position, sq).is_empty())
}
