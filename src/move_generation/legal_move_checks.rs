//! Check detection and the self-check simulation behind legality.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::relocate_pieces;
use crate::move_generation::move_generator::attack_squares;

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board.find_king(color)
}

pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    board
        .pieces_of(attacker_color)
        .any(|(from, piece)| attack_squares(board, from, piece).contains(&square))
}

/// # Panics
///
/// When `color` has no king: legality is undefined on such a board and no
/// sequence of legal moves can reach it.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        panic!("board has no {color} king; check detection is undefined");
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// Plays the relocation part of `mv` on a scratch board and reports whether
/// `moving_color`'s king would be attacked afterwards.
pub fn would_expose_check(position: &Position, mv: &Move, moving_color: Color) -> bool {
    let mut scratch = position.board;
    relocate_pieces(&mut scratch, mv);
    is_in_check(&scratch, moving_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("square on board")
    }

    #[test]
    fn start_position_has_nobody_in_check() {
        let board = Board::standard();
        assert!(!is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn knight_check_is_detected() {
        let state = parse_fen("4k3/8/3N4/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert!(is_in_check(&state.position.board, Color::Black));
        assert!(is_square_attacked(&state.position.board, sq(0, 4), Color::White));
        assert!(!is_square_attacked(&state.position.board, sq(0, 3), Color::White));
    }

    #[test]
    fn pinned_piece_move_exposes_check() {
        // White bishop on e2 pinned by the black rook on e8.
        let state = parse_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN should parse");
        let pinned = Move::new(sq(6, 4), sq(5, 3));
        assert!(would_expose_check(&state.position, &pinned, Color::White));
        let king_step = Move::new(sq(7, 4), sq(7, 3));
        assert!(!would_expose_check(&state.position, &king_step, Color::White));
    }

    #[test]
    #[should_panic(expected = "no white king")]
    fn missing_king_is_a_programming_error() {
        let board = Board::empty();
        is_in_check(&board, Color::White);
    }
}
