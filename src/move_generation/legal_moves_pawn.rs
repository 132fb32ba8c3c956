//! Pawn move generation.
//!
//! Pushes need empty squares, captures need an enemy piece or the live
//! en-passant target. Moves onto the last rank are ordinary moves here; the
//! executor turns the pawn into a queen.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::pawn_moves::pawn_attacks;

pub fn generate_pawn_moves(position: &Position, from: Square, color: Color, out: &mut Vec<Move>) {
    let board = &position.board;
    let d_row = color.pawn_direction();

    if let Some(one_step) = from.offset(d_row, 0) {
        if board.is_empty(one_step) {
            out.push(Move::new(from, one_step));

            if from.row == color.pawn_start_row() {
                if let Some(two_step) = one_step.offset(d_row, 0) {
                    if board.is_empty(two_step) {
                        out.push(Move::new(from, two_step));
                    }
                }
            }
        }
    }

    for to in pawn_attacks(color, from) {
        match board.piece_at(to) {
            Some(target) if target.color != color => out.push(Move::new(from, to)),
            None if position.en_passant_target == Some(to) => {
                out.push(Move::en_passant(from, to));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::chess_types::*;
    use crate::game_state::position::Position;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("square on board")
    }

    #[test]
    fn start_rank_pawn_has_single_and_double_step() {
        let position = Position::standard();
        let mut out = Vec::new();
        generate_pawn_moves(&position, sq(6, 4), Color::White, &mut out);
        assert_eq!(out, vec![Move::new(sq(6, 4), sq(5, 4)), Move::new(sq(6, 4), sq(4, 4))]);
    }

    #[test]
    fn blocked_intermediate_square_forbids_double_step() {
        let mut position = Position::standard();
        position
            .board
            .set(sq(5, 4), Some(Piece::new(PieceKind::Knight, Color::Black)));
        let mut out = Vec::new();
        generate_pawn_moves(&position, sq(6, 4), Color::White, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn en_passant_target_produces_flagged_capture() {
        let mut position = Position::standard();
        position.board.take(sq(6, 4));
        position
            .board
            .set(sq(3, 4), Some(Piece::new(PieceKind::Pawn, Color::White)));
        position.board.take(sq(1, 3));
        position
            .board
            .set(sq(3, 3), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        position.en_passant_target = Some(sq(2, 3));

        let mut out = Vec::new();
        generate_pawn_moves(&position, sq(3, 4), Color::White, &mut out);
        assert!(out.contains(&Move::en_passant(sq(3, 4), sq(2, 3))));
    }
}
