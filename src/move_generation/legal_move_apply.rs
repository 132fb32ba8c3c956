//! Position-level move execution.
//!
//! `apply_move` runs the board and rights part of move execution on a
//! `Position`. The live `GameState` wraps it with history, turn switching and
//! status; the search runs it on private copies.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub moved: Piece,
    pub captured: Option<Piece>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// Piece identity before the move.
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub promoted: bool,
}

/// Moves every piece `mv` moves: the en-passant victim first, then the
/// castling rook, then the mover.
///
/// # Panics
///
/// When the origin square is empty. Moves only come from the generator, so
/// an empty origin means the caller's board and move have diverged.
pub fn relocate_pieces(board: &mut Board, mv: &Move) -> Relocation {
    let Some(moved) = board.piece_at(mv.from) else {
        panic!("no piece on origin square of {mv}");
    };

    let mut captured = None;
    if mv.is_en_passant() {
        let victim_sq = Square {
            row: mv.from.row,
            col: mv.to.col,
        };
        captured = board.take(victim_sq);
    }

    if let Some(side) = mv.castle_side() {
        let row = moved.color.back_rank();
        let rook = board.take(Square {
            row,
            col: side.rook_start_col(),
        });
        board.set(
            Square {
                row,
                col: side.rook_target_col(),
            },
            rook,
        );
    }

    let displaced = board.take(mv.to);
    let mover = board.take(mv.from);
    board.set(mv.to, mover);

    Relocation {
        moved,
        captured: captured.or(displaced),
    }
}

pub fn apply_move(position: &mut Position, mv: &Move) -> AppliedMove {
    let Relocation { moved, captured } = relocate_pieces(&mut position.board, mv);
    let color = moved.color;

    position.en_passant_target = if moved.kind == PieceKind::Pawn && mv.from.row.abs_diff(mv.to.row) == 2 {
        Some(Square {
            row: (mv.from.row + mv.to.row) / 2,
            col: mv.from.col,
        })
    } else {
        None
    };

    match moved.kind {
        PieceKind::King => position.castling.record_king_move(color),
        PieceKind::Rook if mv.from.row == color.back_rank() => {
            if let Some(side) = CastleSide::from_rook_col(mv.from.col) {
                position.castling.record_rook_departure(color, side);
            }
        }
        _ => {}
    }

    if let Some(victim) = captured {
        if victim.kind == PieceKind::Rook && mv.to.row == victim.color.back_rank() {
            if let Some(side) = CastleSide::from_rook_col(mv.to.col) {
                position.castling.revoke(victim.color, side);
            }
        }
    }

    let promoted = moved.kind == PieceKind::Pawn && mv.to.row == color.promotion_row();
    if promoted {
        position
            .board
            .set(mv.to, Some(Piece::new(PieceKind::Queen, color)));
    }

    AppliedMove {
        moved,
        captured,
        promoted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("square on board")
    }

    #[test]
    fn double_step_sets_en_passant_target_and_single_step_clears_it() {
        let mut position = Position::standard();
        apply_move(&mut position, &Move::new(sq(6, 4), sq(4, 4)));
        assert_eq!(position.en_passant_target, Some(sq(5, 4)));
        apply_move(&mut position, &Move::new(sq(1, 0), sq(2, 0)));
        assert_eq!(position.en_passant_target, None);
    }

    #[test]
    fn en_passant_removes_the_pawn_behind_the_destination() {
        let mut state = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let applied = apply_move(&mut state.position, &Move::en_passant(sq(3, 4), sq(2, 3)));
        assert_eq!(applied.captured, Some(Piece::new(PieceKind::Pawn, Color::Black)));
        assert!(state.position.board.is_empty(sq(3, 3)));
        assert_eq!(
            state.position.board.piece_at(sq(2, 3)),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn castling_moves_king_and_rook_and_nothing_else() {
        let mut position = Position::standard();
        for col in [5, 6] {
            position.board.take(sq(7, col));
        }
        let before = position.board;
        let applied = apply_move(&mut position, &Move::castle(sq(7, 4), sq(7, 6), CastleSide::KingSide));
        assert_eq!(applied.captured, None);

        let changed: Vec<Square> = Square::all()
            .filter(|s| before.piece_at(*s) != position.board.piece_at(*s))
            .collect();
        assert_eq!(changed, vec![sq(7, 4), sq(7, 5), sq(7, 6), sq(7, 7)]);
        assert_eq!(
            position.board.piece_at(sq(7, 5)),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert!(!position.castling.may_castle(Color::White, CastleSide::QueenSide));
        assert!(position.castling.king_moved[Color::White.index()]);
    }

    #[test]
    fn pawn_reaching_last_rank_becomes_a_queen() {
        let mut state = parse_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let applied = apply_move(&mut state.position, &Move::new(sq(1, 1), sq(0, 1)));
        assert!(applied.promoted);
        assert_eq!(applied.moved.kind, PieceKind::Pawn);
        assert_eq!(
            state.position.board.piece_at(sq(0, 1)),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
    }

    #[test]
    fn capturing_a_corner_rook_revokes_its_right() {
        let mut state = parse_fen("r3k3/8/8/8/8/8/8/Q3K3 w q - 0 1").expect("FEN should parse");
        assert!(state.position.castling.may_castle(Color::Black, CastleSide::QueenSide));
        apply_move(&mut state.position, &Move::new(sq(7, 0), sq(0, 0)));
        assert!(!state.position.castling.may_castle(Color::Black, CastleSide::QueenSide));
    }

    #[test]
    #[should_panic(expected = "no piece on origin square")]
    fn moving_from_an_empty_square_panics() {
        let mut position = Position::standard();
        apply_move(&mut position, &Move::new(sq(4, 4), sq(3, 4)));
    }
}
