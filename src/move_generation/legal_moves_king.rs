use crate::game_state::chess_rules::KING_START_COL;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::king_moves::king_attacks;

pub fn generate_king_moves(position: &Position, from: Square, color: Color, out: &mut Vec<Move>) {
    push_target_moves(from, king_attacks(&position.board, from, color), out);
    generate_castling_moves(position, from, color, out);
}

/// Castling is checked with attack squares only, never with legal move
/// generation, so the two never recurse into each other.
fn generate_castling_moves(position: &Position, king_from: Square, color: Color, out: &mut Vec<Move>) {
    let back_rank = color.back_rank();
    if king_from.row != back_rank || king_from.col != KING_START_COL {
        return;
    }

    let board = &position.board;
    let enemy = color.opposite();

    // Cannot castle out of check.
    if is_square_attacked(board, king_from, enemy) {
        return;
    }

    for side in CastleSide::ALL {
        if !position.castling.may_castle(color, side) {
            continue;
        }

        let rook_sq = Square {
            row: back_rank,
            col: side.rook_start_col(),
        };
        if board.piece_at(rook_sq) != Some(Piece::new(PieceKind::Rook, color)) {
            continue;
        }

        let (low, high) = if side.rook_start_col() < KING_START_COL {
            (side.rook_start_col() + 1, KING_START_COL)
        } else {
            (KING_START_COL + 1, side.rook_start_col())
        };
        let path_clear = (low..high).all(|col| board.is_empty(Square { row: back_rank, col }));
        if !path_clear {
            continue;
        }

        let king_to = Square {
            row: back_rank,
            col: side.king_target_col(),
        };
        let pass_through = Square {
            row: back_rank,
            col: (KING_START_COL + side.king_target_col()) / 2,
        };
        if is_square_attacked(board, pass_through, enemy) || is_square_attacked(board, king_to, enemy) {
            continue;
        }

        out.push(Move::castle(king_from, king_to, side));
    }
}
