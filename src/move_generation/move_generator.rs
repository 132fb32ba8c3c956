//! Per-square dispatch into the piece generators.
//!
//! Two views of the same geometry: pseudo-legal moves (what a piece may try)
//! and attack squares (what a piece threatens). Attack squares never include
//! pawn pushes, en passant or castling, which keeps check detection free of
//! any dependency on legal move generation.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

/// Moves obeying piece movement and occupancy rules for whatever stands on
/// `square`. May leave the mover's king attacked. Empty squares yield none.
pub fn pseudo_legal_moves(position: &Position, square: Square) -> Vec<Move> {
    let Some(piece) = position.board.piece_at(square) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(28);
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(position, square, piece.color, &mut out),
        PieceKind::Knight => generate_knight_moves(position, square, piece.color, &mut out),
        PieceKind::Bishop => generate_bishop_moves(position, square, piece.color, &mut out),
        PieceKind::Rook => generate_rook_moves(position, square, piece.color, &mut out),
        PieceKind::Queen => generate_queen_moves(position, square, piece.color, &mut out),
        PieceKind::King => generate_king_moves(position, square, piece.color, &mut out),
    }
    out
}

/// Squares `piece` standing on `square` attacks.
pub fn attack_squares(board: &Board, square: Square, piece: Piece) -> Vec<Square> {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, square),
        PieceKind::Knight => knight_attacks(board, square, piece.color),
        PieceKind::Bishop => bishop_attacks(board, square, piece.color),
        PieceKind::Rook => rook_attacks(board, square, piece.color),
        PieceKind::Queen => queen_attacks(board, square, piece.color),
        PieceKind::King => king_attacks(board, square, piece.color),
    }
}
