//! Static position scoring.
//!
//! Search delegates leaf scoring to [`BoardScorer`] so the heuristic can be
//! swapped without touching the search. [`PieceSquareScorer`] is the one the
//! game uses.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::tables::piece_square_tables::positional_bonus;

/// Non-king material (both sides, pawns included) below which the position
/// counts as an endgame.
pub const ENDGAME_MATERIAL_THRESHOLD: i32 = 1600;
pub const KING_EDGE_WEIGHT: i32 = 15;
pub const KING_PROXIMITY_WEIGHT: i32 = 5;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of `perspective`; positive is good for it.
    fn score(&self, board: &Board, perspective: Color) -> i32;
}

/// Material, piece-square tables and, in the endgame, king activity.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl BoardScorer for PieceSquareScorer {
    #[inline]
    fn score(&self, board: &Board, perspective: Color) -> i32 {
        evaluate(board, perspective)
    }
}

pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    let endgame = is_endgame(board);

    let mut score = 0i32;
    for (square, piece) in board.pieces() {
        let term = piece.kind.value() + positional_bonus(piece.kind, piece.color, square, endgame);
        if piece.color == perspective {
            score += term;
        } else {
            score -= term;
        }
    }

    if endgame {
        score += endgame_king_bonus(board, perspective);
    }
    score
}

pub fn is_endgame(board: &Board) -> bool {
    if board.count(PieceKind::Queen) == 0 {
        return true;
    }
    let material: i32 = board
        .pieces()
        .filter(|(_, piece)| piece.kind != PieceKind::King)
        .map(|(_, piece)| piece.kind.value())
        .sum();
    material < ENDGAME_MATERIAL_THRESHOLD
}

/// Pushes the opponent king to the rim and brings our king towards it.
fn endgame_king_bonus(board: &Board, perspective: Color) -> i32 {
    let (Some(own), Some(opponent)) = (
        board.find_king(perspective),
        board.find_king(perspective.opposite()),
    ) else {
        return 0;
    };

    KING_EDGE_WEIGHT * distance_from_centre(opponent)
        + KING_PROXIMITY_WEIGHT * (14 - manhattan_distance(own, opponent))
}

/// King-move distance to the nearest of d4, e4, d5, e5.
#[inline]
pub fn distance_from_centre(square: Square) -> i32 {
    let axis = |v: u8| -> i32 {
        let v = i32::from(v);
        (3 - v).max(v - 4).max(0)
    };
    axis(square.row).max(axis(square.col))
}

#[inline]
pub fn manhattan_distance(a: Square, b: Square) -> i32 {
    i32::from(a.row.abs_diff(b.row)) + i32::from(a.col.abs_diff(b.col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn board(fen: &str) -> Board {
        parse_fen(fen).expect("FEN should parse").position.board
    }

    #[test]
    fn start_position_is_balanced() {
        let start = Board::standard();
        assert_eq!(evaluate(&start, Color::White), 0);
        assert_eq!(evaluate(&start, Color::Black), 0);
        assert!(!is_endgame(&start));
    }

    #[test]
    fn scores_are_antisymmetric() {
        let b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        assert_eq!(evaluate(&b, Color::White), -evaluate(&b, Color::Black));
    }

    #[test]
    fn extra_queen_dominates_the_score() {
        let b = board("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(evaluate(&b, Color::White) > 800);
        assert!(evaluate(&b, Color::Black) < -800);
    }

    #[test]
    fn endgame_detection() {
        // Queens present with plenty of material.
        assert!(!is_endgame(&board("3qk3/pppppppp/8/8/8/8/PPPPPPPP/3QK3 w - - 0 1")));
        // No queens.
        assert!(is_endgame(&board("r3k3/pppppppp/8/8/8/8/PPPPPPPP/R3K3 w - - 0 1")));
        // The two queens alone add up to 1800.
        assert!(!is_endgame(&board("3qk3/8/8/8/8/8/8/3QK3 w - - 0 1")));
        // One queen, 900 + 500 = 1400 < 1600.
        assert!(is_endgame(&board("r3k3/8/8/8/8/8/8/3QK3 w - - 0 1")));
    }

    #[test]
    fn centre_distance_uses_the_nearest_centre_square() {
        assert_eq!(distance_from_centre(Square { row: 3, col: 4 }), 0);
        assert_eq!(distance_from_centre(Square { row: 0, col: 0 }), 3);
        assert_eq!(distance_from_centre(Square { row: 7, col: 5 }), 3);
        assert_eq!(distance_from_centre(Square { row: 2, col: 5 }), 1);
    }

    #[test]
    fn endgame_rewards_cornering_the_opponent_king() {
        // Same material, black king cornered vs centralised.
        let cornered = board("k7/8/2K5/8/8/8/8/7R w - - 0 1");
        let central = board("8/8/2K5/8/4k3/8/8/7R w - - 0 1");
        assert!(evaluate(&cornered, Color::White) > evaluate(&central, Color::White));
    }
}
