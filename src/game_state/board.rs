//! Mailbox board: an 8×8 grid of optional pieces with no rule knowledge.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::chess_rules::BACK_RANK_ORDER;
use crate::game_state::chess_types::*;
use crate::utils::render_game_state::render_board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    /// Standard opening layout.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            let back = color.back_rank() as usize;
            let pawns = color.pawn_start_row() as usize;
            for (col, kind) in BACK_RANK_ORDER.iter().enumerate() {
                board.cells[back][col] = Some(Piece::new(*kind, color));
                board.cells[pawns][col] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row as usize][square.col as usize] = piece;
    }

    /// Removes and returns whatever stands on `square`.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.row as usize][square.col as usize].take()
    }

    /// Every occupied square with its piece, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn count(&self, kind: PieceKind) -> usize {
        self.pieces().filter(|(_, piece)| piece.kind == kind).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::game_state::chess_types::*;

    #[test]
    fn standard_board_has_thirty_two_pieces_and_both_kings() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.find_king(Color::White), Square::new(7, 4));
        assert_eq!(board.find_king(Color::Black), Square::new(0, 4));
        assert_eq!(board.count(PieceKind::Pawn), 16);
    }

    #[test]
    fn take_clears_the_square() {
        let mut board = Board::standard();
        let e2 = Square::new(6, 4).expect("e2");
        let pawn = board.take(e2);
        assert_eq!(pawn, Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert!(board.is_empty(e2));
    }
}
