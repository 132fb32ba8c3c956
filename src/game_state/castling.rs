//! Castling bookkeeping: rights plus the king/rook "has moved" history.
//!
//! Every flag here only ever moves one way: rights are cleared and moved
//! flags are set, never the reverse.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{CastleSide, Color};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingState {
    /// `[color][side]`
    pub rights: [[bool; 2]; 2],
    /// `[color]`
    pub king_moved: [bool; 2],
    /// `[color][side]`
    pub rook_moved: [[bool; 2]; 2],
}

impl Default for CastlingState {
    fn default() -> Self {
        Self::all_rights()
    }
}

impl CastlingState {
    pub const fn all_rights() -> Self {
        Self {
            rights: [[true; 2]; 2],
            king_moved: [false; 2],
            rook_moved: [[false; 2]; 2],
        }
    }

    pub const fn no_rights() -> Self {
        Self {
            rights: [[false; 2]; 2],
            king_moved: [false; 2],
            rook_moved: [[false; 2]; 2],
        }
    }

    #[inline]
    pub fn has_right(&self, color: Color, side: CastleSide) -> bool {
        self.rights[color.index()][side.index()]
    }

    /// Flag-level eligibility: king unmoved, right intact, rook unmoved.
    #[inline]
    pub fn may_castle(&self, color: Color, side: CastleSide) -> bool {
        !self.king_moved[color.index()]
            && self.has_right(color, side)
            && !self.rook_moved[color.index()][side.index()]
    }

    pub fn record_king_move(&mut self, color: Color) {
        self.king_moved[color.index()] = true;
        self.rights[color.index()] = [false; 2];
    }

    pub fn record_rook_departure(&mut self, color: Color, side: CastleSide) {
        self.rook_moved[color.index()][side.index()] = true;
        self.rights[color.index()][side.index()] = false;
    }

    /// The rook was captured on its corner.
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        self.rights[color.index()][side.index()] = false;
    }
}
