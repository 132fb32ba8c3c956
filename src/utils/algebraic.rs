//! Square conversions for coordinate notation.
//!
//! Files map to columns (`a` is column 0) and ranks count up from white's
//! side, so rank 8 is row 0 and rank 1 is row 7.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert coordinate notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(text: &str) -> ChessResult<Square> {
    let &[file, rank] = text.as_bytes() else {
        return Err(ChessError::InvalidNotation(format!("invalid square '{text}'")));
    };

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::InvalidNotation(format!(
            "invalid file '{}'",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidNotation(format!(
            "invalid rank '{}'",
            rank as char
        )));
    }

    Ok(Square {
        row: b'8' - rank,
        col: file - b'a',
    })
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    let file = char::from(b'a' + square.col);
    let rank = char::from(b'8' - square.row);
    format!("{file}{rank}")
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};
    use crate::game_state::chess_types::Square;

    #[test]
    fn corners_map_to_rows_and_columns() {
        assert_eq!(
            algebraic_to_square("a8").expect("a8 should parse"),
            Square { row: 0, col: 0 }
        );
        assert_eq!(
            algebraic_to_square("h1").expect("h1 should parse"),
            Square { row: 7, col: 7 }
        );
        assert_eq!(
            algebraic_to_square("e4").expect("e4 should parse"),
            Square { row: 4, col: 4 }
        );
        assert_eq!(square_to_algebraic(Square { row: 2, col: 3 }), "d6");
    }

    #[test]
    fn malformed_squares_are_rejected() {
        for text in ["", "e", "e9", "i4", "e44", "E4"] {
            assert!(algebraic_to_square(text).is_err(), "{text} should not parse");
        }
    }
}
