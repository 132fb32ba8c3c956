//! Coordinate move notation such as `e2e4` or `e1g1`.
//!
//! Pawns always promote to a queen, so the optional fifth character is only
//! accepted when it is `q`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_to_long_algebraic(mv: &Move) -> String {
    format!(
        "{}{}",
        square_to_algebraic(mv.from),
        square_to_algebraic(mv.to)
    )
}

/// Resolves `text` against the legal moves of `color` in `position`, which
/// fills in the castling and en-passant tags.
pub fn long_algebraic_to_move(position: &Position, color: Color, text: &str) -> ChessResult<Move> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessError::InvalidNotation(format!("invalid move '{text}'")));
    }
    if text.len() == 5 && !text[4..].eq_ignore_ascii_case("q") {
        return Err(ChessError::InvalidNotation(format!(
            "pawns only promote to a queen: '{text}'"
        )));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    match position.board.piece_at(from) {
        Some(piece) if piece.color == color => {}
        _ => {
            return Err(ChessError::InvalidNotation(format!(
                "no {color} piece on {}",
                &text[0..2]
            )))
        }
    }

    legal_moves(position, from)
        .into_iter()
        .find(|mv| mv.to == to)
        .ok_or_else(|| ChessError::InvalidNotation(format!("'{text}' is not a legal move")))
}

#[cfg(test)]
mod tests {
    use super::{long_algebraic_to_move, move_to_long_algebraic};
    use crate::game_state::chess_types::*;
    use crate::game_state::position::Position;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn simple_move_round_trip() {
        let position = Position::standard();
        let mv = long_algebraic_to_move(&position, Color::White, "e2e4").expect("move should parse");
        assert_eq!(mv, Move::new(Square { row: 6, col: 4 }, Square { row: 4, col: 4 }));
        assert_eq!(move_to_long_algebraic(&mv), "e2e4");
    }

    #[test]
    fn castling_and_en_passant_are_tagged() {
        let castle_state = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let castle = long_algebraic_to_move(&castle_state.position, Color::White, "e1g1")
            .expect("castle should parse");
        assert_eq!(castle.castle_side(), Some(CastleSide::KingSide));

        let ep_state = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let ep = long_algebraic_to_move(&ep_state.position, Color::White, "e5d6")
            .expect("en passant should parse");
        assert!(ep.is_en_passant());
    }

    #[test]
    fn queen_suffix_is_optional_and_others_are_refused() {
        let state = parse_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(long_algebraic_to_move(&state.position, Color::White, "a7a8").is_ok());
        assert!(long_algebraic_to_move(&state.position, Color::White, "a7a8q").is_ok());
        assert!(long_algebraic_to_move(&state.position, Color::White, "a7a8n").is_err());
    }

    #[test]
    fn wrong_side_and_illegal_moves_are_errors() {
        let position = Position::standard();
        assert!(long_algebraic_to_move(&position, Color::White, "e7e5").is_err());
        assert!(long_algebraic_to_move(&position, Color::White, "e2e5").is_err());
        assert!(long_algebraic_to_move(&position, Color::White, "e2").is_err());
    }
}
