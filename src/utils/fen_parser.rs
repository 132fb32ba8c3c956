//! FEN-to-GameState parser.
//!
//! Used for test fixtures, benchmarks and the CLI `--fen` option. Castling
//! letters become rights with untouched king/rook history; the halfmove and
//! fullmove fields are accepted but not tracked.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::castling::CastlingState;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::position::Position;
use crate::game_state::settings::GameSettings;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::utils::algebraic::algebraic_to_square;

fn invalid(message: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(message.into())
}

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    parse_fen_with_settings(fen, GameSettings::default())
}

pub fn parse_fen_with_settings(fen: &str, settings: GameSettings) -> ChessResult<GameState> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if !(4..=6).contains(&fields.len()) {
        return Err(invalid(format!(
            "expected 4 to 6 fields, found {}",
            fields.len()
        )));
    }

    let board = parse_board(fields[0])?;
    let side_to_move = parse_side_to_move(fields[1])?;
    let castling = parse_castling_rights(fields[2])?;
    let en_passant_target = parse_en_passant_square(fields[3])?;

    for field in &fields[4..] {
        field
            .parse::<u16>()
            .map_err(|_| invalid(format!("invalid move counter '{field}'")))?;
    }

    // The side that just moved cannot have left its own king attacked.
    if is_in_check(&board, side_to_move.opposite()) {
        return Err(invalid(format!(
            "{} is in check but it is {side_to_move} to move",
            side_to_move.opposite()
        )));
    }

    let position = Position {
        board,
        castling,
        en_passant_target,
    };
    Ok(GameState::from_position(position, side_to_move, settings))
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut board = Board::empty();
    // FEN lists rank 8 first, which is row 0 here.
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                col += empty_count as u8;
                if col > 8 {
                    return Err(invalid("board rank has too many files"));
                }
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;
            let square = Square::new(row as u8, col)
                .ok_or_else(|| invalid("board rank has too many files"))?;
            board.set(square, Some(piece));
            col += 1;
        }

        if col != 8 {
            return Err(invalid("board rank does not sum to 8 files"));
        }
    }

    for color in [Color::White, Color::Black] {
        let kings = board
            .pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .count();
        if kings != 1 {
            return Err(invalid(format!("{color} must have exactly one king, found {kings}")));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("invalid side-to-move field '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingState> {
    let mut castling = CastlingState::no_rights();
    if castling_part == "-" {
        return Ok(castling);
    }

    for ch in castling_part.chars() {
        let (color, side) = match ch {
            'K' => (Color::White, CastleSide::KingSide),
            'Q' => (Color::White, CastleSide::QueenSide),
            'k' => (Color::Black, CastleSide::KingSide),
            'q' => (Color::Black, CastleSide::QueenSide),
            _ => return Err(invalid(format!("invalid castling character '{ch}'"))),
        };
        castling.rights[color.index()][side.index()] = true;
    }

    Ok(castling)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(|_| invalid(format!("invalid en-passant square '{en_passant_part}'")))
}

pub(crate) fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(kind, color))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;

    #[test]
    fn starting_fen_matches_the_built_in_layout() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(parsed, GameState::new_game());
    }

    #[test]
    fn en_passant_and_partial_castling_fields() {
        let state = parse_fen("r3k3/8/8/3pP3/8/8/8/4K2R w Kq d6 0 1").expect("FEN should parse");
        assert_eq!(state.position.en_passant_target, Some(Square { row: 2, col: 3 }));
        assert!(state.position.castling.may_castle(Color::White, CastleSide::KingSide));
        assert!(!state.position.castling.may_castle(Color::White, CastleSide::QueenSide));
        assert!(state.position.castling.may_castle(Color::Black, CastleSide::QueenSide));
        assert!(!state.position.castling.may_castle(Color::Black, CastleSide::KingSide));
    }

    #[test]
    fn status_is_derived_from_the_position() {
        let state = parse_fen("7k/6Q1/6K1/8/8/8/8/8 b - -").expect("FEN should parse");
        assert_eq!(state.side_to_move, Color::Black);
        assert_eq!(state.status, GameStatus::Checkmate);
    }

    #[test]
    fn malformed_fens_are_rejected() {
        for fen in [
            "",
            "8/8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1",
            "4k3/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w KX - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - z9 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - zero 1",
            // Black is in check with white to move.
            "4k3/8/8/8/8/8/8/4RK2 w - - 0 1",
        ] {
            assert!(
                matches!(parse_fen(fen), Err(ChessError::InvalidFen(_))),
                "{fen:?} should be rejected"
            );
        }
    }

    #[test]
    fn king_left_in_check_by_the_previous_move_is_rejected() {
        let err = parse_fen("4k3/8/8/8/8/8/8/4RK2 w - - 0 1").expect_err("black king is attacked");
        assert!(matches!(err, ChessError::InvalidFen(ref msg) if msg.contains("black is in check")));

        // The same board with black to move is an ordinary check.
        let state = parse_fen("4k3/8/8/8/8/8/8/4RK2 b - - 0 1").expect("FEN should parse");
        assert_eq!(state.status, GameStatus::Check);
    }
}
