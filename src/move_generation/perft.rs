//! Move-path enumeration for validating the generator against known counts.

use std::thread;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{has_any_legal_move, legal_moves_for_color};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(position: &Position, side_to_move: Color, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return total;
    }
    for mv in legal_moves_for_color(position, side_to_move) {
        perft_recurse(position, side_to_move, &mv, depth, 1, &mut total);
    }
    total
}

/// Same counts as [`perft`], one worker thread per root move.
pub fn perft_multi_threaded(position: &Position, side_to_move: Color, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(perft(position, side_to_move, 0));
    }

    let root_moves = legal_moves_for_color(position, side_to_move);
    let mut handles = Vec::with_capacity(root_moves.len());
    for mv in root_moves {
        let root = *position;
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            perft_recurse(&root, side_to_move, &mv, depth, 1, &mut local);
            local
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle.join().map_err(|_| ChessError::SearchWorkerLost)?;
        total.merge(local);
    }
    Ok(total)
}

fn perft_recurse(
    position: &Position,
    mover: Color,
    mv: &Move,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    let mut next = *position;
    let applied = apply_move(&mut next, mv);
    let opponent = mover.opposite();

    if current_depth == search_depth {
        counts.nodes += 1;
        if applied.captured.is_some() {
            counts.captures += 1;
        }
        if mv.is_en_passant() {
            counts.en_passant += 1;
        }
        if mv.castle_side().is_some() {
            counts.castles += 1;
        }
        if applied.promoted {
            counts.promotions += 1;
        }
        if is_in_check(&next.board, opponent) {
            counts.checks += 1;
            if !has_any_legal_move(&next, opponent) {
                counts.checkmates += 1;
            }
        }
        return;
    }

    for child in legal_moves_for_color(&next, opponent) {
        perft_recurse(&next, opponent, &child, search_depth, current_depth + 1, counts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let counts = perft(&Position::standard(), Color::White, 0);
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn start_position_node_counts_match_reference() {
        let state = parse_fen(STARTING_POSITION_FEN).expect("FEN should parse");
        let side = state.side_to_move;
        assert_eq!(perft(&state.position, side, 1).nodes, 20);
        assert_eq!(perft(&state.position, side, 2).nodes, 400);

        let depth3 = perft(&state.position, side, 3);
        assert_eq!(depth3.nodes, 8902);
        assert_eq!(depth3.captures, 34);
        assert_eq!(depth3.checks, 12);
    }

    #[test]
    fn kiwipete_exercises_castling_and_en_passant() {
        let state = parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        assert_eq!(perft(&state.position, state.side_to_move, 1).nodes, 48);

        let depth2 = perft(&state.position, state.side_to_move, 2);
        assert_eq!(depth2.nodes, 2039);
        assert_eq!(depth2.captures, 351);
        assert_eq!(depth2.en_passant, 1);
        assert_eq!(depth2.castles, 91);
        assert_eq!(depth2.checks, 3);
    }

    #[test]
    fn rook_endgame_counts_include_discovered_checks() {
        let state = parse_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").expect("FEN should parse");
        let depth3 = perft(&state.position, state.side_to_move, 3);
        assert_eq!(depth3.nodes, 2812);
        assert_eq!(depth3.en_passant, 2);
        assert_eq!(depth3.checks, 267);
    }

    #[test]
    fn multi_threaded_perft_matches_single_threaded() {
        let position = Position::standard();
        let single = perft(&position, Color::White, 2);
        let multi = perft_multi_threaded(&position, Color::White, 2).expect("workers should finish");
        assert_eq!(single, multi);
    }
}
