use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput, SearchParams};
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::legal_moves_for_color;
use crate::search::board_scoring::{BoardScorer, PieceSquareScorer};
use crate::search::minimax::{is_mate_score, Minimax, INFINITY};
use crate::search::move_ordering::order_moves;

/// Subtracted from a root move that undoes the engine's previous move.
pub const REPETITION_PENALTY: i32 = 300;

/// Fixed-depth alpha-beta engine playing the side to move.
pub struct MinimaxEngine<S: BoardScorer = PieceSquareScorer> {
    scorer: S,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::with_scorer(PieceSquareScorer)
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BoardScorer> MinimaxEngine<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }
}

impl<S: BoardScorer> Engine for MinimaxEngine<S> {
    fn name(&self) -> &str {
        "Plum Duel Minimax"
    }

    fn choose_move(&mut self, game_state: &GameState, params: &SearchParams) -> EngineOutput {
        let ai_color = game_state.side_to_move;
        let depth = params
            .depth
            .unwrap_or(game_state.settings.difficulty.search_depth())
            .max(1);

        let mut out = EngineOutput::default();
        let mut moves = legal_moves_for_color(&game_state.position, ai_color);
        out.info_lines.push(format!(
            "info string minimax_engine legal_moves {}",
            moves.len()
        ));
        if moves.is_empty() {
            return out;
        }
        order_moves(&game_state.position.board, &mut moves);

        let previous = game_state.last_move_by(ai_color).map(|record| record.mv);
        let mut search = Minimax::new(&self.scorer, ai_color);
        let mut best: Option<(Move, i32)> = None;

        for mv in &moves {
            let mut child = game_state.position;
            apply_move(&mut child, mv);
            let mut value = search.search(&child, depth - 1, -INFINITY, INFINITY, false);
            if previous.is_some_and(|prev| mv.reverses(&prev)) {
                value -= REPETITION_PENALTY;
            }
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((*mv, value));
            }
        }

        if let Some((mv, value)) = best {
            debug!(
                color = %ai_color,
                depth,
                mv = %mv,
                value,
                nodes = search.nodes,
                "minimax move chosen"
            );
            out.best_move = Some(mv);
            out.score = Some(value);
            out.info_lines.push(format!(
                "info depth {depth} score cp {value} nodes {} pv {mv}",
                search.nodes
            ));
            if is_mate_score(value) {
                out.info_lines
                    .push("info string minimax_engine forced_mate_found".to_owned());
            }
        }
        out.nodes = search.nodes;
        out
    }
}

/// The game's move choice for the side to move, searched at the depth the
/// game's difficulty sets.
pub fn choose_move(game_state: &GameState) -> Option<Move> {
    MinimaxEngine::new()
        .choose_move(game_state, &SearchParams::default())
        .best_move
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::*;
    use crate::game_state::move_record::MoveRecord;
    use crate::game_state::settings::{Difficulty, GameMode, GameSettings};
    use crate::utils::fen_parser::{parse_fen, parse_fen_with_settings};
    use crate::search::minimax::unpruned_minimax;
    use crate::utils::long_algebraic::{long_algebraic_to_move, move_to_long_algebraic};

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("square on board")
    }

    #[test]
    fn easy_reply_to_e4_is_legal() {
        let mut state = GameState::new(GameSettings::new(GameMode::HumanVsComputer, Difficulty::Easy));
        state
            .apply_move(Move::new(sq(6, 4), sq(4, 4)))
            .expect("e2e4 is legal");

        let mv = choose_move(&state).expect("black has moves");
        assert!(state.legal_moves_from(mv.from).contains(&mv));
        assert_eq!(
            state.board().piece_at(mv.from).map(|piece| piece.color),
            Some(Color::Black)
        );
    }

    #[test]
    fn choice_is_deterministic() {
        let state = parse_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 3 3")
            .expect("FEN should parse");
        assert_eq!(choose_move(&state), choose_move(&state));
    }

    #[test]
    fn takes_a_mate_in_one() {
        let settings = GameSettings::new(GameMode::HumanVsComputer, Difficulty::Easy);
        let state = parse_fen_with_settings("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1", settings)
            .expect("FEN should parse");
        let mv = choose_move(&state).expect("black has moves");
        assert_eq!(move_to_long_algebraic(&mv), "a8a1");
    }

    #[test]
    fn reversal_penalty_is_additive() {
        // h8g8 is black's only legal move, and it undoes g8h8.
        let settings = GameSettings::new(GameMode::HumanVsComputer, Difficulty::Easy);
        let plain = parse_fen_with_settings("7k/R7/8/8/8/8/8/K7 b - - 0 1", settings)
            .expect("FEN should parse");
        let mut with_history = plain.clone();
        with_history.history.push(MoveRecord {
            mv: Move::new(sq(0, 6), sq(0, 7)),
            piece: Piece::new(PieceKind::King, Color::Black),
            captured: None,
            promoted: false,
        });

        let mut engine = MinimaxEngine::new();
        let base = engine.choose_move(&plain, &SearchParams::default());
        let penalised = engine.choose_move(&with_history, &SearchParams::default());

        assert_eq!(base.best_move, Some(Move::new(sq(0, 7), sq(0, 6))));
        assert_eq!(penalised.best_move, base.best_move);
        assert_eq!(
            penalised.score.expect("a move was scored"),
            base.score.expect("a move was scored") - REPETITION_PENALTY
        );
    }

    #[test]
    fn no_legal_move_means_no_choice() {
        let mated = parse_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert_eq!(choose_move(&mated), None);
    }

    /// Unpruned root loop with the same reversal adjustment as the engine.
    fn unpruned_root(state: &GameState, depth: u8) -> Vec<(Move, i32)> {
        let ai_color = state.side_to_move;
        let previous = state.last_move_by(ai_color).map(|record| record.mv);
        legal_moves_for_color(&state.position, ai_color)
            .into_iter()
            .map(|mv| {
                let mut child = state.position;
                apply_move(&mut child, &mv);
                let mut value = unpruned_minimax(&child, depth - 1, false, ai_color);
                if previous.is_some_and(|prev| mv.reverses(&prev)) {
                    value -= REPETITION_PENALTY;
                }
                (mv, value)
            })
            .collect()
    }

    #[test]
    fn pruned_choice_matches_unpruned_root_search() {
        // Black's knight can go back to g8, undoing its previous move.
        let mut knights = GameState::new_game();
        for lan in ["g1f3", "g8f6", "f3g1"] {
            let mv = long_algebraic_to_move(&knights.position, knights.side_to_move, lan)
                .expect("move should parse");
            knights.apply_move(mv).expect("move should be legal");
        }
        let italian = parse_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3")
            .expect("FEN should parse");

        for (state, depth) in [(&knights, 2), (&knights, 3), (&italian, 2)] {
            let output = MinimaxEngine::new().choose_move(state, &SearchParams { depth: Some(depth) });
            let chosen = output.best_move.expect("black has moves");
            let score = output.score.expect("a move was scored");

            let roots = unpruned_root(state, depth);
            let best = roots
                .iter()
                .map(|(_, value)| *value)
                .max()
                .expect("black has moves");
            assert_eq!(score, best, "depth {depth}");
            assert!(
                roots.contains(&(chosen, best)),
                "{chosen} should carry the best value at depth {depth}"
            );
        }
    }
}
