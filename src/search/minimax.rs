//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Scores are always from `ai_color`'s point of view: the AI maximizes, its
//! opponent minimizes. Every child is searched on a copy of the parent
//! position, so the caller's position is never touched.

use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{has_any_legal_move, legal_moves_for_color};
use crate::search::board_scoring::{BoardScorer, PieceSquareScorer};
use crate::search::move_ordering::order_moves;

/// Base of the checkmate score; each ply of remaining depth adds
/// [`MATE_DEPTH_BONUS`] so faster mates score higher.
pub const MATE_SCORE: i32 = 100_000;
pub const MATE_DEPTH_BONUS: i32 = 100;
/// Window bound wider than any reachable score.
pub const INFINITY: i32 = 1_000_000_000;

/// Alpha-beta search over a private copy of the tree, counting visited nodes.
pub struct Minimax<'a, S: BoardScorer> {
    scorer: &'a S,
    ai_color: Color,
    pub nodes: u64,
}

impl<'a, S: BoardScorer> Minimax<'a, S> {
    pub fn new(scorer: &'a S, ai_color: Color) -> Self {
        Self {
            scorer,
            ai_color,
            nodes: 0,
        }
    }

    #[inline]
    pub fn ai_color(&self) -> Color {
        self.ai_color
    }

    pub fn search(
        &mut self,
        position: &Position,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;
        let side = if maximizing {
            self.ai_color
        } else {
            self.ai_color.opposite()
        };

        if depth == 0 {
            if !has_any_legal_move(position, side) {
                return self.terminal_score(position, side, depth, maximizing);
            }
            return self.scorer.score(&position.board, self.ai_color);
        }

        let mut moves = legal_moves_for_color(position, side);
        if moves.is_empty() {
            return self.terminal_score(position, side, depth, maximizing);
        }
        order_moves(&position.board, &mut moves);

        if maximizing {
            let mut best = -INFINITY;
            for mv in &moves {
                let mut child = *position;
                apply_move(&mut child, mv);
                let value = self.search(&child, depth - 1, alpha, beta, false);
                best = best.max(value);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = INFINITY;
            for mv in &moves {
                let mut child = *position;
                apply_move(&mut child, mv);
                let value = self.search(&child, depth - 1, alpha, beta, true);
                best = best.min(value);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// `side` has no legal move: mate if in check, otherwise stalemate.
    fn terminal_score(&self, position: &Position, side: Color, depth: u8, maximizing: bool) -> i32 {
        if !is_in_check(&position.board, side) {
            return 0;
        }
        let mate = MATE_SCORE + i32::from(depth) * MATE_DEPTH_BONUS;
        if maximizing {
            -mate
        } else {
            mate
        }
    }
}

/// Minimax value of `position` for `ai_color` using the default evaluator.
pub fn minimax(
    position: &Position,
    depth: u8,
    alpha: i32,
    beta: i32,
    maximizing: bool,
    ai_color: Color,
) -> i32 {
    Minimax::new(&PieceSquareScorer, ai_color).search(position, depth, alpha, beta, maximizing)
}

#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_SCORE
}

/// Plain minimax without pruning or ordering, for checking the pruned search.
#[cfg(test)]
pub(crate) fn unpruned_minimax(position: &Position, depth: u8, maximizing: bool, ai_color: Color) -> i32 {
    let side = if maximizing { ai_color } else { ai_color.opposite() };
    let moves = legal_moves_for_color(position, side);
    if moves.is_empty() {
        if !is_in_check(&position.board, side) {
            return 0;
        }
        let mate = MATE_SCORE + i32::from(depth) * MATE_DEPTH_BONUS;
        return if maximizing { -mate } else { mate };
    }
    if depth == 0 {
        return crate::search::board_scoring::evaluate(&position.board, ai_color);
    }
    let values = moves.iter().map(|mv| {
        let mut child = *position;
        apply_move(&mut child, mv);
        unpruned_minimax(&child, depth - 1, !maximizing, ai_color)
    });
    if maximizing {
        values.max().expect("non-empty move list")
    } else {
        values.min().expect("non-empty move list")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn pruning_does_not_change_the_value() {
        let cases = [
            (Position::standard(), 3, Color::White),
            (
                parse_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
                    .expect("FEN should parse")
                    .position,
                2,
                Color::White,
            ),
            (
                parse_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 b - - 0 1")
                    .expect("FEN should parse")
                    .position,
                3,
                Color::Black,
            ),
        ];
        for (position, depth, ai_color) in cases {
            assert_eq!(
                minimax(&position, depth, -INFINITY, INFINITY, true, ai_color),
                unpruned_minimax(&position, depth, true, ai_color),
                "depth {depth} for {ai_color}"
            );
        }
    }

    #[test]
    fn same_input_same_value() {
        let position = Position::standard();
        let first = minimax(&position, 3, -INFINITY, INFINITY, true, Color::Black);
        let second = minimax(&position, 3, -INFINITY, INFINITY, true, Color::Black);
        assert_eq!(first, second);
    }

    #[test]
    fn mated_side_scores_by_remaining_depth() {
        let mated = parse_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert_eq!(
            minimax(&mated.position, 2, -INFINITY, INFINITY, true, Color::Black),
            -(MATE_SCORE + 2 * MATE_DEPTH_BONUS)
        );
        assert_eq!(
            minimax(&mated.position, 2, -INFINITY, INFINITY, false, Color::White),
            MATE_SCORE + 2 * MATE_DEPTH_BONUS
        );
    }

    #[test]
    fn stalemate_scores_zero() {
        let stalemate = parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert_eq!(minimax(&stalemate.position, 3, -INFINITY, INFINITY, true, Color::Black), 0);
    }

    #[test]
    fn finds_a_back_rank_mate() {
        // White to move mates with Ra8; the mate is found one ply down.
        let state = parse_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").expect("FEN should parse");
        let value = minimax(&state.position, 2, -INFINITY, INFINITY, true, Color::White);
        assert!(is_mate_score(value));
        assert_eq!(value, MATE_SCORE + MATE_DEPTH_BONUS);
    }

    #[test]
    fn node_count_is_reported() {
        let mut search = Minimax::new(&PieceSquareScorer, Color::White);
        search.search(&Position::standard(), 1, -INFINITY, INFINITY, true);
        assert_eq!(search.nodes, 21);
    }
}
