//! Negamax alpha-beta search, as specified: move ordering plus a fail-hard
//! beta cutoff, no transposition table, no iterative deepening.

use tracing::trace;

use crate::board::Board;
use crate::chess_move::Move;
use crate::movegen::{generate_legal_moves, refresh_game_state};

use super::eval::evaluate;
use super::ordering::order_moves;

/// Score magnitude large enough to dominate any material/PST sum while
/// staying far from overflow under negation, used as the search window's
/// outer bound.
pub const INF: i32 = 1_000_000;

/// Negamax alpha-beta search to `depth` plies, returning a score in
/// centipawns from the side-to-move's perspective.
///
/// Terminal positions (checkmate, stalemate) are detected by generating
/// moves and short-circuit to [`evaluate`] regardless of remaining depth,
/// since there is nothing left to search. `nodes` accumulates the number of
/// positions visited, for diagnostics.
pub fn negamax(board: &mut Board, depth: u32, mut alpha: i32, beta: i32, nodes: &mut u64) -> i32 {
    *nodes += 1;

    let mut moves = generate_legal_moves(board);
    if moves.is_empty() {
        refresh_game_state(board);
        return evaluate(board);
    }
    if depth == 0 {
        return evaluate(board);
    }

    order_moves(board, &mut moves);

    for mv in moves.as_slice() {
        let token = board.apply_move(*mv);
        let score = -negamax(board, depth - 1, -beta, -alpha, nodes);
        board.undo_move(token).expect("undo immediately follows its matching apply");

        if score >= beta {
            trace!(?mv, score, beta, "fail-hard beta cutoff");
            return beta;
        }
        alpha = alpha.max(score);
    }

    alpha
}

/// The outcome of a root-level search: the move to play plus its score.
///
/// `best_move` is `None` only when the position has no legal move at all
/// (checkmate or stalemate at the root).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub nodes: u64,
}

/// Search every root move to `depth` plies and return the best one.
///
/// Unlike interior nodes, the root keeps track of which move produced each
/// score rather than only the score itself — `negamax` alone cannot recover
/// that, since a fail-hard cutoff returns `beta` rather than the move that
/// produced it.
pub fn search_best_move(board: &mut Board, depth: u32) -> SearchResult {
    let mut moves = generate_legal_moves(board);
    let mut nodes = 1u64;

    if moves.is_empty() {
        refresh_game_state(board);
        return SearchResult { best_move: None, score: evaluate(board), nodes };
    }

    order_moves(board, &mut moves);

    let mut alpha = -INF;
    let beta = INF;
    let mut best_move = moves[0];
    let mut best_score = -INF;

    for mv in moves.as_slice() {
        let token = board.apply_move(*mv);
        let score = -negamax(board, depth.saturating_sub(1), -beta, -alpha, &mut nodes);
        board.undo_move(token).expect("undo immediately follows its matching apply");

        if score > best_score {
            best_score = score;
            best_move = *mv;
        }
        alpha = alpha.max(score);
    }

    tracing::debug!(depth, best_move = %best_move, score = best_score, nodes, "search complete");

    SearchResult { best_move: Some(best_move), score: best_score, nodes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::search::eval::LOSS_SCORE;

    #[test]
    fn depth_0_returns_static_eval() {
        let mut board = Board::starting_position();
        let mut nodes = 0u64;
        assert_eq!(negamax(&mut board, 0, -INF, INF, &mut nodes), 0);
        assert_eq!(nodes, 1);
    }

    #[test]
    fn search_leaves_board_unchanged() {
        let mut board = Board::starting_position();
        let before = board;
        search_best_move(&mut board, 2);
        assert_eq!(board, before);
    }

    #[test]
    fn search_finds_a_legal_move_from_startpos() {
        let mut board = Board::starting_position();
        let result = search_best_move(&mut board, 2);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn search_finds_mate_in_one() {
        // White to move: Qh5-f7 is checkmate (scholar's mate pattern).
        let mut board: Board = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4"
            .parse()
            .unwrap();
        let result = search_best_move(&mut board, 2);
        assert_eq!(result.best_move.map(|mv| mv.to_string()), Some("h5f7".to_string()));
        assert_eq!(result.score, -LOSS_SCORE);
    }

    #[test]
    fn stalemate_at_root_has_no_move_and_scores_zero() {
        let mut board: Board = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1".parse().unwrap();
        let result = search_best_move(&mut board, 3);
        assert!(result.best_move.is_none());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn checkmate_at_root_has_no_move_and_scores_loss() {
        let mut board: Board = "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1".parse().unwrap();
        let result = search_best_move(&mut board, 3);
        assert!(result.best_move.is_none());
        assert_eq!(result.score, LOSS_SCORE);
    }

    #[test]
    fn search_takes_a_free_queen() {
        // White pawn on e4 can capture the undefended black queen on d5.
        let mut board: Board = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let result = search_best_move(&mut board, 2);
        assert_eq!(result.best_move.map(|mv| mv.to_string()), Some("e4d5".to_string()));
    }
}
