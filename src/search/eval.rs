//! Static position evaluation: material plus piece-square-table bonus.

use crate::board::{Board, GameState};
use crate::color::Color;
use crate::piece_kind::PieceKind;

use super::pst;

/// Centipawn value of each piece kind, indexed by [`PieceKind::index`].
pub const PIECE_VALUES: [i32; PieceKind::COUNT] = [100, 300, 320, 500, 900, 0];

/// Score large enough to dominate any material/PST sum, used as the
/// fail-hard bound for a side that has lost.
pub const LOSS_SCORE: i32 = -30_000;

/// Evaluate `board` from the side-to-move's perspective, in centipawns.
///
/// `game_state` must already reflect whether the side to move has any legal
/// moves (this function does not call `generate_legal_moves` itself): a
/// checkmated or stalemated side returns [`LOSS_SCORE`] or `0` respectively,
/// regardless of material on the board.
pub fn evaluate(board: &Board) -> i32 {
    let us = board.side_to_move();
    match board.game_state() {
        GameState::WhiteWins => return if us == Color::White { -LOSS_SCORE } else { LOSS_SCORE },
        GameState::BlackWins => return if us == Color::Black { -LOSS_SCORE } else { LOSS_SCORE },
        GameState::Draw => return 0,
        GameState::Playing => {}
    }

    let them = !us;
    let mut score = 0i32;

    for kind in PieceKind::ALL {
        let value = PIECE_VALUES[kind.index()];
        let ours = board.pieces(kind) & board.side(us);
        let theirs = board.pieces(kind) & board.side(them);
        score += ours.count() as i32 * value;
        score -= theirs.count() as i32 * value;

        for sq in ours {
            score += pst::value(kind, us, sq);
        }
        for sq in theirs {
            score -= pst::value(kind, them, sq);
        }
    }

    score
}
