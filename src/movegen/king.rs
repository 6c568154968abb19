//! King move generation, including castling.

use crate::attacks;
use crate::board::Board;
use crate::castle_rights::{CastleSide, castle_move};
use crate::chess_move::Move;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::{is_attacked, MoveList};
use super::check::CheckType;

/// Generate king moves for the side to move, including castling.
///
/// Castling is skipped entirely while in check (`T::IN_CHECK`): a king may
/// never castle out of check, so there is no need to even test the rook
/// paths in that case.
pub fn gen_king<T: CheckType>(board: &Board, king_sq: Square, list: &mut MoveList) {
    let us = board.side_to_move();
    let them = !us;
    let friendly = board.side(us);

    // The king is "transparent" to sliding attacks for the purpose of
    // checking destination squares: otherwise a king retreating directly
    // away from a checking rook/bishop/queen would look safe, because the
    // king's own square was still blocking the attack.
    let occupied_without_king = board.occupied() ^ king_sq.bitboard();

    let targets = attacks::king_attacks(king_sq) & !friendly;
    for dst in targets {
        if !is_attacked(board, dst, them, occupied_without_king) {
            list.push(Move::new(king_sq, dst, PieceKind::King));
        }
    }

    if !T::IN_CHECK {
        for side in [CastleSide::KingSide, CastleSide::QueenSide] {
            if !board.castling().has(us, side) {
                continue;
            }

            let cm = castle_move(us, side);
            let path_clear = (cm.empty_mask & board.occupied()).is_empty();
            if !path_clear {
                continue;
            }

            let king_safe = cm.safe_mask.into_iter().all(|sq| !is_attacked(board, sq, them, board.occupied()));
            if !king_safe {
                continue;
            }

            list.push(Move::new_castle(cm.king_from, cm.king_to));
        }
    }
}
