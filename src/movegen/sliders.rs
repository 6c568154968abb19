//! Bishop, rook, and queen move generation.

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::chess_move::Move;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::MoveList;
use super::check::CheckType;

fn gen_slider_type(
    board: &Board,
    kind: PieceKind,
    pinned: Bitboard,
    check_mask: Bitboard,
    attacks_fn: impl Fn(Square, Bitboard) -> Bitboard,
    list: &mut MoveList,
) {
    let us = board.side_to_move();
    let king_sq = board.king_square(us);
    let friendly = board.side(us);
    let occupied = board.occupied();
    let pieces = board.pieces(kind) & friendly;

    for src in pieces {
        let mut targets = attacks_fn(src, occupied) & !friendly & check_mask;

        if pinned.contains(src) {
            targets &= attacks::line(king_sq, src);
        }

        for dst in targets {
            list.push(Move::new(src, dst, kind));
        }
    }
}

/// Generate bishop, rook, and queen moves for the side to move.
///
/// A pinned slider may still move, but only along the line connecting it to
/// its own king (the pinning slider's line), never off of it.
pub fn gen_sliders<T: CheckType>(board: &Board, pinned: Bitboard, check_mask: Bitboard, list: &mut MoveList) {
    gen_slider_type(board, PieceKind::Bishop, pinned, check_mask, attacks::bishop_attacks, list);
    gen_slider_type(board, PieceKind::Rook, pinned, check_mask, attacks::rook_attacks, list);
    gen_slider_type(board, PieceKind::Queen, pinned, check_mask, attacks::queen_attacks, list);
}
