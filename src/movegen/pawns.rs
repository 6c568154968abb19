//! Pawn move generation: pushes, captures, promotions, and en passant.

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::chess_move::{Move, PromotionPiece};
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

use super::MoveList;
use super::check::CheckType;

/// Per-color pawn geometry: the index delta of a single forward push, and
/// the starting rank pawns may push two squares from.
///
/// Square 0 is a8 (see [`crate::square`]), so White's forward direction is
/// *toward* decreasing index (`-8`) while Black's is toward increasing index
/// (`+8`) — the opposite of what a LERF (a1 = 0) board would use.
fn push_delta(color: Color) -> i32 {
    match color {
        Color::White => -8,
        Color::Black => 8,
    }
}

fn start_rank(color: Color) -> Rank {
    match color {
        Color::White => Rank::Rank2,
        Color::Black => Rank::Rank7,
    }
}

fn promotion_rank(color: Color) -> Rank {
    match color {
        Color::White => Rank::Rank8,
        Color::Black => Rank::Rank1,
    }
}

fn shifted(sq: Square, delta: i32) -> Square {
    Square::from_index((sq.index() as i32 + delta) as u8).expect("pawn push stays on board")
}

fn push_move_or_promotions(src: Square, dst: Square, color: Color, list: &mut MoveList) {
    if dst.rank() == promotion_rank(color) {
        for promo in PromotionPiece::ALL {
            list.push(Move::new_promotion(src, dst, promo));
        }
    } else {
        list.push(Move::new(src, dst, PieceKind::Pawn));
    }
}

/// Generate pawn moves for the side to move: single/double pushes,
/// diagonal captures, promotions, and en passant.
pub fn gen_pawns<T: CheckType>(board: &Board, king_sq: Square, pinned: Bitboard, check_mask: Bitboard, list: &mut MoveList) {
    let us = board.side_to_move();
    let them = !us;
    let occupied = board.occupied();
    let enemy = board.side(them);
    let delta = push_delta(us);

    for src in board.pieces(PieceKind::Pawn) & board.side(us) {
        let pin_line = if pinned.contains(src) { attacks::line(king_sq, src) } else { Bitboard::FULL };

        let single_dst = shifted(src, delta);
        if !board.is_occupied(single_dst) {
            if pin_line.contains(single_dst) && check_mask.contains(single_dst) {
                push_move_or_promotions(src, single_dst, us, list);
            }

            if src.rank() == start_rank(us) {
                let double_dst = shifted(src, delta * 2);
                if !board.is_occupied(double_dst) && pin_line.contains(double_dst) && check_mask.contains(double_dst) {
                    list.push(Move::new(src, double_dst, PieceKind::Pawn));
                }
            }
        }

        let mut capture_targets = attacks::pawn_attacks(us, src) & enemy;
        capture_targets &= pin_line;
        capture_targets &= check_mask;
        for dst in capture_targets {
            push_move_or_promotions(src, dst, us, list);
        }

        if let Some(ep_sq) = board.en_passant() {
            if attacks::pawn_attacks(us, src).contains(ep_sq) {
                gen_en_passant(board, src, ep_sq, king_sq, pin_line, check_mask, list);
            }
        }
    }
}

fn gen_en_passant(
    board: &Board,
    src: Square,
    ep_sq: Square,
    king_sq: Square,
    pin_line: Bitboard,
    check_mask: Bitboard,
    list: &mut MoveList,
) {
    let us = board.side_to_move();
    let them = !us;
    let delta = push_delta(us);
    let captured_sq = shifted(ep_sq, -delta);

    if !pin_line.contains(ep_sq) {
        return;
    }
    if !(check_mask.contains(ep_sq) || check_mask.contains(captured_sq)) {
        return;
    }

    // A horizontal en passant pin: capturing removes both the moving pawn
    // and the captured pawn from the same rank in one step, which a normal
    // pin scan (one piece removed at a time) never sees. Simulate the
    // resulting occupancy and check directly for a newly exposed rook/queen
    // attack on our own king.
    let after_occ = (board.occupied() ^ src.bitboard() ^ captured_sq.bitboard()) | ep_sq.bitboard();
    let their_orthogonal_sliders = (board.pieces(PieceKind::Rook) | board.pieces(PieceKind::Queen)) & board.side(them);
    if (attacks::rook_attacks(king_sq, after_occ) & their_orthogonal_sliders).is_nonempty() {
        return;
    }

    list.push(Move::new_en_passant(src, ep_sq));
}
