//! Attack generation: precomputed leaper tables plus on-the-fly sliding rays.
//!
//! Sliding attacks are walked on the fly rather than looked up via magic
//! bitboards. A single `perft` run on commodity hardware does not need the
//! memory/complexity tradeoff magic bitboards buy; see `DESIGN.md`.

mod tables;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::square::Square;

/// Return the knight attack set from a square.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    tables::KNIGHT_ATTACKS[sq.index()]
}

/// Return the king attack set from a square (one step in any direction).
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    tables::KING_ATTACKS[sq.index()]
}

/// Return the pawn capture set from a square, for the given color.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    tables::PAWN_ATTACKS[color.index()][sq.index()]
}

/// Squares strictly between two aligned squares (exclusive), or empty if the
/// squares are not on a shared rank, file, or diagonal.
#[inline]
pub fn between(a: Square, b: Square) -> Bitboard {
    tables::BETWEEN[a.index()][b.index()]
}

/// The full line through two aligned squares (both squares included,
/// extended to the board edges in both directions), or empty if unaligned.
#[inline]
pub fn line(a: Square, b: Square) -> Bitboard {
    tables::LINE[a.index()][b.index()]
}

const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

fn ray_attacks(sq: Square, occupied: Bitboard, dirs: &[(i8, i8); 4]) -> Bitboard {
    let rank = (sq.index() / 8) as i8;
    let file = (sq.index() % 8) as i8;
    let mut bits = 0u64;

    for &(dr, df) in dirs {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let target = Square::from_index((r * 8 + f) as u8).unwrap();
            bits |= target.bitboard().inner();
            if occupied.contains(target) {
                break;
            }
            r += dr;
            f += df;
        }
    }

    Bitboard::new(bits)
}

/// Return the rook attack set from a square given the current occupancy,
/// walked on the fly (not a magic bitboard lookup).
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, &ROOK_DIRS)
}

/// Return the bishop attack set from a square given the current occupancy,
/// walked on the fly (not a magic bitboard lookup).
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, &BISHOP_DIRS)
}

/// Return the queen attack set from a square given the current occupancy.
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_corner_attacks() {
        let attacks = knight_attacks(Square::A1);
        assert_eq!(attacks.count(), 2);
        assert!(attacks.contains(Square::B3));
        assert!(attacks.contains(Square::C2));
    }

    #[test]
    fn knight_center_attacks() {
        let attacks = knight_attacks(Square::E4);
        assert_eq!(attacks.count(), 8);
    }

    #[test]
    fn king_corner_attacks() {
        let attacks = king_attacks(Square::A1);
        assert_eq!(attacks.count(), 3);
        assert!(attacks.contains(Square::A2));
        assert!(attacks.contains(Square::B1));
        assert!(attacks.contains(Square::B2));
    }

    #[test]
    fn king_center_attacks() {
        assert_eq!(king_attacks(Square::E4).count(), 8);
    }

    #[test]
    fn pawn_attacks_white_from_e4() {
        let attacks = pawn_attacks(Color::White, Square::E4);
        assert_eq!(attacks.count(), 2);
        assert!(attacks.contains(Square::D5));
        assert!(attacks.contains(Square::F5));
    }

    #[test]
    fn pawn_attacks_black_from_e4() {
        let attacks = pawn_attacks(Color::Black, Square::E4);
        assert_eq!(attacks.count(), 2);
        assert!(attacks.contains(Square::D3));
        assert!(attacks.contains(Square::F3));
    }

    #[test]
    fn pawn_attacks_edge_file_have_one_target() {
        assert_eq!(pawn_attacks(Color::White, Square::A4).count(), 1);
        assert!(pawn_attacks(Color::White, Square::A4).contains(Square::B5));
        assert_eq!(pawn_attacks(Color::White, Square::H4).count(), 1);
        assert!(pawn_attacks(Color::White, Square::H4).contains(Square::G5));
    }

    #[test]
    fn rook_attacks_empty_board_from_center() {
        let attacks = rook_attacks(Square::D4, Bitboard::EMPTY);
        assert_eq!(attacks.count(), 14);
        assert!(attacks.contains(Square::D1));
        assert!(attacks.contains(Square::D8));
        assert!(attacks.contains(Square::A4));
        assert!(attacks.contains(Square::H4));
    }

    #[test]
    fn rook_attacks_blocked_includes_blocker_not_beyond() {
        let occupied = Square::D6.bitboard();
        let attacks = rook_attacks(Square::D4, occupied);
        assert!(attacks.contains(Square::D5));
        assert!(attacks.contains(Square::D6));
        assert!(!attacks.contains(Square::D7));
        assert!(!attacks.contains(Square::D8));
    }

    #[test]
    fn bishop_attacks_empty_board_from_center() {
        let attacks = bishop_attacks(Square::D4, Bitboard::EMPTY);
        assert_eq!(attacks.count(), 13);
        assert!(attacks.contains(Square::A1));
        assert!(attacks.contains(Square::G7));
    }

    #[test]
    fn bishop_attacks_blocked_includes_blocker_not_beyond() {
        let occupied = Square::F6.bitboard();
        let attacks = bishop_attacks(Square::D4, occupied);
        assert!(attacks.contains(Square::E5));
        assert!(attacks.contains(Square::F6));
        assert!(!attacks.contains(Square::G7));
    }

    #[test]
    fn queen_attacks_is_union_of_rook_and_bishop() {
        let occupied = Bitboard::EMPTY;
        let queen = queen_attacks(Square::D4, occupied);
        let rook = rook_attacks(Square::D4, occupied);
        let bishop = bishop_attacks(Square::D4, occupied);
        assert_eq!(queen, rook | bishop);
    }

    #[test]
    fn between_same_rank() {
        let bb = between(Square::A1, Square::H1);
        assert_eq!(bb.count(), 6);
        assert!(bb.contains(Square::D1));
        assert!(!bb.contains(Square::A1));
        assert!(!bb.contains(Square::H1));
    }

    #[test]
    fn between_unaligned_is_empty() {
        assert!(between(Square::A1, Square::B3).is_empty());
    }

    #[test]
    fn between_adjacent_is_empty() {
        assert!(between(Square::A1, Square::A2).is_empty());
    }

    #[test]
    fn line_includes_both_endpoints_and_extends_to_edges() {
        let bb = line(Square::D4, Square::D6);
        assert!(bb.contains(Square::D1));
        assert!(bb.contains(Square::D8));
        assert!(bb.contains(Square::D4));
        assert!(bb.contains(Square::D6));
        assert_eq!(bb.count(), 8);
    }

    #[test]
    fn line_diagonal() {
        let bb = line(Square::A1, Square::C3);
        assert!(bb.contains(Square::A1));
        assert!(bb.contains(Square::H8));
    }

    #[test]
    fn line_unaligned_is_empty() {
        assert!(line(Square::A1, Square::B3).is_empty());
    }
}
