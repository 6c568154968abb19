//! Knight move generation.

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::chess_move::Move;
use crate::piece_kind::PieceKind;

use super::MoveList;
use super::check::CheckType;

/// Generate knight moves for the side to move.
///
/// A pinned knight has zero legal moves: it can never stay on the pinning
/// line while also reaching a square a knight's jump can land on, so pinned
/// knights are skipped entirely rather than masked.
pub fn gen_knights<T: CheckType>(board: &Board, pinned: Bitboard, check_mask: Bitboard, list: &mut MoveList) {
    let us = board.side_to_move();
    let friendly = board.side(us);
    let knights = board.pieces(PieceKind::Knight) & friendly;

    for src in knights {
        if pinned.contains(src) {
            continue;
        }

        let targets = attacks::knight_attacks(src) & !friendly & check_mask;
        for dst in targets {
            list.push(Move::new(src, dst, PieceKind::Knight));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::gen_knights;
    use crate::bitboard::Bitboard;
    use crate::board::Board;
    use crate::movegen::MoveList;
    use crate::movegen::check::NotInCheck;

    #[test]
    fn knight_on_empty_board_has_8_moves() {
        let board: Board = "4k3/8/8/3N4/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let mut list = MoveList::new();
        gen_knights::<NotInCheck>(&board, Bitboard::EMPTY, Bitboard::FULL, &mut list);
        assert_eq!(list.len(), 8);
    }

    #[test]
    fn pinned_knight_has_zero_moves() {
        let board: Board = "4k3/8/8/b7/8/8/3N4/4K3 w - - 0 1".parse().unwrap();
        let pinned = Bitboard::EMPTY.with(crate::square::Square::D2);
        let mut list = MoveList::new();
        gen_knights::<NotInCheck>(&board, pinned, Bitboard::FULL, &mut list);
        assert!(list.is_empty());
    }
}
