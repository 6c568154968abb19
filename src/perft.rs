//! Perft (performance test) for move generation correctness verification.

use crate::board::Board;
use crate::chess_move::Move;
use crate::movegen::generate_legal_moves;

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number of
/// legal moves (bulk-counting: no recursive make/undo needed). Each recursive
/// call applies a move in place and undoes it before trying the next one,
/// rather than copying the board.
pub fn perft(board: &mut Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(board);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves.as_slice() {
        let token = board.apply_move(*mv);
        nodes += perft(board, depth - 1);
        board.undo_move(token).expect("undo immediately follows its matching apply");
    }
    nodes
}

/// Run perft with a per-move breakdown, sorted alphabetically by move text.
pub fn divide(board: &mut Board, depth: usize) -> Vec<(Move, u64)> {
    let moves = generate_legal_moves(board);
    let mut results: Vec<(Move, u64)> = moves
        .as_slice()
        .iter()
        .map(|mv| {
            let token = board.apply_move(*mv);
            let count = if depth <= 1 { 1 } else { perft(board, depth - 1) };
            board.undo_move(token).expect("undo immediately follows its matching apply");
            (*mv, count)
        })
        .collect();
    results.sort_by(|a, b| a.0.to_string().cmp(&b.0.to_string()));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    // --- Position 1: Starting position ---
    // rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1

    #[test]
    fn perft_startpos_depth_1() {
        let mut board = Board::starting_position();
        assert_eq!(perft(&mut board, 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        let mut board = Board::starting_position();
        assert_eq!(perft(&mut board, 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        let mut board = Board::starting_position();
        assert_eq!(perft(&mut board, 3), 8_902);
    }

    #[test]
    fn perft_startpos_depth_4() {
        let mut board = Board::starting_position();
        assert_eq!(perft(&mut board, 4), 197_281);
    }

    #[test]
    #[ignore] // slow
    fn perft_startpos_depth_5() {
        let mut board = Board::starting_position();
        assert_eq!(perft(&mut board, 5), 4_865_609);
    }

    // --- Position 2: Kiwipete ---
    // r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1

    fn kiwipete() -> Board {
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1".parse().unwrap()
    }

    #[test]
    fn perft_kiwipete_depth_1() {
        assert_eq!(perft(&mut kiwipete(), 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        assert_eq!(perft(&mut kiwipete(), 2), 2_039);
    }

    #[test]
    fn perft_kiwipete_depth_3() {
        assert_eq!(perft(&mut kiwipete(), 3), 97_862);
    }

    #[test]
    #[ignore] // slow
    fn perft_kiwipete_depth_4() {
        assert_eq!(perft(&mut kiwipete(), 4), 4_085_603);
    }

    // --- Position 3 ---
    // 8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1

    fn position3() -> Board {
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1".parse().unwrap()
    }

    #[test]
    fn perft_pos3_depth_1() {
        assert_eq!(perft(&mut position3(), 1), 14);
    }

    #[test]
    fn perft_pos3_depth_2() {
        assert_eq!(perft(&mut position3(), 2), 191);
    }

    #[test]
    fn perft_pos3_depth_3() {
        assert_eq!(perft(&mut position3(), 3), 2_812);
    }

    #[test]
    fn perft_pos3_depth_4() {
        assert_eq!(perft(&mut position3(), 4), 43_238);
    }

    // --- Position 4 ---
    // r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1

    fn position4() -> Board {
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1".parse().unwrap()
    }

    #[test]
    fn perft_pos4_depth_1() {
        assert_eq!(perft(&mut position4(), 1), 6);
    }

    #[test]
    fn perft_pos4_depth_2() {
        assert_eq!(perft(&mut position4(), 2), 264);
    }

    #[test]
    fn perft_pos4_depth_3() {
        assert_eq!(perft(&mut position4(), 3), 9_467);
    }

    #[test]
    fn perft_pos4_depth_4() {
        assert_eq!(perft(&mut position4(), 4), 422_333);
    }

    // --- Position 5 ---
    // rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8

    fn position5() -> Board {
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8".parse().unwrap()
    }

    #[test]
    fn perft_pos5_depth_1() {
        assert_eq!(perft(&mut position5(), 1), 44);
    }

    #[test]
    fn perft_pos5_depth_2() {
        assert_eq!(perft(&mut position5(), 2), 1_486);
    }

    #[test]
    fn perft_pos5_depth_3() {
        assert_eq!(perft(&mut position5(), 3), 62_379);
    }

    // --- divide ---

    #[test]
    fn divide_startpos_depth_1() {
        let mut board = Board::starting_position();
        let results = divide(&mut board, 1);
        assert_eq!(results.len(), 20);
        for (_, count) in &results {
            assert_eq!(*count, 1);
        }
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut board = Board::starting_position();
        let results = divide(&mut board, 3);
        let total: u64 = results.iter().map(|(_, c)| c).sum();
        assert_eq!(total, perft(&mut Board::starting_position(), 3));
    }

    #[test]
    fn perft_depth_0() {
        let mut board = Board::starting_position();
        assert_eq!(perft(&mut board, 0), 1);
    }

    #[test]
    fn perft_leaves_board_unchanged() {
        let mut board = Board::starting_position();
        let before = board;
        perft(&mut board, 3);
        assert_eq!(board, before);
    }
}
