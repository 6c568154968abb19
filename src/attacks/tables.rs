//! Precomputed leaper attack tables and geometric ray tables.

use crate::bitboard::Bitboard;

const fn signum(x: i8) -> i8 {
    if x > 0 {
        1
    } else if x < 0 {
        -1
    } else {
        0
    }
}

const fn compute_knight_attacks() -> [Bitboard; 64] {
    let deltas: [(i8, i8); 8] = [
        (-2, -1), (-2, 1), (-1, -2), (-1, 2),
        (1, -2), (1, 2), (2, -1), (2, 1),
    ];

    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut bits = 0u64;
        let mut d = 0;
        while d < 8 {
            let r = rank + deltas[d].0;
            let f = file + deltas[d].1;
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                bits |= 1u64 << (r as usize * 8 + f as usize);
            }
            d += 1;
        }
        table[sq] = Bitboard::new(bits);
        sq += 1;
    }
    table
}

const fn compute_king_attacks() -> [Bitboard; 64] {
    let deltas: [(i8, i8); 8] = [
        (-1, -1), (-1, 0), (-1, 1),
        (0, -1),           (0, 1),
        (1, -1),  (1, 0),  (1, 1),
    ];

    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut bits = 0u64;
        let mut d = 0;
        while d < 8 {
            let r = rank + deltas[d].0;
            let f = file + deltas[d].1;
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                bits |= 1u64 << (r as usize * 8 + f as usize);
            }
            d += 1;
        }
        table[sq] = Bitboard::new(bits);
        sq += 1;
    }
    table
}

/// Compute pawn attack tables for both colors.
///
/// Index 0 = White, index 1 = Black. Square 0 is a8 here (see [`crate::square`]),
/// so White advances toward *decreasing* rank-from-top (rank/file deltas of
/// `(-1, ±1)`) while Black advances toward increasing rank-from-top
/// (`(1, ±1)`) — the opposite of a LERF (a1 = 0) board.
const fn compute_pawn_attacks() -> [[Bitboard; 64]; 2] {
    let white_deltas: [(i8, i8); 2] = [(-1, -1), (-1, 1)];
    let black_deltas: [(i8, i8); 2] = [(1, -1), (1, 1)];

    let mut table = [[Bitboard::EMPTY; 64]; 2];
    let mut sq = 0usize;
    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;

        let mut white_bits = 0u64;
        let mut d = 0;
        while d < 2 {
            let r = rank + white_deltas[d].0;
            let f = file + white_deltas[d].1;
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                white_bits |= 1u64 << (r as usize * 8 + f as usize);
            }
            d += 1;
        }
        table[0][sq] = Bitboard::new(white_bits);

        let mut black_bits = 0u64;
        let mut d = 0;
        while d < 2 {
            let r = rank + black_deltas[d].0;
            let f = file + black_deltas[d].1;
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                black_bits |= 1u64 << (r as usize * 8 + f as usize);
            }
            d += 1;
        }
        table[1][sq] = Bitboard::new(black_bits);

        sq += 1;
    }
    table
}

const fn compute_between() -> [[Bitboard; 64]; 64] {
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    let mut s1 = 0usize;
    while s1 < 64 {
        let mut s2 = 0usize;
        while s2 < 64 {
            if s1 != s2 {
                let r1 = (s1 / 8) as i8;
                let f1 = (s1 % 8) as i8;
                let r2 = (s2 / 8) as i8;
                let f2 = (s2 % 8) as i8;
                let raw_dr = r2 - r1;
                let raw_df = f2 - f1;
                let raw_dr_abs = if raw_dr < 0 { -raw_dr } else { raw_dr };
                let raw_df_abs = if raw_df < 0 { -raw_df } else { raw_df };
                let aligned = raw_dr == 0 || raw_df == 0 || (raw_dr_abs == raw_df_abs);
                if aligned {
                    let dr = signum(raw_dr);
                    let df = signum(raw_df);
                    let mut bits = 0u64;
                    let mut r = r1 + dr;
                    let mut f = f1 + df;
                    while (r != r2 || f != f2) && r >= 0 && r < 8 && f >= 0 && f < 8 {
                        bits |= 1u64 << (r as usize * 8 + f as usize);
                        r += dr;
                        f += df;
                    }
                    table[s1][s2] = Bitboard::new(bits);
                }
            }
            s2 += 1;
        }
        s1 += 1;
    }
    table
}

const fn compute_line() -> [[Bitboard; 64]; 64] {
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    let mut s1 = 0usize;
    while s1 < 64 {
        let mut s2 = 0usize;
        while s2 < 64 {
            if s1 != s2 {
                let r1 = (s1 / 8) as i8;
                let f1 = (s1 % 8) as i8;
                let r2 = (s2 / 8) as i8;
                let f2 = (s2 % 8) as i8;
                let raw_dr = r2 - r1;
                let raw_df = f2 - f1;
                let raw_dr_abs = if raw_dr < 0 { -raw_dr } else { raw_dr };
                let raw_df_abs = if raw_df < 0 { -raw_df } else { raw_df };
                let aligned = raw_dr == 0 || raw_df == 0 || (raw_dr_abs == raw_df_abs);
                if aligned {
                    let dr = signum(raw_dr);
                    let df = signum(raw_df);
                    let mut bits = 0u64;

                    let mut r = r1;
                    let mut f = f1;
                    while r >= 0 && r < 8 && f >= 0 && f < 8 {
                        bits |= 1u64 << (r as usize * 8 + f as usize);
                        r += dr;
                        f += df;
                    }

                    r = r1 - dr;
                    f = f1 - df;
                    while r >= 0 && r < 8 && f >= 0 && f < 8 {
                        bits |= 1u64 << (r as usize * 8 + f as usize);
                        r -= dr;
                        f -= df;
                    }

                    table[s1][s2] = Bitboard::new(bits);
                }
            }
            s2 += 1;
        }
        s1 += 1;
    }
    table
}

pub(crate) static KNIGHT_ATTACKS: [Bitboard; 64] = compute_knight_attacks();
pub(crate) static KING_ATTACKS: [Bitboard; 64] = compute_king_attacks();
pub(crate) static PAWN_ATTACKS: [[Bitboard; 64]; 2] = compute_pawn_attacks();
pub(crate) static BETWEEN: [[Bitboard; 64]; 64] = compute_between();
pub(crate) static LINE: [[Bitboard; 64]; 64] = compute_line();
