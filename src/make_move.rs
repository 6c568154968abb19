//! In-place move application via an ordered change log, and its inverse.
//!
//! Unlike the teacher's `make_move(&self) -> Board`, which builds a fresh
//! board per call, this mutates `Board` directly and returns an `UndoToken`
//! recording exactly what changed. `undo_move` replays that log backward.
//! There is no board snapshotting anywhere in this crate.

use crate::board::Board;
use crate::castle_rights::{CastleRights, CastleSide, castle_move};
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::error::MoveError;
use crate::file::File;
use crate::movegen::generate_legal_moves;
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

/// A single recorded change to board state outside the piece placement
/// itself (which `UndoToken::captured` and the move already describe).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeLogEntry {
    /// The previous en passant target square, cleared by this move.
    DisabledEnPassant(Square),
    /// A pawn double push set a new en passant target at this square.
    PawnTwo(Square),
    /// An en passant capture removed the pawn on this square (not the
    /// move's destination square).
    EnPassant(Square),
    /// A pawn promoted to this piece kind.
    Promotion(PieceKind),
    /// Castling rights revoked by this move, one flag per right.
    Revoke { white_king: bool, white_queen: bool, black_king: bool, black_queen: bool },
    /// A castling move, identified by color and side (the board.py-derived
    /// `K`/`Q`/`k`/`q` state changes).
    Castle { color: Color, side: CastleSide },
}

const MAX_CHANGES: usize = 4;

/// A small fixed-capacity log, avoiding a heap allocation per move.
#[derive(Clone, Copy)]
struct ChangeLog {
    entries: [Option<ChangeLogEntry>; MAX_CHANGES],
    len: usize,
}

impl ChangeLog {
    fn new() -> ChangeLog {
        ChangeLog { entries: [None; MAX_CHANGES], len: 0 }
    }

    fn push(&mut self, entry: ChangeLogEntry) {
        debug_assert!(self.len < MAX_CHANGES, "change log overflow");
        self.entries[self.len] = Some(entry);
        self.len += 1;
    }

    fn iter(&self) -> impl Iterator<Item = &ChangeLogEntry> {
        self.entries[..self.len].iter().filter_map(|e| e.as_ref())
    }
}

/// Everything needed to reverse one `make_move`/`apply_move` call.
///
/// Opaque to callers: constructed only by this module, consumed only by
/// [`Board::undo_move`].
#[derive(Clone, Copy)]
pub struct UndoToken {
    mv: Move,
    captured: Option<PieceKind>,
    changes: ChangeLog,
    seq: u64,
}

/// Per-square castling rights revoked when a piece moves to or from it —
/// the king's home square revokes both rights for its color, each rook's
/// home square revokes the one right it guards.
const fn castle_rights_revoke(sq: Square) -> CastleRights {
    match sq.index() {
        i if i == Square::A1.index() => CastleRights::WHITE_QUEEN,
        i if i == Square::E1.index() => CastleRights::WHITE_BOTH,
        i if i == Square::H1.index() => CastleRights::WHITE_KING,
        i if i == Square::A8.index() => CastleRights::BLACK_QUEEN,
        i if i == Square::E8.index() => CastleRights::BLACK_BOTH,
        i if i == Square::H8.index() => CastleRights::BLACK_KING,
        _ => CastleRights::NONE,
    }
}

/// White advances toward decreasing square index, Black toward increasing —
/// see [`crate::square`] for why this is the opposite of a LERF board.
fn push_delta(color: Color) -> i32 {
    match color {
        Color::White => -8,
        Color::Black => 8,
    }
}

fn shifted(sq: Square, delta: i32) -> Square {
    Square::from_index((sq.index() as i32 + delta) as u8).expect("shift stays on board")
}

impl Board {
    /// Validate and apply a move, returning a token that reverses it.
    ///
    /// Returns [`MoveError::PromotionRequired`] if a pawn move to the last
    /// rank was submitted as a plain move instead of a promotion, and
    /// [`MoveError::IllegalMove`] if the move is not a member of the current
    /// legal move set. The board is left unmodified on either error.
    pub fn make_move(&mut self, mv: Move) -> Result<UndoToken, MoveError> {
        if mv.kind() == MoveKind::Normal && mv.piece_kind() == PieceKind::Pawn {
            let promotion_rank = match self.side_to_move() {
                Color::White => Rank::Rank8,
                Color::Black => Rank::Rank1,
            };
            if mv.dest().rank() == promotion_rank {
                return Err(MoveError::PromotionRequired(mv));
            }
        }

        if !generate_legal_moves(self).as_slice().contains(&mv) {
            return Err(MoveError::IllegalMove(mv));
        }

        Ok(self.apply_move(mv))
    }

    /// Apply a move without validating legality.
    ///
    /// Used by `perft` and the search driver, which only ever apply moves
    /// taken directly from `generate_legal_moves`, where re-validating on
    /// every node would be pure overhead.
    pub(crate) fn apply_move(&mut self, mv: Move) -> UndoToken {
        let us = self.side_to_move();
        let them = !us;
        let src = mv.source();
        let dst = mv.dest();
        let piece_kind = mv.piece_kind();

        let mut changes = ChangeLog::new();

        if let Some(prev_ep) = self.en_passant() {
            changes.push(ChangeLogEntry::DisabledEnPassant(prev_ep));
        }

        let captured = match mv.kind() {
            MoveKind::EnPassant | MoveKind::Castling => None,
            MoveKind::Normal | MoveKind::Promotion => self.piece_on(dst),
        };

        match mv.kind() {
            MoveKind::Castling => {
                let side = if dst.file() == File::FileG { CastleSide::KingSide } else { CastleSide::QueenSide };
                let cm = castle_move(us, side);
                self.toggle_piece(cm.king_from, PieceKind::King, us);
                self.toggle_piece(cm.king_to, PieceKind::King, us);
                self.toggle_piece(cm.rook_from, PieceKind::Rook, us);
                self.toggle_piece(cm.rook_to, PieceKind::Rook, us);
                changes.push(ChangeLogEntry::Castle { color: us, side });
            }
            MoveKind::EnPassant => {
                let captured_sq = shifted(dst, -push_delta(us));
                self.toggle_piece(src, PieceKind::Pawn, us);
                self.toggle_piece(dst, PieceKind::Pawn, us);
                self.toggle_piece(captured_sq, PieceKind::Pawn, them);
                changes.push(ChangeLogEntry::EnPassant(captured_sq));
            }
            MoveKind::Promotion => {
                if let Some(cap_kind) = captured {
                    self.toggle_piece(dst, cap_kind, them);
                }
                self.toggle_piece(src, PieceKind::Pawn, us);
                let promo_kind = mv.promotion_piece().to_piece_kind();
                self.toggle_piece(dst, promo_kind, us);
                changes.push(ChangeLogEntry::Promotion(promo_kind));
            }
            MoveKind::Normal => {
                if let Some(cap_kind) = captured {
                    self.toggle_piece(dst, cap_kind, them);
                }
                self.toggle_piece(src, piece_kind, us);
                self.toggle_piece(dst, piece_kind, us);
            }
        }

        let is_double_push =
            piece_kind == PieceKind::Pawn && mv.kind() == MoveKind::Normal && src.index().abs_diff(dst.index()) == 16;
        let new_en_passant = if is_double_push { Some(shifted(src, push_delta(us))) } else { None };
        self.set_en_passant(new_en_passant);
        if let Some(sq) = new_en_passant {
            changes.push(ChangeLogEntry::PawnTwo(sq));
        }

        let touched = castle_rights_revoke(src).insert(castle_rights_revoke(dst));
        let actually_revoked = self.castling() & touched;
        if !actually_revoked.is_empty() {
            self.set_castling(self.castling().remove(actually_revoked));
            changes.push(ChangeLogEntry::Revoke {
                white_king: actually_revoked.contains(CastleRights::WHITE_KING),
                white_queen: actually_revoked.contains(CastleRights::WHITE_QUEEN),
                black_king: actually_revoked.contains(CastleRights::BLACK_KING),
                black_queen: actually_revoked.contains(CastleRights::BLACK_QUEEN),
            });
        }

        self.set_side_to_move(them);
        let seq = self.advance_move_seq();
        self.debug_check_invariants();

        UndoToken { mv, captured, changes, seq }
    }

    /// Reverse a previously applied move.
    ///
    /// Returns [`MoveError::InvalidUndo`] if `token` is not for the move
    /// currently on top of the (implicit, one-deep) undo stack — that is,
    /// if any other move has been made or undone since `token` was issued.
    pub fn undo_move(&mut self, token: UndoToken) -> Result<(), MoveError> {
        if self.move_seq() != token.seq {
            return Err(MoveError::InvalidUndo);
        }

        let them = self.side_to_move();
        let us = !them;
        let mv = token.mv;
        let src = mv.source();
        let dst = mv.dest();

        match mv.kind() {
            MoveKind::Castling => {
                let side = if dst.file() == File::FileG { CastleSide::KingSide } else { CastleSide::QueenSide };
                let cm = castle_move(us, side);
                self.toggle_piece(cm.rook_to, PieceKind::Rook, us);
                self.toggle_piece(cm.rook_from, PieceKind::Rook, us);
                self.toggle_piece(cm.king_to, PieceKind::King, us);
                self.toggle_piece(cm.king_from, PieceKind::King, us);
            }
            MoveKind::EnPassant => {
                let captured_sq = token
                    .changes
                    .iter()
                    .find_map(|c| match c {
                        ChangeLogEntry::EnPassant(sq) => Some(*sq),
                        _ => None,
                    })
                    .expect("en passant move always logs the captured square");
                self.toggle_piece(dst, PieceKind::Pawn, us);
                self.toggle_piece(src, PieceKind::Pawn, us);
                self.toggle_piece(captured_sq, PieceKind::Pawn, them);
            }
            MoveKind::Promotion => {
                let promo_kind = mv.promotion_piece().to_piece_kind();
                self.toggle_piece(dst, promo_kind, us);
                if let Some(cap_kind) = token.captured {
                    self.toggle_piece(dst, cap_kind, them);
                }
                self.toggle_piece(src, PieceKind::Pawn, us);
            }
            MoveKind::Normal => {
                self.toggle_piece(dst, mv.piece_kind(), us);
                if let Some(cap_kind) = token.captured {
                    self.toggle_piece(dst, cap_kind, them);
                }
                self.toggle_piece(src, mv.piece_kind(), us);
            }
        }

        let mut restored_en_passant = None;
        let mut restored_rights = CastleRights::NONE;
        for entry in token.changes.iter() {
            match entry {
                ChangeLogEntry::DisabledEnPassant(sq) => restored_en_passant = Some(*sq),
                ChangeLogEntry::Revoke { white_king, white_queen, black_king, black_queen } => {
                    if *white_king {
                        restored_rights = restored_rights.insert(CastleRights::WHITE_KING);
                    }
                    if *white_queen {
                        restored_rights = restored_rights.insert(CastleRights::WHITE_QUEEN);
                    }
                    if *black_king {
                        restored_rights = restored_rights.insert(CastleRights::BLACK_KING);
                    }
                    if *black_queen {
                        restored_rights = restored_rights.insert(CastleRights::BLACK_QUEEN);
                    }
                }
                _ => {}
            }
        }

        self.set_en_passant(restored_en_passant);
        self.set_castling(self.castling().insert(restored_rights));
        self.set_side_to_move(us);
        self.retreat_move_seq();
        self.debug_check_invariants();

        Ok(())
    }
}
