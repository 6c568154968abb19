//! Error types for making moves and parsing test positions.

/// Errors returned by the public move-making surface.
///
/// Structural invariant violations (overlapping piece bitboards, the wrong
/// number of kings, inconsistent occupancy) are programming errors, not things
/// a caller can trigger from a legal sequence of moves — those panic via
/// `debug_assert!` in `board.rs` rather than appearing here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The requested move is not a member of the current legal move set.
    #[error("illegal move: {0} is not legal in the current position")]
    IllegalMove(crate::chess_move::Move),

    /// A pawn move to the last rank was submitted without a promotion piece.
    #[error("promotion required: {0} moves a pawn to the last rank")]
    PromotionRequired(crate::chess_move::Move),

    /// The supplied undo token does not match the most recently made move.
    #[error("undo token does not match the most recent make_move call")]
    InvalidUndo,
}

/// Errors parsing a FEN-style string into a [`Board`](crate::board::Board).
///
/// FEN is not a first-class external interface (see the crate's external
/// interfaces); this exists only to build test positions and feed the debug
/// binary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("expected 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },

    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },

    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength { rank_index: usize, length: usize },

    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar { character: char },

    #[error("invalid active color: \"{found}\"")]
    InvalidColor { found: String },

    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar { character: char },

    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant { found: String },
}
