//! The chess board: piece placement, mailbox, side to move, castling, en passant.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Outcome of the game, as last determined by the driver that calls the move
/// generator (the board alone cannot tell whether the side to move has a legal
/// move without invoking `generate_legal_moves`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Playing,
    WhiteWins,
    BlackWins,
    Draw,
}

/// Complete chess position state.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Bitboard for each piece kind, indexed by [`PieceKind::index()`].
    pieces: [Bitboard; PieceKind::COUNT],
    /// Bitboard for each side, indexed by [`Color::index()`].
    sides: [Bitboard; Color::COUNT],
    /// Union of both sides — cached for performance.
    occupied: Bitboard,
    /// Parallel O(1) lookup array, kept in sync with `pieces`/`sides`.
    mailbox: [Option<Piece>; Square::COUNT],
    /// Which side moves next.
    side_to_move: Color,
    /// Current castling rights.
    castling: CastleRights,
    /// En passant target square, if any.
    en_passant: Option<Square>,
    /// Outcome of the game, as last determined by the driver.
    game_state: GameState,
    /// Incremented by every applied move; lets `undo_move` reject an
    /// `UndoToken` that isn't for the move on top of the stack.
    move_seq: u64,
}

impl Board {
    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        // White pieces
        let white_pawns = Bitboard::RANK_2;
        let white_rooks = Bitboard::new(Square::A1.bitboard().inner() | Square::H1.bitboard().inner());
        let white_knights = Bitboard::new(Square::B1.bitboard().inner() | Square::G1.bitboard().inner());
        let white_bishops = Bitboard::new(Square::C1.bitboard().inner() | Square::F1.bitboard().inner());
        let white_queens = Square::D1.bitboard();
        let white_king = Square::E1.bitboard();

        // Black pieces
        let black_pawns = Bitboard::RANK_7;
        let black_rooks = Bitboard::new(Square::A8.bitboard().inner() | Square::H8.bitboard().inner());
        let black_knights = Bitboard::new(Square::B8.bitboard().inner() | Square::G8.bitboard().inner());
        let black_bishops = Bitboard::new(Square::C8.bitboard().inner() | Square::F8.bitboard().inner());
        let black_queens = Square::D8.bitboard();
        let black_king = Square::E8.bitboard();

        let pawns = white_pawns | black_pawns;
        let knights = white_knights | black_knights;
        let bishops = white_bishops | black_bishops;
        let rooks = white_rooks | black_rooks;
        let queens = white_queens | black_queens;
        let kings = white_king | black_king;

        let white = white_pawns | white_knights | white_bishops | white_rooks | white_queens | white_king;
        let black = black_pawns | black_knights | black_bishops | black_rooks | black_queens | black_king;
        let occupied = white | black;

        let mut board = Board {
            pieces: [pawns, knights, bishops, rooks, queens, kings],
            sides: [white, black],
            occupied,
            mailbox: [None; Square::COUNT],
            side_to_move: Color::White,
            castling: CastleRights::ALL,
            en_passant: None,
            game_state: GameState::Playing,
            move_seq: 0,
        };
        board.rebuild_mailbox();
        board
    }

    /// Construct a board from raw components. Used by FEN parsing.
    pub(crate) fn from_raw(
        pieces: [Bitboard; PieceKind::COUNT],
        sides: [Bitboard; Color::COUNT],
        occupied: Bitboard,
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
    ) -> Board {
        let mut board = Board {
            pieces,
            sides,
            occupied,
            mailbox: [None; Square::COUNT],
            side_to_move,
            castling,
            en_passant,
            game_state: GameState::Playing,
            move_seq: 0,
        };
        board.rebuild_mailbox();
        board
    }

    /// Recompute the mailbox from the bitboards. Only needed after `from_raw`
    /// construction; incremental mutation keeps it in sync afterward.
    fn rebuild_mailbox(&mut self) {
        for sq in Square::all() {
            self.mailbox[sq.index()] = self.colored_piece_on(sq);
        }
    }

    /// Return the piece kind on the given square, if any.
    pub fn piece_on(&self, sq: Square) -> Option<PieceKind> {
        self.mailbox[sq.index()].map(Piece::kind)
    }

    /// Return the color of the piece on the given square, if any.
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.mailbox[sq.index()].map(Piece::color)
    }

    /// Return the colored piece on the given square, if any.
    #[inline]
    pub fn colored_piece_on(&self, sq: Square) -> Option<Piece> {
        let kind = PieceKind::ALL.into_iter().find(|&kind| self.pieces[kind.index()].contains(sq))?;
        let color = Color::ALL.into_iter().find(|&color| self.sides[color.index()].contains(sq))?;
        Some(Piece::new(kind, color))
    }

    /// Return the bitboard for the given piece kind (both colors).
    #[inline]
    pub fn pieces(&self, kind: PieceKind) -> Bitboard {
        self.pieces[kind.index()]
    }

    /// Return the bitboard for the given side.
    #[inline]
    pub fn side(&self, color: Color) -> Bitboard {
        self.sides[color.index()]
    }

    /// Return the occupied squares bitboard.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// Return `true` if the given square is occupied.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.occupied.contains(sq)
    }

    /// Return the square of the king for the given side.
    ///
    /// # Panics
    ///
    /// Panics if the board has no king for the given color (invalid board state).
    pub fn king_square(&self, color: Color) -> Square {
        let king_bb = self.pieces[PieceKind::King.index()] & self.sides[color.index()];
        king_bb.lsb().expect("board must have a king for each side")
    }

    /// Return the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Return the current castling rights.
    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Return the en passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Return the game outcome as last set by `set_game_state`.
    #[inline]
    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    /// Record the game outcome. Called by the driver after it has established
    /// that the side to move has (or lacks) a legal move.
    #[inline]
    pub fn set_game_state(&mut self, state: GameState) {
        self.game_state = state;
    }

    /// Toggle a piece into/out of the board arrays and the mailbox via XOR.
    #[inline]
    pub(crate) fn toggle_piece(&mut self, sq: Square, kind: PieceKind, color: Color) {
        let mask = sq.bitboard();
        self.pieces[kind.index()] = self.pieces[kind.index()] ^ mask;
        self.sides[color.index()] = self.sides[color.index()] ^ mask;
        self.occupied = self.sides[Color::White.index()] | self.sides[Color::Black.index()];
        self.mailbox[sq.index()] = if self.mailbox[sq.index()].is_some() {
            None
        } else {
            Some(Piece::new(kind, color))
        };
    }

    /// Toggle a packed piece into/out of the board arrays via XOR.
    #[inline]
    pub(crate) fn toggle_piece_packed(&mut self, sq: Square, piece: Piece) {
        self.toggle_piece(sq, piece.kind(), piece.color());
    }

    /// Set the en passant target square.
    #[inline]
    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    /// Set the castling rights.
    #[inline]
    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.castling = rights;
    }

    /// Set the side to move.
    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Return the current move sequence number (incremented once per applied move).
    #[inline]
    pub(crate) fn move_seq(&self) -> u64 {
        self.move_seq
    }

    /// Advance the move sequence number after applying a move.
    #[inline]
    pub(crate) fn advance_move_seq(&mut self) -> u64 {
        self.move_seq += 1;
        self.move_seq
    }

    /// Roll the move sequence number back after undoing a move.
    #[inline]
    pub(crate) fn retreat_move_seq(&mut self) {
        self.move_seq -= 1;
    }

    /// Check the structural invariants that must hold after every mutation.
    ///
    /// These can only be violated by a bug in this crate, never by caller
    /// input, so violations panic rather than returning a `Result`.
    pub(crate) fn debug_check_invariants(&self) {
        debug_assert!(
            Color::ALL
                .into_iter()
                .all(|color| (self.pieces[PieceKind::King.index()] & self.sides[color.index()]).count() == 1),
            "expected exactly one king per side"
        );
        debug_assert!(
            (self.pieces[PieceKind::Pawn.index()] & (Bitboard::RANK_1 | Bitboard::RANK_8)).is_empty(),
            "pawns found on back rank"
        );
        for i in 0..PieceKind::COUNT {
            for j in (i + 1)..PieceKind::COUNT {
                debug_assert!((self.pieces[i] & self.pieces[j]).is_empty(), "overlapping piece bitboards");
            }
        }
        debug_assert!(
            (self.sides[Color::White.index()] & self.sides[Color::Black.index()]).is_empty(),
            "white and black side bitboards overlap"
        );
        debug_assert!(
            self.occupied == (self.sides[Color::White.index()] | self.sides[Color::Black.index()]),
            "occupied bitboard is inconsistent with side bitboards"
        );
        for sq in Square::all() {
            debug_assert!(self.mailbox[sq.index()] == self.colored_piece_on(sq), "mailbox desynced from bitboards at {sq}");
        }
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?} to move)", self.side_to_move)
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid, rank 8 on top, matching
/// how the board is actually read over the board.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for rank_from_top in 0u8..8 {
            write!(f, "{}  ", 8 - rank_from_top)?;
            for file_idx in 0u8..8 {
                let sq = Square::from_index(rank_from_top * 8 + file_idx).unwrap();
                let c = match (board.piece_on(sq), board.color_on(sq)) {
                    (Some(kind), Some(Color::White)) => kind.fen_char().to_ascii_uppercase(),
                    (Some(kind), Some(Color::Black)) => kind.fen_char(),
                    _ => '.',
                };
                if file_idx < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, GameState};
    use crate::color::Color;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    #[test]
    fn starting_position_piece_on() {
        let board = Board::starting_position();
        assert_eq!(board.piece_on(Square::E1), Some(PieceKind::King));
        assert_eq!(board.piece_on(Square::D1), Some(PieceKind::Queen));
        assert_eq!(board.piece_on(Square::A1), Some(PieceKind::Rook));
        assert_eq!(board.piece_on(Square::B1), Some(PieceKind::Knight));
        assert_eq!(board.piece_on(Square::C1), Some(PieceKind::Bishop));
        assert_eq!(board.piece_on(Square::E2), Some(PieceKind::Pawn));
        assert_eq!(board.piece_on(Square::E4), None);
    }

    #[test]
    fn starting_position_color_on() {
        let board = Board::starting_position();
        assert_eq!(board.color_on(Square::E1), Some(Color::White));
        assert_eq!(board.color_on(Square::E8), Some(Color::Black));
        assert_eq!(board.color_on(Square::E4), None);
    }

    #[test]
    fn king_square() {
        let board = Board::starting_position();
        assert_eq!(board.king_square(Color::White), Square::E1);
        assert_eq!(board.king_square(Color::Black), Square::E8);
    }

    #[test]
    fn occupied_count() {
        let board = Board::starting_position();
        assert_eq!(board.occupied().count(), 32);
    }

    #[test]
    fn toggle_piece_keeps_mailbox_in_sync() {
        let mut board = Board::starting_position();
        board.toggle_piece(Square::E2, PieceKind::Pawn, Color::White);
        assert!(!board.is_occupied(Square::E2));
        assert_eq!(board.piece_on(Square::E2), None);
        assert_eq!(board.occupied().count(), 31);

        board.toggle_piece(Square::E4, PieceKind::Pawn, Color::White);
        assert!(board.is_occupied(Square::E4));
        assert_eq!(board.piece_on(Square::E4), Some(PieceKind::Pawn));
        assert_eq!(board.color_on(Square::E4), Some(Color::White));
        board.debug_check_invariants();
    }

    #[test]
    fn pretty_print_top_rank_is_8() {
        let board = Board::starting_position();
        let output = format!("{}", board.pretty());
        let first_line = output.lines().next().unwrap();
        assert!(first_line.starts_with("8  r n b q k b n r"));
        assert!(output.contains("1  R N B Q K B N R"));
        assert!(output.contains("a b c d e f g h"));
    }

    #[test]
    fn colored_piece_on_starting() {
        let board = Board::starting_position();
        assert_eq!(board.colored_piece_on(Square::E1), Some(Piece::WHITE_KING));
        assert_eq!(board.colored_piece_on(Square::E8), Some(Piece::BLACK_KING));
        assert_eq!(board.colored_piece_on(Square::D1), Some(Piece::WHITE_QUEEN));
        assert_eq!(board.colored_piece_on(Square::E4), None);
    }

    #[test]
    fn starting_position_invariants_hold() {
        Board::starting_position().debug_check_invariants();
    }

    #[test]
    fn game_state_defaults_to_playing() {
        assert_eq!(Board::starting_position().game_state(), GameState::Playing);
    }

    #[test]
    fn set_game_state() {
        let mut board = Board::starting_position();
        board.set_game_state(GameState::Draw);
        assert_eq!(board.game_state(), GameState::Draw);
    }
}
