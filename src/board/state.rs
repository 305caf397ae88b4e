//! The board position: piece placement, side to move, and game state flags.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{Bitboard, CastlingRights, Color, Piece, Square};

/// An immutable chess position.
///
/// `Board` is a plain value: there is no incremental make/unmake. Applying a
/// move produces a new `Board` rather than mutating this one in place, which
/// keeps legality checking (clone, apply, inspect) trivial to reason about.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Board {
    /// An empty board: no pieces, white to move, no castling rights.
    #[must_use]
    pub fn empty() -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// The standard chess starting position.
    #[must_use]
    pub fn starting_position() -> Self {
        super::builder::BoardBuilder::new()
            .starting_position()
            .build()
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Bitboard of every square occupied by `color`.
    #[inline]
    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    /// Bitboard of every occupied square.
    #[inline]
    #[must_use]
    pub fn all_occupied(&self) -> Bitboard {
        self.all_occupied
    }

    /// Bitboard of `color`'s pieces of kind `piece`.
    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// The piece and color occupying `sq`, if any.
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        if !self.all_occupied.contains(sq) {
            return None;
        }
        let color = if self.occupied[Color::White.index()].contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        for piece in [
            Piece::Pawn,
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
            Piece::King,
        ] {
            if self.pieces[color.index()][piece.index()].contains(sq) {
                return Some((color, piece));
            }
        }
        None
    }

    pub(crate) fn put_piece(&mut self, color: Color, piece: Piece, sq: Square) {
        let bit = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] =
            self.pieces[color.index()][piece.index()].or(bit);
        self.occupied[color.index()] = self.occupied[color.index()].or(bit);
        self.all_occupied = self.all_occupied.or(bit);
    }

    pub(crate) fn remove_piece(&mut self, color: Color, piece: Piece, sq: Square) {
        let bit = Bitboard::from_square(sq).not();
        self.pieces[color.index()][piece.index()] =
            self.pieces[color.index()][piece.index()].and(bit);
        self.occupied[color.index()] = self.occupied[color.index()].and(bit);
        self.all_occupied = self.all_occupied.and(bit);
    }

    /// The square occupied by `color`'s king.
    ///
    /// # Panics
    /// Panics if the position has no king of that color, which never happens
    /// for a board reached via `apply` starting from a legal position.
    #[must_use]
    pub(crate) fn king_square(&self, color: Color) -> Square {
        self.pieces[color.index()][Piece::King.index()]
            .iter()
            .next()
            .expect("board has a king for each color")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_no_pieces() {
        let board = Board::empty();
        assert!(board.all_occupied().is_empty());
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.fullmove_number(), 1);
    }

    #[test]
    fn starting_position_has_32_pieces() {
        let board = Board::starting_position();
        assert_eq!(board.all_occupied().popcount(), 32);
        assert_eq!(board.occupied_by(Color::White).popcount(), 16);
        assert_eq!(board.occupied_by(Color::Black).popcount(), 16);
    }

    #[test]
    fn put_and_remove_piece_round_trips() {
        let mut board = Board::empty();
        let sq = Square::new(3, 4);
        board.put_piece(Color::White, Piece::Queen, sq);
        assert_eq!(board.piece_at(sq), Some((Color::White, Piece::Queen)));
        board.remove_piece(Color::White, Piece::Queen, sq);
        assert_eq!(board.piece_at(sq), None);
    }

    #[test]
    fn king_square_finds_starting_kings() {
        let board = Board::starting_position();
        assert_eq!(board.king_square(Color::White), Square::new(0, 4));
        assert_eq!(board.king_square(Color::Black), Square::new(7, 4));
    }
}
