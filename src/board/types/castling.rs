//! Castling rights: a 4-bit mask, one bit per color/side combination.
//!
//! The board and FEN codec only ever touch rights through `has`/`set`/
//! `remove`; there is no raw-bitmask accessor because nothing in this crate
//! (no Zobrist hash, no transposition table) needs one.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

const CASTLE_WHITE_K: u8 = 1 << 0;
const CASTLE_WHITE_Q: u8 = 1 << 1;
const CASTLE_BLACK_K: u8 = 1 << 2;
const CASTLE_BLACK_Q: u8 = 1 << 3;

const ALL_CASTLING_RIGHTS: u8 = CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Which of the four castling rights (white/black × kingside/queenside) are
/// still available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights for either side.
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// Both sides may still castle kingside and queenside.
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    /// Is `color`'s kingside (`kingside = true`) or queenside right still available?
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit_for(color, kingside) != 0
    }

    /// Grant a right (used by the FEN codec and the board builder).
    #[inline]
    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    /// Revoke a right (used by `apply` on king/rook moves).
    #[inline]
    pub fn remove(&mut self, color: Color, kingside: bool) {
        self.0 &= !Self::bit_for(color, kingside);
    }

    #[inline]
    const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_has_no_rights() {
        let rights = CastlingRights::none();
        assert!(!rights.has(Color::White, true));
        assert!(!rights.has(Color::Black, false));
    }

    #[test]
    fn all_has_every_right() {
        let rights = CastlingRights::all();
        assert!(rights.has(Color::White, true));
        assert!(rights.has(Color::White, false));
        assert!(rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));
    }

    #[test]
    fn set_and_remove_are_independent_per_side() {
        let mut rights = CastlingRights::none();
        rights.set(Color::White, true);
        rights.set(Color::Black, false);
        assert!(rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(rights.has(Color::Black, false));

        rights.remove(Color::White, true);
        assert!(!rights.has(Color::White, true));
        assert!(rights.has(Color::Black, false));
    }
}
