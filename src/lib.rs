//! Bitboard chess position representation with pseudo-legal/legal move
//! generation, FEN and SAN/UCI notation, and a PGN game-tree parser.
//!
//! There is no search, evaluation, or opening book here: `Board` is a value
//! type you apply moves to, and `pgn` turns PGN text into a tree you can
//! walk. See `board::prelude` for the common imports.

pub mod board;
pub mod pgn;
