//! Convenient re-exports for consumers of this crate.
//!
//! # Example
//! ```
//! use chess_engine::board::prelude::*;
//! ```

pub use super::{
    apply, from_san, in_check, is_attacked, is_checkmate, is_stalemate, legal_moves,
    parse_fen, parse_uci_move, pseudo_legal_moves, to_fen, to_fen_key, to_san, Bitboard, Board,
    BoardBuilder, CastlingRights, Color, Move, MoveList, Piece, Square,
};
pub use super::error::{FenError, PgnLexError, PgnParseError, SanError, SquareError, UciParseError};
