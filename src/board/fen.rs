//! FEN (Forsyth-Edwards Notation) encoding and decoding.
//!
//! Two forms are supported on input: the 4-field "key" form (placement, side
//! to move, castling, en passant) and the full 6-field form that adds the
//! halfmove clock and fullmove number. Output is always the full 6-field
//! form. The literal `startpos` is accepted as shorthand for the standard
//! starting position.

use super::error::FenError;
use super::state::Board;
use super::types::{CastlingRights, Color, Piece, Square};

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN string (or the shorthand `"startpos"`) into a `Board`.
pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    let fen = if fen.trim() == "startpos" {
        STARTPOS
    } else {
        fen.trim()
    };

    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        #[cfg(feature = "logging")]
        log::warn!("fen with too few fields: {fen:?}");
        return Err(FenError::TooFewParts { found: parts.len() });
    }

    let mut board = Board::empty();
    parse_placement(parts[0], &mut board)?;
    board.side_to_move = parse_side_to_move(parts[1])?;
    board.castling_rights = parse_castling(parts[2])?;
    board.en_passant_target = parse_en_passant(parts[3])?;

    board.halfmove_clock = if parts.len() > 4 {
        parts[4]
            .parse()
            .map_err(|_| FenError::InvalidHalfmoveClock {
                found: parts[4].to_string(),
            })?
    } else {
        0
    };

    board.fullmove_number = if parts.len() > 5 {
        parts[5]
            .parse()
            .map_err(|_| FenError::InvalidFullmoveNumber {
                found: parts[5].to_string(),
            })?
    } else {
        1
    };

    Ok(board)
}

fn parse_placement(field: &str, board: &mut Board) -> Result<(), FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
                if file > 8 {
                    return Err(FenError::TooManyFiles {
                        rank: rank_from_top,
                        files: file,
                    });
                }
                continue;
            }
            if file >= 8 {
                return Err(FenError::TooManyFiles {
                    rank: rank_from_top,
                    files: file + 1,
                });
            }
            let piece = Piece::from_char(c).ok_or_else(|| {
                #[cfg(feature = "logging")]
                log::warn!("unrecognized piece letter {c:?} in fen rank {rank_from_top}");
                FenError::InvalidPiece { char: c }
            })?;
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            board.put_piece(color, piece, Square::new(rank, file));
            file += 1;
        }
        if file != 8 {
            return Err(FenError::InvalidRank {
                rank: rank_from_top,
            });
        }
    }
    Ok(())
}

fn parse_side_to_move(field: &str) -> Result<Color, FenError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::InvalidSideToMove {
            found: field.to_string(),
        }),
    }
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        match c {
            'K' => rights.set(Color::White, true),
            'Q' => rights.set(Color::White, false),
            'k' => rights.set(Color::Black, true),
            'q' => rights.set(Color::Black, false),
            _ => return Err(FenError::InvalidCastling { char: c }),
        }
    }
    Ok(rights)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    field
        .parse::<Square>()
        .map(Some)
        .map_err(|_| FenError::InvalidEnPassant {
            found: field.to_string(),
        })
}

/// Render `board` as the full 6-field FEN string.
#[must_use]
pub fn to_fen(board: &Board) -> String {
    format!(
        "{} {} {}",
        to_fen_key(board),
        board.halfmove_clock(),
        board.fullmove_number()
    )
}

/// Render the 4-field "key" form: placement, side to move, castling rights,
/// and en passant target. Two boards with the same key FEN are the same
/// position for repetition purposes.
#[must_use]
pub fn to_fen_key(board: &Board) -> String {
    let placement = placement_field(board);
    let side = match board.side_to_move() {
        Color::White => 'w',
        Color::Black => 'b',
    };
    let castling = castling_field(board);
    let en_passant = board
        .en_passant_target()
        .map_or_else(|| "-".to_string(), |sq| sq.to_string());

    format!("{placement} {side} {castling} {en_passant}")
}

fn placement_field(board: &Board) -> String {
    let mut ranks = Vec::with_capacity(8);
    for rank in (0..8).rev() {
        let mut rank_str = String::new();
        let mut empty_run = 0;
        for file in 0..8 {
            match board.piece_at(Square::new(rank, file)) {
                Some((color, piece)) => {
                    if empty_run > 0 {
                        rank_str.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    rank_str.push(piece.to_fen_char(color));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            rank_str.push_str(&empty_run.to_string());
        }
        ranks.push(rank_str);
    }
    ranks.join("/")
}

fn castling_field(board: &Board) -> String {
    let rights = board.castling_rights();
    let mut s = String::new();
    if rights.has(Color::White, true) {
        s.push('K');
    }
    if rights.has(Color::White, false) {
        s.push('Q');
    }
    if rights.has(Color::Black, true) {
        s.push('k');
    }
    if rights.has(Color::Black, false) {
        s.push('q');
    }
    if s.is_empty() {
        s.push('-');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_round_trips() {
        let board = parse_fen("startpos").unwrap();
        assert_eq!(
            to_fen(&board),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn four_field_fen_defaults_clocks() {
        let board = parse_fen("8/8/8/8/8/8/8/4K2k w - -").unwrap();
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
    }

    #[test]
    fn en_passant_square_round_trips() {
        let board =
            parse_fen("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2").unwrap();
        assert_eq!(board.en_passant_target(), Some(Square::new(5, 4)));
        assert_eq!(
            to_fen(&board),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
        );
    }

    #[test]
    fn castling_rights_subset_round_trips() {
        let board = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        assert_eq!(to_fen_key(&board), "r3k2r/8/8/8/8/8/8/R3K2R w Kq -");
    }

    #[test]
    fn invalid_piece_char_is_rejected() {
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/4X3 w - - 0 1"),
            Err(FenError::InvalidPiece { char: 'X' })
        ));
    }

    #[test]
    fn too_few_fields_is_rejected() {
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 w"),
            Err(FenError::TooFewParts { .. })
        ));
    }

    #[test]
    fn malformed_rank_is_rejected() {
        assert!(parse_fen("pppppppp/8/8/8/8/8/8/8 w - - 0 1").is_err());
    }
}
