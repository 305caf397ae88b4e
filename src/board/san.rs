//! Translation between encoded moves and Standard Algebraic Notation.

use std::fmt::Write as _;

use super::apply::apply;
use super::error::SanError;
use super::movegen::{in_check, is_checkmate, legal_moves};
use super::state::Board;
use super::types::{Move, Piece, Square};

/// Render `mv` (which must be legal in `board`) as SAN, including check and
/// checkmate suffixes.
#[must_use]
pub fn to_san(board: &Board, mv: Move) -> String {
    let piece = board
        .piece_at(mv.from())
        .map(|(_, piece)| piece)
        .expect("move origin is occupied");

    let mut san = if piece == Piece::King && is_castle(mv) {
        if mv.to().file() > mv.from().file() {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        }
    } else {
        render_regular_move(board, mv, piece)
    };

    let next = apply(board, mv);
    let side_in_check = in_check(&next, next.side_to_move());
    if side_in_check {
        san.push(if is_checkmate(&next) { '#' } else { '+' });
    }
    san
}

fn is_castle(mv: Move) -> bool {
    mv.from().file().abs_diff(mv.to().file()) == 2
}

fn render_regular_move(board: &Board, mv: Move, piece: Piece) -> String {
    let mut san = String::new();
    let is_capture = board.all_occupied().contains(mv.to())
        || (piece == Piece::Pawn && Some(mv.to()) == board.en_passant_target());

    if piece == Piece::Pawn {
        if is_capture {
            san.push(file_char(mv.from()));
        }
    } else {
        san.push(piece.to_char().to_ascii_uppercase());
        san.push_str(&disambiguation(board, mv, piece));
    }

    if is_capture {
        san.push('x');
    }
    let _ = write!(san, "{}", mv.to());

    if let Some(promo) = mv.promotion() {
        san.push('=');
        san.push(promo.to_char().to_ascii_uppercase());
    }
    san
}

fn file_char(sq: Square) -> char {
    (b'a' + sq.file() as u8) as char
}

/// Minimal disambiguation: file first, then rank, then both.
fn disambiguation(board: &Board, mv: Move, piece: Piece) -> String {
    let others: Vec<Move> = legal_moves(board)
        .into_iter()
        .filter(|&other| {
            other.to() == mv.to()
                && other.from() != mv.from()
                && board
                    .piece_at(other.from())
                    .is_some_and(|(_, p)| p == piece)
        })
        .collect();

    if others.is_empty() {
        return String::new();
    }

    let same_file = others.iter().any(|o| o.from().file() == mv.from().file());
    let same_rank = others.iter().any(|o| o.from().rank() == mv.from().rank());

    if !same_file {
        file_char(mv.from()).to_string()
    } else if !same_rank {
        (mv.from().rank() + 1).to_string()
    } else {
        mv.from().to_string()
    }
}

/// Parse `san` against `board`'s legal moves.
pub fn from_san(board: &Board, san: &str) -> Result<Move, SanError> {
    let san = san.trim_end_matches(['+', '#', '!', '?']);
    if san.is_empty() {
        return Err(SanError::Empty);
    }

    if san == "O-O" || san == "O-O-O" {
        let kingside = san == "O-O";
        return legal_moves(board)
            .into_iter()
            .find(|&mv| {
                board
                    .piece_at(mv.from())
                    .is_some_and(|(_, p)| p == Piece::King)
                    && is_castle(mv)
                    && (mv.to().file() > mv.from().file()) == kingside
            })
            .ok_or_else(|| SanError::NoMatchingMove {
                san: san.to_string(),
            });
    }

    let (promotion, san) = match san.split_once('=') {
        Some((body, promo)) => {
            let c = promo.chars().next().ok_or(SanError::InvalidPromotion { char: '=' })?;
            let piece = Piece::from_char(c).ok_or(SanError::InvalidPromotion { char: c })?;
            (Some(piece), body)
        }
        None => (None, san),
    };

    let mut chars: Vec<char> = san.chars().collect();
    let piece = if chars[0].is_ascii_uppercase() && chars[0] != 'O' {
        let p = Piece::from_char(chars[0]).ok_or(SanError::InvalidPiece { char: chars[0] })?;
        chars.remove(0);
        p
    } else {
        Piece::Pawn
    };

    chars.retain(|&c| c != 'x');
    if chars.len() < 2 {
        return Err(SanError::InvalidSquare {
            notation: san.to_string(),
        });
    }

    let dest_str: String = chars[chars.len() - 2..].iter().collect();
    let dest: Square = dest_str
        .parse()
        .map_err(|_| SanError::InvalidSquare { notation: dest_str })?;
    let disambiguator: String = chars[..chars.len() - 2].iter().collect();

    let candidates: Vec<Move> = legal_moves(board)
        .into_iter()
        .filter(|&mv| {
            mv.to() == dest
                && mv.promotion() == promotion
                && board
                    .piece_at(mv.from())
                    .is_some_and(|(_, p)| p == piece)
                && matches_disambiguator(mv.from(), &disambiguator)
        })
        .collect();

    match candidates.as_slice() {
        [] => Err(SanError::NoMatchingMove {
            san: san.to_string(),
        }),
        [mv] => Ok(*mv),
        _ => Err(SanError::AmbiguousMove {
            san: san.to_string(),
        }),
    }
}

fn matches_disambiguator(from: Square, disambiguator: &str) -> bool {
    if disambiguator.is_empty() {
        return true;
    }
    if disambiguator.len() == 1 {
        let c = disambiguator.chars().next().unwrap();
        if let Some(digit) = c.to_digit(10) {
            return from.rank() + 1 == digit as usize;
        }
        return file_char(from) == c;
    }
    from.to_string() == disambiguator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::parse_fen;

    #[test]
    fn pawn_push_san() {
        let board = Board::starting_position();
        let mv = Move::new(Square::new(1, 4), Square::new(3, 4), Piece::Pawn, None);
        assert_eq!(to_san(&board, mv), "e4");
    }

    #[test]
    fn knight_disambiguation_by_file() {
        let board = parse_fen("4k3/8/8/8/8/8/8/N1N3K1 w - - 0 1").unwrap();
        let mv = Move::new(Square::new(0, 0), Square::new(2, 1), Piece::Knight, None);
        assert_eq!(to_san(&board, mv), "Nab3");
    }

    #[test]
    fn checkmate_suffix() {
        let board = parse_fen("6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1").unwrap();
        let mv = Move::new(Square::new(0, 4), Square::new(7, 4), Piece::Rook, None);
        assert_eq!(to_san(&board, mv), "Re8#");
    }

    #[test]
    fn from_san_parses_simple_push() {
        let board = Board::starting_position();
        let mv = from_san(&board, "e4").unwrap();
        assert_eq!(mv.from(), Square::new(1, 4));
        assert_eq!(mv.to(), Square::new(3, 4));
    }

    #[test]
    fn from_san_parses_castling() {
        let board = parse_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let mv = from_san(&board, "O-O").unwrap();
        assert_eq!(mv.to(), Square::new(0, 6));
    }

    #[test]
    fn from_san_rejects_unmatched_move() {
        let board = Board::starting_position();
        assert!(from_san(&board, "e5").is_err());
    }
}
