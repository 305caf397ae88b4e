//! Pure move application.
//!
//! `apply` never mutates its argument: it clones the board, updates the
//! clone, and returns it. Legality is not checked here; callers either
//! already filtered through `movegen::legal_moves`, or are deliberately
//! probing a pseudo-legal move to see whether it leaves the king in check.

use super::geometry::{castle_spec, EP_MASK, EP_TARGET_INDEX};
use super::state::Board;
use super::types::{CastlingRights, Color, Move, Piece, Square};

/// Apply `mv` to `board`, returning the resulting position.
///
/// `mv` is assumed to be at least pseudo-legal for `board`'s side to move;
/// calling this with an unrelated move produces a nonsensical but
/// non-panicking board.
#[must_use]
pub fn apply(board: &Board, mv: Move) -> Board {
    let mut next = board.clone();
    let side = board.side_to_move();
    let opponent = side.opponent();
    let from = mv.from();
    let to = mv.to();
    let piece = moving_piece(board, from);

    let is_capture = next.all_occupied().contains(to);
    let is_en_passant = piece == Piece::Pawn && Some(to) == board.en_passant_target();

    next.remove_piece(side, piece, from);

    if is_en_passant {
        let captured_sq = ep_captured_square(to);
        next.remove_piece(opponent, Piece::Pawn, captured_sq);
    } else if is_capture {
        let captured = captured_piece(board, to);
        next.remove_piece(opponent, captured, to);
    }

    let placed = mv.promotion().unwrap_or(piece);
    next.put_piece(side, placed, to);

    let is_castle = piece == Piece::King && from.file().abs_diff(to.file()) == 2;
    if is_castle {
        let kingside = to.file() > from.file();
        let spec = castle_spec(side, kingside);
        next.remove_piece(side, Piece::Rook, spec.rook_from);
        next.put_piece(side, Piece::Rook, spec.rook_to);
    }

    next.castling_rights = updated_castling_rights(board.castling_rights(), side, piece, from);

    next.en_passant_target = if piece == Piece::Pawn
        && from.file() == to.file()
        && from.rank().abs_diff(to.rank()) == 2
    {
        EP_TARGET_INDEX[to.as_index()]
            .filter(|_| adjacent_opponent_pawn(&next, opponent, to))
    } else {
        None
    };

    next.halfmove_clock = if piece == Piece::Pawn || is_capture || is_en_passant {
        0
    } else {
        board.halfmove_clock() + 1
    };

    next.fullmove_number = if side == Color::Black {
        board.fullmove_number() + 1
    } else {
        board.fullmove_number()
    };

    next.side_to_move = opponent;
    next
}

fn moving_piece(board: &Board, from: Square) -> Piece {
    board
        .piece_at(from)
        .map(|(_, piece)| piece)
        .expect("apply called with a move whose origin square is empty")
}

fn captured_piece(board: &Board, to: Square) -> Piece {
    board
        .piece_at(to)
        .map(|(_, piece)| piece)
        .expect("apply determined a capture but the destination square is empty")
}

/// True if `opponent` has a pawn on the same rank as `landing`, one file to
/// either side — the only squares from which an en passant capture of the
/// pawn that just landed on `landing` could be played.
fn adjacent_opponent_pawn(board: &Board, opponent: Color, landing: Square) -> bool {
    let opponent_pawns = board.pieces(opponent, Piece::Pawn);
    [-1i8, 1]
        .into_iter()
        .filter_map(|delta| {
            let file = i8::try_from(landing.file()).ok()? + delta;
            (0..8).contains(&file).then(|| Square::new(landing.rank(), file as usize))
        })
        .any(|sq| opponent_pawns.contains(sq))
}

fn ep_captured_square(ep_target: Square) -> Square {
    EP_MASK[ep_target.as_index()]
        .iter()
        .next()
        .expect("en passant target always has a captured-pawn square")
}

/// Clears castling rights on king moves and on a rook moving from its home
/// square. Capturing a rook on its home square does not clear the
/// opponent's right for that side.
fn updated_castling_rights(
    rights: CastlingRights,
    side: Color,
    piece: Piece,
    from: Square,
) -> CastlingRights {
    let mut rights = rights;
    match piece {
        Piece::King => {
            rights.remove(side, true);
            rights.remove(side, false);
        }
        Piece::Rook => {
            let spec_k = castle_spec(side, true);
            let spec_q = castle_spec(side, false);
            if from == spec_k.rook_from {
                rights.remove(side, true);
            } else if from == spec_q.rook_from {
                rights.remove(side, false);
            }
        }
        _ => {}
    }
    rights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::{parse_fen, to_fen};

    #[test]
    fn pawn_double_push_sets_en_passant_target_when_a_pawn_could_capture() {
        let board = parse_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1").unwrap();
        let mv = Move::new(Square::new(1, 4), Square::new(3, 4), Piece::Pawn, None);
        let next = apply(&board, mv);
        assert_eq!(next.en_passant_target(), Some(Square::new(2, 4)));
        assert_eq!(next.halfmove_clock(), 0);
    }

    #[test]
    fn pawn_double_push_does_not_set_en_passant_target_without_an_adjacent_pawn() {
        let board = Board::starting_position();
        let mv = Move::new(Square::new(1, 4), Square::new(3, 4), Piece::Pawn, None);
        let next = apply(&board, mv);
        assert_eq!(next.en_passant_target(), None);
        assert_eq!(next.halfmove_clock(), 0);
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let board = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let mv = Move::new(Square::new(4, 4), Square::new(5, 3), Piece::Pawn, None);
        let next = apply(&board, mv);
        assert!(next.piece_at(Square::new(4, 3)).is_none());
        assert_eq!(
            next.piece_at(Square::new(5, 3)),
            Some((Color::White, Piece::Pawn))
        );
    }

    #[test]
    fn kingside_castle_relocates_the_rook() {
        let board = parse_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let mv = Move::new(Square::new(0, 4), Square::new(0, 6), Piece::King, None);
        let next = apply(&board, mv);
        assert_eq!(
            next.piece_at(Square::new(0, 5)),
            Some((Color::White, Piece::Rook))
        );
        assert!(next.piece_at(Square::new(0, 7)).is_none());
        assert!(!next.castling_rights().has(Color::White, true));
    }

    #[test]
    fn capturing_a_rook_does_not_clear_castling_rights() {
        let board = parse_fen("r3k2r/8/8/8/8/8/8/4K2R w Kkq - 0 1").unwrap();
        let mv = Move::new(Square::new(0, 7), Square::new(7, 7), Piece::Rook, None);
        let next = apply(&board, mv);
        assert!(next.castling_rights().has(Color::Black, true));
    }

    #[test]
    fn promotion_places_the_chosen_piece() {
        let board = parse_fen("8/4P3/4k3/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = Move::new(Square::new(6, 4), Square::new(7, 4), Piece::Pawn, Some(Piece::Queen));
        let next = apply(&board, mv);
        assert_eq!(
            next.piece_at(Square::new(7, 4)),
            Some((Color::White, Piece::Queen))
        );
    }

    #[test]
    fn fullmove_number_increments_after_black_moves() {
        let board = Board::starting_position();
        let white_move = apply(
            &board,
            Move::new(Square::new(1, 4), Square::new(3, 4), Piece::Pawn, None),
        );
        assert_eq!(white_move.fullmove_number(), 1);
        let black_move = apply(
            &white_move,
            Move::new(Square::new(6, 4), Square::new(4, 4), Piece::Pawn, None),
        );
        assert_eq!(black_move.fullmove_number(), 2);
    }

    #[test]
    fn applying_the_french_defense_opening_matches_expected_fen() {
        let board = Board::starting_position();
        let e4 = apply(
            &board,
            Move::new(Square::new(1, 4), Square::new(3, 4), Piece::Pawn, None),
        );
        let e6 = apply(
            &e4,
            Move::new(Square::new(6, 4), Square::new(5, 4), Piece::Pawn, None),
        );
        assert_eq!(
            to_fen(&e6),
            "rnbqkbnr/pppp1ppp/4p3/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2"
        );
    }
}
