//! Property-based tests over random legal move sequences.

use chess_engine::board::{self, Board, Color};
use proptest::prelude::*;

fn move_sequence_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..64usize, 0..16)
}

fn play_random_game(board: &mut Board, indices: &[usize]) {
    for &idx in indices {
        let moves = board::legal_moves(board);
        if moves.is_empty() {
            break;
        }
        *board = board::apply(board, moves[idx % moves.len()]);
    }
}

proptest! {
    /// FEN round-trip preserves the exact position reached after a random
    /// sequence of legal moves.
    #[test]
    fn prop_fen_roundtrip(indices in move_sequence_strategy()) {
        let mut board = Board::starting_position();
        play_random_game(&mut board, &indices);

        let fen = board::to_fen(&board);
        let restored = board::parse_fen(&fen).expect("to_fen always produces a parseable FEN");
        prop_assert_eq!(restored, board);
    }

    /// Every SAN string `to_san` produces for a legal move parses back, via
    /// `from_san`, to that same move.
    #[test]
    fn prop_san_roundtrips_to_the_same_move(indices in move_sequence_strategy()) {
        let mut board = Board::starting_position();
        for &idx in &indices {
            let moves = board::legal_moves(&board);
            if moves.is_empty() {
                break;
            }
            let mv = moves[idx % moves.len()];
            let san = board::to_san(&board, mv);
            let parsed = board::from_san(&board, &san).expect("to_san output must parse");
            prop_assert_eq!(parsed, mv);
            board = board::apply(&board, mv);
        }
    }

    /// A bitboard invariant: the per-color occupancy bitboards are always
    /// disjoint and their union is exactly the all-occupied bitboard.
    #[test]
    fn prop_occupancy_bitboards_partition_all_occupied(indices in move_sequence_strategy()) {
        let mut board = Board::starting_position();
        play_random_game(&mut board, &indices);

        let white = board.occupied_by(Color::White);
        let black = board.occupied_by(Color::Black);
        prop_assert!(white.is_disjoint(black));
        prop_assert_eq!(white.or(black), board.all_occupied());
        prop_assert_eq!(
            white.popcount() + black.popcount(),
            board.all_occupied().popcount()
        );
    }

    /// Every legal move, once applied, leaves the mover's own king out of
    /// check — `legal_moves` must never hand back a move that walks into or
    /// stays in check.
    #[test]
    fn prop_legal_moves_never_leave_mover_in_check(indices in move_sequence_strategy()) {
        let mut board = Board::starting_position();
        for &idx in &indices {
            let moves = board::legal_moves(&board);
            if moves.is_empty() {
                break;
            }
            let mover = board.side_to_move();
            let mv = moves[idx % moves.len()];
            let next = board::apply(&board, mv);
            prop_assert!(!board::in_check(&next, mover));
            board = next;
        }
    }
}
