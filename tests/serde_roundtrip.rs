//! JSON round-trip tests for the `serde` feature. Run with
//! `cargo test --features serde`; without the feature these types don't
//! derive `Serialize`/`Deserialize` and this file has nothing to test.

#![cfg(feature = "serde")]

use chess_engine::board::{self, Board};
use chess_engine::pgn;

#[test]
fn board_round_trips_through_json() {
    let board = Board::starting_position();
    let json = serde_json::to_string(&board).unwrap();
    let restored: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, board);
}

#[test]
fn board_after_moves_round_trips_through_json() {
    let mut board = Board::starting_position();
    for uci in ["e2e4", "e7e5", "g1f3", "b8c6"] {
        let mv = board::parse_uci_move(&board, uci).unwrap();
        board = board::apply(&board, mv);
    }
    let json = serde_json::to_string(&board).unwrap();
    let restored: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, board);
}

#[test]
fn parsed_game_round_trips_through_json() {
    let pgn_text = "[Event \"Test\"]\n\n1. e4 e5 (1...c5 2. Nf3) 2. Nf3 *";
    let game = pgn::parse_game(pgn_text).unwrap();
    let json = serde_json::to_string(&game).unwrap();
    let restored: pgn::Game = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, game);
}
