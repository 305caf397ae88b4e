//! PGN (Portable Game Notation) lexing, parsing, and hydration.
//!
//! Parsing a game replays every move against a live `Board` so each
//! `MoveNode` carries its UCI form and the FEN of the position it reaches,
//! not just the raw SAN text. Multiple games in one file are split on the
//! blank-line-before-`[` boundary and can be hydrated independently; nothing
//! here shares mutable state across games, so hydrating many games
//! concurrently (one thread per game) is safe.

mod lexer;
mod model;
mod parser;

pub use lexer::Token;
pub use model::{Game, MoveNode, Tag, Variation};
pub use parser::{parse_game, parse_pgn, split_games};

/// Hydrate every game in `text` concurrently, one worker thread per game.
///
/// Each game's moves are replayed against a freshly built starting `Board`,
/// so games share no mutable state; this is a plain `std::thread::scope`
/// fan-out rather than a custom thread pool.
pub fn parse_pgn_concurrent(text: &str) -> Vec<Result<Game, crate::board::error::PgnParseError>> {
    let chunks = split_games(text);
    std::thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .iter()
            .map(|chunk| scope.spawn(move || parse_game(chunk)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concurrent_parse_matches_sequential_parse() {
        let text = "[Event \"A\"]\n\n1. e4 *\n\n[Event \"B\"]\n\n1. d4 *";
        let sequential = parse_pgn(text).unwrap();
        let concurrent = parse_pgn_concurrent(text);
        assert_eq!(concurrent.len(), sequential.len());
        for (a, b) in sequential.iter().zip(concurrent.iter()) {
            assert_eq!(a, b.as_ref().unwrap());
        }
    }
}
