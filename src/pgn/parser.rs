//! Recursive-descent PGN parser producing a `Game` tree.
//!
//! Hydration happens inline: every SAN token is replayed against the running
//! position to recover its UCI form and the FEN key of the resulting
//! position. A variation's moves replay from the position *before* the move
//! the variation replaces, not from wherever the mainline ended up.

use crate::board;
use crate::board::error::{PgnParseError, SanError};
use crate::board::Board;

use super::lexer::{Lexer, Token};
use super::model::{Game, MoveNode, Tag, Variation};

/// Split a multi-game PGN text on the `"\n\n["` boundary between games.
#[must_use]
pub fn split_games(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let pattern = b"\n\n[";
    let mut starts = vec![0usize];
    let mut i = 0;
    while i + pattern.len() <= bytes.len() {
        if &bytes[i..i + pattern.len()] == pattern {
            starts.push(i + 2);
        }
        i += 1;
    }
    starts.dedup();
    let mut chunks = Vec::new();
    for w in starts.windows(2) {
        chunks.push(text[w[0]..w[1]].trim());
    }
    if let Some(&last) = starts.last() {
        chunks.push(text[last..].trim());
    }
    chunks.into_iter().filter(|c| !c.is_empty()).collect()
}

/// Parse every game out of a multi-game PGN text.
pub fn parse_pgn(text: &str) -> Result<Vec<Game>, PgnParseError> {
    split_games(text).into_iter().map(parse_game).collect()
}

/// Parse a single game (tag pairs followed by movetext).
pub fn parse_game(text: &str) -> Result<Game, PgnParseError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        start_board: Board::starting_position(),
    };
    parser.parse()
}

fn tokenize(text: &str) -> Result<Vec<Token>, PgnParseError> {
    let mut lexer = Lexer::new(text);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token()?;
        if tok == Token::Eof {
            break;
        }
        tokens.push(tok);
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    start_board: Board,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        tok
    }

    fn parse(&mut self) -> Result<Game, PgnParseError> {
        let tags = self.parse_tags()?;
        let board = self.starting_board_from_tags(&tags)?;
        let (comment, moves, result) = self.parse_movetext(board, 1)?;

        if moves.is_empty() && result.is_empty() {
            return Err(PgnParseError::EmptyGame);
        }

        Ok(Game {
            tags,
            comment,
            moves,
            result,
        })
    }

    fn starting_board_from_tags(&self, tags: &[Tag]) -> Result<Board, PgnParseError> {
        match tags.iter().find(|t| t.name == "FEN") {
            Some(tag) => board::parse_fen(&tag.value)
                .map_err(|_| PgnParseError::MalformedTag {
                    text: tag.value.clone(),
                }),
            None => Ok(self.start_board.clone()),
        }
    }

    fn parse_tags(&mut self) -> Result<Vec<Tag>, PgnParseError> {
        let mut tags = Vec::new();
        while let Some(Token::TagName(name)) = self.peek().cloned() {
            self.advance();
            match self.advance() {
                Some(Token::String(value)) => tags.push(Tag { name, value }),
                _ => {
                    return Err(PgnParseError::MalformedTag { text: name });
                }
            }
        }
        Ok(tags)
    }

    /// Parse move text until a game termination marker or end of input.
    /// Returns the leading comment (if any), the moves, and the result string.
    fn parse_movetext(
        &mut self,
        mut board: Board,
        start_ply: u32,
    ) -> Result<(Option<String>, Vec<MoveNode>, String), PgnParseError> {
        let mut leading_comment = None;
        let mut moves = Vec::new();
        let mut result = String::new();
        let mut ply = start_ply;

        loop {
            match self.peek().cloned() {
                Some(Token::MoveNumber(_)) => {
                    self.advance();
                }
                Some(Token::MoveSan(san_text)) => {
                    self.advance();
                    let mv = board::from_san(&board, &san_text).map_err(|e| {
                        #[cfg(feature = "logging")]
                        log::warn!("illegal SAN {san_text:?} at {}", board::to_fen_key(&board));
                        match e {
                            SanError::NoMatchingMove { san } | SanError::AmbiguousMove { san } => {
                                PgnParseError::IllegalMove {
                                    san,
                                    fen: board::to_fen_key(&board),
                                }
                            }
                            _ => PgnParseError::IllegalMove {
                                san: san_text.clone(),
                                fen: board::to_fen_key(&board),
                            },
                        }
                    })?;
                    let uci = mv.to_string();
                    let next_board = board::apply(&board, mv);
                    let fen_key = board::to_fen_key(&next_board);

                    let mut nags = Vec::new();
                    while let Some(Token::MoveNag(n)) = self.peek() {
                        nags.push(*n);
                        self.advance();
                    }

                    let mut comment = None;
                    if let Some(Token::Comment(c)) = self.peek().cloned() {
                        comment = Some(c);
                        self.advance();
                    }

                    let mut variations = Vec::new();
                    while self.peek() == Some(&Token::LeftParen) {
                        self.advance();
                        variations.push(self.parse_variation(board.clone(), ply)?);
                    }

                    moves.push(MoveNode {
                        ply,
                        san: san_text,
                        uci,
                        fen_key,
                        nags,
                        comment,
                        variations,
                    });
                    ply += 1;
                    board = next_board;
                }
                Some(Token::Comment(c)) => {
                    self.advance();
                    if moves.is_empty() && leading_comment.is_none() {
                        leading_comment = Some(c);
                    }
                }
                Some(Token::GameTermination(s)) => {
                    self.advance();
                    result = s;
                    break;
                }
                Some(Token::RightParen) => {
                    return Err(PgnParseError::UnmatchedVariationClose);
                }
                None => break,
                Some(_) => {
                    self.advance();
                }
            }
        }

        Ok((leading_comment, moves, result))
    }

    /// Parse a variation body up to (and consuming) the matching `)`.
    /// `pre_move_board` is the position before the mainline move this
    /// variation replaces.
    fn parse_variation(&mut self, pre_move_board: Board, ply: u32) -> Result<Variation, PgnParseError> {
        let mut comments = Vec::new();
        let mut moves = Vec::new();

        loop {
            match self.peek().cloned() {
                Some(Token::Comment(c)) if moves.is_empty() => {
                    self.advance();
                    comments.push(c);
                }
                Some(Token::RightParen) => {
                    self.advance();
                    break;
                }
                None => return Err(PgnParseError::UnclosedVariation),
                _ => {
                    let (_, mut sub_moves, _) =
                        self.parse_variation_movetext(pre_move_board.clone(), ply)?;
                    moves.append(&mut sub_moves);
                    match self.advance() {
                        Some(Token::RightParen) => {}
                        _ => return Err(PgnParseError::UnclosedVariation),
                    }
                    break;
                }
            }
        }

        Ok(Variation { comments, moves })
    }

    /// Like `parse_movetext` but stops at an unmatched `)` instead of treating
    /// it as a parse error, since the caller is inside a variation.
    fn parse_variation_movetext(
        &mut self,
        mut board: Board,
        start_ply: u32,
    ) -> Result<(Option<String>, Vec<MoveNode>, String), PgnParseError> {
        let mut moves = Vec::new();
        let mut ply = start_ply;

        loop {
            match self.peek().cloned() {
                Some(Token::MoveNumber(_)) => {
                    self.advance();
                }
                Some(Token::MoveSan(san_text)) => {
                    self.advance();
                    let mv = board::from_san(&board, &san_text).map_err(|_| {
                        PgnParseError::IllegalMove {
                            san: san_text.clone(),
                            fen: board::to_fen_key(&board),
                        }
                    })?;
                    let uci = mv.to_string();
                    let next_board = board::apply(&board, mv);
                    let fen_key = board::to_fen_key(&next_board);

                    let mut nags = Vec::new();
                    while let Some(Token::MoveNag(n)) = self.peek() {
                        nags.push(*n);
                        self.advance();
                    }
                    let mut comment = None;
                    if let Some(Token::Comment(c)) = self.peek().cloned() {
                        comment = Some(c);
                        self.advance();
                    }
                    let mut variations = Vec::new();
                    while self.peek() == Some(&Token::LeftParen) {
                        self.advance();
                        variations.push(self.parse_variation(board.clone(), ply)?);
                    }

                    moves.push(MoveNode {
                        ply,
                        san: san_text,
                        uci,
                        fen_key,
                        nags,
                        comment,
                        variations,
                    });
                    ply += 1;
                    board = next_board;
                }
                Some(Token::RightParen) | None => break,
                _ => {
                    self.advance();
                }
            }
        }

        Ok((None, moves, String::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tags_and_moves() {
        let pgn = r#"[Event "Test"]
[White "Alice"]
[Black "Bob"]

1. e4 e5 2. Nf3 Nc6 1-0"#;
        let game = parse_game(pgn).unwrap();
        assert_eq!(game.tag("Event"), Some("Test"));
        assert_eq!(game.moves.len(), 4);
        assert_eq!(game.moves[0].san, "e4");
        assert_eq!(game.moves[0].uci, "e2e4");
        assert_eq!(game.result, "1-0");
    }

    #[test]
    fn hydrates_fen_key_after_each_move() {
        let pgn = "[Event \"Test\"]\n\n1. e4 *";
        let game = parse_game(pgn).unwrap();
        assert_eq!(
            game.moves[0].fen_key,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3"
        );
    }

    #[test]
    fn parses_comment_and_nag() {
        let pgn = "[Event \"Test\"]\n\n1. e4 {best by test} $1 e5 *";
        let game = parse_game(pgn).unwrap();
        assert_eq!(game.moves[0].comment.as_deref(), Some("best by test"));
        assert_eq!(game.moves[0].nags, vec![1]);
    }

    #[test]
    fn parses_variation_from_pre_move_position() {
        let pgn = "[Event \"Test\"]\n\n1. e4 (1. d4 d5) e5 *";
        let game = parse_game(pgn).unwrap();
        assert_eq!(game.moves[0].variations.len(), 1);
        let variation = &game.moves[0].variations[0];
        assert_eq!(variation.moves[0].san, "d4");
        assert_eq!(variation.moves[0].uci, "d2d4");
    }

    #[test]
    fn rejects_illegal_move() {
        let pgn = "[Event \"Test\"]\n\n1. e5 *";
        assert!(parse_game(pgn).is_err());
    }

    #[test]
    fn continues_mainline_after_a_multi_move_variation() {
        let pgn = "[Event \"Test\"]\n\n1. e4 (1. d4 d5) e5 *";
        let game = parse_game(pgn).unwrap();
        assert_eq!(game.moves.len(), 2);
        assert_eq!(game.moves[1].san, "e5");
        assert_eq!(game.result, "*");
    }

    #[test]
    fn rejects_a_stray_closing_paren_with_no_open_variation() {
        let pgn = "[Event \"Test\"]\n\n1. e4 e5) *";
        assert_eq!(
            parse_game(pgn),
            Err(PgnParseError::UnmatchedVariationClose)
        );
    }

    #[test]
    fn splits_multiple_games_on_blank_line_bracket_boundary() {
        let text = "[Event \"A\"]\n\n1. e4 *\n\n[Event \"B\"]\n\n1. d4 *";
        let games = parse_pgn(text).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].tag("Event"), Some("A"));
        assert_eq!(games[1].tag("Event"), Some("B"));
    }
}
