//! The PGN game tree: tags, moves (each carrying its SAN/UCI/resulting
//! position), comments, NAGs, and variations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single game parsed from a PGN text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Game {
    pub tags: Vec<Tag>,
    pub comment: Option<String>,
    pub moves: Vec<MoveNode>,
    pub result: String,
}

impl Game {
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.value.as_str())
    }

    #[must_use]
    pub fn white_elo(&self) -> Option<u32> {
        self.tag("WhiteElo").and_then(|v| v.parse().ok())
    }

    #[must_use]
    pub fn black_elo(&self) -> Option<u32> {
        self.tag("BlackElo").and_then(|v| v.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tag {
    pub name: String,
    pub value: String,
}

/// One played move: its ply number, notations, the FEN key of the position
/// reached, any NAGs, a trailing comment, and alternative lines.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveNode {
    pub ply: u32,
    pub san: String,
    pub uci: String,
    pub fen_key: String,
    pub nags: Vec<u8>,
    pub comment: Option<String>,
    pub variations: Vec<Variation>,
}

/// An alternative continuation branching off the move it is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variation {
    pub comments: Vec<String>,
    pub moves: Vec<MoveNode>,
}
