//! Square types and utilities.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// A square on the chess board, stored as a compact 0-63 index.
///
/// Index layout: `rank * 8 + file`, where a1=0, b1=1, ..., h8=63. This is a
/// deliberate departure from the rank-major-reversed-file numbering spec.md
/// uses for illustration (`rank*8+(7-file)`); `rank*8+file` is the layout
/// every bitboard constant and shift in this crate (`Bitboard::FILE_A`,
/// `EP_MASK`, `geometry`'s ray tables) assumes, so square arithmetic and
/// bitboard bit positions agree without a translation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    /// Create a new square from rank and file (both 0-7).
    /// Does not perform bounds checking.
    #[inline]
    #[must_use]
    pub const fn new(rank: usize, file: usize) -> Self {
        Square((rank * 8 + file) as u8)
    }

    /// Get the rank (0-7, where 0 = rank 1)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 / 8) as usize
    }

    /// Get the file (0-7, where 0 = file a)
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 % 8) as usize
    }

    /// Get the square's index (0-63, a1=0, b1=1, ..., h8=63)
    #[inline]
    #[must_use]
    pub const fn as_index(self) -> usize {
        self.0 as usize
    }

    /// Create a square from an index (0-63)
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square(idx as u8)
    }

    /// Alias for `as_index`, returns the internal index directly
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (self.file() as u8 + b'a') as char,
            self.rank() + 1
        )
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            });
        }

        let file = match chars[0] {
            'a'..='h' => chars[0] as usize - 'a' as usize,
            _ => {
                return Err(SquareError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };

        let rank = match chars[1] {
            '1'..='8' => chars[1] as usize - '1' as usize,
            _ => {
                return Err(SquareError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };

        Ok(Square::new(rank, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_new() {
        let sq = Square::new(0, 0);
        assert_eq!(sq.rank(), 0);
        assert_eq!(sq.file(), 0);

        let sq = Square::new(7, 7);
        assert_eq!(sq.rank(), 7);
        assert_eq!(sq.file(), 7);
    }

    #[test]
    fn test_square_index() {
        let a1 = Square::new(0, 0);
        assert_eq!(a1.index(), 0);
        assert_eq!(a1.as_index(), 0);

        let h8 = Square::new(7, 7);
        assert_eq!(h8.index(), 63);
    }

    #[test]
    fn test_square_from_index() {
        let sq = Square::from_index(0);
        assert_eq!(sq.rank(), 0);
        assert_eq!(sq.file(), 0);

        let sq = Square::from_index(63);
        assert_eq!(sq.rank(), 7);
        assert_eq!(sq.file(), 7);
    }

    #[test]
    fn test_square_display() {
        let a1 = Square::new(0, 0);
        assert_eq!(a1.to_string(), "a1");

        let h8 = Square::new(7, 7);
        assert_eq!(h8.to_string(), "h8");

        let e4 = Square::new(3, 4);
        assert_eq!(e4.to_string(), "e4");
    }

    #[test]
    fn test_square_from_str() {
        let sq: Square = "a1".parse().unwrap();
        assert_eq!(sq.rank(), 0);
        assert_eq!(sq.file(), 0);

        let sq: Square = "h8".parse().unwrap();
        assert_eq!(sq.rank(), 7);
        assert_eq!(sq.file(), 7);
    }

    #[test]
    fn test_square_from_str_error() {
        assert!("z1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
        assert!("a1b".parse::<Square>().is_err());
    }

    #[test]
    fn test_index_roundtrips_through_rank_file() {
        for idx in 0..64usize {
            let sq = Square::from_index(idx);
            assert_eq!(Square::new(sq.rank(), sq.file()).as_index(), idx);
        }
    }
}
