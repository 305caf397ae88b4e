//! Precomputed move geometry.
//!
//! Every table here is built once, lazily, from plain ray-walking over the
//! 8x8 grid. Sliding-piece attacks are never looked up directly: a caller
//! intersects a piece's full-ray table with the occupancy and tests
//! `BIT_BETWEEN` against the blockers, rather than indexing a magic table.

use once_cell::sync::Lazy;

use super::types::{Bitboard, Color, Square};

const DIAGONAL_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONAL_DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];
const KING_DELTAS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn ray_from(sq: usize, dir: (i32, i32)) -> Vec<usize> {
    let mut squares = Vec::new();
    let mut rank = (sq / 8) as i32;
    let mut file = (sq % 8) as i32;
    loop {
        rank += dir.0;
        file += dir.1;
        if !(0..8).contains(&rank) || !(0..8).contains(&file) {
            break;
        }
        squares.push((rank * 8 + file) as usize);
    }
    squares
}

fn leaper_destinations(sq: usize, deltas: &[(i32, i32)]) -> Bitboard {
    let rank = (sq / 8) as i32;
    let file = (sq % 8) as i32;
    let mut bb = Bitboard::EMPTY;
    for &(dr, df) in deltas {
        let r = rank + dr;
        let f = file + df;
        if (0..8).contains(&r) && (0..8).contains(&f) {
            bb = bb.or(Bitboard::from_square(Square::new(r as usize, f as usize)));
        }
    }
    bb
}

fn slider_rays(sq: usize, dirs: &[(i32, i32)]) -> Bitboard {
    dirs.iter().fold(Bitboard::EMPTY, |acc, &dir| {
        ray_from(sq, dir)
            .into_iter()
            .fold(acc, |acc, s| acc.or(Bitboard::from_square(Square::from_index(s))))
    })
}

/// Squares strictly between `a` and `b` along a shared rank, file, or diagonal.
/// Empty if the two squares are not aligned.
pub(crate) static BIT_BETWEEN: Lazy<[[Bitboard; 64]; 64]> = Lazy::new(|| {
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    let all_dirs: Vec<(i32, i32)> = ORTHOGONAL_DIRS.iter().chain(DIAGONAL_DIRS.iter()).copied().collect();
    for a in 0..64 {
        for &dir in &all_dirs {
            let ray = ray_from(a, dir);
            for (i, &b) in ray.iter().enumerate() {
                let between = ray[..i]
                    .iter()
                    .fold(Bitboard::EMPTY, |acc, &s| acc.or(Bitboard::from_square(Square::from_index(s))));
                table[a][b] = between;
            }
        }
    }
    table
});

/// Squares beyond `b`, continuing in the direction from `a` through `b`, to the board edge.
/// Used to find x-ray attackers behind a pinned piece. Empty if not aligned.
pub(crate) static BIT_AFTER: Lazy<[[Bitboard; 64]; 64]> = Lazy::new(|| {
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    let all_dirs: Vec<(i32, i32)> = ORTHOGONAL_DIRS.iter().chain(DIAGONAL_DIRS.iter()).copied().collect();
    for a in 0..64 {
        for &dir in &all_dirs {
            let ray = ray_from(a, dir);
            for (i, &b) in ray.iter().enumerate() {
                let after = ray[i + 1..]
                    .iter()
                    .fold(Bitboard::EMPTY, |acc, &s| acc.or(Bitboard::from_square(Square::from_index(s))));
                table[a][b] = after;
            }
        }
    }
    table
});

pub(crate) static KING_MOVES: Lazy<[Bitboard; 64]> =
    Lazy::new(|| std::array::from_fn(|sq| leaper_destinations(sq, &KING_DELTAS)));

pub(crate) static KNIGHT_MOVES: Lazy<[Bitboard; 64]> =
    Lazy::new(|| std::array::from_fn(|sq| leaper_destinations(sq, &KNIGHT_DELTAS)));

/// Full bishop ray from each square, as if the board were empty.
pub(crate) static BISHOP_RAYS: Lazy<[Bitboard; 64]> =
    Lazy::new(|| std::array::from_fn(|sq| slider_rays(sq, &DIAGONAL_DIRS)));

/// Full rook ray from each square, as if the board were empty.
pub(crate) static ROOK_RAYS: Lazy<[Bitboard; 64]> =
    Lazy::new(|| std::array::from_fn(|sq| slider_rays(sq, &ORTHOGONAL_DIRS)));

pub(crate) static QUEEN_RAYS: Lazy<[Bitboard; 64]> =
    Lazy::new(|| std::array::from_fn(|sq| BISHOP_RAYS[sq].or(ROOK_RAYS[sq])));

fn pawn_diag(sq: usize, forward: i32) -> Bitboard {
    let rank = (sq / 8) as i32;
    let file = (sq % 8) as i32;
    let mut bb = Bitboard::EMPTY;
    for df in [-1, 1] {
        let r = rank + forward;
        let f = file + df;
        if (0..8).contains(&r) && (0..8).contains(&f) {
            bb = bb.or(Bitboard::from_square(Square::new(r as usize, f as usize)));
        }
    }
    bb
}

/// Diagonal squares a pawn of this color standing on `sq` can capture onto.
pub(crate) static PAWN_CAPTURES: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    [
        std::array::from_fn(|sq| pawn_diag(sq, 1)),
        std::array::from_fn(|sq| pawn_diag(sq, -1)),
    ]
});

/// Diagonal squares a pawn of this color would need to occupy to attack `sq`.
/// The inverse mapping of `PAWN_CAPTURES`.
pub(crate) static PAWN_DEFENDS: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    [
        std::array::from_fn(|sq| pawn_diag(sq, -1)),
        std::array::from_fn(|sq| pawn_diag(sq, 1)),
    ]
});

/// Non-capturing forward destinations for a pawn on `sq` (single and, from the
/// home rank, double push). Blocker checks happen at generation time.
pub(crate) static PAWN_MOVES: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    fn moves(sq: usize, color: Color) -> Bitboard {
        let rank = sq / 8;
        let file = sq % 8;
        let forward: i32 = if color == Color::White { 1 } else { -1 };
        let home_rank = if color == Color::White { 1 } else { 6 };
        let mut bb = Bitboard::EMPTY;
        let r1 = rank as i32 + forward;
        if (0..8).contains(&r1) {
            bb = bb.or(Bitboard::from_square(Square::new(r1 as usize, file)));
            if rank == home_rank {
                let r2 = rank as i32 + forward * 2;
                bb = bb.or(Bitboard::from_square(Square::new(r2 as usize, file)));
            }
        }
        bb
    }
    [
        std::array::from_fn(|sq| moves(sq, Color::White)),
        std::array::from_fn(|sq| moves(sq, Color::Black)),
    ]
});

/// For the destination square of a double pawn push, the en passant target
/// square (the square the pawn passed over).
pub(crate) static EP_TARGET_INDEX: Lazy<[Option<Square>; 64]> = Lazy::new(|| {
    std::array::from_fn(|sq| {
        let rank = sq / 8;
        let file = sq % 8;
        if rank == 3 {
            Some(Square::new(2, file))
        } else if rank == 4 {
            Some(Square::new(5, file))
        } else {
            None
        }
    })
});

/// For an en passant target square recorded on the board, the square the
/// captured pawn actually sits on.
pub(crate) static EP_MASK: Lazy<[Bitboard; 64]> = Lazy::new(|| {
    std::array::from_fn(|sq| {
        let rank = sq / 8;
        let file = sq % 8;
        if rank == 2 {
            Bitboard::from_square(Square::new(3, file))
        } else if rank == 5 {
            Bitboard::from_square(Square::new(4, file))
        } else {
            Bitboard::EMPTY
        }
    })
});

/// One side's castling geometry: where the king and rook start and end up,
/// and which squares gate the move.
#[derive(Clone, Copy)]
pub(crate) struct CastleSpec {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares that must be empty for the move to be pseudo-legal.
    pub must_be_empty: Bitboard,
    /// Squares the king transits (from, through, to) that must not be attacked.
    pub king_path: [Square; 3],
}

pub(crate) const WHITE_KINGSIDE: CastleSpec = CastleSpec {
    king_from: Square::new(0, 4),
    king_to: Square::new(0, 6),
    rook_from: Square::new(0, 7),
    rook_to: Square::new(0, 5),
    must_be_empty: Bitboard(0x0000_0000_0000_0060),
    king_path: [Square::new(0, 4), Square::new(0, 5), Square::new(0, 6)],
};

pub(crate) const WHITE_QUEENSIDE: CastleSpec = CastleSpec {
    king_from: Square::new(0, 4),
    king_to: Square::new(0, 2),
    rook_from: Square::new(0, 0),
    rook_to: Square::new(0, 3),
    must_be_empty: Bitboard(0x0000_0000_0000_000E),
    king_path: [Square::new(0, 4), Square::new(0, 3), Square::new(0, 2)],
};

pub(crate) const BLACK_KINGSIDE: CastleSpec = CastleSpec {
    king_from: Square::new(7, 4),
    king_to: Square::new(7, 6),
    rook_from: Square::new(7, 7),
    rook_to: Square::new(7, 5),
    must_be_empty: Bitboard(0x6000_0000_0000_0000),
    king_path: [Square::new(7, 4), Square::new(7, 5), Square::new(7, 6)],
};

pub(crate) const BLACK_QUEENSIDE: CastleSpec = CastleSpec {
    king_from: Square::new(7, 4),
    king_to: Square::new(7, 2),
    rook_from: Square::new(7, 0),
    rook_to: Square::new(7, 3),
    must_be_empty: Bitboard(0x0E00_0000_0000_0000),
    king_path: [Square::new(7, 4), Square::new(7, 3), Square::new(7, 2)],
};

pub(crate) fn castle_spec(color: Color, kingside: bool) -> CastleSpec {
    match (color, kingside) {
        (Color::White, true) => WHITE_KINGSIDE,
        (Color::White, false) => WHITE_QUEENSIDE,
        (Color::Black, true) => BLACK_KINGSIDE,
        (Color::Black, false) => BLACK_QUEENSIDE,
    }
}

/// Interned `"e2e4"`-style strings for every `(from << 7) | to` key.
pub(crate) static UCI_MOVE_STRINGS: Lazy<Vec<String>> = Lazy::new(|| {
    let mut table = vec![String::new(); 1 << 14];
    for from in 0..64usize {
        for to in 0..64usize {
            let key = (from << 7) | to;
            table[key] = format!("{}{}", Square::from_index(from), Square::from_index(to));
        }
    }
    table
});

/// Algebraic names for every square, indexed by square index.
pub(crate) static SQUARE_NAMES: Lazy<[String; 64]> =
    Lazy::new(|| std::array::from_fn(|sq| Square::from_index(sq).to_string()));
