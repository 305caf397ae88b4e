//! Move generation: attack detection, pseudo-legal generation, and legality
//! filtering.
//!
//! Legality is checked by simulation rather than incremental tracking: a
//! pseudo-legal move is applied to a cloned board and the mover's king is
//! tested for check afterwards. There is no pin detection shortcut; a full
//! trial-and-recheck keeps the algorithm simple at the cost of doing more
//! work per move, which is an explicit tradeoff for a board with no
//! incremental make/unmake.

use super::apply::apply;
use super::geometry::{
    self, BISHOP_RAYS, BIT_BETWEEN, KING_MOVES, KNIGHT_MOVES, PAWN_CAPTURES, PAWN_DEFENDS,
    PAWN_MOVES, ROOK_RAYS,
};
use super::state::Board;
use super::types::{pop_lsb, Bitboard, Color, Move, MoveList, Piece, Square, PROMOTION_PIECES};

/// Is `sq` attacked by any of `side`'s pieces on `board`?
#[must_use]
pub fn is_attacked(board: &Board, side: Color, sq: Square) -> bool {
    let idx = sq.as_index();

    if PAWN_DEFENDS[side.index()][idx].intersects(board.pieces(side, Piece::Pawn)) {
        return true;
    }
    if KNIGHT_MOVES[idx].intersects(board.pieces(side, Piece::Knight)) {
        return true;
    }
    if KING_MOVES[idx].intersects(board.pieces(side, Piece::King)) {
        return true;
    }

    let diag_attackers = board
        .pieces(side, Piece::Bishop)
        .or(board.pieces(side, Piece::Queen));
    let mut candidates = BISHOP_RAYS[idx].and(diag_attackers);
    while !candidates.is_empty() {
        let from = pop_lsb(&mut candidates);
        if BIT_BETWEEN[idx][from.as_index()].is_disjoint(board.all_occupied()) {
            return true;
        }
    }

    let ortho_attackers = board
        .pieces(side, Piece::Rook)
        .or(board.pieces(side, Piece::Queen));
    let mut candidates = ROOK_RAYS[idx].and(ortho_attackers);
    while !candidates.is_empty() {
        let from = pop_lsb(&mut candidates);
        if BIT_BETWEEN[idx][from.as_index()].is_disjoint(board.all_occupied()) {
            return true;
        }
    }

    false
}

/// Is `color`'s king currently in check?
#[must_use]
pub fn in_check(board: &Board, color: Color) -> bool {
    is_attacked(board, color.opponent(), board.king_square(color))
}

/// Every pseudo-legal move for the side to move, ignoring whether it leaves
/// the mover's own king in check.
#[must_use]
pub fn pseudo_legal_moves(board: &Board) -> MoveList {
    let mut moves = MoveList::new();
    let side = board.side_to_move();
    generate_pawn_moves(board, side, &mut moves);
    generate_leaper_moves(board, side, Piece::Knight, &KNIGHT_MOVES, &mut moves);
    generate_slider_moves(board, side, Piece::Bishop, &BISHOP_RAYS, &mut moves);
    generate_slider_moves(board, side, Piece::Rook, &ROOK_RAYS, &mut moves);
    generate_queen_moves(board, side, &mut moves);
    generate_leaper_moves(board, side, Piece::King, &KING_MOVES, &mut moves);
    generate_castling_moves(board, side, &mut moves);
    moves
}

/// Every fully legal move for the side to move.
#[must_use]
pub fn legal_moves(board: &Board) -> MoveList {
    let side = board.side_to_move();
    let mut legal = MoveList::new();
    for mv in pseudo_legal_moves(board).iter() {
        let next = apply(board, *mv);
        if !in_check(&next, side) {
            legal.push(*mv);
        }
    }
    legal
}

#[must_use]
pub fn is_checkmate(board: &Board) -> bool {
    in_check(board, board.side_to_move()) && legal_moves(board).is_empty()
}

#[must_use]
pub fn is_stalemate(board: &Board) -> bool {
    !in_check(board, board.side_to_move()) && legal_moves(board).is_empty()
}

fn generate_leaper_moves(
    board: &Board,
    side: Color,
    piece: Piece,
    table: &[Bitboard; 64],
    moves: &mut MoveList,
) {
    let own = board.occupied_by(side);
    let mut sources = board.pieces(side, piece);
    while !sources.is_empty() {
        let from = pop_lsb(&mut sources);
        let mut dests = table[from.as_index()].and(own.not());
        while !dests.is_empty() {
            let to = pop_lsb(&mut dests);
            moves.push(Move::new(from, to, piece, None));
        }
    }
}

fn generate_slider_moves(
    board: &Board,
    side: Color,
    piece: Piece,
    rays: &[Bitboard; 64],
    moves: &mut MoveList,
) {
    let own = board.occupied_by(side);
    let mut sources = board.pieces(side, piece);
    while !sources.is_empty() {
        let from = pop_lsb(&mut sources);
        let mut candidates = rays[from.as_index()].and(own.not());
        while !candidates.is_empty() {
            let to = pop_lsb(&mut candidates);
            if BIT_BETWEEN[from.as_index()][to.as_index()].is_disjoint(board.all_occupied()) {
                moves.push(Move::new(from, to, piece, None));
            }
        }
    }
}

fn generate_queen_moves(board: &Board, side: Color, moves: &mut MoveList) {
    let own = board.occupied_by(side);
    let mut sources = board.pieces(side, Piece::Queen);
    while !sources.is_empty() {
        let from = pop_lsb(&mut sources);
        let mut candidates = BISHOP_RAYS[from.as_index()]
            .or(ROOK_RAYS[from.as_index()])
            .and(own.not());
        while !candidates.is_empty() {
            let to = pop_lsb(&mut candidates);
            if BIT_BETWEEN[from.as_index()][to.as_index()].is_disjoint(board.all_occupied()) {
                moves.push(Move::new(from, to, Piece::Queen, None));
            }
        }
    }
}

fn generate_pawn_moves(board: &Board, side: Color, moves: &mut MoveList) {
    let promo_rank = if side == Color::White { 7 } else { 0 };
    let opponent = side.opponent();
    let mut sources = board.pieces(side, Piece::Pawn);
    while !sources.is_empty() {
        let from = pop_lsb(&mut sources);
        let from_idx = from.as_index();

        let mut pushes = PAWN_MOVES[side.index()][from_idx].and(board.all_occupied().not());
        while !pushes.is_empty() {
            let to = pop_lsb(&mut pushes);
            let double_push = (to.rank() as i32 - from.rank() as i32).abs() == 2;
            if double_push && BIT_BETWEEN[from_idx][to.as_index()].intersects(board.all_occupied())
            {
                continue;
            }
            push_pawn_move(from, to, promo_rank, moves);
        }

        let mut captures = PAWN_CAPTURES[side.index()][from_idx].and(board.occupied_by(opponent));
        while !captures.is_empty() {
            let to = pop_lsb(&mut captures);
            push_pawn_move(from, to, promo_rank, moves);
        }

        if let Some(ep) = board.en_passant_target() {
            if PAWN_CAPTURES[side.index()][from_idx].contains(ep) {
                moves.push(Move::new(from, ep, Piece::Pawn, None));
            }
        }
    }
}

fn push_pawn_move(from: Square, to: Square, promo_rank: usize, moves: &mut MoveList) {
    if to.rank() == promo_rank {
        for &promo in &PROMOTION_PIECES {
            moves.push(Move::new(from, to, Piece::Pawn, Some(promo)));
        }
    } else {
        moves.push(Move::new(from, to, Piece::Pawn, None));
    }
}

fn generate_castling_moves(board: &Board, side: Color, moves: &mut MoveList) {
    let opponent = side.opponent();
    for kingside in [true, false] {
        if !board.castling_rights().has(side, kingside) {
            continue;
        }
        let spec = geometry::castle_spec(side, kingside);
        if spec.must_be_empty.intersects(board.all_occupied()) {
            continue;
        }
        if spec
            .king_path
            .iter()
            .any(|&sq| is_attacked(board, opponent, sq))
        {
            continue;
        }
        moves.push(Move::new(spec.king_from, spec.king_to, Piece::King, None));
    }
}
