//! Per piece kind pseudo-legal move walkers.
//!
//! Every walker appends the moves of a single piece to a MoveList and returns true
//! if any generated destination holds the opposing king.

use crate::coretypes::{Color, Move, PieceKind, Square};
use crate::movegen::attacks_king;
use crate::movelist::MoveList;
use crate::position::Position;

const ORTHOGONALS: [(i8, i8); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
const DIAGONALS: [(i8, i8); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
];
const KING_STEPS: [(i8, i8); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Outcome of looking at a destination square from the point of view of `color`.
enum Landing {
    Empty,
    Capture { king: bool },
    Blocked,
}

fn landing(position: &Position, to: Square, color: Color) -> Landing {
    match position.pieces[to] {
        None => Landing::Empty,
        Some(piece) if piece.color == color => Landing::Blocked,
        Some(piece) => Landing::Capture {
            king: piece.piece_kind == PieceKind::King,
        },
    }
}

/// Walk each direction until the board edge, an own piece, or a captured enemy piece.
fn slide(
    moves: &mut MoveList,
    position: &Position,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
) -> bool {
    let mut hits_king = false;
    for &(file_delta, rank_delta) in directions {
        let mut cursor = from.offset(file_delta, rank_delta);
        while let Some(to) = cursor {
            match landing(position, to, color) {
                Landing::Empty => moves.push(Move::new(from, to, None, color)),
                Landing::Capture { king } => {
                    hits_king |= king;
                    moves.push(Move::new(from, to, None, color));
                    break;
                }
                Landing::Blocked => break,
            }
            cursor = to.offset(file_delta, rank_delta);
        }
    }
    hits_king
}

/// Visit each fixed offset once.
fn leap(
    moves: &mut MoveList,
    position: &Position,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
) -> bool {
    let mut hits_king = false;
    for to in offsets
        .iter()
        .filter_map(|&(file_delta, rank_delta)| from.offset(file_delta, rank_delta))
    {
        match landing(position, to, color) {
            Landing::Empty => moves.push(Move::new(from, to, None, color)),
            Landing::Capture { king } => {
                hits_king |= king;
                moves.push(Move::new(from, to, None, color));
            }
            Landing::Blocked => (),
        }
    }
    hits_king
}

pub(crate) fn rook_pseudo_moves(
    moves: &mut MoveList,
    position: &Position,
    from: Square,
    color: Color,
) -> bool {
    slide(moves, position, from, color, &ORTHOGONALS)
}

pub(crate) fn bishop_pseudo_moves(
    moves: &mut MoveList,
    position: &Position,
    from: Square,
    color: Color,
) -> bool {
    slide(moves, position, from, color, &DIAGONALS)
}

pub(crate) fn queen_pseudo_moves(
    moves: &mut MoveList,
    position: &Position,
    from: Square,
    color: Color,
) -> bool {
    let orthogonal = slide(moves, position, from, color, &ORTHOGONALS);
    let diagonal = slide(moves, position, from, color, &DIAGONALS);
    orthogonal || diagonal
}

pub(crate) fn knight_pseudo_moves(
    moves: &mut MoveList,
    position: &Position,
    from: Square,
    color: Color,
) -> bool {
    leap(moves, position, from, color, &KNIGHT_JUMPS)
}

/// King steps, plus castling when `castle` is set.
/// Castling is only generated when the side is not in check, so callers pass `!in_check`.
pub(crate) fn king_pseudo_moves(
    moves: &mut MoveList,
    position: &Position,
    from: Square,
    color: Color,
    castle: bool,
) -> bool {
    let hits_king = leap(moves, position, from, color, &KING_STEPS);
    if castle {
        castling_moves(moves, position, from, color);
    }
    hits_king
}

/// Castling requires an unmoved king on its start square, an unmoved own rook in the corner,
/// empty squares between them, and an unattacked square for the king to pass over.
/// The king is assumed to not be in check.
fn castling_moves(moves: &mut MoveList, position: &Position, from: Square, color: Color) {
    let back_rank = color.back_rank();
    let king_start = Square::new(4, back_rank);
    if from != king_start || position.has_moved[king_start] {
        return;
    }

    // (rook file, files that must be empty, file the king passes over, king destination file)
    const SIDES: [(u8, &[u8], u8, u8); 2] = [(7, &[5, 6], 5, 6), (0, &[1, 2, 3], 3, 2)];

    for (rook_file, between, crossed_file, to_file) in SIDES {
        let rook_square = Square::new(rook_file, back_rank);
        let own_rook = position.pieces[rook_square]
            .is_some_and(|piece| piece.color == color && piece.piece_kind == PieceKind::Rook);
        if !own_rook || position.has_moved[rook_square] {
            continue;
        }

        let is_clear = between
            .iter()
            .all(|&file| position.pieces[Square::new(file, back_rank)].is_none());
        if !is_clear {
            continue;
        }

        let crossed = Square::new(crossed_file, back_rank);
        let mut passing = position.clone();
        passing.pieces[crossed] = passing.pieces[king_start].take();
        if attacks_king(&passing, !color) {
            continue;
        }

        moves.push(Move::new(from, Square::new(to_file, back_rank), None, color));
    }
}

/// Pushes one pawn move, expanded into all promotions when it lands on the last rank.
fn push_pawn_move(moves: &mut MoveList, from: Square, to: Square, color: Color) {
    if to.rank == color.promotion_rank() {
        for promotion in PieceKind::PROMOTIONS {
            moves.push(Move::new(from, to, Some(promotion), color));
        }
    } else {
        moves.push(Move::new(from, to, None, color));
    }
}

pub(crate) fn pawn_pseudo_moves(
    moves: &mut MoveList,
    position: &Position,
    from: Square,
    color: Color,
) -> bool {
    let forward = color.forward();
    let mut hits_king = false;

    // Single and double pushes.
    if let Some(single) = from.offset(0, forward) {
        if position.pieces[single].is_none() {
            push_pawn_move(moves, from, single, color);

            if from.rank == color.pawn_rank() {
                if let Some(double) = single.offset(0, forward) {
                    if position.pieces[double].is_none() {
                        moves.push(Move::new(from, double, None, color));
                    }
                }
            }
        }
    }

    // Diagonal captures.
    for file_delta in [1, -1] {
        if let Some(to) = from.offset(file_delta, forward) {
            if let Landing::Capture { king } = landing(position, to, color) {
                hits_king |= king;
                push_pawn_move(moves, from, to, color);
            }
        }
    }

    // En passant against a pawn that just advanced two squares to land beside this one.
    if let Some(last) = position.history.last() {
        let enemy = !color;
        let enemy_pawn = position.pieces[last.to]
            .is_some_and(|piece| piece.color == enemy && piece.piece_kind == PieceKind::Pawn);
        let double_advance = last.mover == enemy
            && last.from.file == last.to.file
            && last.from.rank == enemy.pawn_rank()
            && last.to.rank as i8 == last.from.rank as i8 + 2 * enemy.forward();
        let beside = last.to.rank == from.rank && last.to.file.abs_diff(from.file) == 1;

        if enemy_pawn && double_advance && beside {
            if let Some(to) = Square::try_new(last.to.file as i8, from.rank as i8 + forward) {
                if position.pieces[to].is_none() {
                    moves.push(Move::new(from, to, None, color));
                }
            }
        }
    }

    hits_king
}
