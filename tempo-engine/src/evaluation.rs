//! Evaluation functions that return a Score from the point of view of an agent.

use crate::coretypes::{Color, PieceKind, Score, Square, HALFMOVE_LIMIT};
use crate::movegen as mg;
use crate::position::Position;

/// Returns relative strength difference of pieces in position.
/// Is equivalent of pieces_material(White) - pieces_material(Black).
/// A positive value is an advantage for white, 0 is even, negative is advantage for black.
pub fn material(position: &Position) -> Score {
    position
        .pieces()
        .pieces()
        .fold(Score::default(), |acc, (_, piece)| match piece.color() {
            Color::White => acc + piece.piece_kind().material(),
            Color::Black => acc - piece.piece_kind().material(),
        })
}

/// Returns true if neither side can ever deliver checkmate.
/// That is the case with bare kings, a single knight, or any number of bishops that all
/// stand on one color complex. Any pawn, rook or queen is always sufficient.
pub fn has_insufficient_material(position: &Position) -> bool {
    let mut knights = 0;
    let mut bishops: Vec<Square> = Vec::new();

    for (square, piece) in position.pieces().pieces() {
        match piece.piece_kind() {
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            PieceKind::Knight => knights += 1,
            PieceKind::Bishop => bishops.push(square),
            PieceKind::King => (),
        }
    }

    match (knights, bishops.as_slice()) {
        (0, []) => true,
        (1, []) => true,
        (0, [first, rest @ ..]) => rest.iter().all(|bishop| first.same_color_complex(bishop)),
        _ => false,
    }
}

/// Cheap repetition heuristic over the move window.
/// Once the draw countdown has expired and the window is full, the position is treated as
/// repeated when the last four moves started from the same squares as the four before them.
pub fn is_repetition(position: &Position) -> bool {
    let history = position.history();
    if position.draw_countdown() > 0 || !history.is_full() {
        return false;
    }

    let moves = history.as_slice();
    let half = moves.len() / 2;
    (0..half).all(|idx| moves[idx].from() == moves[idx + half].from())
}

/// Returns true if the position is drawn by material, the halfmove clock or repetition.
pub fn is_draw(position: &Position) -> bool {
    has_insufficient_material(position)
        || position.halfmoves() >= HALFMOVE_LIMIT
        || is_repetition(position)
}

/// Primary evaluate function for engine.
/// A missing king decides the game, a drawn position scores `Score::DRAW`,
/// and anything else is the material balance from `agent`'s point of view.
pub fn evaluate(position: &Position, agent: Color) -> Score {
    let pieces = position.pieces();
    if pieces.find_king(agent).is_none() {
        return -Score::WIN;
    }
    if pieces.find_king(!agent).is_none() {
        return Score::WIN;
    }

    if is_draw(position) {
        return Score::DRAW;
    }

    match agent {
        Color::White => material(position),
        Color::Black => -material(position),
    }
}

/// Scores a position where `side_to_move` has no legal moves.
/// A king in check is mated, otherwise the position is stalemate.
pub fn draw_or_win(position: &Position, side_to_move: Color, agent: Color) -> Score {
    if mg::is_in_check(position, side_to_move) {
        match side_to_move == agent {
            true => -Score::WIN,
            false => Score::WIN,
        }
    } else {
        Score::DRAW
    }
}
