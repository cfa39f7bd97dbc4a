//! Move generation and check detection over the mailbox board.

mod walkers;

use crate::coretypes::{Color, PieceKind, Square};
use crate::movelist::MoveList;
use crate::position::Position;

/// Appends the pseudo-legal moves of the piece on `from` and returns true if any of them lands on
/// the opposing king. Castling is only considered when `castle` is true.
fn piece_pseudo_moves(
    moves: &mut MoveList,
    position: &Position,
    from: Square,
    color: Color,
    piece_kind: PieceKind,
    castle: bool,
) -> bool {
    match piece_kind {
        PieceKind::King => walkers::king_pseudo_moves(moves, position, from, color, castle),
        PieceKind::Queen => walkers::queen_pseudo_moves(moves, position, from, color),
        PieceKind::Rook => walkers::rook_pseudo_moves(moves, position, from, color),
        PieceKind::Bishop => walkers::bishop_pseudo_moves(moves, position, from, color),
        PieceKind::Knight => walkers::knight_pseudo_moves(moves, position, from, color),
        PieceKind::Pawn => walkers::pawn_pseudo_moves(moves, position, from, color),
    }
}

/// Generate all pseudo-legal moves for `side`.
/// Pseudo-legal moves may leave the mover's own king attacked.
/// `side_in_check` suppresses castling.
pub fn pseudo_legal_moves(position: &Position, side: Color, side_in_check: bool) -> MoveList {
    let mut moves = MoveList::new();
    for (from, piece) in position.pieces.pieces() {
        if piece.color == side {
            piece_pseudo_moves(
                &mut moves,
                position,
                from,
                side,
                piece.piece_kind,
                !side_in_check,
            );
        }
    }
    moves
}

/// Generate all legal moves for `side`.
/// A pseudo-legal move is kept only if the mover's king is not attacked after it is applied.
pub fn legal_moves(position: &Position, side: Color, side_in_check: bool) -> MoveList {
    pseudo_legal_moves(position, side, side_in_check)
        .into_iter()
        .filter(|move_| !is_in_check(&position.transition(*move_), side))
        .collect()
}

/// Returns true if any piece of `side` attacks the opposing king.
/// Stops at the first walker that reaches the king.
pub fn attacks_king(position: &Position, side: Color) -> bool {
    let mut scratch = MoveList::new();
    for (from, piece) in position.pieces.pieces() {
        if piece.color == side {
            scratch.clear();
            if piece_pseudo_moves(&mut scratch, position, from, side, piece.piece_kind, false) {
                return true;
            }
        }
    }
    false
}

/// Returns true if `side`'s king is attacked.
pub fn is_in_check(position: &Position, side: Color) -> bool {
    attacks_king(position, !side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::Move;
    use crate::fen::Fen;

    fn has_move(moves: &MoveList, s: &str, mover: Color) -> bool {
        let target = Move::parse(s, mover).unwrap();
        moves.iter().any(|move_| *move_ == target)
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let position = Position::start_position();
        assert_eq!(legal_moves(&position, Color::White, false).len(), 20);
        assert_eq!(legal_moves(&position, Color::Black, false).len(), 20);
    }

    #[test]
    fn legal_moves_never_leave_king_attacked() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "4k3/8/8/8/8/8/4r3/4K3 w - - 0 1",
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        ];
        for fen in fens {
            let (position, side) = Position::parse_fen(fen).unwrap();
            let in_check = is_in_check(&position, side);
            for move_ in legal_moves(&position, side, in_check) {
                let child = position.transition(move_);
                assert!(!is_in_check(&child, side), "{fen}: {move_}");
            }
        }
    }

    #[test]
    fn fools_mate_has_no_moves() {
        let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
        let (position, side) = Position::parse_fen(fen).unwrap();
        assert!(is_in_check(&position, side));
        assert!(legal_moves(&position, side, true).is_empty());
    }

    #[test]
    fn castling_preconditions() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let (position, side) = Position::parse_fen(fen).unwrap();
        let moves = legal_moves(&position, side, false);
        assert!(has_move(&moves, "e1g1", Color::White));
        assert!(has_move(&moves, "e1c1", Color::White));

        // Moved king.
        let (position, side) = Position::parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1").unwrap();
        let moves = legal_moves(&position, side, false);
        assert!(!has_move(&moves, "e1g1", Color::White));
        assert!(!has_move(&moves, "e1c1", Color::White));

        // Moved queenside rook only.
        let (position, side) = Position::parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kkq - 0 1").unwrap();
        let moves = legal_moves(&position, side, false);
        assert!(has_move(&moves, "e1g1", Color::White));
        assert!(!has_move(&moves, "e1c1", Color::White));

        // Occupied square between king and rook.
        let (position, side) =
            Position::parse_fen("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1").unwrap();
        let moves = legal_moves(&position, side, false);
        assert!(!has_move(&moves, "e1g1", Color::White));
        assert!(!has_move(&moves, "e1c1", Color::White));

        // King in check.
        let (position, side) =
            Position::parse_fen("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1").unwrap();
        let in_check = is_in_check(&position, side);
        assert!(in_check);
        let moves = legal_moves(&position, side, in_check);
        assert!(!has_move(&moves, "e1g1", Color::White));
        assert!(!has_move(&moves, "e1c1", Color::White));

        // Square the king passes over is attacked.
        let (position, side) =
            Position::parse_fen("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1").unwrap();
        let moves = legal_moves(&position, side, false);
        assert!(!has_move(&moves, "e1g1", Color::White));
        assert!(has_move(&moves, "e1c1", Color::White));
    }

    #[test]
    fn black_castles_on_its_own_back_rank() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1";
        let (position, side) = Position::parse_fen(fen).unwrap();
        let moves = legal_moves(&position, side, false);
        assert!(has_move(&moves, "e8g8", Color::Black));
        assert!(has_move(&moves, "e8c8", Color::Black));
    }
}
