//! Holds Position struct, the most important data structure for the engine.
//! Position represents a chess position as seen by a searching agent.

use std::fmt::{self, Display};

use crate::boardrepr::{Mailbox, MovedGrid};
use crate::coretypes::{Color, Move, MoveCount, Piece, PieceKind, Square, DRAW_COUNTDOWN};
use crate::error::{self, ErrorKind};
use crate::movegen as mg;
use crate::movelist::{MoveHistory, MoveList};
use crate::search::HistoryTable;

/// struct Position
/// An immutable node of the game tree. Transitions produce new Positions.
/// The side to move is not stored, callers always pass it explicitly.
/// # Members:
/// * pieces - square-centric container of all pieces.
/// * has_moved - per square flags, consulted for castling eligibility.
/// * halfmoves - Tracker for 50 move draw rule. Resets after capture/pawn move.
/// * draw_countdown - Plies until the repetition check applies. Resets to 8 after capture/pawn move.
/// * history - the last eight applied moves, oldest first.
/// * last_move - the move that produced this position, None for a root.
/// * ordering_score - history table value of `last_move` when this position was created.
/// * is_quiet - true unless `last_move` was a capture, pawn move or promotion.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Position {
    pub(crate) pieces: Mailbox,
    pub(crate) has_moved: MovedGrid,
    pub(crate) halfmoves: MoveCount,
    pub(crate) draw_countdown: u8,
    pub(crate) history: MoveHistory,
    pub(crate) last_move: Option<Move>,
    pub(crate) ordering_score: u32,
    pub(crate) is_quiet: bool,
}

impl Position {
    /// Standard chess start position.
    pub fn start_position() -> Self {
        Self::new(
            Mailbox::start_position(),
            MovedGrid::new(),
            0,
            MoveHistory::new(),
        )
    }

    /// Create a root position. The draw countdown is derived from the halfmove clock.
    pub fn new(
        pieces: Mailbox,
        has_moved: MovedGrid,
        halfmoves: MoveCount,
        history: MoveHistory,
    ) -> Self {
        let draw_countdown = DRAW_COUNTDOWN - halfmoves.min(DRAW_COUNTDOWN as MoveCount) as u8;
        let last_move = history.last().copied();
        Self {
            pieces,
            has_moved,
            halfmoves,
            draw_countdown,
            history,
            last_move,
            ordering_score: 0,
            is_quiet: true,
        }
    }

    /// Const getters.
    pub fn pieces(&self) -> &Mailbox {
        &self.pieces
    }
    pub fn has_moved(&self) -> &MovedGrid {
        &self.has_moved
    }
    pub fn halfmoves(&self) -> MoveCount {
        self.halfmoves
    }
    pub fn draw_countdown(&self) -> u8 {
        self.draw_countdown
    }
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }
    pub fn ordering_score(&self) -> u32 {
        self.ordering_score
    }
    pub fn is_quiet(&self) -> bool {
        self.is_quiet
    }

    /// Number of pieces on the board, kings included.
    pub fn piece_count(&self) -> usize {
        self.pieces.pieces().count()
    }

    /// Generates a new Position from applying a move to this one, without any legality checking.
    /// Handles promotion, castling rook relocation, en passant capture, move counters and history.
    /// The ordering score of the new position is zero.
    pub fn transition(&self, move_: Move) -> Self {
        let mut next = self.clone();
        let Move {
            from,
            to,
            promotion,
            mover,
        } = move_;

        let moving = self.pieces[from];
        let is_pawn_move = matches!(moving, Some(piece) if piece.piece_kind == PieceKind::Pawn);
        let is_king_move = matches!(moving, Some(piece) if piece.piece_kind == PieceKind::King);
        let mut is_capture = self.pieces[to].is_some();

        // En passant, a pawn moving diagonally onto an empty square.
        if is_pawn_move && from.file != to.file && self.pieces[to].is_none() {
            next.pieces[Square::new(to.file, from.rank)] = None;
            is_capture = true;
        }

        next.pieces[from] = None;
        next.pieces[to] = match promotion {
            Some(piece_kind) => Some(Piece::new(mover, piece_kind)),
            None => moving,
        };

        // Castling, the rook moves to the square the king passed over.
        if is_king_move && move_.is_castle_shape() {
            let (rook_from, rook_to) = match to.file > from.file {
                true => (Square::new(7, from.rank), Square::new(5, from.rank)),
                false => (Square::new(0, from.rank), Square::new(3, from.rank)),
            };
            next.pieces[rook_to] = next.pieces[rook_from].take();
            next.has_moved[rook_from] = false;
            next.has_moved[rook_to] = true;
        }

        next.has_moved[from] = false;
        next.has_moved[to] = true;

        if is_capture || is_pawn_move || promotion.is_some() {
            next.halfmoves = 0;
            next.draw_countdown = DRAW_COUNTDOWN;
            next.is_quiet = false;
        } else {
            next.halfmoves = self.halfmoves.saturating_add(1);
            next.draw_countdown = self.draw_countdown.saturating_sub(1);
            next.is_quiet = true;
        }

        next.history.push(move_);
        next.last_move = Some(move_);
        next.ordering_score = 0;
        next
    }

    /// Like `transition`, but fails if `move_` is not legal for its mover.
    pub fn try_transition(&self, move_: Move) -> error::Result<Self> {
        match self.legal_moves(move_.mover()).contains(&move_) {
            true => Ok(self.transition(move_)),
            false => Err((ErrorKind::GameIllegalMove, move_).into()),
        }
    }

    /// Generates a new Position from applying a move, scoring it for move ordering with `history`.
    pub fn apply(&self, move_: Move, history: &HistoryTable) -> Self {
        let mut next = self.transition(move_);
        next.ordering_score = history.score(&move_);
        next
    }

    /// Returns true if `side`'s king is attacked.
    pub fn is_in_check(&self, side: Color) -> bool {
        mg::is_in_check(self, side)
    }

    /// Returns a list of all legal moves for `side`.
    pub fn legal_moves(&self, side: Color) -> MoveList {
        mg::legal_moves(self, side, self.is_in_check(side))
    }

    /// Returns every legal successor of this position for `side`, scored with `history`.
    pub fn children(&self, side: Color, history: &HistoryTable) -> Vec<Position> {
        let in_check = self.is_in_check(side);
        mg::pseudo_legal_moves(self, side, in_check)
            .into_iter()
            .map(|move_| self.apply(move_, history))
            .filter(|child| !child.is_in_check(side))
            .collect()
    }
}

/// Defaults to standard chess start position.
impl Default for Position {
    fn default() -> Self {
        Self::start_position()
    }
}

/// Displays the pretty-printed chess board.
/// The side to move is not part of a Position, so a Fen needs `Fen::to_fen` with a side.
impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pieces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn parse(fen: &str) -> (Position, Color) {
        Position::parse_fen(fen).unwrap()
    }

    fn square(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn pretty_print_position() {
        let start_pos = Position::start_position();
        let displayed = start_pos.to_string();
        assert!(displayed.starts_with("+---+"));
        assert!(displayed.contains("| r | n | b | q | k | b | n | r | 8\n"));
        assert!(displayed.contains("| P | P | P | P | P | P | P | P | 2\n"));
        assert!(!displayed.contains(" w "));
    }

    #[test]
    fn transition_moves_piece() {
        let position = Position::start_position();
        let e2e4 = Move::parse("e2e4", Color::White).unwrap();
        let next = position.transition(e2e4);

        assert_eq!(next.pieces[square("e2")], None);
        assert_eq!(
            next.pieces[square("e4")],
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert!(next.has_moved[square("e4")]);
        assert_eq!(next.last_move, Some(e2e4));
        assert!(!next.is_quiet);
        assert_eq!(next.halfmoves, 0);
        assert_eq!(next.draw_countdown, DRAW_COUNTDOWN);
        // Parent is untouched.
        assert_eq!(position, Position::start_position());
    }

    #[test]
    fn quiet_moves_advance_counters() {
        let position = Position::start_position();
        let next = position.transition(Move::parse("g1f3", Color::White).unwrap());
        let next = next.transition(Move::parse("g8f6", Color::Black).unwrap());

        assert!(next.is_quiet);
        assert_eq!(next.halfmoves, 2);
        assert_eq!(next.draw_countdown, DRAW_COUNTDOWN - 2);
        assert_eq!(next.history.len(), 2);
    }

    #[test]
    fn piece_count_preserved_except_captures() {
        let (position, side) =
            parse("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let count = position.piece_count();
        for move_ in position.legal_moves(side) {
            let is_capture = position.pieces[move_.to].is_some();
            let child = position.transition(move_);
            match is_capture {
                true => assert_eq!(child.piece_count(), count - 1, "{move_}"),
                false => assert_eq!(child.piece_count(), count, "{move_}"),
            }
        }
    }

    #[test]
    fn castling_relocates_rook() {
        let (position, _) = parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let kingside = position.transition(Move::parse("e1g1", Color::White).unwrap());
        assert_eq!(kingside.pieces[square("h1")], None);
        assert_eq!(
            kingside.pieces[square("f1")],
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert!(kingside.has_moved[square("f1")]);

        let queenside = position.transition(Move::parse("e8c8", Color::Black).unwrap());
        assert_eq!(queenside.pieces[square("a8")], None);
        assert_eq!(
            queenside.pieces[square("d8")],
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert!(queenside.is_quiet);
    }

    #[test]
    fn en_passant_appears_then_vanishes() {
        let (position, _) = parse("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
        let double = Move::parse("d7d5", Color::Black).unwrap();
        let after_double = position.transition(double);

        let en_passant = Move::parse("e5d6", Color::White).unwrap();
        assert!(after_double.legal_moves(Color::White).contains(&en_passant));

        let captured = after_double.transition(en_passant);
        assert_eq!(captured.pieces[square("d5")], None);
        assert_eq!(captured.piece_count(), 3);
        assert!(!captured.is_quiet);

        // One ply later the chance is gone.
        let waited = after_double
            .transition(Move::parse("e1f1", Color::White).unwrap())
            .transition(Move::parse("e8f8", Color::Black).unwrap());
        assert!(!waited.legal_moves(Color::White).contains(&en_passant));
    }

    #[test]
    fn promotion_writes_mover_piece() {
        let (position, _) = parse("4k3/8/8/8/8/8/p7/4K3 b - - 0 1");
        let promote = Move::parse("a2a1n", Color::Black).unwrap();
        let next = position.transition(promote);
        assert_eq!(
            next.pieces[square("a1")],
            Some(Piece::new(Color::Black, PieceKind::Knight))
        );
    }

    #[test]
    fn try_transition_rejects_illegal_moves() {
        let position = Position::start_position();
        assert!(position
            .try_transition(Move::parse("e2e4", Color::White).unwrap())
            .is_ok());

        let err = position
            .try_transition(Move::parse("e2e5", Color::White).unwrap())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GameIllegalMove);
        let wrong_side = Move::parse("e7e5", Color::White).unwrap();
        assert!(position.try_transition(wrong_side).is_err());
    }

    #[test]
    fn apply_looks_up_ordering_score() {
        let mut history = HistoryTable::new();
        let e2e4 = Move::parse("e2e4", Color::White).unwrap();
        history.increment(e2e4);
        history.increment(e2e4);

        let position = Position::start_position();
        assert_eq!(position.apply(e2e4, &history).ordering_score, 2);
        let d2d4 = Move::parse("d2d4", Color::White).unwrap();
        assert_eq!(position.apply(d2d4, &history).ordering_score, 0);
    }

    #[test]
    fn children_are_legal() {
        let history = HistoryTable::new();
        let (position, side) = parse("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1");
        let children = position.children(side, &history);
        // Kd2 and Kf2 stay on the rook's rank, leaving Kxe2, Kd1 and Kf1.
        assert_eq!(children.len(), 3);
        for child in &children {
            let to = child.last_move.unwrap().to();
            assert!(to != square("d2") && to != square("f2"));
            assert!(!child.is_in_check(side));
        }
    }
}
