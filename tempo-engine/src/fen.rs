//! Forsyth-Edwards Notation, a standard notation for describing a chess position.
//! <https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation>
//!
//! Example:
//! Starting Chess FEN = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//!
//! A Position does not store the side to move, so parsing returns it alongside the Position
//! and writing needs it passed in. The castling field is expressed through the has-moved flags
//! of the king and rook start squares, and the en passant field through a synthesized last move.

use std::error;
use std::fmt::{self, Display};

use crate::boardrepr::{Mailbox, MovedGrid};
use crate::coretypes::{Color, Move, MoveCount, Piece, PieceKind, Square, NUM_FILES, NUM_RANKS};
use crate::movelist::MoveHistory;
use crate::position::Position;

/// Which field of a Fen string failed to parse.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ParseFenError {
    IllFormed,
    PiecePlacement,
    SideToMove,
    Castling,
    EnPassant,
    HalfMoveClock,
    FullMoveNumber,
}

impl ParseFenError {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseFenError::IllFormed => "ill-formed fen string",
            ParseFenError::PiecePlacement => "invalid piece placement field",
            ParseFenError::SideToMove => "invalid side to move field",
            ParseFenError::Castling => "invalid castling field",
            ParseFenError::EnPassant => "invalid en passant field",
            ParseFenError::HalfMoveClock => "invalid halfmove clock field",
            ParseFenError::FullMoveNumber => "invalid fullmove number field",
        }
    }
}

impl Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl error::Error for ParseFenError {}

/// Types implementing Fen can be created from and written as a Fen string.
pub trait Fen: Sized {
    /// Parses a Fen string, returning the described value and the side to move.
    fn parse_fen(input: &str) -> Result<(Self, Color), ParseFenError>;

    /// Writes this value as a Fen string with `side_to_move` as the active color.
    fn to_fen(&self, side_to_move: Color) -> String;
}

/// Castling flags in the order they appear in a Fen string.
const CASTLING: [(char, Color, u8); 4] = [
    ('K', Color::White, 7),
    ('Q', Color::White, 0),
    ('k', Color::Black, 7),
    ('q', Color::Black, 0),
];
const KING_FILE: u8 = 4;

fn parse_placement(field: &str) -> Result<Mailbox, ParseFenError> {
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() != NUM_RANKS {
        return Err(ParseFenError::PiecePlacement);
    }

    let mut pieces = Mailbox::new();
    for (rank, row) in rows.into_iter().enumerate() {
        let mut file = 0usize;
        for ch in row.chars() {
            if let Some(empty) = ch.to_digit(10) {
                if !(1..=8).contains(&empty) {
                    return Err(ParseFenError::PiecePlacement);
                }
                file += empty as usize;
            } else {
                let piece = Piece::try_from(ch).map_err(|_| ParseFenError::PiecePlacement)?;
                if file >= NUM_FILES {
                    return Err(ParseFenError::PiecePlacement);
                }
                pieces[Square::new(file as u8, rank as u8)] = Some(piece);
                file += 1;
            }
        }
        if file != NUM_FILES {
            return Err(ParseFenError::PiecePlacement);
        }
    }
    Ok(pieces)
}

fn parse_side_to_move(field: &str) -> Result<Color, ParseFenError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ParseFenError::SideToMove),
    }
}

/// Marks the king and rook start squares that lost their castling rights.
fn parse_castling(field: &str) -> Result<MovedGrid, ParseFenError> {
    let mut rights = [false; 4];
    if field != "-" {
        for ch in field.chars() {
            let index = CASTLING
                .iter()
                .position(|&(flag, _, _)| flag == ch)
                .ok_or(ParseFenError::Castling)?;
            if rights[index] {
                return Err(ParseFenError::Castling);
            }
            rights[index] = true;
        }
    }

    let mut has_moved = MovedGrid::new();
    for (&(_, color, rook_file), &right) in CASTLING.iter().zip(rights.iter()) {
        has_moved[Square::new(rook_file, color.back_rank())] = !right;
    }
    for (color, kingside, queenside) in [
        (Color::White, rights[0], rights[1]),
        (Color::Black, rights[2], rights[3]),
    ] {
        has_moved[Square::new(KING_FILE, color.back_rank())] = !(kingside || queenside);
    }
    Ok(has_moved)
}

/// An en passant target square means the opponent of `side_to_move` just double advanced a pawn.
fn parse_en_passant(field: &str, side_to_move: Color) -> Result<Option<Move>, ParseFenError> {
    if field == "-" {
        return Ok(None);
    }

    let target: Square = field.parse().map_err(|_| ParseFenError::EnPassant)?;
    let mover = !side_to_move;
    if target.rank() as i8 != mover.pawn_rank() as i8 + mover.forward() {
        return Err(ParseFenError::EnPassant);
    }

    let from = Square::new(target.file(), mover.pawn_rank());
    let to = target
        .offset(0, mover.forward())
        .ok_or(ParseFenError::EnPassant)?;
    Ok(Some(Move::new(from, to, None, mover)))
}

impl Fen for Position {
    fn parse_fen(input: &str) -> Result<(Self, Color), ParseFenError> {
        let fields: Vec<&str> = input.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(ParseFenError::IllFormed);
        }

        let pieces = parse_placement(fields[0])?;
        let side_to_move = parse_side_to_move(fields[1])?;
        let has_moved = parse_castling(fields[2])?;
        let en_passant = parse_en_passant(fields[3], side_to_move)?;

        let halfmoves: MoveCount = match fields.get(4) {
            Some(field) => field.parse().map_err(|_| ParseFenError::HalfMoveClock)?,
            None => 0,
        };
        if let Some(field) = fields.get(5) {
            let fullmoves: u32 = field.parse().map_err(|_| ParseFenError::FullMoveNumber)?;
            if fullmoves == 0 {
                return Err(ParseFenError::FullMoveNumber);
            }
        }

        let history: MoveHistory = en_passant.into_iter().collect();
        Ok((
            Position::new(pieces, has_moved, halfmoves, history),
            side_to_move,
        ))
    }

    /// Positions do not count full moves, so the fullmove field is always written as 1.
    fn to_fen(&self, side_to_move: Color) -> String {
        let mut fen = String::new();

        for rank in 0..NUM_RANKS as u8 {
            let mut empty = 0;
            for file in 0..NUM_FILES as u8 {
                match self.pieces()[Square::new(file, rank)] {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank + 1 < NUM_RANKS as u8 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(side_to_move.to_char());
        fen.push(' ');

        let castling: String = CASTLING
            .iter()
            .filter(|&&(_, color, rook_file)| self.can_castle(color, rook_file))
            .map(|&(flag, _, _)| flag)
            .collect();
        match castling.is_empty() {
            true => fen.push('-'),
            false => fen.push_str(&castling),
        }

        fen.push(' ');
        match self.en_passant_target() {
            Some(target) => fen.push_str(&target.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} 1", self.halfmoves()));
        fen
    }
}

impl Position {
    /// True if the king and the rook on `rook_file` of `color` are unmoved on their start squares.
    fn can_castle(&self, color: Color, rook_file: u8) -> bool {
        let king_square = Square::new(KING_FILE, color.back_rank());
        let rook_square = Square::new(rook_file, color.back_rank());
        let king = Piece::new(color, PieceKind::King);
        let rook = Piece::new(color, PieceKind::Rook);

        self.pieces()[king_square] == Some(king)
            && self.pieces()[rook_square] == Some(rook)
            && !self.has_moved()[king_square]
            && !self.has_moved()[rook_square]
    }

    /// The square passed over by the last move if it was a pawn double advance.
    fn en_passant_target(&self) -> Option<Square> {
        let last = self.last_move()?;
        let is_pawn = matches!(
            self.pieces()[last.to()],
            Some(piece) if piece.piece_kind() == PieceKind::Pawn
        );
        let mover = last.mover();
        let is_double = last.from().file() == last.to().file()
            && last.from().rank() == mover.pawn_rank()
            && last.to().rank() as i8 == last.from().rank() as i8 + 2 * mover.forward();

        match is_pawn && is_double {
            true => last.from().offset(0, mover.forward()),
            false => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn parse_start_position() {
        let (position, side) = Position::parse_fen(START).unwrap();
        assert_eq!(side, Color::White);
        assert_eq!(position, Position::start_position());
        assert_eq!(position.to_fen(side), START);
    }

    #[test]
    fn castling_rights_become_moved_flags() {
        let (position, side) = Position::parse_fen("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 3 20").unwrap();
        assert_eq!(side, Color::Black);
        assert_eq!(position.halfmoves(), 3);

        let square = |s: &str| s.parse::<Square>().unwrap();
        assert!(!position.has_moved()[square("e1")]);
        assert!(!position.has_moved()[square("h1")]);
        assert!(position.has_moved()[square("a1")]);
        assert!(!position.has_moved()[square("e8")]);
        assert!(position.has_moved()[square("h8")]);
        assert!(!position.has_moved()[square("a8")]);

        assert_eq!(position.to_fen(side), "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 3 1");
    }

    #[test]
    fn en_passant_becomes_last_move() {
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
        let (position, side) = Position::parse_fen(fen).unwrap();

        let expected = Move::parse("d7d5", Color::Black).unwrap();
        assert_eq!(position.last_move(), Some(expected));
        assert!(position
            .legal_moves(side)
            .contains(&Move::parse("e5d6", Color::White).unwrap()));
        assert!(position.to_fen(side).contains(" d6 "));
    }

    #[test]
    fn transitions_write_en_passant() {
        let position = Position::start_position();
        let next = position.transition(Move::parse("e2e4", Color::White).unwrap());
        assert_eq!(
            next.to_fen(Color::Black),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn malformed_fields() {
        let cases = [
            ("", ParseFenError::IllFormed),
            ("8/8/8/8/8/8/8/8", ParseFenError::IllFormed),
            ("8/8/8/8/8/8/8 w - -", ParseFenError::PiecePlacement),
            ("9/8/8/8/8/8/8/8 w - -", ParseFenError::PiecePlacement),
            ("7/8/8/8/8/8/8/8 w - -", ParseFenError::PiecePlacement),
            ("8p/8/8/8/8/8/8/8 w - -", ParseFenError::PiecePlacement),
            ("x7/8/8/8/8/8/8/8 w - -", ParseFenError::PiecePlacement),
            ("8/8/8/8/8/8/8/8 x - -", ParseFenError::SideToMove),
            ("8/8/8/8/8/8/8/8 w KK -", ParseFenError::Castling),
            ("8/8/8/8/8/8/8/8 w A -", ParseFenError::Castling),
            ("8/8/8/8/8/8/8/8 w - e4", ParseFenError::EnPassant),
            ("8/8/8/8/8/8/8/8 w - e3", ParseFenError::EnPassant),
            ("8/8/8/8/8/8/8/8 w - - x", ParseFenError::HalfMoveClock),
            ("8/8/8/8/8/8/8/8 w - - 0 0", ParseFenError::FullMoveNumber),
        ];
        for (fen, expected) in cases {
            assert_eq!(Position::parse_fen(fen).unwrap_err(), expected, "{fen:?}");
        }
    }
}
