//! The fundamental and simple types of `tempo_engine`.

use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::ops::{Add, AddAssign, Mul, Neg, Not, Sub};
use std::str::FromStr;

use crate::error::{self, ErrorKind};

///////////////
// Constants //
///////////////
pub const NUM_FILES: usize = 8; // a, b, c, d, e, f, g, h
pub const NUM_RANKS: usize = 8; // 8, 7, 6, 5, 4, 3, 2, 1 in board index order.
pub const NUM_SQUARES: usize = NUM_FILES * NUM_RANKS;

// Upper bound on pseudo-legal moves for one side of a well-formed position.
// 9 queens, 2 rooks, 2 bishops, 2 knights and a king cannot exceed this.
pub const MAX_MOVES: usize = 384;

// A side may never have more pieces than it starts with.
pub const MAX_PIECES_PER_SIDE: usize = 16;

// Number of most recent moves remembered by a position.
pub const MOVE_WINDOW: usize = 8;

// Value the draw countdown is reset to after a pawn move, capture or promotion.
pub const DRAW_COUNTDOWN: u8 = 8;

// Half-moves without a pawn move or capture that draw the game.
pub const HALFMOVE_LIMIT: MoveCount = 100;

/////////////////////////
// Data and Structures //
/////////////////////////

/// Type alias for search depth in plies.
pub type PlyKind = u8;

/// Counter for the half-move clock.
pub type MoveCount = u16;

// Type alias to make changing Score inner type easy if needed.
pub type ScoreKind = i32;

/// Score of a position in pawn units, always from the searching agent's point of view.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Score(pub ScoreKind);

/// Color can represent the color of a piece, or a player.
/// White pieces are written in uppercase, Black pieces in lowercase.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Color {
    White,
    Black,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Piece {
    pub(crate) color: Color,
    pub(crate) piece_kind: PieceKind,
}

/// Square
/// A square of the 8x8 board in board index coordinates.
/// `rank` 0 is the far rank for White (chess rank 8), `rank` 7 is White's back rank.
/// `file` 0 is the a-file.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square {
    pub(crate) file: u8,
    pub(crate) rank: u8,
}

/// Move
/// A single ply made by `mover`, from one square to another with an optional promotion.
/// Two moves are equal only if every field is equal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    pub(crate) from: Square,
    pub(crate) to: Square,
    pub(crate) promotion: Option<PieceKind>,
    pub(crate) mover: Color,
}

////////////
// Traits //
////////////

/// SquareIndexable
/// Types whose values map directly onto one of the 64 squares of the board.
pub trait SquareIndexable {
    /// idx must return a number between 0-63 inclusive, `rank * 8 + file` in board index order.
    /// Warning: Values outside of 0-63 panic when used to index a board.
    fn idx(&self) -> usize;
}

// Blanket impl on references of types that are SquareIndexable.
impl<I: SquareIndexable> SquareIndexable for &I {
    fn idx(&self) -> usize {
        I::idx(*self)
    }
}

//////////////////////
/// Implementations //
//////////////////////

impl Score {
    /// Bounds used to open an alpha-beta window.
    pub const MIN: Score = Self(-1_000_000);
    pub const MAX: Score = Self(1_000_000);
    /// A position where the opponent has lost its king or been checkmated.
    pub const WIN: Score = Self(1000);
    /// Any drawn position. Draws are mildly unwelcome for the agent.
    pub const DRAW: Score = Self(-200);

    /// Returns the sign of the score, either 1, -1, or 0.
    pub const fn signum(&self) -> ScoreKind {
        self.0.signum()
    }
}

impl Add for Score {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}
impl Sub for Score {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
impl Mul<ScoreKind> for Score {
    type Output = Score;
    fn mul(self, rhs: ScoreKind) -> Self::Output {
        Self(self.0 * rhs)
    }
}
impl Neg for Score {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}
impl Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

impl Color {
    /// FEN compliant conversion.
    pub const fn to_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Rank index delta of a single pawn push.
    pub const fn forward(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Rank index of the king and rooks in the starting position.
    pub const fn back_rank(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank index pawns start on and may double push from.
    pub const fn pawn_rank(&self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Rank index where pawns promote.
    pub const fn promotion_rank(&self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Player number used by the game server, White is 0 and Black is 1.
    pub const fn player_id(&self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl From<Color> for char {
    fn from(color: Color) -> Self {
        color.to_char()
    }
}

impl TryFrom<char> for Color {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            'w' => Ok(Color::White),
            'b' => Ok(Color::Black),
            _ => Err((ErrorKind::ParseColorMalformed, "char is not w|b").into()),
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(char::from(*self))
    }
}

impl PieceKind {
    /// Promotion choices, in the order they are generated.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
    ];

    /// FEN compliant conversion, defaults as white pieces.
    pub const fn to_char(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Material value in pawns. The king has no material value.
    pub const fn material(&self) -> Score {
        Score(match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        })
    }
}

impl TryFrom<char> for PieceKind {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch.to_ascii_uppercase() {
            'P' => Ok(PieceKind::Pawn),
            'R' => Ok(PieceKind::Rook),
            'N' => Ok(PieceKind::Knight),
            'B' => Ok(PieceKind::Bishop),
            'Q' => Ok(PieceKind::Queen),
            'K' => Ok(PieceKind::King),
            _ => Err((ErrorKind::ParsePieceMalformed, "char not in PRNBQKprnbqk").into()),
        }
    }
}

impl Piece {
    pub const fn new(color: Color, piece_kind: PieceKind) -> Self {
        Piece { color, piece_kind }
    }
    /// Immutable Getters.
    pub const fn color(&self) -> Color {
        self.color
    }
    pub const fn piece_kind(&self) -> PieceKind {
        self.piece_kind
    }

    /// Uppercase letter for White, lowercase for Black.
    pub const fn to_char(&self) -> char {
        match self.color {
            Color::White => self.piece_kind.to_char(),
            Color::Black => self.piece_kind.to_char().to_ascii_lowercase(),
        }
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> Self {
        piece.to_char()
    }
}

impl TryFrom<char> for Piece {
    type Error = error::Error;
    fn try_from(value: char) -> error::Result<Self> {
        let color = match value.is_ascii_uppercase() {
            true => Color::White,
            false => Color::Black,
        };
        let piece_kind = PieceKind::try_from(value)?;
        Ok(Piece { color, piece_kind })
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(char::from(*self))
    }
}

impl Square {
    /// Create a square from board index coordinates. Both must be in 0..8.
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < NUM_FILES as u8 && rank < NUM_RANKS as u8);
        Self { file, rank }
    }

    /// Create a square from possibly out of range signed coordinates.
    pub const fn try_new(file: i8, rank: i8) -> Option<Self> {
        if file >= 0 && file < NUM_FILES as i8 && rank >= 0 && rank < NUM_RANKS as i8 {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Returns the square offset by the given file and rank deltas, if on the board.
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        Self::try_new(self.file as i8 + file_delta, self.rank as i8 + rank_delta)
    }

    pub const fn file(&self) -> u8 {
        self.file
    }

    pub const fn rank(&self) -> u8 {
        self.rank
    }

    /// Returns true if two squares share a color complex.
    pub const fn same_color_complex(&self, other: &Square) -> bool {
        let rank_diff = self.rank.abs_diff(other.rank);
        let file_diff = self.file.abs_diff(other.file);
        rank_diff % 2 == file_diff % 2
    }

    /// Iterate over all 64 squares, rank index major.
    pub fn iter() -> impl Iterator<Item = Square> {
        (0..NUM_RANKS as u8)
            .flat_map(|rank| (0..NUM_FILES as u8).map(move |file| Square { file, rank }))
    }
}

impl SquareIndexable for Square {
    fn idx(&self) -> usize {
        NUM_FILES * self.rank as usize + self.file as usize
    }
}

/// Square::= <fileLetter><rankNumber>
impl FromStr for Square {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let mut chars = s.chars();
        let file_ch = chars.next().ok_or(ErrorKind::ParseSquareMalformed)?;
        let rank_ch = chars.next().ok_or(ErrorKind::ParseSquareMalformed)?;

        let file = match file_ch {
            'a'..='h' => file_ch as u8 - b'a',
            _ => return Err((ErrorKind::ParseFileMalformed, "file char not of abcdefgh").into()),
        };
        let rank = match rank_ch {
            '1'..='8' => b'8' - rank_ch as u8,
            _ => return Err((ErrorKind::ParseRankMalformed, "rank char not of 12345678").into()),
        };
        Ok(Square { file, rank })
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'a' + self.file) as char)?;
        f.write_char((b'8' - self.rank) as char)
    }
}

impl Move {
    pub const fn new(from: Square, to: Square, promotion: Option<PieceKind>, mover: Color) -> Self {
        Self {
            from,
            to,
            promotion,
            mover,
        }
    }

    /// Immutable Getters.
    pub const fn from(&self) -> Square {
        self.from
    }
    pub const fn to(&self) -> Square {
        self.to
    }
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }
    pub const fn mover(&self) -> Color {
        self.mover
    }

    /// Parses `Pure Algebraic Coordinate Notation` such as `e2e4` or `e7e8q` for a given mover.
    pub fn parse(s: &str, mover: Color) -> error::Result<Self> {
        if !(4..=5).contains(&s.len()) || !s.is_ascii() {
            return Err((ErrorKind::ParseMoveMalformed, s).into());
        }
        let from: Square = s[0..2].parse()?;
        let to: Square = s[2..4].parse()?;
        let promotion = match s.chars().nth(4) {
            Some('q') => Some(PieceKind::Queen),
            Some('r') => Some(PieceKind::Rook),
            Some('b') => Some(PieceKind::Bishop),
            Some('n') => Some(PieceKind::Knight),
            Some(_) => return Err((ErrorKind::ParseMoveMalformed, s).into()),
            None => None,
        };

        Ok(Self::new(from, to, promotion, mover))
    }

    /// Returns true if this move moves a king two files, which only castling does.
    pub(crate) const fn is_castle_shape(&self) -> bool {
        self.from.rank == self.to.rank && self.from.file.abs_diff(self.to.file) == 2
    }
}

/// # Example
/// Move { from: a7, to: b8, promotion: Some(Queen), .. } -> `a7b8q`.
impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece_kind) = self.promotion {
            f.write_char(piece_kind.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
