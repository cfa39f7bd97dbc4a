//! A [mailbox](https://www.chessprogramming.org/Mailbox) is a square-centric
//! representation of a chess board.
//!
//! A Mailbox is an array of size Files x Ranks where each index may contain a
//! chess piece or be empty.

use std::fmt::{self, Display};
use std::ops::{Index, IndexMut};

use crate::coretypes::{
    Color, Piece, PieceKind, Square, SquareIndexable, NUM_FILES, NUM_RANKS, NUM_SQUARES,
};

/// Classic 8x8 square board representation of Chess board.
/// Mailbox is Square-Centric, meaning it indexes by square to get a piece.
/// Index starts at A8, the far corner from White.
/// A8 = idx 0
/// B8 = idx 1
/// A7 = idx 8
/// H1 = idx 63
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Mailbox {
    board: [Option<Piece>; Self::SIZE],
}

impl Mailbox {
    pub const FILES: usize = NUM_FILES;
    pub const RANKS: usize = NUM_RANKS;
    pub const SIZE: usize = NUM_SQUARES;

    /// Creates an empty Mailbox, where all squares are None.
    pub const fn new() -> Self {
        Mailbox {
            board: [None; Mailbox::SIZE],
        }
    }

    /// Create Mailbox with pieces arranged in starting chess position.
    pub fn start_position() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; NUM_FILES] =
            [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut mb = Self::new();

        for color in [Color::White, Color::Black] {
            for (file, piece_kind) in BACK_RANK.into_iter().enumerate() {
                let back = Square::new(file as u8, color.back_rank());
                let pawn = Square::new(file as u8, color.pawn_rank());
                mb[back] = Some(Piece::new(color, piece_kind));
                mb[pawn] = Some(Piece::new(color, Pawn));
            }
        }

        mb
    }

    /// Iterate over all occupied squares and their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self[square].map(|piece| (square, piece)))
    }

    /// Returns the square of `color`'s king, if it is on the board.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        self.pieces()
            .find(|(_, piece)| *piece == king)
            .map(|(square, _)| square)
    }

    /// Returns pretty-printed chess board representation of Self.
    /// The chess board has borders and file/rank indicators.
    pub fn pretty(&self) -> String {
        const RANK_SEP: &str = "+---+---+---+---+---+---+---+---+\n";
        let mut pretty = String::with_capacity(626); // Measured in test.

        pretty.push_str(RANK_SEP);
        for rank in 0..Self::RANKS {
            pretty.push_str("| ");

            for file in 0..Self::FILES {
                pretty.push(match self[rank * Self::FILES + file] {
                    Some(piece) => char::from(piece),
                    None => ' ',
                });
                pretty.push_str(" | ");
            }
            pretty.push_str(&(Self::RANKS - rank).to_string());
            pretty.push('\n');
            pretty.push_str(RANK_SEP);
        }
        pretty.push_str("  a   b   c   d   e   f   g   h\n");

        pretty
    }
}

/// Be careful with accessing with usize, as usize value out of bounds will panic.
impl Index<usize> for Mailbox {
    type Output = Option<Piece>;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.board[idx]
    }
}

impl IndexMut<usize> for Mailbox {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.board[idx]
    }
}

impl<I: SquareIndexable> Index<I> for Mailbox {
    type Output = Option<Piece>;
    fn index(&self, idx: I) -> &Self::Output {
        &self.board[idx.idx()]
    }
}

impl<I: SquareIndexable> IndexMut<I> for Mailbox {
    fn index_mut(&mut self, idx: I) -> &mut Self::Output {
        &mut self.board[idx.idx()]
    }
}

/// Default value is that of a standard starting chess position.
impl Default for Mailbox {
    fn default() -> Self {
        Mailbox::start_position()
    }
}

impl Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

/// Per-square flags recording whether the piece on a square has ever moved.
/// Only king and rook starting squares are consulted, to gate castling.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MovedGrid {
    moved: [bool; NUM_SQUARES],
}

impl MovedGrid {
    /// A grid where nothing has moved.
    pub const fn new() -> Self {
        Self {
            moved: [false; NUM_SQUARES],
        }
    }
}

impl Default for MovedGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: SquareIndexable> Index<I> for MovedGrid {
    type Output = bool;
    fn index(&self, idx: I) -> &Self::Output {
        &self.moved[idx.idx()]
    }
}

impl<I: SquareIndexable> IndexMut<I> for MovedGrid {
    fn index_mut(&mut self, idx: I) -> &mut Self::Output {
        &mut self.moved[idx.idx()]
    }
}
