//! Snapshot of a game as reported by the game server once per turn.
//!
//! The server describes squares with 1-based files (1 is the a-file) and 1-based ranks
//! (1 is White's back rank). A Snapshot is validated and converted into a root Position,
//! and the move chosen by the engine is converted back into server coordinates.

use crate::boardrepr::{Mailbox, MovedGrid};
use crate::coretypes::{
    Color, Move, MoveCount, Piece, PieceKind, Square, MAX_PIECES_PER_SIDE, MOVE_WINDOW,
    NUM_FILES, NUM_RANKS,
};
use crate::error::{self, ErrorKind};
use crate::movelist::MoveHistory;
use crate::position::Position;
use crate::timeman::Clock;

/// One piece on the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PieceInfo {
    /// Uppercase piece letter, one of `KQRBNP`.
    pub piece_type: char,
    /// Player id of the owner, 0 for White and 1 for Black.
    pub owner: u8,
    pub file: u8,
    pub rank: u8,
    pub has_moved: bool,
}

/// One player and its clock.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PlayerInfo {
    /// 0 for White and 1 for Black.
    pub id: u8,
    /// Time left on the player's clock in centiseconds.
    pub remaining_cs: u64,
}

/// One move already played in the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PastMove {
    pub from_file: u8,
    pub from_rank: u8,
    pub to_file: u8,
    pub to_rank: u8,
    /// Promotion piece letter, if the move promoted.
    pub promotion: Option<char>,
    /// Letter of the piece that moved.
    pub piece_type: char,
    /// True if the move captured a piece.
    pub captured: bool,
}

/// A move in server coordinates, ready to be applied by the server's piece mechanism.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ServerMove {
    pub from_file: u8,
    pub from_rank: u8,
    pub to_file: u8,
    pub to_rank: u8,
    /// Uppercase promotion piece letter, if promoting.
    pub promotion: Option<char>,
}

/// Everything the server reports at the start of the agent's turn.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Snapshot {
    /// The side the engine plays.
    pub agent: Color,
    pub pieces: Vec<PieceInfo>,
    pub players: Vec<PlayerInfo>,
    /// Past moves, most recent first.
    pub moves: Vec<PastMove>,
}

impl Color {
    /// Converts a server player id.
    pub fn from_player_id(id: u8) -> error::Result<Self> {
        match id {
            0 => Ok(Color::White),
            1 => Ok(Color::Black),
            _ => Err((ErrorKind::SnapshotUnknownValue, format!("player id {id}")).into()),
        }
    }
}

impl Square {
    /// Converts server coordinates, failing when either is outside 1..=8.
    pub fn from_server(file: u8, rank: u8) -> error::Result<Self> {
        let in_range = |value: u8, limit: usize| (1..=limit as u8).contains(&value);
        if !in_range(file, NUM_FILES) || !in_range(rank, NUM_RANKS) {
            return Err((
                ErrorKind::SnapshotCoordinateOutOfRange,
                format!("file {file}, rank {rank}"),
            )
                .into());
        }
        Ok(Square::new(file - 1, NUM_RANKS as u8 - rank))
    }

    /// Returns (file, rank) in server coordinates.
    pub const fn server_coords(&self) -> (u8, u8) {
        (self.file + 1, NUM_RANKS as u8 - self.rank)
    }
}

impl Move {
    /// Converts this move into server coordinates.
    pub fn server_coords(&self) -> ServerMove {
        let (from_file, from_rank) = self.from.server_coords();
        let (to_file, to_rank) = self.to.server_coords();
        ServerMove {
            from_file,
            from_rank,
            to_file,
            to_rank,
            promotion: self.promotion.map(|piece_kind| piece_kind.to_char()),
        }
    }
}

fn piece_kind_of(letter: char) -> error::Result<PieceKind> {
    PieceKind::try_from(letter).map_err(|_| {
        let detail = format!("piece type {letter:?}");
        error::Error::from((ErrorKind::SnapshotUnknownValue, detail))
    })
}

impl PastMove {
    fn is_pawn_move_or_capture(&self) -> bool {
        self.captured || self.piece_type.eq_ignore_ascii_case(&'P')
    }

    fn to_move(self, mover: Color) -> error::Result<Move> {
        let from = Square::from_server(self.from_file, self.from_rank)?;
        let to = Square::from_server(self.to_file, self.to_rank)?;
        let promotion = self.promotion.map(piece_kind_of).transpose()?;
        Ok(Move::new(from, to, promotion, mover))
    }
}

impl Snapshot {
    /// Validates the snapshot and builds the root position the agent searches from.
    ///
    /// Fails if a coordinate is out of range, a square holds two pieces, a side has two kings,
    /// a side has more than sixteen pieces, or a piece type or owner is unknown.
    pub fn to_position(&self) -> error::Result<Position> {
        let mut pieces = Mailbox::new();
        let mut has_moved = MovedGrid::new();
        let mut counts = [0usize; 2];
        let mut kings = [0usize; 2];

        for info in &self.pieces {
            let color = Color::from_player_id(info.owner)?;
            let piece_kind = piece_kind_of(info.piece_type)?;
            let square = Square::from_server(info.file, info.rank)?;

            if pieces[square].is_some() {
                return Err((ErrorKind::SnapshotSquareOccupied, square).into());
            }

            let side = color.player_id() as usize;
            if piece_kind == PieceKind::King {
                kings[side] += 1;
                if kings[side] > 1 {
                    return Err((ErrorKind::SnapshotDuplicateKing, color).into());
                }
            }
            counts[side] += 1;
            if counts[side] > MAX_PIECES_PER_SIDE {
                return Err((ErrorKind::SnapshotTooManyPieces, color).into());
            }

            pieces[square] = Some(Piece::new(color, piece_kind));
            has_moved[square] = info.has_moved;
        }

        // The most recent move was made by the opponent, and movers alternate going back.
        let mut window = Vec::with_capacity(MOVE_WINDOW);
        let mut mover = !self.agent;
        for past in self.moves.iter().take(MOVE_WINDOW) {
            window.push(past.to_move(mover)?);
            mover = !mover;
        }
        let history: MoveHistory = window.into_iter().rev().collect();

        let halfmoves = self
            .moves
            .iter()
            .take_while(|past| !past.is_pawn_move_or_capture())
            .count() as MoveCount;

        Ok(Position::new(pieces, has_moved, halfmoves, history))
    }

    /// Clock information of the agent for this turn.
    pub fn clock(&self) -> error::Result<Clock> {
        let agent_id = self.agent.player_id();
        let player = self
            .players
            .iter()
            .find(|player| player.id == agent_id)
            .ok_or((ErrorKind::SnapshotMissingPlayer, self.agent))?;

        Ok(Clock {
            remaining_cs: player.remaining_cs,
            piece_count: self.pieces.len(),
            moves_played: self.moves.len(),
        })
    }

    /// Builds a snapshot of `position` as the server would report it.
    /// `past_moves` are most recent first, as the server lists them.
    pub fn from_position(
        position: &Position,
        agent: Color,
        players: Vec<PlayerInfo>,
        past_moves: Vec<PastMove>,
    ) -> Self {
        let pieces = position
            .pieces()
            .pieces()
            .map(|(square, piece)| {
                let (file, rank) = square.server_coords();
                PieceInfo {
                    piece_type: piece.piece_kind().to_char(),
                    owner: piece.color().player_id(),
                    file,
                    rank,
                    has_moved: position.has_moved()[square],
                }
            })
            .collect();

        Self {
            agent,
            pieces,
            players,
            moves: past_moves,
        }
    }
}
