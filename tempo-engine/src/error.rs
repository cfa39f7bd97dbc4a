//! Tempo Engine error type.

use std::error;
use std::fmt::{self, Display};
use std::result;

use crate::fen::ParseFenError;

/// Tempo Engine generic result type.
pub type Result<T> = result::Result<T, Error>;

/// A list specifying general errors for Tempo engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Fen error kinds.
    Fen,

    /// Square parse string malformed.
    ParseSquareMalformed,
    /// File parse string malformed.
    ParseFileMalformed,
    /// Rank parse string malformed.
    ParseRankMalformed,
    /// Color parse string malformed.
    ParseColorMalformed,
    /// Piece parse string malformed.
    ParsePieceMalformed,
    /// Move parse string malformed.
    ParseMoveMalformed,

    /// A snapshot coordinate lies outside 1..=8.
    SnapshotCoordinateOutOfRange,
    /// Two snapshot pieces share a square.
    SnapshotSquareOccupied,
    /// A side has more than one king.
    SnapshotDuplicateKing,
    /// A side has more than sixteen pieces.
    SnapshotTooManyPieces,
    /// A player id or piece type is unknown to the engine.
    SnapshotUnknownValue,
    /// No player entry exists for the agent.
    SnapshotMissingPlayer,

    /// A move was provided that is not legal in the position it was applied to.
    GameIllegalMove,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Fen => "fen",

            ErrorKind::ParseSquareMalformed => "parse square malformed",
            ErrorKind::ParseFileMalformed => "parse file malformed",
            ErrorKind::ParseRankMalformed => "parse rank malformed",
            ErrorKind::ParseColorMalformed => "parse color malformed",
            ErrorKind::ParsePieceMalformed => "parse piece malformed",
            ErrorKind::ParseMoveMalformed => "parse move malformed",

            ErrorKind::SnapshotCoordinateOutOfRange => "snapshot coordinate out of range",
            ErrorKind::SnapshotSquareOccupied => "snapshot square occupied twice",
            ErrorKind::SnapshotDuplicateKing => "snapshot duplicate king",
            ErrorKind::SnapshotTooManyPieces => "snapshot too many pieces",
            ErrorKind::SnapshotUnknownValue => "snapshot unknown value",
            ErrorKind::SnapshotMissingPlayer => "snapshot missing player",

            ErrorKind::GameIllegalMove => "illegal move",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The primary and general error type for the Tempo Engine.
#[derive(Debug)]
pub enum Error {
    Simple(ErrorKind),
    Message(ErrorKind, String),
    Custom(ErrorKind, Box<dyn error::Error + Send + Sync>),
}

impl Error {
    pub fn new<E>(error_kind: ErrorKind, inner_error: E) -> Self
    where
        E: Into<Box<dyn error::Error + Send + Sync>>,
    {
        Self::Custom(error_kind, inner_error.into())
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Simple(error_kind) => *error_kind,
            Error::Message(error_kind, _) => *error_kind,
            Error::Custom(error_kind, _) => *error_kind,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Simple(error_kind) => {
                write!(f, "{error_kind}")
            }
            Error::Message(error_kind, string) => {
                write!(f, "{error_kind}: {string}")
            }
            Error::Custom(error_kind, ref box_error) => {
                write!(f, "{error_kind}, error: {}", *box_error)
            }
        }
    }
}

impl error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(error_kind: ErrorKind) -> Self {
        Self::Simple(error_kind)
    }
}

impl From<ParseFenError> for Error {
    fn from(error: ParseFenError) -> Self {
        Self::Custom(ErrorKind::Fen, error.into())
    }
}

impl<S: ToString> From<(ErrorKind, S)> for Error {
    fn from((error_kind, stringable): (ErrorKind, S)) -> Self {
        Self::Message(error_kind, stringable.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_survives_conversion() {
        let simple: Error = ErrorKind::SnapshotDuplicateKing.into();
        assert_eq!(simple.kind(), ErrorKind::SnapshotDuplicateKing);

        let message: Error = (ErrorKind::ParseMoveMalformed, "e9e4").into();
        assert_eq!(message.kind(), ErrorKind::ParseMoveMalformed);
        assert_eq!(message.to_string(), "parse move malformed: e9e4");
    }
}
