//! MoveList types used in Tempo engine.
//!
//! The underlying type of MoveList may change at any time during
//! pre-1.0 development, so a MoveList type alias makes changes easy.

use std::fmt::{self, Display};

use arrayvec::ArrayVec;

use crate::coretypes::{Move, MAX_MOVES, MOVE_WINDOW};

/// MoveList is a container that can hold at most `MAX_MOVES`, the most number of moves per any chess position.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/// MoveHistory is the window of the most recently applied moves, oldest first.
/// Pushing onto a full window evicts the oldest move.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct MoveHistory {
    moves: ArrayVec<Move, MOVE_WINDOW>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self {
            moves: ArrayVec::new(),
        }
    }

    /// Append a move, evicting the oldest if the window is full.
    pub fn push(&mut self, move_: Move) {
        if self.moves.is_full() {
            self.moves.remove(0);
        }
        self.moves.push(move_);
    }

    /// The most recently pushed move.
    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns true once the window holds `MOVE_WINDOW` moves.
    pub fn is_full(&self) -> bool {
        self.moves.is_full()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }
}

impl FromIterator<Move> for MoveHistory {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> Self {
        let mut history = MoveHistory::new();
        iter.into_iter().for_each(|move_| history.push(move_));
        history
    }
}

impl Display for MoveHistory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let moves: Vec<String> = self.moves.iter().map(ToString::to_string).collect();
        write!(f, "{}", moves.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::Color;

    #[test]
    fn history_evicts_oldest() {
        let moves = [
            "a2a3", "a7a6", "b2b3", "b7b6", "c2c3", "c7c6", "d2d3", "d7d6", "e2e3",
        ];
        let mut history = MoveHistory::new();
        for (idx, move_str) in moves.iter().enumerate() {
            let mover = if idx % 2 == 0 {
                Color::White
            } else {
                Color::Black
            };
            history.push(Move::parse(move_str, mover).unwrap());
            assert!(history.len() <= MOVE_WINDOW);
        }

        assert!(history.is_full());
        assert_eq!(history.as_slice()[0].to_string(), "a7a6");
        assert_eq!(history.last().unwrap().to_string(), "e2e3");
        assert_eq!(
            history.to_string(),
            "a7a6 b2b3 b7b6 c2c3 c7c6 d2d3 d7d6 e2e3"
        );
    }
}
