//! History heuristic table used within search.

use std::collections::HashMap;

use crate::coretypes::Move;

/// HistoryTable counts how often each move has been visited or proven strong during search.
/// Its only use is ordering sibling positions, so counts are never decremented,
/// and the table lives for a whole game.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct HistoryTable {
    counts: HashMap<Move, u32>,
}

impl HistoryTable {
    /// Create a new empty HistoryTable.
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Returns the count recorded for a move, zero if it was never seen.
    pub fn score(&self, move_: &Move) -> u32 {
        self.counts.get(move_).copied().unwrap_or(0)
    }

    /// Record one more visit of a move.
    pub fn increment(&mut self, move_: Move) {
        let count = self.counts.entry(move_).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Record a visit of the move that produced a position, if any.
    pub(crate) fn increment_opt(&mut self, move_: Option<Move>) {
        if let Some(move_) = move_ {
            self.increment(move_);
        }
    }

    /// Number of distinct moves in the table.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Forget every count. Only used between games.
    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
