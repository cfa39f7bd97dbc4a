//! Move Ordering
//!
//! Functions used for ordering sibling positions from worst to best.
//!
//! Move ordering is important for alpha-beta pruning performance.
//! If the best or good moves are searched early on in an alpha-beta search,
//! pruning occurs more frequently.
//!
//! Siblings are ordered by the history heuristic: moves that were visited or
//! proved strong more often are searched first.

use crate::position::Position;
use crate::search::HistoryTable;

/// Simple move ordering strategy. The following information is extracted from a position's
/// last move, and used for sorting. The values go from most-to-least important based on
/// top-to-bottom declaration of fields.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Default)]
pub(crate) struct OrderStrategy {
    history: u32,         // History table count of the move.
    destination_file: u8, // Tie-break, larger files first.
}

impl From<&Position> for OrderStrategy {
    fn from(position: &Position) -> Self {
        Self {
            history: position.ordering_score(),
            destination_file: position.last_move().map_or(0, |move_| move_.to().file()),
        }
    }
}

/// Order all children completely, in order of worst to best.
/// Best children are near the end to allow for iterating from best to worst by using
/// `while let Some(child) = children.pop() ...`.
pub fn order_children(children: &mut [Position]) {
    children.sort_by_key(|child| OrderStrategy::from(child));
}

/// Refresh every child's ordering score from `history`, then order them from worst to best.
pub fn reorder_children(children: &mut [Position], history: &HistoryTable) {
    for child in children.iter_mut() {
        child.ordering_score = child.last_move().map_or(0, |move_| history.score(&move_));
    }
    order_children(children);
}
