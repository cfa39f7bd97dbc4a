//! Search functions.

mod alpha_beta;
mod history;
mod ids;
mod minimax;
mod quiescence;

pub use alpha_beta::*;
pub use history::*;
pub use ids::*;
pub use minimax::*;

use std::fmt::{self, Display};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::coretypes::{Color, Move, PlyKind, Score};
use crate::Position;

/// Default deepest iteration of a search.
pub const DEFAULT_MAX_DEPTH: PlyKind = 5;
/// Default extra plies searched below leaves that are not quiet.
pub const DEFAULT_QUIESCENCE_DEPTH: PlyKind = 2;

/// The results found from running a search on some root position.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SearchResult {
    /// The best move to make for a position discovered from search, None if there is no legal move.
    pub best_move: Option<Move>,
    /// The score of making the best move, from the agent's point of view.
    pub score: Score,
    /// The player to move for the root position that was searched.
    pub agent: Color,
    /// Deepest depth in plies that was completely searched.
    pub depth: PlyKind,
    /// Total number of main search nodes visited.
    pub nodes: u64,
    /// Total number of nodes visited in a quiescence search.
    pub q_nodes: u64,
    /// Total time elapsed from the start to the end of a search.
    pub elapsed: Duration,
}

impl SearchResult {
    /// Get average nodes per second of search, counting quiescence nodes.
    pub fn nps(&self) -> f64 {
        ((self.nodes + self.q_nodes) as f64 / self.elapsed.as_secs_f64()).round()
    }

    /// Returns the color who is leading in the search of the root position, or None if even.
    pub fn leading(&self) -> Option<Color> {
        match self.score.signum() {
            1 => Some(self.agent),
            -1 => Some(!self.agent),
            _ => None,
        }
    }
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let best_move = self
            .best_move
            .map_or_else(|| "none".to_string(), |move_| move_.to_string());

        let mut displayed = String::new();
        displayed.push_str("SearchResult {\n");
        displayed.push_str(&format!("    best_move: {best_move}\n"));
        displayed.push_str(&format!("    score    : {}\n", self.score));
        displayed.push_str(&format!("    agent    : {}\n", self.agent));
        displayed.push_str(&format!("    depth    : {}\n", self.depth));
        displayed.push_str(&format!("    nodes    : {}\n", self.nodes));
        displayed.push_str(&format!("    q_nodes  : {}\n", self.q_nodes));
        displayed.push_str(&format!("    nps      : {}\n", self.nps()));
        displayed.push_str(&format!(
            "    elapsed  : {}.{:03}s\n",
            self.elapsed.as_secs(),
            self.elapsed.subsec_millis()
        ));
        displayed.push_str("}\n");

        write!(f, "{displayed}")
    }
}

/// Tempo Engine one-off position search function.
/// Uses a fresh history table and default depths. Games should use `Engine`,
/// which keeps its history table between turns.
pub fn search(position: &Position, agent: Color, deadline: Instant) -> SearchResult {
    let mut history = HistoryTable::new();
    let mut rng = StdRng::from_entropy();
    let limits = SearchLimits {
        max_depth: DEFAULT_MAX_DEPTH,
        quiescence_depth: DEFAULT_QUIESCENCE_DEPTH,
        deadline,
    };
    ids(position, agent, limits, &mut history, &mut rng)
}
