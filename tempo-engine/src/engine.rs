//! Engine struct acts as a simplified API for the various parts of the Tempo engine.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::coretypes::{Color, PlyKind};
use crate::error;
use crate::position::Position;
use crate::search::{
    self, HistoryTable, SearchLimits, SearchResult, DEFAULT_MAX_DEPTH, DEFAULT_QUIESCENCE_DEPTH,
};
use crate::snapshot::Snapshot;

/// EngineBuilder allows for parameters of an Engine to be set and built once.
///
/// Default values:
///
/// * `agent`: White
/// * `max_depth`: 5
/// * `quiescence_depth`: 2
/// * `seed`: None, the coin flip generator is seeded from entropy
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EngineBuilder {
    agent: Color,
    max_depth: PlyKind,
    quiescence_depth: PlyKind,
    seed: Option<u64>,
}

impl EngineBuilder {
    /// Create a new default EngineBuilder.
    pub fn new() -> Self {
        Self {
            agent: Color::White,
            max_depth: DEFAULT_MAX_DEPTH,
            quiescence_depth: DEFAULT_QUIESCENCE_DEPTH,
            seed: None,
        }
    }

    /// Create and return a new Engine.
    pub fn build(&self) -> Engine {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Engine {
            agent: self.agent,
            max_depth: self.max_depth,
            quiescence_depth: self.quiescence_depth,
            history: HistoryTable::new(),
            rng,
        }
    }

    /// Set the side the engine plays.
    pub fn agent(mut self, agent: Color) -> Self {
        self.agent = agent;
        self
    }

    /// Set the deepest iterative deepening depth. Depths below 1 are raised to 1.
    pub fn max_depth(mut self, max_depth: PlyKind) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Set the number of extra plies searched below leaves that are not quiet.
    pub fn quiescence_depth(mut self, quiescence_depth: PlyKind) -> Self {
        self.quiescence_depth = quiescence_depth;
        self
    }

    /// Seed the tie-breaking coin flips, making searches reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine owns everything that lives longer than a single search.
/// The history table is kept between turns of the same game and reset by `new_game`.
#[derive(Debug, Clone)]
pub struct Engine {
    agent: Color,
    max_depth: PlyKind,
    quiescence_depth: PlyKind,
    history: HistoryTable,
    rng: StdRng,
}

impl Engine {
    pub fn new() -> Self {
        EngineBuilder::new().build()
    }

    /// Returns the side the engine plays.
    pub fn agent(&self) -> Color {
        self.agent
    }

    pub fn max_depth(&self) -> PlyKind {
        self.max_depth
    }

    pub fn quiescence_depth(&self) -> PlyKind {
        self.quiescence_depth
    }

    /// Returns reference to the engine's history table.
    pub fn history(&self) -> &HistoryTable {
        &self.history
    }

    /// Informs engine that the next search will be from a new game.
    pub fn new_game(&mut self) {
        self.history.clear();
    }

    /// Run a blocking search of `root`, where the agent is to move.
    /// No new depth begins after `deadline`, but depth 1 always completes.
    pub fn choose_move(&mut self, root: &Position, deadline: Instant) -> SearchResult {
        let limits = SearchLimits {
            max_depth: self.max_depth,
            quiescence_depth: self.quiescence_depth,
            deadline,
        };
        search::ids(root, self.agent, limits, &mut self.history, &mut self.rng)
    }

    /// Plays one turn described by a server snapshot.
    /// The snapshot is validated into a root position, the move time is derived from the
    /// agent's clock, and the chosen move is returned in the search result.
    /// The engine takes the snapshot's agent as its own side.
    pub fn play_turn(&mut self, snapshot: &Snapshot) -> error::Result<SearchResult> {
        let start = Instant::now();
        let root = snapshot.to_position()?;
        let clock = snapshot.clock()?;
        self.agent = snapshot.agent;

        let result = self.choose_move(&root, clock.deadline(start));
        match result.best_move {
            Some(best_move) => info!(
                agent = %self.agent,
                best_move = %best_move,
                score = result.score.0,
                depth = result.depth,
                nodes = result.nodes + result.q_nodes,
                "chose move"
            ),
            None => info!(agent = %self.agent, score = result.score.0, "no legal move"),
        }

        Ok(result)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
