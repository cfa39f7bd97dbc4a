//! Iterative Deepening Search.

use std::time::Instant;

use rand::Rng;
use tracing::{debug, warn};

use crate::coretypes::{Color, Move, PlyKind, Score};
use crate::evaluation::draw_or_win;
use crate::moveorder::reorder_children;
use crate::search::{AlphaBeta, HistoryTable, SearchResult};
use crate::Position;

/// Parameters of a single iterative deepening search.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SearchLimits {
    /// The deepest iteration that may run.
    pub max_depth: PlyKind,
    /// Extra plies searched below leaves that are not quiet.
    pub quiescence_depth: PlyKind,
    /// No new iteration starts at or after this instant. Depth 1 always runs.
    pub deadline: Instant,
}

/// Searches the game tree from `root`, where `agent` is to move, one depth at a time.
/// Each completed depth replaces the previous result, and the history table entry of its
/// chosen move is incremented. Equally scored moves are decided by a coin flip from `rng`.
///
/// The deadline is only checked before starting a new depth, so a depth that has begun is
/// always finished.
pub fn ids<R: Rng>(
    root: &Position,
    agent: Color,
    limits: SearchLimits,
    history: &mut HistoryTable,
    rng: &mut R,
) -> SearchResult {
    assert_ne!(limits.max_depth, 0);
    let instant = Instant::now();

    let mut frontier = root.children(agent, history);
    let mut search_result = SearchResult {
        best_move: None,
        score: draw_or_win(root, agent, agent),
        agent,
        depth: 0,
        nodes: 0,
        q_nodes: 0,
        elapsed: instant.elapsed(),
    };

    if frontier.is_empty() {
        return search_result;
    }

    for depth in 1..=limits.max_depth {
        if depth > 1 && Instant::now() >= limits.deadline {
            break;
        }

        reorder_children(&mut frontier, history);
        let mut best: Option<(Score, Move)> = None;
        let mut ctx = AlphaBeta::new(agent, history, limits.quiescence_depth);

        // Best ordered children are at the end.
        for child in frontier.iter().rev() {
            let Some(move_) = child.last_move() else {
                continue;
            };
            let score = ctx.search_min(child, Score::MIN, Score::MAX, depth - 1);

            best = match best {
                None => Some((score, move_)),
                Some((best_score, _)) if score > best_score => Some((score, move_)),
                Some((best_score, _)) if score == best_score && rng.gen_bool(0.5) => {
                    Some((score, move_))
                }
                keep => keep,
            };
        }

        search_result.nodes += ctx.nodes;
        search_result.q_nodes += ctx.q_nodes;

        if let Some((score, move_)) = best {
            history.increment(move_);
            search_result.best_move = Some(move_);
            search_result.score = score;
            search_result.depth = depth;
            debug!(
                depth,
                best_move = %move_,
                score = score.0,
                nodes = search_result.nodes,
                q_nodes = search_result.q_nodes,
                "completed depth"
            );
        }

        if depth < limits.max_depth && Instant::now() > limits.deadline {
            warn!(depth, "search depth finished after the deadline");
        }
    }

    search_result.elapsed = instant.elapsed();
    search_result
}
