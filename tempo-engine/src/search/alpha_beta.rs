//! Minimax with fail-hard Alpha-Beta pruning.

use crate::coretypes::{Color, PlyKind, Score};
use crate::evaluation::{draw_or_win, evaluate};
use crate::moveorder::order_children;
use crate::search::HistoryTable;
use crate::Position;

/// Properties of Alpha-Beta pruning.
/// * The maxing player can only update alpha from its children.
/// * The minning player can only update beta from its children.
/// * Alpha and Beta can only be inherited from their ancestors, and are otherwise Alpha=-Inf, Beta=Inf.
/// * Alpha is usually less than Beta. When they are equal or cross, a cut off occurs.
///
/// AlphaBeta holds everything a search needs besides the position itself.
/// The maxing player is always the agent, the minning player is always its opponent.
#[derive(Debug)]
pub struct AlphaBeta<'a> {
    pub(crate) agent: Color,
    pub(crate) history: &'a mut HistoryTable,
    pub(crate) quiescence_depth: PlyKind,
    /// Main search nodes visited.
    pub nodes: u64,
    /// Quiescence nodes visited.
    pub q_nodes: u64,
}

impl<'a> AlphaBeta<'a> {
    pub fn new(agent: Color, history: &'a mut HistoryTable, quiescence_depth: PlyKind) -> Self {
        Self {
            agent,
            history,
            quiescence_depth,
            nodes: 0,
            q_nodes: 0,
        }
    }

    /// Scores a leaf statically and records its move in the history table.
    pub(crate) fn leaf(&mut self, position: &Position) -> Score {
        self.history.increment_opt(position.last_move());
        evaluate(position, self.agent)
    }

    /// Search a position where the agent is to move.
    pub fn search_max(
        &mut self,
        position: &Position,
        mut alpha: Score,
        beta: Score,
        depth: PlyKind,
    ) -> Score {
        self.nodes += 1;

        if depth == 0 {
            return match position.is_quiet() {
                true => self.leaf(position),
                false => {
                    self.history.increment_opt(position.last_move());
                    self.qs_max(position, alpha, beta, self.quiescence_depth)
                }
            };
        }

        if evaluate(position, self.agent) == Score::DRAW {
            return Score::DRAW;
        }

        let mut children = position.children(self.agent, self.history);
        if children.is_empty() {
            self.history.increment_opt(position.last_move());
            let score = draw_or_win(position, self.agent, self.agent);
            if score >= beta {
                return beta;
            }
            return alpha.max(score);
        }

        order_children(&mut children);
        let mut best = (Score::MIN, None);

        while let Some(child) = children.pop() {
            let score = self.search_min(&child, alpha, beta, depth - 1);
            if score > best.0 || best.1.is_none() {
                best = (score, child.last_move());
            }
            if score >= beta {
                // Beta cutoff
                self.history.increment_opt(child.last_move());
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        self.history.increment_opt(best.1);
        alpha
    }

    /// Search a position where the agent's opponent is to move.
    pub fn search_min(
        &mut self,
        position: &Position,
        alpha: Score,
        mut beta: Score,
        depth: PlyKind,
    ) -> Score {
        self.nodes += 1;

        if depth == 0 {
            return match position.is_quiet() {
                true => self.leaf(position),
                false => {
                    self.history.increment_opt(position.last_move());
                    self.qs_min(position, alpha, beta, self.quiescence_depth)
                }
            };
        }

        if evaluate(position, self.agent) == Score::DRAW {
            return Score::DRAW;
        }

        let opponent = !self.agent;
        let mut children = position.children(opponent, self.history);
        if children.is_empty() {
            self.history.increment_opt(position.last_move());
            let score = draw_or_win(position, opponent, self.agent);
            if score <= alpha {
                return alpha;
            }
            return beta.min(score);
        }

        order_children(&mut children);
        let mut best = (Score::MAX, None);

        while let Some(child) = children.pop() {
            let score = self.search_max(&child, alpha, beta, depth - 1);
            if score < best.0 || best.1.is_none() {
                best = (score, child.last_move());
            }
            if score <= alpha {
                // Alpha cutoff
                self.history.increment_opt(child.last_move());
                return alpha;
            }
            if score < beta {
                beta = score;
            }
        }

        self.history.increment_opt(best.1);
        beta
    }
}
