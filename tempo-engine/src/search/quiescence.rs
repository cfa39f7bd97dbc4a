//! Quiescence Search
//!
//! When a position is being searched, nodes at the final depth (leaf nodes)
//! can be either terminal or non-terminal.
//! Terminal nodes get an absolute score. Non-terminal nodes are scored
//! according to a static evaluation function that provides a best guess at to
//! that node's value.
//!
//! Statically evaluating non-terminal leaf nodes leads to the horizon effect.
//! An engine may see a leaf node where Queen x Pawn as a winning position,
//! while right over the horizon exists Pawn x Queen.
//!
//! To reduce this horizon effect, a leaf reached by a capture, pawn move or promotion
//! is searched a little further, until it is quiet or the extra depth runs out.
//! Every legal move is followed, but quiet children end immediately as static leaves.

use crate::coretypes::{PlyKind, Score};
use crate::evaluation::{draw_or_win, evaluate};
use crate::moveorder::order_children;
use crate::search::AlphaBeta;
use crate::Position;

impl<'a> AlphaBeta<'a> {
    /// Quiescence search of a position where the agent is to move.
    pub fn qs_max(
        &mut self,
        position: &Position,
        mut alpha: Score,
        beta: Score,
        depth: PlyKind,
    ) -> Score {
        self.q_nodes += 1;

        if position.is_quiet() || depth == 0 {
            return self.leaf(position);
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
            let score = self.qs_min(&child, alpha, beta, depth - 1);
            if score > best.0 || best.1.is_none() {
                best = (score, child.last_move());
            }
            if score >= beta {
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

    /// Quiescence search of a position where the agent's opponent is to move.
    pub fn qs_min(
        &mut self,
        position: &Position,
        alpha: Score,
        mut beta: Score,
        depth: PlyKind,
    ) -> Score {
        self.q_nodes += 1;

        if position.is_quiet() || depth == 0 {
            return self.leaf(position);
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
            let score = self.qs_max(&child, alpha, beta, depth - 1);
            if score < best.0 || best.1.is_none() {
                best = (score, child.last_move());
            }
            if score <= alpha {
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
