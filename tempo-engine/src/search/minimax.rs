//! Minimax implementation.
//!
//! An unpruned search over exactly the same tree as `AlphaBeta`, including the quiescence
//! extension and the draw and terminal rules. It is slow, and exists to check that
//! pruning never changes a result.

use crate::coretypes::{Color, Move, PlyKind, Score};
use crate::evaluation::{draw_or_win, evaluate};
use crate::search::HistoryTable;
use crate::Position;

/// Base minimax call. The agent is to move in `position`.
/// It returns the best score and move for the position in the search tree,
/// or None for the move if the agent has no legal moves.
pub fn minimax(
    position: &Position,
    agent: Color,
    depth: PlyKind,
    quiescence_depth: PlyKind,
) -> (Score, Option<Move>) {
    assert_ne!(depth, 0);
    let searcher = Minimax {
        agent,
        quiescence_depth,
        history: HistoryTable::new(),
    };
    searcher.root(position, depth)
}

struct Minimax {
    agent: Color,
    quiescence_depth: PlyKind,
    history: HistoryTable,
}

impl Minimax {
    /// Minimax root is almost the same as minimax impl, except it links a score to its move.
    fn root(&self, position: &Position, depth: PlyKind) -> (Score, Option<Move>) {
        let mut best: (Score, Option<Move>) = (Score::MIN, None);
        for child in position.children(self.agent, &self.history) {
            let score = self.node(&child, !self.agent, depth - 1, false);
            if best.1.is_none() || score > best.0 {
                best = (score, child.last_move());
            }
        }
        match best.1 {
            Some(_) => best,
            None => (draw_or_win(position, self.agent, self.agent), None),
        }
    }

    /// Scores `position` with `side` to move. `quiescent` marks the extension below the nominal depth.
    fn node(&self, position: &Position, side: Color, depth: PlyKind, quiescent: bool) -> Score {
        if quiescent {
            if position.is_quiet() || depth == 0 {
                return evaluate(position, self.agent);
            }
        } else if depth == 0 {
            return match position.is_quiet() {
                true => evaluate(position, self.agent),
                false => self.node(position, side, self.quiescence_depth, true),
            };
        }

        if evaluate(position, self.agent) == Score::DRAW {
            return Score::DRAW;
        }

        let scores = position
            .children(side, &self.history)
            .into_iter()
            .map(|child| self.node(&child, !side, depth - 1, quiescent));

        let best = match side == self.agent {
            true => scores.max(),
            false => scores.min(),
        };
        best.unwrap_or_else(|| draw_or_win(position, side, self.agent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    #[test]
    fn minimax_finds_mate_in_one() {
        let (position, agent) = Position::parse_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let (score, best_move) = minimax(&position, agent, 2, 2);

        assert_eq!(score, Score::WIN);
        assert_eq!(best_move, Some(Move::parse("a1a8", agent).unwrap()));
    }

    #[test]
    fn minimax_without_moves() {
        let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
        let (position, agent) = Position::parse_fen(fen).unwrap();
        assert_eq!(minimax(&position, agent, 1, 2), (-Score::WIN, None));
    }
}
