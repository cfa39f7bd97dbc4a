//! Time Management

use std::time::{Duration, Instant};

/// Shortest time ever given to a move.
pub const MIN_MOVE_TIME: Duration = Duration::from_secs(1);
/// Games with fewer moves played than this always use `MIN_MOVE_TIME`.
pub const OPENING_MOVES: usize = 10;
/// Added to the piece count when dividing the remaining clock.
const PIECE_OVERHEAD: usize = 75;

/// Clock information needed to budget one move.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Clock {
    /// Time left on the agent's clock in centiseconds.
    pub remaining_cs: u64,
    /// Pieces on the board, kings included.
    pub piece_count: usize,
    /// Half-moves played so far in the game.
    pub moves_played: usize,
}

impl Clock {
    /// Time to spend on this move: the remaining seconds divided by `piece_count + 75`,
    /// never less than one second, and exactly one second during the opening.
    pub fn move_time(&self) -> Duration {
        if self.moves_played < OPENING_MOVES {
            return MIN_MOVE_TIME;
        }

        let remaining_secs = self.remaining_cs as f64 / 100.0;
        let share = remaining_secs / (self.piece_count + PIECE_OVERHEAD) as f64;
        Duration::from_secs_f64(share).max(MIN_MOVE_TIME)
    }

    /// Returns the instant after which no new search depth may begin.
    pub fn deadline(&self, start_time: Instant) -> Instant {
        start_time + self.move_time()
    }
}
