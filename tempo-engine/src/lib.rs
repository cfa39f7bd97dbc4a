//! Tempo Engine: move generation, evaluation and time-bounded alpha-beta search
//! for an agent that plays one chess move per server turn.

pub mod boardrepr;
pub mod coretypes;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod fen;
pub(crate) mod movegen;
pub mod movelist;
pub mod moveorder;
pub mod perft;
pub mod position;
pub mod search;
pub mod snapshot;
pub mod timeman;

pub use engine::{Engine, EngineBuilder};
pub use fen::Fen;
pub use position::Position;
pub use search::SearchResult;
pub use snapshot::Snapshot;
