//! Main CLI interface to the Tempo engine.
//!
//! Plays one turn for the side to move in a FEN position, or a self-play game where both
//! sides are driven through server snapshots exactly as the game server would drive them.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tempo_engine::coretypes::{Color, Move, PlyKind};
use tempo_engine::error;
use tempo_engine::fen::Fen;
use tempo_engine::search::{DEFAULT_MAX_DEPTH, DEFAULT_QUIESCENCE_DEPTH};
use tempo_engine::snapshot::{PastMove, PlayerInfo};
use tempo_engine::{Engine, EngineBuilder, Position, Snapshot};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Parser)]
#[command(name = "tempo", version, about = "Time-bounded chess decision engine")]
struct Args {
    /// Position to play from.
    #[arg(long, default_value = START_FEN)]
    fen: String,

    /// Moves in coordinate notation applied to the position before playing, such as e2e4.
    #[arg(long, num_args = 1..)]
    moves: Vec<String>,

    /// Deepest iterative deepening depth.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    depth: PlyKind,

    /// Extra plies searched below leaves that are not quiet.
    #[arg(long, default_value_t = DEFAULT_QUIESCENCE_DEPTH)]
    quiescence_depth: PlyKind,

    /// Seed for tie-breaking coin flips.
    #[arg(long)]
    seed: Option<u64>,

    /// Starting clock of each player in centiseconds.
    #[arg(long, default_value_t = 90_000)]
    clock_cs: u64,

    /// Number of plies to self-play. Zero plays a single turn.
    #[arg(long, default_value_t = 0)]
    self_play: usize,
}

/// Records a move the way the server lists past moves.
fn past_move(position: &Position, move_: Move) -> PastMove {
    let (from_file, from_rank) = move_.from().server_coords();
    let (to_file, to_rank) = move_.to().server_coords();
    let piece_type = position.pieces()[move_.from()]
        .map_or('P', |piece| piece.piece_kind().to_char());

    PastMove {
        from_file,
        from_rank,
        to_file,
        to_rank,
        promotion: move_.promotion().map(|piece_kind| piece_kind.to_char()),
        piece_type,
        captured: position.pieces()[move_.to()].is_some(),
    }
}

fn build_engine(args: &Args, agent: Color) -> Engine {
    let mut builder = EngineBuilder::new()
        .agent(agent)
        .max_depth(args.depth)
        .quiescence_depth(args.quiescence_depth);
    if let Some(seed) = args.seed {
        // Each side gets its own stream of coin flips.
        builder = builder.seed(seed.wrapping_add(agent.player_id() as u64));
    }
    builder.build()
}

fn main() -> error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempo=info,tempo_engine=info".into()),
        )
        .init();

    let args = Args::parse();
    info!("tempo v{} starting", env!("CARGO_PKG_VERSION"));

    let (mut position, mut side) = Position::parse_fen(&args.fen)?;
    let mut past_moves: Vec<PastMove> = Vec::new();
    for move_str in &args.moves {
        let move_ = Move::parse(move_str, side)?;
        let next = position.try_transition(move_)?;
        past_moves.insert(0, past_move(&position, move_));
        position = next;
        side = !side;
    }

    let mut engines = [
        build_engine(&args, Color::White),
        build_engine(&args, Color::Black),
    ];
    let mut clocks = [args.clock_cs; 2];
    let turns = args.self_play.max(1);

    for _ in 0..turns {
        println!("{position} Fen: {}", position.to_fen(side));

        let players = [Color::White, Color::Black]
            .into_iter()
            .map(|color| PlayerInfo {
                id: color.player_id(),
                remaining_cs: clocks[color.player_id() as usize],
            })
            .collect();
        let snapshot = Snapshot::from_position(&position, side, players, past_moves.clone());

        let engine = &mut engines[side.player_id() as usize];
        let result = engine.play_turn(&snapshot)?;
        println!("{result}");

        let clock = &mut clocks[side.player_id() as usize];
        *clock = clock.saturating_sub(result.elapsed.as_millis() as u64 / 10);

        let Some(best_move) = result.best_move else {
            println!("{side} has no legal move");
            break;
        };
        let server = best_move.server_coords();
        println!(
            "bestmove {best_move} (server: {},{} -> {},{})",
            server.from_file, server.from_rank, server.to_file, server.to_rank
        );

        past_moves.insert(0, past_move(&position, best_move));
        position = position.transition(best_move);
        side = !side;
    }

    Ok(())
}
