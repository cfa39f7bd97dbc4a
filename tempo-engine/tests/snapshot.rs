//! Snapshot
//!
//! Plays short games through the server snapshot contract, the way the game server
//! drives the engine: one snapshot in, one move in server coordinates out.

use tempo_engine::coretypes::{Color, Move, PieceKind, Square};
use tempo_engine::error::ErrorKind;
use tempo_engine::fen::Fen;
use tempo_engine::snapshot::{PastMove, PieceInfo, PlayerInfo, ServerMove};
use tempo_engine::*;

fn players() -> Vec<PlayerInfo> {
    vec![
        PlayerInfo {
            id: 0,
            remaining_cs: 30_000,
        },
        PlayerInfo {
            id: 1,
            remaining_cs: 30_000,
        },
    ]
}

/// Converts a move reported in server coordinates back, recording it the way the server would.
fn record(position: &Position, server: ServerMove, mover: Color) -> (Move, PastMove) {
    let from = Square::from_server(server.from_file, server.from_rank).unwrap();
    let to = Square::from_server(server.to_file, server.to_rank).unwrap();
    let promotion = server
        .promotion
        .map(|letter| PieceKind::try_from(letter).unwrap());
    let moving = position.pieces()[from].unwrap();

    let past = PastMove {
        from_file: server.from_file,
        from_rank: server.from_rank,
        to_file: server.to_file,
        to_rank: server.to_rank,
        promotion: server.promotion,
        piece_type: moving.piece_kind().to_char(),
        captured: position.pieces()[to].is_some(),
    };
    (Move::new(from, to, promotion, mover), past)
}

#[test]
fn self_play_through_snapshots() {
    let mut white = EngineBuilder::new()
        .agent(Color::White)
        .max_depth(2)
        .seed(1)
        .build();
    let mut black = EngineBuilder::new()
        .agent(Color::Black)
        .max_depth(2)
        .seed(2)
        .build();

    let mut position = Position::start_position();
    let mut past_moves: Vec<PastMove> = Vec::new();
    let mut side = Color::White;

    for _ in 0..6 {
        let snapshot = Snapshot::from_position(&position, side, players(), past_moves.clone());
        assert_eq!(snapshot.to_position().unwrap().pieces(), position.pieces());

        let engine = match side {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let result = engine.play_turn(&snapshot).unwrap();
        assert_eq!(engine.agent(), side);

        let server = result.best_move.unwrap().server_coords();
        let (move_, past) = record(&position, server, side);
        assert_eq!(Some(move_), result.best_move);

        position = position.try_transition(move_).unwrap();
        past_moves.insert(0, past);
        side = !side;
    }

    assert_eq!(past_moves.len(), 6);
    assert!(!white.history().is_empty());
    assert!(!black.history().is_empty());
}

#[test]
fn snapshot_seeds_en_passant() {
    let (position, agent) = Position::parse_fen("4k3/8/8/4P3/8/8/8/4K3 w - - 0 1").unwrap();
    let mut pieces: Vec<PieceInfo> =
        Snapshot::from_position(&position, agent, players(), vec![]).pieces;
    // Black's d-pawn has just advanced two squares.
    pieces.push(PieceInfo {
        piece_type: 'P',
        owner: 1,
        file: 4,
        rank: 5,
        has_moved: true,
    });
    let snapshot = Snapshot {
        agent,
        pieces,
        players: players(),
        moves: vec![PastMove {
            from_file: 4,
            from_rank: 7,
            to_file: 4,
            to_rank: 5,
            promotion: None,
            piece_type: 'P',
            captured: false,
        }],
    };

    let root = snapshot.to_position().unwrap();
    let en_passant = Move::parse("e5d6", Color::White).unwrap();
    assert!(root.legal_moves(agent).contains(&en_passant));
    assert!(root.to_fen(agent).contains(" d6 "));
}

#[test]
fn malformed_snapshot_is_an_error() {
    let position = Position::start_position();
    let mut snapshot = Snapshot::from_position(&position, Color::White, players(), vec![]);
    snapshot.pieces.push(PieceInfo {
        piece_type: 'K',
        owner: 0,
        file: 4,
        rank: 4,
        has_moved: true,
    });

    let mut engine = Engine::new();
    let err = engine.play_turn(&snapshot).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SnapshotDuplicateKing);
    assert!(engine.history().is_empty());
}

#[test]
fn no_legal_move_turn() {
    let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    let (position, agent) = Position::parse_fen(fen).unwrap();
    let snapshot = Snapshot::from_position(&position, agent, players(), vec![]);

    let mut engine = Engine::new();
    let result = engine.play_turn(&snapshot).unwrap();
    assert_eq!(result.best_move, None);
}
