//! Performance Test (perft)
//!
//! Tests to ensure engine passes Perft test by checking against pre-determined results.
//! [Perft Results](https://www.chessprogramming.org/Perft_Results)

use std::thread::available_parallelism;

use tempo_engine::coretypes::Color;
use tempo_engine::fen::Fen;
use tempo_engine::perft::*;
use tempo_engine::*;

const ONE_THREAD: usize = 1;

fn cpu_threads() -> usize {
    available_parallelism()
        .map(|inner| inner.get())
        .unwrap_or(1)
}

/// Run single and multithreaded perft `expected_nodes.len()` times.
/// The index of each expected_node value is its ply.
fn perft_tester(fen: &str, expected_nodes: Vec<u64>) {
    let (position, side) = Position::parse_fen(fen).unwrap();
    for (ply, expected_node) in expected_nodes.into_iter().enumerate() {
        let single_thread_result = perft(position.clone(), side, ply as u8, ONE_THREAD);
        let multi_thread_result = perft(position.clone(), side, ply as u8, cpu_threads());

        println!("perft({ply}): {single_thread_result:?}");
        assert_eq!(single_thread_result.nodes, expected_node);
        assert_eq!(single_thread_result, multi_thread_result);
    }
}

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
// https://www.chessprogramming.org/Perft_Results#Position_2
const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
// https://www.chessprogramming.org/Perft_Results#Position_3
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
// https://www.chessprogramming.org/Perft_Results#Position_4
const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
// https://www.chessprogramming.org/Perft_Results#Position_5
const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

#[test]
fn perft_starting_position() {
    perft_tester(START, vec![1, 20, 400, 8_902, 197_281]);
}

#[test]
fn perft_starting_position_black() {
    let position = Position::start_position();
    assert_eq!(
        perft(position.clone(), Color::Black, 1, ONE_THREAD).nodes,
        20
    );
    assert_eq!(perft(position, Color::Black, 2, ONE_THREAD).nodes, 400);
}

#[test]
#[ignore]
fn perft_starting_position_expensive() {
    let position = Position::start_position();
    let ply5 = perft(position, Color::White, 5, cpu_threads());

    println!("perft(5): {:?}", ply5);
    assert_eq!(ply5.nodes, 4_865_609);
}

#[test]
fn perft_kiwipete_position() {
    perft_tester(KIWIPETE, vec![1, 48, 2_039, 97_862]);
}

#[test]
#[ignore]
fn perft_kiwipete_position_expensive() {
    let (position, side) = Position::parse_fen(KIWIPETE).unwrap();
    assert_eq!(perft(position, side, 4, cpu_threads()).nodes, 4_085_603);
}

#[test]
fn perft_position_3() {
    perft_tester(POSITION_3, vec![1, 14, 191, 2_812, 43_238]);
}

#[test]
fn perft_position_4() {
    perft_tester(POSITION_4, vec![1, 6, 264, 9_467]);
}

#[test]
fn perft_position_5() {
    perft_tester(POSITION_5, vec![1, 44, 1_486, 62_379]);
}
