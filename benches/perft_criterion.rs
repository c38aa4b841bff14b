use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rook_engine::game_state::chess_rules::STARTING_POSITION_FEN;
use rook_engine::game_state::game_state::GameState;
use rook_engine::move_generation::perft::perft;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

// Castling-heavy reference positions are left out: castling here only checks
// the king's landing square, so their published counts do not apply.
const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: STARTING_POSITION_FEN,
        expected_nodes: &[20, 400, 8902],
    },
    BenchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812],
    },
];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: STARTING_POSITION_FEN,
        expected_nodes: &[20, 400, 8902, 197_281],
    },
    BenchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812, 43_238],
    },
];

fn suite_is_standard() -> bool {
    matches!(std::env::var("ROOK_BENCH_SUITE"), Ok(value) if value.eq_ignore_ascii_case("standard"))
}

fn bench_perft(c: &mut Criterion) {
    let (suite_name, cases) = if suite_is_standard() {
        ("standard", CASES_STANDARD)
    } else {
        ("quick", CASES_QUICK)
    };

    let mut group = c.benchmark_group(format!("perft_{suite_name}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in cases {
        let mut game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");

        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            let warmup = perft(&mut game, depth).expect("perft should run");
            assert_eq!(
                warmup.nodes as u64, *expected_nodes,
                "node mismatch in warmup for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(*expected_nodes));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_d{}", case.name, depth)),
                expected_nodes,
                |b, expected| {
                    b.iter(|| {
                        let count = perft(black_box(&mut game), black_box(depth))
                            .expect("perft benchmark run should succeed");
                        assert_eq!(count.nodes as u64, *expected);
                        black_box(count.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
