use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use memorchess::{Game, Legality, Position, perft};

struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [usize],
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        expected_nodes: &[20, 400, 8902],
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48, 2039],
    },
    BenchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812],
    },
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    for case in CASES {
        let game = match Game::from_fen(case.fen) {
            Ok(game) => game,
            Err(e) => panic!("{}: {e}", case.name),
        };

        for (ix, &expected) in case.expected_nodes.iter().enumerate() {
            let depth = ix + 1;
            assert_eq!(perft(&game, depth).nodes(), expected, "{} depth {depth}", case.name);

            group.throughput(Throughput::Elements(expected as u64));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_d{depth}", case.name)),
                &expected,
                |b, &expected| {
                    b.iter(|| {
                        let nodes = perft(black_box(&game), black_box(depth)).nodes();
                        assert_eq!(nodes, expected);
                        nodes
                    })
                },
            );
        }
    }

    group.finish();
}

/// Full check rules against none at all.
fn bench_legality(c: &mut Criterion) {
    let mut group = c.benchmark_group("legality");
    group.sample_size(10);
    for (name, legality) in [("checked", Legality::Checked), ("unchecked", Legality::Unchecked)] {
        let game = Game::with_oracle(Position::startpos(), legality);
        group.bench_function(name, |b| b.iter(|| perft(black_box(&game), 2).nodes()));
    }
    group.finish();
}

criterion_group!(perft_benches, bench_perft, bench_legality);
criterion_main!(perft_benches);
