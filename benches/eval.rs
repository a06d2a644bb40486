// SPDX-License-Identifier: GPL-3.0-or-later

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use varifish::evaluate::evaluate;
use varifish::position::Position;
use varifish::types::Variant;

fn bench_evaluate_startpos(c: &mut Criterion) {
    varifish::init();
    let pos = Position::from_fen(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        Variant::Chess);
    c.bench_function("evaluate_startpos", |b| {
        b.iter(|| {
            let v = evaluate(black_box(&pos));
            black_box(v);
        });
    });
}

fn bench_evaluate_middlegame(c: &mut Criterion) {
    varifish::init();
    let pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        Variant::Chess);
    c.bench_function("evaluate_middlegame", |b| {
        b.iter(|| {
            let v = evaluate(black_box(&pos));
            black_box(v);
        });
    });
}

fn bench_evaluate_crazyhouse(c: &mut Criterion) {
    varifish::init();
    let pos = Position::from_fen(
        "r1bq1rk1/ppp2ppp/2np1n2/2b1p3/2B1P3/2NP1N2/PPP2PPP/R1BQ1RK1[NBq] w - - 0 8",
        Variant::Crazyhouse);
    c.bench_function("evaluate_crazyhouse", |b| {
        b.iter(|| {
            let v = evaluate(black_box(&pos));
            black_box(v);
        });
    });
}

fn bench_evaluate_horde(c: &mut Criterion) {
    varifish::init();
    let pos = Position::from_fen(
        "rnbqkbnr/pppppppp/8/1PP2PP1/PPPPPPPP/PPPPPPPP/PPPPPPPP/PPPPPPPP w kq - 0 1",
        Variant::Horde);
    c.bench_function("evaluate_horde", |b| {
        b.iter(|| {
            let v = evaluate(black_box(&pos));
            black_box(v);
        });
    });
}

criterion_group!(benches, bench_evaluate_startpos, bench_evaluate_middlegame,
    bench_evaluate_crazyhouse, bench_evaluate_horde);
criterion_main!(benches);
