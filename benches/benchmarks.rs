use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shallow_chess::board::Board;
use shallow_chess::movegen::legal_moves;
use shallow_chess::perft::perft;
use shallow_chess::search::search;

pub fn bench_legal_moves_from_start(c: &mut Criterion) {
    let board = Board::starting_position();
    c.bench_function("legal moves from start", |b| {
        b.iter(|| legal_moves(black_box(&board)))
    });
}

pub fn bench_perft_3(c: &mut Criterion) {
    let board = Board::starting_position();
    c.bench_function("perft 3 from start", |b| {
        b.iter(|| perft(black_box(&board), black_box(3)))
    });
}

pub fn bench_search_3(c: &mut Criterion) {
    let board = Board::starting_position();
    c.bench_function("search from start 3 ply", |b| {
        b.iter(|| search(black_box(3), black_box(&board)))
    });
}

pub fn bench_search_4(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat-sampling");
    group.sample_size(10);

    let board = Board::starting_position();
    group.bench_function("search from start 4 ply", |b| {
        b.iter(|| search(black_box(4), black_box(&board)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_legal_moves_from_start,
    bench_perft_3,
    bench_search_3,
    bench_search_4,
);
criterion_main!(benches);
