use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use transducers::{
    pipeline::{minimize_text, Flavor},
    prelude::*,
    random::{random_mealy, random_moore},
};

const SIZES: [usize; 3] = [16, 128, 1024];

fn mealy_minimization(c: &mut Criterion) {
    let mut group = c.benchmark_group("mealy");
    for size in SIZES {
        let mm = random_mealy(4, size, 2);
        group.bench_with_input(BenchmarkId::new("minimize", size), &mm, |b, mm| {
            b.iter(|| black_box(mm.clone().minimize()))
        });
        let table = mm.to_table();
        group.bench_with_input(BenchmarkId::new("pipeline", size), &table, |b, table| {
            b.iter(|| black_box(minimize_text(Flavor::Mealy, table)))
        });
    }
    group.finish();
}

fn moore_minimization(c: &mut Criterion) {
    let mut group = c.benchmark_group("moore");
    for size in SIZES {
        let mm = random_moore(4, size, 2);
        group.bench_with_input(BenchmarkId::new("minimize", size), &mm, |b, mm| {
            b.iter(|| black_box(mm.clone().minimize()))
        });
        let table = mm.to_table();
        group.bench_with_input(BenchmarkId::new("pipeline", size), &table, |b, table| {
            b.iter(|| black_box(minimize_text(Flavor::Moore, table)))
        });
    }
    group.finish();
}

criterion_group!(benches, mealy_minimization, moore_minimization);
criterion_main!(benches);
