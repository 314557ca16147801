use cmatrix::{strassen, CMatrix};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, SeedableRng};

fn make_random(rows: usize, cols: usize, seed: u64) -> CMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    CMatrix::random(rows, cols, -9..10, -9..10, &mut rng)
}

fn bench_multipliers(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    for size in [32usize, 64, 128] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let a = make_random(size, size, size as u64);
        let b = make_random(size, size, size as u64 + 1);

        group.bench_with_input(BenchmarkId::new("naive", size), &size, |bench, _| {
            bench.iter(|| strassen::naive_multiply(&a, &b).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("strassen", size), &size, |bench, _| {
            bench.iter(|| strassen::multiply(&a, &b).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("strassen_parallel", size), &size, |bench, _| {
            bench.iter(|| strassen::multiply_parallel(&a, &b).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_multipliers);
criterion_main!(benches);
