//! Benchmarks for bin assignment and histogram construction

use chorobin_core::{Sample, Scale, SchemeRef};
use chorobin_histogram::{assign_all, histogram};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// County-sized samples with a few missing values
fn generate_sample(size: usize) -> Sample {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    Sample::new((0..size).map(|i| {
        let value = if i % 97 == 0 {
            None
        } else {
            Some(rng.gen_range(0.0..1000.0))
        };
        (format!("{i:05}"), value)
    }))
}

fn generate_scale(bin_count: usize) -> Scale {
    let breaks = (1..bin_count).map(|i| i as f64 * 1000.0 / bin_count as f64).collect();
    Scale::threshold(breaks, SchemeRef::new("viridis"))
}

fn bench_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");

    for &size in &[1_000usize, 3_142, 50_000] {
        let sample = generate_sample(size);
        for &bins in &[5usize, 9, 20] {
            let scale = generate_scale(bins);
            group.bench_with_input(
                BenchmarkId::new(format!("{bins}_bins"), size),
                &(&scale, &sample),
                |b, (scale, sample)| b.iter(|| black_box(histogram(*scale, sample))),
            );
        }
    }

    group.finish();
}

fn bench_assign_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_all");
    let scale = generate_scale(7);

    for &size in &[1_000usize, 50_000] {
        let sample = generate_sample(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &sample, |b, sample| {
            b.iter(|| black_box(assign_all(&scale, sample)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_histogram, bench_assign_all);
criterion_main!(benches);
