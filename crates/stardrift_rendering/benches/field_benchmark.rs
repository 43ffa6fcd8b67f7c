//! Benchmark for particle field generation.
//!
//! Generation runs once per mount, so this measures startup cost, not
//! frame cost.
//!
//! Run with: cargo bench --package stardrift_rendering --bench field_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use stardrift_rendering::field::{FieldConfig, ParticleField};

fn benchmark_default_field(c: &mut Criterion) {
    let config = FieldConfig::default();

    c.bench_function("generate_500_particles", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            black_box(ParticleField::generate(black_box(&config), seed))
        });
    });
}

fn benchmark_dense_field(c: &mut Criterion) {
    let config = FieldConfig {
        count: 100_000,
        ..Default::default()
    };

    let mut group = c.benchmark_group("dense_field");
    group.throughput(Throughput::Elements(100_000));
    group.sample_size(10);

    group.bench_function("generate_100k_particles", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            black_box(ParticleField::generate(black_box(&config), seed))
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_default_field, benchmark_dense_field);
criterion_main!(benches);
