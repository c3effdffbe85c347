//! Criterion benchmarks for advection, projection, and seeding.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use eddy_bench::scattered_vortices;
use eddy_flow::{advect, divergence, project, seed};
use eddy_solver::setup_solver;
use eddy_test_utils::random_grid;

const SIZES: [usize; 3] = [16, 64, 128];

fn bench_advect(c: &mut Criterion) {
    let mut group = c.benchmark_group("advect");
    for n in SIZES {
        let field = random_grid(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &field, |b, field| {
            b.iter(|| black_box(advect(field, 0.1).unwrap()));
        });
    }
    group.finish();
}

fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("project");
    for n in SIZES {
        let solver = setup_solver(n).unwrap();
        let field = random_grid(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &field, |b, field| {
            b.iter(|| black_box(project(&solver, field, 0.1, 1.0).unwrap()));
        });
    }
    group.finish();
}

fn bench_divergence(c: &mut Criterion) {
    let field = random_grid(128, 42);
    c.bench_function("divergence_128", |b| {
        b.iter(|| black_box(divergence(&field)));
    });
}

fn bench_seed(c: &mut Criterion) {
    let vortices = scattered_vortices(64, 16, 7);
    c.bench_function("seed_64_16_vortices", |b| {
        b.iter(|| black_box(seed(64, &vortices).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_advect,
    bench_project,
    bench_divergence,
    bench_seed
);
criterion_main!(benches);
