//! Benchmarks for fuzzy fan speed inference

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fuzzy_fan::{evaluate, sample_surface, DefuzzificationOp, FanController, InferenceOps};

fn evaluate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for (name, temperature, occupancy) in [("single rule", 24., 8.), ("overlap", 22., 5.), ("no rule", -20., -5.)] {
        group.bench_with_input(BenchmarkId::new("centroid", name), &(temperature, occupancy), |b, &(t, o)| {
            b.iter(|| evaluate(black_box(t), black_box(o)))
        });
    }

    let bisector = FanController::new(InferenceOps { defuzz_op: DefuzzificationOp::Bisector, ..Default::default() });

    group.bench_function("bisector", |b| b.iter(|| bisector.eval(black_box(22.), black_box(5.))));
    group.finish();
}

fn surface_benchmark(c: &mut Criterion) {
    c.bench_function("sample_surface", |b| b.iter(sample_surface));
}

criterion_group!(benches, evaluate_benchmark, surface_benchmark);
criterion_main!(benches);
