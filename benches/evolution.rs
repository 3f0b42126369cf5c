//! Benchmarks for the evolutionary search loop.

use afinar::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn stub(genes: &Genes) -> afinar::Result<f64> {
    let k = genes.get_i64("n_neighbors").unwrap_or(1) as f64;
    let bonus = if genes.get_str("weights") == Some("distance") { 0.05 } else { 0.0 };
    Ok((1.0 / k) * 0.95 + bonus)
}

fn bench_search_stub(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_stub_evaluator");

    for size in [10, 50, 200].iter() {
        let config = EvolutionConfig::new()
            .with_population_size(*size)
            .with_parent_count(size / 2)
            .with_generations(10);
        let engine = EvolutionEngine::new(ParameterSpace::knn_default(), stub).with_config(config);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(engine.run().unwrap()));
        });
    }

    group.finish();
}

fn bench_search_knn(c: &mut Criterion) {
    let n = 200;
    let features: Vec<f32> = (0..n * 2).map(|i| ((i * 37) % 101) as f32 / 10.0).collect();
    let labels: Vec<usize> = (0..n).map(|i| usize::from(features[i * 2] > 5.0)).collect();
    let data = Dataset::new(Matrix::from_vec(n, 2, features).unwrap(), labels).unwrap();
    let split = train_test_split(&data, 0.3, 42).unwrap();

    let engine = EvolutionEngine::new(
        ParameterSpace::knn_default(),
        ModelEvaluator::new(KnnFactory::new(), split),
    );

    c.bench_function("search_knn_default", |b| {
        b.iter(|| black_box(engine.run().unwrap()));
    });
}

criterion_group!(benches, bench_search_stub, bench_search_knn);
criterion_main!(benches);
