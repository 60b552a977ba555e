//! Benchmarks the bidirectional search on a family of generated layered graphs, comparing
//! bidirectional against one-sided search the way the teacher's `bellman_ford` benchmark
//! compares queue-ordering strategies on the same instance.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rcspp::{EngineBuilder, ResourceVector, SearchDirection};

/// Builds a layered graph with `layers` layers of `width` vertices each, fully connected
/// layer-to-layer, plus a single source feeding the first layer and a single sink fed by the
/// last. Costs and critical-resource consumption are deterministic functions of the endpoints
/// so the benchmark is reproducible without a random number generator.
fn layered_instance(layers: usize, width: usize) -> (usize, Vec<(usize, usize, f64, f64)>) {
    let source = 0;
    let mut next_id = 1;
    let mut layer_ids = Vec::with_capacity(layers);
    for _ in 0..layers {
        let ids: Vec<usize> = (0..width).map(|i| next_id + i).collect();
        next_id += width;
        layer_ids.push(ids);
    }
    let sink = next_id;
    let n = next_id + 1;

    let mut edges = Vec::new();
    for (i, &first) in layer_ids[0].iter().enumerate() {
        edges.push((source, first, (i % 3) as f64 - 1.0, 1.0));
    }
    for pair in layer_ids.windows(2) {
        for (i, &a) in pair[0].iter().enumerate() {
            for (j, &b) in pair[1].iter().enumerate() {
                let cost = ((i + j) % 5) as f64 - 2.0;
                edges.push((a, b, cost, 1.0));
            }
        }
    }
    for &last in layer_ids.last().unwrap() {
        edges.push((last, sink, 0.0, 1.0));
    }

    (n, edges)
}

fn run_instance(layers: usize, width: usize, direction: SearchDirection) {
    let (n, edges) = layered_instance(layers, width);
    let mut builder = EngineBuilder::new(n, 1).direction(direction);
    for (tail, head, cost, res) in edges {
        builder
            .add_edge(tail, head, cost, ResourceVector::new(vec![res]))
            .unwrap();
    }
    let engine = builder
        .build(
            0,
            n - 1,
            ResourceVector::new(vec![0.0]),
            ResourceVector::new(vec![(layers + 2) as f64]),
        )
        .unwrap();
    let _ = engine.solve();
}

fn bench_bidirectional(c: &mut Criterion) {
    let mut group = c.benchmark_group("bidirectional_search");
    for &(layers, width) in &[(4, 4), (6, 6), (8, 8)] {
        group.bench_with_input(
            BenchmarkId::new("bidirectional", format!("{layers}x{width}")),
            &(layers, width),
            |b, &(layers, width)| {
                b.iter(|| run_instance(layers, width, SearchDirection::Bidirectional));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("forward_only", format!("{layers}x{width}")),
            &(layers, width),
            |b, &(layers, width)| {
                b.iter(|| run_instance(layers, width, SearchDirection::Forward));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_bidirectional);
criterion_main!(benches);
