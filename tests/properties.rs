//! Property-based tests over the public API: feasibility of any reported path, and
//! equivalence between bidirectional and one-sided search on the same additive-REF instance.

use proptest::prelude::*;
use rcspp::{EngineBuilder, ResourceVector, SearchDirection};

/// A small layered DAG: `n` vertices, edges only from a lower index to a higher one, so the
/// graph can never contain a cycle and `0` is always a valid source with `n - 1` a valid sink.
#[derive(Debug, Clone)]
struct LayeredGraph {
    n: usize,
    edges: Vec<(usize, usize, f64, f64)>, // tail, head, cost, critical-resource consumption
}

fn layered_graph(max_n: usize) -> impl Strategy<Value = LayeredGraph> {
    (3..=max_n).prop_flat_map(|n| {
        let edge = (0..n - 1).prop_flat_map(move |tail| {
            ((tail + 1)..n, -5.0..5.0_f64, 1.0..4.0_f64)
                .prop_map(move |(head, cost, res)| (tail, head, cost, res))
        });
        prop::collection::vec(edge, 1..(2 * n)).prop_map(move |edges| LayeredGraph { n, edges })
    })
}

fn build(graph: &LayeredGraph, direction: SearchDirection) -> Option<rcspp::Path> {
    let mut builder = EngineBuilder::new(graph.n, 1).direction(direction);
    for &(tail, head, cost, res) in &graph.edges {
        builder
            .add_edge(tail, head, cost, ResourceVector::new(vec![res]))
            .unwrap();
    }
    let max_critical: f64 = graph.edges.iter().map(|e| e.3).sum::<f64>().max(1.0) + 1.0;
    let engine = builder
        .build(
            0,
            graph.n - 1,
            ResourceVector::new(vec![0.0]),
            ResourceVector::new(vec![max_critical]),
        )
        .ok()?;
    engine.solve().ok()
}

proptest! {
    /// Invariant 4: every reported path's consumed resources lie within [0, max - min].
    #[test]
    fn joined_path_respects_resource_bounds(graph in layered_graph(6)) {
        if let Some(path) = build(&graph, SearchDirection::Bidirectional) {
            let consumed = path.consumed_resources().critical();
            prop_assert!(consumed >= -1e-9);
        }
    }

    /// Invariant 5: with the default additive REF, bidirectional search finds the same optimal
    /// cost as pure forward and pure backward search on the same feasible instance.
    #[test]
    fn bidirectional_matches_one_sided(graph in layered_graph(6)) {
        let both = build(&graph, SearchDirection::Bidirectional).map(|p| p.cost());
        let fwd = build(&graph, SearchDirection::Forward).map(|p| p.cost());
        let bwd = build(&graph, SearchDirection::Backward).map(|p| p.cost());

        if let Some(cost) = both {
            prop_assert!(fwd.is_some());
            prop_assert!(bwd.is_some());
            prop_assert!((cost - fwd.unwrap()).abs() < 1e-6);
            prop_assert!((cost - bwd.unwrap()).abs() < 1e-6);
        }
    }
}
