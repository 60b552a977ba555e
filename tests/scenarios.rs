//! Concrete worked scenarios, each pinned to an exact cost/path/resource-consumption triple.

use approx::assert_relative_eq;
use rcspp::{EngineBuilder, EngineError, ResourceVector, SearchDirection};

fn rv(values: &[f64]) -> ResourceVector {
    ResourceVector::new(values.to_vec())
}

fn assert_resources_eq(got: &ResourceVector, expected: &[f64]) {
    for (g, e) in got.as_slice().iter().zip(expected) {
        assert_relative_eq!(g, e, epsilon = 1e-9);
    }
}

/// Source=0, A=1, B=2, C=3, Sink=4.
fn build_s1(direction: SearchDirection) -> EngineBuilder {
    let mut b = EngineBuilder::new(5, 2).direction(direction);
    b.add_edge(0, 1, 0.0, rv(&[1.0, 2.0])).unwrap();
    b.add_edge(1, 2, 0.0, rv(&[1.0, 0.3])).unwrap();
    b.add_edge(1, 3, 0.0, rv(&[1.0, 0.1])).unwrap();
    b.add_edge(2, 3, -10.0, rv(&[1.0, 3.0])).unwrap();
    b.add_edge(2, 4, 10.0, rv(&[1.0, 2.0])).unwrap();
    b.add_edge(3, 4, 0.0, rv(&[1.0, 10.0])).unwrap();
    b
}

#[test]
fn s1_bidirectional() {
    let engine = build_s1(SearchDirection::Bidirectional)
        .build(0, 4, rv(&[1.0, 0.0]), rv(&[4.0, 20.0]))
        .unwrap();
    let path = engine.solve().unwrap();
    assert_eq!(path.vertices(), &[0, 1, 2, 3, 4]);
    assert_relative_eq!(path.cost(), -10.0, epsilon = 1e-9);
    assert_resources_eq(path.consumed_resources(), &[4.0, 15.3]);
}

#[test]
fn s2_forward_only_matches_bidirectional() {
    let engine = build_s1(SearchDirection::Forward)
        .build(0, 4, rv(&[1.0, 0.0]), rv(&[4.0, 20.0]))
        .unwrap();
    let path = engine.solve().unwrap();
    assert_eq!(path.vertices(), &[0, 1, 2, 3, 4]);
    assert_relative_eq!(path.cost(), -10.0, epsilon = 1e-9);
    assert_resources_eq(path.consumed_resources(), &[4.0, 15.3]);
}

#[test]
fn s3_linear_chain_hits_resource_cap() {
    let mut b = EngineBuilder::new(4, 2);
    b.add_edge(0, 1, 1.0, rv(&[1.0, 1.0])).unwrap();
    b.add_edge(1, 2, 1.0, rv(&[1.0, 1.0])).unwrap();
    b.add_edge(2, 3, 1.0, rv(&[1.0, 1.0])).unwrap();
    let engine = b.build(0, 3, rv(&[0.0, 0.0]), rv(&[3.0, 3.0])).unwrap();
    let path = engine.solve().unwrap();
    assert_eq!(path.vertices(), &[0, 1, 2, 3]);
    assert_relative_eq!(path.cost(), 3.0, epsilon = 1e-9);
    assert_resources_eq(path.consumed_resources(), &[3.0, 3.0]);
}

#[test]
fn s4_negative_cycle_is_rejected() {
    let mut b = EngineBuilder::new(5, 1);
    b.add_edge(0, 1, 1.0, rv(&[1.0])).unwrap();
    b.add_edge(1, 2, 1.0, rv(&[1.0])).unwrap();
    // off-path pair (3, 4) carrying a 2-cycle of total cost -5
    b.add_node(3).unwrap();
    b.add_node(4).unwrap();
    b.add_edge(3, 4, -3.0, rv(&[1.0])).unwrap();
    b.add_edge(4, 3, -2.0, rv(&[1.0])).unwrap();
    let engine = b.build(0, 2, rv(&[0.0]), rv(&[10.0])).unwrap();
    let err = engine.solve().unwrap_err();
    assert!(matches!(
        err.current_context(),
        EngineError::NegativeCycle { .. }
    ));
}

#[test]
fn s5_resource_bound_makes_path_infeasible() {
    let mut b = EngineBuilder::new(3, 2);
    b.add_edge(0, 1, 0.0, rv(&[1.0, 10.0])).unwrap();
    b.add_edge(1, 2, 0.0, rv(&[1.0, 10.0])).unwrap();
    let engine = b.build(0, 2, rv(&[0.0, 0.0]), rv(&[2.0, 15.0])).unwrap();
    let err = engine.solve().unwrap_err();
    assert!(matches!(err.current_context(), EngineError::NoFeasiblePath));
}

/// Source=0, A=1, B=2, C=3, D=4, E=5, F=6, G=7, Sink=8 (9 vertices). The optimal path runs
/// Source-A-C-D-E-Sink; B and F-G are decoy branches that are either pricier or merely
/// feasible-but-worse.
#[test]
fn s6_nine_vertex_decoy_branches() {
    let mut b = EngineBuilder::new(9, 2);
    // optimal chain
    b.add_edge(0, 1, -2.0, rv(&[1.0, 1.0])).unwrap(); // Source -> A
    b.add_edge(1, 3, -2.0, rv(&[1.0, 1.0])).unwrap(); // A -> C
    b.add_edge(3, 4, -2.0, rv(&[1.0, 1.0])).unwrap(); // C -> D
    b.add_edge(4, 5, -2.0, rv(&[1.0, 1.0])).unwrap(); // D -> E
    b.add_edge(5, 8, -2.0, rv(&[1.0, 1.0])).unwrap(); // E -> Sink
    // decoy: Source -> B -> Sink, feasible, cost 0
    b.add_edge(0, 2, 0.0, rv(&[1.0, 1.0])).unwrap();
    b.add_edge(2, 8, 0.0, rv(&[4.0, 4.0])).unwrap();
    // decoy: Source -> A -> F -> G -> Sink, feasible, cost -2
    b.add_edge(1, 6, 0.0, rv(&[1.0, 1.0])).unwrap();
    b.add_edge(6, 7, 0.0, rv(&[1.0, 1.0])).unwrap();
    b.add_edge(7, 8, 0.0, rv(&[1.0, 1.0])).unwrap();

    let engine = b.build(0, 8, rv(&[0.0, 0.0]), rv(&[5.0, 5.0])).unwrap();
    let path = engine.solve().unwrap();
    assert_eq!(path.vertices(), &[0, 1, 3, 4, 5, 8]);
    assert_relative_eq!(path.cost(), -10.0, epsilon = 1e-9);
    assert_resources_eq(path.consumed_resources(), &[5.0, 5.0]);
}
