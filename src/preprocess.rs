//! Preprocessing: negative-cycle detection and the reachability/lower-bound tables the search
//! uses to prune labels before they are ever pushed onto a frontier.
//!
//! The negative-cycle check is an SPFA (queue-based Bellman-Ford), grounded on the teacher's
//! `shortest_paths::bellman_ford` implementation: relax edges until the queue empties, and if a
//! vertex is relaxed more than `num_vertices` times it sits on (or downstream of) a negative
//! cycle, which is then reconstructed by walking predecessor links.

use std::collections::VecDeque;

use error_stack::{Report, Result};
use fixedbitset::FixedBitSet;

use crate::error::EngineError;
use crate::graph::{Graph, VertexId};

/// Reachability and cost lower-bound tables computed once before search begins.
pub struct Preprocessed {
    /// Vertices reachable from the source by following edges forward.
    pub forward_reachable: FixedBitSet,
    /// Vertices from which the sink is reachable by following edges forward.
    pub backward_reachable: FixedBitSet,
    /// `cost_from_source[v]`: a lower bound on the cost of any source-to-`v` path, ignoring
    /// resource feasibility. `f64::INFINITY` if `v` is not forward-reachable.
    pub cost_from_source: Vec<f64>,
    /// `cost_to_sink[v]`: a lower bound on the cost of any `v`-to-sink path, ignoring resource
    /// feasibility. `f64::INFINITY` if the sink is not reachable from `v`.
    pub cost_to_sink: Vec<f64>,
}

impl Preprocessed {
    /// Whether `v` can possibly lie on some source-to-sink path.
    pub fn on_some_path(&self, v: VertexId) -> bool {
        self.forward_reachable.contains(v) && self.backward_reachable.contains(v)
    }
}

pub(crate) fn preprocess(graph: &Graph) -> Result<Preprocessed, EngineError> {
    detect_negative_cycle(graph)?;

    let forward_reachable = reachable_forward(graph, graph.source());
    let backward_reachable = reachable_backward(graph, graph.sink());
    let cost_from_source = shortest_costs_forward(graph, graph.source());
    let cost_to_sink = shortest_costs_backward(graph, graph.sink());

    Ok(Preprocessed {
        forward_reachable,
        backward_reachable,
        cost_from_source,
        cost_to_sink,
    })
}

fn reachable_forward(graph: &Graph, from: VertexId) -> FixedBitSet {
    let mut seen = FixedBitSet::with_capacity(graph.num_vertices());
    let mut queue = VecDeque::from([from]);
    seen.insert(from);
    while let Some(v) = queue.pop_front() {
        for &edge_id in graph.out_edges(v) {
            let head = graph.edge(edge_id).head;
            if !seen.contains(head) {
                seen.insert(head);
                queue.push_back(head);
            }
        }
    }
    seen
}

fn reachable_backward(graph: &Graph, to: VertexId) -> FixedBitSet {
    let mut seen = FixedBitSet::with_capacity(graph.num_vertices());
    let mut queue = VecDeque::from([to]);
    seen.insert(to);
    while let Some(v) = queue.pop_front() {
        for &edge_id in graph.in_edges(v) {
            let tail = graph.edge(edge_id).tail;
            if !seen.contains(tail) {
                seen.insert(tail);
                queue.push_back(tail);
            }
        }
    }
    seen
}

/// SPFA shortest costs from `from`, following edges forward. Assumes no negative cycle (the
/// caller runs [`detect_negative_cycle`] first).
fn shortest_costs_forward(graph: &Graph, from: VertexId) -> Vec<f64> {
    let n = graph.num_vertices();
    let mut dist = vec![f64::INFINITY; n];
    dist[from] = 0.0;
    let mut in_queue = vec![false; n];
    let mut queue = VecDeque::from([from]);
    in_queue[from] = true;

    while let Some(v) = queue.pop_front() {
        in_queue[v] = false;
        let base = dist[v];
        if base.is_infinite() {
            continue;
        }
        for &edge_id in graph.out_edges(v) {
            let edge = graph.edge(edge_id);
            let candidate = base + edge.cost;
            if candidate < dist[edge.head] {
                dist[edge.head] = candidate;
                if !in_queue[edge.head] {
                    in_queue[edge.head] = true;
                    queue.push_back(edge.head);
                }
            }
        }
    }
    dist
}

/// SPFA shortest costs to `to`, following edges backward.
fn shortest_costs_backward(graph: &Graph, to: VertexId) -> Vec<f64> {
    let n = graph.num_vertices();
    let mut dist = vec![f64::INFINITY; n];
    dist[to] = 0.0;
    let mut in_queue = vec![false; n];
    let mut queue = VecDeque::from([to]);
    in_queue[to] = true;

    while let Some(v) = queue.pop_front() {
        in_queue[v] = false;
        let base = dist[v];
        if base.is_infinite() {
            continue;
        }
        for &edge_id in graph.in_edges(v) {
            let edge = graph.edge(edge_id);
            let candidate = base + edge.cost;
            if candidate < dist[edge.tail] {
                dist[edge.tail] = candidate;
                if !in_queue[edge.tail] {
                    in_queue[edge.tail] = true;
                    queue.push_back(edge.tail);
                }
            }
        }
    }
    dist
}

/// Queue-based Bellman-Ford that additionally reconstructs a witness cycle when a vertex is
/// relaxed an unreasonable number of times.
fn detect_negative_cycle(graph: &Graph) -> Result<(), EngineError> {
    let n = graph.num_vertices();
    if n == 0 {
        return Ok(());
    }
    let mut dist = vec![0.0_f64; n];
    let mut predecessor: Vec<Option<VertexId>> = vec![None; n];
    let mut relax_count = vec![0usize; n];
    let mut in_queue = vec![true; n];
    let mut queue: VecDeque<VertexId> = (0..n).collect();

    while let Some(v) = queue.pop_front() {
        in_queue[v] = false;
        let base = dist[v];
        for &edge_id in graph.out_edges(v) {
            let edge = graph.edge(edge_id);
            let candidate = base + edge.cost;
            if candidate < dist[edge.head] {
                dist[edge.head] = candidate;
                predecessor[edge.head] = Some(v);
                relax_count[edge.head] += 1;
                if relax_count[edge.head] >= n {
                    let witness = reconstruct_cycle(edge.head, &predecessor, n);
                    return Err(Report::new(EngineError::NegativeCycle { witness }));
                }
                if !in_queue[edge.head] {
                    in_queue[edge.head] = true;
                    queue.push_back(edge.head);
                }
            }
        }
    }
    Ok(())
}

/// Walks `predecessor` links `steps` times from `start` to land inside the cycle, then walks
/// the cycle itself once to produce a witness sequence.
fn reconstruct_cycle(start: VertexId, predecessor: &[Option<VertexId>], steps: usize) -> Vec<VertexId> {
    let mut cursor = start;
    for _ in 0..steps {
        cursor = predecessor[cursor].unwrap_or(cursor);
    }
    let cycle_start = cursor;
    let mut witness = vec![cycle_start];
    cursor = predecessor[cycle_start].unwrap_or(cycle_start);
    while cursor != cycle_start {
        witness.push(cursor);
        cursor = match predecessor[cursor] {
            Some(p) => p,
            None => break,
        };
    }
    witness.push(cycle_start);
    witness.reverse();
    witness
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::resources::ResourceVector;

    fn edge(res: f64) -> ResourceVector {
        ResourceVector::new(vec![res])
    }

    #[test]
    fn detects_negative_cycle() {
        let mut b = GraphBuilder::new(4, 1);
        b.add_edge(0, 1, 1.0, edge(1.0)).unwrap();
        b.add_edge(1, 2, -5.0, edge(1.0)).unwrap();
        b.add_edge(2, 1, 1.0, edge(1.0)).unwrap();
        b.add_edge(1, 3, 1.0, edge(1.0)).unwrap();
        let graph = b.build(0, 3).unwrap();
        let result = preprocess(&graph);
        assert!(matches!(
            result.unwrap_err().current_context(),
            EngineError::NegativeCycle { .. }
        ));
    }

    #[test]
    fn reachability_excludes_dead_ends() {
        let mut b = GraphBuilder::new(4, 1);
        b.add_edge(0, 1, 1.0, edge(1.0)).unwrap();
        b.add_edge(1, 3, 1.0, edge(1.0)).unwrap();
        b.add_edge(0, 2, 1.0, edge(1.0)).unwrap(); // 2 is a dead end, never reaches sink 3
        let graph = b.build(0, 3).unwrap();
        let pre = preprocess(&graph).unwrap();
        assert!(pre.on_some_path(1));
        assert!(!pre.on_some_path(2));
    }
}
