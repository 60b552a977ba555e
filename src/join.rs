//! The join procedure (Righini & Salani 2006): bridging a forward label and a backward label
//! across a shared edge into a complete source-to-sink path, and picking the cheapest such
//! bridge (or direct single-direction label) as the incumbent.

use crate::graph::{EdgeId, Graph};
use crate::label::{Direction, LabelArena, LabelId};
use crate::refs::ResourceExtension;
use crate::resources::ResourceVector;
use crate::search::SearchOutcome;

/// Tolerance for the critical-resource ordering check at a bridge. Labels arrive at this
/// comparison via independent chains of floating-point additions, so a strict `<=` would reject
/// valid bridges on harmless rounding noise.
const BRIDGE_EPSILON: f64 = 1e-9;

/// A candidate complete path, before it has been turned into the public [`crate::result::Path`].
pub(crate) struct Candidate {
    pub cost: f64,
    pub consumed_resources: ResourceVector,
    pub forward_label: Option<LabelId>,
    pub backward_label: Option<LabelId>,
    pub bridging_edge: Option<EdgeId>,
}

impl Candidate {
    /// Lexicographic order: lower cost wins; ties broken by the resource vector, component by
    /// component, lower first. Gives a deterministic incumbent across equally-cheap paths.
    fn better_than(&self, other: &Self) -> bool {
        if self.cost != other.cost {
            return self.cost < other.cost;
        }
        self.consumed_resources
            .as_slice()
            .iter()
            .zip(other.consumed_resources.as_slice())
            .find(|(a, b)| a != b)
            .is_some_and(|(a, b)| a < b)
    }
}

pub(crate) fn best_candidate(
    graph: &Graph,
    outcome: &SearchOutcome,
    ext: &dyn ResourceExtension,
    min_res: &ResourceVector,
    max_res: &ResourceVector,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    let mut consider = |candidate: Candidate| {
        let replace = match &best {
            None => true,
            Some(current) => candidate.better_than(current),
        };
        if replace {
            best = Some(candidate);
        }
    };

    for &label_id in &outcome.direct_forward {
        let label = outcome.forward_arena.get(label_id);
        consider(Candidate {
            cost: label.cost,
            consumed_resources: label.resources.sub(min_res),
            forward_label: Some(label_id),
            backward_label: None,
            bridging_edge: None,
        });
    }
    for &label_id in &outcome.direct_backward {
        let label = outcome.backward_arena.get(label_id);
        consider(Candidate {
            cost: label.cost,
            consumed_resources: max_res.sub(&label.resources),
            forward_label: None,
            backward_label: Some(label_id),
            bridging_edge: None,
        });
    }

    for v in 0..graph.num_vertices() {
        if outcome.forward_frontier[v].is_empty() {
            continue;
        }
        for &edge_id in graph.out_edges(v) {
            let edge = graph.edge(edge_id);
            if outcome.backward_frontier[edge.head].is_empty() {
                continue;
            }
            for f_id in outcome.forward_frontier[v].iter() {
                let f = outcome.forward_arena.get(f_id);
                for b_id in outcome.backward_frontier[edge.head].iter() {
                    let b = outcome.backward_arena.get(b_id);
                    if !bridge_admissible(f, b, min_res.critical(), max_res.critical()) {
                        continue;
                    }
                    let consumed = ext.join(
                        &f.resources,
                        &b.resources,
                        edge.tail,
                        edge.head,
                        &edge.resources,
                        min_res,
                        max_res,
                    );
                    if !consumed.within_bounds(min_res, max_res) {
                        continue;
                    }
                    consider(Candidate {
                        cost: f.cost + edge.cost + b.cost,
                        consumed_resources: consumed,
                        forward_label: Some(f_id),
                        backward_label: Some(b_id),
                        bridging_edge: Some(edge_id),
                    });
                }
            }
        }
    }

    best
}

/// A bridge is admissible when the forward prefix has not already swept past the point where the
/// backward suffix begins: the forward label's critical resource (rising from `min_res[0]`) must
/// not exceed the backward label's (falling from `max_res[0]`). Requiring the two to meet
/// *exactly* at the bridge is too strong in general — `min_res`/`max_res` bound each side
/// independently rather than partitioning a fixed total consumption between them, so a path whose
/// critical-resource usage is tight against both ends can still be admissible without the two
/// watermarks landing on the same value. The real feasibility test is the joined resource
/// vector's bounds check the caller runs afterward; this is a cheap necessary condition that
/// skips obviously-backwards pairings before paying for that computation.
fn bridge_admissible(
    forward: &crate::label::Label,
    backward: &crate::label::Label,
    min_critical: f64,
    max_critical: f64,
) -> bool {
    debug_assert_eq!(forward.direction, Direction::Forward);
    debug_assert_eq!(backward.direction, Direction::Backward);
    debug_assert!(forward.resources.critical() >= min_critical - BRIDGE_EPSILON);
    debug_assert!(backward.resources.critical() <= max_critical + BRIDGE_EPSILON);
    forward.resources.critical() <= backward.resources.critical() + BRIDGE_EPSILON
}

pub(crate) fn reconstruct_vertices(
    graph: &Graph,
    forward_arena: &LabelArena,
    backward_arena: &LabelArena,
    candidate: &Candidate,
) -> Vec<crate::graph::VertexId> {
    let mut vertices = candidate
        .forward_label
        .map(|id| forward_arena.vertex_chain(id))
        .unwrap_or_else(|| vec![graph.source()]);
    if let Some(backward_id) = candidate.backward_label {
        let mut tail = backward_arena.vertex_chain(backward_id);
        tail.reverse();
        if candidate.forward_label.is_some() {
            vertices.extend(tail);
        } else {
            vertices = tail;
        }
    }
    vertices
}

pub(crate) fn reconstruct_edges(
    forward_arena: &LabelArena,
    backward_arena: &LabelArena,
    candidate: &Candidate,
) -> Vec<EdgeId> {
    let mut edges = candidate
        .forward_label
        .map(|id| forward_arena.edge_chain(id))
        .unwrap_or_default();
    if let Some(bridge) = candidate.bridging_edge {
        edges.push(bridge);
    }
    if let Some(backward_id) = candidate.backward_label {
        let mut tail = backward_arena.edge_chain(backward_id);
        tail.reverse();
        edges.extend(tail);
    }
    edges
}
