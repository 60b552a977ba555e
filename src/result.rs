//! The public result type: a complete, feasible source-to-sink path.

use crate::graph::{EdgeId, Graph, VertexId};
use crate::join::{self, Candidate};
use crate::label::LabelArena;
use crate::resources::ResourceVector;

/// A feasible source-to-sink path found by the engine.
#[derive(Debug, Clone)]
pub struct Path {
    vertices: Vec<VertexId>,
    edges: Vec<EdgeId>,
    cost: f64,
    consumed_resources: ResourceVector,
}

impl Path {
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn consumed_resources(&self) -> &ResourceVector {
        &self.consumed_resources
    }
}

pub(crate) fn build_path(
    graph: &Graph,
    forward_arena: &LabelArena,
    backward_arena: &LabelArena,
    candidate: Candidate,
) -> Path {
    let vertices = join::reconstruct_vertices(graph, forward_arena, backward_arena, &candidate);
    let edges = join::reconstruct_edges(forward_arena, backward_arena, &candidate);
    Path {
        vertices,
        edges,
        cost: candidate.cost,
        consumed_resources: candidate.consumed_resources,
    }
}
