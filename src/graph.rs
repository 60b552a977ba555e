//! The input graph: vertices, directed edges with a cost and a resource vector, and the
//! adjacency structures the search and preprocessing stages walk.

use error_stack::{Report, Result};
use fixedbitset::FixedBitSet;
use hashbrown::HashMap;

use crate::error::EngineError;
use crate::resources::ResourceVector;

pub type VertexId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeData {
    pub tail: VertexId,
    pub head: VertexId,
    pub cost: f64,
    pub resources: ResourceVector,
}

/// Accumulates vertices and edges before the topology is frozen into a [`Graph`].
///
/// Mirrors the builder pattern the teacher uses for `BellmanFord`/`Dijkstra` configuration:
/// cheap, infallible mutation methods during construction, validation deferred to a single
/// fallible `build` call.
pub(crate) struct GraphBuilder {
    num_vertices: usize,
    resource_dims: usize,
    present: FixedBitSet,
    edges: Vec<EdgeData>,
}

impl GraphBuilder {
    /// Creates a builder for a graph with `num_vertices` vertex slots and `resource_dims`
    /// resource components per edge (`resource_dims >= 1`; index `0` is the critical resource).
    pub(crate) fn new(num_vertices: usize, resource_dims: usize) -> Self {
        Self {
            num_vertices,
            resource_dims,
            present: FixedBitSet::with_capacity(num_vertices),
            edges: Vec::new(),
        }
    }

    /// Registers a vertex id as present in the graph. Vertices that are never referenced by an
    /// edge still need registering if they are the source or the sink.
    pub(crate) fn add_node(&mut self, id: VertexId) -> Result<(), EngineError> {
        if id >= self.num_vertices {
            return Err(Report::new(EngineError::InvalidTopology)
                .attach_printable(format!("vertex {id} exceeds capacity {}", self.num_vertices)));
        }
        self.present.insert(id);
        Ok(())
    }

    /// Adds a directed edge `tail -> head` with the given cost (may be negative) and resource
    /// consumption vector. Parallel edges between the same pair are permitted and are tracked
    /// individually; callers can retrieve them all through [`Graph::edges_between`].
    pub(crate) fn add_edge(
        &mut self,
        tail: VertexId,
        head: VertexId,
        cost: f64,
        resources: ResourceVector,
    ) -> Result<EdgeId, EngineError> {
        if tail >= self.num_vertices || head >= self.num_vertices {
            return Err(Report::new(EngineError::InvalidTopology)
                .attach_printable("edge endpoint exceeds vertex capacity"));
        }
        if resources.dims() != self.resource_dims {
            return Err(Report::new(EngineError::InvalidTopology).attach_printable(
                crate::error::length_mismatch(self.resource_dims, resources.dims()),
            ));
        }
        self.present.insert(tail);
        self.present.insert(head);
        let id = EdgeId(self.edges.len());
        self.edges.push(EdgeData {
            tail,
            head,
            cost,
            resources,
        });
        Ok(id)
    }

    /// Freezes the topology. Rejects a source with incoming edges, a sink with outgoing edges,
    /// or either terminal never having been registered.
    pub(crate) fn build(self, source: VertexId, sink: VertexId) -> Result<Graph, EngineError> {
        if source >= self.num_vertices || sink >= self.num_vertices {
            return Err(Report::new(EngineError::MissingTerminal));
        }
        if !self.present.contains(source) || !self.present.contains(sink) {
            return Err(Report::new(EngineError::MissingTerminal));
        }
        for edge in &self.edges {
            if edge.head == source {
                return Err(Report::new(EngineError::InvalidTopology)
                    .attach_printable("source vertex has an incoming edge"));
            }
            if edge.tail == sink {
                return Err(Report::new(EngineError::InvalidTopology)
                    .attach_printable("sink vertex has an outgoing edge"));
            }
        }

        let mut forward_adj = vec![Vec::new(); self.num_vertices];
        let mut backward_adj = vec![Vec::new(); self.num_vertices];
        let mut bridge_index: HashMap<(VertexId, VertexId), Vec<EdgeId>, fxhash::FxBuildHasher> =
            HashMap::default();
        for (idx, edge) in self.edges.iter().enumerate() {
            let id = EdgeId(idx);
            forward_adj[edge.tail].push(id);
            backward_adj[edge.head].push(id);
            bridge_index
                .entry((edge.tail, edge.head))
                .or_default()
                .push(id);
        }

        Ok(Graph {
            num_vertices: self.num_vertices,
            resource_dims: self.resource_dims,
            source,
            sink,
            edges: self.edges,
            forward_adj,
            backward_adj,
            bridge_index,
        })
    }
}

/// A frozen, validated graph ready for preprocessing and search.
pub(crate) struct Graph {
    num_vertices: usize,
    resource_dims: usize,
    source: VertexId,
    sink: VertexId,
    edges: Vec<EdgeData>,
    forward_adj: Vec<Vec<EdgeId>>,
    backward_adj: Vec<Vec<EdgeId>>,
    bridge_index: HashMap<(VertexId, VertexId), Vec<EdgeId>, fxhash::FxBuildHasher>,
}

impl Graph {
    pub(crate) fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub(crate) fn resource_dims(&self) -> usize {
        self.resource_dims
    }

    pub(crate) fn source(&self) -> VertexId {
        self.source
    }

    pub(crate) fn sink(&self) -> VertexId {
        self.sink
    }

    pub(crate) fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn edge(&self, id: EdgeId) -> &EdgeData {
        &self.edges[id.0]
    }

    /// Outgoing edges of `v`, in insertion order.
    pub(crate) fn out_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.forward_adj[v]
    }

    /// Incoming edges of `v`, in insertion order.
    pub(crate) fn in_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.backward_adj[v]
    }

    /// All edges `tail -> head`, including parallels. Empty slice if there is no such edge.
    pub(crate) fn edges_between(&self, tail: VertexId, head: VertexId) -> &[EdgeId] {
        self.bridge_index
            .get(&(tail, head))
            .map_or(&[], Vec::as_slice)
    }
}
