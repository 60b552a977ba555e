//! The construction and execution façade: build up a graph and its resource bounds, then run
//! the bidirectional search to completion.

use std::time::{Duration, Instant};

use error_stack::{Report, Result};

use crate::error::EngineError;
use crate::graph::{EdgeId, Graph, GraphBuilder, VertexId};
use crate::join;
use crate::preprocess::{self, Preprocessed};
use crate::refs::{AdditiveResourceExtension, ResourceExtension};
use crate::resources::ResourceVector;
use crate::result::{self, Path};
use crate::search::{self, SearchConfig, SearchDirection};

/// Accumulates graph topology and search configuration before the bounds are frozen and the
/// topology validated. Mirrors the teacher's builder-pattern configuration objects
/// (`BellmanFord::new().with_source(..)`): cheap chained setters, one fallible `build`.
pub struct EngineBuilder {
    graph: GraphBuilder,
    extension: Box<dyn ResourceExtension>,
    direction: SearchDirection,
    elementary: bool,
    max_labels: Option<usize>,
    time_limit: Option<Duration>,
}

impl EngineBuilder {
    pub fn new(num_vertices: usize, resource_dims: usize) -> Self {
        Self {
            graph: GraphBuilder::new(num_vertices, resource_dims),
            extension: Box::new(AdditiveResourceExtension),
            direction: SearchDirection::Bidirectional,
            elementary: false,
            max_labels: None,
            time_limit: None,
        }
    }

    pub fn add_node(&mut self, id: VertexId) -> Result<(), EngineError> {
        self.graph.add_node(id)
    }

    pub fn add_edge(
        &mut self,
        tail: VertexId,
        head: VertexId,
        cost: f64,
        resources: ResourceVector,
    ) -> Result<EdgeId, EngineError> {
        self.graph.add_edge(tail, head, cost, resources)
    }

    /// Installs a custom Resource Extension Function implementation, replacing the default
    /// additive one.
    #[must_use]
    pub fn resource_extension(mut self, extension: impl ResourceExtension + 'static) -> Self {
        self.extension = Box::new(extension);
        self
    }

    #[must_use]
    pub fn direction(mut self, direction: SearchDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Enables elementarity: every label carries a visited-vertex set and refuses to revisit a
    /// vertex already on its partial path. Strictly more expensive than the default relaxed
    /// (non-elementary) search.
    #[must_use]
    pub fn elementary(mut self, enabled: bool) -> Self {
        self.elementary = enabled;
        self
    }

    /// Aborts the search with [`EngineError::Aborted`] once this many labels have been created,
    /// across both directions. A safety valve against pathological inputs; `None` (the default)
    /// means unbounded.
    #[must_use]
    pub fn max_labels(mut self, limit: usize) -> Self {
        self.max_labels = Some(limit);
        self
    }

    #[must_use]
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Validates the topology and resource bounds and produces a runnable [`Engine`].
    pub fn build(
        self,
        source: VertexId,
        sink: VertexId,
        min_res: ResourceVector,
        max_res: ResourceVector,
    ) -> Result<Engine, EngineError> {
        if min_res.dims() != max_res.dims() {
            return Err(Report::new(EngineError::InvalidTopology)
                .attach_printable("min_res and max_res have different dimensions"));
        }
        if !min_res.le(&max_res) {
            return Err(Report::new(EngineError::InvalidTopology)
                .attach_printable("min_res must be componentwise <= max_res"));
        }
        let graph = self.graph.build(source, sink)?;
        if min_res.dims() != graph.resource_dims() {
            return Err(Report::new(EngineError::InvalidTopology).attach_printable(
                crate::error::length_mismatch(graph.resource_dims(), min_res.dims()),
            ));
        }

        Ok(Engine {
            graph,
            min_res,
            max_res,
            extension: self.extension,
            direction: self.direction,
            elementary: self.elementary,
            max_labels: self.max_labels,
            time_limit: self.time_limit,
        })
    }
}

/// A validated graph and search configuration, ready to run. Immutable once built; `solve` can
/// be called repeatedly (each call re-runs preprocessing and search from scratch).
pub struct Engine {
    graph: Graph,
    min_res: ResourceVector,
    max_res: ResourceVector,
    extension: Box<dyn ResourceExtension>,
    direction: SearchDirection,
    elementary: bool,
    max_labels: Option<usize>,
    time_limit: Option<Duration>,
}

impl Engine {
    pub fn preprocess(&self) -> Result<Preprocessed, EngineError> {
        preprocess::preprocess(&self.graph)
    }

    /// Runs preprocessing and the bidirectional search, returning the cheapest feasible
    /// source-to-sink path.
    pub fn solve(&self) -> Result<Path, EngineError> {
        let pre = self.preprocess()?;
        let deadline = self.time_limit.map(|limit| Instant::now() + limit);
        let config = SearchConfig {
            direction: self.direction,
            elementary: self.elementary,
            max_labels: self.max_labels,
            deadline,
            min_res: &self.min_res,
            max_res: &self.max_res,
        };
        let outcome = search::run(&self.graph, &pre, self.extension.as_ref(), &config)?;
        let candidate = join::best_candidate(
            &self.graph,
            &outcome,
            self.extension.as_ref(),
            &self.min_res,
            &self.max_res,
        )
        .ok_or_else(|| Report::new(EngineError::NoFeasiblePath))?;

        Ok(result::build_path(
            &self.graph,
            &outcome.forward_arena,
            &outcome.backward_arena,
            candidate,
        ))
    }
}
