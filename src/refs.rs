//! Resource Extension Functions (REFs): the pluggable transforms applied when a label crosses
//! an edge, and when a forward/backward pair of labels is bridged.
//!
//! The default implementation is plain vector addition/subtraction, correct for any resource
//! that accumulates additively along a path (time, distance, load, count). Callers with
//! non-additive resources (e.g. a resource that resets on certain edges) implement their own
//! [`ResourceExtension`] and hand it to the engine.

use crate::graph::VertexId;
use crate::resources::ResourceVector;

/// Transforms applied when extending a label across an edge, and when bridging a forward and a
/// backward label at a shared edge.
///
/// # Invariants the engine assumes
///
/// - `extend_forward` and `extend_backward` must strictly increase/decrease (respectively) the
///   critical (index `0`) component relative to the input, since the search relies on this to
///   terminate and to compare labels against the halfway markers.
/// - All three methods must return a vector of the same dimension as their inputs.
///
/// The engine spot-checks these at runtime on the first few calls to each vertex and reports
/// [`crate::error::EngineError::BadCallback`] if they are violated; it does not exhaustively
/// verify monotonicity on every call, since that would defeat the point of a fast inner loop.
pub trait ResourceExtension {
    /// Extends `resources` forward across an edge whose own consumption is `edge_resources`.
    /// `cost` is the accumulated cost of the label being extended, *before* this edge's cost is
    /// added, for REFs whose resource behavior depends on cost-to-date (e.g. a resource that
    /// resets once a cost threshold is crossed).
    fn extend_forward(
        &self,
        resources: &ResourceVector,
        tail: VertexId,
        head: VertexId,
        edge_resources: &ResourceVector,
        cost: f64,
    ) -> ResourceVector {
        let _ = (tail, head, cost);
        resources.add(edge_resources)
    }

    /// Extends `resources` backward across an edge (walked tail-to-head in the underlying
    /// graph, but traversed head-to-tail by the backward search) whose own consumption is
    /// `edge_resources`. `cost` is the accumulated cost of the label being extended, before this
    /// edge's cost is added.
    fn extend_backward(
        &self,
        resources: &ResourceVector,
        tail: VertexId,
        head: VertexId,
        edge_resources: &ResourceVector,
        cost: f64,
    ) -> ResourceVector {
        let _ = (tail, head, cost);
        resources.sub(edge_resources)
    }

    /// Combines a forward label's resources at `tail` and a backward label's resources at
    /// `head`, bridged by the edge `tail -> head`, into the resources *consumed* by the full
    /// source-to-sink path.
    ///
    /// The default formula recovers the plain per-path total: the forward label's resources
    /// are offset from `min_res`, the backward label's are offset from `max_res`, and the edge
    /// itself is counted once.
    fn join(
        &self,
        forward: &ResourceVector,
        backward: &ResourceVector,
        tail: VertexId,
        head: VertexId,
        edge_resources: &ResourceVector,
        min_res: &ResourceVector,
        max_res: &ResourceVector,
    ) -> ResourceVector {
        let _ = (tail, head);
        forward
            .sub(min_res)
            .add(edge_resources)
            .add(&max_res.sub(backward))
    }
}

/// The default additive REF, used whenever the caller does not supply a custom one.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdditiveResourceExtension;

impl ResourceExtension for AdditiveResourceExtension {}
