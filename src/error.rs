//! Error kinds surfaced by the engine.
//!
//! Every fallible entry point returns `error_stack::Result<_, EngineError>` so that callers get a
//! `Report` with an attached context chain instead of a bare enum, matching how
//! `petgraph-algorithms` reports `BellmanFordError`/`DijkstraError`.

use std::fmt::{self, Display, Formatter};

use error_stack::Context;

use crate::graph::VertexId;

/// The kinds of failure the engine can report.
///
/// These correspond to the error surface of the construction and execution API: topology
/// problems are raised during `build()`, `NegativeCycle` during preprocessing, and
/// `NoFeasiblePath`/`Aborted`/`BadCallback` during `run()`.
#[derive(Debug)]
pub enum EngineError {
    /// The source has an incoming edge, the sink has an outgoing edge, or an edge references a
    /// resource vector of the wrong length.
    InvalidTopology,
    /// `source_id` or `sink_id` was never registered with `add_node`.
    MissingTerminal,
    /// The graph contains a cycle of strictly negative total cost.
    NegativeCycle {
        /// A vertex sequence that closes the offending cycle, for diagnostics.
        witness: Vec<VertexId>,
    },
    /// Preprocessing and search completed without finding an admissible source-sink path.
    NoFeasiblePath,
    /// The caller's deadline or stop flag fired before the search converged.
    Aborted,
    /// A user-supplied `ResourceExtension` callback returned a vector of the wrong length, or
    /// was observed violating critical-resource monotonicity at an expansion site.
    BadCallback {
        /// Human-readable detail of which invariant was violated.
        reason: String,
    },
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTopology => f.write_str("invalid graph topology"),
            Self::MissingTerminal => f.write_str("source or sink vertex was not registered"),
            Self::NegativeCycle { witness } => {
                write!(f, "negative-cost cycle detected through {witness:?}")
            }
            Self::NoFeasiblePath => f.write_str("no feasible source-to-sink path exists"),
            Self::Aborted => f.write_str("search aborted: time limit or stop flag reached"),
            Self::BadCallback { reason } => write!(f, "resource extension callback: {reason}"),
        }
    }
}

impl Context for EngineError {}

pub(crate) fn bad_callback(reason: impl Into<String>) -> EngineError {
    EngineError::BadCallback {
        reason: reason.into(),
    }
}

pub(crate) fn length_mismatch(expected: usize, got: usize) -> String {
    format!("expected a resource vector of length {expected}, got {got}")
}
