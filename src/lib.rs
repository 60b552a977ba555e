//! A bidirectional labeling engine for the Resource-Constrained Shortest Path Problem (RCSPP):
//! directed graphs with possibly-negative edge costs and vector-valued resource consumption
//! bounded componentwise along every path.
//!
//! The search follows Righini & Salani's join procedure and Tilk et al.'s dynamic halfway
//! point: labels are extended from both the source and the sink and meet in the middle on the
//! critical (strictly monotone) resource, rather than exploring the full graph from one side.
//!
//! ```
//! use rcspp::{EngineBuilder, ResourceVector};
//!
//! let mut builder = EngineBuilder::new(2, 1);
//! builder.add_edge(0, 1, 5.0, ResourceVector::new(vec![1.0])).unwrap();
//! let engine = builder
//!     .build(
//!         0,
//!         1,
//!         ResourceVector::new(vec![0.0]),
//!         ResourceVector::new(vec![10.0]),
//!     )
//!     .unwrap();
//! let path = engine.solve().unwrap();
//! assert_eq!(path.cost(), 5.0);
//! ```

mod dominance;
mod engine;
mod error;
mod graph;
mod join;
mod label;
mod measure;
mod preprocess;
mod refs;
mod resources;
mod result;
mod search;

pub use engine::{Engine, EngineBuilder};
pub use error::EngineError;
pub use graph::{EdgeId, VertexId};
pub use label::Direction;
pub use preprocess::Preprocessed;
pub use refs::{AdditiveResourceExtension, ResourceExtension};
pub use resources::ResourceVector;
pub use result::Path;
pub use search::SearchDirection;
