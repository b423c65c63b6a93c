//! Transport graph construction and queries.
//!
//! Networks are described as lines (named routes over station names) and
//! turned into a [`TransportGraph`] through the staged [`GraphBuilder`], or
//! from a serialized [`NetworkDefinition`].

mod builder;
mod definition;
mod error;
mod transport_graph;

pub use builder::GraphBuilder;
pub use definition::{DefinitionError, NetworkDefinition};
pub use error::{DataKind, GraphError};
pub use transport_graph::TransportGraph;
