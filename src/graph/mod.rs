//! Defines the core data structures of an open directed multigraph.
pub mod digraph;
pub mod error;
pub mod node;
pub mod types;

// Re-export key types for convenient access
pub use digraph::OpenDigraph;
pub use error::{GraphError, Result};
pub use node::Node;
pub use types::{EdgeMap, Multiplicity, NodeId, Relation};
