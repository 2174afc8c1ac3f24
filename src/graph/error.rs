//! Defines the error types for the graph module.
use super::types::{NodeId, Relation};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

// Variants are matched on by callers, so prefer adding a variant over
// encoding a new failure in a message string.

/// Every failure the graph, its generators, and its codecs can report.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A node does not carry the requested parent/child relation.
    #[error("{other} is not a {relation} of node {node}")]
    RelationNotFound {
        node: NodeId,
        other: NodeId,
        relation: Relation,
    },
    /// A referenced node id does not exist in the graph.
    #[error("node {id} does not exist in the graph")]
    NodeNotFound { id: NodeId },
    /// One of the endpoints of an edge operation does not exist in the graph.
    #[error("{src} or {tgt} not in the graph")]
    EdgeEndpointMissing { src: NodeId, tgt: NodeId },
    /// The graph violates one of the well-formedness invariants.
    #[error("the graph is not well formed: {reason}")]
    NotWellFormed { reason: String },
    /// A generator or configuration value was rejected.
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid viewer URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
