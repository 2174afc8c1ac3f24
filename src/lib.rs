// Library facade: declares the modules and re-exports the types most
// callers need, so `use open_digraph::*` is enough for typical use.

pub mod config;
pub mod display;
pub mod dot;
pub mod graph;
pub mod matrix;

pub use config::RandomGraphSpec;
pub use dot::DotOptions;
pub use graph::{EdgeMap, GraphError, Multiplicity, Node, NodeId, OpenDigraph, Relation, Result};
pub use matrix::{graph_from_adjacency_matrix, GraphForm, Matrix, MatrixShape};
