//! Adjacency matrices: random generation and conversion to and from graphs.
pub mod convert;
pub mod random;

pub use convert::graph_from_adjacency_matrix;
pub use random::{
    format_matrix, random_dag_int_matrix, random_int_list, random_int_matrix, random_null_diag_int_matrix,
    random_oriented_int_matrix, random_symmetric_int_matrix, GraphForm, MatrixShape,
};

use crate::graph::Multiplicity;

/// Square matrix where cell `(i, j)` holds the multiplicity of the edge `i -> j`.
pub type Matrix = Vec<Vec<Multiplicity>>;
