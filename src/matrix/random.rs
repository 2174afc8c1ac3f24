//! Random adjacency matrices and the random graph constructor built on them.
//!
//! Every generator takes the RNG explicitly so callers (and tests) control
//! seeding. Nothing here touches global random state.

use super::convert::graph_from_adjacency_matrix;
use super::Matrix;
use crate::graph::{GraphError, Multiplicity, OpenDigraph, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Shape constraints for `random_int_matrix`.
///
/// When several flags are set, `symmetric` wins over `oriented`, which wins over `dag`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixShape {
    pub null_diag: bool,
    pub symmetric: bool,
    pub oriented: bool,
    pub dag: bool,
}

/// `n` values drawn uniformly from `0..=bound`.
pub fn random_int_list<R: Rng + ?Sized>(rng: &mut R, n: usize, bound: Multiplicity) -> Vec<Multiplicity> {
    (0..n).map(|_| rng.gen_range(0..=bound)).collect()
}

/// An `n x n` matrix of values in `0..=bound` with the requested shape.
pub fn random_int_matrix<R: Rng + ?Sized>(rng: &mut R, n: usize, bound: Multiplicity, shape: MatrixShape) -> Matrix {
    if shape.symmetric {
        return random_symmetric_int_matrix(rng, n, bound, shape.null_diag);
    }
    if shape.oriented {
        return random_oriented_int_matrix(rng, n, bound, shape.null_diag);
    }
    if shape.dag {
        return random_dag_int_matrix(rng, n, bound, shape.null_diag);
    }
    let m: Matrix = (0..n).map(|_| random_int_list(rng, n, bound)).collect();
    if shape.null_diag {
        random_null_diag_int_matrix(m)
    } else {
        m
    }
}

/// Zeroes the diagonal of `m`.
pub fn random_null_diag_int_matrix(mut m: Matrix) -> Matrix {
    for (i, row) in m.iter_mut().enumerate() {
        if let Some(cell) = row.get_mut(i) {
            *cell = 0;
        }
    }
    m
}

/// A matrix with `m[i][j] == m[j][i]`, i.e. an undirected multigraph.
pub fn random_symmetric_int_matrix<R: Rng + ?Sized>(rng: &mut R, n: usize, bound: Multiplicity, null_diag: bool) -> Matrix {
    let mut m = random_int_matrix(rng, n, bound, MatrixShape { null_diag, ..Default::default() });
    for i in 0..n {
        for j in 0..i {
            m[i][j] = m[j][i];
        }
    }
    m
}

/// A matrix where at most one of `m[i][j]` and `m[j][i]` is nonzero for `i != j`:
/// an upper entry that is set wins and clears its mirror.
pub fn random_oriented_int_matrix<R: Rng + ?Sized>(rng: &mut R, n: usize, bound: Multiplicity, null_diag: bool) -> Matrix {
    let mut m = random_int_matrix(rng, n, bound, MatrixShape { null_diag, ..Default::default() });
    for i in 0..n {
        for j in (i + 1)..n {
            if m[i][j] != 0 {
                m[j][i] = 0;
            }
        }
    }
    m
}

/// A matrix that is zero below the diagonal, so every edge goes from a lower
/// to a higher (or, without `null_diag`, the same) index.
pub fn random_dag_int_matrix<R: Rng + ?Sized>(rng: &mut R, n: usize, bound: Multiplicity, null_diag: bool) -> Matrix {
    let m: Matrix = (0..n)
        .map(|i| (0..n).map(|j| if j >= i { rng.gen_range(0..=bound) } else { 0 }).collect::<Vec<_>>())
        .collect();
    if null_diag {
        random_null_diag_int_matrix(m)
    } else {
        m
    }
}

/// Renders one row per line, framed like a nested list literal.
pub fn format_matrix(m: &Matrix) -> String {
    let rows: Vec<String> = m
        .iter()
        .map(|row| format!("[{}]", row.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")))
        .collect();
    format!("[{}]", rows.join(",\n "))
}

/// The family of random graphs `OpenDigraph::random` can build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphForm {
    #[default]
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "DAG")]
    Dag,
    /// Currently generated exactly like `Free`; see `random_oriented_int_matrix`
    /// for a matrix that is actually oriented.
    #[serde(rename = "oriented")]
    Oriented,
    #[serde(rename = "loop-free")]
    LoopFree,
    #[serde(rename = "undirected")]
    Undirected,
    #[serde(rename = "loop-free-undirected", alias = "loop-free undirected")]
    LoopFreeUndirected,
}

impl GraphForm {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphForm::Free => "free",
            GraphForm::Dag => "DAG",
            GraphForm::Oriented => "oriented",
            GraphForm::LoopFree => "loop-free",
            GraphForm::Undirected => "undirected",
            GraphForm::LoopFreeUndirected => "loop-free-undirected",
        }
    }

    /// The matrix shape used to generate graphs of this form.
    pub fn shape(&self) -> MatrixShape {
        match self {
            GraphForm::Free | GraphForm::Oriented => MatrixShape::default(),
            GraphForm::Dag => MatrixShape { dag: true, null_diag: true, ..Default::default() },
            GraphForm::LoopFree => MatrixShape { null_diag: true, ..Default::default() },
            GraphForm::Undirected => MatrixShape { symmetric: true, ..Default::default() },
            GraphForm::LoopFreeUndirected => MatrixShape { symmetric: true, null_diag: true, ..Default::default() },
        }
    }
}

impl fmt::Display for GraphForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphForm {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "free" => Ok(GraphForm::Free),
            "DAG" => Ok(GraphForm::Dag),
            "oriented" => Ok(GraphForm::Oriented),
            "loop-free" => Ok(GraphForm::LoopFree),
            "undirected" => Ok(GraphForm::Undirected),
            "loop-free-undirected" | "loop-free undirected" => Ok(GraphForm::LoopFreeUndirected),
            other => Err(GraphError::Configuration(format!("unknown form '{}'", other))),
        }
    }
}

impl OpenDigraph {
    /// Builds a random graph of `n` nodes whose edge multiplicities are drawn
    /// from `0..=bound` under the constraints of `form`.
    ///
    /// Each of the `inputs`/`outputs` is then attached, through
    /// `add_input_node`/`add_output_node`, to one of the `n` matrix nodes picked
    /// uniformly at random.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        n: usize,
        bound: Multiplicity,
        inputs: usize,
        outputs: usize,
        form: GraphForm,
    ) -> Result<Self> {
        let m = random_int_matrix(rng, n, bound, form.shape());
        let mut graph = graph_from_adjacency_matrix(&m);

        let anchors = graph.node_ids();
        if anchors.is_empty() && inputs + outputs > 0 {
            return Err(GraphError::Configuration(
                "cannot attach inputs or outputs to a graph without nodes".to_string(),
            ));
        }
        for _ in 0..inputs {
            if let Some(&child) = anchors.choose(rng) {
                graph.add_input_node(child)?;
            }
        }
        for _ in 0..outputs {
            if let Some(&parent) = anchors.choose(rng) {
                graph.add_output_node(parent)?;
            }
        }

        info!(nodes = n, bound, inputs, outputs, form = %form, "generated random graph");
        Ok(graph)
    }
}
