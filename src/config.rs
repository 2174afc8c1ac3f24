//! Declarative description of a random graph, loadable from JSON.

use crate::graph::{GraphError, Multiplicity, OpenDigraph, Result};
use crate::matrix::GraphForm;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Parameters of `OpenDigraph::random`.
///
/// ```json
/// { "nodes": 5, "bound": 3, "inputs": 1, "outputs": 2, "form": "DAG", "seed": 42 }
/// ```
///
/// `inputs`, `outputs`, `form` and `seed` may be omitted. Without a seed the
/// generator is seeded from system entropy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RandomGraphSpec {
    pub nodes: usize,
    pub bound: Multiplicity,
    #[serde(default)]
    pub inputs: usize,
    #[serde(default)]
    pub outputs: usize,
    #[serde(default)]
    pub form: GraphForm,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RandomGraphSpec {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| GraphError::Configuration(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GraphError::Configuration(e.to_string()))
    }

    pub fn build(&self) -> Result<OpenDigraph> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        OpenDigraph::random(&mut rng, self.nodes, self.bound, self.inputs, self.outputs, self.form)
    }
}
