//! The DOT graph-description format used to exchange graphs with Graphviz
//! style viewers.
//!
//! Only the subset this crate writes is understood on the way back in:
//! `<id> [label="<text>"];` node lines and `<src> -> <tgt>;` edge lines, one
//! per unit of multiplicity. Inputs and outputs are not part of the text.
pub mod parser;
pub mod writer;

pub use writer::DotOptions;

use crate::graph::{OpenDigraph, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

impl OpenDigraph {
    /// Writes the graph description to `path`, replacing any existing file.
    pub fn save_as_dot_file(&self, path: impl AsRef<Path>, options: DotOptions) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_dot_string(options))?;
        debug!(path = %path.display(), nodes = self.node_count(), "saved dot file");
        Ok(())
    }

    /// Reads a graph back from a file written by `save_as_dot_file`.
    /// Only I/O can fail; unrecognised lines are skipped.
    pub fn from_dot_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let graph = Self::from_dot_str(&fs::read_to_string(path)?);
        debug!(path = %path.display(), nodes = graph.node_count(), "loaded dot file");
        Ok(graph)
    }
}
