use crate::graph::OpenDigraph;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Presentation switches for the DOT writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotOptions {
    /// Prefix each label with the node id (`"<id>: <label>"`). Presentation
    /// only: reading such a file back keeps the prefixed text as the label.
    pub verbose: bool,
}

impl DotOptions {
    pub fn verbose() -> Self { Self { verbose: true } }
}

impl OpenDigraph {
    /// Renders the graph as a `digraph G { ... }` description. Nodes and edges
    /// follow insertion order; an edge of multiplicity `k` is written `k` times.
    pub fn to_dot_string(&self, options: DotOptions) -> String {
        let mut out = String::from("digraph G {\n");
        for node in self.nodes() {
            let label = if options.verbose {
                format!("{}: {}", node.id(), node.label())
            } else {
                node.label().to_string()
            };
            let _ = writeln!(out, "    {} [label=\"{}\"];", node.id(), escape_label(&label));
        }
        for node in self.nodes() {
            for (child, &multiplicity) in node.children() {
                for _ in 0..multiplicity {
                    let _ = writeln!(out, "    {} -> {};", node.id(), child);
                }
            }
        }
        out.push_str("}\n");
        out
    }
}

/// Keeps every label on its own line: the reader is line oriented.
fn escape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
