//! Line-oriented reader for the DOT subset produced by the writer.
//!
//! Parsing never fails. Lines that match neither pattern are skipped, and
//! edges naming an undeclared node are dropped, so the result can be
//! incomplete but its parent and child maps always agree.

use crate::graph::{EdgeMap, NodeId, OpenDigraph};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::trace;

static NODE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(\S+?)\s*\[label="((?:[^"\\]|\\.)*)"\];"#).expect("node line pattern is valid")
});

static EDGE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\S+)\s*->\s*(\S+?);").expect("edge line pattern is valid"));

/// A node name as written in the file. Numeric names compare by value, so
/// `07` and `7` name the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Token {
    Numeric(usize),
    Opaque(String),
}

impl From<&str> for Token {
    fn from(raw: &str) -> Self {
        match raw.parse::<usize>() {
            Ok(n) => Token::Numeric(n),
            Err(_) => Token::Opaque(raw.to_string()),
        }
    }
}

impl OpenDigraph {
    /// Rebuilds a graph from DOT text.
    ///
    /// Each node line allocates a fresh id through `add_node` (a repeated
    /// declaration only relabels), and each edge line adds one unit of
    /// multiplicity through `add_edge`. A file written from a graph whose ids
    /// are `0..n` in insertion order comes back with the same ids.
    pub fn from_dot_str(text: &str) -> Self {
        let mut graph = OpenDigraph::empty();
        let mut declared: HashMap<Token, NodeId> = HashMap::new();
        let no_edges = EdgeMap::new();

        for (line_no, line) in text.lines().enumerate() {
            if let Some(caps) = NODE_LINE.captures(line) {
                let token = Token::from(&caps[1]);
                let label = unescape_label(&caps[2]);
                match declared.get(&token) {
                    Some(&id) => {
                        if let Some(node) = graph.node_mut(id) {
                            node.set_label(label);
                        }
                    }
                    None => {
                        let id = graph.add_node(&label, &no_edges, &no_edges);
                        declared.insert(token, id);
                    }
                }
                continue;
            }

            if let Some(caps) = EDGE_LINE.captures(line) {
                let src = declared.get(&Token::from(&caps[1])).copied();
                let tgt = declared.get(&Token::from(&caps[2])).copied();
                match (src, tgt) {
                    (Some(src), Some(tgt)) => {
                        graph.add_edge(src, tgt);
                    }
                    _ => trace!(line = line_no + 1, "skipping edge to an undeclared node"),
                }
                continue;
            }

            trace!(line = line_no + 1, content = line, "skipping unrecognised line");
        }
        graph
    }
}

fn unescape_label(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some(escaped) => out.push(escaped),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}
