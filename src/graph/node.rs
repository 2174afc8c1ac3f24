//! Defines the `Node` record: an id, a display label and the two multiplicity
//! maps linking it to its neighbours.
//!
//! A node only ever edits its own maps. Keeping both endpoints of an edge in
//! sync is the job of the owning `OpenDigraph`.

use super::error::{GraphError, Result};
use super::types::{EdgeMap, Multiplicity, NodeId, Relation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A vertex of an open digraph.
///
/// Neighbours are referenced by id only and resolved through the owning graph.
/// Equality is structural: id, label and both maps must match.
///
/// Decoding goes through `Node::new`, so zero multiplicities never survive
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NodeRecord")]
pub struct Node {
    id: NodeId,
    label: String,
    /// Parent id -> multiplicity of the edge `parent -> self`.
    parents: EdgeMap,
    /// Child id -> multiplicity of the edge `self -> child`.
    children: EdgeMap,
}

#[derive(Deserialize)]
struct NodeRecord {
    id: NodeId,
    #[serde(default)]
    label: String,
    #[serde(default)]
    parents: EdgeMap,
    #[serde(default)]
    children: EdgeMap,
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        Node::new(record.id, record.label, record.parents, record.children)
    }
}

impl Node {
    /// Builds a detached node. Entries with multiplicity 0 are dropped so the
    /// "absent means 0" rule holds from the start.
    pub fn new(id: NodeId, label: impl Into<String>, parents: EdgeMap, children: EdgeMap) -> Self {
        Self {
            id,
            label: label.into(),
            parents: strip_zeroes(parents),
            children: strip_zeroes(children),
        }
    }

    /// Independent deep copy. Equivalent to `clone`, kept for readability at call sites.
    pub fn copy(&self) -> Self { self.clone() }

    // --- Accessors ---
    pub fn id(&self) -> NodeId { self.id }
    pub fn label(&self) -> &str { &self.label }
    pub fn parents(&self) -> &EdgeMap { &self.parents }
    pub fn children(&self) -> &EdgeMap { &self.children }
    pub fn parent_map(&self) -> EdgeMap { self.parents.clone() }
    pub fn child_map(&self) -> EdgeMap { self.children.clone() }

    /// Multiplicity of `parent -> self`, 0 when absent.
    pub fn parent_multiplicity(&self, parent: NodeId) -> Multiplicity {
        self.parents.get(&parent).copied().unwrap_or(0)
    }

    /// Multiplicity of `self -> child`, 0 when absent.
    pub fn child_multiplicity(&self, child: NodeId) -> Multiplicity {
        self.children.get(&child).copied().unwrap_or(0)
    }

    // --- Setters ---
    pub fn set_id(&mut self, id: NodeId) { self.id = id; }
    pub fn set_label(&mut self, label: impl Into<String>) { self.label = label.into(); }
    pub fn set_parents(&mut self, parents: EdgeMap) { self.parents = strip_zeroes(parents); }
    pub fn set_children(&mut self, children: EdgeMap) { self.children = strip_zeroes(children); }

    /// Adds one unit of multiplicity to `parent -> self`. Returns `false`,
    /// leaving the entry as is, when it already holds `Multiplicity::MAX`.
    pub fn add_parent_id(&mut self, parent: NodeId) -> bool {
        increment(&mut self.parents, parent)
    }

    /// Adds one unit of multiplicity to `self -> child`. Returns `false`,
    /// leaving the entry as is, when it already holds `Multiplicity::MAX`.
    pub fn add_child_id(&mut self, child: NodeId) -> bool {
        increment(&mut self.children, child)
    }

    /// Overwrites the multiplicity of `parent -> self`. A value of 0 removes the entry.
    pub(crate) fn set_parent_multiplicity(&mut self, parent: NodeId, m: Multiplicity) {
        set_multiplicity(&mut self.parents, parent, m);
    }

    /// Overwrites the multiplicity of `self -> child`. A value of 0 removes the entry.
    pub(crate) fn set_child_multiplicity(&mut self, child: NodeId, m: Multiplicity) {
        set_multiplicity(&mut self.children, child, m);
    }

    /// Removes one unit of `parent -> self`, deleting the entry when it reaches 0.
    pub fn remove_parent_once(&mut self, parent: NodeId) -> Result<()> {
        decrement(&mut self.parents, parent).ok_or_else(|| self.missing(parent, Relation::Parent))
    }

    /// Removes one unit of `self -> child`, deleting the entry when it reaches 0.
    pub fn remove_child_once(&mut self, child: NodeId) -> Result<()> {
        decrement(&mut self.children, child).ok_or_else(|| self.missing(child, Relation::Child))
    }

    /// Deletes the `parent -> self` entry whatever its multiplicity.
    pub fn remove_parent_id(&mut self, parent: NodeId) -> Result<()> {
        match self.parents.remove(&parent) {
            Some(_) => Ok(()),
            None => Err(self.missing(parent, Relation::Parent)),
        }
    }

    /// Deletes the `self -> child` entry whatever its multiplicity.
    pub fn remove_child_id(&mut self, child: NodeId) -> Result<()> {
        match self.children.remove(&child) {
            Some(_) => Ok(()),
            None => Err(self.missing(child, Relation::Child)),
        }
    }

    fn missing(&self, other: NodeId, relation: Relation) -> GraphError {
        GraphError::RelationNotFound { node: self.id, other, relation }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node(ID: {}, Label: '{}', Parents: {}, Children: {})",
            self.id,
            self.label,
            format_edge_map(&self.parents),
            format_edge_map(&self.children)
        )
    }
}

/// Renders a map as `{1: 2, 3: 1}`.
pub(crate) fn format_edge_map(map: &EdgeMap) -> String {
    let entries: Vec<String> = map.iter().map(|(id, m)| format!("{}: {}", id, m)).collect();
    format!("{{{}}}", entries.join(", "))
}

fn strip_zeroes(mut map: EdgeMap) -> EdgeMap {
    map.retain(|_, m| *m > 0);
    map
}

fn increment(map: &mut EdgeMap, key: NodeId) -> bool {
    let m = map.entry(key).or_insert(0);
    match m.checked_add(1) {
        Some(next) => {
            *m = next;
            true
        }
        None => false,
    }
}

fn set_multiplicity(map: &mut EdgeMap, key: NodeId, m: Multiplicity) {
    if m == 0 {
        map.remove(&key);
    } else {
        map.insert(key, m);
    }
}

/// Returns `None` when `key` is absent.
fn decrement(map: &mut EdgeMap, key: NodeId) -> Option<()> {
    let m = map.get_mut(&key)?;
    if *m > 1 {
        *m -= 1;
    } else {
        map.remove(&key);
    }
    Some(())
}

#[cfg(test)]
impl Node {
    /// Builds a node exactly as given, zero multiplicities included.
    pub(crate) fn unchecked(id: NodeId, label: &str, parents: EdgeMap, children: EdgeMap) -> Self {
        Self { id, label: label.to_string(), parents, children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn edges(pairs: &[(usize, u32)]) -> EdgeMap {
        pairs.iter().map(|&(id, m)| (NodeId(id), m)).collect()
    }

    #[test]
    fn test_new_node_fields() {
        let n0 = Node::new(NodeId(0), "i", edges(&[]), edges(&[(1, 1)]));
        assert_eq!(n0.id(), NodeId(0));
        assert_eq!(n0.label(), "i");
        assert!(n0.parents().is_empty());
        assert_eq!(n0.children(), &edges(&[(1, 1)]));
    }

    #[test]
    fn test_new_drops_zero_multiplicities() {
        let n = Node::new(NodeId(0), "", edges(&[(1, 0)]), edges(&[(2, 0), (3, 1)]));
        assert!(n.parents().is_empty());
        assert_eq!(n.children(), &edges(&[(3, 1)]));
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Node::new(NodeId(0), "a", edges(&[(2, 1)]), edges(&[(1, 1)]));
        let mut copy = original.copy();
        assert_eq!(copy, original);

        copy.add_child_id(NodeId(1));
        copy.set_label("b");
        assert_eq!(original.child_multiplicity(NodeId(1)), 1);
        assert_eq!(original.label(), "a");
        assert_ne!(copy, original);
    }

    #[test]
    fn test_setters_and_increments() {
        let mut n = Node::new(NodeId(1), "test", EdgeMap::new(), EdgeMap::new());
        n.set_id(NodeId(2));
        n.set_label("new label");
        n.set_children(edges(&[(3, 1)]));
        n.add_parent_id(NodeId(4));
        n.add_child_id(NodeId(5));
        n.add_child_id(NodeId(5));

        assert_eq!(n.id(), NodeId(2));
        assert_eq!(n.label(), "new label");
        assert_eq!(n.children(), &edges(&[(3, 1), (5, 2)]));
        assert_eq!(n.parents(), &edges(&[(4, 1)]));
    }

    #[test]
    fn test_increment_stops_at_max_multiplicity() {
        let mut n = Node::new(NodeId(0), "", edges(&[(1, u32::MAX)]), edges(&[(2, u32::MAX - 1)]));
        assert!(!n.add_parent_id(NodeId(1)));
        assert_eq!(n.parent_multiplicity(NodeId(1)), u32::MAX);

        assert!(n.add_child_id(NodeId(2)));
        assert!(!n.add_child_id(NodeId(2)));
        assert_eq!(n.child_multiplicity(NodeId(2)), u32::MAX);
    }

    #[test]
    fn test_deserialize_drops_zero_multiplicities() {
        let json = r#"{"id":0,"label":"a","parents":{"3":0},"children":{"1":0,"2":4}}"#;
        let n: Node = serde_json::from_str(json).unwrap();
        assert!(n.parents().is_empty());
        assert_eq!(n.children(), &edges(&[(2, 4)]));
        assert_eq!(n, Node::new(NodeId(0), "a", EdgeMap::new(), edges(&[(2, 4)])));
    }

    #[rstest]
    #[case(3, Some(2))]
    #[case(1, None)]
    fn test_remove_child_once(#[case] start: u32, #[case] left: Option<u32>) {
        let mut n = Node::new(NodeId(0), "", EdgeMap::new(), edges(&[(1, start)]));
        n.remove_child_once(NodeId(1)).unwrap();
        assert_eq!(n.children().get(&NodeId(1)).copied(), left);
    }

    #[rstest]
    #[case(4, Some(3))]
    #[case(1, None)]
    fn test_remove_parent_once(#[case] start: u32, #[case] left: Option<u32>) {
        let mut n = Node::new(NodeId(1), "", edges(&[(0, start)]), EdgeMap::new());
        n.remove_parent_once(NodeId(0)).unwrap();
        assert_eq!(n.parents().get(&NodeId(0)).copied(), left);
    }

    #[test]
    fn test_remove_id_drops_whole_entry() {
        let mut n = Node::new(NodeId(0), "", edges(&[(2, 5)]), edges(&[(1, 3)]));
        n.remove_child_id(NodeId(1)).unwrap();
        n.remove_parent_id(NodeId(2)).unwrap();
        assert!(n.children().is_empty());
        assert!(n.parents().is_empty());
    }

    #[test]
    fn test_missing_relation_errors() {
        let mut n = Node::new(NodeId(0), "", EdgeMap::new(), EdgeMap::new());
        for result in [
            n.remove_child_once(NodeId(1)),
            n.remove_parent_once(NodeId(1)),
            n.remove_child_id(NodeId(1)),
            n.remove_parent_id(NodeId(1)),
        ] {
            assert!(matches!(result, Err(GraphError::RelationNotFound { .. })));
        }
    }

    #[test]
    fn test_display() {
        let n = Node::new(NodeId(0), "x", edges(&[]), edges(&[(1, 2)]));
        assert_eq!(n.to_string(), "Node(ID: 0, Label: 'x', Parents: {}, Children: {1: 2})");
    }
}
