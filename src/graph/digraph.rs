//! digraph.rs
//! The `OpenDigraph` aggregate: owns every `Node`, the ordered input/output
//! id lists, and all structural mutation.
//!
//! Every edge mutation goes through this type so both endpoint maps change
//! together. `is_well_formed` audits the result on demand.

use super::error::{GraphError, Result};
use super::node::Node;
use super::types::{EdgeMap, Multiplicity, NodeId, Relation};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, warn};

/// Decoding rebuilds the graph through `OpenDigraph::new`, so the stored
/// insertion order always lists every node exactly once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "GraphRecord")]
pub struct OpenDigraph {
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
    nodes: HashMap<NodeId, Node>,
    /// Insertion order of `nodes`. Drives iteration and the dense matrix index.
    order: Vec<NodeId>,
}

#[derive(Deserialize)]
struct GraphRecord {
    #[serde(default)]
    inputs: Vec<NodeId>,
    #[serde(default)]
    outputs: Vec<NodeId>,
    #[serde(default)]
    nodes: HashMap<NodeId, Node>,
    #[serde(default)]
    order: Vec<NodeId>,
}

impl From<GraphRecord> for OpenDigraph {
    /// Recorded order first, then any unlisted node by ascending id.
    fn from(record: GraphRecord) -> Self {
        let GraphRecord { inputs, outputs, mut nodes, order } = record;
        let mut sequence: Vec<Node> = order.iter().filter_map(|id| nodes.remove(id)).collect();
        let mut unlisted: Vec<Node> = nodes.into_values().collect();
        unlisted.sort_by_key(Node::id);
        sequence.extend(unlisted);
        OpenDigraph::new(inputs, outputs, sequence)
    }
}

impl OpenDigraph {
    /// Assembles a graph from prebuilt nodes. Nodes are keyed by their own id;
    /// a later node with an already used id replaces the earlier one.
    ///
    /// No consistency is enforced here, use `is_well_formed` to audit the result.
    pub fn new(inputs: Vec<NodeId>, outputs: Vec<NodeId>, nodes: Vec<Node>) -> Self {
        let mut graph = Self::empty();
        graph.set_inputs(inputs);
        graph.set_outputs(outputs);
        for node in nodes {
            graph.insert_node(node);
        }
        graph
    }

    pub fn empty() -> Self { Self::default() }

    /// Independent deep copy. Mutating the copy never affects `self`.
    pub fn copy(&self) -> Self { self.clone() }

    // --- Accessors ---
    pub fn input_ids(&self) -> &[NodeId] { &self.inputs }
    pub fn output_ids(&self) -> &[NodeId] { &self.outputs }
    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn contains(&self, id: NodeId) -> bool { self.nodes.contains_key(&id) }

    /// Copy of the id -> node map.
    pub fn id_node_map(&self) -> HashMap<NodeId, Node> { self.nodes.clone() }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> Vec<NodeId> { self.order.clone() }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.order.iter().filter_map(move |id| self.nodes.get(id))
    }

    /// The live node behind `id`.
    pub fn node(&self, id: NodeId) -> Option<&Node> { self.nodes.get(&id) }

    /// Mutable access to a live node. Editing its maps directly bypasses the
    /// two-sided bookkeeping, so this is meant for test construction and repairs.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> { self.nodes.get_mut(&id) }

    /// The nodes behind `ids`, silently skipping unknown ids.
    pub fn nodes_by_ids(&self, ids: &[NodeId]) -> Vec<&Node> {
        ids.iter().filter_map(|id| self.nodes.get(id)).collect()
    }

    // --- Inputs / outputs ---

    /// Replaces the inputs, dropping repeated ids while keeping first occurrences.
    pub fn set_inputs(&mut self, inputs: Vec<NodeId>) {
        self.inputs.clear();
        inputs.into_iter().for_each(|id| self.add_input_id(id));
    }

    /// Replaces the outputs, dropping repeated ids while keeping first occurrences.
    pub fn set_outputs(&mut self, outputs: Vec<NodeId>) {
        self.outputs.clear();
        outputs.into_iter().for_each(|id| self.add_output_id(id));
    }

    /// Appends `id` to the inputs unless it is already one.
    pub fn add_input_id(&mut self, id: NodeId) {
        if !self.inputs.contains(&id) {
            self.inputs.push(id);
        }
    }

    /// Appends `id` to the outputs unless it is already one.
    pub fn add_output_id(&mut self, id: NodeId) {
        if !self.outputs.contains(&id) {
            self.outputs.push(id);
        }
    }

    // --- Identity ---

    /// Smallest non-negative integer not currently used as a node id.
    ///
    /// This is a linear scan, not a counter: the id of a removed node is
    /// handed out again.
    pub fn new_id(&self) -> NodeId {
        let mut candidate = 0;
        while self.nodes.contains_key(&NodeId(candidate)) {
            candidate += 1;
        }
        NodeId(candidate)
    }

    fn insert_node(&mut self, node: Node) {
        let id = node.id();
        if self.nodes.insert(id, node).is_none() {
            self.order.push(id);
        }
    }

    fn node_entry(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound { id })
    }

    // --- Mutation ---

    /// Inserts a fresh node and returns its id.
    ///
    /// The new node keeps copies of `parents` and `children`. For every entry,
    /// the referenced node gets the reciprocal multiplicity set to the given
    /// value (overwritten, not added).
    ///
    /// Lenient: ids that are not in the graph are kept on the new node's side
    /// but otherwise skipped with a warning. Run `is_well_formed` afterwards if
    /// the inputs are untrusted.
    pub fn add_node(&mut self, label: &str, parents: &EdgeMap, children: &EdgeMap) -> NodeId {
        let id = self.new_id();
        self.insert_node(Node::new(id, label, parents.clone(), children.clone()));
        debug!(node = %id, label, "added node");

        for (&parent, &m) in parents {
            match self.nodes.get_mut(&parent) {
                Some(node) => node.set_child_multiplicity(id, m),
                None => warn!(node = %id, parent = %parent, "skipping reciprocal link to unknown parent"),
            }
        }
        for (&child, &m) in children {
            match self.nodes.get_mut(&child) {
                Some(node) => node.set_parent_multiplicity(id, m),
                None => warn!(node = %id, child = %child, "skipping reciprocal link to unknown child"),
            }
        }
        id
    }

    /// Adds one unit of multiplicity to `src -> tgt` on both endpoints.
    ///
    /// Lenient: when either endpoint is missing, or either side already holds
    /// `Multiplicity::MAX`, nothing happens and `false` is returned.
    pub fn add_edge(&mut self, src: NodeId, tgt: NodeId) -> bool {
        let (Some(src_node), Some(tgt_node)) = (self.nodes.get(&src), self.nodes.get(&tgt)) else {
            warn!(src = %src, tgt = %tgt, "skipping edge with a missing endpoint");
            return false;
        };
        if src_node.child_multiplicity(tgt) == Multiplicity::MAX
            || tgt_node.parent_multiplicity(src) == Multiplicity::MAX
        {
            warn!(src = %src, tgt = %tgt, "skipping edge already at maximum multiplicity");
            return false;
        }
        if let Some(node) = self.nodes.get_mut(&src) {
            node.add_child_id(tgt);
        }
        if let Some(node) = self.nodes.get_mut(&tgt) {
            node.add_parent_id(src);
        }
        true
    }

    /// Applies `add_edge` to each pair in order and returns how many were applied.
    /// Invalid pairs are skipped, the rest still land.
    pub fn add_edges(&mut self, edges: &[(NodeId, NodeId)]) -> usize {
        edges.iter().filter(|&&(src, tgt)| self.add_edge(src, tgt)).count()
    }

    /// Removes one unit of multiplicity from `src -> tgt` on both endpoints.
    ///
    /// Fails with `EdgeEndpointMissing` when a node is absent and with
    /// `RelationNotFound` when the edge is absent; the graph is untouched on error.
    pub fn remove_edge(&mut self, src: NodeId, tgt: NodeId) -> Result<()> {
        self.ensure_edge(src, tgt)?;
        self.node_entry(src)?.remove_child_once(tgt)?;
        self.node_entry(tgt)?.remove_parent_once(src)
    }

    /// Removes every parallel `src -> tgt` edge at once, whatever the multiplicity.
    pub fn remove_parallel_edges(&mut self, src: NodeId, tgt: NodeId) -> Result<()> {
        self.ensure_edge(src, tgt)?;
        self.node_entry(src)?.remove_child_id(tgt)?;
        self.node_entry(tgt)?.remove_parent_id(src)
    }

    /// Both endpoints exist and both record the relation.
    fn ensure_edge(&self, src: NodeId, tgt: NodeId) -> Result<()> {
        let (Some(src_node), Some(tgt_node)) = (self.nodes.get(&src), self.nodes.get(&tgt)) else {
            return Err(GraphError::EdgeEndpointMissing { src, tgt });
        };
        if src_node.child_multiplicity(tgt) == 0 {
            return Err(GraphError::RelationNotFound { node: src, other: tgt, relation: Relation::Child });
        }
        if tgt_node.parent_multiplicity(src) == 0 {
            return Err(GraphError::RelationNotFound { node: tgt, other: src, relation: Relation::Parent });
        }
        Ok(())
    }

    /// Severs every edge touching `id`, drops it from the inputs/outputs and
    /// deletes it. No remaining node references `id` afterwards.
    pub fn remove_node_by_id(&mut self, id: NodeId) -> Result<()> {
        let node = self.nodes.remove(&id).ok_or(GraphError::NodeNotFound { id })?;
        for parent in node.parents().keys() {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.set_child_multiplicity(id, 0);
            }
        }
        for child in node.children().keys() {
            if let Some(c) = self.nodes.get_mut(child) {
                c.set_parent_multiplicity(id, 0);
            }
        }
        self.order.retain(|&n| n != id);
        self.inputs.retain(|&n| n != id);
        self.outputs.retain(|&n| n != id);
        debug!(node = %id, "removed node");
        Ok(())
    }

    /// Sequential `remove_edge`. Stops at the first failure; earlier pairs stay removed.
    pub fn remove_edges(&mut self, edges: &[(NodeId, NodeId)]) -> Result<()> {
        edges.iter().try_for_each(|&(src, tgt)| self.remove_edge(src, tgt))
    }

    /// Sequential `remove_parallel_edges`. Stops at the first failure.
    pub fn remove_several_parallel_edges(&mut self, edges: &[(NodeId, NodeId)]) -> Result<()> {
        edges.iter().try_for_each(|&(src, tgt)| self.remove_parallel_edges(src, tgt))
    }

    /// Sequential `remove_node_by_id`. Stops at the first failure.
    pub fn remove_nodes_by_id(&mut self, ids: &[NodeId]) -> Result<()> {
        ids.iter().try_for_each(|&id| self.remove_node_by_id(id))
    }

    /// Creates a fresh input node feeding `child` with a single edge and
    /// registers it as an input.
    pub fn add_input_node(&mut self, child: NodeId) -> Result<NodeId> {
        if !self.contains(child) {
            return Err(GraphError::NodeNotFound { id: child });
        }
        let id = self.add_node("", &EdgeMap::new(), &EdgeMap::from([(child, 1)]));
        self.inputs.push(id);
        debug!(node = %id, child = %child, "added input node");
        Ok(id)
    }

    /// Creates a fresh output node fed by `parent` with a single edge and
    /// registers it as an output.
    pub fn add_output_node(&mut self, parent: NodeId) -> Result<NodeId> {
        if !self.contains(parent) {
            return Err(GraphError::NodeNotFound { id: parent });
        }
        let id = self.add_node("", &EdgeMap::from([(parent, 1)]), &EdgeMap::new());
        self.outputs.push(id);
        debug!(node = %id, parent = %parent, "added output node");
        Ok(id)
    }

    // --- Validation ---

    pub fn is_well_formed(&self) -> bool { self.check_well_formed().is_ok() }

    /// Fails with `NotWellFormed` when `is_well_formed` is false.
    pub fn assert_is_well_formed(&self) -> Result<()> { self.check_well_formed() }

    /// Audits the invariants in order and reports the first violation:
    /// 1. outputs exist, have exactly one parent with multiplicity 1 and no children;
    /// 2. inputs exist, have exactly one child with multiplicity 1 and no parents;
    /// 3. every node is stored under its own id and listed once in the insertion order;
    /// 4. no map entry has multiplicity 0, and child and parent maps agree on
    ///    every edge multiplicity.
    pub fn check_well_formed(&self) -> Result<()> {
        let violation = |reason: String| Err(GraphError::NotWellFormed { reason });

        for &id in &self.outputs {
            let Some(node) = self.nodes.get(&id) else {
                return violation(format!("output {} is not in the graph", id));
            };
            if !is_single_unit(node.parents()) {
                return violation(format!("output {} must have exactly one parent of multiplicity 1", id));
            }
            if !node.children().is_empty() {
                return violation(format!("output {} has children", id));
            }
        }

        for &id in &self.inputs {
            let Some(node) = self.nodes.get(&id) else {
                return violation(format!("input {} is not in the graph", id));
            };
            if !is_single_unit(node.children()) {
                return violation(format!("input {} must have exactly one child of multiplicity 1", id));
            }
            if !node.parents().is_empty() {
                return violation(format!("input {} has parents", id));
            }
        }

        let listed: HashSet<NodeId> = self.order.iter().copied().collect();
        if listed.len() != self.order.len()
            || self.order.len() != self.nodes.len()
            || !self.nodes.keys().all(|id| listed.contains(id))
        {
            return violation("insertion order does not list every node exactly once".to_string());
        }

        for (&id, node) in &self.nodes {
            if node.id() != id {
                return violation(format!("node stored under {} carries id {}", id, node.id()));
            }
            for (&child, &m) in node.children() {
                if m == 0 {
                    return violation(format!("edge {} -> {} is stored with multiplicity 0", id, child));
                }
                if self.reciprocal(child, |c| c.parent_multiplicity(id)) != Some(m) {
                    return violation(format!("edge {} -> {} is not mirrored with multiplicity {}", id, child, m));
                }
            }
            for (&parent, &m) in node.parents() {
                if m == 0 {
                    return violation(format!("edge {} -> {} is stored with multiplicity 0", parent, id));
                }
                if self.reciprocal(parent, |p| p.child_multiplicity(id)) != Some(m) {
                    return violation(format!("edge {} -> {} is not mirrored with multiplicity {}", parent, id, m));
                }
            }
        }
        Ok(())
    }

    fn reciprocal(&self, other: NodeId, read: impl Fn(&Node) -> Multiplicity) -> Option<Multiplicity> {
        self.nodes.get(&other).map(read)
    }
}

fn is_single_unit(map: &EdgeMap) -> bool {
    map.len() == 1 && map.values().all(|&m| m == 1)
}

impl PartialEq for OpenDigraph {
    /// Structural equality: insertion order is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.inputs == other.inputs && self.outputs == other.outputs && self.nodes == other.nodes
    }
}

impl Eq for OpenDigraph {}

impl fmt::Display for OpenDigraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids = |ids: &[NodeId]| ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ");
        let nodes: Vec<String> = self.nodes().map(|n| n.to_string()).collect();
        write!(
            f,
            "Graph([{}], [{}], [{}])",
            ids(&self.inputs),
            ids(&self.outputs),
            nodes.join(", ")
        )
    }
}
