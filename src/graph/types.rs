use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a node inside its owning `OpenDigraph`.
///
/// Ids are allocated by `OpenDigraph::new_id` as the smallest free integer,
/// so an id freed by a removal can be handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 }
    pub fn new(idx: usize) -> Self { Self(idx) }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(idx: usize) -> Self { Self(idx) }
}

/// Number of parallel edges between two nodes in one direction. Never stored as 0.
pub type Multiplicity = u32;

/// Maps a neighbour id to the multiplicity of the edge shared with it.
pub type EdgeMap = BTreeMap<NodeId, Multiplicity>;

/// Which side of a node a relation lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    Parent,
    Child,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Parent => f.write_str("parent"),
            Relation::Child => f.write_str("child"),
        }
    }
}
