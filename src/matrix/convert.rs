use super::Matrix;
use crate::graph::{EdgeMap, Multiplicity, NodeId, OpenDigraph};
use std::collections::HashMap;

impl OpenDigraph {
    /// Assigns each node a dense row/column index following insertion order.
    pub fn dense_index(&self) -> HashMap<NodeId, usize> {
        self.node_ids().into_iter().enumerate().map(|(i, id)| (id, i)).collect()
    }

    /// Square matrix where cell `(i, j)` is the multiplicity of the edge from
    /// the `i`-th to the `j`-th node of `dense_index`. Edges to ids outside the
    /// graph are ignored.
    pub fn adjacency_matrix(&self) -> Matrix {
        let index = self.dense_index();
        let mut m = vec![vec![0; index.len()]; index.len()];
        for node in self.nodes() {
            let Some(&row) = index.get(&node.id()) else { continue };
            for (child, &multiplicity) in node.children() {
                if let Some(&col) = index.get(child) {
                    m[row][col] = multiplicity;
                }
            }
        }
        m
    }
}

/// One node per row, no inputs or outputs, and `m[i][j]` parallel edges from
/// node `i` to node `j`. Cells beyond the row count are ignored.
pub fn graph_from_adjacency_matrix(m: &[Vec<Multiplicity>]) -> OpenDigraph {
    let mut graph = OpenDigraph::empty();
    let empty = EdgeMap::new();
    let ids: Vec<NodeId> = m.iter().map(|_| graph.add_node("", &empty, &empty)).collect();

    for (row, &src) in m.iter().zip(&ids) {
        for (&count, &tgt) in row.iter().zip(&ids) {
            for _ in 0..count {
                graph.add_edge(src, tgt);
            }
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;

    fn edges(pairs: &[(usize, u32)]) -> EdgeMap {
        pairs.iter().map(|&(n, m)| (NodeId(n), m)).collect()
    }

    #[test]
    fn test_adjacency_matrix() {
        let g = OpenDigraph::new(
            vec![],
            vec![],
            vec![
                Node::new(NodeId(0), "", edges(&[(1, 3), (2, 2)]), edges(&[])),
                Node::new(NodeId(1), "", edges(&[]), edges(&[(0, 3), (2, 4)])),
                Node::new(NodeId(2), "", edges(&[(1, 4)]), edges(&[(0, 2)])),
            ],
        );
        assert_eq!(g.adjacency_matrix(), vec![vec![0, 0, 0], vec![3, 0, 4], vec![2, 0, 0]]);
    }

    #[test]
    fn test_dense_index_follows_insertion_order() {
        let g = OpenDigraph::new(
            vec![],
            vec![],
            vec![
                Node::new(NodeId(5), "", edges(&[]), edges(&[(2, 1)])),
                Node::new(NodeId(2), "", edges(&[(5, 1)]), edges(&[])),
            ],
        );
        let index = g.dense_index();
        assert_eq!(index[&NodeId(5)], 0);
        assert_eq!(index[&NodeId(2)], 1);
        assert_eq!(g.adjacency_matrix(), vec![vec![0, 1], vec![0, 0]]);
    }

    #[test]
    fn test_graph_from_matrix() {
        let m = vec![vec![0, 2, 0], vec![0, 1, 1], vec![3, 0, 0]];
        let g = graph_from_adjacency_matrix(&m);
        assert_eq!(g.node_count(), 3);
        assert!(g.input_ids().is_empty() && g.output_ids().is_empty());
        assert_eq!(g.node(NodeId(0)).unwrap().children(), &edges(&[(1, 2)]));
        assert_eq!(g.node(NodeId(1)).unwrap().parents(), &edges(&[(0, 2), (1, 1)]));
        assert_eq!(g.node(NodeId(0)).unwrap().parents(), &edges(&[(2, 3)]));
        assert!(g.is_well_formed());
        assert_eq!(g.adjacency_matrix(), m);
    }

    #[test]
    fn test_empty_matrix() {
        let g = graph_from_adjacency_matrix(&[]);
        assert_eq!(g.node_count(), 0);
        assert!(g.adjacency_matrix().is_empty());
    }
}
