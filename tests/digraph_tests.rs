use open_digraph::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

fn id(n: usize) -> NodeId { NodeId(n) }

/// Every edge is recorded with the same multiplicity on both endpoints.
fn assert_symmetric(graph: &OpenDigraph) {
    for node in graph.nodes() {
        for (&child, &m) in node.children() {
            assert_eq!(graph.node(child).unwrap().parent_multiplicity(node.id()), m);
        }
        for (&parent, &m) in node.parents() {
            assert_eq!(graph.node(parent).unwrap().child_multiplicity(node.id()), m);
        }
    }
}

#[test]
fn test_mutation_sequence_keeps_both_sides_in_sync() {
    let mut g = OpenDigraph::empty();
    let none = EdgeMap::new();
    let a = g.add_node("a", &none, &none);
    let b = g.add_node("b", &EdgeMap::from([(a, 2)]), &none);
    let c = g.add_node("c", &EdgeMap::from([(b, 1)]), &EdgeMap::from([(a, 1)]));
    assert_symmetric(&g);

    g.add_edges(&[(a, c), (c, c), (b, a)]);
    assert_symmetric(&g);
    g.remove_edge(a, b).unwrap();
    assert_symmetric(&g);
    g.remove_parallel_edges(c, c).unwrap();
    assert_symmetric(&g);
    let input = g.add_input_node(a).unwrap();
    let output = g.add_output_node(c).unwrap();
    assert_symmetric(&g);
    g.assert_is_well_formed().unwrap();

    g.remove_node_by_id(b).unwrap();
    assert_symmetric(&g);
    assert_eq!(g.new_id(), b);
    assert_eq!(g.input_ids(), &[input][..]);
    assert_eq!(g.output_ids(), &[output][..]);
    g.assert_is_well_formed().unwrap();
}

#[test]
fn test_add_edge_example() {
    let mut g = OpenDigraph::new(
        vec![],
        vec![],
        vec![
            Node::new(id(0), "", EdgeMap::new(), EdgeMap::from([(id(1), 1)])),
            Node::new(id(1), "", EdgeMap::from([(id(0), 1)]), EdgeMap::new()),
        ],
    );
    g.add_edge(id(0), id(1));
    assert_eq!(g.node(id(0)).unwrap().children(), &EdgeMap::from([(id(1), 2)]));
    assert_eq!(g.node(id(1)).unwrap().parents(), &EdgeMap::from([(id(0), 2)]));
}

#[test]
fn test_well_formedness_breaks_after_caller_mutation() {
    let mut g = OpenDigraph::new(vec![], vec![], vec![Node::new(id(0), "", EdgeMap::new(), EdgeMap::new())]);
    let output = g.add_output_node(id(0)).unwrap();
    assert!(g.is_well_formed());

    // A second edge into the output is allowed, but the audit catches it.
    g.add_edge(id(0), output);
    assert!(!g.is_well_formed());
    let err = g.assert_is_well_formed().unwrap_err();
    assert!(matches!(err, GraphError::NotWellFormed { .. }));
}

#[rstest]
#[case(GraphForm::Free)]
#[case(GraphForm::Dag)]
#[case(GraphForm::Undirected)]
fn test_dot_file_round_trip(#[case] form: GraphForm) {
    let mut rng = StdRng::seed_from_u64(2024);
    let g = OpenDigraph::random(&mut rng, 8, 3, 0, 0, form).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.dot");
    g.save_as_dot_file(&path, DotOptions::default()).unwrap();
    let back = OpenDigraph::from_dot_file(&path).unwrap();

    assert_eq!(back, g);
    assert_eq!(back.adjacency_matrix(), g.adjacency_matrix());
}

#[test]
fn test_reading_a_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = OpenDigraph::from_dot_file(dir.path().join("absent.dot"));
    assert!(matches!(result, Err(GraphError::Io(_))));
}

#[test]
fn test_matrix_round_trip() {
    let m = vec![vec![1, 0, 2], vec![0, 0, 1], vec![4, 1, 0]];
    let g = graph_from_adjacency_matrix(&m);
    assert_eq!(g.adjacency_matrix(), m);
    assert_symmetric(&g);
}

#[test]
fn test_random_graph_from_config() {
    let spec = RandomGraphSpec::from_json(r#"{ "nodes": 6, "bound": 2, "inputs": 2, "outputs": 1, "form": "DAG", "seed": 1 }"#)
        .unwrap();
    let g = spec.build().unwrap();
    assert_eq!(g.node_count(), 9);
    assert_symmetric(&g);
    g.assert_is_well_formed().unwrap();
}
