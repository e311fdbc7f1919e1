use std::collections::{BTreeSet, HashMap};

use relgraph_core::graph::GraphBuilder;
use relgraph_core::{GraphConfig, RelationshipRow};

fn rows(pairs: &[(&str, &str)]) -> Vec<RelationshipRow> {
    pairs.iter().map(|(s, t)| RelationshipRow::new(*s, *t)).collect()
}

#[test]
fn test_node_set_is_distinct_endpoints() {
    let rows = rows(&[("A", "B"), ("C", "A"), ("D", "D"), ("B", "E"), ("A", "B")]);
    let model = GraphBuilder::new(&GraphConfig::default()).build(&rows);

    let expected: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| [r.source.as_str(), r.target.as_str()])
        .collect();
    let actual: BTreeSet<&str> = model.node_ids().collect();
    assert_eq!(actual, expected);
    assert_eq!(model.node_count(), expected.len());
}

#[test]
fn test_degree_counts_rows() {
    let rows = rows(&[("A", "B"), ("A", "B"), ("B", "C"), ("C", "C"), ("C", "A")]);
    let model = GraphBuilder::new(&GraphConfig::default()).build(&rows);

    let mut expected: HashMap<&str, usize> = HashMap::new();
    for row in &rows {
        for id in model.node_ids() {
            if row.touches(id) {
                *expected.entry(id).or_default() += 1;
            }
        }
    }
    for node in &model.nodes {
        assert_eq!(node.degree, expected[node.id.as_str()], "degree of {}", node.id);
    }
    assert_eq!(model.node("C").unwrap().degree, 3);
}

#[test]
fn test_size_monotone_in_degree() {
    let rows = rows(&[("hub", "a"), ("hub", "b"), ("hub", "c"), ("a", "b")]);
    let config = GraphConfig::default();
    let model = GraphBuilder::new(&config).build(&rows);

    let mut nodes = model.nodes.clone();
    nodes.sort_by_key(|n| n.degree);
    for pair in nodes.windows(2) {
        assert!(pair[0].size <= pair[1].size);
    }
    for node in &model.nodes {
        assert_eq!(node.size, 20.0 + node.degree as f64 * 5.0);
    }
}

#[test]
fn test_every_edge_references_nodes() {
    let rows = rows(&[("A", "B"), ("B", "C"), ("X", "X")]);
    let model = GraphBuilder::new(&GraphConfig::default()).build(&rows);
    for edge in &model.edges {
        assert!(model.contains(&edge.from));
        assert!(model.contains(&edge.to));
    }
}

#[test]
fn test_rebuild_is_stable() {
    let rows = rows(&[("A", "B"), ("B", "C")]);
    let config = GraphConfig::default();
    let first = GraphBuilder::new(&config).build(&rows);
    let second = GraphBuilder::new(&config).build(&rows);
    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.edges, second.edges);
}
