use std::collections::{BTreeMap, HashMap};

use crate::config::GraphConfig;
use crate::table::RelationshipRow;

use super::model::{Edge, GraphModel, Node};

// =============================================================================
// Graph Builder
// =============================================================================

/// Builder for constructing the graph model from relationship rows.
pub struct GraphBuilder<'a> {
    config: &'a GraphConfig,
    node_tags: BTreeMap<String, String>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(config: &'a GraphConfig) -> Self {
        Self {
            config,
            node_tags: BTreeMap::new(),
        }
    }

    /// Attach node tags (from the property table) used for node colors.
    pub fn with_node_tags(mut self, node_tags: BTreeMap<String, String>) -> Self {
        self.node_tags = node_tags;
        self
    }

    /// Build the graph model. Nodes come out in order of first appearance.
    pub fn build(&self, rows: &[RelationshipRow]) -> GraphModel {
        let mut order: Vec<&str> = Vec::new();
        let mut degrees: HashMap<&str, usize> = HashMap::new();

        for row in rows {
            Self::visit(&mut order, &mut degrees, &row.source);
            // a self-loop row references its node once
            if !row.is_self_loop() {
                Self::visit(&mut order, &mut degrees, &row.target);
            }
        }

        let nodes = order
            .iter()
            .map(|&id| self.make_node(id, degrees[id]))
            .collect();

        let edges = rows
            .iter()
            .enumerate()
            .map(|(i, row)| self.make_edge(i, row))
            .collect();

        let model = GraphModel::new(nodes, edges);
        tracing::debug!(
            nodes = model.node_count(),
            edges = model.edge_count(),
            "built graph model"
        );
        model
    }

    fn visit<'r>(order: &mut Vec<&'r str>, degrees: &mut HashMap<&'r str, usize>, id: &'r str) {
        let degree = degrees.entry(id).or_insert_with(|| {
            order.push(id);
            0
        });
        *degree += 1;
    }

    fn make_node(&self, id: &str, degree: usize) -> Node {
        let tag = self.node_tags.get(id).cloned();
        Node {
            id: id.to_string(),
            label: id.to_string(),
            title: id.to_string(),
            degree,
            size: self.config.node_size(degree),
            color: self.config.tag_color(tag.as_deref()).to_string(),
            tag,
        }
    }

    fn make_edge(&self, index: usize, row: &RelationshipRow) -> Edge {
        Edge {
            id: format!("e{}", index),
            from: row.source.clone(),
            to: row.target.clone(),
            relation: row.relation.clone(),
            color: self.config.relation_color(row.relation.as_deref()).to_string(),
            width: row.weight.unwrap_or(self.config.default_weight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_FALLBACK_COLOR, DEFAULT_NODE_COLOR};

    fn sample_rows() -> Vec<RelationshipRow> {
        vec![
            RelationshipRow::new("A", "B").with_relation("friend").with_weight(1.0),
            RelationshipRow::new("B", "C").with_relation("colleague").with_weight(2.0),
            RelationshipRow::new("A", "C").with_relation("friend").with_weight(1.0),
        ]
    }

    #[test]
    fn test_first_appearance_order() {
        let config = GraphConfig::default();
        let model = GraphBuilder::new(&config).build(&sample_rows());
        let ids: Vec<&str> = model.node_ids().collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_degree_and_size() {
        let config = GraphConfig::default();
        let model = GraphBuilder::new(&config).build(&sample_rows());
        for node in &model.nodes {
            assert_eq!(node.degree, 2);
            assert_eq!(node.size, 30.0);
        }
    }

    #[test]
    fn test_parallel_edges_counted() {
        let config = GraphConfig::default();
        let rows = vec![RelationshipRow::new("A", "B"), RelationshipRow::new("B", "A")];
        let model = GraphBuilder::new(&config).build(&rows);
        assert_eq!(model.node("A").unwrap().degree, 2);
        assert_eq!(model.edge_count(), 2);
        assert_ne!(model.edges[0].id, model.edges[1].id);
    }

    #[test]
    fn test_self_loop_counted_once() {
        let config = GraphConfig::default();
        let rows = vec![RelationshipRow::new("A", "A"), RelationshipRow::new("A", "B")];
        let model = GraphBuilder::new(&config).build(&rows);
        assert_eq!(model.node("A").unwrap().degree, 2);
        assert_eq!(model.node("B").unwrap().degree, 1);
        assert_eq!(model.edges[0].from, model.edges[0].to);
    }

    #[test]
    fn test_edge_defaults() {
        let config = GraphConfig::default();
        let model = GraphBuilder::new(&config).build(&[RelationshipRow::new("A", "B")]);
        let edge = &model.edges[0];
        assert_eq!(edge.color, DEFAULT_FALLBACK_COLOR);
        assert_eq!(edge.width, 1.0);
    }

    #[test]
    fn test_weight_becomes_width() {
        let config = GraphConfig::default();
        let model = GraphBuilder::new(&config).build(&sample_rows());
        assert_eq!(model.edges[1].width, 2.0);
        assert_eq!(model.edges[1].color, "#2196f3");
    }

    #[test]
    fn test_tag_colors_nodes() {
        let config = GraphConfig::default();
        let tags: BTreeMap<String, String> = [("A".to_string(), "surgery".to_string())].into();
        let model = GraphBuilder::new(&config)
            .with_node_tags(tags)
            .build(&sample_rows());
        assert_eq!(model.node("A").unwrap().color, "#ffa726");
        assert_eq!(model.node("B").unwrap().color, DEFAULT_NODE_COLOR);
    }

    #[test]
    fn test_legend_distinct_sorted() {
        let config = GraphConfig::default();
        let model = GraphBuilder::new(&config).build(&sample_rows());
        let labels: Vec<String> = model.legend().into_iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["colleague", "friend"]);
    }
}
