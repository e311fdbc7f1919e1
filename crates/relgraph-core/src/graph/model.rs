//! Immutable graph model produced by the builder.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

/// A node in the graph visualization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Unique identifier, taken from the source/target columns.
    pub id: String,
    /// Display label (same as the id).
    pub label: String,
    /// Hover text.
    pub title: String,
    /// Number of rows referencing this node.
    pub degree: usize,
    pub size: f64,
    /// Original color, restored after every highlight.
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// An edge (one relationship row) in the graph visualization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    /// `e{row index}`; parallel rows get distinct ids.
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    pub color: String,
    /// Drawn thickness.
    pub width: f64,
}

impl Edge {
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint.
    pub fn other(&self, id: &str) -> Option<&str> {
        if self.from == id {
            Some(&self.to)
        } else if self.to == id {
            Some(&self.from)
        } else {
            None
        }
    }
}

/// One relation legend row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

/// Nodes and edges of one render pass.
#[derive(Debug, Clone, Serialize)]
pub struct GraphModel {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl GraphModel {
    pub(crate) fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
        Self { nodes, edges, index }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    /// Nodes linked to `id` by at least one edge.
    pub fn neighbors(&self, id: &str) -> BTreeSet<&str> {
        self.edges.iter().filter_map(|e| e.other(id)).collect()
    }

    /// Ids of the edges incident to `id`.
    pub fn incident_edges(&self, id: &str) -> BTreeSet<&str> {
        self.edges
            .iter()
            .filter(|e| e.touches(id))
            .map(|e| e.id.as_str())
            .collect()
    }

    /// Node id -> original color.
    pub fn original_colors(&self) -> BTreeMap<String, String> {
        self.nodes
            .iter()
            .map(|n| (n.id.clone(), n.color.clone()))
            .collect()
    }

    /// Distinct relation labels with their edge colors, sorted by label.
    pub fn legend(&self) -> Vec<LegendEntry> {
        let mut seen = BTreeMap::new();
        for edge in &self.edges {
            if let Some(relation) = &edge.relation {
                seen.entry(relation.clone()).or_insert_with(|| edge.color.clone());
            }
        }
        seen.into_iter()
            .map(|(label, color)| LegendEntry { label, color })
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
