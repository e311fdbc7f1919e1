use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::graph::GraphModel;

/// Color fields of a node as drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeColor {
    pub background: String,
    pub border: String,
    pub highlight_background: String,
    pub highlight_border: String,
}

impl NodeColor {
    /// All four variants set to one color.
    pub fn uniform(color: &str) -> Self {
        Self {
            background: color.to_string(),
            border: color.to_string(),
            highlight_background: color.to_string(),
            highlight_border: color.to_string(),
        }
    }
}

/// Change to one node. `color: None` leaves the current color in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodePatch {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<NodeColor>,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgePatch {
    pub id: String,
    pub hidden: bool,
}

/// Every node and edge change of one transition, applied in bulk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewUpdate {
    pub nodes: Vec<NodePatch>,
    pub edges: Vec<EdgePatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub color: NodeColor,
    pub hidden: bool,
}

/// Materialized drawing state of every node and edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub nodes: BTreeMap<String, NodeView>,
    pub edges: BTreeMap<String, bool>,
}

impl ViewState {
    fn initial(colors: &BTreeMap<String, String>, edge_ids: &[String]) -> Self {
        Self {
            nodes: colors
                .iter()
                .map(|(id, c)| {
                    (
                        id.clone(),
                        NodeView {
                            color: NodeColor::uniform(c),
                            hidden: false,
                        },
                    )
                })
                .collect(),
            edges: edge_ids.iter().map(|id| (id.clone(), false)).collect(),
        }
    }

    fn apply(&mut self, update: &ViewUpdate) {
        for patch in &update.nodes {
            if let Some(view) = self.nodes.get_mut(&patch.id) {
                if let Some(color) = &patch.color {
                    view.color = color.clone();
                }
                view.hidden = patch.hidden;
            }
        }
        for patch in &update.edges {
            if let Some(hidden) = self.edges.get_mut(&patch.id) {
                *hidden = patch.hidden;
            }
        }
    }

    pub fn visible_nodes(&self) -> BTreeSet<&str> {
        self.nodes
            .iter()
            .filter(|(_, v)| !v.hidden)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    pub fn visible_edges(&self) -> BTreeSet<&str> {
        self.edges
            .iter()
            .filter(|(_, hidden)| !**hidden)
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

/// Click selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "node", rename_all = "lowercase")]
pub enum ClickState {
    #[default]
    None,
    Selected(String),
}

/// Click-to-highlight controller over an immutable graph model.
///
/// Original node colors are captured once in [`InteractionController::new`]
/// and only read afterwards.
pub struct InteractionController<'g> {
    model: &'g GraphModel,
    original_colors: BTreeMap<String, String>,
    highlight_color: String,
    selection: ClickState,
    view: ViewState,
}

impl<'g> InteractionController<'g> {
    pub fn new(model: &'g GraphModel, highlight_color: impl Into<String>) -> Self {
        let original_colors = model.original_colors();
        let edge_ids: Vec<String> = model.edges.iter().map(|e| e.id.clone()).collect();
        let view = ViewState::initial(&original_colors, &edge_ids);
        Self {
            model,
            original_colors,
            highlight_color: highlight_color.into(),
            selection: ClickState::None,
            view,
        }
    }

    pub fn selection(&self) -> &ClickState {
        &self.selection
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Handle a click. `hit` is the node under the pointer, `None` for empty canvas.
    /// An id that is not in the model counts as an empty-canvas click.
    pub fn click(&mut self, hit: Option<&str>) -> ViewUpdate {
        let update = match hit.filter(|id| self.model.contains(id)) {
            Some(id) => {
                self.selection = ClickState::Selected(id.to_string());
                self.focus_update(id)
            }
            None => {
                self.selection = ClickState::None;
                self.reset_update()
            }
        };
        self.view.apply(&update);
        update
    }

    fn original(&self, id: &str) -> NodeColor {
        NodeColor::uniform(self.original_colors.get(id).map(String::as_str).unwrap_or_default())
    }

    fn focus_update(&self, selected: &str) -> ViewUpdate {
        let connected_nodes = self.model.neighbors(selected);
        let connected_edges = self.model.incident_edges(selected);

        let nodes = self
            .model
            .node_ids()
            .map(|id| {
                if id == selected {
                    NodePatch {
                        id: id.to_string(),
                        color: Some(NodeColor::uniform(&self.highlight_color)),
                        hidden: false,
                    }
                } else if connected_nodes.contains(id) {
                    NodePatch {
                        id: id.to_string(),
                        color: Some(self.original(id)),
                        hidden: false,
                    }
                } else {
                    NodePatch {
                        id: id.to_string(),
                        color: None,
                        hidden: true,
                    }
                }
            })
            .collect();

        let edges = self
            .model
            .edges
            .iter()
            .map(|e| EdgePatch {
                id: e.id.clone(),
                hidden: !connected_edges.contains(e.id.as_str()),
            })
            .collect();

        ViewUpdate { nodes, edges }
    }

    fn reset_update(&self) -> ViewUpdate {
        ViewUpdate {
            nodes: self
                .model
                .node_ids()
                .map(|id| NodePatch {
                    id: id.to_string(),
                    color: Some(self.original(id)),
                    hidden: false,
                })
                .collect(),
            edges: self
                .model
                .edges
                .iter()
                .map(|e| EdgePatch {
                    id: e.id.clone(),
                    hidden: false,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use crate::graph::GraphBuilder;
    use crate::table::RelationshipRow;

    const HIGHLIGHT: &str = "#ff6b35";

    fn model() -> GraphModel {
        let rows = vec![
            RelationshipRow::new("A", "B").with_relation("friend"),
            RelationshipRow::new("B", "C").with_relation("colleague"),
            RelationshipRow::new("A", "C").with_relation("friend"),
            RelationshipRow::new("C", "D"),
        ];
        GraphBuilder::new(&GraphConfig::default()).build(&rows)
    }

    #[test]
    fn test_initial_state_all_visible() {
        let model = model();
        let controller = InteractionController::new(&model, HIGHLIGHT);
        assert_eq!(controller.selection(), &ClickState::None);
        assert_eq!(controller.view().visible_nodes().len(), 4);
        assert_eq!(controller.view().visible_edges().len(), 4);
    }

    #[test]
    fn test_select_shows_neighborhood() {
        let model = model();
        let mut controller = InteractionController::new(&model, HIGHLIGHT);
        controller.click(Some("A"));

        let view = controller.view();
        assert_eq!(view.visible_nodes(), BTreeSet::from(["A", "B", "C"]));
        assert_eq!(view.visible_edges(), BTreeSet::from(["e0", "e2"]));
        assert_eq!(view.nodes["A"].color, NodeColor::uniform(HIGHLIGHT));
        assert_eq!(view.nodes["B"].color, NodeColor::uniform(&model.nodes[1].color));
    }

    #[test]
    fn test_hidden_node_keeps_color() {
        let model = model();
        let mut controller = InteractionController::new(&model, HIGHLIGHT);
        controller.click(Some("C"));
        let update = controller.click(Some("A"));

        let d = update.nodes.iter().find(|p| p.id == "D").unwrap();
        assert!(d.hidden);
        assert!(d.color.is_none());
        // C was highlighted, then restored as a neighbor of A
        assert_eq!(controller.view().nodes["C"].color, NodeColor::uniform(&model.nodes[2].color));
    }

    #[test]
    fn test_select_then_clear_round_trip() {
        let model = model();
        let mut controller = InteractionController::new(&model, HIGHLIGHT);
        let initial = controller.view().clone();

        controller.click(Some("B"));
        assert_ne!(controller.view(), &initial);
        controller.click(None);
        assert_eq!(controller.view(), &initial);
        assert_eq!(controller.selection(), &ClickState::None);
    }

    #[test]
    fn test_select_idempotent() {
        let model = model();
        let mut controller = InteractionController::new(&model, HIGHLIGHT);
        let first = controller.click(Some("D"));
        let once = controller.view().clone();
        let second = controller.click(Some("D"));
        assert_eq!(first, second);
        assert_eq!(controller.view(), &once);
    }

    #[test]
    fn test_unknown_node_clears() {
        let model = model();
        let mut controller = InteractionController::new(&model, HIGHLIGHT);
        controller.click(Some("A"));
        controller.click(Some("nobody"));
        assert_eq!(controller.selection(), &ClickState::None);
        assert_eq!(controller.view().visible_nodes().len(), 4);
    }
}
