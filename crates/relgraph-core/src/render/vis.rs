//! vis-network document renderer.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;
use serde_json::json;

use crate::config::CanvasConfig;
use crate::graph::{Edge, GraphModel, Node};

use super::{fill_placeholders, NetworkRenderer};

const VIS_NETWORK_SCRIPT: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<script src="{{VIS_SCRIPT}}"></script>
<style>
  html, body { margin: 0; padding: 0; background-color: {{BACKGROUND}}; }
  #network { width: {{WIDTH}}; height: {{HEIGHT}}; background-color: {{BACKGROUND}}; }
</style>
</head>
<body>
<div id="network"></div>
<script>
var nodes;
var edges;
var nodeColors;
var network;

function drawGraph() {
    var container = document.getElementById("network");
    nodes = new vis.DataSet({{NODES}});
    edges = new vis.DataSet({{EDGES}});
    nodeColors = {{NODE_COLORS}};
    var options = {{OPTIONS}};
    network = new vis.Network(container, { nodes: nodes, edges: edges }, options);
    return network;
}

drawGraph();
</script>
</body>
</html>
"#;

/// Renders a standalone page drawing the graph with vis-network.
///
/// Physics uses the Barnes-Hut solver. The document exposes `nodes`, `edges`,
/// `nodeColors` and `network` as page globals for the injected click handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisNetworkRenderer;

#[derive(Serialize)]
struct VisNode<'a> {
    id: &'a str,
    label: &'a str,
    title: &'a str,
    size: f64,
    color: &'a str,
    shape: &'static str,
}

impl<'a> From<&'a Node> for VisNode<'a> {
    fn from(node: &'a Node) -> Self {
        Self {
            id: &node.id,
            label: &node.label,
            title: &node.title,
            size: node.size,
            color: &node.color,
            shape: "dot",
        }
    }
}

#[derive(Serialize)]
struct VisEdge<'a> {
    id: &'a str,
    from: &'a str,
    to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    color: &'a str,
    width: f64,
}

impl<'a> From<&'a Edge> for VisEdge<'a> {
    fn from(edge: &'a Edge) -> Self {
        Self {
            id: &edge.id,
            from: &edge.from,
            to: &edge.to,
            title: edge.relation.as_deref(),
            color: &edge.color,
            width: edge.width,
        }
    }
}

impl VisNetworkRenderer {
    fn options(canvas: &CanvasConfig) -> serde_json::Value {
        json!({
            "nodes": {
                "font": { "size": canvas.font_size, "color": canvas.font_color }
            },
            "edges": { "smooth": false },
            "interaction": { "hover": true },
            "physics": {
                "solver": "barnesHut",
                "barnesHut": {
                    "gravitationalConstant": -80000,
                    "centralGravity": 0.3,
                    "springLength": 250,
                    "springConstant": 0.001,
                    "damping": 0.09,
                    "avoidOverlap": 0
                }
            }
        })
    }
}

impl NetworkRenderer for VisNetworkRenderer {
    fn write_document(
        &self,
        model: &GraphModel,
        canvas: &CanvasConfig,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let nodes: Vec<VisNode> = model.nodes.iter().map(VisNode::from).collect();
        let edges: Vec<VisEdge> = model.edges.iter().map(VisEdge::from).collect();
        let colors: BTreeMap<String, String> = model.original_colors();

        let background = css_value(&canvas.background);
        let width = css_value(&canvas.width);
        let height = css_value(&canvas.height);
        let nodes = script_json(&nodes)?;
        let edges = script_json(&edges)?;
        let colors = script_json(&colors)?;
        let options = script_json(&Self::options(canvas))?;

        let html = fill_placeholders(
            DOCUMENT_TEMPLATE,
            &[
                ("VIS_SCRIPT", VIS_NETWORK_SCRIPT),
                ("BACKGROUND", background.as_str()),
                ("WIDTH", width.as_str()),
                ("HEIGHT", height.as_str()),
                ("NODES", nodes.as_str()),
                ("EDGES", edges.as_str()),
                ("NODE_COLORS", colors.as_str()),
                ("OPTIONS", options.as_str()),
            ],
        );

        out.write_all(html.as_bytes())
    }
}

/// JSON safe to embed in an inline `<script>` element.
///
/// `;` only occurs inside JSON strings, so escaping it keeps the injection
/// marker out of embedded data.
fn script_json<T: Serialize>(value: &T) -> io::Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(json.replace("</", "<\\/").replace(';', "\\u003b"))
}

/// Drop characters that could end a CSS declaration or the style element.
fn css_value(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>'))
        .collect()
}
