//! Client-side click handler injected into the network document.
//!
//! The script runs inside the renderer's drawing function and expects these
//! bindings in scope: `network` (vis.Network), `nodes` and `edges`
//! (vis.DataSet) and `nodeColors` (node id -> original color). It performs the
//! same transitions as [`super::InteractionController`], one bulk
//! `DataSet.update` per collection per click.

const CLICK_HANDLER_TEMPLATE: &str = r#"
// click: highlight the selected node and show only its neighborhood
var selectedNode = null;
network.on("click", function (params) {
    if (params.nodes.length > 0) {
        selectedNode = params.nodes[0];
        var linkedNodes = new Set(network.getConnectedNodes(selectedNode));
        var linkedEdges = new Set(network.getConnectedEdges(selectedNode));
        var highlight = {
            background: "{{HIGHLIGHT}}",
            border: "{{HIGHLIGHT}}",
            highlight: { background: "{{HIGHLIGHT}}", border: "{{HIGHLIGHT}}" }
        };

        var nodePatches = [];
        nodes.forEach(function (node) {
            if (node.id === selectedNode) {
                nodePatches.push({ id: node.id, color: highlight, hidden: false });
            } else if (linkedNodes.has(node.id)) {
                nodePatches.push({ id: node.id, color: nodeColors[node.id], hidden: false });
            } else {
                nodePatches.push({ id: node.id, hidden: true });
            }
        });
        nodes.update(nodePatches);

        var edgePatches = [];
        edges.forEach(function (edge) {
            edgePatches.push({ id: edge.id, hidden: !linkedEdges.has(edge.id) });
        });
        edges.update(edgePatches);
    } else {
        selectedNode = null;
        var nodeResets = [];
        nodes.forEach(function (node) {
            nodeResets.push({ id: node.id, color: nodeColors[node.id], hidden: false });
        });
        nodes.update(nodeResets);

        var edgeResets = [];
        edges.forEach(function (edge) {
            edgeResets.push({ id: edge.id, hidden: false });
        });
        edges.update(edgeResets);
    }
});
"#;

/// Click handler script with the given highlight color baked in.
pub fn click_handler_script(highlight_color: &str) -> String {
    CLICK_HANDLER_TEMPLATE.replace("{{HIGHLIGHT}}", &js_string_body(highlight_color))
}

/// Escape text for use inside a double-quoted JS string literal.
fn js_string_body(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('<', "\\u003c")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_substituted() {
        let script = click_handler_script("#ff6b35");
        assert!(!script.contains("{{HIGHLIGHT}}"));
        assert_eq!(script.matches("#ff6b35").count(), 4);
    }

    #[test]
    fn test_script_uses_original_colors() {
        let script = click_handler_script("#000");
        assert!(script.contains("nodeColors[node.id]"));
        assert!(script.contains("network.on(\"click\""));
    }

    #[test]
    fn test_color_cannot_break_out() {
        let script = click_handler_script("red\"</script>");
        assert!(!script.contains("</script>"));
    }
}
