//! HTML template rendering for the dashboard page.
//!
//! Templates are stored as separate files for maintainability:
//! - `templates/dashboard.html` - page structure
//! - `templates/styles.css` - CSS styles
//!
//! Files are embedded at compile time using `include_str!`. The network
//! document itself comes from `relgraph_core` and is embedded in an iframe.

use std::fmt::Write as _;

use relgraph_core::dashboard::{DashboardPage, FilterOptions, GraphOutcome, RenderedGraph};
use relgraph_core::render::fill_placeholders;
use relgraph_core::{DashboardRequest, Selection};

const HTML_TEMPLATE: &str = include_str!("templates/dashboard.html");
const STYLES: &str = include_str!("templates/styles.css");

/// How the filter sidebar is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Served page: the sidebar is a form that reloads the dashboard.
    Served,
    /// Written to disk: the sidebar only lists the applied filters.
    Static,
}

/// Page-level settings.
pub struct PageSettings<'a> {
    pub title: &'a str,
    pub frame_height: u32,
    pub mode: PageMode,
}

/// Render the dashboard page.
///
/// Assembles the final HTML by substituting placeholders in the template:
/// - `{{TITLE}}` - page title
/// - `{{STYLES}}` - CSS styles
/// - `{{SIDEBAR}}` - filter controls
/// - `{{CONTENT}}` - graph, legend and detail table, or a message
pub fn render_dashboard_page(page: &DashboardPage, settings: &PageSettings) -> String {
    let sidebar = match settings.mode {
        PageMode::Served => filter_form(&page.options, &page.request),
        PageMode::Static => applied_filters(&page.request),
    };
    let content = match &page.outcome {
        GraphOutcome::Rendered(graph) => graph_section(graph, settings.frame_height),
        GraphOutcome::NoData => message("warning", "No relationships match the selected filters."),
    };
    fill(settings.title, &sidebar, &content)
}

/// Render a page that only shows an error.
pub fn render_error_page(title: &str, error: &str) -> String {
    fill(title, "", &message("error", error))
}

fn fill(title: &str, sidebar: &str, content: &str) -> String {
    let title = html_escape(title);
    fill_placeholders(
        HTML_TEMPLATE,
        &[
            ("TITLE", title.as_str()),
            ("STYLES", STYLES),
            ("SIDEBAR", sidebar),
            ("CONTENT", content),
        ],
    )
}

fn filter_form(options: &FilterOptions, request: &DashboardRequest) -> String {
    let mut html = String::from("<h2>Filters</h2>\n<form method=\"get\" action=\"/\">\n");
    if !options.tags.is_empty() {
        html.push_str(&multi_select("tag", "Tags", &options.tags, &request.tags));
    }
    if !options.relations.is_empty() {
        html.push_str(&multi_select("relation", "Relations", &options.relations, &request.relations));
    }
    html.push_str("<button type=\"submit\">Apply</button>\n</form>\n");
    html
}

fn multi_select(name: &str, label: &str, values: &[String], selected: &Selection) -> String {
    let mut html = format!(
        "<label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\" multiple>\n"
    );
    for value in values {
        let marker = if selected.contains(value) { " selected" } else { "" };
        let value = html_escape(value);
        let _ = writeln!(html, "<option value=\"{value}\"{marker}>{value}</option>");
    }
    html.push_str("</select>\n");
    html
}

fn applied_filters(request: &DashboardRequest) -> String {
    let mut html = String::from("<h2>Filters</h2>\n");
    for (label, selection) in [("Tags", &request.tags), ("Relations", &request.relations)] {
        let _ = writeln!(html, "<label>{label}</label>");
        if selection.is_empty() {
            html.push_str("<p>(none)</p>\n");
            continue;
        }
        html.push_str("<ul>\n");
        for value in selection.values() {
            let _ = writeln!(html, "<li>{}</li>", html_escape(value));
        }
        html.push_str("</ul>\n");
    }
    html
}

fn graph_section(graph: &RenderedGraph, frame_height: u32) -> String {
    let mut html = String::from("<h2>Relationship graph</h2>\n");
    let _ = writeln!(
        html,
        "<p class=\"summary\">{} nodes, {} edges. Click a node to focus on it, click the background to reset.</p>",
        graph.model.node_count(),
        graph.model.edge_count()
    );
    let _ = writeln!(
        html,
        "<iframe class=\"network-frame\" height=\"{}\" srcdoc=\"{}\"></iframe>",
        frame_height,
        html_escape(&graph.html)
    );

    if !graph.legend.is_empty() {
        html.push_str("<h2>Relations</h2>\n<ul class=\"legend\">\n");
        for entry in &graph.legend {
            let _ = writeln!(
                html,
                "<li><span class=\"swatch\" style=\"background: {}\"></span>{}</li>",
                html_escape(&entry.color),
                html_escape(&entry.label)
            );
        }
        html.push_str("</ul>\n");
    }

    if let Some(details) = &graph.details {
        html.push_str("<h2>Entity details</h2>\n");
        if details.is_empty() {
            html.push_str(&message("info", "No details for the entities in the graph."));
        } else {
            html.push_str("<table class=\"details\">\n<thead><tr>");
            for header in &details.headers {
                let _ = write!(html, "<th>{}</th>", html_escape(header));
            }
            html.push_str("</tr></thead>\n<tbody>\n");
            for row in &details.rows {
                html.push_str("<tr>");
                for cell in row {
                    let _ = write!(html, "<td>{}</td>", html_escape(cell));
                }
                html.push_str("</tr>\n");
            }
            html.push_str("</tbody>\n</table>\n");
        }
    }

    html
}

fn message(kind: &str, text: &str) -> String {
    format!("<div class=\"message {}\">{}</div>\n", kind, html_escape(text))
}

/// Escape HTML special characters to prevent XSS.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_page() -> DashboardPage {
        DashboardPage {
            options: FilterOptions {
                tags: vec!["oncology".to_string(), "surgery".to_string()],
                relations: vec![],
            },
            request: DashboardRequest {
                tags: Selection::new(["surgery"]),
                ..Default::default()
            },
            outcome: GraphOutcome::NoData,
        }
    }

    fn settings(mode: PageMode) -> PageSettings<'static> {
        PageSettings {
            title: "Network <Demo>",
            frame_height: 620,
            mode,
        }
    }

    #[test]
    fn test_no_data_shows_warning() {
        let html = render_dashboard_page(&empty_page(), &settings(PageMode::Served));
        assert!(html.contains("message warning"));
        assert!(!html.contains("<iframe"));
        assert!(html.contains("Network &lt;Demo&gt;"));
    }

    #[test]
    fn test_form_marks_selected_options() {
        let html = render_dashboard_page(&empty_page(), &settings(PageMode::Served));
        assert!(html.contains("<option value=\"surgery\" selected>"));
        assert!(html.contains("<option value=\"oncology\">"));
        // no relation options, no relation control
        assert!(!html.contains("name=\"relation\""));
    }

    #[test]
    fn test_static_page_lists_filters() {
        let html = render_dashboard_page(&empty_page(), &settings(PageMode::Static));
        assert!(!html.contains("<form"));
        assert!(html.contains("<li>surgery</li>"));
    }

    #[test]
    fn test_error_page_escapes() {
        let html = render_error_page("t", "bad <file>");
        assert!(html.contains("message error"));
        assert!(html.contains("bad &lt;file&gt;"));
    }

    #[test]
    fn test_placeholder_text_in_filters_is_kept() {
        let mut page = empty_page();
        page.request.tags = Selection::new(["{{CONTENT}}"]);
        let html = render_dashboard_page(&page, &settings(PageMode::Static));
        assert!(html.contains("<li>{{CONTENT}}</li>"));
        assert_eq!(html.matches("message warning").count(), 1);
    }
}
