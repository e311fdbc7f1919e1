use std::io::{self, Write};

use relgraph_core::render::INJECTION_MARKER;
use relgraph_core::{
    Config, Dashboard, DashboardError, DashboardRequest, EmptySelection, GraphModel, GraphOutcome,
    NetworkRenderer, Selection,
};
use relgraph_core::config::CanvasConfig;
use tempfile::TempDir;

const RELATIONSHIPS: &str = "\
source,target,relation,weight
Dr. Sato,Dr. Kato,colleague,2
Dr. Kato,Dr. Ito,mentor,1
Dr. Sato,Dr. Ito,friend,
Dr. Mori,Dr. Sato,colleague,3
";

const PROPERTY: &str = "\
name,tag
Dr. Sato,cardiology
Dr. Kato,cardiology
Dr. Ito,oncology
Dr. Mori,surgery
";

const DETAIL: &str = "\
hcp_name,hco_name
Dr. Sato,Central Hospital
Dr. Ito,North Clinic
Dr. Nobody,Elsewhere
";

fn create_test_dashboard() -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    let write = |name: &str, contents: &str| {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    };

    let mut config = Config::default();
    config.data.relationships = write("relationships.csv", RELATIONSHIPS);
    config.data.property = Some(write("property.csv", PROPERTY));
    config.data.detail = Some(write("hco.csv", DETAIL));
    (dir, config)
}

fn rendered(outcome: GraphOutcome) -> Box<relgraph_core::RenderedGraph> {
    match outcome {
        GraphOutcome::Rendered(graph) => graph,
        GraphOutcome::NoData => panic!("expected a rendered graph"),
    }
}

#[test]
fn test_full_pass_without_filters() {
    let (_dir, config) = create_test_dashboard();
    let page = Dashboard::new(config).page(&DashboardRequest::default()).unwrap();

    assert_eq!(page.options.tags, vec!["cardiology", "oncology", "surgery"]);
    assert_eq!(page.options.relations, vec!["colleague", "friend", "mentor"]);

    let graph = rendered(page.outcome);
    assert_eq!(graph.model.node_count(), 4);
    assert_eq!(graph.model.edge_count(), 4);
    assert!(graph.html.contains("network.on(\"click\""));
    assert!(graph.html.find("network.on(").unwrap() < graph.html.find(INJECTION_MARKER).unwrap());

    let details = graph.details.unwrap();
    let keys: Vec<&str> = details.rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(keys, vec!["Dr. Ito", "Dr. Sato"]);
}

#[test]
fn test_tag_filter_keeps_rows_between_tagged_people() {
    let (_dir, config) = create_test_dashboard();
    let request = DashboardRequest {
        tags: Selection::new(["cardiology", "oncology"]),
        ..Default::default()
    };
    let graph = Dashboard::new(config).render(&request).unwrap();

    let ids: Vec<&str> = graph.model.node_ids().collect();
    assert_eq!(ids, vec!["Dr. Sato", "Dr. Kato", "Dr. Ito"]);
    assert_eq!(graph.model.edge_count(), 3);
    // tagged nodes take the tag palette color
    assert_eq!(graph.model.node("Dr. Ito").unwrap().color, "#ab47bc");
}

#[test]
fn test_relation_filter_and_legend() {
    let (_dir, config) = create_test_dashboard();
    let request = DashboardRequest {
        relations: Selection::new(["colleague"]),
        ..Default::default()
    };
    let graph = Dashboard::new(config).render(&request).unwrap();

    assert_eq!(graph.model.edge_count(), 2);
    assert_eq!(graph.legend.len(), 1);
    assert_eq!(graph.legend[0].label, "colleague");
    assert_eq!(graph.model.node("Dr. Sato").unwrap().degree, 2);
}

#[test]
fn test_filter_with_no_match_is_no_data() {
    let (_dir, config) = create_test_dashboard();
    let request = DashboardRequest {
        tags: Selection::new(["surgery"]),
        ..Default::default()
    };
    let dashboard = Dashboard::new(config);

    assert!(matches!(
        dashboard.render(&request),
        Err(DashboardError::NoDataAfterFilter)
    ));
    let page = dashboard.page(&request).unwrap();
    assert!(matches!(page.outcome, GraphOutcome::NoData));
    assert_eq!(page.options.tags.len(), 3);
}

#[test]
fn test_empty_selection_show_nothing() {
    let (_dir, mut config) = create_test_dashboard();
    config.filter.empty_selection = EmptySelection::ShowNothing;

    let err = Dashboard::new(config)
        .render(&DashboardRequest::default())
        .unwrap_err();
    assert!(matches!(err, DashboardError::NoDataAfterFilter));
    assert!(err.is_warning());
}

#[test]
fn test_missing_relationship_file() {
    let (dir, mut config) = create_test_dashboard();
    config.data.relationships = dir.path().join("missing.csv");

    let err = Dashboard::new(config)
        .page(&DashboardRequest::default())
        .unwrap_err();
    assert!(matches!(err, DashboardError::DataUnavailable { .. }));
}

#[test]
fn test_empty_table_is_no_data() {
    let (dir, mut config) = create_test_dashboard();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "source,target\n").unwrap();
    config.data.relationships = path;

    let page = Dashboard::new(config).page(&DashboardRequest::default()).unwrap();
    assert!(matches!(page.outcome, GraphOutcome::NoData));
}

struct MarkerlessRenderer;

impl NetworkRenderer for MarkerlessRenderer {
    fn write_document(&self, _: &GraphModel, _: &CanvasConfig, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"<html><body>static</body></html>")
    }
}

#[test]
fn test_changed_renderer_output_is_an_error() {
    let (_dir, config) = create_test_dashboard();
    let err = Dashboard::with_renderer(config, MarkerlessRenderer)
        .page(&DashboardRequest::default())
        .unwrap_err();
    assert!(matches!(err, DashboardError::InjectionPointMissing { .. }));
}
