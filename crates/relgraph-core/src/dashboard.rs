//! One dashboard render pass.
//!
//! Every pass starts from the files on disk: load rows and lookup tables,
//! apply the category filters, build the graph model, render the network
//! document with the click handler injected, then join entity details for the
//! nodes on screen. Nothing is kept between passes.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::Config;
use crate::error::DashboardError;
use crate::filter::{self, Selection};
use crate::graph::{GraphBuilder, GraphModel, LegendEntry};
use crate::render::{render_interactive, NetworkRenderer, VisNetworkRenderer};
use crate::table::{self, DetailTable, PropertyTable, RelationshipRow};

/// User-selected filter values for one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardRequest {
    pub tags: Selection,
    pub relations: Selection,
}

/// Values offered by the filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub tags: Vec<String>,
    pub relations: Vec<String>,
}

/// Output of a successful pass.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedGraph {
    pub model: GraphModel,
    /// Interactive network document.
    pub html: String,
    pub legend: Vec<LegendEntry>,
    /// Details of the nodes on screen, when a detail table is configured.
    pub details: Option<DetailTable>,
}

/// What the page shows in the graph area.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphOutcome {
    Rendered(Box<RenderedGraph>),
    /// The filter matched no rows; show a warning instead of a graph.
    NoData,
}

/// Everything the dashboard page needs.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    pub options: FilterOptions,
    pub request: DashboardRequest,
    pub outcome: GraphOutcome,
}

/// Tables read at the start of a pass.
struct Inputs {
    rows: Vec<RelationshipRow>,
    properties: Option<PropertyTable>,
    details: Option<DetailTable>,
}

/// Runs render passes against a fixed configuration.
pub struct Dashboard<R = VisNetworkRenderer> {
    config: Config,
    renderer: R,
}

impl Dashboard<VisNetworkRenderer> {
    pub fn new(config: Config) -> Self {
        Self::with_renderer(config, VisNetworkRenderer)
    }
}

impl<R: NetworkRenderer> Dashboard<R> {
    pub fn with_renderer(config: Config, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full pass for the page. An empty filter result becomes
    /// [`GraphOutcome::NoData`]; every other error aborts the pass.
    pub fn page(&self, request: &DashboardRequest) -> Result<DashboardPage, DashboardError> {
        let inputs = self.load_inputs()?;
        let options = Self::filter_options(&inputs);

        let outcome = match self.render_inputs(&inputs, request) {
            Ok(graph) => GraphOutcome::Rendered(Box::new(graph)),
            Err(DashboardError::NoDataAfterFilter) => {
                tracing::warn!(?request, "filter matched no rows");
                GraphOutcome::NoData
            }
            Err(e) => return Err(e),
        };

        Ok(DashboardPage {
            options,
            request: request.clone(),
            outcome,
        })
    }

    /// Pass that reports an empty filter result as `NoDataAfterFilter`.
    pub fn render(&self, request: &DashboardRequest) -> Result<RenderedGraph, DashboardError> {
        let inputs = self.load_inputs()?;
        self.render_inputs(&inputs, request)
    }

    /// Load, filter and build without rendering.
    pub fn model(&self, request: &DashboardRequest) -> Result<GraphModel, DashboardError> {
        let inputs = self.load_inputs()?;
        let rows = self.filtered_rows(&inputs, request)?;
        Ok(self.build(&inputs, &rows))
    }

    fn load_inputs(&self) -> Result<Inputs, DashboardError> {
        let data = &self.config.data;
        let columns = &self.config.columns;

        let rows = table::load_rows(&data.relationships, columns)?;
        let properties = data
            .property
            .as_ref()
            .map(|p| PropertyTable::load(p, &columns.property_name, &columns.property_tag))
            .transpose()?;
        let details = data
            .detail
            .as_ref()
            .map(|p| DetailTable::load(p, &columns.detail_key))
            .transpose()?;

        Ok(Inputs {
            rows,
            properties,
            details,
        })
    }

    fn filter_options(inputs: &Inputs) -> FilterOptions {
        let tags = match &inputs.properties {
            Some(properties) => properties.all_tags(),
            None => distinct(inputs.rows.iter().filter_map(|r| r.tag.as_deref())),
        };
        let relations = distinct(inputs.rows.iter().filter_map(|r| r.relation.as_deref()));
        FilterOptions { tags, relations }
    }

    fn filtered_rows(
        &self,
        inputs: &Inputs,
        request: &DashboardRequest,
    ) -> Result<Vec<RelationshipRow>, DashboardError> {
        let policy = self.config.filter.empty_selection;
        let rows = filter::ensure_rows(inputs.rows.clone())?;

        // With a property table the tag filter selects people, otherwise rows.
        let rows = match &inputs.properties {
            Some(_) if request.tags.passes_everything(policy) => rows,
            Some(properties) => {
                let names = properties.names_with_tags(request.tags.values());
                filter::filter_by_node_names(&rows, &names)
            }
            None => filter::filter_by_tag(&rows, &request.tags, policy),
        };
        let rows = filter::filter_by_relation(&rows, &request.relations, policy);

        filter::ensure_rows(rows)
    }

    fn build(&self, inputs: &Inputs, rows: &[RelationshipRow]) -> GraphModel {
        let node_tags = inputs
            .properties
            .as_ref()
            .map(PropertyTable::tag_by_name)
            .unwrap_or_default();
        GraphBuilder::new(&self.config.graph)
            .with_node_tags(node_tags)
            .build(rows)
    }

    fn render_inputs(
        &self,
        inputs: &Inputs,
        request: &DashboardRequest,
    ) -> Result<RenderedGraph, DashboardError> {
        let rows = self.filtered_rows(inputs, request)?;
        let model = self.build(inputs, &rows);

        let html = render_interactive(
            &self.renderer,
            &model,
            &self.config.canvas,
            &self.config.graph.highlight_color,
        )?;
        let details = inputs.details.as_ref().map(|d| d.join(model.node_ids()));

        tracing::info!(
            rows = rows.len(),
            nodes = model.node_count(),
            edges = model.edge_count(),
            "rendered dashboard graph"
        );

        Ok(RenderedGraph {
            legend: model.legend(),
            model,
            html,
            details,
        })
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
