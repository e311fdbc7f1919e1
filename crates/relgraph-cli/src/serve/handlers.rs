//! HTTP route handlers for the dashboard server.
//!
//! Every request runs its own render pass on the blocking pool. Handlers are
//! kept thin, delegating to `relgraph_core::Dashboard`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use relgraph_core::{DashboardError, InteractionController};

use super::models::{ErrorResponse, FilterQuery, FocusResponse};
use super::templates::{self, PageMode, PageSettings};
use super::AppState;

/// Run a render-pass closure off the async runtime.
async fn run_pass<T, F>(state: Arc<AppState>, pass: F) -> Result<T, DashboardError>
where
    T: Send + 'static,
    F: FnOnce(&AppState) -> Result<T, DashboardError> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || pass(&state)).await {
        Ok(result) => result,
        Err(e) => Err(DashboardError::io(
            "<render task>",
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        )),
    }
}

fn status_for(error: &DashboardError) -> StatusCode {
    match error {
        DashboardError::NoDataAfterFilter => StatusCode::OK,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn kind_of(error: &DashboardError) -> &'static str {
    match error {
        DashboardError::DataUnavailable { .. } => "data_unavailable",
        DashboardError::NoDataAfterFilter => "no_data_after_filter",
        DashboardError::InjectionPointMissing { .. } => "injection_point_missing",
        DashboardError::Io { .. } => "io",
    }
}

fn json_error(status: StatusCode, error: &DashboardError) -> Response {
    let body = ErrorResponse {
        error: error.to_string(),
        kind: kind_of(error),
    };
    (status, Json(body)).into_response()
}

// =============================================================================
// Page Handlers
// =============================================================================

/// GET `/` - Dashboard page.
///
/// Query parameters (repeatable):
/// - `tag`: selected tag
/// - `relation`: selected relation
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let request = FilterQuery::from_pairs(pairs).into_request();
    let title = state.server.title.clone();
    let frame_height = state.server.frame_height;

    match run_pass(state, move |s| s.dashboard.page(&request)).await {
        Ok(page) => {
            let settings = PageSettings {
                title: &title,
                frame_height,
                mode: PageMode::Served,
            };
            Html(templates::render_dashboard_page(&page, &settings)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "render pass failed");
            (status_for(&e), Html(templates::render_error_page(&title, &e.to_string()))).into_response()
        }
    }
}

// =============================================================================
// API Handlers
// =============================================================================

/// GET `/api/graph` - Filtered graph model (nodes with degree/size/color, edges).
pub async fn api_graph(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let request = FilterQuery::from_pairs(pairs).into_request();

    match run_pass(state, move |s| s.dashboard.model(&request)).await {
        Ok(model) => Json(model).into_response(),
        Err(e) => json_error(status_for(&e), &e),
    }
}

/// GET `/api/focus/{id}` - Visible nodes/edges and colors after clicking `id`.
pub async fn api_focus(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let request = FilterQuery::from_pairs(pairs).into_request();

    let result = run_pass(state, move |s| {
        let model = s.dashboard.model(&request)?;
        if !model.contains(&id) {
            return Ok(None);
        }
        let mut controller =
            InteractionController::new(&model, &s.dashboard.config().graph.highlight_color);
        controller.click(Some(id.as_str()));
        Ok(Some(FocusResponse {
            selection: controller.selection().clone(),
            view: controller.view().clone(),
        }))
    })
    .await;

    match result {
        Ok(Some(focus)) => Json(focus).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "node not found".to_string(),
                kind: "not_found",
            }),
        )
            .into_response(),
        Err(e) => json_error(status_for(&e), &e),
    }
}
