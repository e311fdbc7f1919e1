//! Local web server for the relationship dashboard.
//!
//! Serves the dashboard page (filter sidebar, interactive network, relation
//! legend, entity details) and a small JSON API over the same render pass.
//!
//! # Module Structure
//!
//! - `handlers` - HTTP route handlers
//! - `models` - query and response types (DTOs)
//! - `templates` - HTML/CSS template rendering

mod handlers;
mod models;
pub mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use relgraph_core::config::ServerConfig;
use relgraph_core::{Config, Dashboard};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state for the server. Read-only after start.
pub struct AppState {
    /// Runs one render pass per request.
    pub dashboard: Dashboard,
    /// Page settings.
    pub server: ServerConfig,
}

// =============================================================================
// Server Entry Point
// =============================================================================

/// Build the router with all routes.
pub fn router(config: Config) -> Router {
    let state = Arc::new(AppState {
        server: config.server.clone(),
        dashboard: Dashboard::new(config),
    });

    Router::new()
        // Dashboard page
        .route("/", get(handlers::index))
        // API endpoints
        .route("/api/graph", get(handlers::api_graph))
        .route("/api/focus/{id}", get(handlers::api_focus))
        // CORS for API access
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Start the dashboard server.
pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let port = config.server.port;
    let open_browser = config.server.open_browser;
    let app = router(config);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let url = format!("http://localhost:{}", port);

    tracing::info!(%url, "dashboard server listening");
    println!("Dashboard: {}", url);
    println!("Press Ctrl+C to stop\n");

    if open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
