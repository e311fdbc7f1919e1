//! Request and response models for the dashboard server.
//!
//! These are Data Transfer Objects (DTOs) that define the shape of
//! query strings and JSON responses.

use serde::Serialize;

use relgraph_core::interaction::{ClickState, ViewState};
use relgraph_core::{DashboardRequest, Selection};

// =============================================================================
// Filter Query
// =============================================================================

/// Filter selection taken from a query string such as `?tag=a&tag=b&relation=friend`.
///
/// Built from raw key/value pairs because the same key repeats once per
/// selected value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub tags: Vec<String>,
    pub relations: Vec<String>,
}

impl FilterQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "tag" => query.tags.push(value),
                "relation" => query.relations.push(value),
                _ => {}
            }
        }
        query
    }

    pub fn into_request(self) -> DashboardRequest {
        DashboardRequest {
            tags: Selection::new(self.tags),
            relations: Selection::new(self.relations),
        }
    }
}

// =============================================================================
// Focus Model (for `/api/focus/{id}`)
// =============================================================================

/// Drawing state after clicking one node.
#[derive(Debug, Serialize)]
pub struct FocusResponse {
    pub selection: ClickState,
    pub view: ViewState,
}

// =============================================================================
// Errors
// =============================================================================

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}
