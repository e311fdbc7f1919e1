//! Graph construction.
//!
//! Converts relationship rows into a deduplicated node set and an edge list
//! with visual attributes (degree-based size, palette colors, weight width).

mod builder;
mod model;

pub use builder::GraphBuilder;
pub use model::{Edge, GraphModel, LegendEntry, Node};
