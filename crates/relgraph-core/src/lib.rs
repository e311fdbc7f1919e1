pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod graph;
pub mod interaction;
pub mod render;
pub mod table;

pub use config::{Config, ConfigError, GraphConfig};
pub use dashboard::{Dashboard, DashboardPage, DashboardRequest, FilterOptions, GraphOutcome, RenderedGraph};
pub use error::DashboardError;
pub use filter::{EmptySelection, Selection};
pub use graph::{GraphBuilder, GraphModel};
pub use interaction::InteractionController;
pub use render::{NetworkRenderer, VisNetworkRenderer};
pub use table::RelationshipRow;
