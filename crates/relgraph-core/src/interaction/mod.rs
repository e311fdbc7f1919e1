//! Click-to-highlight interaction.
//!
//! Two states: nothing selected, or one node selected. Selecting a node
//! highlights it, keeps its direct neighbors at their original colors and
//! hides everything else. Clicking empty canvas restores the original view.
//!
//! - `controller` - the state machine over a [`crate::graph::GraphModel`]
//! - `script` - the same behavior as browser script for the rendered page

mod controller;
mod script;

pub use controller::{
    ClickState, EdgePatch, InteractionController, NodeColor, NodePatch, NodeView, ViewState,
    ViewUpdate,
};
pub use script::click_handler_script;
