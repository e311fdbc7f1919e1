//! Network document rendering and click-handler injection.
//!
//! A [`NetworkRenderer`] turns a [`GraphModel`] into a self-contained HTML
//! document. [`render_interactive`] runs the renderer against a temporary
//! file, reads the document back and injects the click handler immediately
//! before [`INJECTION_MARKER`]. The temporary file lives for one call and is
//! removed on every exit path.

mod vis;

pub use vis::VisNetworkRenderer;

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::config::CanvasConfig;
use crate::error::DashboardError;
use crate::graph::GraphModel;
use crate::interaction::click_handler_script;

/// Text the click handler is inserted in front of.
pub const INJECTION_MARKER: &str = "return network;";

/// Produces an interactive network document.
pub trait NetworkRenderer {
    /// Write the full document for `model` to `out`.
    fn write_document(
        &self,
        model: &GraphModel,
        canvas: &CanvasConfig,
        out: &mut dyn Write,
    ) -> io::Result<()>;
}

/// Render `model` and inject the click handler.
pub fn render_interactive(
    renderer: &dyn NetworkRenderer,
    model: &GraphModel,
    canvas: &CanvasConfig,
    highlight_color: &str,
) -> Result<String, DashboardError> {
    let mut artifact = tempfile::Builder::new()
        .prefix("relgraph-")
        .suffix(".html")
        .tempfile()
        .map_err(|e| DashboardError::io(std::env::temp_dir(), e))?;
    let path = artifact.path().to_path_buf();
    tracing::trace!(path = %path.display(), "writing network document");

    let file = artifact.as_file_mut();
    renderer
        .write_document(model, canvas, &mut *file)
        .and_then(|_| file.flush())
        .map_err(|e| DashboardError::io(&path, e))?;

    let mut html = String::new();
    file.seek(SeekFrom::Start(0))
        .and_then(|_| file.read_to_string(&mut html))
        .map_err(|e| DashboardError::io(&path, e))?;

    inject_click_handler(&html, highlight_color)
}

/// Insert the click handler before the first marker occurrence.
pub fn inject_click_handler(html: &str, highlight_color: &str) -> Result<String, DashboardError> {
    let Some(at) = html.find(INJECTION_MARKER) else {
        return Err(DashboardError::InjectionPointMissing {
            marker: INJECTION_MARKER.to_string(),
        });
    };

    let script = click_handler_script(highlight_color);
    let mut out = String::with_capacity(html.len() + script.len());
    out.push_str(&html[..at]);
    out.push_str(&script);
    out.push_str(&html[at..]);
    Ok(out)
}

/// Substitute `{{KEY}}` placeholders in a single pass over `template`.
///
/// Substituted values are never scanned again. Unknown placeholders are
/// left as they are.
pub fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let found = after.find("}}").and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (end, *value))
        });
        match found {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
