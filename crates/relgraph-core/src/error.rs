use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a render pass.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Input table missing, unreadable or malformed. Fatal for the pass.
    #[error("Data unavailable at {}: {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// The filter left no rows to draw. Reported as a warning.
    #[error("No rows match the selected filter")]
    NoDataAfterFilter,

    /// The rendered document no longer contains the script marker.
    #[error("Injection marker '{marker}' not found in generated document")]
    InjectionPointMissing { marker: String },

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DashboardError {
    pub fn data_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        DashboardError::DataUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DashboardError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the pass should end with a warning rather than an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, DashboardError::NoDataAfterFilter)
    }
}
