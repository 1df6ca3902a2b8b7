//! Export error kinds
//!
//! Export failures are terminal for that attempt and surfaced to the
//! user; the displayed visualization and the configuration are left
//! completely untouched.

/// Errors raised by an export attempt
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// PNG export with no mounted visualization region
    #[error("no rendered visualization to capture")]
    RenderTargetMissing,

    /// CSV export with zero result rows
    #[error("current result has no rows to export")]
    EmptyData,

    /// The export collaborator could not be reached or failed
    #[error("export request failed: {0}")]
    Network(String),

    /// Rows could not be serialized
    #[error("serialization failed: {0}")]
    Serialize(String),
}

impl From<csv::Error> for ExportError {
    fn from(error: csv::Error) -> Self {
        Self::Serialize(error.to_string())
    }
}
