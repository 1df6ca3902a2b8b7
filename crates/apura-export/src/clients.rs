//! Export collaborator boundaries

use crate::error::ExportError;
use apura_model::AnalysisConfiguration;

/// The mounted visualization region, as seen by PNG export
///
/// Implemented by the embedding UI. Absent or unmounted regions make the
/// dispatcher fail with [`ExportError::RenderTargetMissing`].
pub trait RenderTarget: Send + Sync {
    /// Rasterize the currently rendered visualization to PNG bytes
    fn rasterize(&self) -> Result<Vec<u8>, ExportError>;
}

/// Remote spreadsheet renderer
///
/// Receives the full configuration and recomputes server-side; the rows
/// already displayed in the builder are deliberately not reused.
#[async_trait::async_trait]
pub trait SpreadsheetClient: Send + Sync {
    /// Render the configuration as a spreadsheet, returning the binary payload
    async fn export(&self, configuration: &AnalysisConfiguration) -> Result<Vec<u8>, ExportError>;
}
