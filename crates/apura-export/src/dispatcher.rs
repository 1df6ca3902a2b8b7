//! The export dispatcher
//!
//! Routes a finish action to one of three strategies: raster image of the
//! rendered visualization, delimited text from the current result rows,
//! or a server-rendered spreadsheet recomputed from the configuration.

use crate::clients::{RenderTarget, SpreadsheetClient};
use crate::delimited::write_csv;
use crate::error::ExportError;
use crate::filename::export_file_name;
use crate::format::ExportFormat;
use apura_model::{AnalysisConfiguration, ResultSet};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A finished export: filename, media type, payload
///
/// Actually saving the file is the embedding UI's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Deterministic `<slug>_<timestamp>.<ext>` name
    pub file_name: String,
    /// MIME type of `bytes`
    pub media_type: &'static str,
    /// The produced file
    pub bytes: Vec<u8>,
}

/// Routes export requests to the right strategy
pub struct ExportDispatcher {
    render_target: Option<Arc<dyn RenderTarget>>,
    spreadsheet: Arc<dyn SpreadsheetClient>,
}

impl ExportDispatcher {
    /// Dispatcher with no mounted visualization region
    #[inline]
    #[must_use]
    pub fn new(spreadsheet: Arc<dyn SpreadsheetClient>) -> Self {
        Self {
            render_target: None,
            spreadsheet,
        }
    }

    /// Attach the mounted visualization region
    #[inline]
    #[must_use]
    pub fn with_render_target(mut self, target: Arc<dyn RenderTarget>) -> Self {
        self.render_target = Some(target);
        self
    }

    /// Run one export attempt
    ///
    /// A failure is terminal for this attempt and leaves the displayed
    /// result and the configuration untouched; there are no retries.
    pub async fn export(
        &self,
        format: ExportFormat,
        configuration: &AnalysisConfiguration,
        result: Option<&ResultSet>,
        at: DateTime<Utc>,
    ) -> Result<ExportArtifact, ExportError> {
        tracing::debug!(%format, analysis = %configuration.name, "export requested");
        let bytes = match format {
            ExportFormat::Png => {
                let target = self
                    .render_target
                    .as_ref()
                    .ok_or(ExportError::RenderTargetMissing)?;
                target.rasterize()?
            }
            ExportFormat::Csv => {
                let rows = result.ok_or(ExportError::EmptyData)?;
                write_csv(rows)?
            }
            ExportFormat::Xlsx => self.spreadsheet.export(configuration).await?,
        };

        Ok(ExportArtifact {
            file_name: export_file_name(&configuration.name, format, at),
            media_type: format.media_type(),
            bytes,
        })
    }

    /// Run one export attempt stamped with the current time
    pub async fn export_now(
        &self,
        format: ExportFormat,
        configuration: &AnalysisConfiguration,
        result: Option<&ResultSet>,
    ) -> Result<ExportArtifact, ExportError> {
        self.export(format, configuration, result, Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apura_model::CellValue;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct FixedSpreadsheet(Vec<u8>);

    #[async_trait::async_trait]
    impl SpreadsheetClient for FixedSpreadsheet {
        async fn export(
            &self,
            _configuration: &AnalysisConfiguration,
        ) -> Result<Vec<u8>, ExportError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSpreadsheet;

    #[async_trait::async_trait]
    impl SpreadsheetClient for FailingSpreadsheet {
        async fn export(
            &self,
            _configuration: &AnalysisConfiguration,
        ) -> Result<Vec<u8>, ExportError> {
            Err(ExportError::Network("gateway unavailable".into()))
        }
    }

    struct RecordingRenderTarget {
        captures: Mutex<usize>,
    }

    impl RenderTarget for RecordingRenderTarget {
        fn rasterize(&self) -> Result<Vec<u8>, ExportError> {
            *self.captures.lock().unwrap() += 1;
            Ok(vec![0x89, b'P', b'N', b'G'])
        }
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 31, 12, 0, 0).unwrap()
    }

    fn config() -> AnalysisConfiguration {
        AnalysisConfiguration::new("Análise CBS")
    }

    fn one_row() -> ResultSet {
        ResultSet::new(vec!["mes".into()]).with_row(vec![CellValue::Text("jan".into())])
    }

    #[tokio::test]
    async fn png_without_a_mounted_region_fails() {
        let dispatcher = ExportDispatcher::new(Arc::new(FixedSpreadsheet(vec![1])));
        let outcome = dispatcher
            .export(ExportFormat::Png, &config(), Some(&one_row()), stamp())
            .await;
        assert!(matches!(outcome, Err(ExportError::RenderTargetMissing)));
    }

    #[tokio::test]
    async fn png_captures_the_mounted_region() {
        let target = Arc::new(RecordingRenderTarget {
            captures: Mutex::new(0),
        });
        let dispatcher = ExportDispatcher::new(Arc::new(FixedSpreadsheet(vec![1])))
            .with_render_target(Arc::clone(&target) as Arc<dyn RenderTarget>);

        let artifact = dispatcher
            .export(ExportFormat::Png, &config(), None, stamp())
            .await
            .unwrap();

        assert_eq!(*target.captures.lock().unwrap(), 1);
        assert_eq!(artifact.media_type, "image/png");
        assert_eq!(artifact.file_name, "analise_cbs_20260131_120000.png");
    }

    #[tokio::test]
    async fn csv_without_rows_fails_with_empty_data() {
        let dispatcher = ExportDispatcher::new(Arc::new(FixedSpreadsheet(vec![1])));

        let missing = dispatcher
            .export(ExportFormat::Csv, &config(), None, stamp())
            .await;
        assert!(matches!(missing, Err(ExportError::EmptyData)));

        let empty = ResultSet::new(vec!["mes".into()]);
        let zero_rows = dispatcher
            .export(ExportFormat::Csv, &config(), Some(&empty), stamp())
            .await;
        assert!(matches!(zero_rows, Err(ExportError::EmptyData)));
    }

    #[tokio::test]
    async fn csv_uses_the_current_result_rows() {
        let dispatcher = ExportDispatcher::new(Arc::new(FixedSpreadsheet(vec![1])));
        let artifact = dispatcher
            .export(ExportFormat::Csv, &config(), Some(&one_row()), stamp())
            .await
            .unwrap();

        assert_eq!(artifact.media_type, "text/csv");
        assert!(artifact.bytes.starts_with(b"\xEF\xBB\xBF"));
        assert_eq!(artifact.file_name, "analise_cbs_20260131_120000.csv");
    }

    #[tokio::test]
    async fn xlsx_sends_the_configuration_to_the_collaborator() {
        let dispatcher = ExportDispatcher::new(Arc::new(FixedSpreadsheet(vec![0x50, 0x4B])));
        let artifact = dispatcher
            .export(ExportFormat::Xlsx, &config(), None, stamp())
            .await
            .unwrap();

        assert_eq!(artifact.bytes, vec![0x50, 0x4B]);
        assert_eq!(artifact.file_name, "analise_cbs_20260131_120000.xlsx");
    }

    #[tokio::test]
    async fn xlsx_collaborator_failure_surfaces_as_network_error() {
        let dispatcher = ExportDispatcher::new(Arc::new(FailingSpreadsheet));
        let outcome = dispatcher
            .export(ExportFormat::Xlsx, &config(), None, stamp())
            .await;
        assert!(matches!(outcome, Err(ExportError::Network(_))));
    }
}
