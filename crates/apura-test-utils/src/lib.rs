//! Testing utilities for the apura workspace
//!
//! Shared fixtures and scripted collaborator doubles. The scripted
//! aggregation client drives the scheduler's debounce and out-of-order
//! tests under a paused tokio clock.

#![allow(missing_docs)]

use apura_catalog::{BaseDirectory, BaseStatus, BaseSummary, CollaboratorError};
use apura_export::{ExportError, RenderTarget, SpreadsheetClient};
use apura_model::{
    AnalysisConfiguration, BaseId, Bucket, CellValue, FieldDescriptor, ResultSet, SortDirection,
    ValueType, VisualizationType,
};
use apura_scheduler::{AggregationClient, AggregationError};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

/// Canonical numeric field
pub fn cbs_field() -> FieldDescriptor {
    FieldDescriptor::new("valor_cbs", "valorCBS", "Valor CBS", ValueType::Number)
}

/// Canonical date field
pub fn month_field() -> FieldDescriptor {
    FieldDescriptor::new("mes", "mes", "Mês", ValueType::Date)
}

/// Canonical text field
pub fn uf_field() -> FieldDescriptor {
    FieldDescriptor::new("uf", "uf", "UF", ValueType::Text)
}

/// Monthly-total configuration that passes the execution gate
pub fn executable_configuration() -> AnalysisConfiguration {
    AnalysisConfiguration::new("CBS mensal")
        .add_field(month_field(), Bucket::Group)
        .set_grouping_sort(0, SortDirection::Asc)
        .add_field(cbs_field(), Bucket::Values)
        .set_value_label(0, "Total CBS")
        .set_visualization(VisualizationType::Line)
}

/// Result with `rows` monthly rows and a single aggregate column
pub fn sample_result(rows: usize) -> ResultSet {
    let mut result = ResultSet::new(vec!["mes".into(), "Total CBS".into()]);
    for i in 0..rows {
        result = result.with_row(vec![
            CellValue::Text(format!("2026-{:02}", i + 1)),
            CellValue::Number((i as f64 + 1.0) * 100.0),
        ]);
    }
    result
}

/// One canned aggregation reply with an artificial latency
pub struct ScriptedResponse {
    delay: Duration,
    outcome: Result<ResultSet, AggregationError>,
}

impl ScriptedResponse {
    pub fn ok_after(delay: Duration, result: ResultSet) -> Self {
        Self {
            delay,
            outcome: Ok(result),
        }
    }

    pub fn err_after(delay: Duration, error: AggregationError) -> Self {
        Self {
            delay,
            outcome: Err(error),
        }
    }
}

/// Aggregation double: replays a script of canned replies and records
/// every configuration it was called with
#[derive(Default)]
pub struct ScriptedAggregationClient {
    script: Mutex<VecDeque<ScriptedResponse>>,
    fallback: Option<ResultSet>,
    calls: Mutex<Vec<AnalysisConfiguration>>,
}

impl ScriptedAggregationClient {
    /// Answer every call instantly with a clone of `result`
    pub fn always(result: ResultSet) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(result),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replay `responses` in order; exhausted scripts answer with an
    /// instant empty result
    pub fn scripted(responses: Vec<ScriptedResponse>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            fallback: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every configuration dispatched so far, in call order
    pub fn calls(&self) -> Vec<AnalysisConfiguration> {
        self.calls.lock().clone()
    }
}

#[async_trait::async_trait]
impl AggregationClient for ScriptedAggregationClient {
    async fn execute(
        &self,
        configuration: &AnalysisConfiguration,
    ) -> Result<ResultSet, AggregationError> {
        self.calls.lock().push(configuration.clone());
        let next = self.script.lock().pop_front();
        match next {
            Some(response) => {
                if !response.delay.is_zero() {
                    tokio::time::sleep(response.delay).await;
                }
                response.outcome
            }
            None => Ok(self.fallback.clone().unwrap_or_default()),
        }
    }
}

/// Base directory double over a fixed listing
pub struct StaticBaseDirectory(pub Vec<BaseSummary>);

impl StaticBaseDirectory {
    /// Directory with one ready and one still-processing base
    pub fn with_sample_bases() -> Self {
        Self(vec![
            BaseSummary {
                id: BaseId::new("base-2026"),
                name: "Base 2026".into(),
                total_rows: 250_000,
                status: BaseStatus::Ready,
            },
            BaseSummary {
                id: BaseId::new("base-importando"),
                name: "Base em importação".into(),
                total_rows: 0,
                status: BaseStatus::Processing,
            },
        ])
    }
}

#[async_trait::async_trait]
impl BaseDirectory for StaticBaseDirectory {
    async fn list_bases(&self) -> Result<Vec<BaseSummary>, CollaboratorError> {
        Ok(self.0.clone())
    }
}

/// Spreadsheet double: records the exported configurations
#[derive(Default)]
pub struct RecordingSpreadsheetClient {
    payload: Vec<u8>,
    calls: Mutex<Vec<AnalysisConfiguration>>,
}

impl RecordingSpreadsheetClient {
    pub fn with_payload(payload: Vec<u8>) -> Self {
        Self {
            payload,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<AnalysisConfiguration> {
        self.calls.lock().clone()
    }
}

#[async_trait::async_trait]
impl SpreadsheetClient for RecordingSpreadsheetClient {
    async fn export(&self, configuration: &AnalysisConfiguration) -> Result<Vec<u8>, ExportError> {
        self.calls.lock().push(configuration.clone());
        Ok(self.payload.clone())
    }
}

/// Render-target double returning a fixed byte payload
pub struct FixedRenderTarget(pub Vec<u8>);

impl RenderTarget for FixedRenderTarget {
    fn rasterize(&self) -> Result<Vec<u8>, ExportError> {
        Ok(self.0.clone())
    }
}
