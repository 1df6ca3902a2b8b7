//! Aggregation collaborator boundary

use apura_model::{AnalysisConfiguration, ResultSet};

/// Errors from the remote aggregation service
///
/// During auto-execution these never reach the user: the scheduler logs
/// them and keeps the previously displayed result.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    /// Transport failure
    #[error("network error: {0}")]
    Network(String),
    /// The collaborator did not answer in time
    #[error("aggregation request timed out")]
    Timeout,
    /// The collaborator refused the configuration
    #[error("aggregation request rejected: {0}")]
    Rejected(String),
}

/// Remote service computing grouped, aggregated rows
///
/// Called exclusively by the execution scheduler with the full current
/// configuration.
#[async_trait::async_trait]
pub trait AggregationClient: Send + Sync {
    /// Execute one analysis configuration
    async fn execute(
        &self,
        configuration: &AnalysisConfiguration,
    ) -> Result<ResultSet, AggregationError>;
}
