//! Simulation base listing collaborator
//!
//! Read-only boundary: when the data source is a simulation base, the
//! catalog UI lists the uploaded bases so the user can pick one. Only
//! bases that finished processing are selectable.

use apura_model::BaseId;
use serde::{Deserialize, Serialize};

/// Processing status of an uploaded base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseStatus {
    /// Ingested and queryable
    Ready,
    /// Still being ingested
    Processing,
    /// Ingestion failed
    Failed,
}

/// One uploaded simulation base as listed by the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseSummary {
    /// Stable identifier, referenced by `DataSource::BaseSimulacao`
    pub id: BaseId,
    /// Upload name
    pub name: String,
    /// Ingested row count
    pub total_rows: u64,
    /// Processing status
    pub status: BaseStatus,
}

/// Errors crossing a read-only collaborator boundary
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    /// Transport failure
    #[error("network error: {0}")]
    Network(String),
    /// Payload could not be decoded
    #[error("decode error: {0}")]
    Decode(String),
}

/// Remote directory of uploaded simulation bases
#[async_trait::async_trait]
pub trait BaseDirectory: Send + Sync {
    /// List every uploaded base, regardless of status
    async fn list_bases(&self) -> Result<Vec<BaseSummary>, CollaboratorError>;
}

/// List the bases a user may actually select
///
/// Filters the directory listing down to `Ready` bases.
pub async fn ready_bases(
    directory: &dyn BaseDirectory,
) -> Result<Vec<BaseSummary>, CollaboratorError> {
    let bases = directory.list_bases().await?;
    Ok(bases
        .into_iter()
        .filter(|b| b.status == BaseStatus::Ready)
        .collect())
}
