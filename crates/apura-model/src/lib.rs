//! Apura Model - analysis configuration data model
//!
//! The canonical representation of one ad-hoc analysis:
//! - Field descriptors and their value types
//! - Data sources (historic movement, simulation bases)
//! - Grouping / value / filter buckets
//! - Visualization kind and display options
//! - The result model returned by the aggregation collaborator
//!
//! Every operation on [`AnalysisConfiguration`] is copy-on-write: mutation
//! produces a new version, which is what makes history snapshots and the
//! scheduler's change detection cheap and safe.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod result;
pub mod types;

// Re-exports for convenience
pub use config::{AnalysisConfiguration, ExecutionKey};
pub use result::{CellValue, ResultMeta, ResultSet};
pub use types::{
    Aggregation, BaseId, Bucket, DataSource, DisplayOptions, FieldDescriptor, FieldId, FilterField,
    FilterOperator, GroupingField, OptionsPatch, ResultSort, SortDirection, ValueField, ValueType,
    VisualizationType,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the analysis model
    pub use crate::{
        Aggregation, AnalysisConfiguration, Bucket, CellValue, DataSource, FieldDescriptor,
        FieldId, OptionsPatch, ResultSet, ValueType, VisualizationType,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
