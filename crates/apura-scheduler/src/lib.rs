//! Apura Scheduler - auto-execution against the aggregation service
//!
//! Observes configuration versions published by the builder session,
//! debounces them, and keeps the displayed result synchronized:
//! - one dispatch per quiet period, carrying the full current configuration
//! - readiness gate checked at fire time, never earlier
//! - monotonic sequence numbers with a last-applied watermark, so network
//!   reordering can never surface stale rows
//! - auto-execution failures are logged and otherwise invisible

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod client;
pub mod scheduler;

// Re-exports for convenience
pub use client::{AggregationClient, AggregationError};
pub use scheduler::{ExecutionScheduler, SchedulerConfig, SchedulerHandle};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
