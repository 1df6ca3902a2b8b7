//! Apura Catalog - field catalogs and session presets
//!
//! Static, per-source registries feeding the builder:
//! - Selectable field tables with stable ids ([`fields_for`])
//! - Case-insensitive catalog search ([`filter_fields`])
//! - The read-only simulation-base directory boundary
//! - Named preset configurations for new sessions

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod bases;
pub mod catalog;
pub mod templates;

// Re-exports for convenience
pub use bases::{ready_bases, BaseDirectory, BaseStatus, BaseSummary, CollaboratorError};
pub use catalog::{fields_for, filter_fields};
pub use templates::{template, templates, AnalysisTemplate};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
