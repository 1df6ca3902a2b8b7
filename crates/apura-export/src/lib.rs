//! Apura Export - finishing an analysis as a file
//!
//! Routes a finish action to one of three strategies:
//! - `png`: rasterize the mounted visualization region
//! - `csv`: serialize the current result rows (byte-order mark, quoted
//!   fields where needed)
//! - `xlsx`: ship the configuration to the remote renderer, which
//!   recomputes server-side
//!
//! All strategies name their file `<slug>_<timestamp>.<ext>`.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod clients;
pub mod delimited;
pub mod dispatcher;
pub mod error;
pub mod filename;
pub mod format;

// Re-exports for convenience
pub use clients::{RenderTarget, SpreadsheetClient};
pub use delimited::write_csv;
pub use dispatcher::{ExportArtifact, ExportDispatcher};
pub use error::ExportError;
pub use filename::{export_file_name, slug};
pub use format::ExportFormat;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
