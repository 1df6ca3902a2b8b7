//! Export formats

use serde::{Deserialize, Serialize};

/// Requested export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Raster image of the rendered visualization
    Png,
    /// Delimited text built from the current result rows
    Csv,
    /// Server-rendered spreadsheet, recomputed from the configuration
    Xlsx,
}

impl ExportFormat {
    /// File extension, without the dot
    #[inline]
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// MIME type of the produced payload
    #[inline]
    #[must_use]
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Csv => "text/csv",
            Self::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}
