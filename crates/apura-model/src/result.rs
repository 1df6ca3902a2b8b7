//! Result model returned by the aggregation collaborator

use serde::{Deserialize, Serialize};

/// One cell of a computed result row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Numeric cell (aggregates, quantities)
    Number(f64),
    /// Textual cell (group keys, labels)
    Text(String),
    /// Missing value
    Empty,
}

impl CellValue {
    /// Render the cell the way exports and tables display it
    ///
    /// Numbers print with no trailing `.0` when integral.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{n:.0}"),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Empty => String::new(),
        }
    }
}

impl From<serde_json::Value> for CellValue {
    /// Decode a cell from the collaborator's JSON wire shape
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Empty, Self::Number),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Bool(b) => Self::Text(b.to_string()),
            serde_json::Value::Null => Self::Empty,
            other => Self::Text(other.to_string()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Metadata carried alongside the computed rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMeta {
    /// Input rows considered before aggregation
    pub total_rows: u64,
}

/// Grouped, aggregated rows as computed by the remote collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Output columns, in display order (grouping fields then value columns)
    pub columns: Vec<String>,
    /// One row per group; cells are positional against `columns`
    pub rows: Vec<Vec<CellValue>>,
    /// Optional metadata
    pub meta: Option<ResultMeta>,
}

impl ResultSet {
    /// Create an empty result with the given columns
    #[inline]
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            meta: None,
        }
    }

    /// Append a row
    #[inline]
    #[must_use]
    pub fn with_row(mut self, row: Vec<CellValue>) -> Self {
        self.rows.push(row);
        self
    }

    /// Attach metadata
    #[inline]
    #[must_use]
    pub fn with_meta(mut self, meta: ResultMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Whether the result carries no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
