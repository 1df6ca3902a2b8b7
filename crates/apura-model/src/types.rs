//! Core types for the analysis model
//!
//! Defines the building blocks of an analysis configuration:
//! - Field identity and descriptors
//! - Data sources (historic movement vs. simulation bases)
//! - Grouping, value, and filter entries
//! - Visualization kinds and display options

use serde::{Deserialize, Serialize};

/// Stable field identifier, unique within a data source's catalog
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Create a field id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of an uploaded simulation base
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseId(String);

impl BaseId {
    /// Create a base id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value domain of a catalog field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Numeric values (amounts, quantities)
    Number,
    /// Free or coded text
    Text,
    /// Calendar dates and periods
    Date,
}

/// Selectable field as listed in a source's catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Stable identifier (drag payloads and bucket keys use this)
    pub id: FieldId,
    /// Technical name in the backing dataset
    pub name: String,
    /// Human-readable label
    pub label: String,
    /// Value domain
    pub value_type: ValueType,
    /// Longer description shown in the catalog tooltip
    pub description: Option<String>,
}

impl FieldDescriptor {
    /// Create a descriptor without a description
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<FieldId>,
        name: impl Into<String>,
        label: impl Into<String>,
        value_type: ValueType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            label: label.into(),
            value_type,
            description: None,
        }
    }

    /// With a catalog description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Backing dataset of an analysis
///
/// Exactly one variant is active per configuration. Switching the source
/// keeps the assembled buckets; fields drawn from the previous source
/// linger until the user replaces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    /// Consolidated historic movement
    Historico,
    /// A user-uploaded simulation base; `base` stays `None` until one is picked
    BaseSimulacao { base: Option<BaseId> },
}

impl DataSource {
    /// Simulation source with no base chosen yet
    #[inline]
    #[must_use]
    pub fn simulacao() -> Self {
        Self::BaseSimulacao { base: None }
    }

    /// Simulation source bound to a concrete base
    #[inline]
    #[must_use]
    pub fn simulacao_on(base: BaseId) -> Self {
        Self::BaseSimulacao { base: Some(base) }
    }

    /// Whether execution has a concrete dataset to run against
    ///
    /// `Historico` always does; `BaseSimulacao` only once a base is chosen.
    #[inline]
    #[must_use]
    pub fn has_concrete_base(&self) -> bool {
        match self {
            Self::Historico => true,
            Self::BaseSimulacao { base } => base.is_some(),
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Historico
    }
}

/// Aggregation applied to a value field within each group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Sum of values
    Sum,
    /// Arithmetic mean
    Average,
    /// Row count
    Count,
}

impl Aggregation {
    /// Insertion-time default for a field's value type
    ///
    /// Numbers default to `Sum`, everything else to `Count`. Computed once
    /// when the field enters the values bucket, never re-derived.
    #[inline]
    #[must_use]
    pub fn default_for(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Number => Self::Sum,
            ValueType::Text | ValueType::Date => Self::Count,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Comparison operator of a filter entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Contains,
}

impl Default for FilterOperator {
    fn default() -> Self {
        Self::Equals
    }
}

/// A pivot dimension: execution groups rows by the ordered combination of
/// all grouping fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingField {
    /// The catalog field
    pub field: FieldDescriptor,
    /// Optional per-dimension ordering
    pub sort_order: Option<SortDirection>,
}

impl GroupingField {
    /// Create an unsorted grouping entry
    #[inline]
    #[must_use]
    pub fn new(field: FieldDescriptor) -> Self {
        Self {
            field,
            sort_order: None,
        }
    }

    /// With a sort direction
    #[inline]
    #[must_use]
    pub fn with_sort(mut self, direction: SortDirection) -> Self {
        self.sort_order = Some(direction);
        self
    }
}

/// A field plus aggregation, projected as a numeric output column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueField {
    /// The catalog field
    pub field: FieldDescriptor,
    /// Aggregation function
    pub aggregation: Aggregation,
    /// Display label override for the output column
    pub label: Option<String>,
}

impl ValueField {
    /// Create a value entry with the insertion-time default aggregation
    #[inline]
    #[must_use]
    pub fn new(field: FieldDescriptor) -> Self {
        let aggregation = Aggregation::default_for(field.value_type);
        Self {
            field,
            aggregation,
            label: None,
        }
    }

    /// With an explicit aggregation
    #[inline]
    #[must_use]
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// With a column label
    #[inline]
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A restriction applied to input rows before aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The catalog field
    pub field: FieldDescriptor,
    /// Comparison operator
    pub operator: FilterOperator,
    /// Literal comparison value
    pub value: String,
    /// Display label override
    pub label: Option<String>,
}

impl FilterField {
    /// Create a filter entry with the insert defaults (`Equals`, empty value)
    #[inline]
    #[must_use]
    pub fn new(field: FieldDescriptor) -> Self {
        Self {
            field,
            operator: FilterOperator::default(),
            value: String::new(),
            label: None,
        }
    }
}

/// Requested rendering kind for the current result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualizationType {
    Line,
    Bar,
    Column,
    Pie,
    Table,
    Kpi,
}

impl Default for VisualizationType {
    fn default() -> Self {
        Self::Table
    }
}

/// Result-level sort applied to the computed rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSort {
    /// Output column to sort by
    pub field: String,
    /// Direction
    pub direction: SortDirection,
}

/// Presentation options; none of these affect what executes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// Show each group as a percentage of the total
    pub show_percent: Option<bool>,
    /// Append a totals row
    pub show_total: Option<bool>,
    /// Keep only the first N groups
    pub top_n: Option<u32>,
    /// Result-level sort
    pub sort: Option<ResultSort>,
}

impl DisplayOptions {
    /// Apply a partial update; `None` fields of the patch leave the current
    /// value untouched
    #[must_use]
    pub fn merged(&self, patch: &OptionsPatch) -> Self {
        Self {
            show_percent: patch.show_percent.or(self.show_percent),
            show_total: patch.show_total.or(self.show_total),
            top_n: patch.top_n.or(self.top_n),
            sort: patch.sort.clone().or_else(|| self.sort.clone()),
        }
    }
}

/// Partial update for [`DisplayOptions`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsPatch {
    pub show_percent: Option<bool>,
    pub show_total: Option<bool>,
    pub top_n: Option<u32>,
    pub sort: Option<ResultSort>,
}

impl OptionsPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the percent toggle
    #[inline]
    #[must_use]
    pub fn show_percent(mut self, on: bool) -> Self {
        self.show_percent = Some(on);
        self
    }

    /// Set the totals-row toggle
    #[inline]
    #[must_use]
    pub fn show_total(mut self, on: bool) -> Self {
        self.show_total = Some(on);
        self
    }

    /// Keep only the first N groups
    #[inline]
    #[must_use]
    pub fn top_n(mut self, n: u32) -> Self {
        self.top_n = Some(n);
        self
    }

    /// Sort the result rows
    #[inline]
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(ResultSort {
            field: field.into(),
            direction,
        });
        self
    }
}

/// Destination bucket of a field assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Pivot dimensions
    Group,
    /// Aggregated output columns
    Values,
    /// Row restrictions
    Filters,
}

impl Bucket {
    /// Resolve a drop-target id as produced by the drag adapters
    ///
    /// Unknown ids resolve to `None`, which the assignment engine treats
    /// as a no-op.
    #[must_use]
    pub fn from_target_id(id: &str) -> Option<Self> {
        match id {
            "group" => Some(Self::Group),
            "values" => Some(Self::Values),
            "filters" => Some(Self::Filters),
            _ => None,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Group => "group",
            Self::Values => "values",
            Self::Filters => "filters",
        };
        write!(f, "{name}")
    }
}
