//! The analysis configuration and its operations
//!
//! [`AnalysisConfiguration`] is the unit of mutation, history, and
//! execution. Every operation is pure: it takes `&self` and returns a new
//! version, leaving the previous one intact for history snapshots.

use crate::types::{
    Aggregation, Bucket, DataSource, DisplayOptions, FieldDescriptor, FilterField, FilterOperator,
    GroupingField, OptionsPatch, SortDirection, ValueField, VisualizationType,
};
use serde::{Deserialize, Serialize};

/// One assembled analysis: source, buckets, visualization, options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfiguration {
    /// Display name (templates are named; exports slug this)
    pub name: String,
    /// Backing dataset
    pub data_source: DataSource,
    /// Pivot dimensions, ordered
    pub grouping: Vec<GroupingField>,
    /// Aggregated output columns, ordered
    pub values: Vec<ValueField>,
    /// Row restrictions, ordered
    pub filters: Vec<FilterField>,
    /// Requested rendering kind
    pub visualization: VisualizationType,
    /// Presentation options
    pub options: DisplayOptions,
}

impl AnalysisConfiguration {
    /// Create an empty configuration over the historic source
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_source: DataSource::Historico,
            grouping: Vec::new(),
            values: Vec::new(),
            filters: Vec::new(),
            visualization: VisualizationType::default(),
            options: DisplayOptions::default(),
        }
    }

    /// Add a field to a bucket
    ///
    /// Group and filter buckets are sets keyed by field id: adding a field
    /// already present there returns the configuration unchanged. The
    /// values bucket always appends, with the aggregation defaulted from
    /// the field's value type at insertion time. Freshly added filters get
    /// `Equals` and an empty comparison value.
    #[must_use]
    pub fn add_field(&self, field: FieldDescriptor, bucket: Bucket) -> Self {
        let mut next = self.clone();
        match bucket {
            Bucket::Group => {
                if !next.grouping.iter().any(|g| g.field.id == field.id) {
                    next.grouping.push(GroupingField::new(field));
                }
            }
            Bucket::Values => {
                next.values.push(ValueField::new(field));
            }
            Bucket::Filters => {
                if !next.filters.iter().any(|f| f.field.id == field.id) {
                    next.filters.push(FilterField::new(field));
                }
            }
        }
        next
    }

    /// Remove the entry at `index` from a bucket; out-of-range is a no-op
    #[must_use]
    pub fn remove_field(&self, bucket: Bucket, index: usize) -> Self {
        let mut next = self.clone();
        match bucket {
            Bucket::Group => {
                if index < next.grouping.len() {
                    next.grouping.remove(index);
                }
            }
            Bucket::Values => {
                if index < next.values.len() {
                    next.values.remove(index);
                }
            }
            Bucket::Filters => {
                if index < next.filters.len() {
                    next.filters.remove(index);
                }
            }
        }
        next
    }

    /// Move an entry within a bucket; `to` is clamped into range and an
    /// out-of-range `from` is a no-op
    #[must_use]
    pub fn reorder_field(&self, bucket: Bucket, from: usize, to: usize) -> Self {
        fn shift<T>(entries: &mut Vec<T>, from: usize, to: usize) {
            if from >= entries.len() {
                return;
            }
            let entry = entries.remove(from);
            let to = to.min(entries.len());
            entries.insert(to, entry);
        }

        let mut next = self.clone();
        match bucket {
            Bucket::Group => shift(&mut next.grouping, from, to),
            Bucket::Values => shift(&mut next.values, from, to),
            Bucket::Filters => shift(&mut next.filters, from, to),
        }
        next
    }

    /// Shallow-merge a patch into the display options
    #[must_use]
    pub fn set_options(&self, patch: &OptionsPatch) -> Self {
        let mut next = self.clone();
        next.options = self.options.merged(patch);
        next
    }

    /// Switch the backing data source
    ///
    /// Assembled buckets are kept as-is: fields drawn from the previous
    /// source linger until the user replaces them.
    #[must_use]
    pub fn set_data_source(&self, source: DataSource) -> Self {
        let mut next = self.clone();
        next.data_source = source;
        next
    }

    /// Change the requested visualization
    #[must_use]
    pub fn set_visualization(&self, visualization: VisualizationType) -> Self {
        let mut next = self.clone();
        next.visualization = visualization;
        next
    }

    /// Override the aggregation of the value entry at `index`
    #[must_use]
    pub fn set_value_aggregation(&self, index: usize, aggregation: Aggregation) -> Self {
        let mut next = self.clone();
        if let Some(entry) = next.values.get_mut(index) {
            entry.aggregation = aggregation;
        }
        next
    }

    /// Override the column label of the value entry at `index`
    #[must_use]
    pub fn set_value_label(&self, index: usize, label: impl Into<String>) -> Self {
        let mut next = self.clone();
        if let Some(entry) = next.values.get_mut(index) {
            entry.label = Some(label.into());
        }
        next
    }

    /// Edit the filter entry at `index`
    #[must_use]
    pub fn set_filter(&self, index: usize, operator: FilterOperator, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        if let Some(entry) = next.filters.get_mut(index) {
            entry.operator = operator;
            entry.value = value.into();
        }
        next
    }

    /// Set the sort direction of the grouping entry at `index`
    #[must_use]
    pub fn set_grouping_sort(&self, index: usize, direction: SortDirection) -> Self {
        let mut next = self.clone();
        if let Some(entry) = next.grouping.get_mut(index) {
            entry.sort_order = Some(direction);
        }
        next
    }

    /// Rename the analysis
    #[must_use]
    pub fn rename(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.name = name.into();
        next
    }

    /// Execution-readiness gate
    ///
    /// Eligible iff at least one value field is assigned and the source has
    /// a concrete dataset (a simulation source needs a chosen base).
    #[inline]
    #[must_use]
    pub fn ready_for_execution(&self) -> bool {
        !self.values.is_empty() && self.data_source.has_concrete_base()
    }

    /// The execution-relevant projection of this configuration
    ///
    /// Only a change to this projection restarts the scheduler's debounce
    /// window; display options are deliberately excluded.
    #[must_use]
    pub fn execution_key(&self) -> ExecutionKey {
        ExecutionKey {
            data_source: self.data_source.clone(),
            grouping: self.grouping.clone(),
            values: self.values.clone(),
            filters: self.filters.clone(),
            visualization: self.visualization,
        }
    }
}

impl Default for AnalysisConfiguration {
    fn default() -> Self {
        Self::new("Nova análise")
    }
}

/// Execution-relevant projection of a configuration
///
/// Equality over this projection decides whether the scheduler sees a
/// change worth re-executing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionKey {
    data_source: DataSource,
    grouping: Vec<GroupingField>,
    values: Vec<ValueField>,
    filters: Vec<FilterField>,
    visualization: VisualizationType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueType;
    use pretty_assertions::assert_eq;

    fn month() -> FieldDescriptor {
        FieldDescriptor::new("mes", "mes", "Mês", ValueType::Date)
    }

    fn cbs() -> FieldDescriptor {
        FieldDescriptor::new("valor_cbs", "valorCBS", "Valor CBS", ValueType::Number)
    }

    fn uf() -> FieldDescriptor {
        FieldDescriptor::new("uf", "uf", "UF", ValueType::Text)
    }

    #[test]
    fn group_bucket_is_a_set_keyed_by_field_id() {
        let config = AnalysisConfiguration::new("t")
            .add_field(month(), Bucket::Group)
            .add_field(month(), Bucket::Group);
        assert_eq!(config.grouping.len(), 1);
    }

    #[test]
    fn filter_bucket_is_a_set_keyed_by_field_id() {
        let config = AnalysisConfiguration::new("t")
            .add_field(uf(), Bucket::Filters)
            .add_field(uf(), Bucket::Filters);
        assert_eq!(config.filters.len(), 1);
    }

    #[test]
    fn values_bucket_allows_repeated_fields() {
        let config = AnalysisConfiguration::new("t")
            .add_field(cbs(), Bucket::Values)
            .add_field(cbs(), Bucket::Values);
        assert_eq!(config.values.len(), 2);
        assert_eq!(config.values[0].aggregation, Aggregation::Sum);
    }

    #[test]
    fn text_field_in_values_defaults_to_count() {
        let config = AnalysisConfiguration::new("t").add_field(uf(), Bucket::Values);
        assert_eq!(config.values[0].aggregation, Aggregation::Count);
    }

    #[test]
    fn operations_leave_the_previous_version_untouched() {
        let before = AnalysisConfiguration::new("t");
        let after = before.add_field(month(), Bucket::Group);
        assert!(before.grouping.is_empty());
        assert_eq!(after.grouping.len(), 1);
    }

    #[test]
    fn remove_out_of_range_is_a_no_op() {
        let config = AnalysisConfiguration::new("t").add_field(month(), Bucket::Group);
        let after = config.remove_field(Bucket::Group, 5);
        assert_eq!(after, config);
    }

    #[test]
    fn reorder_moves_and_clamps() {
        let config = AnalysisConfiguration::new("t")
            .add_field(month(), Bucket::Group)
            .add_field(uf(), Bucket::Group);
        let swapped = config.reorder_field(Bucket::Group, 0, 1);
        assert_eq!(swapped.grouping[0].field.id.as_str(), "uf");
        assert_eq!(swapped.grouping[1].field.id.as_str(), "mes");

        // target past the end lands at the end
        let clamped = config.reorder_field(Bucket::Group, 0, 99);
        assert_eq!(clamped.grouping[1].field.id.as_str(), "mes");
    }

    #[test]
    fn switching_source_keeps_assembled_buckets() {
        let config = AnalysisConfiguration::new("t")
            .add_field(month(), Bucket::Group)
            .add_field(cbs(), Bucket::Values)
            .set_data_source(DataSource::simulacao());
        assert_eq!(config.grouping.len(), 1);
        assert_eq!(config.values.len(), 1);
    }

    #[test]
    fn gate_requires_values_and_concrete_base() {
        let empty = AnalysisConfiguration::new("t");
        assert!(!empty.ready_for_execution());

        let with_value = empty.add_field(cbs(), Bucket::Values);
        assert!(with_value.ready_for_execution());

        // simulation source without a chosen base keeps the gate closed
        let unbased = with_value.set_data_source(DataSource::simulacao());
        assert!(!unbased.ready_for_execution());

        let based = unbased.set_data_source(DataSource::simulacao_on(crate::types::BaseId::new("b1")));
        assert!(based.ready_for_execution());
    }

    #[test]
    fn execution_key_ignores_display_options() {
        let config = AnalysisConfiguration::new("t").add_field(cbs(), Bucket::Values);
        let with_options = config.set_options(&OptionsPatch::new().show_total(true));
        assert_eq!(config.execution_key(), with_options.execution_key());

        let with_viz = config.set_visualization(VisualizationType::Pie);
        assert_ne!(config.execution_key(), with_viz.execution_key());
    }

    #[test]
    fn rename_does_not_change_execution_key() {
        let config = AnalysisConfiguration::new("t").add_field(cbs(), Bucket::Values);
        let renamed = config.rename("outro nome");
        assert_eq!(config.execution_key(), renamed.execution_key());
    }
}
