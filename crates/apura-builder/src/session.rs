//! The builder session: owned page state with an explicit lifecycle
//!
//! One session exists per open builder page. It owns the single active
//! configuration, the undo/redo history, and the catalog search/selection
//! state, and publishes every configuration version over a watch channel
//! the execution scheduler subscribes to. Never a global: `init` on mount,
//! `dispose` on unmount.

use crate::history::History;
use crate::input::{BuilderInput, FocusContext, KeyStroke};
use crate::selection::CatalogSelection;
use apura_catalog::{fields_for, filter_fields, template};
use apura_model::{
    Aggregation, AnalysisConfiguration, Bucket, DataSource, FieldDescriptor, FilterOperator,
    OptionsPatch, SortDirection, VisualizationType,
};
use tokio::sync::watch;

/// Session start-up parameters
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    template: Option<String>,
}

impl SessionConfig {
    /// Start from an empty configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fill from a named template; unknown ids fall back to empty
    #[inline]
    #[must_use]
    pub fn with_template(mut self, id: impl Into<String>) -> Self {
        self.template = Some(id.into());
        self
    }
}

/// One open builder page: configuration, history, catalog state
#[derive(Debug)]
pub struct BuilderSession {
    config: AnalysisConfiguration,
    history: History,
    search: String,
    selection: CatalogSelection,
    config_tx: watch::Sender<AnalysisConfiguration>,
}

impl BuilderSession {
    /// Mount a session, empty or pre-filled from a template
    #[must_use]
    pub fn init(session_config: SessionConfig) -> Self {
        let config = session_config
            .template
            .as_deref()
            .and_then(template)
            .map(|t| t.configuration.clone())
            .unwrap_or_default();

        let catalog_len = fields_for(&config.data_source).len();
        let (config_tx, _) = watch::channel(config.clone());

        Self {
            config,
            history: History::new(),
            search: String::new(),
            selection: CatalogSelection::for_list(catalog_len),
            config_tx,
        }
    }

    /// Subscribe to configuration versions (the scheduler's input)
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AnalysisConfiguration> {
        self.config_tx.subscribe()
    }

    /// The active configuration
    #[inline]
    #[must_use]
    pub fn configuration(&self) -> &AnalysisConfiguration {
        &self.config
    }

    /// Undo/redo state
    #[inline]
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The catalog list as currently filtered by the search box
    #[must_use]
    pub fn filtered_catalog(&self) -> Vec<&'static FieldDescriptor> {
        filter_fields(fields_for(&self.config.data_source), &self.search)
    }

    /// Index of the keyboard selection within the filtered list
    #[inline]
    #[must_use]
    pub fn selection_index(&self) -> Option<usize> {
        self.selection.index()
    }

    /// The field the keyboard selection points at
    #[must_use]
    pub fn selected_field(&self) -> Option<&'static FieldDescriptor> {
        let index = self.selection.index()?;
        self.filtered_catalog().get(index).copied()
    }

    /// Update the catalog search text; the selection resets with the list
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        let len = self.filtered_catalog().len();
        self.selection.reset(len);
    }

    /// Resolve one builder input
    ///
    /// Returns `true` when the input resolved into a field assignment.
    /// Selection movement and suppressed keystrokes return `false`.
    pub fn handle(&mut self, input: BuilderInput) -> bool {
        match input {
            BuilderInput::Drop { field, target } => match target {
                Some(bucket) => {
                    self.assign(field, bucket);
                    true
                }
                None => {
                    tracing::debug!(field = %field.id, "drop outside any bucket target ignored");
                    false
                }
            },
            BuilderInput::QuickAdd { field, bucket } => {
                self.assign(field, bucket);
                true
            }
            BuilderInput::Key { key, focus } => self.handle_key(key, focus),
        }
    }

    fn handle_key(&mut self, key: KeyStroke, focus: FocusContext) -> bool {
        // Typing in any text field other than the catalog search is never hijacked
        if focus == FocusContext::OtherTextInput {
            return false;
        }
        match key {
            KeyStroke::Down => {
                let len = self.filtered_catalog().len();
                self.selection.move_down(len);
                false
            }
            KeyStroke::Up => {
                self.selection.move_up();
                false
            }
            KeyStroke::Enter => self.assign_selected(Bucket::Values),
            KeyStroke::ModA => self.assign_selected(Bucket::Group),
            KeyStroke::ModF => self.assign_selected(Bucket::Filters),
        }
    }

    fn assign_selected(&mut self, bucket: Bucket) -> bool {
        match self.selected_field() {
            Some(field) => {
                let field = field.clone();
                self.assign(field, bucket);
                true
            }
            None => false,
        }
    }

    /// Snapshot, then mutate: the order is load-bearing
    fn assign(&mut self, field: FieldDescriptor, bucket: Bucket) {
        tracing::debug!(field = %field.id, %bucket, "assigning field");
        self.history.record(&self.config);
        self.config = self.config.add_field(field, bucket);
        self.publish();
    }

    /// Step the history back; keeps the current configuration at the bottom
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(previous) => {
                self.activate(previous);
                true
            }
            None => false,
        }
    }

    /// Step the history forward
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(next) => {
                self.activate(next);
                true
            }
            None => false,
        }
    }

    fn activate(&mut self, config: AnalysisConfiguration) {
        let source_changed = config.data_source != self.config.data_source;
        self.config = config;
        if source_changed {
            let len = self.filtered_catalog().len();
            self.selection.reset(len);
        }
        self.publish();
    }

    /// Remove a bucket entry (recorded in history)
    pub fn remove_field(&mut self, bucket: Bucket, index: usize) {
        let next = self.config.remove_field(bucket, index);
        self.apply_recorded(next);
    }

    /// Reorder a bucket entry (recorded in history)
    pub fn reorder_field(&mut self, bucket: Bucket, from: usize, to: usize) {
        let next = self.config.reorder_field(bucket, from, to);
        self.apply_recorded(next);
    }

    /// Switch the data source (recorded in history)
    ///
    /// The catalog backing the search/selection changes with the source.
    pub fn set_data_source(&mut self, source: DataSource) {
        let next = self.config.set_data_source(source);
        self.apply_recorded(next);
        let len = self.filtered_catalog().len();
        self.selection.reset(len);
    }

    /// Change the visualization kind (recorded in history)
    pub fn set_visualization(&mut self, visualization: VisualizationType) {
        let next = self.config.set_visualization(visualization);
        self.apply_recorded(next);
    }

    /// Merge display options; option toggles are not undoable
    pub fn set_options(&mut self, patch: &OptionsPatch) {
        let next = self.config.set_options(patch);
        self.apply(next);
    }

    /// Edit a filter entry in place (fine-grained, not undoable)
    pub fn set_filter(&mut self, index: usize, operator: FilterOperator, value: impl Into<String>) {
        let next = self.config.set_filter(index, operator, value);
        self.apply(next);
    }

    /// Override a value entry's aggregation (fine-grained, not undoable)
    pub fn set_value_aggregation(&mut self, index: usize, aggregation: Aggregation) {
        let next = self.config.set_value_aggregation(index, aggregation);
        self.apply(next);
    }

    /// Override a value entry's column label (fine-grained, not undoable)
    pub fn set_value_label(&mut self, index: usize, label: impl Into<String>) {
        let next = self.config.set_value_label(index, label);
        self.apply(next);
    }

    /// Set a grouping entry's sort direction (fine-grained, not undoable)
    pub fn set_grouping_sort(&mut self, index: usize, direction: SortDirection) {
        let next = self.config.set_grouping_sort(index, direction);
        self.apply(next);
    }

    /// Rename the analysis (not undoable)
    pub fn rename(&mut self, name: impl Into<String>) {
        let next = self.config.rename(name);
        self.apply(next);
    }

    fn apply_recorded(&mut self, next: AnalysisConfiguration) {
        self.history.record(&self.config);
        self.config = next;
        self.publish();
    }

    fn apply(&mut self, next: AnalysisConfiguration) {
        self.config = next;
        self.publish();
    }

    fn publish(&self) {
        self.config_tx.send_replace(self.config.clone());
    }

    /// Unmount the session
    ///
    /// Drops the configuration channel (subscribed schedulers drain and
    /// exit) and hands back the final configuration for any external
    /// save action.
    #[must_use]
    pub fn dispose(self) -> AnalysisConfiguration {
        self.config
    }
}
