//! Apura Builder - interactive session state
//!
//! The stateful half of the analysis builder:
//! - [`History`]: linear undo/redo over configuration snapshots
//! - [`BuilderInput`]: the mechanism-agnostic contract every input adapter
//!   (pointer drag, quick-add button, keyboard) reduces to
//! - [`CatalogSelection`]: the clamped keyboard cursor over the filtered
//!   catalog list
//! - [`BuilderSession`]: the owned page state with an `init`/`dispose`
//!   lifecycle, publishing configuration versions to the scheduler

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod history;
pub mod input;
pub mod selection;
pub mod session;

// Re-exports for convenience
pub use history::History;
pub use input::{BuilderInput, FocusContext, KeyStroke};
pub use selection::CatalogSelection;
pub use session::{BuilderSession, SessionConfig};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod property_tests {
    use super::*;
    use apura_model::{AnalysisConfiguration, Bucket, FieldDescriptor, ValueType};
    use proptest::prelude::*;

    fn pool() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("mes", "mes", "Mês", ValueType::Date),
            FieldDescriptor::new("uf", "uf", "UF", ValueType::Text),
            FieldDescriptor::new("valor_cbs", "valorCBS", "Valor CBS", ValueType::Number),
        ]
    }

    fn arb_step() -> impl Strategy<Value = (usize, Bucket)> {
        (0usize..3, prop_oneof![
            Just(Bucket::Group),
            Just(Bucket::Values),
            Just(Bucket::Filters),
        ])
    }

    proptest! {
        /// N record-then-mutate steps followed by N undos always land on
        /// the configuration from before the sequence.
        #[test]
        fn undo_round_trip_over_arbitrary_mutation_sequences(
            steps in prop::collection::vec(arb_step(), 1..25)
        ) {
            let fields = pool();
            let initial = AnalysisConfiguration::new("p");
            let mut history = History::new();
            let mut active = initial.clone();

            let n = steps.len();
            for (idx, bucket) in steps {
                history.record(&active);
                active = active.add_field(fields[idx].clone(), bucket);
            }
            for _ in 0..n {
                if let Some(prev) = history.undo() {
                    active = prev;
                }
            }
            prop_assert_eq!(active, initial);
        }
    }
}
