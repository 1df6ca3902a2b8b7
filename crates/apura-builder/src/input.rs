//! Mechanism-agnostic builder inputs
//!
//! Pointer drags, quick-add buttons, and keyboard shortcuts are adapters
//! living outside this crate; all of them reduce to a [`BuilderInput`]
//! before the assignment engine sees anything.

use apura_model::{Bucket, FieldDescriptor};
use serde::{Deserialize, Serialize};

/// A keystroke the catalog list reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStroke {
    /// Move the catalog selection down
    Down,
    /// Move the catalog selection up
    Up,
    /// Add the selected field to the values bucket
    Enter,
    /// Modifier+A: add the selected field to the grouping bucket
    ModA,
    /// Modifier+F: add the selected field to the filters bucket
    ModF,
}

/// Where keyboard focus sits when a keystroke arrives
///
/// Shortcuts only run while focus is on the catalog itself or its search
/// box; typing in any other text field is never hijacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusContext {
    /// The catalog's own search box
    CatalogSearch,
    /// Some other text input on the page
    OtherTextInput,
    /// Anywhere else
    Elsewhere,
}

/// One resolved user action entering the assignment engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuilderInput {
    /// A drag payload dropped on a bucket target
    ///
    /// `target` is `None` when the drop landed outside every known target,
    /// which resolves to a no-op.
    Drop {
        field: FieldDescriptor,
        target: Option<Bucket>,
    },
    /// A quick-add button press next to a catalog entry
    QuickAdd {
        field: FieldDescriptor,
        bucket: Bucket,
    },
    /// A keystroke over the filtered catalog list
    Key {
        key: KeyStroke,
        focus: FocusContext,
    },
}
