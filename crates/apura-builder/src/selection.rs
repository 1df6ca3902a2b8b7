//! Keyboard selection over the filtered catalog list

/// Clamped cursor into the filtered catalog list
///
/// `None` while the list is empty. Whenever the backing list changes the
/// selection resets to the first entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSelection {
    selected: Option<usize>,
}

impl CatalogSelection {
    /// Selection for a list of `len` entries, pointing at the first
    #[inline]
    #[must_use]
    pub fn for_list(len: usize) -> Self {
        let mut selection = Self::default();
        selection.reset(len);
        selection
    }

    /// Reset after the backing list changed
    pub fn reset(&mut self, len: usize) {
        self.selected = if len > 0 { Some(0) } else { None };
    }

    /// Move down one entry, clamped to the end of the list
    pub fn move_down(&mut self, len: usize) {
        self.selected = match self.selected {
            Some(i) => Some((i + 1).min(len.saturating_sub(1))),
            None if len > 0 => Some(0),
            None => None,
        };
    }

    /// Move up one entry, clamped to the start of the list
    pub fn move_up(&mut self) {
        self.selected = self.selected.map(|i| i.saturating_sub(1));
    }

    /// Currently selected index, if the list is non-empty
    #[inline]
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.selected
    }
}
