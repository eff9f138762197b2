//! Selection state management for components.
//!
//! The selection list keys its selection by option identity, so membership is
//! stable while options are added and removed around a selected one.

/// Selection mode for components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// At most one item is selected; selecting another replaces it.
    Single,
    /// Any number of items can be selected.
    #[default]
    Multiple,
}

/// Ordered selection set.
///
/// Enumeration follows the order in which items were selected.
#[derive(Debug, Clone)]
pub struct SelectionModel<K> {
    mode: SelectionMode,
    selected: Vec<K>,
}

impl<K> Default for SelectionModel<K> {
    fn default() -> Self {
        Self {
            mode: SelectionMode::default(),
            selected: Vec::new(),
        }
    }
}

impl<K: Clone + Eq> SelectionModel<K> {
    /// Create a new empty selection.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: Vec::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switch modes. Going to `Single` keeps only the most recent selection.
    /// Returns the keys that were deselected.
    pub fn set_mode(&mut self, mode: SelectionMode) -> Vec<K> {
        self.mode = mode;
        if mode == SelectionMode::Single && self.selected.len() > 1 {
            let keep = self.selected.len() - 1;
            return self.selected.drain(..keep).collect();
        }
        Vec::new()
    }

    /// All selected keys in selection order.
    pub fn selected(&self) -> &[K] {
        &self.selected
    }

    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Select `key`. In single mode any other key is deselected.
    /// Returns (added, removed).
    pub fn select(&mut self, key: K) -> (Vec<K>, Vec<K>) {
        if self.is_selected(&key) {
            return (vec![], vec![]);
        }
        let removed = match self.mode {
            SelectionMode::Single => std::mem::take(&mut self.selected),
            SelectionMode::Multiple => Vec::new(),
        };
        self.selected.push(key.clone());
        (vec![key], removed)
    }

    /// Returns true if the key was selected.
    pub fn deselect(&mut self, key: &K) -> bool {
        let before = self.selected.len();
        self.selected.retain(|k| k != key);
        self.selected.len() != before
    }

    /// Select every key (only the last one in single mode).
    /// Returns the keys that were newly selected.
    pub fn select_all(&mut self, keys: impl IntoIterator<Item = K>) -> Vec<K> {
        let mut added = Vec::new();
        for key in keys {
            let (new, removed) = self.select(key);
            added.retain(|k| !removed.contains(k));
            added.extend(new);
        }
        added
    }

    /// Clear all selection. Returns the keys that were deselected.
    pub fn clear(&mut self) -> Vec<K> {
        std::mem::take(&mut self.selected)
    }
}
