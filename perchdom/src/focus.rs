use crate::event::{Key, KeyEvent};

/// An item a [`FocusKeyManager`] can move focus to.
pub trait Focusable {
    /// Disabled items are skipped by directional movement.
    fn is_disabled(&self) -> bool {
        false
    }
}

/// Tracks which item of an ordered sequence is keyboard-active.
///
/// The manager only moves the cursor. Methods that activate an item return
/// it so the caller can focus it once it no longer holds any lock the item's
/// focus notification might need.
#[derive(Debug, Clone)]
pub struct FocusKeyManager<I> {
    items: Vec<I>,
    active: Option<usize>,
    wrap: bool,
}

impl<I> Default for FocusKeyManager<I> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            active: None,
            wrap: false,
        }
    }
}

impl<I: Focusable + Clone> FocusKeyManager<I> {
    pub fn new(items: Vec<I>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    /// Wrap from the last item to the first and back.
    pub fn with_wrap(mut self) -> Self {
        self.wrap = true;
        self
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    pub fn wraps(&self) -> bool {
        self.wrap
    }

    /// Replace the item sequence after a structural change.
    /// An active index that no longer fits is cleared.
    pub fn set_items(&mut self, items: Vec<I>) {
        self.items = items;
        if let Some(active) = self.active
            && active >= self.items.len()
        {
            self.active = None;
        }
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_item_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_item(&self) -> Option<&I> {
        self.active.and_then(|i| self.items.get(i))
    }

    /// Activate the item at `index`. Out of range leaves the manager unchanged.
    pub fn set_active_item(&mut self, index: usize) -> Option<I> {
        let item = self.items.get(index)?.clone();
        self.active = Some(index);
        Some(item)
    }

    /// Record that the item at `index` became active by other means (a click
    /// or programmatic focus). Out of range clears the active item.
    pub fn update_active_item_index(&mut self, index: usize) {
        self.active = (index < self.items.len()).then_some(index);
    }

    pub fn clear_active_item(&mut self) {
        self.active = None;
    }

    pub fn set_next_item_active(&mut self) -> Option<I> {
        self.set_active_by_delta(1)
    }

    pub fn set_previous_item_active(&mut self) -> Option<I> {
        self.set_active_by_delta(-1)
    }

    pub fn set_first_item_active(&mut self) -> Option<I> {
        let index = self.items.iter().position(|item| !item.is_disabled())?;
        self.set_active_item(index)
    }

    pub fn set_last_item_active(&mut self) -> Option<I> {
        let index = self.items.iter().rposition(|item| !item.is_disabled())?;
        self.set_active_item(index)
    }

    /// Move the cursor for directional keys. Returns the newly active item,
    /// or `None` if the key is not a navigation key or nothing could move.
    pub fn on_keydown(&mut self, event: &KeyEvent) -> Option<I> {
        match event.key {
            Key::Down => self.set_next_item_active(),
            Key::Up => self.set_previous_item_active(),
            Key::Home => self.set_first_item_active(),
            Key::End => self.set_last_item_active(),
            _ => None,
        }
    }

    fn set_active_by_delta(&mut self, delta: isize) -> Option<I> {
        let len = self.items.len() as isize;
        if len == 0 {
            return None;
        }
        let start = match self.active {
            Some(active) => active as isize,
            None if delta > 0 => -1,
            None => len,
        };

        if self.wrap {
            for step in 1..=len {
                let index = (start + delta * step).rem_euclid(len) as usize;
                if !self.items[index].is_disabled() {
                    return self.set_active_item(index);
                }
            }
            return None;
        }

        let mut index = start + delta;
        while (0..len).contains(&index) {
            if !self.items[index as usize].is_disabled() {
                return self.set_active_item(index as usize);
            }
            index += delta;
        }
        None
    }
}
