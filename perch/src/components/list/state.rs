//! Selection list controller state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

use perchdom::{FocusKeyManager, Key, KeyEvent, SubscriptionSet};

use crate::components::events::EventResult;
use crate::components::selection::{SelectionMode, SelectionModel};
use crate::components::traits::{Disableable, RippleCapable};

use super::option::{ListOption, OptionEvent, OptionId};

/// Unique identifier for a SelectionList instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(usize);

impl ListId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__selection_list_{}", self.0)
    }
}

/// Internal state for the SelectionList component.
#[derive(Debug)]
pub(super) struct ListInner<T> {
    /// Live options, in display order.
    pub options: Vec<ListOption<T>>,
    /// Selected option ids, in selection order.
    pub selection: SelectionModel<OptionId>,
    pub disabled: bool,
    pub disable_ripple: bool,
    /// Focus and destroy subscriptions, one set per live option.
    pub tracked: Vec<(OptionId, SubscriptionSet)>,
}

/// A list of selectable options with keyboard navigation.
///
/// The list owns the focus cursor and the selection set. Options report focus
/// and destruction back to the list through their signals; the list
/// re-derives those subscriptions from the live option collection after every
/// structural change.
///
/// Keys:
/// - Up / Down move focus to the previous / next enabled option, wrapping
/// - Home / End move focus to the first / last enabled option
/// - Space toggles the focused option and suppresses the default action
#[derive(Debug)]
pub struct SelectionList<T> {
    id: ListId,
    inner: Arc<RwLock<ListInner<T>>>,
    keys: Arc<RwLock<FocusKeyManager<ListOption<T>>>>,
}

impl<T> Clone for SelectionList<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            keys: Arc::clone(&self.keys),
        }
    }
}

/// Non-owning handle captured by option callbacks.
struct WeakList<T> {
    id: ListId,
    inner: Weak<RwLock<ListInner<T>>>,
    keys: Weak<RwLock<FocusKeyManager<ListOption<T>>>>,
}

impl<T> Clone for WeakList<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Weak::clone(&self.inner),
            keys: Weak::clone(&self.keys),
        }
    }
}

impl<T> WeakList<T> {
    fn upgrade(&self) -> Option<SelectionList<T>> {
        Some(SelectionList {
            id: self.id,
            inner: self.inner.upgrade()?,
            keys: self.keys.upgrade()?,
        })
    }
}

impl<T: Send + Sync + 'static> Default for SelectionList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> SelectionList<T> {
    /// Create an empty multi-select list.
    pub fn new() -> Self {
        Self::with_mode(SelectionMode::Multiple)
    }

    pub fn with_mode(mode: SelectionMode) -> Self {
        Self {
            id: ListId::new(),
            inner: Arc::new(RwLock::new(ListInner {
                options: Vec::new(),
                selection: SelectionModel::new(mode),
                disabled: false,
                disable_ripple: false,
                tracked: Vec::new(),
            })),
            keys: Arc::new(RwLock::new(FocusKeyManager::default().with_wrap())),
        }
    }

    pub fn with_options(self, options: Vec<ListOption<T>>) -> Self {
        self.set_options(options);
        self
    }

    pub fn with_disabled(self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    pub fn with_disable_ripple(self, disable: bool) -> Self {
        self.set_disable_ripple(disable);
        self
    }

    fn downgrade(&self) -> WeakList<T> {
        WeakList {
            id: self.id,
            inner: Arc::downgrade(&self.inner),
            keys: Arc::downgrade(&self.keys),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> ListId {
        self.id
    }

    /// Keyboard tab stop: -1 while disabled, 0 otherwise.
    pub fn tab_index(&self) -> i32 {
        if self.is_disabled() { -1 } else { 0 }
    }

    pub fn mode(&self) -> SelectionMode {
        self.inner
            .read()
            .map(|g| g.selection.mode())
            .unwrap_or_default()
    }

    /// Switch selection mode. Going to single mode keeps the latest selection.
    pub fn set_mode(&self, mode: SelectionMode) {
        let dropped = self
            .inner
            .write()
            .map(|mut g| {
                let removed = g.selection.set_mode(mode);
                options_with_ids(&g.options, &removed)
            })
            .unwrap_or_default();
        for option in dropped {
            option.clear_selected_flag();
        }
    }

    /// Snapshot of the live options.
    pub fn options(&self) -> Vec<ListOption<T>> {
        self.inner
            .read()
            .map(|g| g.options.clone())
            .unwrap_or_default()
    }

    pub fn get(&self, index: usize) -> Option<ListOption<T>> {
        self.inner.read().ok()?.options.get(index).cloned()
    }

    pub fn position(&self, id: OptionId) -> Option<usize> {
        self.inner
            .read()
            .ok()?
            .options
            .iter()
            .position(|o| o.id() == id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.options.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Selected options, in the order they were selected.
    pub fn selected_options(&self) -> Vec<ListOption<T>> {
        self.inner
            .read()
            .map(|g| {
                g.selection
                    .selected()
                    .iter()
                    .filter_map(|id| g.options.iter().find(|o| o.id() == *id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_selected(&self, id: OptionId) -> bool {
        self.inner
            .read()
            .map(|g| g.selection.is_selected(&id))
            .unwrap_or(false)
    }

    /// Index of the keyboard-active option.
    pub fn active_index(&self) -> Option<usize> {
        self.keys.read().ok()?.active_item_index()
    }

    pub fn active_option(&self) -> Option<ListOption<T>> {
        self.keys.read().ok()?.active_item().cloned()
    }

    /// Options the list currently holds subscriptions for.
    pub fn tracked_options(&self) -> Vec<OptionId> {
        self.inner
            .read()
            .map(|g| g.tracked.iter().map(|(id, _)| *id).collect())
            .unwrap_or_default()
    }

    /// Number of live option subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.inner
            .read()
            .map(|g| g.tracked.iter().map(|(_, subs)| subs.len()).sum())
            .unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    pub fn push(&self, option: ListOption<T>) {
        let index = self.len();
        self.insert(index, option);
    }

    /// Insert an option. An index past the end appends.
    pub fn insert(&self, index: usize, option: ListOption<T>) {
        option.set_list(Arc::downgrade(&self.inner));
        let index = match self.inner.write() {
            Ok(mut guard) => {
                let index = index.min(guard.options.len());
                guard.options.insert(index, option.clone());
                index
            }
            Err(_) => return,
        };
        self.record_selected(std::slice::from_ref(&option));
        self.resubscribe();

        if let Ok(mut keys) = self.keys.write()
            && let Some(active) = keys.active_item_index()
            && active >= index
        {
            keys.update_active_item_index(active + 1);
        }
    }

    /// Replace the whole option collection.
    pub fn set_options(&self, options: Vec<ListOption<T>>) {
        let previous = self
            .active_index()
            .zip(self.active_option())
            .map(|(index, option)| {
                let had_focus = option.has_focus();
                (index, option, had_focus)
            });
        for option in &options {
            option.set_list(Arc::downgrade(&self.inner));
        }
        let stale = match self.inner.write() {
            Ok(mut guard) => {
                let old = std::mem::replace(&mut guard.options, options.clone());
                let kept: Vec<OptionId> = guard
                    .selection
                    .clear()
                    .into_iter()
                    .filter(|id| options.iter().any(|o| o.id() == *id))
                    .collect();
                guard.selection.select_all(kept);
                old.into_iter()
                    .filter(|o| !options.contains(o))
                    .collect::<Vec<_>>()
            }
            Err(_) => return,
        };
        for option in &stale {
            option.set_list(Weak::new());
            option.blur();
        }
        self.record_selected(&options);
        self.resubscribe();
        self.follow_active_option(previous);
    }

    /// Point the cursor at the focused option, else the previously active one,
    /// after the collection was replaced. A vanished active option is handled
    /// like a destroyed one.
    fn follow_active_option(&self, previous: Option<(usize, ListOption<T>, bool)>) {
        let options = self.options();
        let index = options
            .iter()
            .position(|o| o.has_focus())
            .or_else(|| {
                let (_, active, _) = previous.as_ref()?;
                options.iter().position(|o| o == active)
            });

        let Ok(mut keys) = self.keys.write() else {
            return;
        };
        if let Some(index) = index {
            keys.update_active_item_index(index);
            return;
        }
        let Some((old_index, active, had_focus)) = previous else {
            keys.clear_active_item();
            return;
        };
        // The option now at the old slot, else the last one.
        let target = options.len().checked_sub(1).map(|last| old_index.min(last));
        match target {
            Some(target) if had_focus => {
                let next = keys.set_active_item(target);
                drop(keys);
                if let Some(next) = next {
                    log::debug!("[list] focus moves from replaced {} to {}", active.id(), next.id());
                    next.focus();
                }
            }
            Some(target) => keys.update_active_item_index(target),
            None => keys.clear_active_item(),
        }
    }

    /// Destroy and remove the option at `index`.
    pub fn remove(&self, index: usize) -> Option<ListOption<T>> {
        let option = self.get(index)?;
        option.destroy();
        // Already-destroyed options don't notify again.
        self.handle_option_destroyed(option.id());
        Some(option)
    }

    pub fn remove_option(&self, id: OptionId) -> Option<ListOption<T>> {
        let index = self.position(id)?;
        self.remove(index)
    }

    /// Add options whose flag says selected to the selection set.
    fn record_selected(&self, options: &[ListOption<T>]) {
        let mut dropped = Vec::new();
        if let Ok(mut guard) = self.inner.write() {
            for option in options.iter().filter(|o| o.is_selected()) {
                let (_, removed) = guard.selection.select(option.id());
                dropped.extend(options_with_ids(&guard.options, &removed));
            }
        }
        for option in dropped {
            option.clear_selected_flag();
        }
    }

    /// Rebuild the per-option subscriptions from the live collection.
    fn resubscribe(&self) {
        let options = self.options();
        let weak = self.downgrade();

        let tracked: Vec<(OptionId, SubscriptionSet)> = options
            .iter()
            .map(|option| {
                let mut subscriptions = SubscriptionSet::new();

                let list = weak.clone();
                subscriptions.add(option.on_focus().connect(move |event: &OptionEvent| {
                    if let Some(list) = list.upgrade() {
                        list.handle_option_focus(event.option);
                    }
                }));

                let list = weak.clone();
                subscriptions.add(option.on_destroy().connect(move |event: &OptionEvent| {
                    if let Some(list) = list.upgrade() {
                        list.handle_option_destroyed(event.option);
                    }
                }));

                (option.id(), subscriptions)
            })
            .collect();

        // Released after the guard is gone.
        let stale = self
            .inner
            .write()
            .map(|mut g| std::mem::replace(&mut g.tracked, tracked))
            .unwrap_or_default();
        drop(stale);

        if let Ok(mut keys) = self.keys.write() {
            keys.set_items(options);
        }
        log::debug!("[list] {} tracking {} options", self.id, self.len());
    }

    // -------------------------------------------------------------------------
    // Option notifications
    // -------------------------------------------------------------------------

    fn handle_option_focus(&self, id: OptionId) {
        let (index, others) = match self.inner.read() {
            Ok(guard) => (
                guard.options.iter().position(|o| o.id() == id),
                guard
                    .options
                    .iter()
                    .filter(|o| o.id() != id && o.has_focus())
                    .cloned()
                    .collect::<Vec<_>>(),
            ),
            Err(_) => return,
        };
        let Some(index) = index else {
            return;
        };

        if let Ok(mut keys) = self.keys.write() {
            keys.update_active_item_index(index);
        }
        for other in others {
            other.blur();
        }
    }

    fn handle_option_destroyed(&self, id: OptionId) {
        let removed = match self.inner.write() {
            Ok(mut guard) => {
                let Some(index) = guard.options.iter().position(|o| o.id() == id) else {
                    return;
                };
                let option = guard.options.remove(index);
                guard.selection.deselect(&id);
                (index, option, guard.options.len())
            }
            Err(_) => return,
        };
        let (index, option, remaining) = removed;
        let had_focus = option.has_focus();
        option.blur();
        option.set_list(Weak::new());

        let was_active = self
            .keys
            .read()
            .map(|k| k.active_item_index() == Some(index))
            .unwrap_or(false);

        self.resubscribe();

        let Ok(mut keys) = self.keys.write() else {
            return;
        };
        if had_focus || was_active {
            // The option that slid into the vacated slot, else the one before it.
            let target = if index < remaining {
                Some(index)
            } else {
                index.checked_sub(1)
            };
            match target {
                Some(target) if had_focus => {
                    let next = keys.set_active_item(target);
                    drop(keys);
                    if let Some(next) = next {
                        log::debug!("[list] focus moves from destroyed {} to {}", id, next.id());
                        next.focus();
                    }
                }
                Some(target) => keys.update_active_item_index(target),
                None => keys.clear_active_item(),
            }
        } else if let Some(active) = keys.active_item_index()
            && active > index
        {
            keys.update_active_item_index(active - 1);
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard
    // -------------------------------------------------------------------------

    /// Handle a key press on the list.
    pub fn keydown(&self, event: &mut KeyEvent) -> EventResult {
        if event.key == Key::Space {
            self.toggle_focused_option();
            event.prevent_default();
            return EventResult::Consumed;
        }

        let next = self.keys.write().ok().and_then(|mut k| k.on_keydown(event));
        match next {
            Some(option) => {
                option.focus();
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    /// Toggle the option under the focus cursor, if any.
    pub fn toggle_focused_option(&self) {
        let Some(index) = self.active_index() else {
            return;
        };
        if let Some(option) = self.get(index) {
            option.toggle();
        }
    }

    /// Focus the list: the active option, else the first enabled one.
    pub fn focus(&self) {
        let target = self.keys.write().ok().and_then(|mut keys| {
            match keys.active_item_index() {
                Some(index) => keys.set_active_item(index),
                None => keys.set_first_item_active(),
            }
        });
        if let Some(option) = target {
            option.focus();
        }
    }

    // -------------------------------------------------------------------------
    // Bulk selection
    // -------------------------------------------------------------------------

    /// Select every enabled option. Returns how many changed.
    pub fn select_all(&self) -> usize {
        self.options()
            .into_iter()
            .filter(|o| !Disableable::is_disabled(o))
            .filter(|o| o.select())
            .count()
    }

    /// Deselect every enabled option. Returns how many changed.
    pub fn deselect_all(&self) -> usize {
        self.options()
            .into_iter()
            .filter(|o| !Disableable::is_disabled(o))
            .filter(|o| o.deselect())
            .count()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Release every option subscription and detach the options.
    pub fn destroy(&self) {
        let (options, tracked) = match self.inner.write() {
            Ok(mut guard) => (
                std::mem::take(&mut guard.options),
                std::mem::take(&mut guard.tracked),
            ),
            Err(_) => return,
        };
        let released: usize = tracked.into_iter().map(|(_, mut s)| s.release_all()).sum();
        for option in &options {
            option.set_list(Weak::new());
        }
        if let Ok(mut keys) = self.keys.write() {
            keys.set_items(Vec::new());
            keys.clear_active_item();
        }
        log::debug!("[list] {} destroyed, released {} subscriptions", self.id, released);
    }
}

impl<T> SelectionList<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Values of the selected options, in selection order.
    pub fn selected_values(&self) -> Vec<T> {
        self.selected_options()
            .iter()
            .filter_map(|o| o.with_value(T::clone))
            .collect()
    }
}

impl<T: Send + Sync + 'static> Disableable for SelectionList<T> {
    fn is_disabled(&self) -> bool {
        self.inner.read().map(|g| g.disabled).unwrap_or(false)
    }

    fn set_disabled(&self, disabled: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.disabled = disabled;
        }
    }
}

impl<T: Send + Sync + 'static> RippleCapable for SelectionList<T> {
    fn disable_ripple(&self) -> bool {
        self.inner.read().map(|g| g.disable_ripple).unwrap_or(false)
    }

    fn set_disable_ripple(&self, disabled: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.disable_ripple = disabled;
        }
    }
}

fn options_with_ids<T: Send + Sync + 'static>(options: &[ListOption<T>], ids: &[OptionId]) -> Vec<ListOption<T>> {
    options
        .iter()
        .filter(|o| ids.contains(&o.id()))
        .cloned()
        .collect()
}
