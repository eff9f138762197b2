//! Options of a selection list.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

use perchdom::{Element, Focusable, Signal};

use crate::components::traits::{Disableable, RippleCapable};

use super::state::ListInner;

/// Class present on an option's element while it has focus.
pub const FOCUSED_CLASS: &str = "list-item-focus";

/// Unique identifier for a list option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(usize);

impl OptionId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__option_{}", self.0)
    }
}

/// Payload of every option notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionEvent {
    pub option: OptionId,
}

/// Which side of the label the checkbox is drawn on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckboxPosition {
    Before,
    #[default]
    After,
}

#[derive(Debug)]
pub(super) struct OptionInner<T> {
    pub value: T,
    pub selected: bool,
    pub disabled: bool,
    pub has_focus: bool,
    pub destroyed: bool,
    pub disable_ripple: bool,
    pub checkbox_position: CheckboxPosition,
    /// The list this option belongs to, if any.
    pub list: Weak<RwLock<ListInner<T>>>,
}

#[derive(Debug, Clone, Default)]
struct OptionSignals {
    focused: Signal<OptionEvent>,
    selected: Signal<OptionEvent>,
    deselected: Signal<OptionEvent>,
    destroyed: Signal<OptionEvent>,
}

/// One selectable entry of a [`SelectionList`](super::SelectionList).
///
/// `ListOption` is a handle: clones refer to the same option. The option owns
/// its `selected`, `disabled` and focus flags; membership in the list's
/// selection set is changed only through [`toggle`](Self::toggle),
/// [`select`](Self::select), [`deselect`](Self::deselect) and
/// [`set_selected`](Self::set_selected), which keep the two in step.
#[derive(Debug)]
pub struct ListOption<T> {
    id: OptionId,
    element: Element,
    inner: Arc<RwLock<OptionInner<T>>>,
    signals: OptionSignals,
}

impl<T> Clone for ListOption<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            element: self.element.clone(),
            inner: Arc::clone(&self.inner),
            signals: self.signals.clone(),
        }
    }
}

impl<T> PartialEq for ListOption<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for ListOption<T> {}

impl<T: Send + Sync + 'static> ListOption<T> {
    /// Create a detached option holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            id: OptionId::new(),
            element: Element::new(),
            inner: Arc::new(RwLock::new(OptionInner {
                value,
                selected: false,
                disabled: false,
                has_focus: false,
                destroyed: false,
                disable_ripple: false,
                checkbox_position: CheckboxPosition::default(),
                list: Weak::new(),
            })),
            signals: OptionSignals::default(),
        }
    }

    pub fn with_disabled(self, disabled: bool) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.disabled = disabled;
        }
        self
    }

    /// Start selected. Membership is recorded when the option joins a list.
    pub fn with_selected(self, selected: bool) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.selected = selected;
        }
        self
    }

    pub fn with_checkbox_position(self, position: CheckboxPosition) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.checkbox_position = position;
        }
        self
    }

    pub fn with_disable_ripple(self, disable: bool) -> Self {
        self.set_disable_ripple(disable);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> OptionId {
        self.id
    }

    /// The host element the option renders into.
    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn is_selected(&self) -> bool {
        self.inner.read().map(|g| g.selected).unwrap_or(false)
    }

    pub fn has_focus(&self) -> bool {
        self.inner.read().map(|g| g.has_focus).unwrap_or(false)
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.read().map(|g| g.destroyed).unwrap_or(false)
    }

    pub fn checkbox_position(&self) -> CheckboxPosition {
        self.inner
            .read()
            .map(|g| g.checkbox_position)
            .unwrap_or_default()
    }

    pub fn set_checkbox_position(&self, position: CheckboxPosition) {
        if let Ok(mut guard) = self.inner.write() {
            guard.checkbox_position = position;
        }
    }

    /// Run `f` against the option's value.
    pub fn with_value<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.inner.read().ok().map(|g| f(&g.value))
    }

    pub(super) fn list(&self) -> Option<Arc<RwLock<ListInner<T>>>> {
        self.inner.read().ok().and_then(|g| g.list.upgrade())
    }

    pub(super) fn set_list(&self, list: Weak<RwLock<ListInner<T>>>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.list = list;
        }
    }

    fn list_disabled(&self) -> bool {
        self.list()
            .and_then(|list| list.read().ok().map(|g| g.disabled))
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Emitted when the option receives focus.
    pub fn on_focus(&self) -> &Signal<OptionEvent> {
        &self.signals.focused
    }

    /// Emitted when the option becomes selected.
    pub fn on_select(&self) -> &Signal<OptionEvent> {
        &self.signals.selected
    }

    /// Emitted when the option stops being selected.
    pub fn on_deselect(&self) -> &Signal<OptionEvent> {
        &self.signals.deselected
    }

    /// Emitted once, when the option is destroyed.
    pub fn on_destroy(&self) -> &Signal<OptionEvent> {
        &self.signals.destroyed
    }

    fn event(&self) -> OptionEvent {
        OptionEvent { option: self.id }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Flip the selected state. Does nothing while disabled.
    /// Returns true if the state changed.
    pub fn toggle(&self) -> bool {
        if Disableable::is_disabled(self) {
            log::debug!("[list] toggle of disabled {} ignored", self.id);
            return false;
        }
        let selected = match self.inner.write() {
            Ok(mut guard) => {
                guard.selected = !guard.selected;
                guard.selected
            }
            Err(_) => return false,
        };
        self.sync_membership(selected);
        true
    }

    /// Select the option unless it is disabled or already selected.
    pub fn select(&self) -> bool {
        !self.is_selected() && self.toggle()
    }

    /// Deselect the option unless it is disabled or not selected.
    pub fn deselect(&self) -> bool {
        self.is_selected() && self.toggle()
    }

    /// Set the selected flag directly, bypassing the disabled check.
    pub fn set_selected(&self, selected: bool) {
        let changed = self
            .inner
            .write()
            .map(|mut g| std::mem::replace(&mut g.selected, selected) != selected)
            .unwrap_or(false);
        if changed {
            self.sync_membership(selected);
        }
    }

    /// Clear the flag after the list dropped this option from its selection.
    pub(super) fn clear_selected_flag(&self) {
        let changed = self
            .inner
            .write()
            .map(|mut g| std::mem::replace(&mut g.selected, false))
            .unwrap_or(false);
        if changed {
            self.signals.deselected.emit(&self.event());
        }
    }

    /// Bring the list's selection set in line with the option's flag, then notify.
    fn sync_membership(&self, selected: bool) {
        let mut replaced = Vec::new();
        if let Some(list) = self.list()
            && let Ok(mut guard) = list.write()
        {
            if selected {
                let (_, removed) = guard.selection.select(self.id);
                replaced = guard
                    .options
                    .iter()
                    .filter(|o| removed.contains(&o.id))
                    .cloned()
                    .collect();
            } else {
                guard.selection.deselect(&self.id);
            }
        }

        for other in replaced {
            other.clear_selected_flag();
        }

        if selected {
            self.signals.selected.emit(&self.event());
        } else {
            self.signals.deselected.emit(&self.event());
        }
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    /// Give the option focus and notify its list.
    pub fn focus(&self) {
        let focused = self
            .inner
            .write()
            .map(|mut g| {
                if g.destroyed {
                    return false;
                }
                g.has_focus = true;
                true
            })
            .unwrap_or(false);
        if !focused {
            return;
        }
        self.element.add_class(FOCUSED_CLASS);
        self.signals.focused.emit(&self.event());
    }

    pub fn blur(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.has_focus = false;
        }
        self.element.remove_class(FOCUSED_CLASS);
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Tear the option down. The destroy notification fires once.
    pub fn destroy(&self) {
        let first = self
            .inner
            .write()
            .map(|mut g| !std::mem::replace(&mut g.destroyed, true))
            .unwrap_or(false);
        if first {
            self.signals.destroyed.emit(&self.event());
        }
    }
}

impl<T: Send + Sync + 'static> Disableable for ListOption<T> {
    /// Disabled by its own flag or by its list.
    fn is_disabled(&self) -> bool {
        let own = self.inner.read().map(|g| g.disabled).unwrap_or(false);
        own || self.list_disabled()
    }

    /// Setting the flag keeps the current selection.
    fn set_disabled(&self, disabled: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.disabled = disabled;
        }
    }
}

impl<T: Send + Sync + 'static> RippleCapable for ListOption<T> {
    fn disable_ripple(&self) -> bool {
        self.inner.read().map(|g| g.disable_ripple).unwrap_or(false)
    }

    fn set_disable_ripple(&self, disabled: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.disable_ripple = disabled;
        }
    }

    fn is_ripple_enabled(&self) -> bool {
        let list_disabled = self
            .list()
            .and_then(|list| list.read().ok().map(|g| g.disable_ripple))
            .unwrap_or(false);
        !self.disable_ripple() && !list_disabled
    }
}

impl<T: Send + Sync + 'static> Focusable for ListOption<T> {
    fn is_disabled(&self) -> bool {
        Disableable::is_disabled(self)
    }
}
