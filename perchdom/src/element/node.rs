use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use crate::layout::Rect;
use crate::types::StyleSet;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug)]
struct ElementInner {
    // Identity
    id: String,

    // Tree
    parent: Weak<RwLock<ElementInner>>,
    children: Vec<Element>,

    // Visual
    classes: BTreeSet<String>,
    style: StyleSet,
    /// Number of style writes that actually changed something.
    style_writes: u64,

    // Geometry (written by the host after it measures)
    /// Border box relative to the viewport.
    bounding: Rect,
    /// Border box relative to the offset parent.
    offset: Rect,
    client_width: i32,
}

/// A shared handle to a host element.
///
/// Cloning the handle does not clone the element; two handles are equal when
/// they point at the same element.
#[derive(Debug, Clone)]
pub struct Element {
    inner: Arc<RwLock<ElementInner>>,
}

impl Default for Element {
    fn default() -> Self {
        Self::with_prefix("el")
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Element {}

impl Element {
    fn with_prefix(prefix: &str) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ElementInner {
                id: generate_id(prefix),
                parent: Weak::new(),
                children: Vec::new(),
                classes: BTreeSet::new(),
                style: StyleSet::default(),
                style_writes: 0,
                bounding: Rect::default(),
                offset: Rect::default(),
                client_width: 0,
            })),
        }
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn box_() -> Self {
        Self::with_prefix("box")
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    pub fn id(self, id: impl Into<String>) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.id = id.into();
        }
        self
    }

    pub fn style(self, style: StyleSet) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.style = style;
        }
        self
    }

    pub fn bounds(self, rect: Rect) -> Self {
        self.set_bounding_rect(rect);
        self
    }

    pub fn offset(self, rect: Rect) -> Self {
        self.set_offset_rect(rect);
        self
    }

    pub fn client_width(self, width: i32) -> Self {
        self.set_client_width(width);
        self
    }

    pub fn child(self, child: Element) -> Self {
        self.append_child(&child);
        self
    }

    // -------------------------------------------------------------------------
    // Tree
    // -------------------------------------------------------------------------

    pub fn element_id(&self) -> String {
        self.inner.read().map(|g| g.id.clone()).unwrap_or_default()
    }

    /// Attach `child` as the last child of this element, detaching it from
    /// its previous parent.
    pub fn append_child(&self, child: &Element) {
        if self == child {
            return;
        }
        if let Some(previous) = child.parent() {
            previous.remove_child(child);
        }
        if let Ok(mut guard) = child.inner.write() {
            guard.parent = Arc::downgrade(&self.inner);
        }
        if let Ok(mut guard) = self.inner.write() {
            guard.children.push(child.clone());
        }
    }

    /// Detach `child`. Returns true if it was a child of this element.
    pub fn remove_child(&self, child: &Element) -> bool {
        let removed = if let Ok(mut guard) = self.inner.write() {
            let before = guard.children.len();
            guard.children.retain(|c| c != child);
            guard.children.len() != before
        } else {
            false
        };
        if removed && let Ok(mut guard) = child.inner.write() {
            guard.parent = Weak::new();
        }
        removed
    }

    pub fn parent(&self) -> Option<Element> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.parent.upgrade())
            .map(|inner| Element { inner })
    }

    pub fn children(&self) -> Vec<Element> {
        self.inner
            .read()
            .map(|g| g.children.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Style
    // -------------------------------------------------------------------------

    /// The current inline style.
    pub fn computed_style(&self) -> StyleSet {
        self.inner.read().map(|g| g.style).unwrap_or_default()
    }

    /// Replace the inline style with `style`.
    /// Returns true if anything changed; an identical set is not written.
    pub fn apply_style_set(&self, style: &StyleSet) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && guard.style != *style
        {
            guard.style = *style;
            guard.style_writes += 1;
            return true;
        }
        false
    }

    /// How many times [`apply_style_set`](Self::apply_style_set) changed the style.
    pub fn style_writes(&self) -> u64 {
        self.inner.read().map(|g| g.style_writes).unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Classes
    // -------------------------------------------------------------------------

    /// Returns true if the class was not present before.
    pub fn add_class(&self, class: &str) -> bool {
        self.inner
            .write()
            .map(|mut g| g.classes.insert(class.to_string()))
            .unwrap_or(false)
    }

    /// Returns true if the class was present.
    pub fn remove_class(&self, class: &str) -> bool {
        self.inner
            .write()
            .map(|mut g| g.classes.remove(class))
            .unwrap_or(false)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.classes.contains(class))
            .unwrap_or(false)
    }

    pub fn classes(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.classes.iter().cloned().collect())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    pub fn bounding_rect(&self) -> Rect {
        self.inner.read().map(|g| g.bounding).unwrap_or_default()
    }

    pub fn set_bounding_rect(&self, rect: Rect) {
        if let Ok(mut guard) = self.inner.write() {
            guard.bounding = rect;
        }
    }

    pub fn offset_rect(&self) -> Rect {
        self.inner.read().map(|g| g.offset).unwrap_or_default()
    }

    pub fn set_offset_rect(&self, rect: Rect) {
        if let Ok(mut guard) = self.inner.write() {
            guard.offset = rect;
        }
    }

    pub fn offset_top(&self) -> i32 {
        self.offset_rect().top()
    }

    pub fn offset_left(&self) -> i32 {
        self.offset_rect().left()
    }

    pub fn offset_height(&self) -> i32 {
        self.offset_rect().height
    }

    pub fn client_width_px(&self) -> i32 {
        self.inner.read().map(|g| g.client_width).unwrap_or(0)
    }

    pub fn set_client_width(&self, width: i32) {
        if let Ok(mut guard) = self.inner.write() {
            guard.client_width = width;
        }
    }
}
