//! Sticky header controller.

use std::sync::{Arc, RwLock, Weak};
use std::time::Instant;

use perchdom::{
    Element, Length, Platform, Position, Scrollable, StyleSet, SubscriptionSet, Transform,
    VendorPrefix, ZIndex,
};

use super::config::StickyHeaderConfig;
use super::debounce::Debounce;

/// Class present while the header is pinned to the top of the container.
pub const STICK_START_CLASS: &str = "stick";

/// Class present while the header is released at the bottom of its region.
pub const STICK_END_CLASS: &str = "sticky-end";

/// Where the header currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StickyState {
    /// In natural flow.
    #[default]
    Reset,
    /// Pinned to the top of the scrollable container.
    Stuck,
    /// Anchored to the bottom of its region, scrolling away with it.
    Unstuck,
}

/// How the controller keeps the header pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickyMode {
    /// Nothing to do: non-interactive host, or no region to bound the header.
    Inert,
    /// The style engine pins the header; the controller set it up once.
    Native(VendorPrefix),
    /// The controller recomputes on scroll, touch and resize.
    Manual,
}

#[derive(Debug)]
struct HeaderInner {
    element: Element,
    region: Option<Element>,
    /// Container whose offsets are the scroll reference.
    container: Element,
    z_index: i32,
    mode: StickyMode,
    state: StickyState,
    /// Style captured before the first mutation; the only basis for reset.
    original: Option<StyleSet>,
    region_top: i32,
    region_bottom_threshold: i32,
    debounce: Debounce,
}

impl HeaderInner {
    fn scroll_position(&self) -> i32 {
        self.container.offset_top()
    }

    /// Recompute the region thresholds. Returns false without a region.
    fn define_restrictions(&mut self) -> bool {
        let Some(region) = &self.region else {
            return false;
        };
        let rect = region.bounding_rect();
        let element_height = self.element.offset_height();
        self.region_top = rect.top();
        self.region_bottom_threshold = self
            .region_top
            .saturating_add(rect.height.saturating_sub(element_height));
        true
    }

    fn sticker(&mut self) {
        let position = self.scroll_position();
        let top = self.region_top;
        let bottom = self.region_bottom_threshold;
        log::trace!(
            "[sticky] position={} top={} bottom={} state={:?}",
            position,
            top,
            bottom,
            self.state
        );

        let outside = position < top || position > bottom;
        if (self.state != StickyState::Reset && outside) || position >= bottom {
            if position >= bottom {
                self.unstick();
            } else {
                self.reset();
            }
        } else if self.state != StickyState::Stuck && position > top && position < bottom {
            self.stick();
        }
    }

    fn define_restrictions_and_stick(&mut self) {
        if self.mode != StickyMode::Manual {
            return;
        }
        if self.define_restrictions() {
            self.sticker();
        }
    }

    fn stuck_style(&self, original: &StyleSet) -> StyleSet {
        let left = self.container.offset_left();
        StyleSet {
            position: Position::Fixed,
            top: Length::Px(self.container.offset_top()),
            right: Length::Px(left.saturating_add(self.container.client_width_px())),
            bottom: Length::Auto,
            left: Length::Px(left),
            width: original.width,
            z_index: ZIndex::Value(self.z_index),
            transform: Transform::Translate3d(0, 0, 0),
        }
    }

    fn released_style(original: &StyleSet) -> StyleSet {
        StyleSet {
            position: Position::Absolute,
            top: Length::Auto,
            right: Length::Px(0),
            bottom: Length::Px(0),
            left: Length::Auto,
            width: original.width,
            ..*original
        }
    }

    fn stick(&mut self) {
        let Some(original) = self.original else {
            return;
        };
        self.element.remove_class(STICK_END_CLASS);
        self.element.add_class(STICK_START_CLASS);
        let style = self.stuck_style(&original);
        self.element.apply_style_set(&style);
        if self.state != StickyState::Stuck {
            log::debug!("[sticky] {} stuck", self.element.element_id());
        }
        self.state = StickyState::Stuck;
    }

    /// Reset, then anchor the header to the bottom of its region.
    /// Both steps are folded into a single style write.
    fn unstick(&mut self) {
        let Some(original) = self.original else {
            return;
        };
        self.element.remove_class(STICK_START_CLASS);
        self.element.add_class(STICK_END_CLASS);
        if let Some(region) = &self.region {
            region.apply_style_set(&region.computed_style().position(Position::Relative));
        }
        self.element.apply_style_set(&Self::released_style(&original));
        if self.state != StickyState::Unstuck {
            log::debug!("[sticky] {} released at region end", self.element.element_id());
        }
        self.state = StickyState::Unstuck;
    }

    fn reset(&mut self) {
        let Some(original) = self.original else {
            return;
        };
        self.element.remove_class(STICK_START_CLASS);
        self.element.remove_class(STICK_END_CLASS);
        self.element.apply_style_set(&original);
        if self.state != StickyState::Reset {
            log::debug!("[sticky] {} reset", self.element.element_id());
        }
        self.state = StickyState::Reset;
    }

    fn on_scroll(&mut self, at: Instant) {
        if self.mode != StickyMode::Manual {
            return;
        }
        if self.debounce.is_immediate() || self.debounce.record(at) {
            self.define_restrictions_and_stick();
        }
    }

    fn on_resize(&mut self) {
        self.define_restrictions_and_stick();
        // Fixed geometry was measured against the old container size.
        if self.mode == StickyMode::Manual && self.state == StickyState::Stuck {
            self.unstick();
            self.stick();
        }
    }

    fn poll(&mut self, now: Instant) -> bool {
        if self.mode == StickyMode::Manual && self.debounce.ready(now) {
            self.define_restrictions_and_stick();
            true
        } else {
            false
        }
    }
}

/// Keeps a header pinned to the top of a scrolling container while its
/// region is on screen.
///
/// When the platform pins `position: sticky` elements natively the controller
/// only writes that style once. Otherwise it runs a three-state machine
/// (see [`StickyState`]) on every scroll, touch move and resize of the
/// container:
///
/// - inside the region the header is fixed at the container's top edge;
/// - at or past the region's bottom threshold it is absolutely positioned at
///   the bottom of the region so it leaves together with the region;
/// - above the region it goes back to the style it had before attaching.
///
/// All signal subscriptions are released by [`detach`](Self::detach) or drop.
#[derive(Debug)]
pub struct StickyHeader {
    inner: Arc<RwLock<HeaderInner>>,
    subscriptions: SubscriptionSet,
}

impl StickyHeader {
    /// Attach a controller to `element`, scrolled by `scrollable`.
    pub fn attach(
        element: Element,
        scrollable: &Scrollable,
        config: StickyHeaderConfig,
        platform: &Platform,
    ) -> Self {
        let scrollable = config
            .scrollable_region
            .clone()
            .unwrap_or_else(|| scrollable.clone());

        let mut inner = HeaderInner {
            element: element.clone(),
            region: None,
            container: scrollable.element().clone(),
            z_index: config.z_index,
            mode: StickyMode::Inert,
            state: StickyState::Reset,
            original: None,
            region_top: 0,
            region_bottom_threshold: 0,
            debounce: Debounce::new(config.scroll_debounce),
        };

        if !platform.is_interactive() {
            log::debug!("[sticky] non-interactive platform, {} left as is", element.element_id());
            return Self::detached(inner);
        }

        if let Some(prefix) = platform.native_sticky_prefix() {
            let style = element
                .computed_style()
                .position(Position::Sticky(prefix))
                .top(Length::Px(0));
            element.apply_style_set(&style);
            inner.mode = StickyMode::Native(prefix);
            log::debug!(
                "[sticky] {} uses native {}sticky",
                element.element_id(),
                prefix.as_str()
            );
            return Self::detached(inner);
        }

        let region = config
            .parent_region
            .as_ref()
            .map(|r| r.element().clone())
            .or_else(|| element.parent());
        let Some(region) = region else {
            log::debug!("[sticky] {} has no region, controller inert", element.element_id());
            return Self::detached(inner);
        };

        inner.region = Some(region);
        inner.original = Some(element.computed_style());
        inner.mode = StickyMode::Manual;
        log::debug!("[sticky] {} uses manual positioning", element.element_id());

        let inner = Arc::new(RwLock::new(inner));
        let mut subscriptions = SubscriptionSet::new();

        let weak = Arc::downgrade(&inner);
        subscriptions.add(scrollable.scrolled().connect(move |at| {
            with_inner(&weak, |inner| inner.on_scroll(*at));
        }));

        let weak = Arc::downgrade(&inner);
        subscriptions.add(scrollable.touch_moved().connect(move |_| {
            with_inner(&weak, HeaderInner::define_restrictions_and_stick);
        }));

        let weak = Arc::downgrade(&inner);
        subscriptions.add(scrollable.resized().connect(move |_| {
            with_inner(&weak, HeaderInner::on_resize);
        }));

        let header = Self {
            inner,
            subscriptions,
        };
        header.recompute();
        header
    }

    fn detached(inner: HeaderInner) -> Self {
        Self {
            inner: Arc::new(RwLock::new(inner)),
            subscriptions: SubscriptionSet::new(),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut HeaderInner) -> R) -> Option<R> {
        self.inner.write().ok().map(|mut guard| f(&mut *guard))
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    pub fn element(&self) -> Option<Element> {
        self.inner.read().ok().map(|g| g.element.clone())
    }

    /// The resolved region element, if the controller runs manually.
    pub fn region(&self) -> Option<Element> {
        self.inner.read().ok().and_then(|g| g.region.clone())
    }

    pub fn mode(&self) -> StickyMode {
        self.inner.read().map(|g| g.mode).unwrap_or(StickyMode::Inert)
    }

    pub fn state(&self) -> StickyState {
        self.inner.read().map(|g| g.state).unwrap_or_default()
    }

    pub fn is_stuck(&self) -> bool {
        self.state() == StickyState::Stuck
    }

    pub fn z_index(&self) -> i32 {
        self.inner.read().map(|g| g.z_index).unwrap_or_default()
    }

    /// The style captured at attach time (manual mode only).
    pub fn original_style(&self) -> Option<StyleSet> {
        self.inner.read().ok().and_then(|g| g.original)
    }

    /// Region top from the last recompute.
    pub fn region_top(&self) -> i32 {
        self.inner.read().map(|g| g.region_top).unwrap_or(0)
    }

    /// Scroll position at which the header is released, from the last recompute.
    pub fn region_bottom_threshold(&self) -> i32 {
        self.inner
            .read()
            .map(|g| g.region_bottom_threshold)
            .unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Recompute thresholds and apply whatever transition the current scroll
    /// position calls for. Repeating it without movement changes nothing.
    pub fn recompute(&self) {
        self.write(HeaderInner::define_restrictions_and_stick);
    }

    /// Pin the header regardless of scroll position.
    pub fn stick(&self) {
        self.write(HeaderInner::stick);
    }

    /// Release the header at the bottom of its region regardless of scroll position.
    pub fn unstick(&self) {
        self.write(HeaderInner::unstick);
    }

    /// Put the header back into natural flow.
    pub fn reset(&self) {
        self.write(HeaderInner::reset);
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn on_scroll(&self, at: Instant) {
        self.write(|inner| inner.on_scroll(at));
    }

    pub fn on_touch_move(&self) {
        self.recompute();
    }

    pub fn on_resize(&self) {
        self.write(HeaderInner::on_resize);
    }

    /// Flush the trailing recompute of a scroll burst once its window has
    /// elapsed. Returns true if a recompute ran.
    pub fn poll(&self, now: Instant) -> bool {
        self.write(|inner| inner.poll(now)).unwrap_or(false)
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.debounce.is_pending())
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Number of live signal subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Release every subscription. The header keeps its current style.
    pub fn detach(&mut self) {
        let released = self.subscriptions.release_all();
        self.write(|inner| inner.debounce.cancel());
        if released > 0 {
            log::debug!("[sticky] detached, released {released} subscriptions");
        }
    }
}

fn with_inner(weak: &Weak<RwLock<HeaderInner>>, f: impl FnOnce(&mut HeaderInner)) {
    if let Some(inner) = weak.upgrade()
        && let Ok(mut guard) = inner.write()
    {
        f(&mut *guard);
    }
}
