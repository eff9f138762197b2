//! Sticky header configuration.

use std::time::Duration;

use perchdom::Scrollable;

use super::StickyRegion;

/// Default stacking order of a pinned header.
pub const DEFAULT_Z_INDEX: i32 = 10;

/// Default window used to collapse scroll bursts.
pub const DEFAULT_SCROLL_DEBOUNCE: Duration = Duration::from_millis(5);

/// Per-header configuration.
#[derive(Debug, Clone)]
pub struct StickyHeaderConfig {
    /// Stacking order applied while pinned.
    pub z_index: i32,

    /// Region bounding the header. Falls back to the header's parent element.
    pub parent_region: Option<StickyRegion>,

    /// Container to follow instead of the one the header was attached with.
    pub scrollable_region: Option<Scrollable>,

    /// Scroll events closer together than this are collapsed into one
    /// recompute. Zero recomputes on every scroll event.
    pub scroll_debounce: Duration,
}

impl Default for StickyHeaderConfig {
    fn default() -> Self {
        Self {
            z_index: DEFAULT_Z_INDEX,
            parent_region: None,
            scrollable_region: None,
            scroll_debounce: DEFAULT_SCROLL_DEBOUNCE,
        }
    }
}

impl StickyHeaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the z-index used while pinned.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Bound the header by an explicit region.
    pub fn parent_region(mut self, region: StickyRegion) -> Self {
        self.parent_region = Some(region);
        self
    }

    /// Follow an explicit scrollable container.
    pub fn scrollable_region(mut self, scrollable: Scrollable) -> Self {
        self.scrollable_region = Some(scrollable);
        self
    }

    /// Set the scroll debounce window.
    pub fn scroll_debounce(mut self, window: Duration) -> Self {
        self.scroll_debounce = window;
        self
    }

    /// Recompute on every scroll event.
    pub fn without_debounce(mut self) -> Self {
        self.scroll_debounce = Duration::ZERO;
        self
    }
}
