use std::time::Instant;

use crate::element::Element;
use crate::layout::Rect;
use crate::signal::Signal;

/// A scrolling container and the notifications the host raises for it.
///
/// The host owns the actual scrolling; it reports new geometry on the
/// elements and then emits the matching signal.
#[derive(Debug, Clone)]
pub struct Scrollable {
    element: Element,
    scrolled: Signal<Instant>,
    touch_moved: Signal<()>,
    resized: Signal<()>,
}

impl Scrollable {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            scrolled: Signal::new(),
            touch_moved: Signal::new(),
            resized: Signal::new(),
        }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Emitted with the time of each scroll event.
    pub fn scrolled(&self) -> &Signal<Instant> {
        &self.scrolled
    }

    pub fn touch_moved(&self) -> &Signal<()> {
        &self.touch_moved
    }

    pub fn resized(&self) -> &Signal<()> {
        &self.resized
    }

    pub fn emit_scroll(&self, at: Instant) {
        self.scrolled.emit(&at);
    }

    pub fn emit_touch_move(&self) {
        self.touch_moved.emit(&());
    }

    pub fn emit_resize(&self) {
        self.resized.emit(&());
    }

    /// Shift the viewport-relative bounds of `content` by `-dy` and emit a
    /// scroll event, as a host does when the container scrolls by `dy`.
    pub fn scroll_content_by(&self, content: &[Element], dy: i32, at: Instant) {
        for element in content {
            let rect: Rect = element.bounding_rect();
            element.set_bounding_rect(rect.translate_y(dy.saturating_neg()));
        }
        self.emit_scroll(at);
    }

    /// Total number of connected slots across all three signals.
    pub fn listener_count(&self) -> usize {
        self.scrolled.connection_count()
            + self.touch_moved.connection_count()
            + self.resized.connection_count()
    }
}
