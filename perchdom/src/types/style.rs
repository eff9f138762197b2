use super::{Length, Position, Transform, ZIndex};

/// The layout-affecting inline style of an element.
///
/// A `StyleSet` is a plain value: controllers build a complete target set and
/// hand it to [`Element::apply_style_set`](crate::Element::apply_style_set)
/// rather than poking individual properties. Restoring an earlier look is a
/// copy of an earlier value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleSet {
    pub position: Position,
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
    pub width: Length,
    pub z_index: ZIndex,
    pub transform: Transform,
}

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn top(mut self, top: Length) -> Self {
        self.top = top;
        self
    }

    pub fn right(mut self, right: Length) -> Self {
        self.right = right;
        self
    }

    pub fn bottom(mut self, bottom: Length) -> Self {
        self.bottom = bottom;
        self
    }

    pub fn left(mut self, left: Length) -> Self {
        self.left = left;
        self
    }

    pub fn width(mut self, width: Length) -> Self {
        self.width = width;
        self
    }

    pub fn z_index(mut self, z_index: ZIndex) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Serialize as a CSS declaration block.
    pub fn to_css(&self) -> String {
        format!(
            "position:{};top:{};right:{};bottom:{};left:{};width:{};z-index:{};transform:{};",
            self.position,
            self.top,
            self.right,
            self.bottom,
            self.left,
            self.width,
            self.z_index,
            self.transform
        )
    }
}
