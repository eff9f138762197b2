use perchdom::Element;

/// Marks the element that bounds a sticky header.
///
/// A header stays pinned only while the scroll position is inside its region
/// and is released at the region's bottom edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickyRegion {
    element: Element,
}

impl StickyRegion {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}
