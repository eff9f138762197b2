//! Prelude module for convenient imports.
//!
//! ```ignore
//! use perch::prelude::*;
//! ```

// Components
pub use crate::components::{
    CheckboxPosition, EventResult, ListOption, OptionEvent, OptionId, SelectionList,
    SelectionMode, SelectionModel,
};
pub use crate::components::{
    StickyHeader, StickyHeaderConfig, StickyMode, StickyRegion, StickyState,
};
pub use crate::components::{Disableable, RippleCapable};

// Element model
pub use perchdom::{
    Element, Key, KeyEvent, Modifiers, Platform, Rect, Scrollable, StyleSet, Subscription,
};
