//! Components with self-managed state.
//!
//! Each component lives in its own module with:
//! - `state.rs` / `header.rs` - the component handle and its inner state
//! - `config.rs` - builder configuration, where the component has any
//! - `mod.rs` - public exports

pub mod events;
pub mod list;
pub mod selection;
pub mod sticky;
pub mod traits;

pub use events::EventResult;
pub use list::{CheckboxPosition, FOCUSED_CLASS, ListId, ListOption, OptionEvent, OptionId, SelectionList};
pub use selection::{SelectionMode, SelectionModel};
pub use sticky::{
    DEFAULT_SCROLL_DEBOUNCE, DEFAULT_Z_INDEX, STICK_END_CLASS, STICK_START_CLASS, StickyHeader,
    StickyHeaderConfig, StickyMode, StickyRegion, StickyState,
};
pub use traits::{Disableable, RippleCapable};
