//! Sticky headers.
//!
//! A [`StickyHeader`] keeps an element pinned to the top of a scrolling
//! container while the [`StickyRegion`] that bounds it is on screen.
//!
//! # Example
//!
//! ```ignore
//! use perch::prelude::*;
//!
//! let region = StickyRegion::new(section.clone());
//! let header = StickyHeader::attach(
//!     title,
//!     &scrollable,
//!     StickyHeaderConfig::new().z_index(20).parent_region(region),
//!     &platform,
//! );
//!
//! // Host loop
//! scrollable.emit_scroll(Instant::now());
//! header.poll(Instant::now());
//! ```

mod config;
mod debounce;
mod header;
mod region;

pub use config::{DEFAULT_SCROLL_DEBOUNCE, DEFAULT_Z_INDEX, StickyHeaderConfig};
pub use header::{STICK_END_CLASS, STICK_START_CLASS, StickyHeader, StickyMode, StickyState};
pub use region::StickyRegion;
