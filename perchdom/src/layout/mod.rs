//! Geometry reported by the host.
//!
//! This crate does not lay anything out. The host measures elements and
//! writes the results onto them; controllers only read those numbers.

mod rect;

pub use rect::Rect;
