mod enums;
mod style;

pub use enums::{Length, Position, Transform, VendorPrefix, ZIndex};
pub use style::StyleSet;
