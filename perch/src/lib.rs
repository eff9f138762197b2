//! Interactive behaviors over the `perchdom` element model: sticky section
//! headers and keyboard-driven selection lists.

pub mod components;
pub mod prelude;

pub use perchdom;
