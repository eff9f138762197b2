//! Capability traits shared by components.
//!
//! Each component implements the capabilities it has directly; there is no
//! base type to inherit them from.

/// Components that can be disabled.
pub trait Disableable {
    /// Whether the component is disabled, including state inherited from a parent.
    fn is_disabled(&self) -> bool;

    fn set_disabled(&self, disabled: bool);
}

/// Components that show a ripple when activated.
pub trait RippleCapable {
    /// The component's own ripple flag.
    fn disable_ripple(&self) -> bool;

    fn set_disable_ripple(&self, disabled: bool);

    /// Whether a ripple should actually be shown.
    fn is_ripple_enabled(&self) -> bool {
        !self.disable_ripple()
    }
}
