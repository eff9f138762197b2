pub mod element;
pub mod error;
pub mod event;
pub mod focus;
pub mod layout;
pub mod platform;
pub mod scroll;
pub mod signal;
pub mod types;

pub use element::Element;
pub use error::{ProbeError, StyleError};
pub use event::{Key, KeyEvent, Modifiers};
pub use focus::{FocusKeyManager, Focusable};
pub use layout::Rect;
pub use platform::{
    probe_native_sticky, supported_sticky_prefixes, DeclarationEnvironment, HeadlessEnvironment,
    Platform, ProbeElement, StyleEnvironment,
};
pub use scroll::Scrollable;
pub use signal::{ConnectionId, Signal, Subscription, SubscriptionSet};
pub use types::*;
