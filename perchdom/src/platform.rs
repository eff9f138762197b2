//! Platform capabilities.
//!
//! [`Platform`] answers two questions for controllers: is this an interactive
//! host at all, and does its style engine pin `position: sticky` elements on
//! its own. The second answer comes from probing a [`StyleEnvironment`] and is
//! computed at most once per platform.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::ProbeError;
use crate::types::{Position, VendorPrefix};

/// A detached element used only for probing. Dropping it tears it down.
pub trait ProbeElement {
    /// Replace the element's declarations with `css`.
    fn set_css_text(&mut self, css: &str);

    /// The `position` value the style engine computed for the element.
    fn computed_position(&self) -> Result<String, ProbeError>;
}

/// The style engine of a host.
pub trait StyleEnvironment: Send + Sync {
    fn create_probe(&self) -> Result<Box<dyn ProbeElement>, ProbeError>;
}

/// An environment without a style engine. Every probe fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessEnvironment;

impl StyleEnvironment for HeadlessEnvironment {
    fn create_probe(&self) -> Result<Box<dyn ProbeElement>, ProbeError> {
        Err(ProbeError::Unavailable)
    }
}

/// A minimal declaration parser.
///
/// `position` declarations are kept only when the engine accepts them; an
/// unsupported value is dropped and the computed value stays `static`, which
/// is how real engines treat unknown values.
#[derive(Debug, Clone, Default)]
pub struct DeclarationEnvironment {
    sticky_prefixes: Vec<VendorPrefix>,
}

impl DeclarationEnvironment {
    /// An engine that understands no sticky variant at all.
    pub fn without_sticky() -> Self {
        Self::default()
    }

    /// An engine that understands `position: <prefix>sticky` for each given prefix.
    pub fn with_sticky(prefixes: impl IntoIterator<Item = VendorPrefix>) -> Self {
        Self {
            sticky_prefixes: prefixes.into_iter().collect(),
        }
    }
}

#[derive(Debug)]
struct DeclarationProbe {
    accepted: Vec<VendorPrefix>,
    position: Position,
}

impl ProbeElement for DeclarationProbe {
    fn set_css_text(&mut self, css: &str) {
        self.position = Position::Static;
        for declaration in css.split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            if !property.trim().eq_ignore_ascii_case("position") {
                continue;
            }
            let Ok(position) = value.parse::<Position>() else {
                continue;
            };
            let accepted = match position {
                Position::Sticky(prefix) => self.accepted.contains(&prefix),
                _ => true,
            };
            if accepted {
                self.position = position;
            }
        }
    }

    fn computed_position(&self) -> Result<String, ProbeError> {
        Ok(self.position.to_string())
    }
}

impl StyleEnvironment for DeclarationEnvironment {
    fn create_probe(&self) -> Result<Box<dyn ProbeElement>, ProbeError> {
        Ok(Box::new(DeclarationProbe {
            accepted: self.sticky_prefixes.clone(),
            position: Position::Static,
        }))
    }
}

/// Every vendor prefix for which `env` keeps `position: <prefix>sticky`,
/// in probe order.
pub fn supported_sticky_prefixes(env: &dyn StyleEnvironment) -> Result<Vec<VendorPrefix>, ProbeError> {
    let mut supported = Vec::new();
    for prefix in VendorPrefix::ALL {
        let mut probe = env.create_probe()?;
        probe.set_css_text(&format!("display:none;position:{}sticky;", prefix.as_str()));
        let computed = probe.computed_position()?;
        if computed.to_ascii_lowercase().contains("sticky") {
            supported.push(prefix);
        }
    }
    Ok(supported)
}

/// Probe `env` for native sticky support. Failures count as unsupported.
pub fn probe_native_sticky(env: &dyn StyleEnvironment) -> Option<VendorPrefix> {
    match supported_sticky_prefixes(env) {
        Ok(prefixes) => {
            log::debug!("[platform] sticky prefixes supported: {prefixes:?}");
            prefixes.first().copied()
        }
        Err(err) => {
            log::warn!("[platform] sticky probe failed, assuming unsupported: {err}");
            None
        }
    }
}

/// Host capabilities shared by every controller of one host.
#[derive(Clone)]
pub struct Platform {
    interactive: bool,
    env: Arc<dyn StyleEnvironment>,
    sticky: Arc<OnceLock<Option<VendorPrefix>>>,
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform")
            .field("interactive", &self.interactive)
            .field("sticky", &self.sticky.get())
            .finish()
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::headless()
    }
}

impl Platform {
    /// An interactive host backed by `env`.
    pub fn new(env: impl StyleEnvironment + 'static) -> Self {
        Self {
            interactive: true,
            env: Arc::new(env),
            sticky: Arc::new(OnceLock::new()),
        }
    }

    /// A non-interactive host: nothing is probed and no events are wired.
    pub fn headless() -> Self {
        Self {
            interactive: false,
            env: Arc::new(HeadlessEnvironment),
            sticky: Arc::new(OnceLock::new()),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// The first vendor prefix under which native sticky positioning works.
    /// Probed on first call and remembered afterwards.
    pub fn native_sticky_prefix(&self) -> Option<VendorPrefix> {
        if !self.interactive {
            return None;
        }
        *self
            .sticky
            .get_or_init(|| probe_native_sticky(self.env.as_ref()))
    }

    pub fn supports_native_sticky(&self) -> bool {
        self.native_sticky_prefix().is_some()
    }

    /// Whether the probe already ran.
    pub fn is_probed(&self) -> bool {
        self.sticky.get().is_some()
    }
}
