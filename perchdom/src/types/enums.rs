use std::fmt;
use std::str::FromStr;

use crate::error::StyleError;

/// Vendor prefix used when writing `position: sticky`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VendorPrefix {
    #[default]
    None,
    Webkit,
    Ms,
    Moz,
    O,
}

impl VendorPrefix {
    /// Probe order: unprefixed first.
    pub const ALL: [VendorPrefix; 5] = [
        VendorPrefix::None,
        VendorPrefix::Webkit,
        VendorPrefix::Ms,
        VendorPrefix::Moz,
        VendorPrefix::O,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            VendorPrefix::None => "",
            VendorPrefix::Webkit => "-webkit-",
            VendorPrefix::Ms => "-ms-",
            VendorPrefix::Moz => "-moz-",
            VendorPrefix::O => "-o-",
        }
    }

    fn strip(value: &str) -> (VendorPrefix, &str) {
        for prefix in Self::ALL.iter().skip(1) {
            if let Some(rest) = value.strip_prefix(prefix.as_str()) {
                return (*prefix, rest);
            }
        }
        (VendorPrefix::None, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky(VendorPrefix),
}

impl Position {
    pub fn is_sticky(&self) -> bool {
        matches!(self, Position::Sticky(_))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Static => write!(f, "static"),
            Position::Relative => write!(f, "relative"),
            Position::Absolute => write!(f, "absolute"),
            Position::Fixed => write!(f, "fixed"),
            Position::Sticky(prefix) => write!(f, "{}sticky", prefix.as_str()),
        }
    }
}

impl FromStr for Position {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        match value.as_str() {
            "static" => Ok(Position::Static),
            "relative" => Ok(Position::Relative),
            "absolute" => Ok(Position::Absolute),
            "fixed" => Ok(Position::Fixed),
            other => match VendorPrefix::strip(other) {
                (prefix, "sticky") => Ok(Position::Sticky(prefix)),
                _ => Err(StyleError::InvalidValue {
                    property: "position",
                    value: s.to_string(),
                }),
            },
        }
    }
}

/// A box offset or size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Length {
    #[default]
    Auto,
    Px(i32),
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Auto => write!(f, "auto"),
            Length::Px(px) => write!(f, "{px}px"),
        }
    }
}

impl FromStr for Length {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("auto") {
            return Ok(Length::Auto);
        }
        let digits = value.strip_suffix("px").unwrap_or(value);
        digits
            .trim()
            .parse::<i32>()
            .map(Length::Px)
            .map_err(|_| StyleError::InvalidValue {
                property: "length",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZIndex {
    #[default]
    Auto,
    Value(i32),
}

impl fmt::Display for ZIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZIndex::Auto => write!(f, "auto"),
            ZIndex::Value(z) => write!(f, "{z}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    #[default]
    None,
    /// Zero-distance 3D translation forces the element onto its own layer.
    Translate3d(i32, i32, i32),
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::None => write!(f, "none"),
            Transform::Translate3d(x, y, z) => write!(f, "translate3d({x}px,{y}px,{z}px)"),
        }
    }
}
