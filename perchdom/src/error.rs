use thiserror::Error;

/// Errors raised while parsing style values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("invalid {property} value: {value:?}")]
    InvalidValue {
        property: &'static str,
        value: String,
    },
}

/// Errors raised by a [`StyleEnvironment`](crate::platform::StyleEnvironment)
/// while probing for capabilities.
///
/// These never escape the probe: any failure means "unsupported".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("no style engine is available in this environment")]
    Unavailable,
    #[error("could not read computed style: {0}")]
    ComputedStyle(String),
    #[error(transparent)]
    Style(#[from] StyleError),
}
