//! Error types for deck initialization and host access.

use thiserror::Error;

/// Reasons the enhanced (intercepted) scrolling mode cannot be enabled or
/// kept alive. Every variant leads the host back to native scrolling.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck has no slides")]
    NoSlides,
    #[error("invalid viewport height: {0}")]
    InvalidViewport(f64),
    #[error("missing required element: {0}")]
    MissingElement(String),
    #[error("host error: {0}")]
    Host(String),
    #[error("config error: {0}")]
    Config(String),
}

impl DeckError {
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host(message.into())
    }

    /// True for errors raised while probing the page at startup.
    pub fn is_capability(&self) -> bool {
        matches!(self, Self::NoSlides | Self::MissingElement(_))
    }
}
