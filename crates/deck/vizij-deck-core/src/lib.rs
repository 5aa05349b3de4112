//! Vizij Deck Core (engine-agnostic)
//!
//! Turns a list of full-viewport slides into a navigable deck: clamped
//! navigation, an exponential-ease scroll animation, parallax offsets for
//! decorative layers, and translation of keyboard/wheel/touch/button input.
//! Host access goes through the [`Surface`] and [`FrameScheduler`] traits;
//! the web adapter lives in `vizij-deck-wasm`.

pub mod config;
pub mod coordinator;
pub mod deck;
pub mod error;
pub mod host;
pub mod input;
pub mod parallax;

// Re-exports for consumers (adapters)
pub use config::DeckConfig;
pub use coordinator::{Coordinator, Step};
pub use deck::{Deck, Mode, Phase};
pub use error::DeckError;
pub use host::{FrameHandle, FrameScheduler, Indicator, Surface};
pub use input::{InputEvent, InputTranslator, Intent, Key, Translation, WheelGate};
pub use parallax::{parse_speed, ParallaxCache, ParallaxLayer};
