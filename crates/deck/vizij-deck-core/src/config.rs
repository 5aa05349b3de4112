//! Tuning knobs for the deck coordinator and input translation.

use serde::{Deserialize, Serialize};

use crate::error::DeckError;

/// Coordinator configuration. Every field has a default so hosts can pass a
/// partial JSON object (or nothing at all).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Fraction of the remaining distance covered per frame. Higher = snappier.
    pub ease: f64,
    /// Distance (px) under which the animation snaps to its target and stops.
    pub snap_threshold: f64,
    /// Global damping applied to every parallax layer's speed.
    pub parallax_factor: f64,
    /// Speed used when a layer carries no usable speed attribute.
    pub default_parallax_speed: f64,
    /// Wheel deltas with a smaller magnitude are treated as noise.
    pub wheel_threshold: f64,
    /// Window (ms) after a wheel-triggered navigation during which further
    /// wheel navigation is suppressed.
    pub wheel_cooldown_ms: f64,
    /// Minimum vertical travel (px) for a touch gesture to count as a swipe.
    pub swipe_threshold: f64,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            ease: 0.28,
            snap_threshold: 0.6,
            parallax_factor: 0.6,
            default_parallax_speed: 0.08,
            wheel_threshold: 10.0,
            wheel_cooldown_ms: 260.0,
            swipe_threshold: 40.0,
        }
    }
}

impl DeckConfig {
    /// Parse a (possibly partial) JSON object.
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        let cfg: DeckConfig =
            serde_json::from_str(json).map_err(|e| DeckError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would stall or destabilize the easing loop.
    pub fn validate(&self) -> Result<(), DeckError> {
        if !(self.ease.is_finite() && self.ease > 0.0 && self.ease <= 1.0) {
            return Err(DeckError::Config(format!(
                "ease must be in (0, 1], got {}",
                self.ease
            )));
        }
        let non_negative = [
            ("snap_threshold", self.snap_threshold),
            ("parallax_factor", self.parallax_factor),
            ("default_parallax_speed", self.default_parallax_speed),
            ("wheel_threshold", self.wheel_threshold),
            ("wheel_cooldown_ms", self.wheel_cooldown_ms),
            ("swipe_threshold", self.swipe_threshold),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(DeckError::Config(format!(
                    "{name} must be a finite, non-negative number, got {value}"
                )));
            }
        }
        if self.snap_threshold == 0.0 {
            return Err(DeckError::Config(
                "snap_threshold must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
