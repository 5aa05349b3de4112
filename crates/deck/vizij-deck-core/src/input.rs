//! Input contracts and translation from raw host events to navigation intents.
//!
//! Adapters (web) convert DOM events into [`InputEvent`]s and feed them to
//! [`InputTranslator::translate`] together with a wall-clock timestamp. The
//! translator owns the wheel cooldown gate and the pending touch gesture.

use serde::Deserialize;

use crate::config::DeckConfig;

/// Keys the deck reacts to. Everything else maps to `Other`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Home" => Key::Home,
            "End" => Key::End,
            _ => Key::Other,
        }
    }
}

/// Host event in deck terms. Hosts without DOM bindings can send these as
/// JSON, e.g. `{ "Wheel": { "delta_y": 120.0 } }` or `{ "Key": "End" }`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub enum InputEvent {
    Key(Key),
    PrevButton,
    NextButton,
    Wheel {
        delta_y: f64,
    },
    /// `y` is the first touch point, if the event carried any.
    TouchStart {
        y: Option<f64>,
    },
    TouchMove {
        touches: usize,
    },
    /// `y` is the first changed touch point, if the event carried any.
    TouchEnd {
        y: Option<f64>,
    },
}

/// What the deck should do in response to an input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Next,
    Prev,
    First,
    Last,
}

/// Result of translating one event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Translation {
    pub intent: Option<Intent>,
    /// The host should suppress the event's default scrolling behaviour.
    pub prevent_default: bool,
}

impl Translation {
    fn ignore() -> Self {
        Self::default()
    }

    fn navigate(intent: Intent) -> Self {
        Self {
            intent: Some(intent),
            prevent_default: false,
        }
    }
}

/// Timer-gated wheel throttle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WheelGate {
    Ready,
    Cooling { until_ms: f64 },
}

impl WheelGate {
    /// Whether a wheel navigation may fire at `now_ms`. Expired cooldowns
    /// fall back to `Ready`.
    fn is_ready(&mut self, now_ms: f64) -> bool {
        if let WheelGate::Cooling { until_ms } = *self {
            if now_ms < until_ms {
                return false;
            }
            *self = WheelGate::Ready;
        }
        true
    }
}

/// Stateful translator for keyboard, button, wheel and touch input.
#[derive(Clone, Debug)]
pub struct InputTranslator {
    wheel_threshold: f64,
    cooldown_ms: f64,
    swipe_threshold: f64,
    gate: WheelGate,
    touch_start_y: Option<f64>,
}

impl InputTranslator {
    pub fn new(cfg: &DeckConfig) -> Self {
        Self {
            wheel_threshold: cfg.wheel_threshold,
            cooldown_ms: cfg.wheel_cooldown_ms,
            swipe_threshold: cfg.swipe_threshold,
            gate: WheelGate::Ready,
            touch_start_y: None,
        }
    }

    pub fn gate(&self) -> WheelGate {
        self.gate
    }

    pub fn touch_start_y(&self) -> Option<f64> {
        self.touch_start_y
    }

    pub fn translate(&mut self, event: &InputEvent, now_ms: f64) -> Translation {
        match *event {
            InputEvent::Key(key) => match key {
                Key::ArrowUp => Translation::navigate(Intent::Prev),
                Key::ArrowDown => Translation::navigate(Intent::Next),
                Key::Home => Translation::navigate(Intent::First),
                Key::End => Translation::navigate(Intent::Last),
                Key::Other => Translation::ignore(),
            },
            InputEvent::PrevButton => Translation::navigate(Intent::Prev),
            InputEvent::NextButton => Translation::navigate(Intent::Next),
            InputEvent::Wheel { delta_y } => self.wheel(delta_y, now_ms),
            InputEvent::TouchStart { y } => {
                if y.is_some() {
                    self.touch_start_y = y;
                }
                Translation::ignore()
            }
            InputEvent::TouchMove { touches } => Translation {
                intent: None,
                prevent_default: touches > 0,
            },
            InputEvent::TouchEnd { y } => self.touch_end(y),
        }
    }

    fn wheel(&mut self, delta_y: f64, now_ms: f64) -> Translation {
        if delta_y.is_nan() || delta_y.abs() < self.wheel_threshold {
            return Translation::ignore();
        }
        if !self.gate.is_ready(now_ms) {
            return Translation {
                intent: None,
                prevent_default: true,
            };
        }
        self.gate = WheelGate::Cooling {
            until_ms: now_ms + self.cooldown_ms,
        };
        Translation {
            intent: Some(if delta_y > 0.0 {
                Intent::Next
            } else {
                Intent::Prev
            }),
            prevent_default: true,
        }
    }

    fn touch_end(&mut self, end_y: Option<f64>) -> Translation {
        let (Some(start), Some(end)) = (self.touch_start_y.take(), end_y) else {
            return Translation::ignore();
        };
        let diff = start - end;
        if diff.abs() < self.swipe_threshold {
            return Translation::ignore();
        }
        // Finger moved up: advance.
        Translation::navigate(if diff > 0.0 { Intent::Next } else { Intent::Prev })
    }
}
