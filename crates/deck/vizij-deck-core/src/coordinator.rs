//! Slide/scroll coordinator: navigation state and the easing step.
//!
//! Pure state, no host access. [`crate::Deck`] drives it against a surface
//! and a frame scheduler.
//!
//! Invariants:
//! - `active < count` and `count >= 1`
//! - `target_offset == active * viewport_height` after every navigation or
//!   resize
//! - after [`Step::Settled`], `current_offset == target_offset` exactly

use crate::config::DeckConfig;
use crate::error::DeckError;
use crate::host::Indicator;
use crate::input::Intent;
use crate::parallax::ParallaxCache;

/// Outcome of one easing step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Still converging; another frame is needed.
    Moving,
    /// Snapped onto the target. Carries the recomputed active index.
    Settled { index: usize },
}

#[derive(Clone, Debug)]
pub struct Coordinator {
    cfg: DeckConfig,
    count: usize,
    active: usize,
    viewport_height: f64,
    current_offset: f64,
    target_offset: f64,
    parallax: ParallaxCache,
}

/// Round half up, matching the browser's `Math.round`.
#[inline]
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

fn check_viewport(height: f64) -> Result<f64, DeckError> {
    if height.is_finite() && height > 0.0 {
        Ok(height)
    } else {
        Err(DeckError::InvalidViewport(height))
    }
}

impl Coordinator {
    /// Build a coordinator resting on slide 0.
    pub fn new(cfg: DeckConfig, count: usize, viewport_height: f64) -> Result<Self, DeckError> {
        cfg.validate()?;
        if count == 0 {
            return Err(DeckError::NoSlides);
        }
        let viewport_height = check_viewport(viewport_height)?;
        Ok(Self {
            cfg,
            count,
            active: 0,
            viewport_height,
            current_offset: 0.0,
            target_offset: 0.0,
            parallax: ParallaxCache::default(),
        })
    }

    pub fn config(&self) -> &DeckConfig {
        &self.cfg
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn current_offset(&self) -> f64 {
        self.current_offset
    }

    pub fn target_offset(&self) -> f64 {
        self.target_offset
    }

    pub fn parallax(&self) -> &ParallaxCache {
        &self.parallax
    }

    pub fn is_settled(&self) -> bool {
        self.current_offset == self.target_offset
    }

    pub fn indicator(&self) -> Indicator {
        Indicator {
            position: self.active + 1,
            total: self.count,
        }
    }

    /// Replace the parallax speed cache from raw attribute values.
    pub fn rebuild_parallax<S: AsRef<str>>(&mut self, attrs: &[Option<S>]) {
        self.parallax = ParallaxCache::from_attributes(attrs, self.cfg.default_parallax_speed);
    }

    /// Clamp `index` into range, make it active and retarget the scroll.
    /// Returns the resulting active index.
    pub fn goto(&mut self, index: i64) -> usize {
        let last = (self.count - 1) as i64;
        self.active = index.clamp(0, last) as usize;
        self.target_offset = self.slide_offset(self.active);
        self.active
    }

    pub fn next(&mut self) -> usize {
        self.goto(self.active as i64 + 1)
    }

    pub fn prev(&mut self) -> usize {
        self.goto(self.active as i64 - 1)
    }

    pub fn first(&mut self) -> usize {
        self.goto(0)
    }

    pub fn last(&mut self) -> usize {
        self.goto(self.count as i64 - 1)
    }

    pub fn apply(&mut self, intent: Intent) -> usize {
        match intent {
            Intent::Next => self.next(),
            Intent::Prev => self.prev(),
            Intent::First => self.first(),
            Intent::Last => self.last(),
        }
    }

    /// Advance the easing by one frame.
    pub fn step(&mut self) -> Step {
        self.current_offset += (self.target_offset - self.current_offset) * self.cfg.ease;
        if (self.target_offset - self.current_offset).abs() < self.cfg.snap_threshold {
            self.current_offset = self.target_offset;
            let nearest = round_half_up(self.current_offset / self.viewport_height);
            self.active = nearest.clamp(0.0, (self.count - 1) as f64) as usize;
            Step::Settled { index: self.active }
        } else {
            Step::Moving
        }
    }

    /// Adopt a new viewport height. The active index is kept; the target is
    /// recomputed for it and the animated offset is clamped into the deck.
    pub fn resize(&mut self, viewport_height: f64) -> Result<(), DeckError> {
        self.viewport_height = check_viewport(viewport_height)?;
        self.target_offset = self.slide_offset(self.active);
        let max = self.slide_offset(self.count - 1);
        self.current_offset = self.current_offset.clamp(0.0, max);
        Ok(())
    }

    /// Translation for the slide track: the negated, pixel-rounded offset.
    pub fn track_translation(&self) -> f64 {
        let px = round_half_up(self.current_offset);
        if px == 0.0 {
            0.0
        } else {
            -px
        }
    }

    /// Translation for parallax layer `layer` whose on-screen midpoint is
    /// `midpoint_y`. `None` if the layer is not cached.
    pub fn parallax_translation(&self, layer: usize, midpoint_y: f64) -> Option<f64> {
        self.parallax.layers().get(layer).map(|l| {
            l.offset(self.current_offset, midpoint_y, self.cfg.parallax_factor)
        })
    }

    fn slide_offset(&self, index: usize) -> f64 {
        index as f64 * self.viewport_height
    }
}
