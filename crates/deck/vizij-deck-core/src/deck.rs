//! Deck: binds the coordinator and input translator to a host surface and
//! frame scheduler.
//!
//! Animation states:
//! - `Idle`: no frame scheduled
//! - `Animating`: exactly one frame scheduled, identified by its handle
//!
//! Navigation, resize and startup enter `Animating` (never a second frame
//! chain); convergence in [`Deck::on_frame`] returns to `Idle`. After
//! [`Deck::fail_safe`] the deck is in [`Mode::Native`] and stays inert.

use log::{debug, trace, warn};

use crate::config::DeckConfig;
use crate::coordinator::{Coordinator, Step};
use crate::error::DeckError;
use crate::host::{FrameHandle, FrameScheduler, Surface};
use crate::input::{InputEvent, InputTranslator, Intent, Translation};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Animating(FrameHandle),
}

/// Whether the deck intercepts scrolling or has handed it back to the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Enhanced,
    Native,
}

pub struct Deck<S: Surface, F: FrameScheduler> {
    coord: Coordinator,
    input: InputTranslator,
    surface: S,
    scheduler: F,
    phase: Phase,
    mode: Mode,
}

impl<S: Surface, F: FrameScheduler> Deck<S, F> {
    /// Capability check and construction. Nothing on the surface changes
    /// until [`Deck::enable`]; on `Err` the caller keeps native scrolling.
    pub fn new(
        cfg: DeckConfig,
        slide_count: usize,
        viewport_height: f64,
        surface: S,
        scheduler: F,
    ) -> Result<Self, DeckError> {
        let input = InputTranslator::new(&cfg);
        let mut coord = Coordinator::new(cfg, slide_count, viewport_height)?;
        coord.rebuild_parallax(&surface.parallax_speed_attributes());
        debug!(
            "deck: {} slides, viewport {}px, {} parallax layers",
            slide_count,
            viewport_height,
            coord.parallax().len()
        );
        Ok(Self {
            coord,
            input,
            surface,
            scheduler,
            phase: Phase::Idle,
            mode: Mode::Enhanced,
        })
    }

    /// Switch the surface into enhanced mode, show slide 0 and start the
    /// animation loop.
    pub fn enable(&mut self) -> Result<(), DeckError> {
        self.surface.set_enhanced(true);
        self.goto(0)?;
        Ok(())
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coord
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_enhanced(&self) -> bool {
        self.mode == Mode::Enhanced
    }

    pub fn active(&self) -> usize {
        self.coord.active()
    }

    pub fn count(&self) -> usize {
        self.coord.count()
    }

    /// Navigate to `index` (clamped). Returns the resulting active index.
    pub fn goto(&mut self, index: i64) -> Result<usize, DeckError> {
        if self.mode == Mode::Native {
            return Ok(self.coord.active());
        }
        let idx = self.coord.goto(index);
        self.show(idx)
    }

    pub fn next(&mut self) -> Result<usize, DeckError> {
        self.goto(self.coord.active() as i64 + 1)
    }

    pub fn prev(&mut self) -> Result<usize, DeckError> {
        self.goto(self.coord.active() as i64 - 1)
    }

    pub fn first(&mut self) -> Result<usize, DeckError> {
        self.goto(0)
    }

    pub fn last(&mut self) -> Result<usize, DeckError> {
        self.goto(self.coord.count() as i64 - 1)
    }

    /// Translate a host event and act on it. The returned translation tells
    /// the host whether to suppress the event's default behaviour.
    ///
    /// A navigation that cannot schedule its animation drops the deck to
    /// native scrolling; the translation is still returned so the host
    /// handles the triggering event consistently.
    pub fn handle_input(&mut self, event: &InputEvent, now_ms: f64) -> Translation {
        if self.mode == Mode::Native {
            return Translation::default();
        }
        let out = self.input.translate(event, now_ms);
        if let Some(intent) = out.intent {
            if let Err(e) = self.navigate(intent) {
                warn!("deck: {:?} failed: {}", intent, e);
                self.fail_safe();
            }
        }
        out
    }

    /// Frame callback: one easing step, then render and either reschedule
    /// or settle.
    pub fn on_frame(&mut self) -> Result<Phase, DeckError> {
        if self.mode == Mode::Native || self.phase == Phase::Idle {
            return Ok(self.phase);
        }
        // The scheduled frame is being consumed.
        self.phase = Phase::Idle;
        let step = self.coord.step();
        self.render();
        match step {
            Step::Moving => {
                let handle = self.scheduler.request_frame()?;
                self.phase = Phase::Animating(handle);
            }
            Step::Settled { index } => {
                trace!("deck: settled on slide {}", index);
                self.surface.mark_active(index);
                self.surface.show_indicator(&self.coord.indicator());
            }
        }
        Ok(self.phase)
    }

    /// Viewport size changed: recapture height, rebuild the parallax cache
    /// and animate to the same slide under the new height.
    pub fn resize(&mut self, viewport_height: f64) -> Result<(), DeckError> {
        if self.mode == Mode::Native {
            return Ok(());
        }
        if let Err(e) = self.coord.resize(viewport_height) {
            warn!("deck: ignoring resize: {}", e);
            return Err(e);
        }
        self.coord
            .rebuild_parallax(&self.surface.parallax_speed_attributes());
        self.ensure_running()
    }

    /// Hand scrolling back to the host: drop the enhanced flags, clear the
    /// track transform and cancel any pending frame. Idempotent.
    pub fn fail_safe(&mut self) {
        if let Phase::Animating(handle) = self.phase {
            self.scheduler.cancel_frame(handle);
        }
        self.phase = Phase::Idle;
        if self.mode == Mode::Enhanced {
            warn!("deck: reverting to native scrolling");
        }
        self.mode = Mode::Native;
        self.surface.set_enhanced(false);
        self.surface.clear_track();
    }

    fn navigate(&mut self, intent: Intent) -> Result<usize, DeckError> {
        let idx = self.coord.apply(intent);
        self.show(idx)
    }

    fn show(&mut self, idx: usize) -> Result<usize, DeckError> {
        debug!("deck: show slide {} of {}", idx + 1, self.coord.count());
        self.surface.mark_active(idx);
        self.surface.show_indicator(&self.coord.indicator());
        self.ensure_running()?;
        Ok(idx)
    }

    fn ensure_running(&mut self) -> Result<(), DeckError> {
        if self.phase == Phase::Idle {
            let handle = self.scheduler.request_frame()?;
            self.phase = Phase::Animating(handle);
        }
        Ok(())
    }

    fn render(&mut self) {
        self.surface
            .translate_track(self.coord.track_translation());
        for layer in 0..self.coord.parallax().len() {
            let Some(mid) = self.surface.parallax_midpoint(layer) else {
                continue;
            };
            if let Some(px) = self.coord.parallax_translation(layer, mid) {
                self.surface.translate_parallax(layer, px);
            }
        }
    }
}
