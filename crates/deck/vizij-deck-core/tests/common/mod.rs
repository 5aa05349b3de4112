#![allow(dead_code)]
use vizij_deck_core::{
    Deck, DeckConfig, DeckError, FrameHandle, FrameScheduler, Indicator, Surface,
};
use vizij_deck_fixtures::DeckLayout;

/// In-memory page: records what the deck writes.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub enhanced: bool,
    pub track: Option<f64>,
    pub active: Option<usize>,
    pub indicator: Option<String>,
    pub speeds: Vec<Option<String>>,
    pub midpoints: Vec<Option<f64>>,
    pub parallax: Vec<Option<f64>>,
}

impl RecordingSurface {
    pub fn from_layout(layout: &DeckLayout) -> Self {
        Self {
            speeds: layout.parallax.iter().map(|p| p.speed.clone()).collect(),
            midpoints: layout.parallax.iter().map(|p| p.midpoint).collect(),
            parallax: vec![None; layout.parallax.len()],
            ..Self::default()
        }
    }
}

impl Surface for RecordingSurface {
    fn set_enhanced(&mut self, enabled: bool) {
        self.enhanced = enabled;
    }

    fn translate_track(&mut self, offset_px: f64) {
        self.track = Some(offset_px);
    }

    fn clear_track(&mut self) {
        self.track = None;
    }

    fn mark_active(&mut self, index: usize) {
        self.active = Some(index);
    }

    fn show_indicator(&mut self, indicator: &Indicator) {
        self.indicator = Some(indicator.to_string());
    }

    fn parallax_speed_attributes(&self) -> Vec<Option<String>> {
        self.speeds.clone()
    }

    fn parallax_midpoint(&self, layer: usize) -> Option<f64> {
        self.midpoints.get(layer).copied().flatten()
    }

    fn translate_parallax(&mut self, layer: usize, offset_px: f64) {
        if let Some(slot) = self.parallax.get_mut(layer) {
            *slot = Some(offset_px);
        }
    }
}

/// Frame scheduler driven by hand from the test.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pub next: i32,
    pub pending: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
    pub requests: usize,
    pub fail: bool,
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, DeckError> {
        if self.fail {
            return Err(DeckError::host("requestAnimationFrame unavailable"));
        }
        self.next += 1;
        self.requests += 1;
        let handle = FrameHandle(self.next);
        self.pending.push(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}

pub type TestDeck = Deck<RecordingSurface, ManualScheduler>;

pub fn deck_from_fixture(name: &str) -> TestDeck {
    let layout = vizij_deck_fixtures::decks::layout(name).unwrap();
    let surface = RecordingSurface::from_layout(&layout);
    let mut deck = Deck::new(
        DeckConfig::default(),
        layout.slides,
        layout.viewport_height,
        surface,
        ManualScheduler::default(),
    )
    .unwrap();
    deck.enable().unwrap();
    deck
}

/// Fire scheduled frames until the deck goes idle. Returns the frame count.
pub fn run_until_idle(deck: &mut TestDeck) -> usize {
    let mut frames = 0;
    while deck.phase() != vizij_deck_core::Phase::Idle {
        frames += 1;
        assert!(frames < 1000, "animation did not converge");
        deck.on_frame().unwrap();
    }
    frames
}
