//! Host traits.
//!
//! Adapters (web) implement [`Surface`] for the page the deck drives and
//! [`FrameScheduler`] for the display-frame primitive, then hand both to
//! [`crate::Deck`].

use std::fmt;

use crate::error::DeckError;

/// Opaque handle of a scheduled display frame, used for cancellation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FrameHandle(pub i32);

/// Textual progress display, rendered as `"position / total"` (1-based).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Indicator {
    pub position: usize,
    pub total: usize,
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.position, self.total)
    }
}

/// Visual side of the deck: the slide track, the slides, the progress
/// display and the parallax layers.
pub trait Surface {
    /// Toggle the enhanced-scroll flags on the root and body elements.
    fn set_enhanced(&mut self, enabled: bool);
    /// Translate the slide track vertically by `offset_px`.
    fn translate_track(&mut self, offset_px: f64);
    /// Drop any translation applied to the slide track.
    fn clear_track(&mut self);
    /// Flag `index` as the active slide and every other slide as inactive.
    fn mark_active(&mut self, index: usize);
    fn show_indicator(&mut self, indicator: &Indicator);
    /// Raw speed attribute of every parallax layer, in document order.
    fn parallax_speed_attributes(&self) -> Vec<Option<String>>;
    /// Current on-screen vertical midpoint of a parallax layer, if it can be
    /// measured.
    fn parallax_midpoint(&self, layer: usize) -> Option<f64>;
    fn translate_parallax(&mut self, layer: usize, offset_px: f64);
}

/// Display-frame scheduling primitive (`requestAnimationFrame` on the web).
/// The scheduled callback must end up in [`crate::Deck::on_frame`].
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, DeckError>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}
