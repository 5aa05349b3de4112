//! Page-level revert to native scrolling that never touches the deck.
//!
//! After a trap inside a deck callback the `RefCell` around the deck can stay
//! borrowed, so the global error handler cannot go through the deck. This
//! keeps its own handles to everything `Deck::fail_safe` would reset.

use log::warn;
use web_sys::{Element, HtmlElement, Window};

use crate::markup::{Markup, MarkupConfig};
use crate::scheduler::PendingFrame;

#[derive(Clone)]
pub struct PageFallback {
    window: Window,
    root: Element,
    body: HtmlElement,
    wrapper: Option<HtmlElement>,
    enhanced_class: String,
    pending: PendingFrame,
}

impl PageFallback {
    pub fn new(window: Window, markup: &Markup, cfg: &MarkupConfig, pending: PendingFrame) -> Self {
        Self {
            window,
            root: markup.root.clone(),
            body: markup.body.clone(),
            wrapper: markup.wrapper.clone(),
            enhanced_class: cfg.enhanced_class.clone(),
            pending,
        }
    }

    /// Whether a display frame is scheduled and not yet consumed or cancelled.
    pub fn frame_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Cancel the scheduled frame, drop the enhanced classes and clear the
    /// track transform. Idempotent.
    pub fn revert(&self) {
        if let Some(handle) = self.pending.take() {
            if let Err(e) = self.window.cancel_animation_frame(handle.0) {
                warn!(
                    "deck: cancelAnimationFrame({}) failed: {}",
                    handle.0,
                    crate::js_error_text(&e)
                );
            }
        }
        for el in [&self.root, self.body.as_ref()] {
            let _ = el.class_list().remove_1(&self.enhanced_class);
        }
        if let Some(wrapper) = &self.wrapper {
            let _ = wrapper.style().remove_property("transform");
        }
    }
}
