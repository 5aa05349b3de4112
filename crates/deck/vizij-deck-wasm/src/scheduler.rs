//! `FrameScheduler` over `requestAnimationFrame`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use vizij_deck_core::{DeckError, FrameHandle, FrameScheduler};

/// Slot for the frame callback. It is filled after the deck exists, since
/// the callback itself needs a handle to the deck.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Last requested frame, readable without borrowing the deck.
pub type PendingFrame = Rc<Cell<Option<FrameHandle>>>;

pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
    pending: PendingFrame,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn callback_slot(&self) -> FrameCallback {
        Rc::clone(&self.callback)
    }

    pub fn pending_slot(&self) -> PendingFrame {
        Rc::clone(&self.pending)
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, DeckError> {
        let slot = self.callback.borrow();
        let cb = slot
            .as_ref()
            .ok_or_else(|| DeckError::host("frame callback not installed"))?;
        let handle = self
            .window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(|e| DeckError::host(crate::js_error_text(&e)))?;
        self.pending.set(Some(handle));
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.get() == Some(handle) {
            self.pending.set(None);
        }
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            warn!(
                "deck: cancelAnimationFrame({}) failed: {}",
                handle.0,
                crate::js_error_text(&e)
            );
        }
    }
}
