//! DOM event wiring: converts browser events into deck inputs.
//!
//! Listeners live for the lifetime of the page; their closures are leaked
//! with `forget()` once registered.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, KeyboardEvent, TouchEvent, TouchList,
    WheelEvent, Window,
};

use vizij_deck_core::{Deck, DeckError, InputEvent, Key, Translation};

use crate::fallback::PageFallback;
use crate::markup::Markup;
use crate::scheduler::RafScheduler;
use crate::surface::DomSurface;

pub type DomDeck = Deck<DomSurface, RafScheduler>;
pub type SharedDeck = Rc<RefCell<DomDeck>>;

pub fn viewport_height(window: &Window) -> Result<f64, DeckError> {
    window
        .inner_height()
        .map_err(|e| DeckError::host(crate::js_error_text(&e)))?
        .as_f64()
        .ok_or_else(|| DeckError::host("innerHeight is not a number"))
}

/// Run `f` against the deck. Errors other than a rejected viewport push the
/// deck back to native scrolling.
pub fn with_deck<R: Default>(
    deck: &SharedDeck,
    what: &str,
    f: impl FnOnce(&mut DomDeck) -> Result<R, DeckError>,
) -> R {
    let Ok(mut d) = deck.try_borrow_mut() else {
        warn!("deck: {} dropped, deck is busy", what);
        return R::default();
    };
    match f(&mut d) {
        Ok(r) => r,
        Err(DeckError::InvalidViewport(h)) => {
            debug!("deck: {} ignored, viewport height {}", what, h);
            R::default()
        }
        Err(e) => {
            warn!("deck: {} failed: {}", what, e);
            d.fail_safe();
            R::default()
        }
    }
}

pub(crate) fn dispatch(deck: &SharedDeck, input: InputEvent) -> Translation {
    let now = js_sys::Date::now();
    with_deck(deck, "input", |d| Ok(d.handle_input(&input, now)))
}

/// Global error handler. Reverts through the deck when it can be borrowed,
/// otherwise straight on the page.
pub fn on_page_error(deck: &SharedDeck, fallback: &PageFallback) {
    match deck.try_borrow_mut() {
        Ok(mut d) => d.fail_safe(),
        Err(_) => {
            warn!("deck: busy during page error, reverting the page directly");
            fallback.revert();
        }
    }
}

fn first_y(list: TouchList) -> Option<f64> {
    list.get(0).map(|t| t.client_y() as f64)
}

fn listen(
    target: &EventTarget,
    kind: &str,
    passive: Option<bool>,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), DeckError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let callback = closure.as_ref().unchecked_ref();
    let res = match passive {
        Some(passive) => {
            let opts = AddEventListenerOptions::new();
            opts.set_passive(passive);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind, callback, &opts,
            )
        }
        None => target.add_event_listener_with_callback(kind, callback),
    };
    res.map_err(|e| DeckError::host(format!("{kind} listener: {}", crate::js_error_text(&e))))?;
    closure.forget();
    Ok(())
}

/// Install the frame callback into the scheduler's slot.
pub fn install_frame_callback(deck: &SharedDeck) {
    let (slot, pending) = {
        let d = deck.borrow();
        (d.scheduler().callback_slot(), d.scheduler().pending_slot())
    };
    let handle = Rc::clone(deck);
    let closure = Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
        // Fired frames can no longer be cancelled.
        pending.set(None);
        with_deck(&handle, "frame", |d| d.on_frame().map(|_| ()));
    });
    *slot.borrow_mut() = Some(closure);
}

/// Wire buttons, keyboard, wheel, touch, resize and the global error
/// safety net.
pub fn attach(
    window: &Window,
    markup: &Markup,
    deck: &SharedDeck,
    fallback: &PageFallback,
) -> Result<(), DeckError> {
    let target: &EventTarget = window.as_ref();

    let d = Rc::clone(deck);
    listen(markup.prev.as_ref(), "click", None, move |_| {
        dispatch(&d, InputEvent::PrevButton);
    })?;
    let d = Rc::clone(deck);
    listen(markup.next.as_ref(), "click", None, move |_| {
        dispatch(&d, InputEvent::NextButton);
    })?;

    let d = Rc::clone(deck);
    let document = window
        .document()
        .ok_or_else(|| DeckError::MissingElement("document".into()))?;
    listen(document.as_ref(), "keydown", None, move |ev| {
        if let Some(ke) = ev.dyn_ref::<KeyboardEvent>() {
            dispatch(&d, InputEvent::Key(Key::from_dom(&ke.key())));
        }
    })?;

    let d = Rc::clone(deck);
    listen(target, "wheel", Some(false), move |ev| {
        let Some(we) = ev.dyn_ref::<WheelEvent>() else {
            return;
        };
        let out = dispatch(&d, InputEvent::Wheel {
            delta_y: we.delta_y(),
        });
        if out.prevent_default {
            ev.prevent_default();
        }
    })?;

    let d = Rc::clone(deck);
    listen(target, "touchstart", Some(true), move |ev| {
        if let Some(te) = ev.dyn_ref::<TouchEvent>() {
            dispatch(&d, InputEvent::TouchStart {
                y: first_y(te.touches()),
            });
        }
    })?;

    let d = Rc::clone(deck);
    listen(target, "touchmove", Some(false), move |ev| {
        let Some(te) = ev.dyn_ref::<TouchEvent>() else {
            return;
        };
        let out = dispatch(&d, InputEvent::TouchMove {
            touches: te.touches().length() as usize,
        });
        if out.prevent_default {
            ev.prevent_default();
        }
    })?;

    let d = Rc::clone(deck);
    listen(target, "touchend", Some(true), move |ev| {
        if let Some(te) = ev.dyn_ref::<TouchEvent>() {
            dispatch(&d, InputEvent::TouchEnd {
                y: first_y(te.changed_touches()),
            });
        }
    })?;

    let d = Rc::clone(deck);
    let win = window.clone();
    listen(target, "resize", None, move |_| {
        with_deck(&d, "resize", |deck| {
            let height = viewport_height(&win)?;
            deck.resize(height)
        });
    })?;

    let d = Rc::clone(deck);
    let fb = fallback.clone();
    listen(target, "error", None, move |_| on_page_error(&d, &fb))?;

    Ok(())
}
