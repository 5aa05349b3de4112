use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vizij_deck_core::{Deck, DeckError, InputEvent};

pub mod events;
pub mod fallback;
pub mod logger;
pub mod markup;
pub mod scheduler;
pub mod surface;

use events::{DomDeck, SharedDeck};
use fallback::PageFallback;
use markup::{Markup, MarkupConfig};
use scheduler::RafScheduler;
use surface::DomSurface;

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Best-effort text for a thrown JS value.
pub(crate) fn js_error_text(v: &JsValue) -> String {
    if let Some(s) = v.as_string() {
        return s;
    }
    if let Some(err) = v.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{v:?}")
}

fn deck_error(e: DeckError) -> JsError {
    JsError::new(&e.to_string())
}

/// Handle to a mounted deck.
#[wasm_bindgen]
pub struct VizijDeck {
    deck: SharedDeck,
    fallback: PageFallback,
}

impl VizijDeck {
    fn run(
        &self,
        f: impl FnOnce(&mut DomDeck) -> Result<usize, DeckError>,
    ) -> Result<u32, JsError> {
        let mut deck = self
            .deck
            .try_borrow_mut()
            .map_err(|_| JsError::new("deck is busy"))?;
        match f(&mut deck) {
            Ok(idx) => Ok(idx as u32),
            Err(e) => {
                warn!("deck: navigation failed: {}", e);
                deck.fail_safe();
                Err(deck_error(e))
            }
        }
    }
}

#[wasm_bindgen]
impl VizijDeck {
    /// Navigate to slide `index` (clamped). Returns the active index.
    #[wasm_bindgen(js_name = goto)]
    pub fn goto_slide(&self, index: i32) -> Result<u32, JsError> {
        self.run(|d| d.goto(index as i64))
    }

    pub fn next(&self) -> Result<u32, JsError> {
        self.run(|d| d.next())
    }

    pub fn prev(&self) -> Result<u32, JsError> {
        self.run(|d| d.prev())
    }

    pub fn first(&self) -> Result<u32, JsError> {
        self.run(|d| d.first())
    }

    pub fn last(&self) -> Result<u32, JsError> {
        self.run(|d| d.last())
    }

    /// Feed an input as a plain object in the deck's event shape, e.g.
    /// `{ Wheel: { delta_y: 120 } }` or `{ Key: "End" }`. Returns whether the
    /// caller should suppress the default action of the originating event.
    pub fn input(&self, event: JsValue) -> Result<bool, JsError> {
        let event: InputEvent =
            swb::from_value(event).map_err(|e| JsError::new(&format!("input error: {e}")))?;
        Ok(events::dispatch(&self.deck, event).prevent_default)
    }

    /// Active slide, or undefined while the deck is busy.
    pub fn index(&self) -> Option<u32> {
        self.deck.try_borrow().ok().map(|d| d.active() as u32)
    }

    /// Slide count, or undefined while the deck is busy.
    pub fn count(&self) -> Option<u32> {
        self.deck.try_borrow().ok().map(|d| d.count() as u32)
    }

    /// False while the deck is busy.
    pub fn is_enhanced(&self) -> bool {
        self.deck
            .try_borrow()
            .map(|d| d.is_enhanced())
            .unwrap_or(false)
    }

    /// Hand scrolling back to the browser for the rest of the page's life.
    pub fn fail_safe(&self) {
        match self.deck.try_borrow_mut() {
            Ok(mut deck) => deck.fail_safe(),
            Err(_) => self.fallback.revert(),
        }
    }
}

fn boot(
    window: &web_sys::Window,
    cfg: &MarkupConfig,
) -> Result<(SharedDeck, PageFallback), DeckError> {
    let document = window
        .document()
        .ok_or_else(|| DeckError::MissingElement("document".into()))?;
    let markup = Markup::probe(&document, cfg)?;
    let height = events::viewport_height(window)?;

    let scheduler = RafScheduler::new(window.clone());
    let fallback = PageFallback::new(window.clone(), &markup, cfg, scheduler.pending_slot());
    let surface = DomSurface::new(markup.clone(), cfg);
    let slides = surface.slide_count();
    let deck = Deck::new(cfg.deck.clone(), slides, height, surface, scheduler)?;
    let shared: SharedDeck = Rc::new(RefCell::new(deck));
    events::install_frame_callback(&shared);

    let enabled = shared.borrow_mut().enable();
    let started = enabled.and_then(|_| events::attach(window, &markup, &shared, &fallback));
    if let Err(e) = started {
        shared.borrow_mut().fail_safe();
        return Err(e);
    }
    info!("deck: mounted {} slides", slides);
    Ok((shared, fallback))
}

/// Mount the deck on the current document. Pass a (partial) `MarkupConfig`
/// object or undefined/null for defaults. Call after `DOMContentLoaded`.
///
/// Any failure leaves the page on native scrolling and is returned as an
/// error for the caller to inspect.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<VizijDeck, JsError> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let parsed: Result<MarkupConfig, JsError> = if jsvalue_is_undefined_or_null(&config) {
        Ok(MarkupConfig::default())
    } else {
        swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))
    };
    // Scripting is running whether or not the config is usable.
    let no_js = match &parsed {
        Ok(cfg) => cfg.no_js_class.clone(),
        Err(_) => MarkupConfig::default().no_js_class,
    };
    if let Some(root) = window.document().and_then(|d| d.document_element()) {
        let _ = root.class_list().remove_1(&no_js);
    }
    let cfg = parsed?;
    cfg.validate().map_err(deck_error)?;
    logger::init(cfg.log_filter().map_err(deck_error)?);

    match boot(&window, &cfg) {
        Ok((deck, fallback)) => Ok(VizijDeck { deck, fallback }),
        Err(e) => {
            warn!("deck: enhanced scrolling unavailable: {}", e);
            if let Some(document) = window.document() {
                markup::revert_to_native(&document, &cfg);
            }
            Err(deck_error(e))
        }
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn page_error_reverts_while_deck_is_borrowed() {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        document.body().unwrap().set_inner_html(
            r#"<div class="timeline-wrapper">
                <section class="slide"></section><section class="slide"></section>
            </div>
            <span id="progress"></span><button id="prev"></button><button id="next"></button>"#,
        );
        let cfg = MarkupConfig::default();
        let (deck, fallback) = boot(&window, &cfg).unwrap();
        deck.borrow_mut().next().unwrap();
        assert!(fallback.frame_pending());
        let wrapper = document
            .query_selector(".timeline-wrapper")
            .unwrap()
            .unwrap()
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap();
        wrapper
            .style()
            .set_property("transform", "translateY(-40px)")
            .unwrap();

        // Stands in for a trap that left the deck mutably borrowed.
        let held = deck.borrow_mut();
        events::on_page_error(&deck, &fallback);
        drop(held);

        let root = document.document_element().unwrap();
        assert!(!root.class_list().contains(&cfg.enhanced_class));
        assert!(!document.body().unwrap().class_list().contains(&cfg.enhanced_class));
        assert_eq!(wrapper.style().get_property_value("transform").unwrap(), "");
        assert!(!fallback.frame_pending());
    }
}
