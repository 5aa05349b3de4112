//! Page markup contract: configurable selectors/classes and the startup probe.

use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use vizij_deck_core::{DeckConfig, DeckError};

/// Where the deck finds its elements and which classes it toggles. Passed
/// from JS as a (partial) object; missing fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    pub slide_selector: String,
    pub wrapper_selector: String,
    pub progress_id: String,
    pub prev_id: String,
    pub next_id: String,
    pub parallax_selector: String,
    pub speed_attribute: String,
    pub active_class: String,
    pub enhanced_class: String,
    pub no_js_class: String,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    pub deck: DeckConfig,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            slide_selector: ".slide".into(),
            wrapper_selector: ".timeline-wrapper".into(),
            progress_id: "progress".into(),
            prev_id: "prev".into(),
            next_id: "next".into(),
            parallax_selector: ".parallax".into(),
            speed_attribute: "data-speed".into(),
            active_class: "active".into(),
            enhanced_class: "use-virtual-scroll".into(),
            no_js_class: "no-js".into(),
            log_level: "warn".into(),
            deck: DeckConfig::default(),
        }
    }
}

impl MarkupConfig {
    pub fn log_filter(&self) -> Result<LevelFilter, DeckError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| DeckError::Config(format!("unknown log level '{}'", self.log_level)))
    }

    pub fn validate(&self) -> Result<(), DeckError> {
        self.log_filter()?;
        self.deck.validate()
    }
}

/// Elements the deck needs, resolved once at startup.
#[derive(Clone)]
pub struct Markup {
    pub root: Element,
    pub body: HtmlElement,
    pub slides: Vec<Element>,
    pub wrapper: Option<HtmlElement>,
    pub progress: Element,
    pub prev: Element,
    pub next: Element,
    /// HTML or SVG layers.
    pub parallax: Vec<Element>,
}

impl Markup {
    /// Resolve every element or report the first one that is missing.
    pub fn probe(document: &Document, cfg: &MarkupConfig) -> Result<Self, DeckError> {
        let root = document
            .document_element()
            .ok_or_else(|| DeckError::MissingElement("document element".into()))?;
        let body = document
            .body()
            .ok_or_else(|| DeckError::MissingElement("body".into()))?;
        let slides = select_all::<Element>(document, &cfg.slide_selector)?;
        let wrapper = document
            .query_selector(&cfg.wrapper_selector)
            .map_err(|e| DeckError::host(crate::js_error_text(&e)))?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let by_id = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| DeckError::MissingElement(format!("#{id}")))
        };
        Ok(Self {
            progress: by_id(&cfg.progress_id)?,
            prev: by_id(&cfg.prev_id)?,
            next: by_id(&cfg.next_id)?,
            parallax: select_all::<Element>(document, &cfg.parallax_selector)?,
            root,
            body,
            slides,
            wrapper,
        })
    }
}

fn select_all<T: JsCast>(document: &Document, selector: &str) -> Result<Vec<T>, DeckError> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| DeckError::host(crate::js_error_text(&e)))?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect())
}

/// Drop the enhanced-scroll class from root and body. Used when startup
/// fails before a deck exists.
pub fn revert_to_native(document: &Document, cfg: &MarkupConfig) {
    if let Some(root) = document.document_element() {
        let _ = root.class_list().remove_1(&cfg.enhanced_class);
    }
    if let Some(body) = document.body() {
        let _ = body.class_list().remove_1(&cfg.enhanced_class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_contract() {
        let cfg = MarkupConfig::default();
        assert_eq!(cfg.slide_selector, ".slide");
        assert_eq!(cfg.enhanced_class, "use-virtual-scroll");
        assert_eq!(cfg.log_filter().unwrap(), LevelFilter::Warn);
    }

    #[test]
    fn partial_object_keeps_defaults() {
        let cfg: MarkupConfig =
            serde_json::from_str(r#"{ "progress_id": "counter", "deck": { "ease": 0.4 } }"#)
                .unwrap();
        assert_eq!(cfg.progress_id, "counter");
        assert_eq!(cfg.prev_id, "prev");
        assert_eq!(cfg.deck.ease, 0.4);
        assert_eq!(cfg.deck.wheel_cooldown_ms, 260.0);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let cfg = MarkupConfig {
            log_level: "chatty".into(),
            ..MarkupConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(DeckError::Config(_))));
    }
}
