//! `Surface` over the live DOM.

use log::warn;
use wasm_bindgen::JsValue;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Element, HtmlElement, SvgElement};

use vizij_deck_core::{Indicator, Surface};

use crate::markup::{Markup, MarkupConfig};

pub struct DomSurface {
    root: Element,
    body: HtmlElement,
    slides: Vec<Element>,
    wrapper: Option<HtmlElement>,
    progress: Element,
    parallax: Vec<Element>,
    active_class: String,
    enhanced_class: String,
    speed_attribute: String,
}

fn check(what: &str, res: Result<impl Sized, JsValue>) {
    if let Err(e) = res {
        warn!("deck: {} failed: {}", what, crate::js_error_text(&e));
    }
}

fn translate_y(px: f64) -> String {
    format!("translateY({px}px)")
}

/// Inline style of an HTML or SVG element. Other element kinds have none.
pub fn layer_style(el: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        Some(html.style())
    } else {
        el.dyn_ref::<SvgElement>().map(SvgElement::style)
    }
}

impl DomSurface {
    pub fn new(markup: Markup, cfg: &MarkupConfig) -> Self {
        Self {
            root: markup.root,
            body: markup.body,
            slides: markup.slides,
            wrapper: markup.wrapper,
            progress: markup.progress,
            parallax: markup.parallax,
            active_class: cfg.active_class.clone(),
            enhanced_class: cfg.enhanced_class.clone(),
            speed_attribute: cfg.speed_attribute.clone(),
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

impl Surface for DomSurface {
    fn set_enhanced(&mut self, enabled: bool) {
        for el in [&self.root, self.body.as_ref()] {
            let list = el.class_list();
            if enabled {
                check("class add", list.add_1(&self.enhanced_class));
            } else {
                check("class remove", list.remove_1(&self.enhanced_class));
            }
        }
    }

    fn translate_track(&mut self, offset_px: f64) {
        if let Some(wrapper) = &self.wrapper {
            check(
                "track transform",
                wrapper
                    .style()
                    .set_property("transform", &translate_y(offset_px)),
            );
        }
    }

    fn clear_track(&mut self) {
        if let Some(wrapper) = &self.wrapper {
            check(
                "track transform reset",
                wrapper.style().remove_property("transform"),
            );
        }
    }

    fn mark_active(&mut self, index: usize) {
        for (i, slide) in self.slides.iter().enumerate() {
            check(
                "active toggle",
                slide
                    .class_list()
                    .toggle_with_force(&self.active_class, i == index),
            );
        }
    }

    fn show_indicator(&mut self, indicator: &Indicator) {
        self.progress
            .set_text_content(Some(&indicator.to_string()));
    }

    fn parallax_speed_attributes(&self) -> Vec<Option<String>> {
        self.parallax
            .iter()
            .map(|el| el.get_attribute(&self.speed_attribute))
            .collect()
    }

    fn parallax_midpoint(&self, layer: usize) -> Option<f64> {
        let rect = self.parallax.get(layer)?.get_bounding_client_rect();
        Some(rect.top() + rect.height() / 2.0)
    }

    fn translate_parallax(&mut self, layer: usize, offset_px: f64) {
        if let Some(style) = self.parallax.get(layer).and_then(layer_style) {
            check(
                "parallax transform",
                style.set_property("transform", &translate_y(offset_px)),
            );
        }
    }
}
