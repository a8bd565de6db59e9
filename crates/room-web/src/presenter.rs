//! DOM-backed caption popup, game panel and hover cursor.

use crate::constants::*;
use crate::dom;
use room_core::Presenter;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct DomPresenter {
    canvas: web::HtmlCanvasElement,
    caption: web::HtmlElement,
    caption_text: web::HtmlElement,
    caption_close: web::HtmlElement,
    panel: web::HtmlElement,
    panel_text: web::HtmlElement,
    panel_button: web::HtmlElement,
    on_action: Option<Closure<dyn FnMut()>>,
    on_close: Option<Closure<dyn FnMut()>>,
}

impl DomPresenter {
    pub fn new(document: &web::Document, canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let caption = dom::ensure_element(document, "div", CAPTION_ID, CAPTION_STYLE)?;
        let caption_text = dom::ensure_element(document, "div", CAPTION_TEXT_ID, "")?;
        let caption_close = dom::ensure_element(document, "button", CAPTION_CLOSE_ID, CAPTION_CLOSE_STYLE)?;
        caption_close.set_inner_text(CAPTION_CLOSE_LABEL);
        caption
            .append_child(&caption_text)
            .and_then(|_| caption.append_child(&caption_close))
            .map_err(|e| anyhow::anyhow!("caption layout: {:?}", e))?;
        let panel = dom::ensure_element(document, "div", PANEL_ID, PANEL_STYLE)?;
        let panel_text = dom::ensure_element(document, "div", PANEL_TEXT_ID, "")?;
        let panel_button = dom::ensure_element(document, "button", PANEL_BUTTON_ID, PANEL_BUTTON_STYLE)?;
        panel
            .append_child(&panel_text)
            .and_then(|_| panel.append_child(&panel_button))
            .map_err(|e| anyhow::anyhow!("panel layout: {:?}", e))?;
        dom::set_shown(&caption, false);
        dom::set_shown(&panel, false);
        Ok(Self {
            canvas,
            caption,
            caption_text,
            caption_close,
            panel,
            panel_text,
            panel_button,
            on_action: None,
            on_close: None,
        })
    }

    /// Installs the panel button handler, replacing any previous one.
    pub fn on_action(&mut self, handler: impl FnMut() + 'static) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        self.panel_button
            .set_onclick(Some(closure.as_ref().unchecked_ref()));
        self.on_action = Some(closure);
    }

    /// Installs the caption close handler, replacing any previous one.
    pub fn on_close(&mut self, handler: impl FnMut() + 'static) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        self.caption_close
            .set_onclick(Some(closure.as_ref().unchecked_ref()));
        self.on_close = Some(closure);
    }
}

impl Presenter for DomPresenter {
    fn show_caption(&mut self, text: &str) {
        self.caption_text.set_inner_text(text);
        dom::set_shown(&self.caption, true);
    }

    fn hide_caption(&mut self) {
        dom::set_shown(&self.caption, false);
    }

    fn show_panel(&mut self, text: &str, action: Option<&str>) {
        self.panel_text.set_inner_text(text);
        match action {
            Some(label) => {
                self.panel_button.set_inner_text(label);
                dom::set_shown(&self.panel_button, true);
            }
            None => dom::set_shown(&self.panel_button, false),
        }
        dom::set_shown(&self.panel, true);
    }

    fn hide_panel(&mut self) {
        dom::set_shown(&self.panel, false);
    }

    fn set_pointer_cursor(&mut self, pointer: bool) {
        _ = self
            .canvas
            .style()
            .set_property("cursor", if pointer { "pointer" } else { "auto" });
    }
}
