//! Thin helpers over `web-sys`: globals, element queries and owned listeners.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, CssStyleDeclaration, Document, Element, Event,
    EventTarget, HtmlElement, Window,
};

use crate::error::{EffectsError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(EffectsError::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(EffectsError::NoDocument)
}

/// Milliseconds on the page's monotonic clock.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// All elements matching `selector`, in document order.
///
/// SVG matches are kept alongside HTML ones; both carry inline style.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|err| EffectsError::js("querySelectorAll", err))?;

    let mut elements = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(element) = nodes.get(i).and_then(|node| node.dyn_into::<Element>().ok()) {
            elements.push(element);
        }
    }
    Ok(elements)
}

/// First element matching `selector`, if any.
pub fn query_first(document: &Document, selector: &str) -> Result<Option<Element>> {
    document
        .query_selector(selector)
        .map_err(|err| EffectsError::js("querySelector", err))
}

/// Run `f` once the document has been parsed.
///
/// Runs immediately when the document is already past `loading`.
pub fn on_ready<F>(document: &Document, f: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }

    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let callback = Closure::once_into_js(f);
    document
        .add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            callback.unchecked_ref(),
            &options,
        )
        .map_err(|err| EffectsError::js("addEventListener(DOMContentLoaded)", err))
}

/// An event listener that is removed when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|err| EffectsError::js("addEventListener", err))?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Inline style of an HTML or SVG element.
///
/// `style` comes from `ElementCSSInlineStyle`, which `HTMLElement` and
/// `SVGElement` both implement, so the structural getter works for either.
pub fn inline_style(element: &Element) -> CssStyleDeclaration {
    element.unchecked_ref::<HtmlElement>().style()
}

/// Set an inline style property, logging instead of failing.
pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Err(err) = inline_style(element).set_property(property, value) {
        tracing::warn!(property, error = ?err, "failed to set style");
    }
}

/// Clear an inline style property, logging instead of failing.
pub fn clear_style(element: &Element, property: &str) {
    if let Err(err) = inline_style(element).remove_property(property) {
        tracing::warn!(property, error = ?err, "failed to clear style");
    }
}
