//! Browser boundary. Everything here reads or writes the live document and
//! defers every decision to the pure modules.

mod controller;
mod forms;
mod loader;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, EventTarget, NodeList, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};
use tracing::{debug, warn};

use crate::config::{ScrollTarget, SiteConfig};
use crate::error::{Result, SiteError};
use crate::message::Launcher;

pub use controller::UiController;

const CONFIG_ELEMENT_ID: &str = "site-config";

/// Waits for the document to be parsed, injects partials, then wires the UI.
pub fn boot() -> Result<()> {
    let document = document()?;
    if document.ready_state() == "loading" {
        let ready = document.clone();
        on_once(&document, "DOMContentLoaded", move |_| {
            spawn_local(run(ready));
        });
    } else {
        spawn_local(run(document));
    }
    Ok(())
}

async fn run(document: Document) {
    let config = load_config(&document);
    loader::inject_partials(&document, &config).await;
    UiController::new(document, config).init();
}

fn load_config(document: &Document) -> SiteConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return SiteConfig::default();
    };
    match SiteConfig::from_json(&raw) {
        Ok(config) => {
            debug!("Using site config override");
            config
        }
        Err(err) => {
            warn!(error = %err, "Ignoring site config override");
            SiteConfig::default()
        }
    }
}

pub(crate) fn js_error(value: JsValue) -> SiteError {
    SiteError::Dom(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

pub(crate) fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| SiteError::Dom("no global window".to_string()))
}

pub(crate) fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| SiteError::Dom("window has no document".to_string()))
}

fn collect_elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Matching elements, or none when the selector is rejected.
pub(crate) fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(collect_elements)
        .unwrap_or_default()
}

pub(crate) fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(collect_elements)
        .unwrap_or_default()
}

/// Registers a listener for the page's lifetime.
pub(crate) fn on<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) =
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        warn!(event, error = %js_error(err), "Failed to register listener");
    }
    closure.forget();
}

fn on_once<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnOnce(Event) + 'static,
{
    let closure = Closure::once(handler);
    if let Err(err) =
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        warn!(event, error = %js_error(err), "Failed to register listener");
    }
    closure.forget();
}

pub(crate) fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

pub(crate) fn set_classes(element: &Element, classes: &[String], on: bool) {
    for class in classes {
        set_class(element, class, on);
    }
}

pub(crate) fn set_attr(element: &Element, name: &str, value: &str) {
    let _ = element.set_attribute(name, value);
}

pub(crate) fn scroll_to(document: &Document, target: &ScrollTarget) {
    let Some(element) = document.get_element_by_id(&target.anchor) else {
        debug!(anchor = %target.anchor, "Scroll target not on page");
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    if target.centered {
        options.set_block(ScrollLogicalPosition::Center);
    }
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Opens WhatsApp links in a new tab without exposing the opener.
pub(crate) struct WindowLauncher;

impl Launcher for WindowLauncher {
    fn open(&self, url: &str) {
        // With `noopener` the call returns null even on success.
        let result = window().and_then(|window| {
            window
                .open_with_url_and_target_and_features(url, "_blank", "noopener")
                .map_err(js_error)
        });
        if let Err(err) = result {
            warn!(error = %err, "Failed to open outbound link");
        }
    }
}
