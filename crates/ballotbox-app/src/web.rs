//! WebAssembly entry point.

use crate::dom::{Dispatcher, DomSurface, SharedWidget, js_error};
use crate::error::AppError;
use crate::page::is_loading;
use ballotbox_core::{BallotConfig, BallotWidget, StatusAnnouncer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Document;

/// Id of the `<script type="application/json">` element holding the config.
const CONFIG_ELEMENT_ID: &str = "ballot-config";

/// Global number older pages set instead of a config element.
const LEGACY_LIMIT_GLOBAL: &str = "votelimit";

thread_local! {
    static WIDGET: RefCell<Option<SharedWidget>> = const { RefCell::new(None) };
}

/// Read the widget configuration from the page.
fn read_config(document: &Document) -> Result<BallotConfig, AppError> {
    if let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) {
        let json = element.text_content().unwrap_or_default();
        return Ok(BallotConfig::from_json(&json)?);
    }

    let value = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(LEGACY_LIMIT_GLOBAL))
        .map_err(|e| js_error("Failed to read vote limit", e))?;
    let limit = value
        .as_f64()
        .filter(|limit| *limit >= 0.0 && limit.fract() == 0.0)
        .ok_or_else(|| {
            AppError::Markup(format!(
                "No #{} element and no numeric {} global",
                CONFIG_ELEMENT_ID, LEGACY_LIMIT_GLOBAL
            ))
        })?;
    let config = BallotConfig::with_limit(limit as usize);
    config.vote_limit()?;
    Ok(config)
}

/// Build the widget over the page, replay restored state and bind listeners.
fn mount(document: Document) -> Result<SharedWidget, AppError> {
    let config = read_config(&document)?;
    let dispatcher = Dispatcher::default();
    let surface = DomSurface::new(document, config.markup.clone(), dispatcher.clone())?;
    let widget = Rc::new(RefCell::new(BallotWidget::new(config, surface)?));
    dispatcher.attach(&widget);

    let status = widget.borrow_mut().initialize();
    widget.borrow().surface().bind_controls()?;
    log::info!("Ballot ready: {}", StatusAnnouncer::message(status));
    Ok(widget)
}

fn start(document: Document) {
    match mount(document) {
        Ok(widget) => WIDGET.with(|slot| *slot.borrow_mut() = Some(widget)),
        Err(e) => log::error!("Ballot widget not started: {}", e),
    }
}

/// Candidate ids currently selected, in selection order.
#[wasm_bindgen]
pub fn current_selection() -> js_sys::Array {
    WIDGET.with(|slot| {
        let slot = slot.borrow();
        let Some(widget) = slot.as_ref().and_then(|w| w.try_borrow().ok()) else {
            return js_sys::Array::new();
        };
        widget
            .selection()
            .iter()
            .map(|id| JsValue::from_str(id.as_str()))
            .collect()
    })
}

/// Initialize the ballot widget once the page is parsed.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Starting ballotbox (WASM)");

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document, ballot widget not started");
        return;
    };

    if is_loading(&document.ready_state()) {
        let ready = document.clone();
        let on_ready = Closure::once_into_js(move || start(ready));
        if let Err(e) =
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            log::error!("Failed to wait for DOMContentLoaded: {:?}", e);
        }
    } else {
        start(document);
    }
}
