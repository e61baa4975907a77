//! Wisdom Forms WASM
//!
//! Browser bindings for the wisdom-forms controller. `mount` registers the
//! configured forms on the live document and attaches submit, blur, scroll
//! and menu listeners.
//!
//! ```js
//! import init, { mount } from "./wisdom_forms_wasm.js";
//! await init();
//! mount({ submission: { latency_ms: 800 } });
//! ```

mod app;
mod clock;
mod web_dom;

use std::rc::Rc;

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wisdom_forms::{FormController, FormsConfig, SimulatedSubmitter};
use wisdom_forms_validation as core;

pub use clock::TimerClock;
pub use web_dom::WebDom;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Wire up the page
///
/// `config` is a (partial) `FormsConfig` object; `undefined` or `null` uses
/// the defaults. Returns the number of forms registered.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<usize, JsValue> {
    let config = parse_config(config)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;

    let submitter = SimulatedSubmitter::new(TimerClock, config.submission.latency());
    let controller = FormController::new(config.clone(), Rc::new(submitter));
    let app = app::App::new(WebDom::new(document), controller);

    app::mount_page(&window, &app, &config)
}

fn parse_config(config: JsValue) -> Result<FormsConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(FormsConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))
}

/// Check an email address against the form's pattern
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email(email: &str) -> bool {
    core::is_valid_email(email)
}

/// Field snapshot as sent from JavaScript
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FieldSnapshot {
    #[serde(default)]
    pub tag: String,
    #[serde(default, rename = "type")]
    pub type_attr: Option<String>,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub selected_index: Option<usize>,
}

impl FieldSnapshot {
    /// Error message for the snapshot, `None` when it is valid
    pub fn check(&self) -> Option<String> {
        let kind = core::FieldKind::resolve(&self.tag, self.type_attr.as_deref(), self.multiple);
        let input = core::FieldInput::new(kind, self.required, self.value.clone())
            .with_checked(self.checked)
            .with_selected_index(self.selected_index);
        core::validate(&input).err().map(|e| e.to_string())
    }
}

/// Validate one field outside any registered form
///
/// Returns the default message for the first failing rule, or `null`.
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(snapshot: JsValue) -> Result<Option<String>, JsValue> {
    let snapshot: FieldSnapshot = serde_wasm_bindgen::from_value(snapshot)
        .map_err(|e| JsValue::from_str(&format!("Invalid field: {}", e)))?;
    Ok(snapshot.check())
}
