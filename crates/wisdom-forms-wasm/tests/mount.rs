//! Browser tests for `mount`: form registration and page listeners
//!
//! Run with `wasm-pack test --headless --firefox crates/wisdom-forms-wasm`.

#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, KeyboardEventInit};
use wisdom_forms::FormsConfig;
use wisdom_forms_wasm::mount;

wasm_bindgen_test_configure!(run_in_browser);

const CONTACT_FORM: &str = r#"
<form id="contact-form">
  <div class="form-group"><input id="name" name="name" type="text" required></div>
  <div class="form-group"><input id="email" name="email" type="email" required></div>
  <div class="hp-field"><input id="contact-website" name="website" type="text"></div>
  <button id="send" type="submit">Send <span class="icon"></span></button>
</form>
<div id="contact-success" hidden><p>Thanks!</p></div>
"#;

const MENU: &str = r##"
<header id="site-header">
  <button id="mobile-menu-toggle" aria-expanded="false">Menu</button>
  <nav id="mobile-menu" aria-hidden="true"><a id="menu-link" href="#contact">Contact</a></nav>
</header>
"##;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn render(markup: &str) -> Document {
    let document = document();
    document.body().unwrap().set_inner_html(markup);
    document
}

fn by_id(document: &Document, id: &str) -> Element {
    document.get_element_by_id(id).unwrap()
}

fn config_with_latency(latency_ms: u64) -> JsValue {
    let mut config = FormsConfig::default();
    config.submission.latency_ms = latency_ms;
    serde_wasm_bindgen::to_value(&config).unwrap()
}

fn submit(form: &Element) {
    let event = Event::new("submit").unwrap();
    form.dispatch_event(&event).unwrap();
}

/// Let spawned submit tasks and short timers run
async fn settle(millis: u32) {
    TimeoutFuture::new(millis).await;
}

#[wasm_bindgen_test]
fn test_mount_empty_page_is_a_no_op() {
    render("<main><p>Nothing to wire here</p></main>");
    assert_eq!(mount(JsValue::UNDEFINED).unwrap(), 0);
}

#[wasm_bindgen_test]
fn test_mount_registers_only_present_forms() {
    render(&format!("{}{}", CONTACT_FORM, MENU));
    assert_eq!(mount(JsValue::NULL).unwrap(), 1);
}

#[wasm_bindgen_test]
fn test_mount_rejects_malformed_config() {
    render(CONTACT_FORM);
    assert!(mount(JsValue::from_str("not a config")).is_err());
}

#[wasm_bindgen_test]
fn test_menu_toggle_and_escape() {
    let document = render(MENU);
    mount(JsValue::UNDEFINED).unwrap();

    let toggle = by_id(&document, "mobile-menu-toggle");
    let menu = by_id(&document, "mobile-menu");

    toggle.unchecked_ref::<HtmlElement>().click();
    assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("true"));
    assert_eq!(menu.get_attribute("aria-hidden").as_deref(), Some("false"));
    assert!(menu.class_list().contains("open"));

    let init = KeyboardEventInit::new();
    init.set_key("Escape");
    let escape = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    document
        .document_element()
        .unwrap()
        .dispatch_event(&escape)
        .unwrap();

    assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("false"));
    assert!(!menu.class_list().contains("open"));
}

#[wasm_bindgen_test]
fn test_menu_link_closes_menu() {
    let document = render(MENU);
    mount(JsValue::UNDEFINED).unwrap();

    let toggle = by_id(&document, "mobile-menu-toggle");
    toggle.unchecked_ref::<HtmlElement>().click();
    by_id(&document, "menu-link")
        .unchecked_ref::<HtmlElement>()
        .click();

    assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("false"));
}

#[wasm_bindgen_test]
async fn test_invalid_submit_renders_errors_and_focuses() {
    let document = render(CONTACT_FORM);
    mount(JsValue::UNDEFINED).unwrap();

    submit(&by_id(&document, "contact-form"));
    settle(0).await;

    let name = by_id(&document, "name");
    assert!(name.class_list().contains("error"));
    assert_eq!(
        document.query_selector_all(".form-error-msg").unwrap().length(),
        2
    );
    assert_eq!(document.active_element(), Some(name));
    assert!(by_id(&document, "contact-success").unchecked_ref::<HtmlElement>().hidden());
}

#[wasm_bindgen_test]
async fn test_valid_submit_shows_success() {
    let document = render(CONTACT_FORM);
    mount(config_with_latency(10)).unwrap();

    by_id(&document, "name")
        .unchecked_ref::<web_sys::HtmlInputElement>()
        .set_value("Bill");
    by_id(&document, "email")
        .unchecked_ref::<web_sys::HtmlInputElement>()
        .set_value("bill@wisdom.com");

    submit(&by_id(&document, "contact-form"));
    settle(0).await;

    let send = by_id(&document, "send");
    assert!(send.unchecked_ref::<web_sys::HtmlButtonElement>().disabled());
    assert_eq!(send.text_content().as_deref(), Some("Sending..."));

    settle(50).await;

    let form = by_id(&document, "contact-form");
    let success = by_id(&document, "contact-success");
    assert!(form.unchecked_ref::<HtmlElement>().hidden());
    assert!(!success.unchecked_ref::<HtmlElement>().hidden());
    assert_eq!(success.get_attribute("aria-live").as_deref(), Some("assertive"));
}

#[wasm_bindgen_test]
async fn test_filled_honeypot_changes_nothing() {
    let document = render(CONTACT_FORM);
    mount(config_with_latency(0)).unwrap();

    by_id(&document, "contact-website")
        .unchecked_ref::<web_sys::HtmlInputElement>()
        .set_value("http://spam.example");

    submit(&by_id(&document, "contact-form"));
    settle(20).await;

    assert_eq!(
        document.query_selector_all(".form-error-msg").unwrap().length(),
        0
    );
    assert!(!by_id(&document, "contact-form").unchecked_ref::<HtmlElement>().hidden());
}
