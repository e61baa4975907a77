//! Event wiring for a mounted page

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, KeyboardEvent, Window};
use wisdom_forms::{FormController, FormId, FormsConfig, HeaderScroll, MobileMenu, PageConfig};

use crate::web_dom::{select_all, WebDom};

/// Controller and document shared by every listener on the page
pub(crate) struct App {
    dom: RefCell<WebDom>,
    controller: RefCell<FormController<WebDom>>,
}

impl App {
    pub(crate) fn new(dom: WebDom, controller: FormController<WebDom>) -> Rc<Self> {
        Rc::new(Self {
            dom: RefCell::new(dom),
            controller: RefCell::new(controller),
        })
    }

    pub(crate) fn register_forms(&self) -> Vec<FormId> {
        self.controller
            .borrow_mut()
            .register_configured(&self.dom.borrow())
    }
}

pub(crate) fn report(err: &dyn Display) {
    web_sys::console::error_1(&JsValue::from_str(&format!("wisdom-forms: {}", err)));
}

fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

/// Submit and blur listeners for one registered form
pub(crate) fn wire_form(app: &Rc<App>, id: FormId) -> Result<(), JsValue> {
    let (form, blur_targets) = {
        let controller = app.controller.borrow();
        (controller.form_node(id).cloned(), controller.blur_targets(id))
    };
    let Some(form) = form else {
        return Ok(());
    };

    let submit_app = Rc::clone(app);
    listen(&form, "submit", move |event: Event| {
        event.prevent_default();
        let app = Rc::clone(&submit_app);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = FormController::drive_submit(&app.controller, &app.dom, id).await {
                report(&err);
            }
        });
    })?;

    for target in blur_targets {
        let app = Rc::clone(app);
        let field = target.clone();
        listen(&target, "blur", move |_event: Event| {
            // Focusing the first invalid field during a submit pass blurs
            // another one while both cells are already borrowed
            let (Ok(mut controller), Ok(mut dom)) =
                (app.controller.try_borrow_mut(), app.dom.try_borrow_mut())
            else {
                return;
            };
            if let Err(err) = controller.handle_blur(&mut dom, id, &field) {
                report(&err);
            }
        })?;
    }

    Ok(())
}

/// Scroll listener for the sticky header
pub(crate) fn wire_header(window: &Window, app: &Rc<App>, page: &PageConfig) -> Result<(), JsValue> {
    let header = HeaderScroll::register(&*app.dom.borrow(), &page.header_id, page.scroll_threshold);
    let Some(header) = header else {
        return Ok(());
    };

    let sync = {
        let app = Rc::clone(app);
        let window = window.clone();
        move || {
            let offset = window.scroll_y().unwrap_or(0.0);
            if let Err(err) = header.on_scroll(&mut *app.dom.borrow_mut(), offset) {
                report(&err);
            }
        }
    };
    sync();

    let closure = Closure::<dyn FnMut()>::new(sync);
    window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Toggle, link and Escape listeners for the mobile menu
pub(crate) fn wire_menu(window: &Window, app: &Rc<App>, page: &PageConfig) -> Result<(), JsValue> {
    let menu = MobileMenu::register(&*app.dom.borrow(), &page.menu_toggle_id, &page.menu_id);
    let Some(menu) = menu else {
        return Ok(());
    };
    let menu = Rc::new(menu);

    {
        let app = Rc::clone(app);
        let toggle = menu.toggle_node().clone();
        let menu = Rc::clone(&menu);
        listen(&toggle, "click", move |_event: Event| {
            if let Err(err) = menu.toggle(&mut *app.dom.borrow_mut()) {
                report(&err);
            }
        })?;
    }

    for link in select_all(menu.menu_node(), "a") {
        let app = Rc::clone(app);
        let menu = Rc::clone(&menu);
        listen(&link, "click", move |_event: Event| {
            if let Err(err) = menu.close(&mut *app.dom.borrow_mut()) {
                report(&err);
            }
        })?;
    }

    let Some(root) = window.document().and_then(|d| d.document_element()) else {
        return Ok(());
    };
    let app = Rc::clone(app);
    listen(&root, "keydown", move |event: Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let Ok(mut dom) = app.dom.try_borrow_mut() else {
            return;
        };
        if let Err(err) = menu.on_key(&mut *dom, &event.key()) {
            report(&err);
        }
    })
}

/// Register configured forms and attach every page listener
pub(crate) fn mount_page(window: &Window, app: &Rc<App>, config: &FormsConfig) -> Result<usize, JsValue> {
    let ids = app.register_forms();
    for id in &ids {
        wire_form(app, *id)?;
    }
    wire_header(window, app, &config.page)?;
    wire_menu(window, app, &config.page)?;
    Ok(ids.len())
}
