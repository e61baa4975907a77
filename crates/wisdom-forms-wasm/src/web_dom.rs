//! `Dom` over the browser document

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};
use wisdom_forms::{Dom, DomError, FieldState};

const CONTROLS_SELECTOR: &str = "input, textarea, select";
const SUBMIT_SELECTOR: &str = "[type=\"submit\"]";

/// The live page document
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn js_error(op: &'static str) -> impl Fn(JsValue) -> DomError {
    move |err| DomError::operation(op, format!("{:?}", err))
}

/// All elements matching `selector` under `root`, in document order
pub(crate) fn select_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn class_selector(class: &str) -> String {
    format!(".{}", class)
}

impl Dom for WebDom {
    type Node = Element;
    /// `innerHTML`, or `value` for `<input>` controls
    type Content = String;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn form_controls(&self, form: &Element) -> Vec<Element> {
        select_all(form, CONTROLS_SELECTOR)
    }

    fn submit_control(&self, form: &Element) -> Option<Element> {
        form.query_selector(SUBMIT_SELECTOR).ok().flatten()
    }

    fn descendants_with_class(&self, root: &Element, class: &str) -> Vec<Element> {
        select_all(root, &class_selector(class))
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn closest_with_class(&self, node: &Element, class: &str) -> Option<Element> {
        node.closest(&class_selector(class)).ok().flatten()
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn has_attribute(&self, node: &Element, name: &str) -> bool {
        node.has_attribute(name)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn field_state(&self, node: &Element) -> FieldState {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            FieldState {
                value: input.value(),
                checked: input.checked(),
                selected_index: None,
            }
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            FieldState {
                value: select.value(),
                checked: false,
                selected_index: usize::try_from(select.selected_index()).ok(),
            }
        } else if let Some(textarea) = node.dyn_ref::<HtmlTextAreaElement>() {
            FieldState {
                value: textarea.value(),
                ..Default::default()
            }
        } else {
            FieldState::default()
        }
    }

    fn text(&self, node: &Element) -> String {
        match node.dyn_ref::<HtmlInputElement>() {
            // <input type="submit"> carries its label in `value`
            Some(input) => input.value(),
            None => node.text_content().unwrap_or_default(),
        }
    }

    fn add_class(&mut self, node: &Element, class: &str) -> Result<(), DomError> {
        node.class_list().add_1(class).map_err(js_error("classList.add"))
    }

    fn remove_class(&mut self, node: &Element, class: &str) -> Result<(), DomError> {
        node.class_list()
            .remove_1(class)
            .map_err(js_error("classList.remove"))
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> Result<(), DomError> {
        node.set_attribute(name, value)
            .map_err(js_error("setAttribute"))
    }

    fn create_element(&mut self, tag: &str) -> Result<Element, DomError> {
        self.document
            .create_element(tag)
            .map_err(js_error("createElement"))
    }

    fn set_text(&mut self, node: &Element, text: &str) -> Result<(), DomError> {
        match node.dyn_ref::<HtmlInputElement>() {
            Some(input) => input.set_value(text),
            None => node.set_text_content(Some(text)),
        }
        Ok(())
    }

    fn save_content(&self, node: &Element) -> String {
        match node.dyn_ref::<HtmlInputElement>() {
            Some(input) => input.value(),
            None => node.inner_html(),
        }
    }

    fn restore_content(&mut self, node: &Element, content: &String) -> Result<(), DomError> {
        match node.dyn_ref::<HtmlInputElement>() {
            Some(input) => input.set_value(content),
            None => node.set_inner_html(content),
        }
        Ok(())
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(js_error("appendChild"))
    }

    fn remove(&mut self, node: &Element) -> Result<(), DomError> {
        node.remove();
        Ok(())
    }

    fn focus(&mut self, node: &Element) -> Result<(), DomError> {
        match node.dyn_ref::<HtmlElement>() {
            Some(element) => element.focus().map_err(js_error("focus")),
            None => Ok(()),
        }
    }

    fn set_disabled(&mut self, node: &Element, disabled: bool) -> Result<(), DomError> {
        if let Some(button) = node.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if disabled {
            node.set_attribute("disabled", "")
                .map_err(js_error("setAttribute"))?;
        } else {
            node.remove_attribute("disabled")
                .map_err(js_error("removeAttribute"))?;
        }
        Ok(())
    }

    fn set_hidden(&mut self, node: &Element, hidden: bool) -> Result<(), DomError> {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            return Err(DomError::operation("hidden", "element is not an HTMLElement"));
        };
        element.set_hidden(hidden);
        let style = element.style();
        if hidden {
            style
                .set_property("display", "none")
                .map_err(js_error("style.setProperty"))
        } else {
            style
                .remove_property("display")
                .map(|_| ())
                .map_err(js_error("style.removeProperty"))
        }
    }
}
