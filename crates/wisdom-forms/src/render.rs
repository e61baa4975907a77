//! Inline error UI
//!
//! An invalid field gets the error marker class plus exactly one message node:
//!
//! ```html
//! <p class="form-error-msg" role="alert" data-error-for="email">Please enter a valid email address</p>
//! ```
//!
//! The message goes into the field's parent, or for checkboxes into the
//! enclosing checkbox group. Messages are matched back to their field through
//! `data-error-for`, so fields sharing a parent never clear each other's errors.
//! Form-level messages carry `data-form-error` instead, outside the field key
//! namespace.

use crate::config::ClassNames;
use crate::dom::Dom;
use crate::error::DomError;
use crate::field::Field;
use wisdom_forms_validation::FieldKind;

const ERROR_FOR_ATTR: &str = "data-error-for";
const FORM_ERROR_ATTR: &str = "data-form-error";

/// Mark a node as an assertive live region
pub fn announce<D: Dom>(dom: &mut D, node: &D::Node) -> Result<(), DomError> {
    dom.set_attribute(node, "role", "alert")?;
    dom.set_attribute(node, "aria-live", "assertive")
}

/// Strip every error marker and message under `form`
pub fn clear_form_errors<D: Dom>(
    dom: &mut D,
    form: &D::Node,
    classes: &ClassNames,
) -> Result<(), DomError> {
    for node in dom.descendants_with_class(form, &classes.error) {
        dom.remove_class(&node, &classes.error)?;
    }
    for node in dom.descendants_with_class(form, &classes.message) {
        dom.remove(&node)?;
    }
    Ok(())
}

/// Mark `field` invalid and (re)place its message
///
/// Returns the message node, or `None` when the field has no host to put it in.
pub fn show_field_error<D: Dom>(
    dom: &mut D,
    field: &Field<D::Node>,
    message: &str,
    classes: &ClassNames,
) -> Result<Option<D::Node>, DomError> {
    dom.add_class(&field.node, &classes.error)?;

    let Some(host) = error_host(dom, field, classes) else {
        return Ok(None);
    };
    remove_messages(dom, &host, &field.key, classes)?;

    let node = message_node(dom, &field.key, message, classes)?;
    dom.append_child(&host, &node)?;
    Ok(Some(node))
}

/// Drop the marker and message of a field that is valid again
pub fn clear_field_error<D: Dom>(
    dom: &mut D,
    field: &Field<D::Node>,
    classes: &ClassNames,
) -> Result<(), DomError> {
    dom.remove_class(&field.node, &classes.error)?;
    if let Some(host) = error_host(dom, field, classes) {
        remove_messages(dom, &host, &field.key, classes)?;
    }
    Ok(())
}

/// Append a form-level message (submission failures)
pub fn show_form_error<D: Dom>(
    dom: &mut D,
    form: &D::Node,
    message: &str,
    classes: &ClassNames,
) -> Result<D::Node, DomError> {
    for node in form_messages(dom, form, classes) {
        dom.remove(&node)?;
    }
    let node = dom.create_element("p")?;
    dom.set_attribute(&node, "class", &classes.message)?;
    dom.set_attribute(&node, FORM_ERROR_ATTR, "")?;
    dom.set_text(&node, message)?;
    announce(dom, &node)?;
    dom.append_child(form, &node)?;
    Ok(node)
}

/// Form-level message nodes currently attached under `root`
pub fn form_messages<D: Dom>(dom: &D, root: &D::Node, classes: &ClassNames) -> Vec<D::Node> {
    dom.descendants_with_class(root, &classes.message)
        .into_iter()
        .filter(|n| dom.has_attribute(n, FORM_ERROR_ATTR))
        .collect()
}

/// Message nodes currently attached for `key` under `root`
pub fn messages_for<D: Dom>(
    dom: &D,
    root: &D::Node,
    key: &str,
    classes: &ClassNames,
) -> Vec<D::Node> {
    dom.descendants_with_class(root, &classes.message)
        .into_iter()
        .filter(|n| dom.attribute(n, ERROR_FOR_ATTR).as_deref() == Some(key))
        .collect()
}

fn error_host<D: Dom>(dom: &D, field: &Field<D::Node>, classes: &ClassNames) -> Option<D::Node> {
    if field.kind == FieldKind::Checkbox {
        if let Some(group) = dom.closest_with_class(&field.node, &classes.checkbox_group) {
            return Some(group);
        }
    }
    dom.parent(&field.node)
}

fn remove_messages<D: Dom>(
    dom: &mut D,
    host: &D::Node,
    key: &str,
    classes: &ClassNames,
) -> Result<(), DomError> {
    for node in messages_for(dom, host, key, classes) {
        dom.remove(&node)?;
    }
    Ok(())
}

fn message_node<D: Dom>(
    dom: &mut D,
    key: &str,
    message: &str,
    classes: &ClassNames,
) -> Result<D::Node, DomError> {
    let node = dom.create_element("p")?;
    dom.set_attribute(&node, "class", &classes.message)?;
    dom.set_attribute(&node, ERROR_FOR_ATTR, key)?;
    dom.set_text(&node, message)?;
    announce(dom, &node)?;
    Ok(node)
}
