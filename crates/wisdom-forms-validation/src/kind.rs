//! Field kinds resolved from markup

use serde::{Deserialize, Serialize};

/// What kind of control a field is, resolved once when a form is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// `<input>` text-like types and `<textarea>`
    Text,
    /// `<input type="email">`
    Email,
    /// `<input type="checkbox">`
    Checkbox,
    /// single `<select>` (a `multiple` select is `Other`)
    Select,
    /// anything else (radio, number, date, multi-select, ...)
    Other,
}

impl FieldKind {
    /// Resolve a kind from the control's tag name, `type` attribute and `multiple` flag
    ///
    /// # Examples
    /// ```
    /// use wisdom_forms_validation::FieldKind;
    /// assert_eq!(FieldKind::resolve("input", Some("email"), false), FieldKind::Email);
    /// assert_eq!(FieldKind::resolve("SELECT", None, false), FieldKind::Select);
    /// assert_eq!(FieldKind::resolve("select", None, true), FieldKind::Other);
    /// ```
    pub fn resolve(tag: &str, type_attr: Option<&str>, multiple: bool) -> Self {
        let tag = tag.to_ascii_lowercase();
        match tag.as_str() {
            "textarea" => FieldKind::Text,
            "select" if multiple => FieldKind::Other,
            "select" => FieldKind::Select,
            "input" => {
                let input_type = type_attr.unwrap_or("text").trim().to_ascii_lowercase();
                match input_type.as_str() {
                    "" | "text" | "search" | "tel" | "url" | "password" => FieldKind::Text,
                    "email" => FieldKind::Email,
                    "checkbox" => FieldKind::Checkbox,
                    _ => FieldKind::Other,
                }
            }
            _ => FieldKind::Other,
        }
    }

    /// Kinds whose emptiness is judged on the trimmed text value
    pub fn is_text_like(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Email | FieldKind::Other)
    }
}
