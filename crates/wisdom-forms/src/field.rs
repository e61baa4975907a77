//! Form fields resolved at registration time

use wisdom_forms_validation::{FieldInput, FieldKind};

use crate::dom::Dom;

/// A form control bound to its form for the page's lifetime
///
/// Kind and requiredness are read from markup once; the value is read live
/// through [`Field::snapshot`] every time the field is validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<N> {
    pub node: N,
    /// Ties the field to its error node: the `name`, else the `id`, else `field-<index>`
    pub key: String,
    pub name: Option<String>,
    pub kind: FieldKind,
    pub required: bool,
}

impl<N: Clone> Field<N> {
    pub fn resolve<D: Dom<Node = N>>(dom: &D, node: N, index: usize) -> Self {
        let tag = dom.tag_name(&node);
        let type_attr = dom.attribute(&node, "type");
        let kind = FieldKind::resolve(&tag, type_attr.as_deref(), dom.has_attribute(&node, "multiple"));

        let name = dom.attribute(&node, "name").filter(|n| !n.is_empty());
        let key = name
            .clone()
            .or_else(|| dom.attribute(&node, "id").filter(|id| !id.is_empty()))
            .unwrap_or_else(|| format!("field-{}", index));

        Self {
            required: dom.has_attribute(&node, "required"),
            node,
            key,
            name,
            kind,
        }
    }

    /// Read the live control state into a rule input
    pub fn snapshot<D: Dom<Node = N>>(&self, dom: &D) -> FieldInput {
        let state = dom.field_state(&self.node);
        FieldInput::new(self.kind, self.required, state.value)
            .with_checked(state.checked)
            .with_selected_index(state.selected_index)
    }
}

/// Buttons are controls too, but never validated or submitted as data
pub(crate) fn is_button_like<D: Dom>(dom: &D, node: &D::Node) -> bool {
    dom.attribute(node, "type")
        .map(|t| {
            matches!(
                t.to_ascii_lowercase().as_str(),
                "submit" | "button" | "reset" | "image"
            )
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDom, NodeId};

    #[test]
    fn test_resolve_reads_markup_once() {
        let mut dom = MemoryDom::new();
        let email = dom.element(
            NodeId::ROOT,
            "input",
            &[("type", "email"), ("name", "email"), ("required", "")],
        );
        let field = Field::resolve(&dom, email, 0);
        assert_eq!(field.kind, FieldKind::Email);
        assert!(field.required);
        assert_eq!(field.key, "email");
    }

    #[test]
    fn test_key_falls_back_to_id_then_index() {
        let mut dom = MemoryDom::new();
        let with_id = dom.element(NodeId::ROOT, "textarea", &[("id", "msg")]);
        let bare = dom.element(NodeId::ROOT, "input", &[]);
        assert_eq!(Field::resolve(&dom, with_id, 0).key, "msg");
        assert_eq!(Field::resolve(&dom, bare, 3).key, "field-3");
    }

    #[test]
    fn test_snapshot_is_live() {
        let mut dom = MemoryDom::new();
        let input = dom.element(NodeId::ROOT, "input", &[("name", "name"), ("required", "")]);
        let field = Field::resolve(&dom, input, 0);
        assert_eq!(field.snapshot(&dom).value, "");
        dom.set_value(input, "Bill");
        assert_eq!(field.snapshot(&dom).value, "Bill");
    }

    #[test]
    fn test_button_like_controls() {
        let mut dom = MemoryDom::new();
        let submit = dom.element(NodeId::ROOT, "input", &[("type", "submit")]);
        let text = dom.element(NodeId::ROOT, "input", &[("type", "text")]);
        assert!(is_button_like(&dom, &submit));
        assert!(!is_button_like(&dom, &text));
    }
}
