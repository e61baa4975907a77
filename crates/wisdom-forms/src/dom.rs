//! DOM access used by the form controller
//!
//! The controller never talks to a browser directly. Everything it needs
//! from the page goes through [`Dom`], so the same state machine runs against
//! the real document (see the `wisdom-forms-wasm` crate) and against
//! [`MemoryDom`](crate::MemoryDom) in tests.

use std::fmt;

use crate::error::DomError;

/// Live state of a form control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub checked: bool,
    /// Selected option index for selects; `None` when nothing is selected
    pub selected_index: Option<usize>,
}

/// Read and write access to a document tree
pub trait Dom {
    /// Handle to an element
    type Node: Clone + PartialEq + fmt::Debug;

    /// Snapshot of a node's content, markup included
    type Content: Clone + fmt::Debug;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// `input`, `textarea` and `select` descendants of `form`, in document order
    fn form_controls(&self, form: &Self::Node) -> Vec<Self::Node>;

    /// The first `[type="submit"]` descendant of `form`
    fn submit_control(&self, form: &Self::Node) -> Option<Self::Node>;

    /// Descendants of `root` (excluding `root`) carrying `class`, in document order
    fn descendants_with_class(&self, root: &Self::Node, class: &str) -> Vec<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Nearest inclusive ancestor carrying `class`
    fn closest_with_class(&self, node: &Self::Node, class: &str) -> Option<Self::Node>;

    /// Lowercase tag name
    fn tag_name(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn has_attribute(&self, node: &Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn field_state(&self, node: &Self::Node) -> FieldState;

    /// Text content of the node and its descendants
    fn text(&self, node: &Self::Node) -> String;

    fn add_class(&mut self, node: &Self::Node, class: &str) -> Result<(), DomError>;

    fn remove_class(&mut self, node: &Self::Node, class: &str) -> Result<(), DomError>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<(), DomError>;

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> Result<Self::Node, DomError>;

    /// Replace the node's content with `text`
    fn set_text(&mut self, node: &Self::Node, text: &str) -> Result<(), DomError>;

    fn save_content(&self, node: &Self::Node) -> Self::Content;

    /// Put back content taken with [`save_content`](Self::save_content)
    fn restore_content(&mut self, node: &Self::Node, content: &Self::Content) -> Result<(), DomError>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    /// Detach the node from the tree
    fn remove(&mut self, node: &Self::Node) -> Result<(), DomError>;

    fn focus(&mut self, node: &Self::Node) -> Result<(), DomError>;

    fn set_disabled(&mut self, node: &Self::Node, disabled: bool) -> Result<(), DomError>;

    fn set_hidden(&mut self, node: &Self::Node, hidden: bool) -> Result<(), DomError>;
}
