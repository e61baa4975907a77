//! In-memory DOM
//!
//! Arena-backed document tree implementing [`Dom`]. Used for headless runs
//! and tests; it models only what the form pipeline touches (attributes,
//! class lists, control state, text, focus, disabled and hidden flags).
//!
//! Removing a node releases its subtree: the slots are reused by later
//! allocations and old [`NodeId`]s to them go stale (every lookup through a
//! stale id fails with [`DomError::UnknownNode`]).

use std::collections::BTreeMap;

use crate::dom::{Dom, FieldState};
use crate::error::DomError;

/// Node identifier: arena slot plus the generation it was handed out in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// The `<body>` every [`MemoryDom`] starts with
    pub const ROOT: NodeId = NodeId {
        index: 0,
        generation: 0,
    };
}

#[derive(Debug, Clone, Default)]
struct NodeData {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    value: String,
    checked: bool,
    selected_index: Option<usize>,
    disabled: bool,
    hidden: bool,
    generation: u32,
}

/// Content of a [`MemoryDom`] node: own text plus child elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedContent {
    text: String,
    children: Vec<NodeId>,
}

/// Arena-based document
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<NodeData>,
    free: Vec<usize>,
    focused: Option<NodeId>,
}

impl MemoryDom {
    /// Create a document holding an empty `<body>`
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                tag: "body".to_string(),
                ..Default::default()
            }],
            free: Vec::new(),
            focused: None,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Append a new element under `parent`
    ///
    /// Attributes are applied the way markup would: `class` fills the class
    /// list, `value`, `checked`, `disabled` and `hidden` set control state.
    /// Checkboxes without a `value` get `"on"`.
    pub fn element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.alloc(tag);
        for (name, value) in attrs {
            self.apply_attribute(id, name, value);
        }
        if self.is_checkbox(id) && !self.nodes[id.index].attributes.contains_key("value") {
            self.nodes[id.index].value = "on".to_string();
        }
        self.link(parent, id);
        id
    }

    /// Append a `<select>` with one `<option>` per label; the first option is selected
    ///
    /// Option values are the labels, except the first which is the empty placeholder.
    pub fn select(&mut self, parent: NodeId, attrs: &[(&str, &str)], options: &[&str]) -> NodeId {
        let select = self.element(parent, "select", attrs);
        for (index, label) in options.iter().enumerate() {
            let value = if index == 0 { "" } else { *label };
            let option = self.element(select, "option", &[("value", value)]);
            self.nodes[option.index].text = label.to_string();
        }
        if !options.is_empty() {
            self.select_option(select, Some(0));
        }
        select
    }

    /// Append a text node-like element (`<p>`, `<button>`, ...) with content
    pub fn element_with_text(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> NodeId {
        let id = self.element(parent, tag, attrs);
        self.nodes[id.index].text = text.to_string();
        id
    }

    /// Simulate the user typing into a control
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(data) = self.slot_mut(node) {
            data.value = value.to_string();
        }
    }

    /// Simulate the user ticking or clearing a checkbox
    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        if let Some(data) = self.slot_mut(node) {
            data.checked = checked;
        }
    }

    /// Simulate the user picking an option; the select's value follows the option's
    pub fn select_option(&mut self, select: NodeId, index: Option<usize>) {
        let value = index
            .and_then(|i| self.children_of(select).get(i).copied())
            .and_then(|option| self.nodes[option.index].attributes.get("value").cloned())
            .unwrap_or_default();
        if let Some(data) = self.slot_mut(select) {
            data.selected_index = index;
            data.value = value;
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.slot(node).map(|d| d.disabled).unwrap_or(false)
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.slot(node).map(|d| d.hidden).unwrap_or(false)
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.slot(node)
            .map(|d| d.classes.clone())
            .unwrap_or_default()
    }

    pub fn children_of(&self, node: NodeId) -> Vec<NodeId> {
        self.slot(node)
            .map(|d| d.children.clone())
            .unwrap_or_default()
    }

    /// Whether the node is reachable from the root
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == NodeId::ROOT {
                return true;
            }
            current = self.slot(id).and_then(|d| d.parent);
        }
        false
    }

    /// Number of live nodes (detached but not yet removed ones included)
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Arena slots, live and released
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    fn slot(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes
            .get(id.index)
            .filter(|d| d.generation == id.generation)
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes
            .get_mut(id.index)
            .filter(|d| d.generation == id.generation)
    }

    fn alloc(&mut self, tag: &str) -> NodeId {
        let tag = tag.to_ascii_lowercase();
        match self.free.pop() {
            Some(index) => {
                let generation = self.nodes[index].generation;
                self.nodes[index] = NodeData {
                    tag,
                    generation,
                    ..Default::default()
                };
                NodeId { index, generation }
            }
            None => {
                self.nodes.push(NodeData {
                    tag,
                    ..Default::default()
                });
                NodeId {
                    index: self.nodes.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Free a detached node and its subtree; ids into it go stale
    fn release(&mut self, node: NodeId) {
        let mut subtree = self.descendants(node);
        subtree.push(node);
        for id in subtree {
            if self.focused == Some(id) {
                self.focused = None;
            }
            let generation = self.nodes[id.index].generation.wrapping_add(1);
            self.nodes[id.index] = NodeData {
                generation,
                ..Default::default()
            };
            self.free.push(id.index);
        }
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.unlink(child);
        if let Some(data) = self.slot_mut(parent) {
            data.children.push(child);
            self.nodes[child.index].parent = Some(parent);
        }
    }

    fn unlink(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.index].parent.take() {
            self.nodes[parent.index].children.retain(|c| *c != child);
        }
    }

    fn apply_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let data = &mut self.nodes[id.index];
        match name {
            "class" => {
                data.classes = value.split_whitespace().map(str::to_string).collect();
            }
            "checked" => data.checked = true,
            "disabled" => data.disabled = true,
            "hidden" => data.hidden = true,
            _ => {
                if name == "value" {
                    data.value = value.to_string();
                }
                data.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn is_checkbox(&self, id: NodeId) -> bool {
        let data = &self.nodes[id.index];
        data.tag == "input"
            && data
                .attributes
                .get("type")
                .map(|t| t.eq_ignore_ascii_case("checkbox"))
                .unwrap_or(false)
    }

    fn check(&self, node: NodeId) -> Result<(), DomError> {
        self.slot(node).map(|_| ()).ok_or(DomError::UnknownNode)
    }

    /// Pre-order descendants of `root`, excluding `root`
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children_of(root).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.index].children.iter().rev().copied());
        }
        out
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;
    type Content = SavedContent;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(NodeId::ROOT)
            .into_iter()
            .find(|n| self.nodes[n.index].attributes.get("id").map(String::as_str) == Some(id))
    }

    fn form_controls(&self, form: &NodeId) -> Vec<NodeId> {
        self.descendants(*form)
            .into_iter()
            .filter(|n| matches!(self.nodes[n.index].tag.as_str(), "input" | "textarea" | "select"))
            .collect()
    }

    fn submit_control(&self, form: &NodeId) -> Option<NodeId> {
        self.descendants(*form).into_iter().find(|n| {
            self.nodes[n.index]
                .attributes
                .get("type")
                .map(|t| t.eq_ignore_ascii_case("submit"))
                .unwrap_or(false)
        })
    }

    fn descendants_with_class(&self, root: &NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(*root)
            .into_iter()
            .filter(|n| self.nodes[n.index].classes.iter().any(|c| c == class))
            .collect()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.slot(*node).and_then(|d| d.parent)
    }

    fn closest_with_class(&self, node: &NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(*node);
        while let Some(id) = current {
            if self.has_class(&id, class) {
                return Some(id);
            }
            current = self.parent(&id);
        }
        None
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.slot(*node)
            .map(|d| d.tag.clone())
            .unwrap_or_default()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let data = self.slot(*node)?;
        match name {
            "class" => Some(data.classes.join(" ")),
            "disabled" => data.disabled.then(String::new),
            "hidden" => data.hidden.then(String::new),
            "checked" => data.checked.then(String::new),
            _ => data.attributes.get(name).cloned(),
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.slot(*node)
            .map(|d| d.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn field_state(&self, node: &NodeId) -> FieldState {
        self.slot(*node)
            .map(|d| FieldState {
                value: d.value.clone(),
                checked: d.checked,
                selected_index: d.selected_index,
            })
            .unwrap_or_default()
    }

    fn text(&self, node: &NodeId) -> String {
        let Some(data) = self.slot(*node) else {
            return String::new();
        };
        let mut text = data.text.clone();
        for child in &data.children {
            text.push_str(&self.text(child));
        }
        text
    }

    fn add_class(&mut self, node: &NodeId, class: &str) -> Result<(), DomError> {
        self.check(*node)?;
        let classes = &mut self.nodes[node.index].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) -> Result<(), DomError> {
        self.check(*node)?;
        self.nodes[node.index].classes.retain(|c| c != class);
        Ok(())
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.check(*node)?;
        self.apply_attribute(*node, name, value);
        Ok(())
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        Ok(self.alloc(tag))
    }

    /// Replaced children are detached, not released, so a saved content
    /// snapshot can bring them back
    fn set_text(&mut self, node: &NodeId, text: &str) -> Result<(), DomError> {
        self.check(*node)?;
        for child in self.children_of(*node) {
            self.unlink(child);
        }
        self.nodes[node.index].text = text.to_string();
        Ok(())
    }

    fn save_content(&self, node: &NodeId) -> SavedContent {
        SavedContent {
            text: self.slot(*node).map(|d| d.text.clone()).unwrap_or_default(),
            children: self.children_of(*node),
        }
    }

    fn restore_content(&mut self, node: &NodeId, content: &SavedContent) -> Result<(), DomError> {
        self.check(*node)?;
        for child in self.children_of(*node) {
            if !content.children.contains(&child) {
                self.unlink(child);
                self.release(child);
            }
        }
        self.nodes[node.index].text = content.text.clone();
        for child in &content.children {
            self.check(*child)?;
            self.link(*node, *child);
        }
        Ok(())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        self.check(*parent)?;
        self.check(*child)?;
        self.link(*parent, *child);
        Ok(())
    }

    fn remove(&mut self, node: &NodeId) -> Result<(), DomError> {
        self.check(*node)?;
        if *node == NodeId::ROOT {
            return Err(DomError::operation("remove", "cannot remove the document root"));
        }
        self.unlink(*node);
        self.release(*node);
        Ok(())
    }

    fn focus(&mut self, node: &NodeId) -> Result<(), DomError> {
        self.check(*node)?;
        self.focused = Some(*node);
        Ok(())
    }

    fn set_disabled(&mut self, node: &NodeId, disabled: bool) -> Result<(), DomError> {
        self.check(*node)?;
        self.nodes[node.index].disabled = disabled;
        Ok(())
    }

    fn set_hidden(&mut self, node: &NodeId, hidden: bool) -> Result<(), DomError> {
        self.check(*node)?;
        self.nodes[node.index].hidden = hidden;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id_and_document_order() {
        let mut dom = MemoryDom::new();
        let form = dom.element(NodeId::ROOT, "form", &[("id", "contact-form")]);
        let group = dom.element(form, "div", &[("class", "form-group")]);
        let name = dom.element(group, "input", &[("name", "name")]);
        let message = dom.element(form, "textarea", &[("name", "message")]);
        dom.element(form, "button", &[("type", "submit")]);

        assert_eq!(dom.element_by_id("contact-form"), Some(form));
        assert_eq!(dom.element_by_id("missing"), None);
        assert_eq!(dom.form_controls(&form), vec![name, message]);
    }

    #[test]
    fn test_checkbox_defaults_to_on() {
        let mut dom = MemoryDom::new();
        let checkbox = dom.element(NodeId::ROOT, "input", &[("type", "checkbox")]);
        assert_eq!(dom.field_state(&checkbox).value, "on");
        assert!(!dom.field_state(&checkbox).checked);
    }

    #[test]
    fn test_select_tracks_option_value() {
        let mut dom = MemoryDom::new();
        let select = dom.select(NodeId::ROOT, &[], &["Choose...", "Investor", "Press"]);
        assert_eq!(dom.field_state(&select).selected_index, Some(0));
        assert_eq!(dom.field_state(&select).value, "");

        dom.select_option(select, Some(2));
        assert_eq!(dom.field_state(&select).value, "Press");
    }

    #[test]
    fn test_remove_detaches_subtree() {
        let mut dom = MemoryDom::new();
        let div = dom.element(NodeId::ROOT, "div", &[]);
        let p = dom.element_with_text(div, "p", &[("class", "note")], "hi");
        assert_eq!(dom.descendants_with_class(&NodeId::ROOT, "note"), vec![p]);

        dom.remove(&div).unwrap();
        assert!(!dom.is_attached(p));
        assert!(dom.descendants_with_class(&NodeId::ROOT, "note").is_empty());
    }

    #[test]
    fn test_removed_slots_are_reused() {
        let mut dom = MemoryDom::new();
        let form = dom.element(NodeId::ROOT, "form", &[]);
        let baseline = dom.capacity();

        for _ in 0..10 {
            let p = dom.create_element("p").unwrap();
            dom.append_child(&form, &p).unwrap();
            dom.remove(&p).unwrap();
        }

        assert_eq!(dom.capacity(), baseline + 1);
        assert_eq!(dom.len(), baseline);
    }

    #[test]
    fn test_stale_id_does_not_alias_new_node() {
        let mut dom = MemoryDom::new();
        let old = dom.element_with_text(NodeId::ROOT, "p", &[("class", "note")], "old");
        dom.remove(&old).unwrap();
        let new = dom.element_with_text(NodeId::ROOT, "p", &[], "new");

        assert_ne!(old, new);
        assert_eq!(dom.text(&old), "");
        assert_eq!(dom.add_class(&old, "error"), Err(DomError::UnknownNode));
        assert!(!dom.has_class(&new, "error"));
    }

    #[test]
    fn test_root_cannot_be_removed() {
        let mut dom = MemoryDom::new();
        assert!(dom.remove(&NodeId::ROOT).is_err());
        assert!(dom.is_attached(NodeId::ROOT));
    }

    #[test]
    fn test_closest_with_class_includes_self() {
        let mut dom = MemoryDom::new();
        let group = dom.element(NodeId::ROOT, "label", &[("class", "form-checkbox")]);
        let checkbox = dom.element(group, "input", &[("type", "checkbox")]);
        assert_eq!(dom.closest_with_class(&checkbox, "form-checkbox"), Some(group));
        assert_eq!(dom.closest_with_class(&group, "form-checkbox"), Some(group));
        assert_eq!(dom.closest_with_class(&checkbox, "missing"), None);
    }

    #[test]
    fn test_set_text_replaces_content() {
        let mut dom = MemoryDom::new();
        let button = dom.element_with_text(NodeId::ROOT, "button", &[], "Send");
        dom.set_text(&button, "Sending...").unwrap();
        assert_eq!(dom.text(&button), "Sending...");
    }

    #[test]
    fn test_restore_content_brings_back_markup() {
        let mut dom = MemoryDom::new();
        let button = dom.element_with_text(NodeId::ROOT, "button", &[], "Send ");
        let icon = dom.element(button, "span", &[("class", "icon")]);
        let saved = dom.save_content(&button);

        dom.set_text(&button, "Sending...").unwrap();
        assert!(dom.descendants_with_class(&button, "icon").is_empty());

        dom.restore_content(&button, &saved).unwrap();
        assert_eq!(dom.text(&button), "Send ");
        assert_eq!(dom.descendants_with_class(&button, "icon"), vec![icon]);
    }

    #[test]
    fn test_unknown_node_is_an_error() {
        let mut dom = MemoryDom::new();
        let bogus = NodeId {
            index: 99,
            generation: 0,
        };
        assert_eq!(dom.add_class(&bogus, "error"), Err(DomError::UnknownNode));
    }
}
