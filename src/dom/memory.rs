//! In-memory document used by tests and the CLI binaries.
//!
//! The tree is flattened into a list of elements in document order; nesting
//! is irrelevant to the switcher, which only ever selects by attribute or
//! class. Documents round-trip through JSON fixtures.

use crate::dom::DocumentView;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Index of an element inside a `MemoryDocument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Handle of the element at `index` in document order.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// One element: tag, attributes, classes and text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryElement {
    pub tag: String,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    #[serde(default)]
    pub classes: BTreeSet<String>,

    #[serde(default)]
    pub text: String,
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            classes: BTreeSet::new(),
            text: String::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryDocument {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub elements: Vec<MemoryElement>,
}

impl MemoryDocument {
    /// Empty page with an `<html>` root and a `<body>`.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            elements: vec![MemoryElement::new("html"), MemoryElement::new("body")],
        }
    }

    /// A document without root or body, for degraded-page tests.
    pub fn bare() -> Self {
        Self {
            title: String::new(),
            elements: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append an element and return its handle.
    pub fn push(&mut self, element: MemoryElement) -> NodeId {
        self.elements.push(element);
        NodeId(self.elements.len() - 1)
    }

    pub fn element(&self, node: NodeId) -> Option<&MemoryElement> {
        self.elements.get(node.0)
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .map(|el| el.classes.contains(class))
            .unwrap_or(false)
    }

    fn first_with_tag(&self, tag: &str) -> Option<NodeId> {
        self.elements.iter().position(|el| el.tag == tag).map(NodeId)
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentView for MemoryDocument {
    type Node = NodeId;

    fn nodes_with_attribute(&self, attribute: &str) -> Vec<NodeId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.attributes.contains_key(attribute))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.classes.contains(class))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    fn root(&self) -> Option<NodeId> {
        self.first_with_tag("html")
    }

    fn body(&self) -> Option<NodeId> {
        self.first_with_tag("body")
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.element(*node)
            .map(|el| el.tag.to_ascii_lowercase())
            .unwrap_or_default()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.element(*node)
            .and_then(|el| el.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        if let Some(el) = self.elements.get_mut(node.0) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn text(&self, node: &NodeId) -> String {
        self.element(*node).map(|el| el.text.clone()).unwrap_or_default()
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        if let Some(el) = self.elements.get_mut(node.0) {
            el.text = text.to_string();
        }
    }

    fn toggle_class(&mut self, node: &NodeId, class: &str, on: bool) {
        if let Some(el) = self.elements.get_mut(node.0) {
            if on {
                el.classes.insert(class.to_string());
            } else {
                el.classes.remove(class);
            }
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_root_and_body() {
        let doc = MemoryDocument::new();
        assert_eq!(doc.root(), Some(NodeId(0)));
        assert_eq!(doc.body(), Some(NodeId(1)));
    }

    #[test]
    fn test_bare_has_no_root() {
        let doc = MemoryDocument::bare();
        assert!(doc.root().is_none());
        assert!(doc.body().is_none());
    }

    #[test]
    fn test_nodes_with_attribute_in_document_order() {
        let mut doc = MemoryDocument::new();
        let a = doc.push(MemoryElement::new("p").attr("data-lang-en", "A"));
        doc.push(MemoryElement::new("p"));
        let c = doc.push(MemoryElement::new("h1").attr("data-lang-en", ""));
        assert_eq!(doc.nodes_with_attribute("data-lang-en"), vec![a, c]);
    }

    #[test]
    fn test_toggle_class() {
        let mut doc = MemoryDocument::new();
        let button = doc.push(MemoryElement::new("button").class("lang-switch"));
        doc.toggle_class(&button, "active", true);
        assert!(doc.has_class(button, "active"));
        doc.toggle_class(&button, "active", false);
        assert!(!doc.has_class(button, "active"));
        assert!(doc.has_class(button, "lang-switch"));
    }

    #[test]
    fn test_tag_name_is_lower_case() {
        let mut doc = MemoryDocument::new();
        let node = doc.push(MemoryElement::new("TEXTAREA"));
        assert_eq!(doc.tag_name(&node), "textarea");
    }

    #[test]
    fn test_writes_to_missing_node_are_ignored() {
        let mut doc = MemoryDocument::new();
        let before = doc.clone();
        doc.set_text(&NodeId(42), "x");
        doc.set_attribute(&NodeId(42), "dir", "rtl");
        doc.toggle_class(&NodeId(42), "active", true);
        assert_eq!(doc, before);
        assert_eq!(doc.attribute(&NodeId(42), "dir"), None);
    }

    #[test]
    fn test_from_json_defaults() {
        let doc = MemoryDocument::from_json(
            r#"{"elements": [{"tag": "html"}, {"tag": "body"}, {"tag": "p", "text": "Hi"}]}"#,
        )
        .expect("Should parse");
        assert_eq!(doc.title, "");
        assert_eq!(doc.text(&NodeId(2)), "Hi");
        assert!(doc.elements[2].attributes.is_empty());
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(MemoryDocument::from_json("{\"elements\": 3}").is_err());
    }
}
