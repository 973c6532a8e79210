//! Document view: the DOM capabilities the switcher needs.
//!
//! - `memory`: in-memory element list used by tests and the CLI binaries
//! - `crate::web`: binding to the real browser document (`web` feature)

pub mod memory;

pub use memory::{MemoryDocument, MemoryElement, NodeId};

/// Abstract view over a document tree.
///
/// Lookups return node handles in document order. Writes to a node that no
/// longer exists are ignored by implementations.
pub trait DocumentView {
    /// Handle to one element of the document.
    type Node: Clone;

    /// All elements carrying `attribute`, whatever its value.
    fn nodes_with_attribute(&self, attribute: &str) -> Vec<Self::Node>;

    /// All elements whose class list contains `class`.
    fn nodes_with_class(&self, class: &str) -> Vec<Self::Node>;

    /// The document root (`<html>`), if any.
    fn root(&self) -> Option<Self::Node>;

    /// The document body, if any.
    fn body(&self) -> Option<Self::Node>;

    /// Lower-case tag name of `node`.
    fn tag_name(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    fn text(&self, node: &Self::Node) -> String;

    /// Replace the whole text content of `node`.
    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Add `class` to `node` when `on`, remove it otherwise.
    fn toggle_class(&mut self, node: &Self::Node, class: &str, on: bool);

    /// Set the global page title.
    fn set_title(&mut self, title: &str);
}
