//! Click subscription for switch controls.

use std::collections::HashMap;
use std::hash::Hash;

/// Callback run when a control is activated.
pub type ClickHandler = Box<dyn FnMut()>;

/// Something that can register a click callback on a document node.
pub trait EventBinder<N> {
    fn on_click(&mut self, control: &N, handler: ClickHandler);
}

/// Handler table keyed by node; `click` plays the part of the browser event
/// loop for in-memory documents.
pub struct MemoryEvents<N> {
    handlers: HashMap<N, Vec<ClickHandler>>,
}

impl<N: Eq + Hash + Clone> MemoryEvents<N> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Run every handler registered on `control`.
    ///
    /// Returns `false` when nothing listens on that node.
    pub fn click(&mut self, control: &N) -> bool {
        match self.handlers.get_mut(control) {
            Some(handlers) if !handlers.is_empty() => {
                for handler in handlers.iter_mut() {
                    handler();
                }
                true
            }
            _ => false,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }
}

impl<N: Eq + Hash + Clone> Default for MemoryEvents<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Eq + Hash + Clone> EventBinder<N> for MemoryEvents<N> {
    fn on_click(&mut self, control: &N, handler: ClickHandler) {
        self.handlers
            .entry(control.clone())
            .or_default()
            .push(handler);
    }
}
