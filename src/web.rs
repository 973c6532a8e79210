//! Browser binding: the real document, `localStorage` and DOM click events.
//!
//! Built with the `web` feature for `wasm32-unknown-unknown`; `start` runs
//! the switcher once the document is ready.

use crate::config::SwitcherSettings;
use crate::dom::DocumentView;
use crate::error::{Result, SwitchError};
use crate::events::{ClickHandler, EventBinder};
use crate::storage::PreferenceStore;
use crate::switcher::{initialize, LanguageSwitcher};
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Storage};

pub struct BrowserDocument {
    document: Document,
}

impl BrowserDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn select_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            warn!("Invalid selector '{}'", selector);
            return Vec::new();
        };

        (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl DocumentView for BrowserDocument {
    type Node = Element;

    fn nodes_with_attribute(&self, attribute: &str) -> Vec<Element> {
        self.select_all(&format!("[{}]", attribute))
    }

    fn nodes_with_class(&self, class: &str) -> Vec<Element> {
        self.select_all(&format!(".{}", class))
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn toggle_class(&mut self, node: &Element, class: &str, on: bool) {
        let _ = node.class_list().toggle_with_force(class, on);
    }

    fn set_title(&mut self, title: &str) {
        self.document.set_title(title);
    }
}

pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// `window.localStorage`, if the browser exposes it.
    pub fn from_window() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| SwitchError::Storage("no window".to_string()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self::new(storage)),
            Ok(None) => Err(SwitchError::Storage("localStorage is disabled".to_string())),
            Err(e) => Err(SwitchError::Storage(format!("{:?}", e))),
        }
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| SwitchError::Storage(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| SwitchError::Storage(format!("{:?}", e)))
    }
}

/// localStorage may be missing (privacy modes, sandboxed frames); the page
/// still switches, it just forgets on reload.
enum PageStore {
    Local(LocalStorageStore),
    Volatile(crate::storage::MemoryStore),
}

impl PreferenceStore for PageStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            PageStore::Local(store) => store.get(key),
            PageStore::Volatile(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match self {
            PageStore::Local(store) => store.set(key, value),
            PageStore::Volatile(store) => store.set(key, value),
        }
    }
}

/// Click listeners attached with `addEventListener`.
///
/// Listeners live as long as the page, so their closures are leaked.
#[derive(Default)]
pub struct BrowserEvents;

impl EventBinder<Element> for BrowserEvents {
    fn on_click(&mut self, control: &Element, handler: ClickHandler) {
        let closure = Closure::<dyn FnMut()>::wrap(handler);
        if control
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .is_err()
        {
            warn!("Failed to attach click listener to <{}>", control.tag_name());
        }
        closure.forget();
    }
}

fn run(document: Document) {
    let store = match LocalStorageStore::from_window() {
        Ok(store) => PageStore::Local(store),
        Err(e) => {
            warn!("{}; language preference will not persist", e);
            PageStore::Volatile(crate::storage::MemoryStore::new())
        }
    };

    let switcher = LanguageSwitcher::new(
        BrowserDocument::new(document),
        store,
        SwitcherSettings::default(),
    );
    // Handlers keep the switcher alive
    let _ = initialize(switcher, &mut BrowserEvents);
}

#[wasm_bindgen(start)]
pub fn start() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        let target = document.clone();
        let on_ready = Closure::<dyn FnMut()>::wrap(Box::new(move || run(target.clone())) as ClickHandler);
        if document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
            .is_err()
        {
            warn!("Failed to wait for DOMContentLoaded");
        }
        on_ready.forget();
    } else {
        run(document);
    }
}
