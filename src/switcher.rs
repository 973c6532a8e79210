//! The language switcher: rewrites a document into one language and keeps
//! the preference store in step with the switch controls.

use crate::config::SwitcherSettings;
use crate::dom::DocumentView;
use crate::events::EventBinder;
use crate::i18n::{Language, SwitchMetrics};
use crate::storage::PreferenceStore;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// A switcher after `initialize`, shared with the click handlers.
pub type SharedSwitcher<D, S> = Rc<RefCell<LanguageSwitcher<D, S>>>;

pub struct LanguageSwitcher<D, S> {
    document: D,
    store: S,
    settings: SwitcherSettings,
    active: Language,
    metrics: SwitchMetrics,
}

impl<D: DocumentView, S: PreferenceStore> LanguageSwitcher<D, S> {
    pub fn new(document: D, store: S, settings: SwitcherSettings) -> Self {
        Self {
            document,
            store,
            settings,
            active: Language::default_language(),
            metrics: SwitchMetrics::new(),
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &SwitcherSettings {
        &self.settings
    }

    pub fn metrics(&self) -> &SwitchMetrics {
        &self.metrics
    }

    /// Language the document was last rendered in.
    pub fn active_language(&self) -> Language {
        self.active
    }

    /// Stored preference, or the default language code when the store is
    /// empty, holds an empty value or cannot be read.
    pub fn stored_preference(&self) -> String {
        match self.store.get(&self.settings.storage_key) {
            Ok(Some(code)) if !code.is_empty() => code,
            Ok(_) => Language::default_language().code().to_string(),
            Err(e) => {
                warn!("Failed to read language preference: {}", e);
                self.metrics.record_store_failure();
                Language::default_language().code().to_string()
            }
        }
    }

    /// Render the whole document in `code`.
    ///
    /// Only `"ar"` renders Arabic; anything else renders English. Switch
    /// controls are matched against `code` verbatim.
    pub fn apply(&mut self, code: &str) {
        let language = Language::resolve(code);
        let is_arabic = language == Language::ARABIC;
        let direction = language.direction().as_str();
        debug!("Applying language '{}' (requested '{}')", language.code(), code);

        self.apply_text(is_arabic);
        self.apply_placeholders(is_arabic);

        for node in self
            .document
            .nodes_with_attribute(&self.settings.dir_toggle_attr)
        {
            self.document.set_attribute(&node, "dir", direction);
        }

        if let Some(root) = self.document.root() {
            self.document.set_attribute(&root, "lang", language.code());
            self.document.set_attribute(&root, "dir", direction);
        }
        if let Some(body) = self.document.body() {
            self.document.set_attribute(&body, "dir", direction);
        }

        for control in self.document.nodes_with_class(&self.settings.switch_class) {
            let selected = self
                .document
                .attribute(&control, &self.settings.switch_lang_attr)
                .is_some_and(|lang| lang == code);
            self.document
                .toggle_class(&control, &self.settings.active_class, selected);
        }

        self.active = language;
        self.metrics.record_apply();
    }

    fn apply_text(&mut self, is_arabic: bool) {
        let variant_attr = if is_arabic {
            &self.settings.text_ar_attr
        } else {
            &self.settings.text_en_attr
        };

        for node in self.document.nodes_with_attribute(&self.settings.text_en_attr) {
            let Some(text) = self.document.attribute(&node, variant_attr) else {
                self.metrics.record_text_skip();
                continue;
            };

            match self.document.tag_name(&node).as_str() {
                // Form values are user data
                "input" | "textarea" => continue,
                "title" => self.document.set_title(&text),
                _ => {}
            }

            self.document.set_text(&node, &text);
            self.metrics.record_text_update();
        }
    }

    fn apply_placeholders(&mut self, is_arabic: bool) {
        let variant_attr = if is_arabic {
            &self.settings.placeholder_ar_attr
        } else {
            &self.settings.placeholder_en_attr
        };

        for node in self
            .document
            .nodes_with_attribute(&self.settings.placeholder_en_attr)
        {
            match self.document.attribute(&node, variant_attr) {
                Some(text) => {
                    self.document.set_attribute(&node, "placeholder", &text);
                    self.metrics.record_placeholder_update();
                }
                None => self.metrics.record_placeholder_skip(),
            }
        }
    }

    /// Persist `code` and render the document in it.
    ///
    /// A failed write is logged and the document is still rendered.
    pub fn select(&mut self, code: &str) {
        if let Err(e) = self.store.set(&self.settings.storage_key, code) {
            warn!("Failed to persist language preference '{}': {}", code, e);
            self.metrics.record_store_failure();
        }
        self.apply(code);
    }

    /// Handle activation of a switch control.
    pub fn activate(&mut self, control: &D::Node) {
        let code = self
            .document
            .attribute(control, &self.settings.switch_lang_attr)
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| Language::default_language().code().to_string());

        info!("Language switch activated: '{}'", code);
        self.metrics.record_activation();
        self.select(&code);
    }

    /// Every switch control currently in the document.
    pub fn controls(&self) -> Vec<D::Node> {
        self.document.nodes_with_class(&self.settings.switch_class)
    }
}

/// Document-ready entry point: render the stored preference and subscribe
/// every switch control.
pub fn initialize<D, S, B>(mut switcher: LanguageSwitcher<D, S>, binder: &mut B) -> SharedSwitcher<D, S>
where
    D: DocumentView + 'static,
    S: PreferenceStore + 'static,
    B: EventBinder<D::Node>,
{
    let saved = switcher.stored_preference();
    switcher.apply(&saved);

    let controls = switcher.controls();
    let shared = Rc::new(RefCell::new(switcher));

    for control in &controls {
        let target = Rc::clone(&shared);
        let node = control.clone();
        binder.on_click(
            control,
            Box::new(move || target.borrow_mut().activate(&node)),
        );
    }

    info!(
        "Language switcher ready: '{}' active, {} controls bound",
        saved,
        controls.len()
    );
    shared
}
