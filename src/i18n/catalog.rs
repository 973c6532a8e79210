//! Copy catalog: bilingual site copy authored once, stamped onto markup.
//!
//! The catalog is nested JSON. A leaf is an object mapping language codes to
//! text; every other object or array is a branch. Leaves are addressed by
//! dotted path, array items by index:
//!
//! ```json
//! {"services": {"items": [{"title": {"en": "Flexible financing", "ar": "تمويل مرن"}}]}}
//! ```
//!
//! resolves `services.items.0.title`.

use crate::config::SwitcherSettings;
use crate::dom::DocumentView;
use crate::error::{Result, SwitchError};
use crate::i18n::LanguageRegistry;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Text variants of one catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyVariants {
    pub en: Option<String>,
    pub ar: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CopyCatalog {
    entries: BTreeMap<String, CopyVariants>,
}

impl CopyCatalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let mut entries = BTreeMap::new();
        flatten(&value, String::new(), &mut entries)?;
        debug!("Loaded copy catalog with {} entries", entries.len());
        Ok(Self { entries })
    }

    pub fn get(&self, path: &str) -> Option<&CopyVariants> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dotted paths of every entry, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Write the language variant attributes of every node that references a
    /// catalog path. Returns the number of nodes annotated.
    pub fn annotate<D: DocumentView>(&self, document: &mut D, settings: &SwitcherSettings) -> usize {
        let text = self.stamp(
            document,
            &settings.copy_attr,
            &settings.text_en_attr,
            &settings.text_ar_attr,
        );
        let placeholders = self.stamp(
            document,
            &settings.copy_placeholder_attr,
            &settings.placeholder_en_attr,
            &settings.placeholder_ar_attr,
        );
        text + placeholders
    }

    fn stamp<D: DocumentView>(&self, document: &mut D, key_attr: &str, en_attr: &str, ar_attr: &str) -> usize {
        let mut annotated = 0;

        for node in document.nodes_with_attribute(key_attr) {
            let Some(path) = document.attribute(&node, key_attr) else {
                continue;
            };
            let Some(variants) = self.entries.get(&path) else {
                warn!("Copy catalog has no entry '{}'", path);
                continue;
            };

            if let Some(en) = &variants.en {
                document.set_attribute(&node, en_attr, en);
            }
            if let Some(ar) = &variants.ar {
                document.set_attribute(&node, ar_attr, ar);
            }
            annotated += 1;
        }

        annotated
    }
}

fn is_leaf(map: &Map<String, Value>) -> bool {
    let registry = LanguageRegistry::get();
    !map.is_empty() && map.keys().all(|code| registry.get_by_code(code).is_some())
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

fn flatten(value: &Value, path: String, entries: &mut BTreeMap<String, CopyVariants>) -> Result<()> {
    match value {
        Value::Object(map) if is_leaf(map) => {
            let mut variants = CopyVariants::default();
            for (code, text) in map {
                let text = text.as_str().ok_or_else(|| SwitchError::Catalog {
                    path: join(&path, code),
                    reason: "expected a string".to_string(),
                })?;
                match code.as_str() {
                    "ar" => variants.ar = Some(text.to_string()),
                    _ => variants.en = Some(text.to_string()),
                }
            }
            // Only nodes with an English variant are ever translated
            if variants.en.is_none() {
                return Err(SwitchError::Catalog {
                    path,
                    reason: "missing English variant".to_string(),
                });
            }
            entries.insert(path, variants);
            Ok(())
        }
        Value::Object(map) => {
            for (key, child) in map {
                flatten(child, join(&path, key), entries)?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten(child, join(&path, &index.to_string()), entries)?;
            }
            Ok(())
        }
        _ => Err(SwitchError::Catalog {
            path: if path.is_empty() { "<root>".to_string() } else { path },
            reason: "expected an object or array".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDocument, MemoryElement};

    const COPY: &str = r#"{
        "site_title": {"en": "AutoDrive Market", "ar": "سوق أوتودرايف"},
        "hero": {
            "title": {"en": "Find your dream car in minutes.", "ar": "اعثر على سيارتك المثالية في دقائق."},
            "cta": {"en": "Browse inventory"}
        },
        "services": {
            "items": [
                {"title": {"en": "Flexible financing", "ar": "تمويل مرن"}},
                {"title": {"en": "Certified warranty", "ar": "ضمان معتمد"}}
            ]
        },
        "form": {
            "name_placeholder": {"en": "Alex Driver", "ar": "أحمد السائق"}
        }
    }"#;

    // ==================== Parsing Tests ====================

    #[test]
    fn test_flatten_paths() {
        let catalog = CopyCatalog::from_json(COPY).unwrap();
        let paths: Vec<_> = catalog.paths().collect();
        assert_eq!(
            paths,
            vec![
                "form.name_placeholder",
                "hero.cta",
                "hero.title",
                "services.items.0.title",
                "services.items.1.title",
                "site_title",
            ]
        );
    }

    #[test]
    fn test_get_variants() {
        let catalog = CopyCatalog::from_json(COPY).unwrap();
        let item = catalog.get("services.items.1.title").unwrap();
        assert_eq!(item.en.as_deref(), Some("Certified warranty"));
        assert_eq!(item.ar.as_deref(), Some("ضمان معتمد"));
    }

    #[test]
    fn test_english_only_entry() {
        let catalog = CopyCatalog::from_json(COPY).unwrap();
        let cta = catalog.get("hero.cta").unwrap();
        assert_eq!(cta.en.as_deref(), Some("Browse inventory"));
        assert_eq!(cta.ar, None);
    }

    #[test]
    fn test_non_string_leaf_is_rejected() {
        let err = CopyCatalog::from_json(r#"{"brand": {"en": 3}}"#).unwrap_err();
        assert!(matches!(err, SwitchError::Catalog { ref path, .. } if path == "brand.en"));
    }

    #[test]
    fn test_arabic_only_entry_is_rejected() {
        let err = CopyCatalog::from_json(r#"{"hero": {"badge": {"ar": "جديد"}}}"#).unwrap_err();
        assert!(matches!(
            err,
            SwitchError::Catalog { ref path, ref reason } if path == "hero.badge" && reason.contains("English")
        ));
    }

    #[test]
    fn test_scalar_branch_is_rejected() {
        let err = CopyCatalog::from_json(r#"{"brand": "AutoDrive"}"#).unwrap_err();
        assert!(matches!(err, SwitchError::Catalog { ref path, .. } if path == "brand"));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = CopyCatalog::from_json("{}").unwrap();
        assert!(catalog.is_empty());
    }

    // ==================== annotate Tests ====================

    #[test]
    fn test_annotate_text_and_placeholders() {
        let catalog = CopyCatalog::from_json(COPY).unwrap();
        let mut doc = MemoryDocument::new();
        let title = doc.push(MemoryElement::new("h2").attr("data-copy", "services.items.0.title"));
        let input = doc.push(MemoryElement::new("input").attr("data-copy-placeholder", "form.name_placeholder"));
        let missing = doc.push(MemoryElement::new("p").attr("data-copy", "nope"));

        let count = catalog.annotate(&mut doc, &SwitcherSettings::default());

        assert_eq!(count, 2);
        assert_eq!(doc.attribute(&title, "data-lang-en").as_deref(), Some("Flexible financing"));
        assert_eq!(doc.attribute(&title, "data-lang-ar").as_deref(), Some("تمويل مرن"));
        assert_eq!(doc.attribute(&input, "data-placeholder-ar").as_deref(), Some("أحمد السائق"));
        assert_eq!(doc.attribute(&missing, "data-lang-en"), None);
    }
}
