//! Language registry: Single source of truth for all supported languages.
//!
//! The registry is a lazily initialized singleton (`OnceLock`) holding the
//! metadata of every language a page can be switched to, including the
//! reading direction the document must take when that language is active.

use std::sync::OnceLock;

/// Text flow direction of a language, as written to `dir` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Attribute value (`"ltr"` or `"rtl"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "ar")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Arabic")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "العربية")
    pub native_name: &'static str,

    /// Reading direction of the language
    pub direction: Direction,

    /// Whether this is the fallback language (only one should be true)
    pub is_default: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get the fallback language configuration.
    ///
    /// This is the language used whenever no preference is stored or an
    /// unrecognized code is applied.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one default language
    /// (this indicates a configuration error).
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }
}

/// The storefront ships in English (default, left-to-right) and Arabic
/// (right-to-left).
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            direction: Direction::Ltr,
            is_default: true,
        },
        LanguageConfig {
            code: "ar",
            name: "Arabic",
            native_name: "العربية",
            direction: Direction::Rtl,
            is_default: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_english() {
        let config = LanguageRegistry::get().get_by_code("en").unwrap();
        assert_eq!(config.name, "English");
        assert_eq!(config.direction, Direction::Ltr);
        assert!(config.is_default);
    }

    #[test]
    fn test_get_by_code_arabic() {
        let config = LanguageRegistry::get().get_by_code("ar").unwrap();
        assert_eq!(config.name, "Arabic");
        assert_eq!(config.native_name, "العربية");
        assert_eq!(config.direction, Direction::Rtl);
        assert!(!config.is_default);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("es").is_none());
        assert!(LanguageRegistry::get().get_by_code("").is_none());
    }

    #[test]
    fn test_default_language_is_english() {
        assert_eq!(LanguageRegistry::get().default_language().code, "en");
    }

    #[test]
    fn test_direction_as_str() {
        assert_eq!(Direction::Ltr.as_str(), "ltr");
        assert_eq!(Direction::Rtl.as_str(), "rtl");
    }
}
