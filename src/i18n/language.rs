//! Language type: validated language representation.

use crate::error::{Result, SwitchError};
use crate::i18n::{Direction, LanguageConfig, LanguageRegistry};

/// A language known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "ar")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };

    pub const ARABIC: Language = Language { code: "ar" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the registry knows the code
    /// * `Err(SwitchError::UnknownLanguage)` otherwise
    pub fn from_code(code: &str) -> Result<Language> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|config| Language { code: config.code })
            .ok_or_else(|| SwitchError::UnknownLanguage(code.to_string()))
    }

    /// Resolve any code to the language a page should render in.
    ///
    /// Only `"ar"` selects Arabic; every other value, including unknown or
    /// empty codes, renders as English.
    pub fn resolve(code: &str) -> Language {
        if code == Language::ARABIC.code {
            Language::ARABIC
        } else {
            Language::default_language()
        }
    }

    /// The language used when nothing else is known.
    pub fn default_language() -> Language {
        Language {
            code: LanguageRegistry::get().default_language().code,
        }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This should
    /// never happen if the Language was constructed through this type.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Reading direction of the language.
    pub fn direction(&self) -> Direction {
        self.config().direction
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::default_language()
    }
}
