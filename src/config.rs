use anyhow::Result;
use std::path::PathBuf;

/// Storage key the storefront has always used for the preference.
pub const DEFAULT_STORAGE_KEY: &str = "autodrive-preferred-language";

/// The attribute contract between the page markup and the switcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitcherSettings {
    // Preference
    pub storage_key: String,

    // Translatable text
    pub text_en_attr: String,
    pub text_ar_attr: String,

    // Placeholders
    pub placeholder_en_attr: String,
    pub placeholder_ar_attr: String,

    // Direction
    pub dir_toggle_attr: String,

    // Switch controls
    pub switch_class: String,
    pub switch_lang_attr: String,
    pub active_class: String,

    // Copy catalog
    pub copy_attr: String,
    pub copy_placeholder_attr: String,
}

impl Default for SwitcherSettings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            text_en_attr: "data-lang-en".to_string(),
            text_ar_attr: "data-lang-ar".to_string(),
            placeholder_en_attr: "data-placeholder-en".to_string(),
            placeholder_ar_attr: "data-placeholder-ar".to_string(),
            dir_toggle_attr: "data-dir-toggle".to_string(),
            switch_class: "lang-switch".to_string(),
            switch_lang_attr: "data-lang".to_string(),
            active_class: "active".to_string(),
            copy_attr: "data-copy".to_string(),
            copy_placeholder_attr: "data-copy-placeholder".to_string(),
        }
    }
}

/// Runtime configuration of the CLI binaries.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: SwitcherSettings,

    /// JSON file backing the preference store
    pub state_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = SwitcherSettings::default();

        Ok(Self {
            settings: SwitcherSettings {
                storage_key: std::env::var("LANG_SWITCH_STORAGE_KEY")
                    .ok()
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or(defaults.storage_key),
                switch_class: std::env::var("LANG_SWITCH_CLASS")
                    .ok()
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or(defaults.switch_class),
                active_class: std::env::var("LANG_SWITCH_ACTIVE_CLASS")
                    .ok()
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or(defaults.active_class),
                ..SwitcherSettings::default()
            },
            state_file: std::env::var("LANG_SWITCH_STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".lang-switch/preferences.json")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "LANG_SWITCH_STORAGE_KEY",
            "LANG_SWITCH_CLASS",
            "LANG_SWITCH_ACTIVE_CLASS",
            "LANG_SWITCH_STATE_FILE",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_settings_match_markup_contract() {
        let settings = SwitcherSettings::default();
        assert_eq!(settings.storage_key, "autodrive-preferred-language");
        assert_eq!(settings.text_en_attr, "data-lang-en");
        assert_eq!(settings.placeholder_ar_attr, "data-placeholder-ar");
        assert_eq!(settings.dir_toggle_attr, "data-dir-toggle");
        assert_eq!(settings.switch_class, "lang-switch");
        assert_eq!(settings.switch_lang_attr, "data-lang");
        assert_eq!(settings.active_class, "active");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.settings, SwitcherSettings::default());
        assert_eq!(
            config.state_file,
            PathBuf::from(".lang-switch/preferences.json")
        );
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("LANG_SWITCH_STORAGE_KEY", "site-lang");
        std::env::set_var("LANG_SWITCH_CLASS", "toggle");
        std::env::set_var("LANG_SWITCH_STATE_FILE", "/tmp/prefs.json");

        let config = Config::from_env().unwrap();
        assert_eq!(config.settings.storage_key, "site-lang");
        assert_eq!(config.settings.switch_class, "toggle");
        assert_eq!(config.settings.active_class, "active");
        assert_eq!(config.state_file, PathBuf::from("/tmp/prefs.json"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_blank_key_uses_default() {
        clear_env();
        std::env::set_var("LANG_SWITCH_STORAGE_KEY", "  ");
        let config = Config::from_env().unwrap();
        assert_eq!(config.settings.storage_key, DEFAULT_STORAGE_KEY);
        clear_env();
    }
}
