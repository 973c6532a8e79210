use thiserror::Error;

/// Errors surfaced by the language registry, preference stores and catalog.
///
/// The switcher itself never returns these: it logs them and keeps the page
/// in a consistent state.
#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("Unknown language code: '{0}'")]
    UnknownLanguage(String),

    #[error("Preference store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Browser storage unavailable: {0}")]
    Storage(String),

    #[error("Malformed copy catalog at '{path}': {reason}")]
    Catalog { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, SwitchError>;
