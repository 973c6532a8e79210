//! Internationalization (i18n) module: languages and bilingual content.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages and their direction
//! - `language`: Validated `Language` type
//! - `catalog`: Bilingual copy keyed by dotted path, stamped onto markup
//! - `validator`: Audit of a document's translation markup
//! - `metrics`: Per-switcher counters
//!
//! # Example
//!
//! ```rust,ignore
//! use lang_switch::i18n::{Direction, Language};
//!
//! let arabic = Language::from_code("ar")?;
//! assert_eq!(arabic.direction(), Direction::Rtl);
//!
//! // Anything that is not Arabic renders as English
//! assert_eq!(Language::resolve("fr"), Language::ENGLISH);
//! ```

mod catalog;
mod language;
mod metrics;
mod registry;
mod validator;

pub use catalog::{CopyCatalog, CopyVariants};
pub use language::Language;
pub use metrics::{MetricsReport, SwitchMetrics};
pub use registry::{Direction, LanguageConfig, LanguageRegistry};
pub use validator::{DocumentAudit, ValidationReport};
