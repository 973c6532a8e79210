//! Bilingual (English/Arabic) page switcher.
//!
//! The switcher works against two injected capabilities: a
//! [`dom::DocumentView`] and a [`storage::PreferenceStore`]. In-memory
//! implementations of both ship with the crate; the `web` feature binds them
//! to the browser document and `localStorage`.

pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod i18n;
pub mod storage;
pub mod switcher;
#[cfg(feature = "web")]
pub mod web;

pub use error::{Result, SwitchError};
pub use switcher::{initialize, LanguageSwitcher, SharedSwitcher};
