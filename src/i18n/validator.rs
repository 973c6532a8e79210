//! Document audit: finds markup the switcher will silently skip or
//! mishandle.
//!
//! Warnings cover gaps that only degrade one language (a missing Arabic
//! variant, URLs or `{placeholders}` that differ between variants). Errors
//! cover markup that cannot behave as authored.

use crate::config::SwitcherSettings;
use crate::dom::DocumentView;
use crate::i18n::Language;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub struct DocumentAudit;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl DocumentAudit {
    pub fn audit<D: DocumentView>(document: &D, settings: &SwitcherSettings) -> ValidationReport {
        let mut report = ValidationReport::new();

        if document.root().is_none() {
            report
                .errors
                .push("Document has no root element; lang and dir cannot be set".to_string());
        }
        if document.body().is_none() {
            report
                .errors
                .push("Document has no body; dir cannot be mirrored".to_string());
        }

        for node in document.nodes_with_attribute(&settings.text_en_attr) {
            let tag = document.tag_name(&node);
            let label = describe(document, &node, &tag, &settings.text_en_attr);

            if tag == "input" || tag == "textarea" {
                report.warnings.push(format!(
                    "{} carries text variants, which are never applied to form fields",
                    label
                ));
            }

            Self::check_pair(
                document,
                &node,
                &settings.text_en_attr,
                &settings.text_ar_attr,
                &label,
                &mut report,
            );
        }

        for node in document.nodes_with_attribute(&settings.placeholder_en_attr) {
            let tag = document.tag_name(&node);
            let label = describe(document, &node, &tag, &settings.placeholder_en_attr);
            Self::check_pair(
                document,
                &node,
                &settings.placeholder_en_attr,
                &settings.placeholder_ar_attr,
                &label,
                &mut report,
            );
        }

        Self::check_orphans(document, &settings.text_en_attr, &settings.text_ar_attr, &mut report);
        Self::check_orphans(
            document,
            &settings.placeholder_en_attr,
            &settings.placeholder_ar_attr,
            &mut report,
        );

        for control in document.nodes_with_class(&settings.switch_class) {
            let text = document.text(&control);
            match document.attribute(&control, &settings.switch_lang_attr) {
                None => report.errors.push(format!(
                    "Switch control '{}' has no {}; it will select English",
                    text, settings.switch_lang_attr
                )),
                Some(code) if code.is_empty() => report.errors.push(format!(
                    "Switch control '{}' has an empty {}; it will select English",
                    text, settings.switch_lang_attr
                )),
                Some(code) => {
                    if let Err(e) = Language::from_code(&code) {
                        report
                            .errors
                            .push(format!("Switch control '{}': {}; it will select English", text, e));
                    }
                }
            }
        }

        report
    }

    /// Only nodes carrying the English attribute are translated, so an Arabic
    /// variant without one is never shown.
    fn check_orphans<D: DocumentView>(document: &D, en_attr: &str, ar_attr: &str, report: &mut ValidationReport) {
        for node in document.nodes_with_attribute(ar_attr) {
            if document.attribute(&node, en_attr).is_some() {
                continue;
            }
            let tag = document.tag_name(&node);
            let arabic = document.attribute(&node, ar_attr).unwrap_or_default();
            report.errors.push(format!(
                "<{}> \"{}\" has {} but no {}; it is never translated",
                tag, arabic, ar_attr, en_attr
            ));
        }
    }

    fn check_pair<D: DocumentView>(
        document: &D,
        node: &D::Node,
        en_attr: &str,
        ar_attr: &str,
        label: &str,
        report: &mut ValidationReport,
    ) {
        let english = document.attribute(node, en_attr).unwrap_or_default();
        let Some(arabic) = document.attribute(node, ar_attr) else {
            report
                .warnings
                .push(format!("{} has no {}; it stays English", label, ar_attr));
            return;
        };

        let en_urls = Self::extract_urls(&english);
        let ar_urls = Self::extract_urls(&arabic);
        if en_urls != ar_urls {
            report.warnings.push(format!(
                "{}: URL mismatch: English has {:?}, Arabic has {:?}",
                label, en_urls, ar_urls
            ));
        }

        let en_names = Self::extract_placeholders(&english);
        let ar_names = Self::extract_placeholders(&arabic);
        if en_names != ar_names {
            report.warnings.push(format!(
                "{}: placeholder mismatch: English has {:?}, Arabic has {:?}",
                label, en_names, ar_names
            ));
        }
    }

    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"https?://[^\s)\]]+").unwrap());
        let mut urls: Vec<String> = regex.find_iter(text).map(|m| m.as_str().to_string()).collect();
        urls.sort();
        urls
    }

    /// `{name}` style interpolation slots, sorted (word order differs between
    /// languages).
    fn extract_placeholders(text: &str) -> Vec<String> {
        let regex =
            PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{[A-Za-z_][A-Za-z0-9_]*\}").unwrap());
        let mut names: Vec<String> = regex.find_iter(text).map(|m| m.as_str().to_string()).collect();
        names.sort();
        names
    }
}

fn describe<D: DocumentView>(document: &D, node: &D::Node, tag: &str, en_attr: &str) -> String {
    let english = document.attribute(node, en_attr).unwrap_or_default();
    format!("<{}> \"{}\"", tag, english)
}
