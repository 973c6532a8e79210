//! Switch metrics: what each `apply` actually touched.
//!
//! Counters are owned by one switcher rather than shared globally, so several
//! documents can be driven side by side without mixing their numbers.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct SwitchMetrics {
    /// Number of `apply` passes
    applies: AtomicUsize,

    /// Text nodes rewritten
    text_updates: AtomicUsize,

    /// Text nodes left alone because the active variant was missing
    text_skips: AtomicUsize,

    /// Placeholders rewritten
    placeholder_updates: AtomicUsize,

    /// Placeholders left alone because the active variant was missing
    placeholder_skips: AtomicUsize,

    /// Switch control activations
    activations: AtomicUsize,

    /// Preference store reads or writes that failed
    store_failures: AtomicUsize,
}

impl SwitchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_apply(&self) {
        self.applies.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_text_update(&self) {
        self.text_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_text_skip(&self) {
        self.text_skips.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_placeholder_update(&self) {
        self.placeholder_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_placeholder_skip(&self) {
        self.placeholder_skips.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_activation(&self) {
        self.activations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_failure(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn applies(&self) -> usize {
        self.applies.load(Ordering::Relaxed)
    }

    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::Relaxed)
    }

    pub fn store_failures(&self) -> usize {
        self.store_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let text_updates = self.text_updates.load(Ordering::Relaxed);
        let text_skips = self.text_skips.load(Ordering::Relaxed);
        let total_text = text_updates + text_skips;
        let text_coverage = if total_text > 0 {
            (text_updates as f64 / total_text as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            applies: self.applies(),
            text_updates,
            text_skips,
            text_coverage,
            placeholder_updates: self.placeholder_updates.load(Ordering::Relaxed),
            placeholder_skips: self.placeholder_skips.load(Ordering::Relaxed),
            activations: self.activations(),
            store_failures: self.store_failures(),
        }
    }
}

/// Snapshot of a switcher's counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub applies: usize,
    pub text_updates: usize,
    pub text_skips: usize,

    /// Share of enumerated text nodes that were rewritten (0-100)
    pub text_coverage: f64,

    pub placeholder_updates: usize,
    pub placeholder_skips: usize,
    pub activations: usize,
    pub store_failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_new_metrics_are_zero() {
        let report = SwitchMetrics::new().report();
        assert_eq!(report.applies, 0);
        assert_eq!(report.text_updates, 0);
        assert_eq!(report.text_coverage, 0.0);
        assert_eq!(report.store_failures, 0);
    }

    #[test]
    fn test_counters_increment() {
        let metrics = SwitchMetrics::new();
        metrics.record_apply();
        metrics.record_apply();
        metrics.record_activation();
        metrics.record_store_failure();
        metrics.record_placeholder_update();
        metrics.record_placeholder_skip();

        let report = metrics.report();
        assert_eq!(report.applies, 2);
        assert_eq!(report.activations, 1);
        assert_eq!(report.store_failures, 1);
        assert_eq!(report.placeholder_updates, 1);
        assert_eq!(report.placeholder_skips, 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_text_coverage() {
        let metrics = SwitchMetrics::new();
        // 3 updates, 1 skip = 75% coverage
        metrics.record_text_update();
        metrics.record_text_update();
        metrics.record_text_update();
        metrics.record_text_skip();

        let report = metrics.report();
        assert_eq!(report.text_updates, 3);
        assert_eq!(report.text_skips, 1);
        assert_eq!(report.text_coverage, 75.0);
    }

    #[test]
    fn test_instances_are_independent() {
        let first = SwitchMetrics::new();
        let second = SwitchMetrics::new();
        first.record_apply();
        assert_eq!(first.applies(), 1);
        assert_eq!(second.applies(), 0);
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_string(&SwitchMetrics::new().report()).unwrap();
        assert!(json.contains("\"text_coverage\":0.0"));
    }
}
