//! Resolution metrics.
//!
//! Counts how each `resolve` call was satisfied so hosts can spot missing
//! translations. Every registry owns its own counters.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Per-registry resolution counters.
#[derive(Debug, Default)]
pub struct ResolutionMetrics {
    /// Key found in the user's effective language
    selected_hits: AtomicUsize,

    /// Key missing from the effective language but found in the tenant default
    default_fallbacks: AtomicUsize,

    /// Key found nowhere
    misses: AtomicUsize,

    /// Resolution attempted for a tenant that was never registered
    unknown_tenants: AtomicUsize,
}

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_selected_hit(&self) {
        self.selected_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_default_fallback(&self) {
        self.default_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unknown_tenant(&self) {
        self.unknown_tenants.fetch_add(1, Ordering::Relaxed);
    }

    pub fn selected_hits(&self) -> usize {
        self.selected_hits.load(Ordering::Relaxed)
    }

    pub fn default_fallbacks(&self) -> usize {
        self.default_fallbacks.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn unknown_tenants(&self) -> usize {
        self.unknown_tenants.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let selected_hits = self.selected_hits();
        let default_fallbacks = self.default_fallbacks();
        let misses = self.misses();
        let unknown_tenants = self.unknown_tenants();

        let resolved = selected_hits + default_fallbacks;
        let total = resolved + misses + unknown_tenants;
        let (hit_rate, fallback_rate) = if total > 0 {
            (
                (resolved as f64 / total as f64) * 100.0,
                (default_fallbacks as f64 / total as f64) * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        MetricsReport {
            selected_hits,
            default_fallbacks,
            misses,
            unknown_tenants,
            hit_rate,
            fallback_rate,
        }
    }
}

/// Snapshot of resolution statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub selected_hits: usize,
    pub default_fallbacks: usize,
    pub misses: usize,
    pub unknown_tenants: usize,

    /// Share of resolutions that produced a string, as a percentage (0-100)
    pub hit_rate: f64,

    /// Share of resolutions served by the tenant default, as a percentage (0-100)
    pub fallback_rate: f64,
}
