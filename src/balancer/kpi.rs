//! Distribution quality metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Largest window total |
//! | Lightest load | Smallest window total |
//! | Imbalance | Makespan minus lightest load |
//! | Average load | Total load / window count |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::Serialize;

use crate::models::Window;

/// Load indicators for a finished distribution. Times are in minutes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionKpi {
    /// Number of windows.
    pub window_count: usize,
    /// Number of visitors served.
    pub visitor_count: usize,
    /// Sum of all durations.
    pub total_time: u64,
    /// Largest window total.
    pub makespan: u64,
    /// Smallest window total.
    pub lightest_load: u64,
    /// `makespan - lightest_load`.
    pub imbalance: u64,
    /// Mean window total.
    pub average_load: f64,
}

impl DistributionKpi {
    /// Computes KPIs over balanced windows.
    pub fn calculate(windows: &[Window]) -> Self {
        let total_time: u64 = windows.iter().map(|w| w.total_time).sum();
        let makespan = windows.iter().map(|w| w.total_time).max().unwrap_or(0);
        let lightest_load = windows.iter().map(|w| w.total_time).min().unwrap_or(0);

        let average_load = if windows.is_empty() {
            0.0
        } else {
            total_time as f64 / windows.len() as f64
        };

        Self {
            window_count: windows.len(),
            visitor_count: windows.iter().map(|w| w.visitors.len()).sum(),
            total_time,
            makespan,
            lightest_load,
            imbalance: makespan - lightest_load,
            average_load,
        }
    }

    /// Whether no window exceeds the lightest by more than `tolerance` minutes.
    pub fn is_balanced_within(&self, tolerance: u64) -> bool {
        self.imbalance <= tolerance
    }
}
