//! Report assembly and rendering.
//!
//! Bundles both recommendation lists with their rolled-up savings into an
//! [`AnalysisReport`] and renders it in one of several formats: a colored
//! console view, JSON, CSV, or a self-contained HTML page.

use crate::analyzer::savings;
use crate::analyzer::types::{
    ReservedCapacityRecommendation, RightSizingRecommendation, SavingsSummary, SummaryStats,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod output;

pub use output::{
    print_report, render_report, save_report, timestamped_report_path, ReportFormat,
};

/// Complete result of one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// When the analysis ran
    pub generated_at: DateTime<Utc>,
    /// Rolled-up savings totals
    pub savings: SavingsSummary,
    /// Categorical counts
    pub stats: SummaryStats,
    /// Right-sizing recommendations, sorted descending by monthly savings
    pub right_sizing: Vec<RightSizingRecommendation>,
    /// Reserved-capacity recommendations, sorted descending by annual savings
    pub reserved_capacity: Vec<ReservedCapacityRecommendation>,
}

impl AnalysisReport {
    /// Assemble a report from both recommendation lists, computing the
    /// savings summary and stats in the process.
    pub fn new(
        right_sizing: Vec<RightSizingRecommendation>,
        reserved_capacity: Vec<ReservedCapacityRecommendation>,
    ) -> Self {
        let savings = savings::aggregate(&right_sizing, &reserved_capacity);
        let stats = savings::stats(&right_sizing, &reserved_capacity);
        Self {
            generated_at: Utc::now(),
            savings,
            stats,
            right_sizing,
            reserved_capacity,
        }
    }

    /// Whether any recommendation was produced at all.
    pub fn has_recommendations(&self) -> bool {
        !self.right_sizing.is_empty() || !self.reserved_capacity.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = AnalysisReport::new(Vec::new(), Vec::new());
        assert!(!report.has_recommendations());
        assert_eq!(report.stats.total_recommendations, 0);
        assert_eq!(report.savings.total.monthly_savings, 0.0);
    }
}
