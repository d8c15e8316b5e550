//! Configuration for the recommendation engine.

use super::types::{PaymentOption, TermLength};
use serde::{Deserialize, Serialize};

// ============================================================================
// Right-Sizing
// ============================================================================

/// Configuration for right-sizing recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RightSizingConfig {
    /// CPU percentile below which a resource counts as underutilized
    /// (percent, default: 40)
    pub cpu_underutilized_threshold: f64,

    /// Minimum monthly savings for a recommendation to surface
    /// (USD/month, default: 10)
    pub min_savings_threshold: f64,

    /// Budget families a family-switch is allowed to target
    pub allowed_families: Vec<String>,

    /// Which percentile of CPU utilization to evaluate (default: 95)
    pub percentile: f64,
}

impl Default for RightSizingConfig {
    fn default() -> Self {
        Self {
            cpu_underutilized_threshold: 40.0,
            min_savings_threshold: 10.0,
            allowed_families: vec![
                "t3a".to_string(),
                "m5a".to_string(),
                "c5a".to_string(),
                "r5a".to_string(),
            ],
            percentile: 95.0,
        }
    }
}

impl RightSizingConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CPU underutilization threshold.
    pub fn with_cpu_threshold(mut self, threshold: f64) -> Self {
        self.cpu_underutilized_threshold = threshold;
        self
    }

    /// Set the minimum monthly savings threshold.
    pub fn with_min_savings(mut self, min_savings: f64) -> Self {
        self.min_savings_threshold = min_savings;
        self
    }

    /// Replace the allow-list of family-switch targets.
    pub fn with_allowed_families<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_families = families.into_iter().map(Into::into).collect();
        self
    }

    /// Set the evaluated CPU percentile.
    pub fn with_percentile(mut self, percentile: f64) -> Self {
        self.percentile = percentile;
        self
    }

    /// Check whether a budget family may be recommended.
    pub fn allows_family(&self, family: &str) -> bool {
        self.allowed_families.iter().any(|f| f == family)
    }
}

// ============================================================================
// Reserved Capacity
// ============================================================================

/// Configuration for reserved-capacity recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservedCapacityConfig {
    /// Commitment term length (1 or 3 years)
    pub term: TermLength,

    /// Payment option applied to every recommendation
    pub payment_option: PaymentOption,

    /// Minimum group utilization knob (percent).
    ///
    /// Accepted for eligibility-policy purposes but not currently enforced:
    /// every non-empty `(region, type)` group is considered
    /// commitment-worthy.
    pub min_utilization: f64,
}

impl Default for ReservedCapacityConfig {
    fn default() -> Self {
        Self {
            term: TermLength::OneYear,
            payment_option: PaymentOption::PartialUpfront,
            min_utilization: 75.0,
        }
    }
}

impl ReservedCapacityConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the commitment term.
    pub fn with_term(mut self, term: TermLength) -> Self {
        self.term = term;
        self
    }

    /// Set the payment option.
    pub fn with_payment_option(mut self, payment: PaymentOption) -> Self {
        self.payment_option = payment;
        self
    }

    /// Set the minimum utilization knob.
    pub fn with_min_utilization(mut self, min_utilization: f64) -> Self {
        self.min_utilization = min_utilization;
        self
    }
}
