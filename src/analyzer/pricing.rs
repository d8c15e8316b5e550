//! Static pricing catalog and reserved-capacity discount table.
//!
//! Pricing here is a static injected table, not a live pricing API. The
//! built-in catalog carries simplified on-demand rates for the common
//! general-purpose, compute-optimized, and memory-optimized families plus
//! their AMD siblings, and the matching database shapes.

use super::types::{PaymentOption, TermLength};
use crate::error::{Result, RightSizerError};
use std::collections::HashMap;

/// Hours in a month, for converting hourly rates to monthly costs.
pub const HOURS_PER_MONTH: f64 = 730.0;

/// Fallback hourly rate applied when a resource type is absent from the
/// catalog.
const DEFAULT_HOURLY: f64 = 0.10;

/// Engine surcharge for commercial database engines (license included in the
/// instance rate).
const COMMERCIAL_ENGINE_MULTIPLIER: f64 = 2.0;

/// Built-in hourly on-demand rates.
const BUILTIN_HOURLY: &[(&str, f64)] = &[
    // T3 family
    ("t3.nano", 0.0052),
    ("t3.micro", 0.0104),
    ("t3.small", 0.0208),
    ("t3.medium", 0.0416),
    ("t3.large", 0.0832),
    ("t3.xlarge", 0.1664),
    ("t3.2xlarge", 0.3328),
    // T3a family (AMD)
    ("t3a.nano", 0.0047),
    ("t3a.micro", 0.0094),
    ("t3a.small", 0.0188),
    ("t3a.medium", 0.0376),
    ("t3a.large", 0.0752),
    ("t3a.xlarge", 0.1504),
    ("t3a.2xlarge", 0.3008),
    // M5 family
    ("m5.large", 0.096),
    ("m5.xlarge", 0.192),
    ("m5.2xlarge", 0.384),
    ("m5.4xlarge", 0.768),
    // M5a family (AMD)
    ("m5a.large", 0.086),
    ("m5a.xlarge", 0.172),
    ("m5a.2xlarge", 0.344),
    ("m5a.4xlarge", 0.688),
    // C5 family
    ("c5.large", 0.085),
    ("c5.xlarge", 0.17),
    ("c5.2xlarge", 0.34),
    ("c5.4xlarge", 0.68),
    // C5a family (AMD)
    ("c5a.large", 0.077),
    ("c5a.xlarge", 0.154),
    ("c5a.2xlarge", 0.308),
    ("c5a.4xlarge", 0.616),
    // R5 family
    ("r5.large", 0.126),
    ("r5.xlarge", 0.252),
    ("r5.2xlarge", 0.504),
    // R5a family (AMD)
    ("r5a.large", 0.113),
    ("r5a.xlarge", 0.226),
    ("r5a.2xlarge", 0.452),
    // Database shapes
    ("db.t3.micro", 0.017),
    ("db.t3.small", 0.034),
    ("db.t3.medium", 0.068),
    ("db.t3.large", 0.136),
    ("db.t2.micro", 0.017),
    ("db.t2.small", 0.034),
    ("db.m5.large", 0.174),
    ("db.m5.xlarge", 0.348),
    ("db.r5.large", 0.24),
    ("db.r5.xlarge", 0.48),
];

// ============================================================================
// Pricing Catalog
// ============================================================================

/// Static lookup from resource-type identifier to monthly cost.
///
/// Passed explicitly into the recommenders so tests can run against
/// synthetic tables.
#[derive(Debug, Clone)]
pub struct PricingCatalog {
    monthly: HashMap<String, f64>,
}

impl Default for PricingCatalog {
    fn default() -> Self {
        Self {
            monthly: BUILTIN_HOURLY
                .iter()
                .map(|(ty, hourly)| (ty.to_string(), hourly * HOURS_PER_MONTH))
                .collect(),
        }
    }
}

impl PricingCatalog {
    /// Create an empty catalog (useful for tests).
    pub fn empty() -> Self {
        Self {
            monthly: HashMap::new(),
        }
    }

    /// Add or override a monthly price.
    pub fn with_price(mut self, resource_type: impl Into<String>, monthly_cost: f64) -> Self {
        self.monthly.insert(resource_type.into(), monthly_cost);
        self
    }

    /// Look up the monthly cost for a resource type.
    pub fn monthly_cost(&self, resource_type: &str) -> Option<f64> {
        self.monthly.get(resource_type).copied()
    }

    /// Estimate the monthly cost for a resource, falling back to a flat
    /// default rate for unknown types. Commercial database engines carry a
    /// surcharge.
    pub fn estimate_monthly_cost(&self, resource_type: &str, engine: Option<&str>) -> f64 {
        let base = self
            .monthly_cost(resource_type)
            .unwrap_or(DEFAULT_HOURLY * HOURS_PER_MONTH);

        match engine {
            Some(e) => {
                let e = e.to_lowercase();
                if e.contains("oracle") || e.contains("sqlserver") {
                    base * COMMERCIAL_ENGINE_MULTIPLIER
                } else {
                    base
                }
            }
            None => base,
        }
    }
}

// ============================================================================
// Discount Table
// ============================================================================

/// Reserved-capacity discount rates keyed by `(term, payment_option)`.
///
/// A missing combination is a configuration error and is surfaced to the
/// caller; a silently defaulted rate would produce incorrect financial
/// output.
#[derive(Debug, Clone)]
pub struct DiscountTable {
    rates: HashMap<(TermLength, PaymentOption), f64>,
}

impl Default for DiscountTable {
    fn default() -> Self {
        let mut rates = HashMap::new();
        // 1-year term
        rates.insert((TermLength::OneYear, PaymentOption::AllUpfront), 0.40);
        rates.insert((TermLength::OneYear, PaymentOption::PartialUpfront), 0.35);
        rates.insert((TermLength::OneYear, PaymentOption::NoUpfront), 0.30);
        // 3-year term
        rates.insert((TermLength::ThreeYear, PaymentOption::AllUpfront), 0.60);
        rates.insert((TermLength::ThreeYear, PaymentOption::PartialUpfront), 0.55);
        rates.insert((TermLength::ThreeYear, PaymentOption::NoUpfront), 0.50);
        Self { rates }
    }
}

impl DiscountTable {
    /// Create an empty table (useful for misconfiguration tests).
    pub fn empty() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    /// Add or override a discount rate.
    pub fn with_rate(mut self, term: TermLength, payment: PaymentOption, rate: f64) -> Self {
        self.rates.insert((term, payment), rate);
        self
    }

    /// Look up the discount rate for a `(term, payment_option)` pair.
    pub fn rate(&self, term: TermLength, payment: PaymentOption) -> Result<f64> {
        self.rates.get(&(term, payment)).copied().ok_or_else(|| {
            RightSizerError::MissingDiscountRate {
                term: term.to_string(),
                payment_option: payment.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_monthly_rates() {
        let catalog = PricingCatalog::default();
        let cost = catalog.monthly_cost("m5.large").unwrap();
        assert!((cost - 0.096 * HOURS_PER_MONTH).abs() < 1e-9);
        assert!(catalog.monthly_cost("z9.mega").is_none());
    }

    #[test]
    fn test_unknown_type_falls_back_to_default_rate() {
        let catalog = PricingCatalog::default();
        let cost = catalog.estimate_monthly_cost("z9.mega", None);
        assert!((cost - 0.10 * HOURS_PER_MONTH).abs() < 1e-9);
    }

    #[test]
    fn test_commercial_engine_surcharge() {
        let catalog = PricingCatalog::default();
        let postgres = catalog.estimate_monthly_cost("db.m5.large", Some("postgres"));
        let oracle = catalog.estimate_monthly_cost("db.m5.large", Some("oracle-ee"));
        assert!((oracle - postgres * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_discount_table_is_complete() {
        let table = DiscountTable::default();
        for term in [TermLength::OneYear, TermLength::ThreeYear] {
            for payment in [
                PaymentOption::AllUpfront,
                PaymentOption::PartialUpfront,
                PaymentOption::NoUpfront,
            ] {
                assert!(table.rate(term, payment).is_ok());
            }
        }
    }

    #[test]
    fn test_discount_increases_with_commitment() {
        let table = DiscountTable::default();
        let one_no = table
            .rate(TermLength::OneYear, PaymentOption::NoUpfront)
            .unwrap();
        let one_all = table
            .rate(TermLength::OneYear, PaymentOption::AllUpfront)
            .unwrap();
        let three_all = table
            .rate(TermLength::ThreeYear, PaymentOption::AllUpfront)
            .unwrap();
        assert!(one_no < one_all);
        assert!(one_all < three_all);
    }

    #[test]
    fn test_missing_rate_is_fatal() {
        let table = DiscountTable::empty();
        let err = table
            .rate(TermLength::OneYear, PaymentOption::AllUpfront)
            .unwrap_err();
        assert!(err.to_string().contains("all_upfront"));
    }
}
