//! Reserved-capacity recommender.
//!
//! Groups resources by `(region, resource_type)` and proposes one commitment
//! purchase per group. Unlike the right-sizing path, no utilization gate is
//! applied: any consistent usage of a shape in a region is considered
//! commitment-worthy.

use super::config::ReservedCapacityConfig;
use super::pricing::DiscountTable;
use super::types::{
    PaymentOption, ReservedCapacityRecommendation, ResourceRef, UtilizationSummary,
};
use crate::error::Result;
use log::debug;
use std::collections::BTreeMap;

/// Months in a year, for annualizing savings.
const MONTHS_PER_YEAR: f64 = 12.0;

/// Fraction of the discounted term cost paid upfront under
/// `partial_upfront`.
const PARTIAL_UPFRONT_SHARE: f64 = 0.5;

/// Generates reserved-capacity purchase recommendations.
pub struct ReservedCapacityRecommender {
    config: ReservedCapacityConfig,
    discounts: DiscountTable,
}

impl ReservedCapacityRecommender {
    /// Create a recommender with an explicit discount table.
    pub fn new(config: ReservedCapacityConfig, discounts: DiscountTable) -> Self {
        Self { config, discounts }
    }

    /// Generate one recommendation per non-empty `(region, type)` group,
    /// sorted descending by annual savings.
    ///
    /// Fails if the discount table has no rate for the configured
    /// `(term, payment_option)` pair; defaulting a rate would produce
    /// incorrect financial output.
    pub fn generate(
        &self,
        summaries: &[UtilizationSummary],
    ) -> Result<Vec<ReservedCapacityRecommendation>> {
        // Resolve the rate up front so misconfiguration fails the whole run
        let discount_rate = self
            .discounts
            .rate(self.config.term, self.config.payment_option)?;

        let mut recommendations: Vec<ReservedCapacityRecommendation> = self
            .group_by_region_and_type(summaries)
            .into_iter()
            .map(|((region, resource_type), members)| {
                debug!(
                    "reserved-capacity group {region}/{resource_type}: {} member(s)",
                    members.len()
                );
                self.recommend_for_group(region, resource_type, &members, discount_rate)
            })
            .collect();

        recommendations.sort_by(|a, b| {
            b.annual_savings
                .partial_cmp(&a.annual_savings)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(recommendations)
    }

    /// Partition summaries by `(region, resource_type)`. BTreeMap keeps the
    /// grouping order deterministic.
    fn group_by_region_and_type<'a>(
        &self,
        summaries: &'a [UtilizationSummary],
    ) -> BTreeMap<(String, String), Vec<&'a UtilizationSummary>> {
        let mut groups: BTreeMap<(String, String), Vec<&UtilizationSummary>> = BTreeMap::new();
        for summary in summaries {
            groups
                .entry((summary.region.clone(), summary.resource_type.clone()))
                .or_default()
                .push(summary);
        }
        groups
    }

    /// Build the purchase recommendation for one group.
    fn recommend_for_group(
        &self,
        region: String,
        resource_type: String,
        members: &[&UtilizationSummary],
        discount_rate: f64,
    ) -> ReservedCapacityRecommendation {
        let current_monthly_cost: f64 = members.iter().map(|m| m.current_monthly_cost).sum();
        let term_years = self.config.term.years() as f64;

        let reserved_monthly_cost = current_monthly_cost * (1.0 - discount_rate);
        let monthly_savings = current_monthly_cost - reserved_monthly_cost;
        let annual_savings = monthly_savings * MONTHS_PER_YEAR;
        let total_savings_over_term = annual_savings * term_years;

        let discounted_term_cost =
            current_monthly_cost * MONTHS_PER_YEAR * term_years * (1.0 - discount_rate);
        let upfront_payment = match self.config.payment_option {
            PaymentOption::AllUpfront => discounted_term_cost,
            PaymentOption::PartialUpfront => discounted_term_cost * PARTIAL_UPFRONT_SHARE,
            PaymentOption::NoUpfront => 0.0,
        };

        ReservedCapacityRecommendation {
            region,
            resource_type,
            resource_count: members.len(),
            term: self.config.term,
            payment_option: self.config.payment_option,
            current_monthly_cost,
            reserved_monthly_cost,
            monthly_savings,
            annual_savings,
            total_savings_over_term,
            upfront_payment,
            discount_rate,
            members: members
                .iter()
                .map(|m| ResourceRef {
                    resource_id: m.resource_id.clone(),
                    name: m.name.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::types::TermLength;
    use std::collections::HashMap;

    fn summary(id: &str, region: &str, resource_type: &str, cost: f64) -> UtilizationSummary {
        UtilizationSummary {
            resource_id: id.to_string(),
            name: format!("{id}-name"),
            region: region.to_string(),
            resource_type: resource_type.to_string(),
            engine: None,
            metrics: HashMap::new(),
            current_monthly_cost: cost,
        }
    }

    fn recommender(term: TermLength, payment: PaymentOption) -> ReservedCapacityRecommender {
        ReservedCapacityRecommender::new(
            ReservedCapacityConfig::default()
                .with_term(term)
                .with_payment_option(payment),
            DiscountTable::default(),
        )
    }

    #[test]
    fn test_group_math_one_year_all_upfront() {
        let summaries = vec![
            summary("i-1", "us-east-1", "m5.large", 70.0),
            summary("i-2", "us-east-1", "m5.large", 70.0),
            summary("i-3", "us-east-1", "m5.large", 70.0),
        ];
        let recs = recommender(TermLength::OneYear, PaymentOption::AllUpfront)
            .generate(&summaries)
            .unwrap();

        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.resource_count, 3);
        assert!((rec.current_monthly_cost - 210.0).abs() < 1e-9);
        assert!((rec.discount_rate - 0.40).abs() < 1e-9);
        assert!((rec.reserved_monthly_cost - 126.0).abs() < 1e-9);
        assert!((rec.monthly_savings - 84.0).abs() < 1e-9);
        assert!((rec.annual_savings - 1008.0).abs() < 1e-9);
        assert!((rec.total_savings_over_term - 1008.0).abs() < 1e-9);
        // 210 * 12 * 1 * 0.6 = 1512
        assert!((rec.upfront_payment - 1512.0).abs() < 1e-9);
    }

    #[test]
    fn test_upfront_tiers() {
        let summaries = vec![summary("i-1", "us-east-1", "m5.large", 100.0)];

        let all = recommender(TermLength::OneYear, PaymentOption::AllUpfront)
            .generate(&summaries)
            .unwrap();
        let partial = recommender(TermLength::OneYear, PaymentOption::PartialUpfront)
            .generate(&summaries)
            .unwrap();
        let none = recommender(TermLength::OneYear, PaymentOption::NoUpfront)
            .generate(&summaries)
            .unwrap();

        // Different payment options carry different discount rates, so each
        // tier is checked against its own discounted term cost
        assert!((all[0].upfront_payment - 100.0 * 12.0 * 0.60).abs() < 1e-9);
        assert!((partial[0].upfront_payment - 100.0 * 12.0 * 0.65 * 0.5).abs() < 1e-9);
        assert_eq!(none[0].upfront_payment, 0.0);
    }

    #[test]
    fn test_three_year_term_total() {
        let summaries = vec![summary("i-1", "eu-west-1", "c5.xlarge", 124.1)];
        let recs = recommender(TermLength::ThreeYear, PaymentOption::NoUpfront)
            .generate(&summaries)
            .unwrap();
        let rec = &recs[0];
        assert!((rec.discount_rate - 0.50).abs() < 1e-9);
        assert!((rec.total_savings_over_term - rec.annual_savings * 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_partitions_by_region_and_type() {
        let summaries = vec![
            summary("i-1", "us-east-1", "m5.large", 70.0),
            summary("i-2", "us-west-2", "m5.large", 70.0),
            summary("i-3", "us-east-1", "c5.large", 62.0),
        ];
        let recs = recommender(TermLength::OneYear, PaymentOption::AllUpfront)
            .generate(&summaries)
            .unwrap();
        assert_eq!(recs.len(), 3);
        for rec in &recs {
            assert_eq!(rec.resource_count, 1);
            assert_eq!(rec.members.len(), 1);
        }
    }

    #[test]
    fn test_no_utilization_gate() {
        // A group with no metrics at all still yields a recommendation
        let summaries = vec![summary("i-1", "us-east-1", "r5.large", 91.98)];
        let recs = recommender(TermLength::OneYear, PaymentOption::NoUpfront)
            .generate(&summaries)
            .unwrap();
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn test_sorted_descending_by_annual_savings() {
        let summaries = vec![
            summary("i-1", "us-east-1", "t3.micro", 7.59),
            summary("i-2", "us-east-1", "m5.4xlarge", 560.64),
            summary("i-3", "eu-west-1", "m5.large", 70.08),
        ];
        let recs = recommender(TermLength::OneYear, PaymentOption::AllUpfront)
            .generate(&summaries)
            .unwrap();
        for pair in recs.windows(2) {
            assert!(pair[0].annual_savings >= pair[1].annual_savings);
        }
        assert_eq!(recs[0].resource_type, "m5.4xlarge");
    }

    #[test]
    fn test_missing_discount_entry_is_fatal() {
        let rec = ReservedCapacityRecommender::new(
            ReservedCapacityConfig::default(),
            DiscountTable::empty(),
        );
        let err = rec
            .generate(&[summary("i-1", "us-east-1", "m5.large", 70.0)])
            .unwrap_err();
        assert!(err.to_string().contains("Discount table"));
    }

    #[test]
    fn test_empty_input_yields_no_recommendations() {
        let recs = recommender(TermLength::OneYear, PaymentOption::AllUpfront)
            .generate(&[])
            .unwrap();
        assert!(recs.is_empty());
    }
}
