//! Right-sizing recommender.
//!
//! Proposes cheaper resource shapes for underutilized resources. Two
//! independent strategies are evaluated per eligible resource and both may
//! fire: downsize-in-family (one rung down the size ladder) and
//! family-switch (premium family to its cheaper AMD sibling).

use super::config::RightSizingConfig;
use super::pricing::PricingCatalog;
use super::types::{
    CpuSnapshot, MetricSeries, ResourceType, RightSizingRecommendation, Strategy,
    UtilizationSummary,
};
use log::debug;

/// Fixed mapping from premium families to their budget siblings.
const PREMIUM_TO_BUDGET: &[(&str, &str)] = &[
    ("m5", "m5a"),
    ("c5", "c5a"),
    ("r5", "r5a"),
    ("t3", "t3a"),
];

/// Recommended cost factor for a family switch. AMD siblings are typically
/// about 10% cheaper, so the switch is priced as a flat discount rather than
/// a per-type lookup.
const FAMILY_SWITCH_FACTOR: f64 = 0.90;

/// Downsize fallback when the recommended type is absent from the catalog:
/// assume half the current cost. Conservative estimate, not a real price.
const UNKNOWN_PRICE_FACTOR: f64 = 0.5;

/// Generates right-sizing recommendations from utilization summaries.
pub struct RightSizingRecommender {
    config: RightSizingConfig,
    catalog: PricingCatalog,
}

impl RightSizingRecommender {
    /// Create a recommender with an explicit pricing catalog.
    pub fn new(config: RightSizingConfig, catalog: PricingCatalog) -> Self {
        Self { config, catalog }
    }

    /// Generate recommendations for every eligible resource, sorted
    /// descending by monthly savings.
    ///
    /// Resources without a CPU series are skipped silently (insufficient
    /// data, not an error), as are resources whose type identifier does not
    /// decompose into `(family, size)`.
    pub fn generate(&self, summaries: &[UtilizationSummary]) -> Vec<RightSizingRecommendation> {
        let mut recommendations = Vec::new();

        for summary in summaries {
            let cpu = match summary.cpu() {
                Some(series) => series,
                None => {
                    debug!("{}: no CPU series, skipping", summary.resource_id);
                    continue;
                }
            };

            if cpu.p95 >= self.config.cpu_underutilized_threshold {
                continue;
            }

            let resource_type = match ResourceType::parse(&summary.resource_type) {
                Some(rt) => rt,
                None => {
                    debug!(
                        "{}: malformed resource type '{}', skipping",
                        summary.resource_id, summary.resource_type
                    );
                    continue;
                }
            };

            if let Some(rec) = self.recommend_downsize(summary, &resource_type, cpu) {
                recommendations.push(rec);
            }
            if let Some(rec) = self.recommend_family_switch(summary, &resource_type, cpu) {
                recommendations.push(rec);
            }
        }

        // Stable sort keeps output identical across runs
        recommendations.sort_by(|a, b| {
            b.monthly_savings
                .partial_cmp(&a.monthly_savings)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        recommendations
    }

    /// Strategy 1: one rung down the size ladder within the same family.
    fn recommend_downsize(
        &self,
        summary: &UtilizationSummary,
        resource_type: &ResourceType,
        cpu: &MetricSeries,
    ) -> Option<RightSizingRecommendation> {
        let current_rung = resource_type.size_rung()?;
        let smaller = current_rung.smaller()?;

        let recommended_type = format!("{}.{}", resource_type.family, smaller);
        let current_cost = summary.current_monthly_cost;
        let recommended_cost = self
            .catalog
            .monthly_cost(&recommended_type)
            .unwrap_or(current_cost * UNKNOWN_PRICE_FACTOR);

        self.build_recommendation(
            summary,
            recommended_type,
            Strategy::Downsize,
            format!(
                "P{:.0} CPU usage is {:.1}%, can downsize safely",
                self.config.percentile, cpu.p95
            ),
            recommended_cost,
            cpu,
        )
    }

    /// Strategy 2: switch a premium family to its budget sibling, gated on
    /// the allow-list.
    fn recommend_family_switch(
        &self,
        summary: &UtilizationSummary,
        resource_type: &ResourceType,
        cpu: &MetricSeries,
    ) -> Option<RightSizingRecommendation> {
        let budget_family = PREMIUM_TO_BUDGET
            .iter()
            .find(|(premium, _)| *premium == resource_type.family)
            .map(|(_, budget)| *budget)?;

        if !self.config.allows_family(budget_family) {
            return None;
        }

        let recommended_type = resource_type.with_family(budget_family);
        let recommended_cost = summary.current_monthly_cost * FAMILY_SWITCH_FACTOR;

        self.build_recommendation(
            summary,
            recommended_type,
            Strategy::FamilySwitch,
            format!("Switch to AMD-based {budget_family} for same performance at lower cost"),
            recommended_cost,
            cpu,
        )
    }

    /// Assemble a recommendation, enforcing the minimum-savings gate. No
    /// zero or negative-savings recommendation ever surfaces.
    fn build_recommendation(
        &self,
        summary: &UtilizationSummary,
        recommended_type: String,
        strategy: Strategy,
        reason: String,
        recommended_cost: f64,
        cpu: &MetricSeries,
    ) -> Option<RightSizingRecommendation> {
        let monthly_savings = summary.current_monthly_cost - recommended_cost;
        if monthly_savings <= self.config.min_savings_threshold {
            return None;
        }

        Some(RightSizingRecommendation {
            resource_id: summary.resource_id.clone(),
            name: summary.name.clone(),
            region: summary.region.clone(),
            current_type: summary.resource_type.clone(),
            recommended_type,
            strategy,
            reason,
            current_monthly_cost: summary.current_monthly_cost,
            recommended_monthly_cost: recommended_cost,
            monthly_savings,
            annual_savings: monthly_savings * 12.0,
            cpu_utilization: CpuSnapshot {
                average: cpu.average,
                p95: cpu.p95,
                max: cpu.max,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::types::CPU_METRIC;
    use std::collections::HashMap;

    fn summary(id: &str, resource_type: &str, cost: f64, p95: f64) -> UtilizationSummary {
        let mut metrics = HashMap::new();
        metrics.insert(
            CPU_METRIC.to_string(),
            MetricSeries {
                datapoints: 336,
                average: p95 * 0.6,
                min: 1.0,
                max: p95 + 10.0,
                p95,
            },
        );
        UtilizationSummary {
            resource_id: id.to_string(),
            name: format!("{id}-name"),
            region: "us-east-1".to_string(),
            resource_type: resource_type.to_string(),
            engine: None,
            metrics,
            current_monthly_cost: cost,
        }
    }

    fn recommender() -> RightSizingRecommender {
        RightSizingRecommender::new(RightSizingConfig::default(), PricingCatalog::default())
    }

    #[test]
    fn test_high_utilization_yields_nothing() {
        let recs = recommender().generate(&[summary("i-1", "m5.xlarge", 140.16, 85.0)]);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        // p95 exactly at the threshold is not underutilized
        let recs = recommender().generate(&[summary("i-1", "m5.xlarge", 140.16, 40.0)]);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_missing_cpu_series_is_silently_skipped() {
        let mut s = summary("i-1", "m5.xlarge", 140.16, 10.0);
        s.metrics.clear();
        assert!(recommender().generate(&[s]).is_empty());
    }

    #[test]
    fn test_malformed_type_is_silently_skipped() {
        let recs = recommender().generate(&[summary("db-1", "db.t3.medium", 49.64, 10.0)]);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_downsize_never_skips_a_rung() {
        let recs = recommender().generate(&[summary("i-1", "m5.xlarge", 140.16, 12.0)]);
        let downsize = recs
            .iter()
            .find(|r| r.strategy == Strategy::Downsize)
            .unwrap();
        assert_eq!(downsize.recommended_type, "m5.large");
    }

    #[test]
    fn test_smallest_rung_gets_no_downsize() {
        let recs = recommender().generate(&[summary("i-1", "t3.nano", 3.80, 5.0)]);
        assert!(recs.iter().all(|r| r.strategy != Strategy::Downsize));
    }

    #[test]
    fn test_family_switch_respects_allow_list() {
        let config = RightSizingConfig::default()
            .with_min_savings(1.0)
            .with_allowed_families(["m5a"]);
        let rec = RightSizingRecommender::new(config, PricingCatalog::default());

        // c5 -> c5a exists in the map but c5a is not allowed
        let recs = rec.generate(&[summary("i-1", "c5.large", 62.05, 10.0)]);
        assert!(recs.iter().all(|r| r.strategy != Strategy::FamilySwitch));

        // m5a is allowed
        let recs = rec.generate(&[summary("i-2", "m5.large", 70.08, 10.0)]);
        let switch = recs
            .iter()
            .find(|r| r.strategy == Strategy::FamilySwitch)
            .unwrap();
        assert_eq!(switch.recommended_type, "m5a.large");
        assert!((switch.recommended_monthly_cost - 70.08 * 0.90).abs() < 1e-9);
    }

    #[test]
    fn test_both_strategies_can_fire() {
        let config = RightSizingConfig::default().with_min_savings(1.0);
        let rec = RightSizingRecommender::new(config, PricingCatalog::default());
        let recs = rec.generate(&[summary("i-1", "m5.xlarge", 140.16, 12.0)]);
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().any(|r| r.strategy == Strategy::Downsize));
        assert!(recs.iter().any(|r| r.strategy == Strategy::FamilySwitch));
    }

    #[test]
    fn test_savings_are_strictly_above_threshold() {
        let config = RightSizingConfig::default().with_min_savings(10.0);
        let rec = RightSizingRecommender::new(config, PricingCatalog::default());
        let recs = rec.generate(&[
            summary("i-1", "m5.xlarge", 140.16, 12.0),
            summary("i-2", "t3.small", 15.18, 8.0),
        ]);
        assert!(!recs.is_empty());
        for r in &recs {
            assert!(r.monthly_savings > 10.0);
            assert!(
                (r.monthly_savings - (r.current_monthly_cost - r.recommended_monthly_cost)).abs()
                    < 1e-9
            );
        }
    }

    #[test]
    fn test_unknown_recommended_type_uses_half_cost_fallback() {
        let catalog = PricingCatalog::empty();
        let rec = RightSizingRecommender::new(
            RightSizingConfig::default().with_allowed_families(Vec::<String>::new()),
            catalog,
        );
        let recs = rec.generate(&[summary("i-1", "x7.xlarge", 200.0, 10.0)]);
        assert_eq!(recs.len(), 1);
        assert!((recs[0].recommended_monthly_cost - 100.0).abs() < 1e-9);
        assert!((recs[0].monthly_savings - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_sorted_descending_and_idempotent() {
        let input = vec![
            summary("i-1", "t3.medium", 30.37, 10.0),
            summary("i-2", "m5.2xlarge", 280.32, 12.0),
            summary("i-3", "m5.xlarge", 140.16, 15.0),
        ];
        let rec = recommender();
        let first = rec.generate(&input);
        let second = rec.generate(&input);

        assert_eq!(first, second);
        for pair in first.windows(2) {
            assert!(pair[0].monthly_savings >= pair[1].monthly_savings);
        }
    }
}
