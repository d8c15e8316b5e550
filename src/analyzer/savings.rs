//! Savings aggregation.
//!
//! Rolls per-recommendation deltas into summary totals and categorical
//! breakdowns. Totals are exact sums of the stored recommendation fields;
//! this module is order-preserving and formula-agnostic. In particular,
//! reserved-capacity annual savings are summed as stored rather than
//! re-derived as monthly x 12, so a change to the per-group formula can
//! never diverge from the rolled-up totals.

use super::types::{
    ReservedCapacityRecommendation, RightSizingRecommendation, SavingsSummary, StrategySavings,
    SummaryStats, TotalSavings,
};
use std::collections::BTreeMap;

/// Strategy key used for reserved-capacity recommendations in stats.
const RESERVED_STRATEGY_KEY: &str = "reserved_capacity";

/// Merge both recommendation lists into non-overlapping summary totals.
pub fn aggregate(
    right_sizing: &[RightSizingRecommendation],
    reserved: &[ReservedCapacityRecommendation],
) -> SavingsSummary {
    let rs_monthly: f64 = right_sizing.iter().map(|r| r.monthly_savings).sum();
    let rs_annual: f64 = right_sizing.iter().map(|r| r.annual_savings).sum();

    let rc_monthly: f64 = reserved.iter().map(|r| r.monthly_savings).sum();
    let rc_annual: f64 = reserved.iter().map(|r| r.annual_savings).sum();

    SavingsSummary {
        right_sizing: StrategySavings {
            count: right_sizing.len(),
            monthly_savings: rs_monthly,
            annual_savings: rs_annual,
        },
        reserved_capacity: StrategySavings {
            count: reserved.len(),
            monthly_savings: rc_monthly,
            annual_savings: rc_annual,
        },
        total: TotalSavings {
            monthly_savings: rs_monthly + rc_monthly,
            annual_savings: rs_annual + rc_annual,
        },
    }
}

/// Compute categorical counts over both recommendation lists.
///
/// Region counting is asymmetric on purpose: a right-sizing recommendation
/// counts one unit, while a reserved-capacity recommendation counts one unit
/// per member resource, because a single purchase covers many resources.
pub fn stats(
    right_sizing: &[RightSizingRecommendation],
    reserved: &[ReservedCapacityRecommendation],
) -> SummaryStats {
    let mut by_strategy: BTreeMap<String, usize> = BTreeMap::new();
    for rec in right_sizing {
        *by_strategy.entry(rec.strategy.to_string()).or_insert(0) += 1;
    }
    if !reserved.is_empty() {
        by_strategy.insert(RESERVED_STRATEGY_KEY.to_string(), reserved.len());
    }

    let mut by_region: BTreeMap<String, usize> = BTreeMap::new();
    for rec in right_sizing {
        *by_region.entry(rec.region.clone()).or_insert(0) += 1;
    }
    for rec in reserved {
        *by_region.entry(rec.region.clone()).or_insert(0) += rec.members.len();
    }

    SummaryStats {
        total_recommendations: right_sizing.len() + reserved.len(),
        by_strategy,
        by_region,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::types::{CpuSnapshot, PaymentOption, ResourceRef, Strategy, TermLength};

    fn rs_rec(region: &str, monthly: f64, strategy: Strategy) -> RightSizingRecommendation {
        RightSizingRecommendation {
            resource_id: "i-1".to_string(),
            name: "web".to_string(),
            region: region.to_string(),
            current_type: "m5.xlarge".to_string(),
            recommended_type: "m5.large".to_string(),
            strategy,
            reason: "low utilization".to_string(),
            current_monthly_cost: monthly * 2.0,
            recommended_monthly_cost: monthly,
            monthly_savings: monthly,
            annual_savings: monthly * 12.0,
            cpu_utilization: CpuSnapshot {
                average: 8.0,
                p95: 14.0,
                max: 31.0,
            },
        }
    }

    fn rc_rec(region: &str, monthly: f64, member_count: usize) -> ReservedCapacityRecommendation {
        ReservedCapacityRecommendation {
            region: region.to_string(),
            resource_type: "m5.large".to_string(),
            resource_count: member_count,
            term: TermLength::OneYear,
            payment_option: PaymentOption::AllUpfront,
            current_monthly_cost: monthly / 0.4,
            reserved_monthly_cost: monthly / 0.4 - monthly,
            monthly_savings: monthly,
            annual_savings: monthly * 12.0,
            total_savings_over_term: monthly * 12.0,
            upfront_payment: 0.0,
            discount_rate: 0.4,
            members: (0..member_count)
                .map(|i| ResourceRef {
                    resource_id: format!("i-{i}"),
                    name: format!("member-{i}"),
                })
                .collect(),
        }
    }

    #[test]
    fn test_totals_are_exact_sums() {
        let rs = vec![
            rs_rec("us-east-1", 50.0, Strategy::Downsize),
            rs_rec("us-west-2", 20.0, Strategy::FamilySwitch),
        ];
        let rc = vec![rc_rec("us-east-1", 84.0, 3)];

        let summary = aggregate(&rs, &rc);
        assert_eq!(summary.right_sizing.count, 2);
        assert!((summary.right_sizing.monthly_savings - 70.0).abs() < 1e-9);
        assert!((summary.right_sizing.annual_savings - 840.0).abs() < 1e-9);
        assert!((summary.reserved_capacity.monthly_savings - 84.0).abs() < 1e-9);
        assert!((summary.total.monthly_savings - 154.0).abs() < 1e-9);
        assert!((summary.total.annual_savings - 1848.0).abs() < 1e-9);
    }

    #[test]
    fn test_annual_total_is_order_independent() {
        let a = rs_rec("us-east-1", 50.0, Strategy::Downsize);
        let b = rs_rec("us-west-2", 20.0, Strategy::FamilySwitch);
        let rc = vec![rc_rec("us-east-1", 84.0, 3)];

        let forward = aggregate(&[a.clone(), b.clone()], &rc);
        let reversed = aggregate(&[b, a], &rc);
        assert_eq!(forward.total.annual_savings, reversed.total.annual_savings);
    }

    #[test]
    fn test_reserved_annual_not_rederived() {
        // A stored annual value that deviates from monthly * 12 must be
        // summed as stored
        let mut rc = rc_rec("us-east-1", 84.0, 3);
        rc.annual_savings = 999.0;
        let summary = aggregate(&[], &[rc]);
        assert!((summary.reserved_capacity.annual_savings - 999.0).abs() < 1e-9);
        assert!((summary.total.annual_savings - 999.0).abs() < 1e-9);
    }

    #[test]
    fn test_region_counting_asymmetry() {
        let rs = vec![rs_rec("us-east-1", 50.0, Strategy::Downsize)];
        let rc = vec![rc_rec("us-east-1", 84.0, 5)];

        let s = stats(&rs, &rc);
        // 1 for the right-sizing rec, 5 for the reserved members
        assert_eq!(s.by_region["us-east-1"], 6);
        assert_eq!(s.total_recommendations, 2);
    }

    #[test]
    fn test_strategy_counts() {
        let rs = vec![
            rs_rec("us-east-1", 50.0, Strategy::Downsize),
            rs_rec("us-east-1", 30.0, Strategy::Downsize),
            rs_rec("us-west-2", 20.0, Strategy::FamilySwitch),
        ];
        let rc = vec![rc_rec("us-east-1", 84.0, 3)];

        let s = stats(&rs, &rc);
        assert_eq!(s.by_strategy["downsize"], 2);
        assert_eq!(s.by_strategy["family_switch"], 1);
        assert_eq!(s.by_strategy["reserved_capacity"], 1);
    }

    #[test]
    fn test_no_reserved_key_when_list_empty() {
        let rs = vec![rs_rec("us-east-1", 50.0, Strategy::Downsize)];
        let s = stats(&rs, &[]);
        assert!(!s.by_strategy.contains_key("reserved_capacity"));
    }

    #[test]
    fn test_empty_inputs() {
        let summary = aggregate(&[], &[]);
        assert_eq!(summary.total.monthly_savings, 0.0);
        let s = stats(&[], &[]);
        assert_eq!(s.total_recommendations, 0);
        assert!(s.by_region.is_empty());
    }
}
