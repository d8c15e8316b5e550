//! Core types for utilization analysis and cost-optimization recommendations.
//!
//! Everything here is a value object: produced by one stage of the pipeline
//! and passed immutably to the next. The recommenders never mutate their
//! input summaries.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Metric key under which CPU utilization is stored in a summary.
pub const CPU_METRIC: &str = "cpu_utilization";

// ============================================================================
// Instance Size Ladder
// ============================================================================

/// Fixed, explicitly ordered size ladder for downsize recommendations.
///
/// Ordered smallest to largest:
/// `nano < micro < small < medium < large < xlarge < 2xlarge < 4xlarge < 8xlarge`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceSize {
    Nano,
    Micro,
    Small,
    Medium,
    Large,
    Xlarge,
    #[serde(rename = "2xlarge")]
    Xlarge2,
    #[serde(rename = "4xlarge")]
    Xlarge4,
    #[serde(rename = "8xlarge")]
    Xlarge8,
}

impl InstanceSize {
    /// Parse a size token (the segment after the dot in `m5.large`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "nano" => Some(Self::Nano),
            "micro" => Some(Self::Micro),
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            "xlarge" => Some(Self::Xlarge),
            "2xlarge" => Some(Self::Xlarge2),
            "4xlarge" => Some(Self::Xlarge4),
            "8xlarge" => Some(Self::Xlarge8),
            _ => None,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nano => "nano",
            Self::Micro => "micro",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Xlarge => "xlarge",
            Self::Xlarge2 => "2xlarge",
            Self::Xlarge4 => "4xlarge",
            Self::Xlarge8 => "8xlarge",
        }
    }

    /// The immediately smaller rung, or `None` at the bottom of the ladder.
    ///
    /// Downsizing never skips a rung.
    pub fn smaller(&self) -> Option<Self> {
        match self {
            Self::Nano => None,
            Self::Micro => Some(Self::Nano),
            Self::Small => Some(Self::Micro),
            Self::Medium => Some(Self::Small),
            Self::Large => Some(Self::Medium),
            Self::Xlarge => Some(Self::Large),
            Self::Xlarge2 => Some(Self::Xlarge),
            Self::Xlarge4 => Some(Self::Xlarge2),
            Self::Xlarge8 => Some(Self::Xlarge4),
        }
    }
}

impl fmt::Display for InstanceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Resource Type
// ============================================================================

/// A compute/database shape identifier, decomposed into `(family, size)`.
///
/// The wire form is `family.size` (e.g. `m5.xlarge`). Identifiers that are
/// not exactly two non-empty dot-separated segments are rejected, not
/// guessed: `ResourceType::parse` returns `None` and the resource is silently
/// excluded from type-aware strategies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceType {
    /// Architectural/performance class (e.g. `m5`, `c5a`)
    pub family: String,
    /// Size token (e.g. `large`, `2xlarge`)
    pub size: String,
}

impl ResourceType {
    /// Decompose an identifier into `(family, size)`.
    pub fn parse(identifier: &str) -> Option<Self> {
        let mut parts = identifier.split('.');
        let family = parts.next()?;
        let size = parts.next()?;
        if family.is_empty() || size.is_empty() || parts.next().is_some() {
            return None;
        }
        Some(Self {
            family: family.to_string(),
            size: size.to_string(),
        })
    }

    /// The size's position on the fixed ladder, if it is a known rung.
    pub fn size_rung(&self) -> Option<InstanceSize> {
        InstanceSize::parse(&self.size)
    }

    /// Build the identifier for a sibling type in another family.
    pub fn with_family(&self, family: &str) -> String {
        format!("{}.{}", family, self.size)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.family, self.size)
    }
}

// ============================================================================
// Metric Series
// ============================================================================

/// Statistical summary of one metric over the lookback window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    /// Number of samples in the window
    pub datapoints: usize,
    /// Mean of the samples
    pub average: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// The configured percentile of the samples (p95 by default)
    pub p95: f64,
}

// ============================================================================
// Utilization Summary
// ============================================================================

/// One resource's identity, metric summaries, and current estimated monthly
/// cost. Produced once per analysis pass by the collector and consumed by
/// both recommenders without mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationSummary {
    /// Cloud resource identifier (e.g. `i-0abc123`)
    pub resource_id: String,
    /// Display name (tag or identifier fallback)
    pub name: String,
    /// Region the resource runs in
    pub region: String,
    /// Resource type identifier (e.g. `m5.large`)
    pub resource_type: String,
    /// Engine or kind, where relevant (e.g. `postgres` for database shapes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Metric summaries keyed by metric name
    pub metrics: HashMap<String, MetricSeries>,
    /// Current estimated monthly cost in USD
    pub current_monthly_cost: f64,
}

impl UtilizationSummary {
    /// The CPU utilization series, if the collector captured one.
    pub fn cpu(&self) -> Option<&MetricSeries> {
        self.metrics.get(CPU_METRIC)
    }
}

// ============================================================================
// Right-Sizing Strategy
// ============================================================================

/// Strategy tag carried by a right-sizing recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One rung down the size ladder within the same family
    Downsize,
    /// Switch to a cheaper architecturally-equivalent family
    FamilySwitch,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Downsize => "downsize",
            Self::FamilySwitch => "family_switch",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Reserved Capacity Terms
// ============================================================================

/// Commitment term length for reserved-capacity purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TermLength {
    /// 1-year commitment
    OneYear,
    /// 3-year commitment
    ThreeYear,
}

impl TermLength {
    /// Term length in years.
    pub fn years(&self) -> u32 {
        match self {
            Self::OneYear => 1,
            Self::ThreeYear => 3,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneYear => "1yr",
            Self::ThreeYear => "3yr",
        }
    }
}

impl TryFrom<u32> for TermLength {
    type Error = String;

    fn try_from(years: u32) -> std::result::Result<Self, Self::Error> {
        match years {
            1 => Ok(Self::OneYear),
            3 => Ok(Self::ThreeYear),
            other => Err(format!(
                "unsupported term length: {other} years (expected 1 or 3)"
            )),
        }
    }
}

impl From<TermLength> for u32 {
    fn from(term: TermLength) -> u32 {
        term.years()
    }
}

impl fmt::Display for TermLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment option for reserved-capacity purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOption {
    /// Full discounted term cost paid upfront
    AllUpfront,
    /// Half the discounted term cost paid upfront
    PartialUpfront,
    /// No upfront payment
    NoUpfront,
}

impl PaymentOption {
    /// Parse a payment option from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all_upfront" => Some(Self::AllUpfront),
            "partial_upfront" => Some(Self::PartialUpfront),
            "no_upfront" => Some(Self::NoUpfront),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllUpfront => "all_upfront",
            Self::PartialUpfront => "partial_upfront",
            Self::NoUpfront => "no_upfront",
        }
    }
}

impl fmt::Display for PaymentOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Recommendations
// ============================================================================

/// Snapshot of the CPU utilization values that justified a right-sizing
/// recommendation. User-facing explanation only, never consumed downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuSnapshot {
    pub average: f64,
    pub p95: f64,
    pub max: f64,
}

/// A single right-sizing recommendation for one resource.
///
/// Invariant: `monthly_savings = current_monthly_cost -
/// recommended_monthly_cost` and is strictly above the configured minimum
/// threshold, or the recommendation was never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RightSizingRecommendation {
    pub resource_id: String,
    pub name: String,
    pub region: String,
    /// Current resource type identifier
    pub current_type: String,
    /// Proposed cheaper resource type identifier
    pub recommended_type: String,
    /// Which strategy produced this recommendation
    pub strategy: Strategy,
    /// Human-readable justification
    pub reason: String,
    pub current_monthly_cost: f64,
    pub recommended_monthly_cost: f64,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    /// Utilization values that triggered the recommendation
    pub cpu_utilization: CpuSnapshot,
}

/// Reference to one member resource of a reserved-capacity group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub resource_id: String,
    pub name: String,
}

/// A reserved-capacity purchase recommendation for one `(region, type)`
/// group.
///
/// Invariant: `reserved_monthly_cost = current_monthly_cost *
/// (1 - discount_rate)`, with the rate keyed by `(term, payment_option)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservedCapacityRecommendation {
    pub region: String,
    /// Resource type shared by all group members
    pub resource_type: String,
    /// Number of member resources
    pub resource_count: usize,
    pub term: TermLength,
    pub payment_option: PaymentOption,
    /// Aggregate current monthly cost across the group
    pub current_monthly_cost: f64,
    /// Discounted monthly cost under the commitment
    pub reserved_monthly_cost: f64,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    /// Annual savings multiplied by the term length
    pub total_savings_over_term: f64,
    /// Upfront payment implied by the payment option
    pub upfront_payment: f64,
    /// Applied discount rate (fraction, e.g. 0.40)
    pub discount_rate: f64,
    /// Member resources covered by the purchase
    pub members: Vec<ResourceRef>,
}

// ============================================================================
// Savings Summary and Stats
// ============================================================================

/// Per-strategy-family savings totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySavings {
    /// Number of recommendations in this family
    pub count: usize,
    pub monthly_savings: f64,
    pub annual_savings: f64,
}

/// Grand totals across both recommendation families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalSavings {
    pub monthly_savings: f64,
    pub annual_savings: f64,
}

/// Rolled-up savings across all recommendations.
///
/// Always the exact sum of the underlying recommendation objects; nothing
/// here is re-derived from raw utilization data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsSummary {
    pub right_sizing: StrategySavings,
    pub reserved_capacity: StrategySavings,
    pub total: TotalSavings,
}

/// Categorical recommendation counts.
///
/// Region counting is deliberately asymmetric: right-sizing recommendations
/// count one unit each, reserved-capacity recommendations count one unit per
/// member resource, because one purchase covers many resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_recommendations: usize,
    /// Count per strategy tag (reserved recommendations under
    /// `reserved_capacity`)
    pub by_strategy: BTreeMap<String, usize>,
    /// Resource count per region
    pub by_region: BTreeMap<String, usize>,
}

// ============================================================================
// Tests
// ============================================================================
