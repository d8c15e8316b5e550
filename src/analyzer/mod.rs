//! Cost-Optimization Recommendation Engine
//!
//! Turns per-resource utilization summaries into ranked, explainable savings
//! recommendations:
//!
//! - **Right-sizing** — proposes cheaper shapes (downsize within a family,
//!   or switch to a budget sibling family) for resources whose CPU
//!   percentile sits below a configured threshold.
//! - **Reserved capacity** — groups steady-state resources by
//!   `(region, type)` and proposes commitment purchases with term- and
//!   payment-option-dependent discounts.
//! - **Savings aggregation** — rolls per-recommendation deltas into summary
//!   totals and categorical breakdowns without double counting.
//!
//! Everything in this module is synchronous, pure, and side-effect-free:
//! deterministic transforms over immutable inputs. Metric collection and
//! report rendering live outside (see [`crate::collector`] and
//! [`crate::report`]).
//!
//! # Example
//!
//! ```rust
//! use rightsizer_cli::analyzer::{
//!     savings, DiscountTable, PricingCatalog, ReservedCapacityConfig,
//!     ReservedCapacityRecommender, RightSizingConfig, RightSizingRecommender,
//! };
//!
//! # fn main() -> rightsizer_cli::Result<()> {
//! let summaries = Vec::new(); // from a collector
//!
//! let right_sizing = RightSizingRecommender::new(
//!     RightSizingConfig::default(),
//!     PricingCatalog::default(),
//! )
//! .generate(&summaries);
//!
//! let reserved = ReservedCapacityRecommender::new(
//!     ReservedCapacityConfig::default(),
//!     DiscountTable::default(),
//! )
//! .generate(&summaries)?;
//!
//! let summary = savings::aggregate(&right_sizing, &reserved);
//! let stats = savings::stats(&right_sizing, &reserved);
//! # let _ = (summary, stats);
//! # Ok(())
//! # }
//! ```

/// Core data types.
pub mod types;

/// Statistical reduction of raw metric samples.
pub mod metrics;

/// Static pricing catalog and discount table.
pub mod pricing;

/// Recommender configuration.
pub mod config;

/// Right-sizing recommendations (downsize / family switch).
pub mod right_sizing;

/// Reserved-capacity purchase recommendations.
pub mod reserved_capacity;

/// Savings aggregation and stats.
pub mod savings;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ReservedCapacityConfig, RightSizingConfig};
pub use metrics::percentile;
pub use pricing::{DiscountTable, PricingCatalog, HOURS_PER_MONTH};
pub use reserved_capacity::ReservedCapacityRecommender;
pub use right_sizing::RightSizingRecommender;
pub use savings::{aggregate, stats};
pub use types::{
    CpuSnapshot, InstanceSize, MetricSeries, PaymentOption, ReservedCapacityRecommendation,
    ResourceRef, ResourceType, RightSizingRecommendation, SavingsSummary, Strategy,
    StrategySavings, SummaryStats, TermLength, TotalSavings, UtilizationSummary, CPU_METRIC,
};
