//! File-based utilization snapshot collector.
//!
//! Reads a JSON snapshot of raw metric samples (the offline stand-in for a
//! live metrics API) and reduces each resource to a [`UtilizationSummary`].
//!
//! Snapshot format:
//!
//! ```json
//! {
//!   "resources": [
//!     {
//!       "resource_id": "i-0abc123",
//!       "name": "web-1",
//!       "region": "us-east-1",
//!       "resource_type": "m5.xlarge",
//!       "kind": "compute",
//!       "metrics": { "cpu_utilization": [12.0, 9.5, 14.2] },
//!       "current_monthly_cost": 140.16
//!     }
//!   ]
//! }
//! ```
//!
//! `current_monthly_cost` is optional; absent costs are estimated from the
//! pricing catalog. Resources with missing or short CPU series are excluded
//! here, before the engine ever sees them.

use super::{ResourceKind, UtilizationCollector};
use crate::analyzer::pricing::PricingCatalog;
use crate::analyzer::types::{MetricSeries, UtilizationSummary, CPU_METRIC};
use crate::error::Result;
use log::{info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Raw snapshot file layout.
#[derive(Debug, Deserialize)]
struct Snapshot {
    resources: Vec<SnapshotResource>,
}

/// One resource record in the snapshot.
#[derive(Debug, Deserialize)]
struct SnapshotResource {
    resource_id: String,
    #[serde(default)]
    name: Option<String>,
    region: String,
    resource_type: String,
    #[serde(default)]
    kind: Option<ResourceKind>,
    #[serde(default)]
    engine: Option<String>,
    /// Raw samples per metric name
    metrics: HashMap<String, Vec<f64>>,
    #[serde(default)]
    current_monthly_cost: Option<f64>,
}

/// Collects utilization summaries from a JSON snapshot file.
pub struct FileCollector {
    path: PathBuf,
    percentile: f64,
    min_datapoints: usize,
    catalog: PricingCatalog,
    kinds: Option<Vec<ResourceKind>>,
}

impl FileCollector {
    /// Create a collector for a snapshot file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            percentile: 95.0,
            min_datapoints: 1,
            catalog: PricingCatalog::default(),
            kinds: None,
        }
    }

    /// Set the percentile computed for every metric series.
    pub fn with_percentile(mut self, percentile: f64) -> Self {
        self.percentile = percentile;
        self
    }

    /// Require at least this many CPU samples for a resource to be included.
    pub fn with_min_datapoints(mut self, min_datapoints: usize) -> Self {
        self.min_datapoints = min_datapoints;
        self
    }

    /// Use an explicit pricing catalog for cost estimation.
    pub fn with_catalog(mut self, catalog: PricingCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Only include resources of the given kinds. Records without a kind tag
    /// always pass the filter.
    pub fn with_kinds(mut self, kinds: Vec<ResourceKind>) -> Self {
        self.kinds = Some(kinds);
        self
    }

    fn included(&self, kind: Option<ResourceKind>) -> bool {
        match (&self.kinds, kind) {
            (Some(filter), Some(kind)) => filter.contains(&kind),
            _ => true,
        }
    }
}

impl UtilizationCollector for FileCollector {
    fn collect(&self) -> Result<Vec<UtilizationSummary>> {
        let content = fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        let mut summaries = Vec::new();

        for resource in snapshot.resources {
            if !self.included(resource.kind) {
                continue;
            }

            let metrics: HashMap<String, MetricSeries> = resource
                .metrics
                .iter()
                .filter_map(|(name, values)| {
                    MetricSeries::from_values(values, self.percentile)
                        .map(|series| (name.clone(), series))
                })
                .collect();

            // Gate on CPU sample count before the engine sees the resource
            let sufficient = metrics
                .get(CPU_METRIC)
                .map(|cpu| cpu.datapoints >= self.min_datapoints)
                .unwrap_or(false);
            if !sufficient {
                warn!("{}: insufficient CPU data, excluded", resource.resource_id);
                continue;
            }

            let current_monthly_cost = resource.current_monthly_cost.unwrap_or_else(|| {
                self.catalog
                    .estimate_monthly_cost(&resource.resource_type, resource.engine.as_deref())
            });

            summaries.push(UtilizationSummary {
                name: resource
                    .name
                    .unwrap_or_else(|| resource.resource_id.clone()),
                resource_id: resource.resource_id,
                region: resource.region,
                resource_type: resource.resource_type,
                engine: resource.engine,
                metrics,
                current_monthly_cost,
            });
        }

        info!(
            "collected {} utilization summaries from {}",
            summaries.len(),
            self.path.display()
        );
        Ok(summaries)
    }
}
