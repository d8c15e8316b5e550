//! Utilization collection.
//!
//! Collectors are the injected data source in front of the recommendation
//! engine: each analysis pass produces one [`UtilizationSummary`] per
//! resource. The engine itself never performs I/O, so anything that can
//! produce summaries (a cloud metrics API, a file snapshot, a test fixture)
//! plugs in behind the [`UtilizationCollector`] trait.

use crate::analyzer::types::UtilizationSummary;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// File-based snapshot collector.
pub mod file;

pub use file::FileCollector;

/// Source of per-resource utilization summaries.
pub trait UtilizationCollector {
    /// Produce one summary per analyzable resource.
    fn collect(&self) -> Result<Vec<UtilizationSummary>>;
}

/// Kind of resource a snapshot record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Compute instance
    Compute,
    /// Database instance
    Database,
}

impl ResourceKind {
    /// Parse a kind from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compute" => Some(Self::Compute),
            "database" => Some(Self::Database),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::Database => "database",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_parse() {
        assert_eq!(ResourceKind::parse("compute"), Some(ResourceKind::Compute));
        assert_eq!(ResourceKind::parse("DATABASE"), Some(ResourceKind::Database));
        assert_eq!(ResourceKind::parse("storage"), None);
    }
}
