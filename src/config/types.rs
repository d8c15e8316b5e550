//! Configuration file structure.

use crate::analyzer::config::{ReservedCapacityConfig, RightSizingConfig};
use crate::analyzer::types::TermLength;
use crate::error::{Result, RightSizerError};
use crate::report::ReportFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub compute: ComputeSection,
    #[serde(default)]
    pub reserved: ReservedSection,
    #[serde(default)]
    pub reporting: ReportingSection,
}

/// Metric collection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSection {
    /// Metric lookback window in days
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Percentile computed over each metric series
    #[serde(default = "default_cpu_percentile")]
    pub cpu_percentile: f64,
    /// Minimum CPU samples for a resource to be analyzed
    #[serde(default = "default_min_datapoints")]
    pub min_datapoints: usize,
}

/// Right-sizing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeSection {
    /// CPU percentile below which a resource counts as underutilized
    #[serde(default = "default_cpu_threshold")]
    pub cpu_underutilized_threshold: f64,
    /// Minimum monthly savings for a recommendation to be emitted
    #[serde(default = "default_min_savings")]
    pub min_savings_threshold: f64,
    /// Budget families eligible as family-switch targets
    #[serde(default = "default_allowed_families")]
    pub allowed_families: Vec<String>,
}

/// Reserved-capacity settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservedSection {
    /// Minimum steady-state utilization for commitment eligibility
    #[serde(default = "default_min_utilization")]
    pub min_utilization: f64,
    /// Commitment term in years (1 or 3)
    #[serde(default = "default_term_years")]
    pub term_years: u32,
    /// Payment option for the commitment
    #[serde(default = "default_payment_option")]
    pub payment_option: String,
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingSection {
    /// Output format
    #[serde(default)]
    pub format: ReportFormat,
    /// Also write the report to a file
    #[serde(default)]
    pub save_to_file: bool,
    /// Directory for saved reports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_lookback_days() -> u32 {
    14
}

fn default_cpu_percentile() -> f64 {
    95.0
}

fn default_min_datapoints() -> usize {
    100
}

fn default_cpu_threshold() -> f64 {
    40.0
}

fn default_min_savings() -> f64 {
    10.0
}

fn default_allowed_families() -> Vec<String> {
    vec![
        "t3a".to_string(),
        "m5a".to_string(),
        "c5a".to_string(),
        "r5a".to_string(),
    ]
}

fn default_min_utilization() -> f64 {
    75.0
}

fn default_term_years() -> u32 {
    1
}

fn default_payment_option() -> String {
    "partial_upfront".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./reports")
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            cpu_percentile: default_cpu_percentile(),
            min_datapoints: default_min_datapoints(),
        }
    }
}

impl Default for ComputeSection {
    fn default() -> Self {
        Self {
            cpu_underutilized_threshold: default_cpu_threshold(),
            min_savings_threshold: default_min_savings(),
            allowed_families: default_allowed_families(),
        }
    }
}

impl Default for ReservedSection {
    fn default() -> Self {
        Self {
            min_utilization: default_min_utilization(),
            term_years: default_term_years(),
            payment_option: default_payment_option(),
        }
    }
}

impl Default for ReportingSection {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            save_to_file: false,
            output_dir: default_output_dir(),
        }
    }
}

impl ComputeSection {
    /// Build the right-sizing recommender config from this section.
    pub fn to_right_sizing_config(&self) -> RightSizingConfig {
        RightSizingConfig::default()
            .with_cpu_threshold(self.cpu_underutilized_threshold)
            .with_min_savings(self.min_savings_threshold)
            .with_allowed_families(self.allowed_families.clone())
    }
}

impl ReservedSection {
    /// Build the reserved-capacity recommender config from this section.
    ///
    /// Fails on a term length or payment option the discount model does not
    /// define.
    pub fn to_reserved_config(&self) -> Result<ReservedCapacityConfig> {
        let term = TermLength::try_from(self.term_years).map_err(RightSizerError::InvalidConfig)?;
        let payment_option =
            crate::analyzer::types::PaymentOption::parse(&self.payment_option).ok_or_else(|| {
                RightSizerError::InvalidConfig(format!(
                    "unknown payment option '{}' (expected all_upfront, partial_upfront, or no_upfront)",
                    self.payment_option
                ))
            })?;
        Ok(ReservedCapacityConfig::default()
            .with_term(term)
            .with_payment_option(payment_option)
            .with_min_utilization(self.min_utilization))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::types::PaymentOption;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.analysis.cpu_percentile, 95.0);
        assert_eq!(config.analysis.min_datapoints, 100);
        assert_eq!(config.compute.cpu_underutilized_threshold, 40.0);
        assert_eq!(config.compute.allowed_families.len(), 4);
        assert_eq!(config.reserved.term_years, 1);
        assert_eq!(config.reporting.format, ReportFormat::Console);
        assert!(!config.reporting.save_to_file);
    }

    #[test]
    fn test_reserved_section_conversion() {
        let section = ReservedSection {
            min_utilization: 80.0,
            term_years: 3,
            payment_option: "all_upfront".to_string(),
        };
        let config = section.to_reserved_config().unwrap();
        assert_eq!(config.term, TermLength::ThreeYear);
        assert_eq!(config.payment_option, PaymentOption::AllUpfront);
    }

    #[test]
    fn test_invalid_term_years_rejected() {
        let section = ReservedSection {
            term_years: 2,
            ..ReservedSection::default()
        };
        assert!(section.to_reserved_config().is_err());
    }

    #[test]
    fn test_invalid_payment_option_rejected() {
        let section = ReservedSection {
            payment_option: "monthly".to_string(),
            ..ReservedSection::default()
        };
        assert!(section.to_reserved_config().is_err());
    }
}
