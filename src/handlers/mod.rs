//! Command handlers.
//!
//! Wires the pipeline together: collector → recommenders → aggregation →
//! report. Handlers own all I/O decisions; the analyzer stays pure.

use crate::analyzer::{
    DiscountTable, PricingCatalog, ReservedCapacityRecommender, RightSizingRecommender,
};
use crate::collector::{FileCollector, ResourceKind, UtilizationCollector};
use crate::config::Config;
use crate::error::{Result, RightSizerError};
use crate::report::{self, AnalysisReport, ReportFormat};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Run a full analysis pass over a utilization snapshot and render the
/// resulting report.
pub fn handle_analyze(
    config: &Config,
    input: PathBuf,
    format: Option<ReportFormat>,
    resources: Option<Vec<String>>,
    percentile: Option<f64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let kinds = resources.map(parse_kinds).transpose()?;
    let percentile = percentile.unwrap_or(config.analysis.cpu_percentile);

    let mut collector = FileCollector::new(&input)
        .with_percentile(percentile)
        .with_min_datapoints(config.analysis.min_datapoints);
    if let Some(kinds) = kinds {
        collector = collector.with_kinds(kinds);
    }
    let summaries = collector.collect()?;
    info!(
        "analyzing {} resource(s) over a {}-day lookback window",
        summaries.len(),
        config.analysis.lookback_days
    );

    let right_sizing = RightSizingRecommender::new(
        config
            .compute
            .to_right_sizing_config()
            .with_percentile(percentile),
        PricingCatalog::default(),
    )
    .generate(&summaries);

    let reserved = ReservedCapacityRecommender::new(
        config.reserved.to_reserved_config()?,
        DiscountTable::default(),
    )
    .generate(&summaries)?;

    info!(
        "{} right-sizing and {} reserved-capacity recommendation(s)",
        right_sizing.len(),
        reserved.len()
    );

    let report = AnalysisReport::new(right_sizing, reserved);
    let format = format.unwrap_or(config.reporting.format);
    report::print_report(&report, format);

    if let Some(path) = output {
        report::save_report(&report, format, Some(path))?;
    } else if config.reporting.save_to_file {
        fs::create_dir_all(&config.reporting.output_dir)?;
        let path = report::timestamped_report_path(&config.reporting.output_dir, &report, format);
        report::save_report(&report, format, Some(path))?;
    }

    Ok(())
}

fn parse_kinds(tokens: Vec<String>) -> Result<Vec<ResourceKind>> {
    tokens
        .iter()
        .map(|token| {
            ResourceKind::parse(token).ok_or_else(|| {
                RightSizerError::InvalidConfig(format!(
                    "unknown resource kind '{token}' (expected compute or database)"
                ))
            })
        })
        .collect()
}
