//! Report rendering.
//!
//! Supports multiple output formats: console, JSON, CSV, and HTML. Dollar
//! amounts are kept at full precision everywhere in the pipeline and rounded
//! to cents only here, at the presentation edge.
//!
//! The CSV format carries right-sizing rows only (one actionable change per
//! resource); reserved-capacity purchases are group-level and do not fit the
//! flat per-resource column set.

use super::AnalysisReport;
use crate::error::{Result, RightSizerError};
use colored::Colorize;
use log::info;
use prettytable::{format, row, Table};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Console output shows at most this many rows per strategy section.
const MAX_CONSOLE_ROWS: usize = 10;

// ============================================================================
// Report Format
// ============================================================================

/// Output format for analysis reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Colored console tables (default)
    #[default]
    Console,
    /// JSON document with the full report object
    Json,
    /// Flat CSV of right-sizing recommendations
    Csv,
    /// Self-contained HTML page
    Html,
}

impl ReportFormat {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" => Some(Self::Console),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "html" => Some(Self::Html),
            _ => None,
        }
    }

    /// File extension used when saving this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Console => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Html => "html",
        }
    }
}

// ============================================================================
// Rendering Functions
// ============================================================================

/// Render a report to a string in the given format.
pub fn render_report(report: &AnalysisReport, format: ReportFormat) -> String {
    match format {
        ReportFormat::Console => render_console(report),
        ReportFormat::Json => render_json(report),
        ReportFormat::Csv => render_csv(report),
        ReportFormat::Html => render_html(report),
    }
}

/// Render and print a report to stdout.
pub fn print_report(report: &AnalysisReport, format: ReportFormat) {
    println!("{}", render_report(report, format));
}

/// Write a report to a file and return the path written.
///
/// When `path` is `None` a timestamped filename is generated in the current
/// directory, e.g. `cost_report_20260825_143000.json`.
pub fn save_report(
    report: &AnalysisReport,
    format: ReportFormat,
    path: Option<PathBuf>,
) -> Result<PathBuf> {
    let path = path.unwrap_or_else(|| timestamped_report_path(Path::new("."), report, format));
    let rendered = render_report(report, format);
    fs::write(&path, rendered).map_err(|source| RightSizerError::ReportWrite {
        path: path.display().to_string(),
        source,
    })?;
    info!("report written to {}", path.display());
    Ok(path)
}

/// Timestamped report filename inside `dir`.
pub fn timestamped_report_path(
    dir: &Path,
    report: &AnalysisReport,
    format: ReportFormat,
) -> PathBuf {
    let stamp = report.generated_at.format("%Y%m%d_%H%M%S");
    dir.join(format!("cost_report_{stamp}.{}", format.extension()))
}

// ============================================================================
// Console Format
// ============================================================================

fn render_console(report: &AnalysisReport) -> String {
    let mut output = String::new();

    let rule = "═".repeat(78);
    output.push_str(&format!("\n{}\n", rule.bright_blue()));
    output.push_str(&format!(
        "{}\n",
        "💰 CLOUD COST OPTIMIZATION REPORT".bright_white().bold()
    ));
    output.push_str(&format!("{}\n\n", rule.bright_blue()));

    output.push_str(&render_summary_section(report));

    if !report.right_sizing.is_empty() {
        output.push_str(&format!(
            "\n{} ({})\n",
            "▶ Right-Sizing Recommendations".bright_white().bold(),
            report.right_sizing.len()
        ));
        output.push_str(&right_sizing_table(report));
        output.push_str(&truncation_note(report.right_sizing.len()));
    }

    if !report.reserved_capacity.is_empty() {
        output.push_str(&format!(
            "\n{} ({})\n",
            "▶ Reserved Capacity Recommendations".bright_white().bold(),
            report.reserved_capacity.len()
        ));
        output.push_str(&reserved_capacity_table(report));
        output.push_str(&truncation_note(report.reserved_capacity.len()));
    }

    if !report.has_recommendations() {
        output.push_str(&format!(
            "\n{}\n",
            "✅ No savings opportunities found. Your fleet looks well-sized.".green()
        ));
    }

    output.push_str(&format!("\n{}\n", rule.bright_blue()));
    output
}

fn render_summary_section(report: &AnalysisReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}\n",
        "Generated:".dimmed(),
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "{} {}\n",
        "Recommendations:".dimmed(),
        report
            .stats
            .total_recommendations
            .to_string()
            .bright_white()
    ));
    output.push_str(&format!(
        "{} {}   {} {}\n",
        "Monthly savings:".dimmed(),
        format!("${:.2}", report.savings.total.monthly_savings)
            .green()
            .bold(),
        "Annual savings:".dimmed(),
        format!("${:.2}", report.savings.total.annual_savings)
            .green()
            .bold(),
    ));

    if !report.stats.by_region.is_empty() {
        let regions: Vec<String> = report
            .stats
            .by_region
            .iter()
            .map(|(region, count)| format!("{region} ({count})"))
            .collect();
        output.push_str(&format!(
            "{} {}\n",
            "Regions:".dimmed(),
            regions.join(", ")
        ));
    }

    output
}

fn right_sizing_table(report: &AnalysisReport) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row![
        "Resource",
        "Region",
        "Current",
        "Recommended",
        "Strategy",
        "P95 CPU",
        "Monthly $",
        "Annual $"
    ]);
    for rec in report.right_sizing.iter().take(MAX_CONSOLE_ROWS) {
        table.add_row(row![
            rec.name,
            rec.region,
            rec.current_type,
            rec.recommended_type,
            rec.strategy.as_str(),
            format!("{:.1}%", rec.cpu_utilization.p95),
            format!("{:.2}", rec.monthly_savings),
            format!("{:.2}", rec.annual_savings),
        ]);
    }
    table.to_string()
}

fn reserved_capacity_table(report: &AnalysisReport) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row![
        "Region",
        "Type",
        "Count",
        "Term",
        "Payment",
        "Discount",
        "Upfront $",
        "Annual $"
    ]);
    for rec in report.reserved_capacity.iter().take(MAX_CONSOLE_ROWS) {
        table.add_row(row![
            rec.region,
            rec.resource_type,
            rec.resource_count,
            rec.term.as_str(),
            rec.payment_option.as_str(),
            format!("{:.0}%", rec.discount_rate * 100.0),
            format!("{:.2}", rec.upfront_payment),
            format!("{:.2}", rec.annual_savings),
        ]);
    }
    table.to_string()
}

fn truncation_note(total: usize) -> String {
    if total > MAX_CONSOLE_ROWS {
        format!(
            "{}\n",
            format!("… and {} more", total - MAX_CONSOLE_ROWS).dimmed()
        )
    } else {
        String::new()
    }
}

// ============================================================================
// JSON Format
// ============================================================================

fn render_json(report: &AnalysisReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

// ============================================================================
// CSV Format
// ============================================================================

fn render_csv(report: &AnalysisReport) -> String {
    let mut output = String::from(
        "instance_id,name,region,current_type,recommended_type,strategy,monthly_savings,annual_savings\n",
    );
    for rec in &report.right_sizing {
        output.push_str(&format!(
            "{},{},{},{},{},{},{:.2},{:.2}\n",
            csv_field(&rec.resource_id),
            csv_field(&rec.name),
            csv_field(&rec.region),
            csv_field(&rec.current_type),
            csv_field(&rec.recommended_type),
            rec.strategy.as_str(),
            rec.monthly_savings,
            rec.annual_savings,
        ));
    }
    output
}

/// Quote a field if it contains a delimiter or quote.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ============================================================================
// HTML Format
// ============================================================================

fn render_html(report: &AnalysisReport) -> String {
    let mut rows_rs = String::new();
    for rec in &report.right_sizing {
        rows_rs.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">${:.2}</td><td class=\"num\">${:.2}</td></tr>\n",
            html_escape(&rec.name),
            html_escape(&rec.region),
            html_escape(&rec.current_type),
            html_escape(&rec.recommended_type),
            rec.strategy.as_str(),
            html_escape(&rec.reason),
            rec.monthly_savings,
            rec.annual_savings,
        ));
    }

    let mut rows_rc = String::new();
    for rec in &report.reserved_capacity {
        rows_rc.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td>{}</td><td>{}</td><td class=\"num\">{:.0}%</td><td class=\"num\">${:.2}</td><td class=\"num\">${:.2}</td></tr>\n",
            html_escape(&rec.region),
            html_escape(&rec.resource_type),
            rec.resource_count,
            rec.term.as_str(),
            rec.payment_option.as_str(),
            rec.discount_rate * 100.0,
            rec.upfront_payment,
            rec.annual_savings,
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Cloud Cost Optimization Report</title>
<style>
  body {{ font-family: -apple-system, Segoe UI, sans-serif; margin: 2rem; color: #1a1a2e; }}
  h1 {{ border-bottom: 3px solid #16a34a; padding-bottom: 0.4rem; }}
  .cards {{ display: flex; gap: 1rem; margin: 1.5rem 0; }}
  .card {{ background: #f0fdf4; border: 1px solid #bbf7d0; border-radius: 8px; padding: 1rem 1.5rem; }}
  .card .value {{ font-size: 1.6rem; font-weight: 700; color: #16a34a; }}
  table {{ border-collapse: collapse; width: 100%; margin-bottom: 2rem; }}
  th, td {{ border: 1px solid #d1d5db; padding: 0.4rem 0.7rem; text-align: left; }}
  th {{ background: #f3f4f6; }}
  td.num {{ text-align: right; }}
</style>
</head>
<body>
<h1>💰 Cloud Cost Optimization Report</h1>
<p>Generated {generated}</p>
<div class="cards">
  <div class="card"><div>Recommendations</div><div class="value">{total}</div></div>
  <div class="card"><div>Monthly savings</div><div class="value">${monthly:.2}</div></div>
  <div class="card"><div>Annual savings</div><div class="value">${annual:.2}</div></div>
</div>
<h2>Right-Sizing ({rs_count})</h2>
<table>
<tr><th>Resource</th><th>Region</th><th>Current</th><th>Recommended</th><th>Strategy</th><th>Reason</th><th>Monthly $</th><th>Annual $</th></tr>
{rows_rs}</table>
<h2>Reserved Capacity ({rc_count})</h2>
<table>
<tr><th>Region</th><th>Type</th><th>Count</th><th>Term</th><th>Payment</th><th>Discount</th><th>Upfront $</th><th>Annual $</th></tr>
{rows_rc}</table>
</body>
</html>
"#,
        generated = report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        total = report.stats.total_recommendations,
        monthly = report.savings.total.monthly_savings,
        annual = report.savings.total.annual_savings,
        rs_count = report.right_sizing.len(),
        rc_count = report.reserved_capacity.len(),
        rows_rs = rows_rs,
        rows_rc = rows_rc,
    )
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ============================================================================
// Tests
// ============================================================================
