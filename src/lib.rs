//! # Rightsizer CLI
//!
//! A Rust-based command-line application that analyzes cloud instance
//! utilization and generates cost-optimization recommendations.
//!
//! ## Features
//!
//! - **Right-Sizing**: Proposes cheaper instance shapes (downsize or budget
//!   family switch) for resources whose CPU percentile sits below a
//!   configurable threshold
//! - **Reserved Capacity**: Groups steady-state fleets by region and type
//!   and proposes commitment purchases with term- and payment-dependent
//!   discounts
//! - **Savings Roll-Up**: Aggregates per-recommendation deltas into summary
//!   totals and categorical breakdowns without double counting
//! - **Multiple Formats**: Console, JSON, CSV, and HTML reports
//!
//! ## Example
//!
//! ```rust,no_run
//! use rightsizer_cli::analyzer::{PricingCatalog, RightSizingConfig, RightSizingRecommender};
//! use rightsizer_cli::collector::{FileCollector, UtilizationCollector};
//!
//! # fn main() -> rightsizer_cli::Result<()> {
//! let summaries = FileCollector::new("snapshot.json").collect()?;
//! let recommendations =
//!     RightSizingRecommender::new(RightSizingConfig::default(), PricingCatalog::default())
//!         .generate(&summaries);
//! for rec in &recommendations {
//!     println!("{}: {} -> {}", rec.name, rec.current_type, rec.recommended_type);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod handlers;
pub mod report;

// Re-export commonly used types and functions
pub use error::{Result, RightSizerError};
pub use report::{AnalysisReport, ReportFormat};
use cli::Commands;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dispatch a parsed CLI command.
pub fn run_command(command: Commands, config: &config::Config) -> Result<()> {
    match command {
        Commands::Analyze {
            input,
            format,
            resources,
            percentile,
            output,
        } => handlers::handle_analyze(
            config,
            input,
            format.map(Into::into),
            resources,
            percentile,
            output,
        ),
    }
}
