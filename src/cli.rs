use crate::report::ReportFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rightsizer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate cloud cost-optimization recommendations from utilization data")]
#[command(
    long_about = "A CLI tool that analyzes instance utilization snapshots and generates cost-optimization recommendations: right-sizing proposals for underutilized resources and reserved-capacity purchase proposals for steady-state fleets, with rolled-up savings totals."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a utilization snapshot and generate recommendations
    Analyze {
        /// Path to the utilization snapshot (JSON)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Report format (overrides the config file)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Only analyze specific resource kinds (compute, database)
        #[arg(long, value_delimiter = ',')]
        resources: Option<Vec<String>>,

        /// CPU percentile to evaluate (overrides the config file)
        #[arg(long)]
        percentile: Option<f64>,

        /// Write the report to this file in addition to stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
    Csv,
    Html,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Console => ReportFormat::Console,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Csv => ReportFormat::Csv,
            OutputFormat::Html => ReportFormat::Html,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
