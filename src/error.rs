//! Error types for the rightsizer CLI
//!
//! Missing metric data and malformed resource identifiers are expected
//! conditions handled inline by the recommenders; only configuration
//! integrity failures and I/O problems surface here.

use thiserror::Error;

/// Errors that can occur while analyzing utilization and generating
/// recommendations.
#[derive(Debug, Error)]
pub enum RightSizerError {
    /// Reading a config file or utilization snapshot failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file exists but could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Utilization snapshot could not be parsed
    #[error("Failed to parse utilization input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    /// Discount table is missing a (term, payment option) combination.
    ///
    /// Silently defaulting a discount rate would produce incorrect financial
    /// output, so this is always fatal.
    #[error("Discount table has no rate for term '{term}' with payment option '{payment_option}'")]
    MissingDiscountRate {
        /// Commitment term (e.g. "1yr")
        term: String,
        /// Payment option (e.g. "all_upfront")
        payment_option: String,
    },

    /// Writing a report file failed
    #[error("Failed to write report to {path}: {source}")]
    ReportWrite {
        /// Destination path
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Result type alias for rightsizer operations
pub type Result<T> = std::result::Result<T, RightSizerError>;
