//! Configuration loading.
//!
//! Settings come from a YAML file (`rightsizer.yaml` by default, overridable
//! with `--config`). A missing file falls back to defaults; a file that
//! exists but does not parse is a hard error, because silently ignoring a
//! user's thresholds could change financial output.

pub mod types;

pub use types::Config;

use crate::error::{Result, RightSizerError};
use std::fs;
use std::path::Path;

/// Default config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "rightsizer.yaml";

/// Load configuration from an explicit path, or from `rightsizer.yaml` in
/// the working directory, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        // Explicit path: the file must exist and parse
        Some(path) => read_config(path),
        None => {
            let default = Path::new(CONFIG_FILE_NAME);
            if default.exists() {
                read_config(default)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| {
        RightSizerError::InvalidConfig(format!("{}: {e}", path.display()))
    })
}
