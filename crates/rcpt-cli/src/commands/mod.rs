//! Subcommands of the rcpt binary.

pub mod batch;
pub mod config;
pub mod output;
pub mod scan;

use std::path::Path;

use tracing::debug;

use rcpt_core::RcptConfig;

/// Load configuration from an explicit path, the default location, or built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RcptConfig> {
    if let Some(path) = config_path {
        debug!("Loading configuration from {}", path);
        return Ok(RcptConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        Ok(RcptConfig::from_file(&default_path)?)
    } else {
        Ok(RcptConfig::default())
    }
}
