//! Exporter config loader (strict parsing).
//!
//! Layering, lowest to highest: built-in defaults, optional YAML file,
//! explicit command-line flags, environment variables.

pub mod cli;
pub mod env;
pub mod schema;

use std::fs;
use std::path::Path;

use qbridge_core::error::{QBridgeError, Result};

pub use cli::Cli;
pub use schema::{ExporterConfig, UpstreamSection, MAX_INTERVAL_SECS};

pub fn load_from_file(path: &Path) -> Result<ExporterConfig> {
    let s = fs::read_to_string(path).map_err(|e| {
        QBridgeError::Config(format!("read config failed ({}): {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg: ExporterConfig = serde_yaml::from_str(s)
        .map_err(|e| QBridgeError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Build the effective config from flags and the process environment.
pub fn resolve(cli: &Cli) -> Result<ExporterConfig> {
    let mut cfg = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading configuration file");
            load_from_file(path)?
        }
        None => ExporterConfig::default(),
    };
    cli.apply(&mut cfg);
    env::apply_process_env(&mut cfg);
    cfg.validate()?;
    Ok(cfg)
}
