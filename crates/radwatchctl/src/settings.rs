//! Effective alert configuration: defaults, then `--config` file, then flags.

use std::path::{Path, PathBuf};

use clap::Args;
use radwatch_core::AlertConfig;

use crate::error::CliError;

/// Configuration source and per-field overrides shared by the commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// JSON configuration file; missing fields keep their defaults
    #[arg(long, value_name = "PATH", env = "RADWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Safe radiation limit (critical is limit + 50)
    #[arg(long)]
    pub limit: Option<u8>,

    /// Consecutive elevated ticks that trip the alert (1-15)
    #[arg(long)]
    pub max_exposure: Option<u8>,

    /// Accumulated dose that trips the alert
    #[arg(long)]
    pub trip_threshold: Option<u16>,

    /// Number of slots in the circular trip log (1-64)
    #[arg(long)]
    pub log_capacity: Option<usize>,
}

impl ConfigArgs {
    /// Merge the sources and validate the result.
    pub fn resolve(&self) -> Result<AlertConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => load_config_file(path)?,
            None => AlertConfig::default(),
        };

        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if let Some(ticks) = self.max_exposure {
            config.max_exposure_time = ticks;
        }
        if let Some(dose) = self.trip_threshold {
            config.accumulated_trip_threshold = dose;
        }
        if let Some(capacity) = self.log_capacity {
            config.log_capacity = capacity;
        }

        config.validate()?;
        tracing::debug!(?config, "Effective configuration resolved");
        Ok(config)
    }
}

fn load_config_file(path: &Path) -> Result<AlertConfig, CliError> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::InvalidConfiguration(format!("{}: {}", path.display(), e)))
}
