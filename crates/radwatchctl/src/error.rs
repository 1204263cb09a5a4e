//! Error types for radwatchctl

use radwatch_core::ConfigError;
use radwatch_trace::TraceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Replay mismatch: {0}")]
    ReplayMismatch(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<TraceError> for CliError {
    fn from(err: TraceError) -> Self {
        match err {
            TraceError::Io(e) => CliError::IoError(e),
            TraceError::Json(e) => CliError::JsonError(e),
            TraceError::InvalidConfig(e) => CliError::Config(e),
            mismatch @ (TraceError::ReplayDiverged { .. }
            | TraceError::MetadataMismatch { .. }) => {
                CliError::ReplayMismatch(mismatch.to_string())
            }
        }
    }
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidConfiguration(_) | CliError::Config(_) | CliError::JsonError(_) => 4,
            CliError::IoError(_) => 5,
            CliError::ReplayMismatch(_) => 6,
        }
    }

    /// Configuration field behind a rejected configuration, if known.
    pub fn config_field(&self) -> Option<&'static str> {
        match self {
            CliError::Config(e) => Some(e.field()),
            _ => None,
        }
    }
}
