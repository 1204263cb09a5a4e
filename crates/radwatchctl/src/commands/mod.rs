//! Command implementations for radwatchctl

pub mod config;
pub mod replay;
pub mod run;

use std::path::PathBuf;

use clap::Args;

use crate::settings::ConfigArgs;
use crate::stimulus::DEFAULT_MAX_TICKS;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Comma-separated readings replayed cyclically (default: reference pattern)
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub levels: Option<Vec<u8>>,

    /// Stop after this many ticks
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    pub max_ticks: usize,

    /// Keep running after the alert trips
    #[arg(long)]
    pub keep_going: bool,

    /// Milliseconds between ticks (0 runs as fast as possible)
    #[arg(long, default_value_t = 0)]
    pub interval_ms: u64,

    /// Write a VCD waveform of every signal to this file
    #[arg(long, value_name = "PATH")]
    pub trace: Option<PathBuf>,

    /// Save a JSON recording of the run to this file
    #[arg(long, value_name = "PATH")]
    pub record: Option<PathBuf>,

    /// Description stored in the recording
    #[arg(long, requires = "record")]
    pub description: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Recording written by `run --record`
    pub recording: PathBuf,

    /// Regenerate a VCD waveform from the recording
    #[arg(long, value_name = "PATH")]
    pub trace: Option<PathBuf>,
}
