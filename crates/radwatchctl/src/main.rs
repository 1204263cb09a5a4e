//! radwatchctl - Radiation alert monitor CLI
//!
//! Drives the radwatch alert core with a stimulus pattern, reports every
//! tick, and optionally writes a VCD waveform and a JSON recording of the run.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;
mod settings;
mod stimulus;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{ReplayArgs, RunArgs};
use crate::error::CliError;
use crate::settings::ConfigArgs;

#[derive(Parser)]
#[command(name = "radwatchctl")]
#[command(about = "Radiation alert monitor - drive, trace and replay the alert core")]
#[command(version)]
#[command(long_about = "
radwatchctl feeds radiation readings to the alert core one tick at a time and
reports the alert, alert mode and protection mode after every tick.

By default the reference pattern is replayed for up to 30 ticks and the run
stops on the first alert. Use --json for machine-readable output.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monitor against a stimulus pattern
    Run(RunArgs),

    /// Replay a recording and check it reproduces
    Replay(ReplayArgs),

    /// Print the effective configuration
    Config(ConfigArgs),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "radwatchctl={0},radwatch_core={0},radwatch_trace={0}",
                    log_level
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = execute_command(&cli).await;

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

async fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Run(args) => commands::run::execute(args, cli.json).await,
        Commands::Replay(args) => commands::replay::execute(args, cli.json),
        Commands::Config(args) => commands::config::execute(args, cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}
