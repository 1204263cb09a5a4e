//! Replay a saved recording against a fresh monitor

use std::fs::File;
use std::io::BufWriter;

use anyhow::Result;
use colored::*;
use radwatch_trace::{SessionRecording, VcdTracer};
use serde_json::json;

use crate::commands::ReplayArgs;
use crate::error::CliError;
use crate::output;

/// Execute the replay command
pub fn execute(args: &ReplayArgs, json: bool) -> Result<()> {
    let recording = SessionRecording::load(&args.recording).map_err(CliError::from)?;
    let monitor = recording.replay().map_err(CliError::from)?;

    if let Some(path) = &args.trace {
        let file = BufWriter::new(File::create(path).map_err(CliError::from)?);
        let mut tracer = VcdTracer::new(file, Some(recording.metadata.started_at))
            .map_err(CliError::from)?;
        for recorded in &recording.ticks {
            tracer
                .record(recorded.tick, &recorded.outcome)
                .map_err(CliError::from)?;
        }
        tracer.finish().map_err(CliError::from)?;
    }

    tracing::info!(
        path = %args.recording.display(),
        ticks = monitor.ticks(),
        "Recording replayed"
    );

    if json {
        output::print_json(
            "replay",
            &json!({
                "matches": true,
                "ticks": monitor.ticks(),
                "trips": monitor.trips(),
                "log": monitor.read_log().snapshot(),
                "metadata": recording.metadata,
            }),
        );
    } else {
        println!(
            "{} {} ticks, {} trips, recorded {}",
            "Replay matches recording:".green().bold(),
            monitor.ticks(),
            monitor.trips(),
            recording.metadata.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        if let Some(description) = &recording.metadata.description {
            println!("  Description: {}", description);
        }
    }
    Ok(())
}
