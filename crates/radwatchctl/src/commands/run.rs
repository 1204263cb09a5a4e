//! Drive a monitor with a stimulus pattern and report every tick

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use colored::*;
use parking_lot::Mutex;
use radwatch_core::{LogSnapshot, RadiationMonitor};
use radwatch_trace::{RecordedTick, SessionRecorder, VcdTracer};
use serde::Serialize;

use crate::commands::RunArgs;
use crate::error::CliError;
use crate::output;
use crate::stimulus::{REFERENCE_PATTERN, Stimulus};

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub trips: u64,
    pub stopped_on_alert: bool,
    pub accumulated_radiation: u16,
    pub log_index: usize,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub ticks: Vec<RecordedTick>,
    pub summary: RunSummary,
    pub log: LogSnapshot,
}

/// Execute the run command
pub async fn execute(args: &RunArgs, json: bool) -> Result<()> {
    let config = args.config.resolve()?;
    let stimulus = match &args.levels {
        Some(levels) => Stimulus::new(levels.clone(), args.max_ticks)?,
        None => Stimulus::new(REFERENCE_PATTERN.to_vec(), args.max_ticks)?,
    };

    let mut monitor = RadiationMonitor::new(config).map_err(CliError::from)?;

    let tracer = match &args.trace {
        Some(path) => {
            let file = BufWriter::new(File::create(path).map_err(CliError::from)?);
            let tracer = VcdTracer::new(file, Some(Utc::now())).map_err(CliError::from)?;
            let tracer = Arc::new(Mutex::new(tracer));
            monitor.observe(Box::new(Arc::clone(&tracer)));
            Some(tracer)
        }
        None => None,
    };

    let recorder = args.record.as_ref().map(|_| {
        let recorder = Arc::new(Mutex::new(SessionRecorder::new(config)));
        monitor.observe(Box::new(Arc::clone(&recorder)));
        recorder
    });

    tracing::info!(
        max_ticks = stimulus.max_ticks(),
        keep_going = args.keep_going,
        interval_ms = args.interval_ms,
        "Starting radiation monitor run"
    );
    if !json {
        println!("{}\n", "Starting radiation alert system test...".bold());
    }

    let mut interval = (args.interval_ms > 0)
        .then(|| tokio::time::interval(Duration::from_millis(args.interval_ms)));
    let mut rows = json.then(Vec::new);
    let mut stopped_on_alert = false;

    for level in stimulus.readings() {
        if let Some(interval) = interval.as_mut() {
            interval.tick().await;
        }

        let outcome = monitor.step(level);
        match rows.as_mut() {
            Some(rows) => rows.push(RecordedTick {
                tick: monitor.ticks(),
                outcome,
            }),
            None => output::print_tick_human(&outcome),
        }

        if outcome.alert && !args.keep_going {
            stopped_on_alert = true;
            if !json {
                output::print_stop_on_alert();
            }
            break;
        }
    }

    if let Some(tracer) = &tracer {
        tracer.lock().finish().map_err(CliError::from)?;
    }
    if let (Some(recorder), Some(path)) = (&recorder, &args.record) {
        let recording = recorder.lock().to_recording(args.description.clone());
        recording.save(path).map_err(CliError::from)?;
    }

    let log = monitor.read_log();
    let report = RunReport {
        ticks: rows.unwrap_or_default(),
        summary: RunSummary {
            ticks: monitor.ticks(),
            trips: monitor.trips(),
            stopped_on_alert,
            accumulated_radiation: monitor.state().accumulated_radiation(),
            log_index: log.log_index(),
        },
        log: log.snapshot(),
    };

    if json {
        output::print_json("run", &report);
    } else {
        let ordered: Vec<_> = log.ordered(monitor.trips()).copied().collect();
        println!();
        println!(
            "{} {} ticks, {} trips, accumulated radiation {}",
            "Run finished:".bold(),
            report.summary.ticks,
            report.summary.trips,
            report.summary.accumulated_radiation
        );
        output::print_log_human(&ordered, report.summary.log_index);
    }
    Ok(())
}
