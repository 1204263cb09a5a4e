//! JSON session recording and replay.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use radwatch_core::{AlertConfig, RadiationMonitor, TickObserver, TickOutcome};
use serde::{Deserialize, Serialize};

use crate::error::{TraceError, TraceResult};

/// One recorded tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedTick {
    /// 1-based tick number.
    pub tick: u64,
    /// Outcome produced by the tick.
    pub outcome: TickOutcome,
}

/// Recording metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    /// When the recorder was created.
    pub started_at: DateTime<Utc>,
    /// Configuration the monitor ran with.
    pub config: AlertConfig,
    /// Number of recorded ticks.
    pub tick_count: usize,
    /// Number of recorded ticks on which the alert tripped.
    pub trip_count: usize,
    /// Free-form note.
    pub description: Option<String>,
}

/// A finished recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecording {
    /// Recording metadata.
    pub metadata: RecordingMetadata,
    /// Recorded ticks in order.
    pub ticks: Vec<RecordedTick>,
}

impl SessionRecording {
    /// Readings in tick order, suitable for feeding a fresh monitor.
    #[must_use]
    pub fn levels(&self) -> Vec<u8> {
        self.ticks.iter().map(|t| t.outcome.radiation_level).collect()
    }

    /// Write the recording as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> TraceResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        tracing::info!(
            path = %path.display(),
            ticks = self.metadata.tick_count,
            "Recording saved"
        );
        Ok(())
    }

    /// Load a recording written by [`SessionRecording::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a recording.
    pub fn load<P: AsRef<Path>>(path: P) -> TraceResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Re-run the recorded readings through a fresh monitor built from the
    /// recorded configuration and check every outcome matches.
    ///
    /// Returns the monitor in its final state.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InvalidConfig`] if the recorded configuration
    /// is rejected, [`TraceError::ReplayDiverged`] at the first tick whose
    /// outcome differs from the recording, or [`TraceError::MetadataMismatch`]
    /// when the recorded tick or trip count disagrees with the replay.
    pub fn replay(&self) -> TraceResult<RadiationMonitor> {
        let mut monitor = RadiationMonitor::new(self.metadata.config)?;

        for recorded in &self.ticks {
            let replayed = monitor.step(recorded.outcome.radiation_level);
            if let Some((field, want, got)) = first_difference(&recorded.outcome, &replayed) {
                tracing::warn!(tick = recorded.tick, field, "Replay diverged from recording");
                return Err(TraceError::ReplayDiverged {
                    tick: recorded.tick,
                    field,
                    recorded: want,
                    replayed: got,
                });
            }
        }

        let totals = [
            ("tick_count", self.metadata.tick_count, monitor.ticks()),
            ("trip_count", self.metadata.trip_count, monitor.trips()),
        ];
        for (field, recorded, replayed) in totals {
            let recorded = u64::try_from(recorded).unwrap_or(u64::MAX);
            if recorded != replayed {
                tracing::warn!(field, recorded, replayed, "Recording metadata mismatch");
                return Err(TraceError::MetadataMismatch {
                    field,
                    recorded,
                    replayed,
                });
            }
        }

        Ok(monitor)
    }
}

fn first_difference(
    recorded: &TickOutcome,
    replayed: &TickOutcome,
) -> Option<(&'static str, String, String)> {
    let fields = [
        ("alert", recorded.alert.to_string(), replayed.alert.to_string()),
        (
            "alert_mode",
            recorded.alert_mode.to_string(),
            replayed.alert_mode.to_string(),
        ),
        (
            "protection_mode",
            recorded.protection_mode.to_string(),
            replayed.protection_mode.to_string(),
        ),
        (
            "exposure_time",
            recorded.exposure_time.to_string(),
            replayed.exposure_time.to_string(),
        ),
        (
            "accumulated_radiation",
            recorded.accumulated_radiation.to_string(),
            replayed.accumulated_radiation.to_string(),
        ),
        (
            "logged_at",
            format!("{:?}", recorded.logged_at),
            format!("{:?}", replayed.logged_at),
        ),
    ];
    fields.into_iter().find(|(_, want, got)| want != got)
}

/// Observer that captures every tick outcome.
#[derive(Debug)]
pub struct SessionRecorder {
    config: AlertConfig,
    started_at: DateTime<Utc>,
    ticks: Vec<RecordedTick>,
}

impl SessionRecorder {
    /// Start recording a monitor created with `config`.
    #[must_use]
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config,
            started_at: Utc::now(),
            ticks: Vec::new(),
        }
    }

    /// Number of recorded ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// True if no tick has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Build a recording of everything captured so far.
    #[must_use]
    pub fn to_recording(&self, description: Option<String>) -> SessionRecording {
        let trip_count = self.ticks.iter().filter(|t| t.outcome.alert).count();
        SessionRecording {
            metadata: RecordingMetadata {
                started_at: self.started_at,
                config: self.config,
                tick_count: self.ticks.len(),
                trip_count,
                description,
            },
            ticks: self.ticks.clone(),
        }
    }
}

impl TickObserver for SessionRecorder {
    fn on_tick(&mut self, tick: u64, outcome: &TickOutcome) {
        self.ticks.push(RecordedTick {
            tick,
            outcome: *outcome,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

    fn record(levels: &[u8]) -> TestResult<SessionRecording> {
        let config = AlertConfig::default();
        let mut monitor = RadiationMonitor::new(config)?;
        let mut recorder = SessionRecorder::new(config);
        for level in levels {
            let outcome = monitor.step(*level);
            recorder.on_tick(monitor.ticks(), &outcome);
        }
        Ok(recorder.to_recording(Some("test".to_string())))
    }

    #[test]
    fn test_recorder_counts_ticks_and_trips() -> TestResult {
        let recording = record(&[45, 75, 150, 90, 200])?;
        assert_eq!(recording.metadata.tick_count, 5);
        assert_eq!(recording.metadata.trip_count, 2);
        assert_eq!(recording.levels(), vec![45, 75, 150, 90, 200]);
        assert_eq!(recording.ticks.first().map(|t| t.tick), Some(1));
        Ok(())
    }

    #[test]
    fn test_replay_matches_recording() -> TestResult {
        let recording = record(&[45, 75, 150, 90, 200, 50, 110])?;
        let monitor = recording.replay()?;
        assert_eq!(monitor.ticks(), 7);
        assert_eq!(monitor.trips(), 4);
        Ok(())
    }

    #[test]
    fn test_replay_detects_tampering() -> TestResult {
        let mut recording = record(&[45, 75, 150])?;
        if let Some(third) = recording.ticks.get_mut(2) {
            third.outcome.alert_mode = radwatch_core::AlertMode::Critical;
        }

        let err = recording.replay().err().ok_or("replay should diverge")?;
        assert!(matches!(
            err,
            TraceError::ReplayDiverged {
                tick: 3,
                field: "alert_mode",
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn test_replay_checks_metadata_totals() -> TestResult {
        let mut recording = record(&[45, 75, 150, 90, 200])?;
        recording.metadata.trip_count = 3;
        let err = recording.replay().err().ok_or("trip count should mismatch")?;
        assert!(matches!(
            err,
            TraceError::MetadataMismatch {
                field: "trip_count",
                recorded: 3,
                replayed: 2,
            }
        ));

        let mut recording = record(&[45, 75])?;
        recording.metadata.tick_count = 9;
        assert!(matches!(
            recording.replay(),
            Err(TraceError::MetadataMismatch {
                field: "tick_count",
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn test_replay_rejects_bad_config() -> TestResult {
        let mut recording = record(&[45])?;
        recording.metadata.config.log_capacity = 0;
        assert!(matches!(
            recording.replay(),
            Err(TraceError::InvalidConfig(_))
        ));
        Ok(())
    }
}
