//! Integration tests for the radwatch-core crate.

use std::sync::Arc;

use parking_lot::Mutex;
use radwatch_core::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Collects every outcome and checks the invariants after each tick.
#[derive(Debug, Default)]
struct Recorder {
    outcomes: Vec<(u64, TickOutcome)>,
}

impl TickObserver for Recorder {
    fn on_tick(&mut self, tick: u64, outcome: &TickOutcome) {
        self.outcomes.push((tick, *outcome));
    }
}

#[test]
fn test_reference_scenario_end_to_end() -> TestResult {
    let config = AlertConfig::default();
    let recorder = Arc::new(Mutex::new(Recorder::default()));
    let mut monitor = RadiationMonitor::new(config)?;
    monitor.observe(Box::new(Arc::clone(&recorder)));

    for level in [45, 75, 150, 90, 200] {
        monitor.step(level);
        check_invariants(monitor.state(), monitor.config())?;
    }

    let outcomes = &recorder.lock().outcomes;
    let modes: Vec<AlertMode> = outcomes.iter().map(|(_, o)| o.alert_mode).collect();
    assert_eq!(
        modes,
        vec![
            AlertMode::Safe,
            AlertMode::Safe,
            AlertMode::Moderate,
            AlertMode::Safe,
            AlertMode::Critical,
        ]
    );

    let first_trip = outcomes.iter().find(|(_, o)| o.alert).map(|(tick, _)| *tick);
    assert_eq!(first_trip, Some(4));

    let doses: Vec<u16> = outcomes.iter().map(|(_, o)| o.accumulated_radiation).collect();
    assert_eq!(doses, vec![45, 120, 270, 360, 560]);
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_final_outcome_json_snapshot() -> TestResult {
    let mut monitor = RadiationMonitor::with_defaults();
    let mut last = None;
    for level in [45, 75, 150, 90, 200] {
        last = Some(monitor.step(level));
    }
    let last = last.ok_or("no ticks applied")?;

    insta::assert_snapshot!(serde_json::to_string_pretty(&last)?, @r#"
    {
      "radiation_level": 200,
      "alert": true,
      "alert_mode": "critical",
      "protection_mode": true,
      "exposure_time": 1,
      "accumulated_radiation": 560,
      "logged_at": 1
    }
    "#);
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_log_snapshot_json() -> TestResult {
    let config = AlertConfig::builder().log_capacity(3).build()?;
    let mut monitor = RadiationMonitor::new(config)?;
    for level in [45, 75, 150, 90] {
        monitor.step(level);
    }

    let json = serde_json::to_string(&monitor.read_log().snapshot())?;
    assert_eq!(
        json,
        concat!(
            r#"{"entries":[{"radiation_level":90,"alert_mode":"safe"},"#,
            r#"{"radiation_level":0,"alert_mode":"safe"},"#,
            r#"{"radiation_level":0,"alert_mode":"safe"}],"log_index":1}"#
        )
    );
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_config_from_json_drives_monitor() -> TestResult {
    let config: AlertConfig = serde_json::from_str(
        r#"{ "limit": 50, "max_exposure_time": 2, "accumulated_trip_threshold": 1000 }"#,
    )?;
    config.validate()?;
    assert_eq!(config.critical_limit(), 100);

    let mut monitor = RadiationMonitor::new(config)?;
    assert_eq!(monitor.step(75).alert_mode, AlertMode::Moderate);
    let second = monitor.step(101);
    assert_eq!(second.alert_mode, AlertMode::Critical);
    assert!(second.alert);
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_invalid_json_config_is_rejected_at_construction() -> TestResult {
    let config: AlertConfig = serde_json::from_str(r#"{ "log_capacity": 0 }"#)?;
    let err = RadiationMonitor::new(config).err().ok_or("expected rejection")?;
    assert_eq!(err.field(), "log_capacity");
    Ok(())
}
