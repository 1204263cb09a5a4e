//! Property-based tests for the alert core.

use crate::*;
use proptest::prelude::*;

fn valid_config() -> impl Strategy<Value = AlertConfig> {
    (any::<u8>(), 1u8..=15, 1u16..=u16::MAX, 1usize..=MAX_LOG_CAPACITY).prop_map(
        |(limit, max_exposure_time, accumulated_trip_threshold, log_capacity)| AlertConfig {
            limit,
            max_exposure_time,
            accumulated_trip_threshold,
            log_capacity,
        },
    )
}

fn fresh_state(config: &AlertConfig) -> Result<AlertState, TestCaseError> {
    AlertState::new(config).map_err(|e| TestCaseError::fail(e.to_string()))
}

proptest! {
    #[test]
    fn test_dose_is_clamped_running_sum(
        levels in proptest::collection::vec(any::<u8>(), 0..400),
    ) {
        let config = AlertConfig::default();
        let mut state = fresh_state(&config)?;
        let mut expected: u32 = 0;

        for level in levels {
            let before = state.accumulated_radiation();
            let outcome = tick(&mut state, &config, level);
            expected = (expected + u32::from(level)).min(65_535);

            prop_assert!(outcome.accumulated_radiation >= before);
            prop_assert_eq!(u32::from(outcome.accumulated_radiation), expected);
        }
    }

    #[test]
    fn test_saturated_dose_stays_saturated(level in any::<u8>()) {
        let config = AlertConfig::default();
        let mut state = fresh_state(&config)?;
        state.accumulated_radiation = Dose::new(u16::MAX).unwrap_or_default();

        let outcome = tick(&mut state, &config, level);
        prop_assert_eq!(outcome.accumulated_radiation, 65_535);
        prop_assert!(outcome.alert);
    }

    #[test]
    fn test_mode_depends_only_on_reading(
        config in valid_config(),
        history in proptest::collection::vec(any::<u8>(), 0..20),
        level in any::<u8>(),
    ) {
        let mut state = fresh_state(&config)?;
        for earlier in history {
            tick(&mut state, &config, earlier);
        }
        let outcome = tick(&mut state, &config, level);

        let expected = if u16::from(level) > config.critical_limit() {
            AlertMode::Critical
        } else if level > config.limit {
            AlertMode::Moderate
        } else {
            AlertMode::Safe
        };
        prop_assert_eq!(outcome.alert_mode, expected);
        prop_assert_eq!(outcome.protection_mode, expected == AlertMode::Critical);
    }

    #[test]
    fn test_exposure_counts_consecutive_elevated_ticks(
        config in valid_config(),
        levels in proptest::collection::vec(any::<u8>(), 1..60),
    ) {
        let mut state = fresh_state(&config)?;
        let mut run: u8 = 0;

        for level in levels {
            let outcome = tick(&mut state, &config, level);
            run = if outcome.alert_mode.is_elevated() {
                run.saturating_add(1).min(15)
            } else {
                0
            };
            prop_assert_eq!(outcome.exposure_time, run);
        }
    }

    #[test]
    fn test_alert_matches_trip_condition(
        config in valid_config(),
        levels in proptest::collection::vec(any::<u8>(), 1..60),
    ) {
        let mut state = fresh_state(&config)?;
        for level in levels {
            let outcome = tick(&mut state, &config, level);
            let trip = outcome.exposure_time >= config.max_exposure_time
                || outcome.accumulated_radiation >= config.accumulated_trip_threshold;
            prop_assert_eq!(outcome.alert, trip);
            prop_assert_eq!(outcome.logged_at.is_some(), trip);
        }
    }

    #[test]
    fn test_invariants_hold_for_any_sequence(
        config in valid_config(),
        levels in proptest::collection::vec(any::<u8>(), 0..120),
    ) {
        let mut state = fresh_state(&config)?;
        prop_assert!(check_invariants(&state, &config).is_ok());
        for level in levels {
            tick(&mut state, &config, level);
            prop_assert_eq!(check_invariants(&state, &config), Ok(()));
        }
    }

    #[test]
    fn test_log_index_tracks_trip_count(
        capacity in 1usize..=MAX_LOG_CAPACITY,
        extra in 0usize..MAX_LOG_CAPACITY,
    ) {
        let config = AlertConfig { log_capacity: capacity, ..AlertConfig::default() };
        let mut monitor = RadiationMonitor::new(config)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        // two readings of 255 reach the default dose threshold, so every tick
        // from the second one on trips
        let trips = capacity + extra % capacity;
        let mut ticks = 0usize;
        while monitor.trips() < trips as u64 {
            monitor.step(255);
            ticks += 1;
            prop_assert!(ticks <= trips + 1);
        }

        prop_assert_eq!(monitor.read_log().log_index(), extra % capacity);
        prop_assert!(
            monitor
                .read_log()
                .entries()
                .iter()
                .all(|e| e.radiation_level == 255 && e.alert_mode == AlertMode::Critical)
        );
    }

    #[test]
    fn test_log_only_written_on_trip(
        levels in proptest::collection::vec(0u8..=100, 1..200),
    ) {
        // Readings at or below the limit never raise exposure, so only the
        // dose threshold can trip.
        let config = AlertConfig::builder()
            .accumulated_trip_threshold(u16::MAX)
            .build()
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let mut monitor = RadiationMonitor::new(config)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        for level in levels {
            prop_assert!(!monitor.step(level).alert);
        }
        prop_assert_eq!(monitor.read_log().log_index(), 0);
        prop_assert!(monitor.read_log().entries().iter().all(|e| *e == LogEntry::default()));
    }
}
