//! Invariant checker for alert states.

use crate::error::InvariantViolation;
use crate::saturating::ExposureTicks;
use crate::{AlertConfig, AlertMode, AlertState};

/// Check all structural invariants. Returns `Err` naming the first one
/// violated.
///
/// Holds for the initial state and after every [`crate::tick`] with the
/// same `config` the state was created from.
///
/// # Errors
///
/// Returns [`InvariantViolation`] if any invariant is violated.
pub fn check_invariants(state: &AlertState, config: &AlertConfig) -> Result<(), InvariantViolation> {
    if u16::from(state.exposure_time) > ExposureTicks::MAX {
        return Err(InvariantViolation("ExposureWithinWidth"));
    }

    // ProtectionMatchesCritical
    if state.protection_mode != (state.alert_mode == AlertMode::Critical) {
        return Err(InvariantViolation("ProtectionMatchesCritical"));
    }

    // SafeResetsExposure
    if state.alert_mode == AlertMode::Safe && state.exposure_time != ExposureTicks::ZERO {
        return Err(InvariantViolation("SafeResetsExposure"));
    }

    // ElevatedCountsExposure
    if state.alert_mode.is_elevated() && state.exposure_time == ExposureTicks::ZERO {
        return Err(InvariantViolation("ElevatedCountsExposure"));
    }

    // LogCapacityMatchesConfig
    if state.log.capacity() != config.log_capacity {
        return Err(InvariantViolation("LogCapacityMatchesConfig"));
    }

    // LogCursorInRange
    if state.log.cursor() >= state.log.capacity() {
        return Err(InvariantViolation("LogCursorInRange"));
    }

    // AlertMatchesTripCondition
    let trip = state.exposure_time.get() >= u16::from(config.max_exposure_time)
        || state.accumulated_radiation.get() >= config.accumulated_trip_threshold;
    if state.alert != trip {
        return Err(InvariantViolation("AlertMatchesTripCondition"));
    }

    Ok(())
}
