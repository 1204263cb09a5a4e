//! The per-tick transition function.
//!
//! # Step order
//!
//! ```text
//!   reading ──► 1. accumulate dose (clamp, never wrap)
//!           ──► 2. classify tier, derive protection mode
//!           ──► 3. exposure timer (+1 if elevated, else reset)
//!           ──► 4. trip test on the *new* exposure and dose
//!                  └─ on trip: write log slot, advance cursor
//! ```
//!
//! Steps 3 and 4 read the values produced by the earlier steps of the same
//! tick, never the previous tick's.

use crate::log::LogEntry;
use crate::saturating::ExposureTicks;
use crate::{AlertConfig, AlertMode, AlertState};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Post-tick values exposed to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickOutcome {
    /// Reading that was applied.
    pub radiation_level: u8,
    /// Whether the alert tripped on this tick.
    pub alert: bool,
    /// Tier assigned on this tick.
    pub alert_mode: AlertMode,
    /// Whether protection mode is engaged after this tick.
    pub protection_mode: bool,
    /// Consecutive elevated ticks after this tick.
    pub exposure_time: u8,
    /// Accumulated dose after this tick.
    pub accumulated_radiation: u16,
    /// Log slot written on trip.
    pub logged_at: Option<usize>,
}

/// Apply one reading to `state`.
///
/// Total and allocation-free: defined for every `radiation_level` and never
/// fails. The log keeps the capacity `state` was created with, regardless of
/// `config.log_capacity`.
///
/// Calls must be serialized; the function performs no synchronization.
///
/// # Example
///
/// ```rust
/// use radwatch_core::{AlertConfig, AlertMode, AlertState, tick};
///
/// let config = AlertConfig::default();
/// let mut state = AlertState::new(&config)?;
///
/// let outcome = tick(&mut state, &config, 200);
/// assert_eq!(outcome.alert_mode, AlertMode::Critical);
/// assert!(outcome.protection_mode);
/// assert!(!outcome.alert);
/// # Ok::<(), radwatch_core::ConfigError>(())
/// ```
pub fn tick(state: &mut AlertState, config: &AlertConfig, radiation_level: u8) -> TickOutcome {
    state.accumulated_radiation = state
        .accumulated_radiation
        .accumulate(u16::from(radiation_level));

    let mode = AlertMode::classify(radiation_level, config);
    state.alert_mode = mode;
    state.protection_mode = mode.requires_protection();

    state.exposure_time = if mode.is_elevated() {
        state.exposure_time.increment()
    } else {
        ExposureTicks::ZERO
    };

    let tripped = state.exposure_time.get() >= u16::from(config.max_exposure_time)
        || state.accumulated_radiation.get() >= config.accumulated_trip_threshold;
    state.alert = tripped;

    let logged_at = tripped.then(|| {
        state.log.record(LogEntry {
            radiation_level,
            alert_mode: mode,
        })
    });

    TickOutcome {
        radiation_level,
        alert: tripped,
        alert_mode: mode,
        protection_mode: state.protection_mode,
        exposure_time: state.exposure_time(),
        accumulated_radiation: state.accumulated_radiation(),
        logged_at,
    }
}
