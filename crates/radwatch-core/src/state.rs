//! Persistent alert state, mutated in place once per tick.

use crate::log::{EventLog, LogView};
use crate::saturating::{Dose, ExposureTicks};
use crate::{AlertConfig, AlertMode, RadwatchResult};

/// State owned by the alert core.
///
/// Created zeroed (safe, no protection, no alert, empty log) and then
/// updated by [`crate::tick`] for the life of the monitoring session.
/// Fields are read through accessors; only the transition function writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertState {
    pub(crate) accumulated_radiation: Dose,
    pub(crate) alert_mode: AlertMode,
    pub(crate) protection_mode: bool,
    pub(crate) exposure_time: ExposureTicks,
    pub(crate) alert: bool,
    pub(crate) log: EventLog,
}

impl Default for AlertState {
    /// Initial state for the reference configuration.
    fn default() -> Self {
        Self {
            accumulated_radiation: Dose::ZERO,
            alert_mode: AlertMode::Safe,
            protection_mode: false,
            exposure_time: ExposureTicks::ZERO,
            alert: false,
            log: EventLog::default(),
        }
    }
}

impl AlertState {
    /// Create the initial state for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: &AlertConfig) -> RadwatchResult<Self> {
        config.validate()?;
        Ok(Self {
            accumulated_radiation: Dose::ZERO,
            alert_mode: AlertMode::Safe,
            protection_mode: false,
            exposure_time: ExposureTicks::ZERO,
            alert: false,
            log: EventLog::new(config.log_capacity)?,
        })
    }

    /// Total dose seen so far, clamped to the accumulator width.
    #[must_use]
    pub fn accumulated_radiation(&self) -> u16 {
        self.accumulated_radiation.get()
    }

    /// Tier assigned on the most recent tick.
    #[must_use]
    pub fn alert_mode(&self) -> AlertMode {
        self.alert_mode
    }

    /// Whether protection mode is engaged.
    #[must_use]
    pub fn protection_mode(&self) -> bool {
        self.protection_mode
    }

    /// Consecutive elevated ticks, clamped to the counter width.
    #[must_use]
    pub fn exposure_time(&self) -> u8 {
        // a 4-bit register always fits
        u8::try_from(self.exposure_time.get()).unwrap_or(u8::MAX)
    }

    /// Whether the alert tripped on the most recent tick.
    #[must_use]
    pub fn alert(&self) -> bool {
        self.alert
    }

    /// Whether the dose accumulator has reached its clamp value.
    #[must_use]
    pub fn dose_saturated(&self) -> bool {
        self.accumulated_radiation.is_saturated()
    }

    /// Read-only view of the circular trip log.
    #[must_use]
    pub fn read_log(&self) -> LogView<'_> {
        LogView::new(&self.log)
    }
}
