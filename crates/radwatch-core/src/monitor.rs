//! Monitor that drives the alert core and fans outcomes out to observers.
//!
//! [`RadiationMonitor`] is the single execution context the alert core
//! expects: it owns the state and configuration, and `step` takes
//! `&mut self`, so ticks are serialized by construction. Observers are pure
//! sinks and cannot feed back into the core.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::log::LogView;
use crate::tick::{TickOutcome, tick};
use crate::{AlertConfig, AlertState, RadwatchResult};

/// Receives every tick outcome after it has been applied.
pub trait TickObserver {
    /// Called once per tick with the 1-based tick number.
    fn on_tick(&mut self, tick: u64, outcome: &TickOutcome);
}

/// Shared observers let the caller keep a handle to a sink (for example to
/// flush it) after handing a clone to the monitor.
impl<T> TickObserver for Arc<Mutex<T>>
where
    T: TickObserver,
{
    fn on_tick(&mut self, tick: u64, outcome: &TickOutcome) {
        self.lock().on_tick(tick, outcome);
    }
}

/// Alert core with its configuration, counters and observers.
///
/// # Example
///
/// ```rust
/// use radwatch_core::RadiationMonitor;
///
/// let mut monitor = RadiationMonitor::with_defaults();
/// for level in [45, 75, 150, 90] {
///     monitor.step(level);
/// }
/// assert!(monitor.state().alert());
/// assert_eq!(monitor.trips(), 1);
/// ```
pub struct RadiationMonitor {
    config: AlertConfig,
    state: AlertState,
    ticks: u64,
    trips: u64,
    observers: Vec<Box<dyn TickObserver + Send>>,
}

impl std::fmt::Debug for RadiationMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadiationMonitor")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("ticks", &self.ticks)
            .field("trips", &self.trips)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for RadiationMonitor {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RadiationMonitor {
    /// Create a monitor for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: AlertConfig) -> RadwatchResult<Self> {
        let state = AlertState::new(&config)?;
        tracing::debug!(
            limit = config.limit,
            critical_limit = config.critical_limit(),
            max_exposure_time = config.max_exposure_time,
            accumulated_trip_threshold = config.accumulated_trip_threshold,
            log_capacity = config.log_capacity,
            "Radiation monitor initialized"
        );
        Ok(Self {
            config,
            state,
            ticks: 0,
            trips: 0,
            observers: Vec::new(),
        })
    }

    /// Create a monitor with the reference configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            config: AlertConfig::default(),
            state: AlertState::default(),
            ticks: 0,
            trips: 0,
            observers: Vec::new(),
        }
    }

    /// Register an observer notified after every tick.
    pub fn observe(&mut self, observer: Box<dyn TickObserver + Send>) {
        self.observers.push(observer);
    }

    /// Apply one reading and notify observers.
    pub fn step(&mut self, radiation_level: u8) -> TickOutcome {
        let previous_mode = self.state.alert_mode();
        let was_saturated = self.state.dose_saturated();
        let outcome = tick(&mut self.state, &self.config, radiation_level);
        self.ticks = self.ticks.saturating_add(1);

        tracing::debug!(
            tick = self.ticks,
            radiation_level,
            accumulated_radiation = outcome.accumulated_radiation,
            exposure_time = outcome.exposure_time,
            "Tick applied"
        );

        if outcome.alert_mode != previous_mode {
            tracing::info!(
                tick = self.ticks,
                from = %previous_mode,
                to = %outcome.alert_mode,
                protection_mode = outcome.protection_mode,
                "Alert mode changed"
            );
        }

        if !was_saturated && self.state.dose_saturated() {
            tracing::warn!(
                tick = self.ticks,
                accumulated_radiation = outcome.accumulated_radiation,
                "Accumulated dose saturated"
            );
        }

        if outcome.alert {
            self.trips = self.trips.saturating_add(1);
            tracing::warn!(
                tick = self.ticks,
                radiation_level,
                alert_mode = %outcome.alert_mode,
                exposure_time = outcome.exposure_time,
                accumulated_radiation = outcome.accumulated_radiation,
                log_slot = ?outcome.logged_at,
                "Radiation alert tripped"
            );
        }

        for observer in &mut self.observers {
            observer.on_tick(self.ticks, &outcome);
        }

        outcome
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &AlertState {
        &self.state
    }

    /// Configuration the monitor was created with.
    #[must_use]
    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Read-only view of the trip log.
    #[must_use]
    pub fn read_log(&self) -> LogView<'_> {
        self.state.read_log()
    }

    /// Ticks applied so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks on which the alert tripped; also the number of log writes.
    #[must_use]
    pub fn trips(&self) -> u64 {
        self.trips
    }
}
