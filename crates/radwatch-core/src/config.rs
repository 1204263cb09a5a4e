//! Alert thresholds and log sizing, fixed for the lifetime of a monitor.

use crate::error::{ConfigError, RadwatchResult};
use crate::log::{DEFAULT_LOG_CAPACITY, MAX_LOG_CAPACITY};
use crate::saturating::ExposureTicks;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Alert core configuration.
///
/// Only `limit` is a classification threshold; the critical threshold is
/// always derived as `limit + CRITICAL_MARGIN`.
///
/// # Example
///
/// ```rust
/// use radwatch_core::AlertConfig;
///
/// let config = AlertConfig::builder()
///     .limit(120)
///     .log_capacity(16)
///     .build()?;
/// assert_eq!(config.critical_limit(), 170);
/// # Ok::<(), radwatch_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct AlertConfig {
    /// Safe radiation limit. Readings above it are at least moderate.
    pub limit: u8,
    /// Consecutive elevated ticks that trip the alert.
    pub max_exposure_time: u8,
    /// Accumulated dose that trips the alert.
    pub accumulated_trip_threshold: u16,
    /// Number of slots in the circular trip log.
    pub log_capacity: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            limit: 100,
            max_exposure_time: 3,
            accumulated_trip_threshold: 300,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl AlertConfig {
    /// Distance between the safe limit and the critical limit.
    pub const CRITICAL_MARGIN: u16 = 50;

    /// Critical limit, `limit + CRITICAL_MARGIN`, computed without overflow.
    #[must_use]
    pub fn critical_limit(&self) -> u16 {
        u16::from(self.limit).saturating_add(Self::CRITICAL_MARGIN)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the log capacity is zero or exceeds
    /// [`MAX_LOG_CAPACITY`], if the exposure limit is zero or beyond what the
    /// exposure counter can count, or if the dose threshold is zero.
    pub fn validate(&self) -> RadwatchResult<()> {
        if self.log_capacity == 0 || self.log_capacity > MAX_LOG_CAPACITY {
            return Err(ConfigError::LogCapacityOutOfRange {
                got: self.log_capacity,
                max: MAX_LOG_CAPACITY,
            });
        }
        if self.max_exposure_time == 0 || u16::from(self.max_exposure_time) > ExposureTicks::MAX {
            return Err(ConfigError::ExposureLimitOutOfRange {
                got: self.max_exposure_time,
                max: ExposureTicks::MAX,
            });
        }
        if self.accumulated_trip_threshold == 0 {
            return Err(ConfigError::ZeroTripThreshold);
        }
        Ok(())
    }

    /// Create a configuration builder starting from the defaults.
    #[must_use]
    pub fn builder() -> AlertConfigBuilder {
        AlertConfigBuilder::default()
    }
}

/// Builder for [`AlertConfig`].
#[derive(Debug, Default)]
pub struct AlertConfigBuilder {
    config: AlertConfig,
}

impl AlertConfigBuilder {
    /// Set the safe radiation limit.
    #[must_use]
    pub fn limit(mut self, limit: u8) -> Self {
        self.config.limit = limit;
        self
    }

    /// Set the consecutive elevated ticks that trip the alert.
    #[must_use]
    pub fn max_exposure_time(mut self, ticks: u8) -> Self {
        self.config.max_exposure_time = ticks;
        self
    }

    /// Set the accumulated dose that trips the alert.
    #[must_use]
    pub fn accumulated_trip_threshold(mut self, dose: u16) -> Self {
        self.config.accumulated_trip_threshold = dose;
        self
    }

    /// Set the circular log capacity.
    #[must_use]
    pub fn log_capacity(mut self, capacity: usize) -> Self {
        self.config.log_capacity = capacity;
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> RadwatchResult<AlertConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
