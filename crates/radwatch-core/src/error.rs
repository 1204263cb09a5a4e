//! Error types for alert core construction and state auditing.
//!
//! The per-tick transition itself is total and never fails; every error in
//! this module is raised either when a configuration is built or when a state
//! is audited against its invariants.

use thiserror::Error;

/// Configuration rejected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The circular log must hold at least one entry and fit its fixed storage.
    #[error("log capacity must be between 1 and {max}, got {got}")]
    LogCapacityOutOfRange {
        /// Requested capacity.
        got: usize,
        /// Largest supported capacity.
        max: usize,
    },

    /// The exposure limit must be reachable by the exposure counter.
    #[error("max exposure time must be between 1 and {max}, got {got}")]
    ExposureLimitOutOfRange {
        /// Requested limit.
        got: u8,
        /// Largest value the exposure counter can hold.
        max: u16,
    },

    /// A zero dose threshold would trip on every tick.
    #[error("accumulated trip threshold must be greater than 0")]
    ZeroTripThreshold,
}

impl ConfigError {
    /// Name of the configuration field that was rejected.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::LogCapacityOutOfRange { .. } => "log_capacity",
            ConfigError::ExposureLimitOutOfRange { .. } => "max_exposure_time",
            ConfigError::ZeroTripThreshold => "accumulated_trip_threshold",
        }
    }
}

/// A state failed one of the structural invariants of the alert core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invariant violated: {0}")]
pub struct InvariantViolation(pub &'static str);

/// Result type for alert core construction.
pub type RadwatchResult<T> = Result<T, ConfigError>;
