//! Radiation exposure alert core.
//!
//! Consumes one 8-bit radiation reading per tick and maintains a small
//! persistent state: a saturating 16-bit dose accumulator, a three-tier
//! alert mode, a protection flag, a consecutive-exposure counter, a
//! non-latching alert flag and a circular log of trip events.
//!
//! # Tick
//!
//! Every tick runs the same four steps in order (see [`tick`]):
//!
//! 1. add the reading to the accumulated dose, clamping at `65_535`;
//! 2. classify the reading and derive protection mode from the tier;
//! 3. count consecutive elevated ticks, resetting on a safe reading;
//! 4. trip the alert on excessive exposure or dose, logging the event.
//!
//! # Alert Modes
//!
//! ```text
//!   level <= limit     limit < level <= limit+50     level > limit+50
//!  ┌─────────────┐         ┌─────────────┐          ┌─────────────┐
//!  │    Safe     │         │  Moderate   │          │  Critical   │
//!  │ exposure=0  │         │ exposure+1  │          │ exposure+1  │
//!  │             │         │             │          │ protection  │
//!  └─────────────┘         └─────────────┘          └─────────────┘
//! ```
//!
//! The tier depends on the current reading only; any tier is reachable from
//! any other in a single tick.
//!
//! # Example
//!
//! ```rust
//! use radwatch_core::{AlertConfig, AlertMode, RadiationMonitor};
//!
//! let mut monitor = RadiationMonitor::new(AlertConfig::default())?;
//! let outcome = monitor.step(200);
//! assert_eq!(outcome.alert_mode, AlertMode::Critical);
//! assert!(outcome.protection_mode);
//! # Ok::<(), radwatch_core::ConfigError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod config;
mod error;
mod invariants;
mod log;
mod mode;
mod monitor;
mod saturating;
mod state;
mod tick;

pub mod prelude;

pub use config::{AlertConfig, AlertConfigBuilder};
pub use error::{ConfigError, InvariantViolation, RadwatchResult};
pub use invariants::check_invariants;
pub use log::{
    DEFAULT_LOG_CAPACITY, EventLog, LogEntry, LogSnapshot, LogView, MAX_LOG_CAPACITY,
};
pub use mode::AlertMode;
pub use monitor::{RadiationMonitor, TickObserver};
pub use saturating::{Dose, ExposureTicks, Saturating};
pub use state::AlertState;
pub use tick::{TickOutcome, tick};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
