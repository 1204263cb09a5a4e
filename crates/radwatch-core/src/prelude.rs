//! Prelude for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use radwatch_core::prelude::*;
//!
//! let monitor = RadiationMonitor::with_defaults();
//! assert_eq!(monitor.state().alert_mode(), AlertMode::Safe);
//! ```

pub use crate::{
    AlertConfig, AlertConfigBuilder, AlertMode, AlertState, ConfigError, InvariantViolation,
    LogEntry, LogSnapshot, LogView, RadiationMonitor, RadwatchResult, TickObserver, TickOutcome,
    check_invariants, tick,
};
