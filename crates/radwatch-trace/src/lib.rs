//! Trace and record sinks for radwatch monitors.
//!
//! Both sinks are [`TickObserver`](radwatch_core::TickObserver)s and never
//! feed back into the alert core:
//!
//! - [`VcdTracer`] writes a Value Change Dump of every alert signal for
//!   waveform viewers such as GTKWave.
//! - [`SessionRecorder`] captures tick outcomes into a [`SessionRecording`]
//!   that can be saved as JSON, loaded again and replayed against a fresh
//!   monitor.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

mod error;
mod recorder;
mod vcd;

pub use error::{TraceError, TraceResult};
pub use recorder::{RecordedTick, RecordingMetadata, SessionRecorder, SessionRecording};
pub use vcd::{TIME_UNITS_PER_TICK, VcdTracer};
