//! Value Change Dump writer.
//!
//! The dump declares one scope, `radiation_alert`, holding the six signals of
//! the alert core. Time advances [`TIME_UNITS_PER_TICK`] units per tick; tick
//! `n` is stamped at `#(n * 10)` and only signals whose value changed are
//! written.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use radwatch_core::{TickObserver, TickOutcome};

use crate::error::TraceResult;

/// Simulation time units between consecutive ticks.
pub const TIME_UNITS_PER_TICK: u64 = 10;

/// Declared signals: name, width in bits, identifier code.
const SIGNALS: [(&str, u8, char); 6] = [
    ("radiation_level", 8, '!'),
    ("alert", 1, '"'),
    ("alert_mode", 2, '#'),
    ("exposure_time", 4, '$'),
    ("accumulated_radiation", 16, '%'),
    ("protection_mode", 1, '&'),
];

type SignalValues = [u16; 6];

fn values_of(outcome: &TickOutcome) -> SignalValues {
    [
        u16::from(outcome.radiation_level),
        u16::from(outcome.alert),
        u16::from(outcome.alert_mode.code()),
        u16::from(outcome.exposure_time),
        outcome.accumulated_radiation,
        u16::from(outcome.protection_mode),
    ]
}

/// Streams alert signals to a VCD file.
///
/// As an observer the tracer cannot return errors from `on_tick`; the first
/// I/O error is kept, later ticks are dropped, and [`VcdTracer::finish`]
/// reports it.
///
/// # Example
///
/// ```rust
/// use radwatch_core::RadiationMonitor;
/// use radwatch_trace::VcdTracer;
///
/// let mut tracer = VcdTracer::new(Vec::new(), None)?;
/// let mut monitor = RadiationMonitor::with_defaults();
/// let outcome = monitor.step(150);
/// tracer.record(1, &outcome)?;
///
/// let dump = String::from_utf8(tracer.into_inner()).unwrap_or_default();
/// assert!(dump.contains("#10\nb10010110 !\n"));
/// # Ok::<(), radwatch_trace::TraceError>(())
/// ```
#[derive(Debug)]
pub struct VcdTracer<W: Write> {
    out: W,
    last: SignalValues,
    error: Option<io::Error>,
}

impl<W: Write> VcdTracer<W> {
    /// Write the VCD header and the initial all-zero values at `#0`.
    ///
    /// `date` goes into the `$date` section when given; leave it out for
    /// reproducible output.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be written.
    pub fn new(mut out: W, date: Option<DateTime<Utc>>) -> TraceResult<Self> {
        write_header(&mut out, date)?;
        Ok(Self {
            out,
            last: [0; 6],
            error: None,
        })
    }

    /// Write the changes introduced by tick number `tick`.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn record(&mut self, tick: u64, outcome: &TickOutcome) -> io::Result<()> {
        let values = values_of(outcome);
        let time = tick.saturating_mul(TIME_UNITS_PER_TICK);
        writeln!(self.out, "#{time}")?;

        for ((name, width, id), (value, previous)) in SIGNALS
            .iter()
            .zip(values.iter().zip(self.last.iter()))
        {
            if value != previous {
                tracing::trace!(signal = name, value, time, "VCD change");
                write_value(&mut self.out, *width, *id, *value)?;
            }
        }

        self.last = values;
        Ok(())
    }

    /// Flush the writer and report the first error seen while observing.
    ///
    /// # Errors
    ///
    /// Returns the stored observer error, or an error from flushing.
    pub fn finish(&mut self) -> TraceResult<()> {
        if let Some(err) = self.error.take() {
            return Err(err.into());
        }
        self.out.flush()?;
        Ok(())
    }

    /// Consume the tracer and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TickObserver for VcdTracer<W> {
    fn on_tick(&mut self, tick: u64, outcome: &TickOutcome) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.record(tick, outcome) {
            tracing::warn!(tick, error = %err, "VCD trace write failed, tracing stopped");
            self.error = Some(err);
        }
    }
}

fn write_header<W: Write>(out: &mut W, date: Option<DateTime<Utc>>) -> io::Result<()> {
    if let Some(date) = date {
        writeln!(out, "$date\n    {}\n$end", date.format("%a %b %e %H:%M:%S %Y"))?;
    }
    writeln!(
        out,
        "$version\n    radwatch-trace {}\n$end",
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out, "$timescale 1ns $end")?;
    writeln!(out, "$scope module radiation_alert $end")?;
    for (name, width, id) in SIGNALS {
        writeln!(out, "$var reg {width} {id} {name} $end")?;
    }
    writeln!(out, "$upscope $end")?;
    writeln!(out, "$enddefinitions $end")?;

    writeln!(out, "#0")?;
    writeln!(out, "$dumpvars")?;
    for (_, width, id) in SIGNALS {
        write_value(out, width, id, 0)?;
    }
    writeln!(out, "$end")
}

fn write_value<W: Write>(out: &mut W, width: u8, id: char, value: u16) -> io::Result<()> {
    if width == 1 {
        writeln!(out, "{value}{id}")
    } else {
        writeln!(out, "b{value:0width$b} {id}", width = usize::from(width))
    }
}
