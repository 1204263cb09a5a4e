//! Circular trip log.
//!
//! A fixed ring of [`LogEntry`] slots with a single write cursor. The alert
//! core is the only writer and writes only on trip; once the ring fills, the
//! oldest slot is overwritten. Storage is `heapless`, so recording never
//! allocates.
//!
//! Slots that were never written read as `LogEntry::default()` (a zero
//! reading classified safe). The log does not mark them: an observer that
//! needs chronological order counts trips itself and passes that count to
//! [`EventLog::ordered`].

use crate::AlertMode;
use crate::error::{ConfigError, RadwatchResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest supported log capacity.
pub const MAX_LOG_CAPACITY: usize = 64;

/// Reference log capacity.
pub const DEFAULT_LOG_CAPACITY: usize = 10;

/// Reading and tier recorded when the alert trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogEntry {
    /// Reading on the tripping tick.
    pub radiation_level: u8,
    /// Tier assigned on the tripping tick.
    pub alert_mode: AlertMode,
}

/// Fixed-capacity ring of trip entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    slots: heapless::Vec<LogEntry, MAX_LOG_CAPACITY>,
    cursor: usize,
}

impl Default for EventLog {
    /// A log with [`DEFAULT_LOG_CAPACITY`] zeroed slots.
    fn default() -> Self {
        Self {
            slots: core::iter::repeat_n(LogEntry::default(), DEFAULT_LOG_CAPACITY).collect(),
            cursor: 0,
        }
    }
}

impl EventLog {
    /// Create a log with `capacity` zeroed slots.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LogCapacityOutOfRange`] if `capacity` is zero
    /// or exceeds [`MAX_LOG_CAPACITY`].
    pub fn new(capacity: usize) -> RadwatchResult<Self> {
        let out_of_range = ConfigError::LogCapacityOutOfRange {
            got: capacity,
            max: MAX_LOG_CAPACITY,
        };
        if capacity == 0 {
            return Err(out_of_range);
        }

        let mut slots = heapless::Vec::new();
        slots
            .resize_default(capacity)
            .map_err(|()| out_of_range)?;

        Ok(Self { slots, cursor: 0 })
    }

    /// Write `entry` at the cursor, advance the cursor, and return the slot
    /// that was written.
    pub fn record(&mut self, entry: LogEntry) -> usize {
        let slot = self.cursor;
        if let Some(target) = self.slots.get_mut(slot) {
            *target = entry;
        }

        let next = slot.saturating_add(1);
        self.cursor = if next >= self.slots.len() { 0 } else { next };
        slot
    }

    /// Raw slots in storage order.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.slots
    }

    /// Slot the next trip will be written to.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Written entries, oldest first, given the number of trips recorded
    /// since construction.
    ///
    /// Before the first wraparound only the first `writes` slots are
    /// yielded. Afterwards all slots are yielded starting at the cursor.
    pub fn ordered(&self, writes: u64) -> impl Iterator<Item = &LogEntry> + '_ {
        let (before_cursor, from_cursor) = self
            .slots
            .split_at_checked(self.cursor)
            .unwrap_or((self.slots.as_slice(), &[][..]));

        let wrapped = u64::try_from(self.slots.len()).is_ok_and(|len| writes >= len);
        let older: &[LogEntry] = if wrapped { from_cursor } else { &[] };
        older.iter().chain(before_cursor.iter())
    }
}

/// Read-only view of a monitor's log, handed to observers.
#[derive(Debug, Clone, Copy)]
pub struct LogView<'a> {
    log: &'a EventLog,
}

impl<'a> LogView<'a> {
    pub(crate) fn new(log: &'a EventLog) -> Self {
        Self { log }
    }

    /// Raw slots in storage order.
    #[must_use]
    pub fn entries(&self) -> &'a [LogEntry] {
        self.log.entries()
    }

    /// Current write cursor.
    #[must_use]
    pub fn log_index(&self) -> usize {
        self.log.cursor()
    }

    /// Written entries, oldest first. See [`EventLog::ordered`].
    pub fn ordered(&self, writes: u64) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.log.ordered(writes)
    }

    /// Owned copy suitable for serialization.
    #[must_use]
    pub fn snapshot(&self) -> LogSnapshot {
        LogSnapshot {
            entries: self.entries().to_vec(),
            log_index: self.log_index(),
        }
    }
}

/// Owned copy of the log and its cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogSnapshot {
    /// Raw slots in storage order.
    pub entries: Vec<LogEntry>,
    /// Write cursor at the time of the snapshot.
    pub log_index: usize,
}
