//! Stimulus source feeding readings to the monitor.

use crate::error::CliError;

/// Readings replayed when no `--levels` are given.
pub const REFERENCE_PATTERN: [u8; 10] = [45, 75, 150, 90, 200, 50, 110, 160, 40, 180];

/// Tick limit when no `--max-ticks` is given.
pub const DEFAULT_MAX_TICKS: usize = 30;

/// A reading pattern replayed cyclically up to a tick limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stimulus {
    levels: Vec<u8>,
    max_ticks: usize,
}

impl Stimulus {
    pub fn new(levels: Vec<u8>, max_ticks: usize) -> Result<Self, CliError> {
        if levels.is_empty() {
            return Err(CliError::InvalidConfiguration(
                "stimulus pattern must contain at least one reading".to_string(),
            ));
        }
        Ok(Self { levels, max_ticks })
    }

    pub fn max_ticks(&self) -> usize {
        self.max_ticks
    }

    /// Readings in the order they are applied.
    pub fn readings(&self) -> impl Iterator<Item = u8> + '_ {
        self.levels.iter().copied().cycle().take(self.max_ticks)
    }
}
