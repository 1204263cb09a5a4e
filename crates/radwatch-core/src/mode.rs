//! Alert tiers and the per-reading classifier.

use core::fmt;

use crate::AlertConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Alert tier derived from a single radiation reading.
///
/// The classifier is memoryless: the tier depends only on the current
/// reading, never on the previous tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum AlertMode {
    /// Reading at or below the safe limit.
    #[default]
    Safe = 0,
    /// Reading above the safe limit, at or below the critical limit.
    Moderate = 1,
    /// Reading above the critical limit.
    Critical = 2,
}

impl AlertMode {
    /// All tiers in ascending order of severity.
    pub const ALL: [AlertMode; 3] = [AlertMode::Safe, AlertMode::Moderate, AlertMode::Critical];

    /// Classify a reading against `config`.
    ///
    /// Evaluated in priority order: above `critical_limit` is critical,
    /// otherwise above `limit` is moderate, otherwise safe.
    #[must_use]
    pub fn classify(radiation_level: u8, config: &AlertConfig) -> Self {
        let level = u16::from(radiation_level);
        if level > config.critical_limit() {
            AlertMode::Critical
        } else if level > u16::from(config.limit) {
            AlertMode::Moderate
        } else {
            AlertMode::Safe
        }
    }

    /// Two-bit wire code of this tier.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// True for every tier that counts toward exposure time.
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        !matches!(self, AlertMode::Safe)
    }

    /// True only for the tier that engages protection mode.
    #[must_use]
    pub const fn requires_protection(self) -> bool {
        matches!(self, AlertMode::Critical)
    }

    /// Lowercase label used by reporters.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            AlertMode::Safe => "safe",
            AlertMode::Moderate => "moderate",
            AlertMode::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
