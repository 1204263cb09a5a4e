//! Error types for trace and record sinks.

use radwatch_core::ConfigError;
use thiserror::Error;

/// Errors raised while writing traces or handling recordings.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Writing or reading the underlying file failed.
    #[error("trace I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A recording could not be encoded or decoded.
    #[error("recording serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A recording carries a configuration the core rejects.
    #[error("recording has an invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Replaying a recording produced a different outcome than was recorded.
    #[error("replay diverged at tick {tick}: recorded {field} {recorded}, replayed {replayed}")]
    ReplayDiverged {
        /// Tick number (1-based) of the first divergence.
        tick: u64,
        /// Outcome field that differs.
        field: &'static str,
        /// Value in the recording.
        recorded: String,
        /// Value produced by the replay.
        replayed: String,
    },

    /// Recording metadata disagrees with the replayed totals.
    #[error("recording metadata mismatch: recorded {field} {recorded}, replayed {replayed}")]
    MetadataMismatch {
        /// Metadata field that differs.
        field: &'static str,
        /// Value in the recording metadata.
        recorded: u64,
        /// Value counted by the replay.
        replayed: u64,
    },
}

/// Result type for trace operations.
pub type TraceResult<T> = Result<T, TraceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divergence_display() {
        let err = TraceError::ReplayDiverged {
            tick: 4,
            field: "alert",
            recorded: "false".to_string(),
            replayed: "true".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "replay diverged at tick 4: recorded alert false, replayed true"
        );
    }

    #[test]
    fn test_metadata_mismatch_display() {
        let err = TraceError::MetadataMismatch {
            field: "trip_count",
            recorded: 3,
            replayed: 2,
        };
        assert_eq!(
            err.to_string(),
            "recording metadata mismatch: recorded trip_count 3, replayed 2"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let err = TraceError::from(ConfigError::ZeroTripThreshold);
        assert!(matches!(err, TraceError::InvalidConfig(_)));
    }
}
