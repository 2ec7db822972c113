//! Error types for parser and pipeline configuration.
//!
//! The parsing core itself never fails: malformed blocks are counted and
//! dropped. Only building the read-only configuration can be rejected.

use thiserror::Error;

/// Errors raised while building read-only parser configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Option letter range is malformed
    #[error(
        "invalid option letter range '{range}': {reason}\n  Suggestion: Use two ASCII letters in ascending order, e.g. A-D or A-E"
    )]
    InvalidOptionLetters {
        /// The range as supplied
        range: String,
        /// Why the range is invalid
        reason: String,
    },

    /// Difficulty band table is empty or unordered
    #[error(
        "invalid difficulty band table: {reason}\n  Suggestion: List bands with non-empty labels and strictly increasing finite upper bounds"
    )]
    InvalidBandTable {
        /// Why the table is invalid
        reason: String,
    },

    /// Worker pool size outside the accepted range
    #[error(
        "invalid concurrency {value} (allowed {min}-{max})\n  Suggestion: Pick a value between {min} and {max}"
    )]
    InvalidConcurrency {
        /// Requested worker count
        value: usize,
        /// Lowest accepted value
        min: usize,
        /// Highest accepted value
        max: usize,
    },
}

impl ConfigError {
    /// Creates an `InvalidOptionLetters` error.
    #[must_use]
    pub fn option_letters(range: &str, reason: &str) -> Self {
        Self::InvalidOptionLetters {
            range: range.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an `InvalidBandTable` error.
    #[must_use]
    pub fn band_table(reason: impl Into<String>) -> Self {
        Self::InvalidBandTable {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_option_letters_error_display_includes_suggestion() {
        let err = ConfigError::option_letters("D-A", "first letter must precede last");
        let msg = err.to_string();
        assert!(msg.contains("'D-A'"));
        assert!(msg.contains("first letter must precede last"));
        assert!(msg.contains("Suggestion:"));
    }

    #[test]
    fn test_concurrency_error_display_shows_bounds() {
        let err = ConfigError::InvalidConcurrency {
            value: 0,
            min: 1,
            max: 64,
        };
        assert!(err.to_string().contains("allowed 1-64"));
    }

    #[test]
    fn test_band_table_error_is_comparable() {
        assert_eq!(
            ConfigError::band_table("empty"),
            ConfigError::InvalidBandTable {
                reason: "empty".to_string()
            }
        );
    }
}
