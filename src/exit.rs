//! Exit code logic for the pastpaper process.
//!
//! Maps batch counters to the process exit outcome.

use std::process::ExitCode;

use pastpaper_core::{BatchOutcome, BatchReport};

/// Process-level result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessExit {
    /// Every document was processed (exit 0)
    Success,
    /// Some documents failed (exit 1)
    Partial,
    /// Every document failed, or there was nothing to process (exit 2)
    Failure,
}

impl ProcessExit {
    /// Numeric process exit code.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Partial => 1,
            Self::Failure => 2,
        }
    }
}

impl From<ProcessExit> for ExitCode {
    fn from(outcome: ProcessExit) -> Self {
        ExitCode::from(outcome.code())
    }
}

impl From<BatchOutcome> for ProcessExit {
    fn from(outcome: BatchOutcome) -> Self {
        match outcome {
            BatchOutcome::Success => Self::Success,
            BatchOutcome::Partial => Self::Partial,
            BatchOutcome::Failure => Self::Failure,
        }
    }
}

/// Determines the process exit outcome from the final batch counters.
///
/// Documents with no questions count as processed, not failed.
pub fn determine_exit_outcome(report: &BatchReport) -> ProcessExit {
    report.outcome().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(completed: usize, empty: usize, failed: usize) -> BatchReport {
        BatchReport {
            completed,
            empty,
            failed,
            ..BatchReport::default()
        }
    }

    #[test]
    fn test_exit_outcome_success_when_no_failures() {
        assert_eq!(determine_exit_outcome(&report(3, 0, 0)), ProcessExit::Success);
    }

    #[test]
    fn test_exit_outcome_success_when_only_empty_documents() {
        assert_eq!(determine_exit_outcome(&report(0, 2, 0)), ProcessExit::Success);
    }

    #[test]
    fn test_exit_outcome_partial_when_mixed() {
        assert_eq!(determine_exit_outcome(&report(2, 0, 1)), ProcessExit::Partial);
        assert_eq!(determine_exit_outcome(&report(0, 1, 1)), ProcessExit::Partial);
    }

    #[test]
    fn test_exit_outcome_failure_when_all_failed() {
        assert_eq!(determine_exit_outcome(&report(0, 0, 2)), ProcessExit::Failure);
    }

    #[test]
    fn test_exit_outcome_follows_batch_outcome() {
        for report in [report(1, 0, 0), report(1, 1, 1), report(0, 0, 3)] {
            assert_eq!(
                determine_exit_outcome(&report),
                ProcessExit::from(report.outcome())
            );
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ProcessExit::Success.code(), 0);
        assert_eq!(ProcessExit::Partial.code(), 1);
        assert_eq!(ProcessExit::Failure.code(), 2);
    }
}
