//! Thread-safe batch counters.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Live counters for a batch run.
///
/// Updated from concurrent document tasks; read by progress reporting while
/// the batch is still running.
#[derive(Debug, Default)]
pub struct BatchStats {
    completed: AtomicUsize,
    empty: AtomicUsize,
    failed: AtomicUsize,
    questions: AtomicUsize,
    rejected: AtomicUsize,
}

impl BatchStats {
    /// Creates a tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents parsed with at least one question.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Documents parsed with no questions.
    #[must_use]
    pub fn empty(&self) -> usize {
        self.empty.load(Ordering::SeqCst)
    }

    /// Documents that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// Documents finished so far, whatever their outcome.
    #[must_use]
    pub fn total(&self) -> usize {
        self.completed() + self.empty() + self.failed()
    }

    /// Questions emitted so far.
    #[must_use]
    pub fn questions(&self) -> usize {
        self.questions.load(Ordering::SeqCst)
    }

    pub(crate) fn record_completed(&self, questions: usize, rejected: usize) {
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.questions.fetch_add(questions, Ordering::SeqCst);
        self.rejected.fetch_add(rejected, Ordering::SeqCst);
    }

    pub(crate) fn record_empty(&self, rejected: usize) {
        self.empty.fetch_add(1, Ordering::SeqCst);
        self.rejected.fetch_add(rejected, Ordering::SeqCst);
    }

    pub(crate) fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
    }

    /// Point-in-time copy of the counters.
    #[must_use]
    pub fn snapshot(&self) -> BatchReport {
        BatchReport {
            completed: self.completed(),
            empty: self.empty(),
            failed: self.failed(),
            questions: self.questions(),
            rejected_blocks: self.rejected.load(Ordering::SeqCst),
        }
    }
}

/// Overall result of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every document was processed
    Success,
    /// Some documents failed, others were processed
    Partial,
    /// Every document failed
    Failure,
}

/// Final counters of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Documents parsed with at least one question
    pub completed: usize,
    /// Documents parsed with no questions
    pub empty: usize,
    /// Documents that could not be read, written or claimed an output path
    /// already taken
    pub failed: usize,
    /// Questions emitted across all documents
    pub questions: usize,
    /// Blocks dropped across all documents
    pub rejected_blocks: usize,
}

impl BatchReport {
    /// Documents processed without error.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.completed + self.empty
    }

    /// Classifies the run for exit-code purposes.
    #[must_use]
    pub fn outcome(&self) -> BatchOutcome {
        if self.failed == 0 {
            BatchOutcome::Success
        } else if self.processed() > 0 {
            BatchOutcome::Partial
        } else {
            BatchOutcome::Failure
        }
    }
}
