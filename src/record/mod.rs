//! Finalized question records.
//!
//! [`RecordFinalizer`] is the only constructor of [`Question`]: it cleans the
//! header, runs subject/topic classification and difficulty scoring, derives
//! structural flags, and renders the identifier, embedding text and raw text.

mod finalizer;
mod question;

pub use finalizer::{RecordFinalizer, question_id, strip_exam_tags};
pub use question::{Question, QuestionOption};
