//! The finalized question record.

use serde::Serialize;

use crate::parser::ExamType;

/// One option of a finalized question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    /// Uppercase label
    pub label: char,
    /// Option text
    pub text: String,
    /// Whether this option is the known answer; `None` if no answer is known
    pub is_correct: Option<bool>,
}

/// An immutable, fully classified question.
///
/// Only [`RecordFinalizer`](super::RecordFinalizer) can build one; fields
/// are exposed through accessors. Serialization keeps field order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub(super) id: String,
    pub(super) question_number: u32,
    pub(super) question_text: String,
    pub(super) options: Vec<QuestionOption>,
    pub(super) correct_answer: Option<char>,
    pub(super) solution: Option<String>,
    pub(super) subject: String,
    pub(super) topic: Option<String>,
    pub(super) tags: Vec<String>,
    pub(super) difficulty: String,
    pub(super) difficulty_score: f64,
    pub(super) has_formulas: bool,
    pub(super) has_calculations: bool,
    pub(super) has_multiline: bool,
    pub(super) source_file: String,
    pub(super) exam_type: ExamType,
    pub(super) year: Option<u16>,
    pub(super) embedding_text: String,
    pub(super) raw_text: String,
}

impl Question {
    /// `<EXAM>_<YEAR|UNKNOWN>_Q<nnn>` identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Question number as printed in the paper.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.question_number
    }

    /// Question text with exam tags removed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.question_text
    }

    /// Options in document order, labels unique.
    #[must_use]
    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    /// Label of the correct option, if an inline marker named one.
    #[must_use]
    pub fn correct_answer(&self) -> Option<char> {
        self.correct_answer
    }

    /// Solution or explanation text following the options.
    #[must_use]
    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref()
    }

    /// Subject label, `general` when no keyword matched.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Topic within the subject, if any topic keyword matched.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Matched topic keywords, at most five.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Difficulty band label.
    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    /// Difficulty score in `[1.0, 10.0]`.
    #[must_use]
    pub fn difficulty_score(&self) -> f64 {
        self.difficulty_score
    }

    /// Whether the text contains formula symbols.
    #[must_use]
    pub fn has_formulas(&self) -> bool {
        self.has_formulas
    }

    /// Whether the text contains an arithmetic expression.
    #[must_use]
    pub fn has_calculations(&self) -> bool {
        self.has_calculations
    }

    /// Whether any retained text field spans several lines.
    #[must_use]
    pub fn has_multiline(&self) -> bool {
        self.has_multiline
    }

    /// File name the question was parsed from.
    #[must_use]
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// Exam inferred from the file name.
    #[must_use]
    pub fn exam_type(&self) -> ExamType {
        self.exam_type
    }

    /// Year inferred from the file name.
    #[must_use]
    pub fn year(&self) -> Option<u16> {
        self.year
    }

    /// Retrieval-oriented text for vector indexing.
    #[must_use]
    pub fn embedding_text(&self) -> &str {
        &self.embedding_text
    }

    /// Question and options rendered back to plain text.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Text of the correct option, if the answer is known.
    #[must_use]
    pub fn correct_option_text(&self) -> Option<&str> {
        let answer = self.correct_answer?;
        self.options
            .iter()
            .find(|o| o.label == answer)
            .map(|o| o.text.as_str())
    }
}
