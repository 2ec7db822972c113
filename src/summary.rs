//! Aggregate counters over a parsed question list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::Question;

/// Per-document statistics written next to the questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Questions counted
    pub total_questions: usize,
    /// Questions per subject label
    pub by_subject: BTreeMap<String, usize>,
    /// Questions per exam type
    pub by_exam_type: BTreeMap<String, usize>,
    /// Questions with a known correct answer
    pub with_answers: usize,
    /// Questions with solution text
    pub with_solutions: usize,
    /// Questions whose text contains formula symbols
    pub with_formulas: usize,
    /// Mean option count, rounded to 2 decimals; 0 when there are no questions
    pub avg_options: f64,
    /// Questions per difficulty band
    pub by_difficulty: BTreeMap<String, usize>,
    /// Questions without a topic are not counted
    pub by_topic: BTreeMap<String, usize>,
    /// Blocks dropped during assembly
    pub rejected_blocks: usize,
}

impl Summary {
    /// One-line human summary for logs and the CLI.
    #[must_use]
    pub fn format_message(&self) -> String {
        format!(
            "Parsed {} questions ({} with answers, {} with solutions, {} rejected blocks)",
            self.total_questions, self.with_answers, self.with_solutions, self.rejected_blocks
        )
    }
}

/// Builds the summary for one document's questions.
#[must_use]
pub fn summarize(questions: &[Question], rejected_blocks: usize) -> Summary {
    let mut summary = Summary {
        total_questions: questions.len(),
        rejected_blocks,
        ..Summary::default()
    };

    let mut total_options = 0usize;
    for question in questions {
        *summary
            .by_subject
            .entry(question.subject().to_string())
            .or_default() += 1;
        *summary
            .by_exam_type
            .entry(question.exam_type().to_string())
            .or_default() += 1;
        *summary
            .by_difficulty
            .entry(question.difficulty().to_string())
            .or_default() += 1;
        if let Some(topic) = question.topic() {
            *summary.by_topic.entry(topic.to_string()).or_default() += 1;
        }

        if question.correct_answer().is_some() {
            summary.with_answers += 1;
        }
        if question.solution().is_some() {
            summary.with_solutions += 1;
        }
        if question.has_formulas() {
            summary.with_formulas += 1;
        }
        total_options += question.options().len();
    }

    if !questions.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        let avg = total_options as f64 / questions.len() as f64;
        summary.avg_options = (avg * 100.0).round() / 100.0;
    }

    summary
}
