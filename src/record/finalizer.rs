//! Turns raw blocks into finalized [`Question`] records.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::question::{Question, QuestionOption};
use crate::classify::{BandTable, SubjectClassifier, has_calculations, has_formulas, score_difficulty};
use crate::parser::{RawQuestionBlock, SourceInfo};

#[allow(clippy::expect_used)]
static EXAM_TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\(?\s*(?:NET|NUST|MDCAT)[-\s]*\d*\s*\(?\d{1,2}[-\s]?\w*[-\s]?\d{4}\)?\s*\)?",
    )
    .expect("exam tag regex is valid")
});

#[allow(clippy::expect_used)]
static MULTI_SPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("multi-space regex is valid"));

/// Removes exam/date tags such as `NET-2 (12-Jul-2020)` and collapses runs
/// of spaces.
#[must_use]
pub fn strip_exam_tags(text: &str) -> String {
    let stripped = EXAM_TAG_PATTERN.replace_all(text, "");
    MULTI_SPACE_PATTERN
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Formats the record identifier `<EXAM>_<YEAR|UNKNOWN>_Q<nnn>`.
#[must_use]
pub fn question_id(source: &SourceInfo, number: u32) -> String {
    let year = source
        .year
        .map_or_else(|| "UNKNOWN".to_string(), |y| y.to_string());
    format!("{}_{year}_Q{number:03}", source.exam_type)
}

/// Classifies, scores and freezes raw blocks.
#[derive(Debug, Clone, Default)]
pub struct RecordFinalizer {
    classifier: SubjectClassifier,
    bands: BandTable,
}

impl RecordFinalizer {
    /// Creates a finalizer from a classifier and band table.
    #[must_use]
    pub fn new(classifier: SubjectClassifier, bands: BandTable) -> Self {
        Self { classifier, bands }
    }

    /// Band table in use.
    #[must_use]
    pub fn bands(&self) -> &BandTable {
        &self.bands
    }

    /// Builds the immutable record for one promoted block.
    #[must_use]
    pub fn finalize(&self, block: RawQuestionBlock, source: &SourceInfo) -> Question {
        let mut text = strip_exam_tags(&block.header);
        if text.is_empty() {
            text = block.header.trim().to_string();
        }

        let option_texts: Vec<&str> = block.options.iter().map(|o| o.text.as_str()).collect();
        let classification = self.classifier.classify(&text, option_texts.iter().copied());
        let difficulty_score = score_difficulty(&text, &option_texts);
        let difficulty = self.bands.band_for(difficulty_score).to_string();

        let correct_answer = block.inline_answer;
        let options: Vec<QuestionOption> = block
            .options
            .into_iter()
            .map(|o| QuestionOption {
                is_correct: correct_answer.map(|answer| answer == o.label),
                label: o.label,
                text: o.text,
            })
            .collect();

        let has_multiline = text.contains('\n')
            || options.iter().any(|o| o.text.contains('\n'))
            || block.solution.as_ref().is_some_and(|s| s.contains('\n'));

        let embedding_text =
            embedding_text(&text, &options, &classification.subject, correct_answer);
        let raw_text = raw_text(block.number, &text, &options);
        let id = question_id(source, block.number);

        debug!(
            id = %id,
            subject = %classification.subject,
            difficulty = %difficulty,
            difficulty_score,
            "Finalized question"
        );

        Question {
            id,
            question_number: block.number,
            has_formulas: has_formulas(&text),
            has_calculations: has_calculations(&text),
            question_text: text,
            options,
            correct_answer,
            solution: block.solution,
            subject: classification.subject,
            topic: classification.topic,
            tags: classification.tags,
            difficulty,
            difficulty_score,
            has_multiline,
            source_file: source.file_name.clone(),
            exam_type: source.exam_type,
            year: source.year,
            embedding_text,
            raw_text,
        }
    }
}

fn embedding_text(
    text: &str,
    options: &[QuestionOption],
    subject: &str,
    correct_answer: Option<char>,
) -> String {
    let mut parts = vec![format!("Question: {text}")];

    let option_texts: Vec<&str> = options
        .iter()
        .map(|o| o.text.as_str())
        .filter(|t| !t.is_empty())
        .collect();
    if !option_texts.is_empty() {
        parts.push(format!("Options: {}", option_texts.join(" | ")));
    }

    parts.push(format!("Subject: {subject}"));

    if let Some(answer) = correct_answer
        && let Some(option) = options.iter().find(|o| o.label == answer)
    {
        parts.push(format!("Answer: {}", option.text));
    }

    parts.join(" ")
}

fn raw_text(number: u32, text: &str, options: &[QuestionOption]) -> String {
    let mut raw = format!("Q{number}. {text}\n");
    for option in options {
        let _ = writeln!(raw, "{}. {}", option.label, option.text);
    }
    raw
}
