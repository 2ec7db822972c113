//! End-to-end parsing of one document.
//!
//! A [`Pipeline`] owns every read-only table the parser needs (line
//! patterns, vocabularies, band table). Build it once and share it across
//! documents; it holds no per-document state.

use tracing::{info, warn};

use crate::classify::{BandTable, ClassifierConfig, SubjectClassifier};
use crate::parser::{LineClassifier, ParserConfig, QuestionAssembler, SourceInfo, split_lines};
use crate::record::{Question, RecordFinalizer};
use crate::summary::{Summary, summarize};

/// Configuration for building a [`Pipeline`].
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Line parser settings
    pub parser: ParserConfig,
    /// Subject and topic vocabularies
    pub classifier: ClassifierConfig,
    /// Difficulty bands
    pub bands: BandTable,
}

/// Questions parsed from one document.
#[derive(Debug, Clone)]
pub struct DocumentResult {
    /// Provenance inferred from the file name
    pub source: SourceInfo,
    /// Finalized questions in document order
    pub questions: Vec<Question>,
    /// Blocks dropped for a missing header or too few options
    pub rejected_blocks: usize,
}

impl DocumentResult {
    /// Aggregate counters for this document.
    #[must_use]
    pub fn summary(&self) -> Summary {
        summarize(&self.questions, self.rejected_blocks)
    }
}

/// Line classifier, assembler and finalizer wired together.
#[derive(Debug, Clone)]
pub struct Pipeline {
    classifier: LineClassifier,
    finalizer: RecordFinalizer,
}

impl Pipeline {
    /// Builds the pipeline's read-only tables.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            classifier: config.parser.classifier(),
            finalizer: RecordFinalizer::new(SubjectClassifier::new(config.classifier), config.bands),
        }
    }

    /// Line classifier in use.
    #[must_use]
    pub fn line_classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Parses already-cleaned text. `source_file` drives exam type and year
    /// inference and is recorded on every question.
    ///
    /// Never fails; an unparseable document yields no questions.
    #[tracing::instrument(skip(self, text), fields(input_len = text.len()))]
    #[must_use]
    pub fn parse_document(&self, text: &str, source_file: &str) -> DocumentResult {
        let source = SourceInfo::from_file_name(source_file);
        let assembly = QuestionAssembler::new(&self.classifier).assemble(split_lines(text));

        let questions: Vec<Question> = assembly
            .blocks
            .into_iter()
            .map(|block| self.finalizer.finalize(block, &source))
            .collect();

        if assembly.rejected > 0 {
            warn!(
                rejected = assembly.rejected,
                "Dropped question blocks without a header or with fewer than two options"
            );
        }
        info!(
            questions = questions.len(),
            rejected = assembly.rejected,
            exam_type = %source.exam_type,
            year = source.year,
            "Document parsed"
        );

        DocumentResult {
            source,
            questions,
            rejected_blocks: assembly.rejected,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
