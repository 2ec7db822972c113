//! Line-oriented parsing of multiple-choice exam text.
//!
//! Parsing happens in two passes over one document:
//!
//! - [`LineClassifier`] tags each line as a question start, option start,
//!   solution start or continuation text.
//! - [`QuestionAssembler`] groups the tagged lines into [`RawQuestionBlock`]s,
//!   dropping blocks that lack a header or have fewer than two options.
//!
//! # Example
//!
//! ```
//! use pastpaper_core::parser::{LineClassifier, QuestionAssembler, split_lines};
//!
//! let classifier = LineClassifier::default();
//! let assembly = QuestionAssembler::new(&classifier).assemble(split_lines(
//!     "1) Capital of France?\nA) Berlin\nB) Paris (Correct)",
//! ));
//!
//! assert_eq!(assembly.blocks.len(), 1);
//! assert_eq!(assembly.blocks[0].inline_answer, Some('B'));
//! ```

mod assembler;
mod line;
mod source;

pub use assembler::{Assembly, MIN_OPTIONS, QuestionAssembler, RawOption, RawQuestionBlock};
pub use line::{
    Line, LineClassifier, LineKind, OptionFormat, OptionLetters, PatternTable, QuestionFormat,
    split_lines,
};
pub use source::{ExamType, SourceInfo};

/// Read-only settings for the line parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Letters accepted as option labels
    pub option_letters: OptionLetters,
}

impl ParserConfig {
    /// Builds the line classifier for this configuration.
    #[must_use]
    pub fn classifier(&self) -> LineClassifier {
        LineClassifier::new(self.option_letters)
    }
}
