//! Question assembly state machine.
//!
//! Walks the classified lines of one document and stitches multi-line
//! headers, options and solutions back into raw question blocks.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::line::{Line, LineClassifier, LineKind};

#[allow(clippy::expect_used)]
static CORRECT_MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(\s*Correct\s*\)\s*$").expect("correct-marker regex is valid")
});

/// Minimum options a block needs to be promoted.
pub const MIN_OPTIONS: usize = 2;

/// One option captured from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOption {
    /// Uppercase label
    pub label: char,
    /// Option text with any `(Correct)` marker removed
    pub text: String,
}

/// A question as it appeared in the source, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuestionBlock {
    /// Question number as printed
    pub number: u32,
    /// Header text, continuation lines joined by spaces
    pub header: String,
    /// Options in source order, labels unique
    pub options: Vec<RawOption>,
    /// Label carrying a `(Correct)` marker, if any
    pub inline_answer: Option<char>,
    /// Solution text, if any
    pub solution: Option<String>,
    /// Index of the line that opened the block
    pub first_line: usize,
}

/// Output of assembling one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    /// Promoted blocks in document order
    pub blocks: Vec<RawQuestionBlock>,
    /// Blocks dropped for a missing header or too few options
    pub rejected: usize,
}

#[derive(Debug)]
struct BlockBuilder {
    number: u32,
    header: String,
    options: Vec<RawOption>,
    current: Option<RawOption>,
    inline_answer: Option<char>,
    solution: Option<String>,
    first_line: usize,
}

impl BlockBuilder {
    fn open(number: u32, header: String, first_line: usize) -> Self {
        Self {
            number,
            header,
            options: Vec::new(),
            current: None,
            inline_answer: None,
            solution: None,
            first_line,
        }
    }

    fn push_header(&mut self, text: &str) {
        append(&mut self.header, text);
    }

    fn open_option(&mut self, label: char, text: String) {
        self.close_option();
        self.current = Some(RawOption { label, text });
    }

    fn push_option_text(&mut self, text: &str) {
        if let Some(current) = self.current.as_mut() {
            append(&mut current.text, text);
        }
    }

    fn close_option(&mut self) {
        let Some(mut option) = self.current.take() else {
            return;
        };

        if let Some(marker) = CORRECT_MARKER_PATTERN.find(&option.text) {
            option.text.truncate(marker.start());
            option.text.truncate(option.text.trim_end().len());
            self.inline_answer = Some(option.label);
        }

        if let Some(existing) = self.options.iter_mut().find(|o| o.label == option.label) {
            *existing = option;
        } else {
            self.options.push(option);
        }
    }

    fn open_solution(&mut self, text: String) {
        self.close_option();
        self.solution = Some(text);
    }

    fn push_solution(&mut self, text: &str) {
        if let Some(solution) = self.solution.as_mut() {
            append(solution, text);
        }
    }

    fn finish(mut self) -> Result<RawQuestionBlock, Self> {
        self.close_option();
        let header = self.header.trim();
        if header.is_empty() || self.options.len() < MIN_OPTIONS {
            return Err(self);
        }

        Ok(RawQuestionBlock {
            number: self.number,
            header: header.to_string(),
            options: self.options,
            inline_answer: self.inline_answer,
            solution: self.solution.filter(|s| !s.trim().is_empty()),
            first_line: self.first_line,
        })
    }
}

fn append(target: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Scanning,
    Header(BlockBuilder),
    Options(BlockBuilder),
    Solution(BlockBuilder),
}

/// Groups classified lines into [`RawQuestionBlock`]s.
#[derive(Debug, Clone, Copy)]
pub struct QuestionAssembler<'c> {
    classifier: &'c LineClassifier,
}

impl<'c> QuestionAssembler<'c> {
    /// Creates an assembler that classifies lines with `classifier`.
    #[must_use]
    pub fn new(classifier: &'c LineClassifier) -> Self {
        Self { classifier }
    }

    /// Assembles one document.
    ///
    /// Never fails: blocks without a header or with fewer than
    /// [`MIN_OPTIONS`] options are counted in [`Assembly::rejected`].
    #[must_use]
    pub fn assemble<'a>(&self, lines: impl IntoIterator<Item = Line<'a>>) -> Assembly {
        let mut assembly = Assembly::default();
        let mut state = State::default();

        for line in lines {
            let kind = self.classifier.classify(line.text);
            // A question start inside an open block closes it and is replayed once.
            let mut pending = Some(kind);
            while let Some(kind) = pending.take() {
                let (next, replay) = step(std::mem::take(&mut state), kind, line, &mut assembly);
                state = next;
                pending = replay;
            }
        }

        if let Some(builder) = take_builder(state) {
            close_block(builder, &mut assembly);
        }

        debug!(
            promoted = assembly.blocks.len(),
            rejected = assembly.rejected,
            "Assembly complete"
        );
        assembly
    }
}

/// Advances the state machine by one line. Returns the next state and, when
/// the line must be reprocessed from `Scanning`, the line kind to replay.
fn step(
    state: State,
    kind: LineKind,
    line: Line<'_>,
    assembly: &mut Assembly,
) -> (State, Option<LineKind>) {
    match (state, kind) {
        (State::Scanning, LineKind::QuestionStart { number, header }) => (
            State::Header(BlockBuilder::open(number, header, line.index)),
            None,
        ),
        (State::Scanning, _) => (State::Scanning, None),

        (
            State::Header(builder) | State::Options(builder) | State::Solution(builder),
            kind @ LineKind::QuestionStart { .. },
        ) => {
            close_block(builder, assembly);
            (State::Scanning, Some(kind))
        }

        (State::Header(mut builder), LineKind::OptionStart { label, text }) => {
            builder.open_option(label, text);
            (State::Options(builder), None)
        }
        (State::Header(mut builder), LineKind::SolutionStart { .. } | LineKind::Unclassified) => {
            builder.push_header(line.text);
            (State::Header(builder), None)
        }

        (State::Options(mut builder), LineKind::OptionStart { label, text }) => {
            builder.open_option(label, text);
            (State::Options(builder), None)
        }
        (State::Options(mut builder), LineKind::SolutionStart { text }) => {
            builder.open_solution(text);
            (State::Solution(builder), None)
        }
        (State::Options(mut builder), LineKind::Unclassified) => {
            builder.push_option_text(line.text);
            (State::Options(builder), None)
        }

        (State::Solution(mut builder), _) => {
            builder.push_solution(line.text);
            (State::Solution(builder), None)
        }
    }
}

fn take_builder(state: State) -> Option<BlockBuilder> {
    match state {
        State::Scanning => None,
        State::Header(builder) | State::Options(builder) | State::Solution(builder) => {
            Some(builder)
        }
    }
}

fn close_block(builder: BlockBuilder, assembly: &mut Assembly) {
    match builder.finish() {
        Ok(block) => {
            debug!(
                number = block.number,
                options = block.options.len(),
                line = block.first_line,
                "Promoted question block"
            );
            assembly.blocks.push(block);
        }
        Err(builder) => {
            debug!(
                number = builder.number,
                options = builder.options.len(),
                line = builder.first_line,
                "Rejected question block"
            );
            assembly.rejected += 1;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::parser::line::split_lines;

    fn assemble(text: &str) -> Assembly {
        let classifier = LineClassifier::default();
        QuestionAssembler::new(&classifier).assemble(split_lines(text))
    }

    fn labels(block: &RawQuestionBlock) -> Vec<char> {
        block.options.iter().map(|o| o.label).collect()
    }

    #[test]
    fn test_assemble_simple_question() {
        let assembly = assemble(
            "1. What is the atomic number of Carbon?\na. 6\nb. 12\nc. 14\nd. 16",
        );
        assert_eq!(assembly.rejected, 0);
        assert_eq!(assembly.blocks.len(), 1);
        let block = &assembly.blocks[0];
        assert_eq!(block.number, 1);
        assert_eq!(block.header, "What is the atomic number of Carbon?");
        assert_eq!(labels(block), vec!['A', 'B', 'C', 'D']);
        assert_eq!(block.options[0].text, "6");
        assert_eq!(block.inline_answer, None);
        assert_eq!(block.solution, None);
    }

    #[test]
    fn test_assemble_joins_multiline_header_and_options() {
        let assembly = assemble(
            "2) A body moving with\nconstant velocity has\nA) zero\nacceleration\nB) constant acceleration",
        );
        let block = &assembly.blocks[0];
        assert_eq!(block.header, "A body moving with constant velocity has");
        assert_eq!(block.options[0].text, "zero acceleration");
        assert_eq!(block.options[1].text, "constant acceleration");
    }

    #[test]
    fn test_assemble_extracts_inline_answer() {
        let assembly = assemble("3. Capital of France?\nA) Berlin\nB) Rome\nC) Paris (Correct)");
        let block = &assembly.blocks[0];
        assert_eq!(block.options[2].text, "Paris");
        assert_eq!(block.inline_answer, Some('C'));
    }

    #[test]
    fn test_assemble_marker_on_continuation_line() {
        let assembly = assemble("3. Pick one\nA) first\nB) second part\n(correct)");
        assert_eq!(assembly.blocks[0].options[1].text, "second part");
        assert_eq!(assembly.blocks[0].inline_answer, Some('B'));
    }

    #[test]
    fn test_assemble_last_correct_marker_wins() {
        let assembly = assemble("4. Pick one\nA) x (Correct)\nB) y (CORRECT)\nC) z");
        assert_eq!(assembly.blocks[0].inline_answer, Some('B'));
        assert_eq!(assembly.blocks[0].options[0].text, "x");
    }

    #[test]
    fn test_assemble_rejects_single_option_block() {
        let assembly = assemble("1. Lonely question\nA) only option\n2. Next question\nA) x\nB) y");
        assert_eq!(assembly.rejected, 1);
        assert_eq!(assembly.blocks.len(), 1);
        assert_eq!(assembly.blocks[0].number, 2);
    }

    #[test]
    fn test_assemble_rejects_block_without_options_at_end_of_input() {
        let assembly = assemble("1. Header only\nmore header");
        assert!(assembly.blocks.is_empty());
        assert_eq!(assembly.rejected, 1);
    }

    #[test]
    fn test_assemble_solution_after_options() {
        let assembly = assemble("5. Which?\nA) one\nB) two\nAnswer: B\nbecause two > one");
        let block = &assembly.blocks[0];
        assert_eq!(block.solution.as_deref(), Some("B because two > one"));
        assert_eq!(block.options.len(), 2);
    }

    #[test]
    fn test_assemble_solution_absorbs_option_like_lines() {
        let assembly = assemble("5. Which?\nA) one\nB) two\nSolution: see\nA) restated\n6. Next\nA) p\nB) q");
        assert_eq!(assembly.blocks.len(), 2);
        assert_eq!(assembly.blocks[0].solution.as_deref(), Some("see A) restated"));
        assert_eq!(assembly.blocks[0].options.len(), 2);
    }

    #[test]
    fn test_assemble_solution_in_header_is_header_text() {
        let assembly = assemble("7. Read the passage\nAnswer: the following\nA) yes\nB) no");
        let block = &assembly.blocks[0];
        assert_eq!(block.header, "Read the passage Answer: the following");
        assert_eq!(block.solution, None);
    }

    #[test]
    fn test_assemble_duplicate_label_replaced_in_place() {
        let assembly = assemble("8. Pick\nA) first\nB) second\nA) again");
        let block = &assembly.blocks[0];
        assert_eq!(labels(block), vec!['A', 'B']);
        assert_eq!(block.options[0].text, "again");
    }

    #[test]
    fn test_assemble_question_start_rewinds_from_every_state() {
        let text = "1. header only\n2. with options\nA) a\nB) b\n3. with solution\nA) a\nB) b\nSol: s\n4. last\nA) a\nB) b";
        let assembly = assemble(text);
        let numbers: Vec<u32> = assembly.blocks.iter().map(|b| b.number).collect();
        assert_eq!(numbers, vec![2, 3, 4]);
        assert_eq!(assembly.rejected, 1);
        assert_eq!(assembly.blocks[1].solution.as_deref(), Some("s"));
    }

    #[test]
    fn test_assemble_skips_preamble_and_blank_lines() {
        let assembly = assemble("PHYSICS PAPER 2020\n\nInstructions here\n\n1. Q\n\nA) a\n\nB) b\n");
        assert_eq!(assembly.blocks.len(), 1);
        assert_eq!(assembly.blocks[0].first_line, 4);
        assert_eq!(assembly.blocks[0].options[1].text, "b");
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let text = "1. A?\nA) x\nB) y\n2. B?\nA) z";
        assert_eq!(assemble(text), assemble(text));
    }

    #[test]
    fn test_assemble_empty_document() {
        assert_eq!(assemble(""), Assembly::default());
    }
}
