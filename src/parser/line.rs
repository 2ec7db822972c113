//! Line classification against ordered pattern tables.
//!
//! Every line of a document is tagged with the structural role it plays:
//! the start of a question, the start of an option, the start of a solution,
//! or none of these. Continuation text is always [`LineKind::Unclassified`];
//! the assembler decides where it belongs.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::ConfigError;

#[allow(clippy::expect_used)]
static SOLUTION_START_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:Sol|Solution|Answer|Explanation)\s*:\s*(.+)$")
        .expect("solution-start regex is valid")
});

/// One line of a document with its 0-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Position of the line in the document
    pub index: usize,
    /// Line content, untrimmed
    pub text: &'a str,
}

/// Splits a document into indexed lines.
pub fn split_lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.lines()
        .enumerate()
        .map(|(index, text)| Line { index, text })
}

/// Numbering convention that opened a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFormat {
    /// `12) text`
    Parenthesis,
    /// `Q.12 text`, `Q12 text`, `q. 12 text`
    QPrefix,
    /// `12. text`
    Dot,
}

/// Labelling convention that opened an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFormat {
    /// `A. text`
    UpperDot,
    /// `a. text`
    LowerDot,
    /// `A) text`
    UpperParen,
    /// `a) text`
    LowerParen,
}

/// Priority-ordered list of matchers. The first matching entry wins.
#[derive(Debug, Clone)]
pub struct PatternTable<K> {
    entries: Vec<(Regex, K)>,
}

impl<K: Copy> PatternTable<K> {
    fn new(entries: Vec<(Regex, K)>) -> Self {
        Self { entries }
    }

    /// Returns the kind and captures of the first entry matching `line`.
    #[must_use]
    pub fn first_match<'t>(&self, line: &'t str) -> Option<(K, Captures<'t>)> {
        self.entries
            .iter()
            .find_map(|(pattern, kind)| pattern.captures(line).map(|caps| (*kind, caps)))
    }

    /// Kinds in priority order.
    #[must_use]
    pub fn kinds(&self) -> Vec<K> {
        self.entries.iter().map(|(_, kind)| *kind).collect()
    }
}

/// Inclusive range of letters accepted as option labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionLetters {
    first: char,
    last: char,
}

impl OptionLetters {
    /// Creates a range from two ASCII letters, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOptionLetters`] when either bound is not
    /// an ASCII letter or the first letter does not precede the last.
    pub fn new(first: char, last: char) -> Result<Self, ConfigError> {
        let range = format!("{first}-{last}");
        if !first.is_ascii_alphabetic() || !last.is_ascii_alphabetic() {
            return Err(ConfigError::option_letters(
                &range,
                "bounds must be ASCII letters",
            ));
        }
        let first = first.to_ascii_uppercase();
        let last = last.to_ascii_uppercase();
        if first >= last {
            return Err(ConfigError::option_letters(
                &range,
                "first letter must precede last",
            ));
        }
        Ok(Self { first, last })
    }

    /// First accepted label (uppercase).
    #[must_use]
    pub fn first(&self) -> char {
        self.first
    }

    /// Last accepted label (uppercase).
    #[must_use]
    pub fn last(&self) -> char {
        self.last
    }

    /// Returns true if `label` falls inside the range, ignoring case.
    #[must_use]
    pub fn contains(&self, label: char) -> bool {
        (self.first..=self.last).contains(&label.to_ascii_uppercase())
    }

    fn class(&self, uppercase: bool) -> String {
        if uppercase {
            format!("[{}-{}]", self.first, self.last)
        } else {
            format!(
                "[{}-{}]",
                self.first.to_ascii_lowercase(),
                self.last.to_ascii_lowercase()
            )
        }
    }
}

impl Default for OptionLetters {
    fn default() -> Self {
        Self {
            first: 'A',
            last: 'D',
        }
    }
}

impl fmt::Display for OptionLetters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

impl FromStr for OptionLetters {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next(), chars.next(), chars.next()) {
            (Some(first), Some('-'), Some(last), None) => Self::new(first, last),
            _ => Err(ConfigError::option_letters(
                trimmed,
                "expected the form <first>-<last>",
            )),
        }
    }
}

/// Structural role of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Opens a new question block.
    QuestionStart {
        /// Question number as printed
        number: u32,
        /// Text after the number
        header: String,
    },
    /// Opens a new option within the current block.
    OptionStart {
        /// Uppercase option label
        label: char,
        /// Text after the label, possibly empty
        text: String,
    },
    /// Opens the solution of the current block.
    SolutionStart {
        /// Text after the `Solution:` prefix
        text: String,
    },
    /// Continuation text, or a blank line.
    Unclassified,
}

/// Maps one line to its [`LineKind`].
///
/// Pattern tables are compiled once at construction and never change, so a
/// single classifier can be shared across documents and threads.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    letters: OptionLetters,
    questions: PatternTable<QuestionFormat>,
    options: PatternTable<OptionFormat>,
}

impl LineClassifier {
    /// Builds the pattern tables for the given option letter range.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn new(letters: OptionLetters) -> Self {
        let compile = |pattern: &str| Regex::new(pattern).expect("line pattern is valid");

        let questions = PatternTable::new(vec![
            (compile(r"^(\d+)\)\s+(.+)$"), QuestionFormat::Parenthesis),
            (compile(r"(?i)^Q\.?\s*(\d+)\s+(.+)$"), QuestionFormat::QPrefix),
            (compile(r"^(\d+)\.\s+(.+)$"), QuestionFormat::Dot),
        ]);

        let upper = letters.class(true);
        let lower = letters.class(false);
        let options = PatternTable::new(vec![
            (compile(&format!(r"^({upper})\.\s*(.*)$")), OptionFormat::UpperDot),
            (compile(&format!(r"^({lower})\.\s*(.*)$")), OptionFormat::LowerDot),
            (compile(&format!(r"^({upper})\)\s*(.*)$")), OptionFormat::UpperParen),
            (compile(&format!(r"^({lower})\)\s*(.*)$")), OptionFormat::LowerParen),
        ]);

        Self {
            letters,
            questions,
            options,
        }
    }

    /// Option letter range this classifier accepts.
    #[must_use]
    pub fn letters(&self) -> OptionLetters {
        self.letters
    }

    /// Question-start table in priority order.
    #[must_use]
    pub fn question_patterns(&self) -> &PatternTable<QuestionFormat> {
        &self.questions
    }

    /// Option-start table in priority order.
    #[must_use]
    pub fn option_patterns(&self) -> &PatternTable<OptionFormat> {
        &self.options
    }

    /// Classifies one line.
    ///
    /// The line is trimmed first. Question starts are tried before solution
    /// starts, which are tried before option starts.
    #[must_use]
    pub fn classify(&self, line: &str) -> LineKind {
        let line = line.trim();
        if line.is_empty() {
            return LineKind::Unclassified;
        }

        if let Some(kind) = self.question_start(line) {
            return kind;
        }

        if let Some(caps) = SOLUTION_START_PATTERN.captures(line) {
            return LineKind::SolutionStart {
                text: caps[1].trim().to_string(),
            };
        }

        if let Some((_, caps)) = self.options.first_match(line)
            && let Some(label) = caps[1].chars().next()
        {
            return LineKind::OptionStart {
                label: label.to_ascii_uppercase(),
                text: caps[2].trim().to_string(),
            };
        }

        LineKind::Unclassified
    }

    fn question_start(&self, line: &str) -> Option<LineKind> {
        // Numbers too large for u32 are not question numbers; try the next pattern.
        self.questions.entries.iter().find_map(|(pattern, _)| {
            let caps = pattern.captures(line)?;
            let number = caps[1].parse::<u32>().ok()?;
            Some(LineKind::QuestionStart {
                number,
                header: caps[2].trim().to_string(),
            })
        })
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(OptionLetters::default())
    }
}
