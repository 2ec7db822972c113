//! Exam provenance inferred from a document's file name.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

#[allow(clippy::expect_used)]
static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20\d{2}").expect("source year regex is valid"));

/// Exam family a paper belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExamType {
    /// Medical college admission test
    Mdcat,
    /// NUST entry test
    Net,
    /// Anything else
    General,
}

impl ExamType {
    /// Upper-case name used in identifiers and output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mdcat => "MDCAT",
            Self::Net => "NET",
            Self::General => "GENERAL",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of one source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    /// File name as given
    pub file_name: String,
    /// Exam family
    pub exam_type: ExamType,
    /// First four-digit year starting with 20, if any
    pub year: Option<u16>,
}

impl SourceInfo {
    /// Infers exam type and year from a file name.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Self {
        let upper = file_name.to_uppercase();
        let exam_type = if upper.contains("MDCAT") {
            ExamType::Mdcat
        } else if upper.contains("NET") || upper.contains("NUST") {
            ExamType::Net
        } else {
            ExamType::General
        };

        let year = YEAR_PATTERN
            .find(file_name)
            .and_then(|m| m.as_str().parse().ok());

        Self {
            file_name: file_name.to_string(),
            exam_type,
            year,
        }
    }
}
