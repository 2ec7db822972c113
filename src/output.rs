//! JSON persistence of parsed documents.
//!
//! One pretty-printed document per source file:
//! `{metadata, summary, questions}`. Key order follows struct field order.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::pipeline::DocumentResult;
use crate::record::Question;
use crate::summary::Summary;

/// Parser version recorded in output metadata.
pub const PARSER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors raised while persisting parsed documents.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Output file or directory could not be written
    #[error("cannot write '{path}': {source}\n  Suggestion: Check the output directory exists and is writable")]
    Io {
        /// Path being written
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Document could not be serialized
    #[error("cannot serialize parsed document: {source}")]
    Serialize {
        /// Underlying serde error
        #[from]
        source: serde_json::Error,
    },
}

/// Provenance block of an output document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentMetadata {
    /// Name of the parsed file
    pub source_file: String,
    /// Questions in the document
    pub total_questions: usize,
    /// Blocks dropped during assembly
    pub rejected_blocks: usize,
    /// When the document was written
    pub extraction_date: DateTime<Utc>,
    /// Crate version that produced the document
    pub parser_version: &'static str,
}

/// Serializable view over a [`DocumentResult`].
#[derive(Debug, Clone, Serialize)]
pub struct OutputDocument<'a> {
    /// Provenance
    pub metadata: DocumentMetadata,
    /// Aggregate counters
    pub summary: Summary,
    /// Finalized questions in document order
    pub questions: &'a [Question],
}

impl<'a> OutputDocument<'a> {
    /// Builds the output view, stamping `extracted_at` as the extraction date.
    #[must_use]
    pub fn from_result(result: &'a DocumentResult, extracted_at: DateTime<Utc>) -> Self {
        Self {
            metadata: DocumentMetadata {
                source_file: result.source.file_name.clone(),
                total_questions: result.questions.len(),
                rejected_blocks: result.rejected_blocks,
                extraction_date: extracted_at,
                parser_version: PARSER_VERSION,
            },
            summary: result.summary(),
            questions: &result.questions,
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, OutputError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Maps an input file to its JSON output path: the path relative to `root`,
/// with a `.json` extension, under `output_dir`.
///
/// When `input` is not under `root` only its file name is kept.
#[must_use]
pub fn output_path_for(input: &Path, root: &Path, output_dir: &Path) -> PathBuf {
    let relative = input
        .strip_prefix(root)
        .ok()
        .filter(|rel| !rel.as_os_str().is_empty())
        .map_or_else(
            || PathBuf::from(input.file_name().unwrap_or(input.as_os_str())),
            Path::to_path_buf,
        );
    output_dir.join(relative).with_extension("json")
}

/// Writes `document` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`OutputError`] if serialization or any filesystem operation fails.
pub async fn write_document(document: &OutputDocument<'_>, path: &Path) -> Result<(), OutputError> {
    let json = document.to_json()?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| OutputError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, json)
        .await
        .map_err(|source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), questions = document.questions.len(), "Wrote output document");
    Ok(())
}
