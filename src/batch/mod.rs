//! Concurrent processing of many documents.
//!
//! [`discover_inputs`] expands the paths given on the command line into
//! `.txt` documents, and [`BatchRunner`] parses them on a bounded pool of
//! tokio tasks, writing one JSON file per document.
//!
//! A failing document never aborts the batch; it is logged and counted.

mod stats;

pub use stats::{BatchOutcome, BatchReport, BatchStats};

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use crate::cleaner::clean_text;
use crate::error::ConfigError;
use crate::output::{OutputDocument, OutputError, output_path_for, write_document};
use crate::pipeline::Pipeline;

/// Minimum allowed concurrency value.
pub const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
pub const MAX_CONCURRENCY: usize = 64;

/// Default concurrency if not specified.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Extension of documents picked up from directories.
pub const INPUT_EXTENSION: &str = "txt";

/// Errors that stop a batch before or while scheduling documents.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Input path does not exist
    #[error("input path '{path}' does not exist\n  Suggestion: Pass existing .txt files or directories")]
    MissingInput {
        /// Path as given
        path: PathBuf,
    },

    /// Directory could not be listed
    #[error("cannot read directory '{path}': {source}")]
    Io {
        /// Directory being listed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}

/// Why a single document failed.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document could not be read as UTF-8 text
    #[error("cannot read '{path}': {source}")]
    Read {
        /// Document path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Output could not be written
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// A document to parse and the root its output path is relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDocument {
    /// Path of the `.txt` file
    pub path: PathBuf,
    /// Directory the output layout mirrors
    pub root: PathBuf,
}

impl InputDocument {
    /// File name used for exam type and year inference.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}

/// Expands files and directories into input documents.
///
/// Files are taken as given. Directories are searched recursively for
/// `.txt` files, in sorted order. A path reached twice is kept once, at its
/// first position.
///
/// # Errors
///
/// Returns [`BatchError::MissingInput`] for a path that does not exist and
/// [`BatchError::Io`] if a directory cannot be listed.
#[instrument(skip(paths), fields(paths = paths.len()))]
pub fn discover_inputs(paths: &[PathBuf]) -> Result<Vec<InputDocument>, BatchError> {
    let mut inputs = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            collect_text_files(path, &mut found)?;
            found.sort();
            inputs.extend(found.into_iter().map(|file| InputDocument {
                path: file,
                root: path.clone(),
            }));
        } else if path.is_file() {
            inputs.push(InputDocument {
                path: path.clone(),
                root: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            });
        } else {
            return Err(BatchError::MissingInput { path: path.clone() });
        }
    }

    let mut seen = HashSet::new();
    inputs.retain(|input| seen.insert(input.path.clone()));

    debug!(documents = inputs.len(), "Discovered input documents");
    Ok(inputs)
}

fn collect_text_files(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), BatchError> {
    let io_error = |source| BatchError::Io {
        path: dir.to_path_buf(),
        source,
    };

    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_dir() {
            collect_text_files(&path, found)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(INPUT_EXTENSION))
        {
            found.push(path);
        }
    }
    Ok(())
}

/// Per-run options for [`BatchRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Directory JSON files are written under
    pub output_dir: PathBuf,
    /// Strip publisher noise before parsing
    pub clean: bool,
    /// Parse and log only; write nothing
    pub dry_run: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("processed"),
            clean: true,
            dry_run: false,
        }
    }
}

/// Parses documents concurrently with a shared [`Pipeline`].
///
/// A semaphore permit is acquired before each document task is spawned, so
/// at most `concurrency` documents are in flight.
#[derive(Debug)]
pub struct BatchRunner {
    pipeline: Arc<Pipeline>,
    semaphore: Arc<Semaphore>,
    concurrency: usize,
    options: BatchOptions,
    stats: Arc<BatchStats>,
}

impl BatchRunner {
    /// Creates a runner.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConcurrency`] if `concurrency` is outside
    /// [`MIN_CONCURRENCY`]..=[`MAX_CONCURRENCY`].
    #[instrument(level = "debug", skip(pipeline, options))]
    pub fn new(
        pipeline: Arc<Pipeline>,
        concurrency: usize,
        options: BatchOptions,
    ) -> Result<Self, ConfigError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(ConfigError::InvalidConcurrency {
                value: concurrency,
                min: MIN_CONCURRENCY,
                max: MAX_CONCURRENCY,
            });
        }

        Ok(Self {
            pipeline,
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
            options,
            stats: Arc::new(BatchStats::new()),
        })
    }

    /// Configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Live counters, updated as documents finish.
    #[must_use]
    pub fn stats(&self) -> Arc<BatchStats> {
        Arc::clone(&self.stats)
    }

    /// Parses every input and returns the final counters.
    ///
    /// Each output path belongs to the first input that maps to it. Later
    /// inputs mapping to the same path are counted as failed and not parsed.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::SemaphoreClosed`] if the semaphore is closed.
    /// Individual document failures do not cause this method to error.
    #[instrument(skip(self, inputs), fields(documents = inputs.len(), dry_run = self.options.dry_run))]
    pub async fn run(&self, inputs: Vec<InputDocument>) -> Result<BatchReport, BatchError> {
        let mut handles = Vec::with_capacity(inputs.len());
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::with_capacity(inputs.len());
        info!(concurrency = self.concurrency, "Starting batch");

        for input in inputs {
            let output_path = output_path_for(&input.path, &input.root, &self.options.output_dir);
            match claimed.entry(output_path.clone()) {
                Entry::Occupied(owner) => {
                    warn!(
                        path = %input.path.display(),
                        claimed_by = %owner.get().display(),
                        output = %output_path.display(),
                        "Output path already taken by another input"
                    );
                    self.stats.record_failed();
                    continue;
                }
                Entry::Vacant(slot) => {
                    slot.insert(input.path.clone());
                }
            }

            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| BatchError::SemaphoreClosed)?;

            let pipeline = Arc::clone(&self.pipeline);
            let stats = Arc::clone(&self.stats);
            let options = self.options.clone();

            handles.push(tokio::spawn(async move {
                let _permit = permit;
                match process_document(&pipeline, &input, &output_path, &options).await {
                    Ok((questions, rejected)) if questions == 0 => {
                        warn!(
                            path = %input.path.display(),
                            rejected,
                            "No questions found in document"
                        );
                        stats.record_empty(rejected);
                    }
                    Ok((questions, rejected)) => stats.record_completed(questions, rejected),
                    Err(e) => {
                        warn!(path = %input.path.display(), error = %e, "Document failed");
                        stats.record_failed();
                    }
                }
            }));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Document task panicked");
                self.stats.record_failed();
            }
        }

        let report = self.stats.snapshot();
        info!(
            completed = report.completed,
            empty = report.empty,
            failed = report.failed,
            questions = report.questions,
            rejected = report.rejected_blocks,
            "Batch complete"
        );
        Ok(report)
    }
}

/// Reads, parses and persists one document. Returns the question and
/// rejected-block counts.
async fn process_document(
    pipeline: &Pipeline,
    input: &InputDocument,
    output_path: &Path,
    options: &BatchOptions,
) -> Result<(usize, usize), DocumentError> {
    let raw = tokio::fs::read_to_string(&input.path)
        .await
        .map_err(|source| DocumentError::Read {
            path: input.path.clone(),
            source,
        })?;

    let text = if options.clean { clean_text(&raw) } else { raw };
    let result = pipeline.parse_document(&text, &input.file_name());
    let counts = (result.questions.len(), result.rejected_blocks);

    if result.questions.is_empty() {
        return Ok(counts);
    }

    let summary = result.summary();
    if options.dry_run {
        info!(path = %input.path.display(), "{}", summary.format_message());
        return Ok(counts);
    }

    let document = OutputDocument::from_result(&result, Utc::now());
    write_document(&document, output_path).await?;
    info!(
        path = %input.path.display(),
        output = %output_path.display(),
        "{}",
        summary.format_message()
    );
    Ok(counts)
}
