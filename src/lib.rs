//! Pastpaper Core Library
//!
//! Turns raw, noisy text extracted from multiple-choice exam papers into
//! structured question records ready for indexing and quiz generation.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - Line classification and question block assembly
//! - [`classify`] - Subject/topic keyword classification and difficulty scoring
//! - [`record`] - Finalized, immutable [`Question`] records
//! - [`pipeline`] - One document end to end
//! - [`cleaner`] - Publisher noise stripping before parsing
//! - [`summary`] - Aggregate counters over a question list
//! - [`output`] - JSON persistence
//! - [`batch`] - Concurrent processing of many documents

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod classify;
pub mod cleaner;
pub mod error;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod summary;

// Re-export commonly used types
pub use batch::{
    BatchOptions, BatchOutcome, BatchReport, BatchRunner, BatchStats, DEFAULT_CONCURRENCY,
    InputDocument, MAX_CONCURRENCY, MIN_CONCURRENCY, discover_inputs,
};
pub use classify::{BandTable, ClassifierConfig, DifficultyBand, KeywordVocabulary};
pub use cleaner::{clean_text, is_noise_line};
pub use error::ConfigError;
pub use output::{OutputDocument, OutputError, write_document};
pub use parser::{ExamType, LineClassifier, LineKind, OptionLetters, ParserConfig, SourceInfo};
pub use pipeline::{DocumentResult, Pipeline, PipelineConfig};
pub use record::{Question, QuestionOption};
pub use summary::{Summary, summarize};
