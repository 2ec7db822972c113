//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use pastpaper_core::OptionLetters;

/// Parse OCR'd multiple-choice exam papers into structured question records.
///
/// Each input `.txt` file (or every `.txt` file under an input directory)
/// becomes one JSON document of questions, options, answers and metadata.
#[derive(Parser, Debug)]
#[command(name = "pastpaper")]
#[command(author, version, about)]
pub struct Args {
    /// Text files or directories to parse (directories are searched recursively)
    #[arg(required = true, value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory for JSON output [default: processed]
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Maximum documents parsed concurrently (1-64) [default: 4]
    #[arg(short = 'c', long, value_parser = clap::value_parser!(u8).range(1..=64))]
    pub concurrency: Option<u8>,

    /// Letters accepted as option labels, e.g. A-E [default: A-D]
    #[arg(long, value_name = "RANGE")]
    pub option_letters: Option<OptionLetters>,

    /// Skip publisher noise stripping
    #[arg(long)]
    pub no_clean: bool,

    /// Parse and report without writing any output
    #[arg(long)]
    pub dry_run: bool,

    /// Config file path [default: $XDG_CONFIG_HOME/pastpaper/config.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
