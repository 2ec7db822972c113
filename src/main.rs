//! CLI entry point for the pastpaper tool.

use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use clap::Parser;
use pastpaper_core::{
    BatchOptions, BatchRunner, ParserConfig, Pipeline, PipelineConfig, discover_inputs,
};
use tracing::{debug, info, warn};

mod app_config;
mod cli;
mod exit;
mod progress;

use app_config::{Settings, load_file_config};
use cli::Args;
use exit::{ProcessExit, determine_exit_outcome};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    match run(args).await {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ProcessExit::Failure.into()
        }
    }
}

async fn run(args: Args) -> Result<ProcessExit> {
    let file_config = load_file_config(args.config.as_deref())?;
    let settings = Settings::resolve(&args, file_config.as_ref())
        .context("Failed to resolve settings")?;

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config > info
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.log_level(&args)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");
    debug!(?settings, loaded_config = file_config.is_some(), "Settings resolved");

    let inputs = discover_inputs(&args.inputs).context("Failed to collect input documents")?;
    if inputs.is_empty() {
        warn!("No .txt input files found");
        return Ok(ProcessExit::Failure);
    }
    let total = inputs.len();
    info!(documents = total, "Pastpaper starting");

    let pipeline = Arc::new(Pipeline::new(PipelineConfig {
        parser: ParserConfig {
            option_letters: settings.option_letters,
        },
        bands: settings.bands.clone(),
        ..PipelineConfig::default()
    }));

    let runner = BatchRunner::new(
        pipeline,
        settings.concurrency,
        BatchOptions {
            output_dir: settings.output_dir.clone(),
            clean: settings.clean,
            dry_run: settings.dry_run,
        },
    )?;

    let use_spinner = !args.quiet && io::stderr().is_terminal();
    let (progress_handle, stop) = progress::spawn_progress_ui(use_spinner, runner.stats(), total);

    let result = runner.run(inputs).await;

    stop.store(true, Ordering::SeqCst);
    if let Some(handle) = progress_handle {
        let _ = handle.await;
    }

    let report = result?;
    info!(
        completed = report.completed,
        empty = report.empty,
        failed = report.failed,
        questions = report.questions,
        "Parsing complete"
    );

    Ok(determine_exit_outcome(&report))
}
