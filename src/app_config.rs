//! Application configuration loading for CLI defaults.
//!
//! Explicit CLI flags win over config file values, which win over built-in
//! defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use pastpaper_core::{BandTable, DEFAULT_CONCURRENCY, DifficultyBand, MAX_CONCURRENCY, OptionLetters};

use crate::cli::Args;

/// TOML-backed file configuration for pastpaper defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default output directory for JSON documents.
    pub output_dir: Option<PathBuf>,
    /// Default concurrency (same range as CLI).
    pub concurrency: Option<u8>,
    /// Default option letter range, e.g. "A-E".
    pub option_letters: Option<String>,
    /// Strip publisher noise before parsing.
    pub clean: Option<bool>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
    /// Replacement difficulty band table.
    pub difficulty_bands: Option<Vec<DifficultyBand>>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(concurrency) = self.concurrency
            && !(1..=MAX_CONCURRENCY).contains(&usize::from(concurrency))
        {
            bail!(
                "Invalid config value for `concurrency`: {concurrency}. Expected range: 1..={MAX_CONCURRENCY}"
            );
        }

        if let Some(letters) = &self.option_letters {
            letters
                .parse::<OptionLetters>()
                .context("Invalid config value for `option_letters`")?;
        }

        if let Some(bands) = &self.difficulty_bands {
            BandTable::new(bands.clone()).context("Invalid config value for `difficulty_bands`")?;
        }

        Ok(())
    }
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Log filter directive for this setting.
    #[must_use]
    pub fn filter_directive(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose | Self::Debug => "debug",
            Self::Quiet => "error",
        }
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/pastpaper/config.toml`
/// 2. `$HOME/.config/pastpaper/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("pastpaper")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("pastpaper")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the config file named by `--config`, or the default file if it
/// exists. An explicit path that does not exist is an error.
pub fn load_file_config(explicit: Option<&Path>) -> Result<Option<FileConfig>> {
    if let Some(path) = explicit {
        return read_config_file(path).map(Some);
    }

    match resolve_default_config_path() {
        Some(path) if path.exists() => read_config_file(&path).map(Some),
        _ => Ok(None),
    }
}

fn read_config_file(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let cfg: FileConfig = toml::from_str(raw)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Effective settings after merging CLI flags, config file and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub concurrency: usize,
    pub option_letters: OptionLetters,
    pub clean: bool,
    pub dry_run: bool,
    pub bands: BandTable,
    pub verbosity: Option<VerbositySetting>,
}

impl Settings {
    /// Merges CLI arguments over file values over defaults.
    pub fn resolve(args: &Args, file: Option<&FileConfig>) -> Result<Self> {
        let file = file.cloned().unwrap_or_default();

        let option_letters = match (args.option_letters, file.option_letters.as_deref()) {
            (Some(letters), _) => letters,
            (None, Some(raw)) => raw.parse()?,
            (None, None) => OptionLetters::default(),
        };

        let bands = match file.difficulty_bands {
            Some(bands) => BandTable::new(bands)?,
            None => BandTable::default(),
        };

        Ok(Self {
            output_dir: args
                .output_dir
                .clone()
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from("processed")),
            concurrency: args
                .concurrency
                .or(file.concurrency)
                .map_or(DEFAULT_CONCURRENCY, usize::from),
            option_letters,
            clean: !args.no_clean && file.clean.unwrap_or(true),
            dry_run: args.dry_run,
            bands,
            verbosity: file.verbosity,
        })
    }

    /// Default log filter. Priority: quiet flag > verbose flag > config
    /// verbosity > info. `RUST_LOG` overrides all of these.
    #[must_use]
    pub fn log_level(&self, args: &Args) -> &'static str {
        if args.quiet {
            return "error";
        }
        match args.verbose {
            0 => self
                .verbosity
                .map_or("info", VerbositySetting::filter_directive),
            1 => "debug",
            _ => "trace",
        }
    }
}
