//! Heuristic difficulty scoring and band mapping.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::features::{has_calculations, has_formulas};
use crate::error::ConfigError;

#[allow(clippy::expect_used)]
static AND_WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\band\b").expect("and-word regex is valid"));

const BASE_SCORE: f64 = 5.0;
const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 10.0;

const COMPLEXITY_WORDS: &[&str] = &["complex", "advanced", "derive", "prove"];
const SIMPLICITY_WORDS: &[&str] = &["simple", "basic", "elementary"];
const MULTI_STEP_WORDS: &[&str] = &["calculate", "find"];

/// Scores a question from 1.0 (trivial) to 10.0 (hardest).
///
/// Starts at 5.0 and applies additive adjustments for text length, formula
/// and arithmetic content, long options, complexity wording and multi-step
/// tasks. The result is rounded to one decimal and clamped to `[1.0, 10.0]`.
#[must_use]
pub fn score_difficulty(text: &str, options: &[&str]) -> f64 {
    let mut score = BASE_SCORE;

    let length = text.chars().count();
    if length > 300 {
        score += 1.5;
    } else if length > 200 {
        score += 1.0;
    } else if length < 50 {
        score -= 0.5;
    }

    if has_formulas(text) {
        score += 0.5;
    }
    if has_calculations(text) {
        score += 0.5;
    }

    if !options.is_empty() {
        let total: usize = options.iter().map(|o| o.chars().count()).sum();
        #[allow(clippy::cast_precision_loss)]
        let average = total as f64 / options.len() as f64;
        if average > 50.0 {
            score += 0.5;
        }
    }

    let lower = text.to_lowercase();
    if COMPLEXITY_WORDS.iter().any(|w| lower.contains(w)) {
        score += 1.0;
    } else if SIMPLICITY_WORDS.iter().any(|w| lower.contains(w)) {
        score -= 0.5;
    }

    if AND_WORD_PATTERN.is_match(&lower) && MULTI_STEP_WORDS.iter().any(|w| lower.contains(w)) {
        score += 0.5;
    }

    ((score * 10.0).round() / 10.0).clamp(MIN_SCORE, MAX_SCORE)
}

/// One named band: scores below `upper` (and at or above the previous
/// band's upper bound) fall into it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DifficultyBand {
    /// Band name, e.g. `medium`
    pub label: String,
    /// Exclusive upper bound
    pub upper: f64,
}

impl DifficultyBand {
    /// Creates a band.
    #[must_use]
    pub fn new(label: impl Into<String>, upper: f64) -> Self {
        Self {
            label: label.into(),
            upper,
        }
    }
}

/// Ordered, validated difficulty bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandTable {
    bands: Vec<DifficultyBand>,
}

impl BandTable {
    /// Validates and wraps a band list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBandTable`] if the list is empty, a
    /// label is blank, a bound is not finite, or bounds do not strictly
    /// increase.
    pub fn new(bands: Vec<DifficultyBand>) -> Result<Self, ConfigError> {
        if bands.is_empty() {
            return Err(ConfigError::band_table("at least one band is required"));
        }

        let mut previous: Option<f64> = None;
        for band in &bands {
            if band.label.trim().is_empty() {
                return Err(ConfigError::band_table("band labels must not be empty"));
            }
            if !band.upper.is_finite() {
                return Err(ConfigError::band_table(format!(
                    "band '{}' has a non-finite upper bound",
                    band.label
                )));
            }
            if let Some(prev) = previous
                && band.upper <= prev
            {
                return Err(ConfigError::band_table(format!(
                    "band '{}' upper bound {} does not exceed previous bound {prev}",
                    band.label, band.upper
                )));
            }
            previous = Some(band.upper);
        }

        Ok(Self { bands })
    }

    /// Bands in ascending order.
    #[must_use]
    pub fn bands(&self) -> &[DifficultyBand] {
        &self.bands
    }

    /// Label of the first band whose upper bound exceeds `score`.
    ///
    /// Scores at or above the last bound map to the last band.
    #[must_use]
    pub fn band_for(&self, score: f64) -> &str {
        self.bands
            .iter()
            .find(|band| score < band.upper)
            .or_else(|| self.bands.last())
            .map_or("", |band| band.label.as_str())
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self {
            bands: vec![
                DifficultyBand::new("easy", 3.5),
                DifficultyBand::new("medium", 6.5),
                DifficultyBand::new("hard", 8.5),
                DifficultyBand::new("expert", 10.0),
            ],
        }
    }
}
