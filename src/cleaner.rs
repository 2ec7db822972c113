//! Noise stripping for OCR'd past papers.
//!
//! Removes the promotional banners, contact details, links, watermarks and
//! page numbers that publishers stamp on every page, before the line parser
//! sees the text. Patterns are matched case-insensitively.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

const URL_PATTERNS: &[&str] = &[
    r"www\.[a-zA-Z0-9-]+\.(?:com|net|org|edu|pk|info)",
    r"https?://[^\s]+",
    r"[a-zA-Z0-9-]+\.com",
    r"pmdc\.org\.pk",
    r"nust\.edu\.pk",
];

const PHONE_PATTERNS: &[&str] = &[
    r"\b(?:Helpline|Contact|Call)[ \t]*:?[ \t]*\+?\d[\d -]*\d",
    r"\+92[- ]?\d{3}[- ]?\d{7}\b",
    r"\b0?\d{3}[- ]?\d{7}\b",
    r"\b\d{4}[- ]?\d{7}\b",
];

const PROMOTIONAL_PATTERNS: &[&str] = &[
    r"All MDCAT Study Stuff and Free Preparation",
    r"Download.*?App.*?From.*?Play Store",
    r"Download MDCAT Guide App",
    r"Get it on Google Play",
    r"Available on the App Store",
    r"Download.*?from Play Store",
    r"Free MDCAT Preparation",
    r"Join our.*?WhatsApp Group",
    r"Join our Facebook group",
    r"Follow us on Facebook",
    r"Subscribe to our channel",
    r"Subscribe for more content",
    r"Visit our website",
    r"For more.*?visit",
];

const APP_PATTERNS: &[&str] = &[
    r"MDCAT Guide App",
    r"NET Prep App",
    r"NUST Entry Test App",
    r"Educational Zone App",
    r"Study Guide Application",
];

const EMAIL_PATTERNS: &[&str] = &[r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"];

const SOCIAL_PATTERNS: &[&str] = &[
    r"(?:Facebook|Instagram|Twitter|YouTube)\.com/[^\s]+",
    r"@[a-zA-Z0-9_]+",
];

const WATERMARK_PATTERNS: &[&str] = &[
    r"Prepared by.*?educatedzone",
    r"Copyright.*?\d{4}",
    r"All rights reserved",
    r"Unauthorized.*?prohibited",
    r"This material.*?property of",
];

// Line-level tables: a line matching any of these is dropped whole, before
// inline stripping runs.

const LINE_PROMOTIONAL_PATTERNS: &[&str] = &[
    r"TO Order.*?(?:Whats App|WhatsApp).*?\d{4}-?\d{7}",
    r"ALL MDCAT TOPPERS RECOMMENDS",
    r"YOU MUST PRACTICE BOOK",
    r"MDCAT PAST PAPERS.*WITH ANSWER KEY IS VERY IMPORTANT",
    r"MOCK TEST BY ONLINE ACADEMY",
];

const HEADER_FOOTER_PATTERNS: &[&str] = &[
    r"^Page \d+ of \d+\s*$",
    r"^Total MCQs?:\s*\d+.*Max\.?\s*Marks?:\s*\d+\s*$",
    r"^ENTRANCE TEST\s*-\s*\d{4}\s*$",
    r"^Instructions?:\s*$",
    r"^Time Allowed:\s*\d+.*$",
    r"^For F\.Sc\..*Students Only\s*$",
    r"^[ivx]+\.\s+[a-z].*(?:instruction|prohibited|required)",
    r"^Total Time:.*Total Question:.*$",
    r"^U?NIVERSITY OF.*EALTH.*CIENCES",
    r"^\(UHS\),\s*L?AHORE\s*$",
    r"^M\s*C\s*A\s*T.*(?:MCAT|TEST)\s*$",
    r"^M?EDICAL.*OLLEGE.*PTITUDE.*EST\s*$",
];

const METADATA_PATTERNS: &[&str] = &[
    r"COMPULSORY QUESTION FOR IDENTIFICATION",
    r"Q-ID\..*What is the colou?r of your Question Paper",
    r"Fill the Circle Corresponding",
];

const SECTION_MARKER_PATTERNS: &[&str] = &[
    r"^PHYSICS\s*$",
    r"^CHEMISTRY\s*$",
    r"^BIOLOGY\s*$",
    r"^ENGLISH\s*$",
    r"^MATHEMATICS\s*$",
    r"^LOGICAL REASONING\s*$",
    r"^NET\s*[-–]\s*MATHEMATICS SECTION\s*$",
    r"^\(NET\)\s*$",
];

const PAGE_PATTERNS: &[&str] = &[r"^Page\s+\d+\s*$", r"^\d+\s*$", r"^-\s*\d+\s*-$"];

#[allow(clippy::expect_used)]
fn compile_all(groups: &[&[&str]]) -> Vec<Regex> {
    groups
        .iter()
        .flat_map(|group| group.iter())
        .map(|pattern| Regex::new(&format!("(?i){pattern}")).expect("noise regex is valid"))
        .collect()
}

// E-mail addresses go before bare domains and handles so `user@host.com` goes whole.
static NOISE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        EMAIL_PATTERNS,
        URL_PATTERNS,
        PHONE_PATTERNS,
        PROMOTIONAL_PATTERNS,
        APP_PATTERNS,
        SOCIAL_PATTERNS,
        WATERMARK_PATTERNS,
    ])
});

static LINE_DROP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        LINE_PROMOTIONAL_PATTERNS,
        HEADER_FOOTER_PATTERNS,
        METADATA_PATTERNS,
        SECTION_MARKER_PATTERNS,
    ])
});

static PAGE_LINE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile_all(&[PAGE_PATTERNS]));

#[allow(clippy::expect_used)]
static MULTI_SPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("multi-space regex is valid"));

/// Before/after size of a cleaning pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CleanStats {
    /// Characters before cleaning
    pub original_length: usize,
    /// Characters after cleaning
    pub cleaned_length: usize,
    /// Lines before cleaning
    pub original_lines: usize,
    /// Lines after cleaning
    pub cleaned_lines: usize,
}

impl CleanStats {
    /// Compares raw and cleaned text.
    #[must_use]
    pub fn between(original: &str, cleaned: &str) -> Self {
        Self {
            original_length: original.chars().count(),
            cleaned_length: cleaned.chars().count(),
            original_lines: original.split('\n').count(),
            cleaned_lines: cleaned.split('\n').count(),
        }
    }

    /// Characters removed.
    #[must_use]
    pub fn chars_removed(&self) -> usize {
        self.original_length.saturating_sub(self.cleaned_length)
    }

    /// Lines removed.
    #[must_use]
    pub fn lines_removed(&self) -> usize {
        self.original_lines.saturating_sub(self.cleaned_lines)
    }

    /// Share of characters removed, in percent, rounded to 2 decimals.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn removal_percentage(&self) -> f64 {
        if self.original_length == 0 {
            return 0.0;
        }
        let pct = self.chars_removed() as f64 / self.original_length as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    }
}

/// Returns true if `line` is a banner, header, footer, exam metadata or
/// section marker line that should be dropped whole.
#[must_use]
pub fn is_noise_line(line: &str) -> bool {
    let line = line.trim();
    LINE_DROP_PATTERNS.iter().any(|pattern| pattern.is_match(line))
}

/// Drops whole noise lines, strips inline publisher noise, removes
/// page-number and blank lines, and collapses runs of spaces.
#[tracing::instrument(skip(raw), fields(input_len = raw.len()))]
#[must_use]
pub fn clean_text(raw: &str) -> String {
    let mut dropped = 0_usize;
    let mut text = raw
        .lines()
        .filter(|line| {
            let noise = is_noise_line(line);
            if noise {
                dropped += 1;
            }
            !noise
        })
        .collect::<Vec<_>>()
        .join("\n");
    for pattern in NOISE_PATTERNS.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }

    let kept: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !PAGE_LINE_PATTERNS.iter().any(|p| p.is_match(line)))
        .map(|line| MULTI_SPACE_PATTERN.replace_all(line, " ").into_owned())
        .collect();

    let cleaned = kept.join("\n").trim().to_string();
    let stats = CleanStats::between(raw, &cleaned);
    debug!(
        chars_removed = stats.chars_removed(),
        lines_removed = stats.lines_removed(),
        removal_percentage = stats.removal_percentage(),
        noise_lines = dropped,
        "Noise removed"
    );
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
    1. What is the atomic number of Carbon?
    a. 6
    b. 12

    www.educatedzone.com
    All MDCAT Study Stuff and Free Preparation
    Download MDCAT Guide App From Play Store
    Helpline 03047418334

    Page 3
    2. Which organ pumps blood?
    a. Liver
    b. Heart
    - 4 -
    For more MCQs visit www.educatedzone.com
    Contact: 0321-1234567
    ";

    #[test]
    fn test_clean_text_removes_noise_and_keeps_questions() {
        let cleaned = clean_text(SAMPLE);
        let lines: Vec<&str> = cleaned.lines().collect();
        assert_eq!(
            lines,
            vec![
                "1. What is the atomic number of Carbon?",
                "a. 6",
                "b. 12",
                "2. Which organ pumps blood?",
                "a. Liver",
                "b. Heart",
            ]
        );
    }

    #[test]
    fn test_clean_text_strips_emails_and_handles() {
        let cleaned = clean_text("Ask help@example.com or @prep_team today");
        assert_eq!(cleaned, "Ask or today");
    }

    #[test]
    fn test_clean_text_drops_standalone_page_numbers_only() {
        let cleaned = clean_text("12\n1) Value of 12 squared?\nPage 2\n-3-");
        assert_eq!(cleaned, "1) Value of 12 squared?");
    }

    #[test]
    fn test_promotional_lines_dropped_whole() {
        let cleaned = clean_text(
            "1) Unit of charge?\nTO Order Call or WhatsApp 0300-1234567 now\nALL MDCAT TOPPERS RECOMMENDS THIS BOOK\nA) Coulomb\nB) Volt",
        );
        assert_eq!(cleaned, "1) Unit of charge?\nA) Coulomb\nB) Volt");
    }

    #[test]
    fn test_header_footer_lines_dropped() {
        for line in [
            "Page 1 of 10",
            "ENTRANCE TEST - 2020",
            "Time Allowed: 150 minutes",
            "Instructions:",
            "Total MCQs: 200 Max. Marks: 200",
            "UNIVERSITY OF HEALTH SCIENCES",
            "(UHS), LAHORE",
        ] {
            assert!(is_noise_line(line), "{line}");
        }
        assert!(!is_noise_line("2. Time taken by light to reach Earth?"));
        assert!(!is_noise_line("Page 3"));
    }

    #[test]
    fn test_exam_metadata_lines_dropped() {
        assert!(is_noise_line("COMPULSORY QUESTION FOR IDENTIFICATION"));
        assert!(is_noise_line(
            "Q-ID. What is the color of your Question Paper? A) Blue B) Green"
        ));
        assert!(is_noise_line("Fill the Circle Corresponding to your answer"));
    }

    #[test]
    fn test_section_markers_dropped_only_when_alone() {
        for line in ["PHYSICS", "  Chemistry ", "LOGICAL REASONING", "NET - MATHEMATICS SECTION", "(NET)"] {
            assert!(is_noise_line(line), "{line}");
        }
        assert!(!is_noise_line("1. Physics deals with matter and energy"));
        assert!(!is_noise_line("NET force on a body"));
    }

    #[test]
    fn test_noise_between_questions_does_not_reach_options() {
        let cleaned = clean_text(
            "1. What is the SI unit of force?\nA) Newton\nB) Joule\nPHYSICS\nPage 1 of 10\n2. Which one is a vector?\nA) Speed\nB) Velocity",
        );
        assert_eq!(
            cleaned,
            "1. What is the SI unit of force?\nA) Newton\nB) Joule\n2. Which one is a vector?\nA) Speed\nB) Velocity"
        );
    }

    #[test]
    fn test_clean_stats() {
        let stats = CleanStats::between("abcd\nefgh", "abcd");
        assert_eq!(stats.chars_removed(), 5);
        assert_eq!(stats.lines_removed(), 1);
        assert!((stats.removal_percentage() - 55.56).abs() < 1e-9);
        assert!(CleanStats::between("", "").removal_percentage().abs() < f64::EPSILON);
    }
}
