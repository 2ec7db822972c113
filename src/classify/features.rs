//! Structural feature detection on question text.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static FORMULA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[=+\-*/^√∫∑∆πλθαβγ]|\\frac|\\sqrt").expect("formula regex is valid")
});

#[allow(clippy::expect_used)]
static CALCULATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\s*[+\-×÷*/]\s*\d+|=\s*\d+").expect("calculation regex is valid")
});

/// Returns true if `text` contains a formula symbol or LaTeX fraction/root.
#[must_use]
pub fn has_formulas(text: &str) -> bool {
    FORMULA_PATTERN.is_match(text)
}

/// Returns true if `text` contains an arithmetic expression such as `3 + 4`
/// or an assignment to a number such as `= 9`.
#[must_use]
pub fn has_calculations(text: &str) -> bool {
    CALCULATION_PATTERN.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_formulas() {
        assert!(has_formulas("F = ma"));
        assert!(has_formulas("angle θ between vectors"));
        assert!(has_formulas(r"\frac{1}{2} m v"));
        assert!(!has_formulas("Name the capital of France"));
    }

    #[test]
    fn test_has_calculations() {
        assert!(has_calculations("What is 12 × 3?"));
        assert!(has_calculations("If x = 5, find y"));
        assert!(has_calculations("6/2"));
        assert!(!has_calculations("Define velocity"));
        assert!(!has_calculations("x = y"));
    }
}
