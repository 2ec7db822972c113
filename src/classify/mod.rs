//! Subject, topic and difficulty classification.
//!
//! Classification is pure keyword counting over the question header and
//! option texts. There is no model and no learned weighting: each distinct
//! keyword found as a substring adds one point, the highest score wins, and
//! ties go to whichever label was declared first.

mod difficulty;
mod features;
mod vocabulary;

pub use difficulty::{BandTable, DifficultyBand, score_difficulty};
pub use features::{has_calculations, has_formulas};
pub use vocabulary::{default_subjects, default_topics};

use std::collections::HashMap;

use tracing::debug;

/// Subject assigned when no vocabulary scores above zero.
pub const GENERAL_SUBJECT: &str = "general";

/// Maximum number of matched topic keywords reported as tags.
pub const MAX_TOPIC_TAGS: usize = 5;

/// Ordered label → keyword sets. Declaration order breaks ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordVocabulary {
    entries: Vec<(String, Vec<String>)>,
}

/// Best-scoring label of a vocabulary lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    /// Winning label
    pub label: String,
    /// Number of distinct keywords found
    pub score: usize,
    /// Keywords found, in vocabulary order
    pub matched: Vec<String>,
}

impl KeywordVocabulary {
    /// Creates an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a label with its keywords.
    ///
    /// Keywords are lowercased and de-duplicated. Re-declaring a label
    /// extends its keyword set without changing its precedence.
    #[must_use]
    pub fn with_entry<I, S>(mut self, label: &str, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let index = match self.entries.iter().position(|(l, _)| l == label) {
            Some(index) => index,
            None => {
                self.entries.push((label.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };

        let set = &mut self.entries[index].1;
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !set.contains(&keyword) {
                set.push(keyword);
            }
        }
        self
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    /// Keywords registered for `label`.
    #[must_use]
    pub fn keywords(&self, label: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, keywords)| keywords.as_slice())
    }

    /// Returns true when no labels are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scores `text` (expected lowercase) against every label.
    ///
    /// Returns `None` when no label scores above zero.
    #[must_use]
    pub fn best_match(&self, text: &str) -> Option<KeywordMatch> {
        let mut best: Option<KeywordMatch> = None;
        for (label, keywords) in &self.entries {
            let matched: Vec<String> = keywords
                .iter()
                .filter(|keyword| text.contains(keyword.as_str()))
                .cloned()
                .collect();
            let score = matched.len();
            if score > best.as_ref().map_or(0, |b| b.score) {
                best = Some(KeywordMatch {
                    label: label.clone(),
                    score,
                    matched,
                });
            }
        }
        best
    }
}

/// Vocabularies used by [`SubjectClassifier`].
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Subject vocabulary
    pub subjects: KeywordVocabulary,
    /// Topic vocabularies keyed by subject label
    pub topics: HashMap<String, KeywordVocabulary>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            subjects: default_subjects(),
            topics: default_topics(),
        }
    }
}

/// Subject and topic assigned to one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Winning subject, or [`GENERAL_SUBJECT`]
    pub subject: String,
    /// Winning topic within the subject, if any keyword matched
    pub topic: Option<String>,
    /// Up to [`MAX_TOPIC_TAGS`] matched topic keywords
    pub tags: Vec<String>,
}

/// Assigns subject and topic labels by keyword counting.
#[derive(Debug, Clone, Default)]
pub struct SubjectClassifier {
    config: ClassifierConfig,
}

impl SubjectClassifier {
    /// Creates a classifier over the given vocabularies.
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Vocabularies in use.
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classifies a question from its header and option texts.
    #[must_use]
    pub fn classify<'a>(
        &self,
        header: &str,
        options: impl IntoIterator<Item = &'a str>,
    ) -> Classification {
        let mut text = header.to_lowercase();
        for option in options {
            text.push(' ');
            text.push_str(&option.to_lowercase());
        }

        let Some(subject) = self.config.subjects.best_match(&text) else {
            return Classification {
                subject: GENERAL_SUBJECT.to_string(),
                topic: None,
                tags: Vec::new(),
            };
        };

        let topic = self
            .config
            .topics
            .get(&subject.label)
            .and_then(|topics| topics.best_match(&text));

        debug!(
            subject = %subject.label,
            subject_score = subject.score,
            topic = topic.as_ref().map(|t| t.label.as_str()),
            "Classified question"
        );

        match topic {
            Some(topic) => Classification {
                subject: subject.label,
                topic: Some(topic.label),
                tags: topic.matched.into_iter().take(MAX_TOPIC_TAGS).collect(),
            },
            None => Classification {
                subject: subject.label,
                topic: None,
                tags: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn vocab() -> KeywordVocabulary {
        KeywordVocabulary::new()
            .with_entry("alpha", ["one", "two"])
            .with_entry("beta", ["three", "one"])
    }

    #[test]
    fn test_with_entry_lowercases_and_dedups() {
        let vocab = KeywordVocabulary::new().with_entry("bio", ["DNA", "dna", " Gene "]);
        assert_eq!(
            vocab.keywords("bio").unwrap(),
            &["dna".to_string(), "gene".to_string()]
        );
    }

    #[test]
    fn test_with_entry_redeclared_label_keeps_position() {
        let vocab = vocab().with_entry("alpha", ["four"]);
        assert_eq!(vocab.labels().collect::<Vec<_>>(), vec!["alpha", "beta"]);
        assert_eq!(vocab.keywords("alpha").unwrap().len(), 3);
    }

    #[test]
    fn test_best_match_tie_goes_to_first_declared() {
        let found = vocab().best_match("only one here").unwrap();
        assert_eq!(found.label, "alpha");
        assert_eq!(found.score, 1);
    }

    #[test]
    fn test_best_match_strictly_higher_score_wins() {
        let found = vocab().best_match("one and three").unwrap();
        assert_eq!(found.label, "beta");
        assert_eq!(found.matched, vec!["three".to_string(), "one".to_string()]);
    }

    #[test]
    fn test_best_match_zero_score_is_none() {
        assert!(vocab().best_match("nothing relevant").is_none());
        assert!(KeywordVocabulary::new().best_match("one").is_none());
    }

    #[test]
    fn test_classify_physics_with_topic_and_tags() {
        let classifier = SubjectClassifier::default();
        let result = classifier.classify(
            "A force acting on a mass produces acceleration; find the velocity",
            ["2 m/s", "4 m/s"],
        );
        assert_eq!(result.subject, "physics");
        assert_eq!(result.topic.as_deref(), Some("mechanics"));
        assert_eq!(result.tags, vec!["force", "velocity", "acceleration", "mass"]);
    }

    #[test]
    fn test_classify_uses_option_text() {
        let classifier = SubjectClassifier::default();
        let result = classifier.classify("Which of these is correct?", ["mitochondria", "ribosome"]);
        assert_eq!(result.subject, "biology");
        assert_eq!(result.topic.as_deref(), Some("cell"));
    }

    #[test]
    fn test_classify_uppercase_keyword_matches_lowercased_text() {
        let classifier = SubjectClassifier::default();
        let result = classifier.classify("DNA and RNA carry genetic code", ["yes", "no"]);
        assert_eq!(result.subject, "biology");
        assert_eq!(result.topic.as_deref(), Some("genetics"));
    }

    #[test]
    fn test_classify_falls_back_to_general() {
        let classifier = SubjectClassifier::default();
        let result = classifier.classify("Who wrote this?", ["x", "y"]);
        assert_eq!(result.subject, GENERAL_SUBJECT);
        assert_eq!(result.topic, None);
        assert!(result.tags.is_empty());
    }

    #[test]
    fn test_classify_tags_capped() {
        let config = ClassifierConfig {
            subjects: KeywordVocabulary::new().with_entry("s", ["a"]),
            topics: HashMap::from([(
                "s".to_string(),
                KeywordVocabulary::new().with_entry("t", ["a", "b", "c", "d", "e", "f", "g"]),
            )]),
        };
        let result = SubjectClassifier::new(config).classify("abcdefg", Vec::<&str>::new());
        assert_eq!(result.topic.as_deref(), Some("t"));
        assert_eq!(result.tags.len(), MAX_TOPIC_TAGS);
        assert_eq!(result.tags, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_classify_subject_without_topic_table() {
        let config = ClassifierConfig {
            subjects: KeywordVocabulary::new().with_entry("urdu", ["ghazal"]),
            topics: HashMap::new(),
        };
        let result = SubjectClassifier::new(config).classify("Define ghazal", ["a", "b"]);
        assert_eq!(result.subject, "urdu");
        assert_eq!(result.topic, None);
    }
}
