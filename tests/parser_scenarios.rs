//! Integration tests for the parsing core.
//!
//! These tests run realistic paper fragments through the public
//! [`Pipeline`] and check the records it emits.

use pastpaper_core::{ExamType, OptionLetters, ParserConfig, Pipeline, PipelineConfig, clean_text};

fn pipeline() -> Pipeline {
    Pipeline::new(PipelineConfig::default())
}

/// Test the lowercase dot-style paper with no answer key.
#[test]
fn test_dot_style_question_without_answer() {
    let text = "1. What is the atomic number of Carbon?\na. 6\nb. 12\nc. 14\nd. 16\n";

    let result = pipeline().parse_document(text, "chemistry_practice.txt");

    assert_eq!(result.questions.len(), 1);
    assert_eq!(result.rejected_blocks, 0);
    let question = &result.questions[0];
    assert_eq!(question.number(), 1);
    assert_eq!(question.text(), "What is the atomic number of Carbon?");
    let labels: Vec<char> = question.options().iter().map(|o| o.label).collect();
    assert_eq!(labels, vec!['A', 'B', 'C', 'D']);
    assert_eq!(question.correct_answer(), None);
    assert!(question.options().iter().all(|o| o.is_correct.is_none()));
}

/// Test that a `(Correct)` marker is stripped and recorded as the answer.
#[test]
fn test_inline_correct_marker() {
    let text = "3) What is the capital of France?\nA) Berlin\nB) Madrid\nC) Paris (Correct)\nD) Rome\n";

    let result = pipeline().parse_document(text, "general.txt");

    let question = &result.questions[0];
    assert_eq!(question.correct_answer(), Some('C'));
    assert_eq!(question.options()[2].text, "Paris");
    assert_eq!(question.options()[2].is_correct, Some(true));
    assert_eq!(question.options()[0].is_correct, Some(false));
    assert_eq!(question.correct_option_text(), Some("Paris"));
}

/// Test that a block with a single option is dropped and counted.
#[test]
fn test_single_option_block_rejected() {
    let text = "\
1. Which one is a noble gas?
A. Neon
2. Which one is a metal?
A. Iron
B. Oxygen
";

    let result = pipeline().parse_document(text, "paper.txt");

    assert_eq!(result.questions.len(), 1);
    assert_eq!(result.questions[0].number(), 2);
    assert_eq!(result.rejected_blocks, 1);
}

/// Test that an `Answer:` line after the options opens the solution.
#[test]
fn test_answer_line_becomes_solution() {
    let text = "\
Q1 Which particle carries negative charge?
A. Proton
B. Electron
C. Neutron
D. Photon
Answer: B
Electrons orbit the nucleus.
Q2 Next question here?
A. one
B. two
";

    let result = pipeline().parse_document(text, "paper.txt");

    assert_eq!(result.questions.len(), 2);
    assert_eq!(
        result.questions[0].solution(),
        Some("B Electrons orbit the nucleus.")
    );
    assert_eq!(result.questions[1].solution(), None);
}

/// Test that multi-line headers and options are joined.
#[test]
fn test_continuation_lines_are_joined() {
    let text = "\
5. A body moving with constant velocity
has zero acceleration because
A. net force on it
is zero
B. its mass is zero
";

    let result = pipeline().parse_document(text, "paper.txt");

    let question = &result.questions[0];
    assert_eq!(
        question.text(),
        "A body moving with constant velocity has zero acceleration because"
    );
    assert_eq!(question.options()[0].text, "net force on it is zero");
}

/// Test exam type, year and identifier inference from the file name.
#[test]
fn test_source_inference_and_ids() {
    let text = "12) Which quantity measures velocity change per unit time?\nA) Acceleration\nB) Momentum\nC) Kinetic energy\nD) Friction\n";

    let result = pipeline().parse_document(text, "NUST_NET_2021_paper.txt");

    let question = &result.questions[0];
    assert_eq!(question.id(), "NET_2021_Q012");
    assert_eq!(question.exam_type(), ExamType::Net);
    assert_eq!(question.year(), Some(2021));
    assert_eq!(question.source_file(), "NUST_NET_2021_paper.txt");
    assert_eq!(question.subject(), "physics");
}

/// Test that exam/date tags are removed from question text.
#[test]
fn test_exam_tags_stripped_from_text() {
    let text = "7. What is inertia? NET-2 (12-Jul-2020)\nA. resistance to change\nB. a force\n";

    let result = pipeline().parse_document(text, "net.txt");

    assert_eq!(result.questions[0].text(), "What is inertia?");
}

/// Test that labels stay unique when a label repeats in one block.
#[test]
fn test_repeated_label_last_write_wins() {
    let text = "1. Pick one\nA. first\nB. second\nA. replaced\n";

    let result = pipeline().parse_document(text, "paper.txt");

    let options = result.questions[0].options();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].label, 'A');
    assert_eq!(options[0].text, "replaced");
}

/// Test that the option letter range is configurable.
#[test]
fn test_extended_option_letters() {
    let text = "1. Pick the odd one\nA. 2\nB. 4\nC. 6\nD. 8\nE. 9\n";

    let default = pipeline().parse_document(text, "paper.txt");
    assert_eq!(default.questions[0].options().len(), 4);
    assert_eq!(default.questions[0].options()[3].text, "8 E. 9");

    let extended = Pipeline::new(PipelineConfig {
        parser: ParserConfig {
            option_letters: OptionLetters::new('A', 'E').unwrap(),
        },
        ..PipelineConfig::default()
    })
    .parse_document(text, "paper.txt");
    assert_eq!(extended.questions[0].options().len(), 5);
}

/// Test invariants over a larger mixed document.
#[test]
fn test_invariants_over_mixed_document() {
    let text = "\
Some preamble text that is not a question.
1) What is the SI unit of force?
A) Newton
B) Joule
C) Watt
D) Pascal (Correct)
2) Orphan header with no options
3) Which organelle performs photosynthesis?
a. Chloroplast (Correct)
b. Mitochondria
Solution: Chloroplasts contain chlorophyll.
4. Solve for x if 2x + 3 = 7
A. 1
B. 2
";

    let first = pipeline().parse_document(text, "MDCAT_2019.txt");
    let second = pipeline().parse_document(text, "MDCAT_2019.txt");

    assert_eq!(first.questions, second.questions);
    assert_eq!(first.rejected_blocks, 1);
    assert_eq!(first.questions.len(), 3);
    for question in &first.questions {
        assert!(question.options().len() >= 2);
        assert!(!question.text().trim().is_empty());
        assert!((1.0..=10.0).contains(&question.difficulty_score()));
        let mut labels: Vec<char> = question.options().iter().map(|o| o.label).collect();
        assert!(labels.iter().all(char::is_ascii_uppercase));
        labels.dedup();
        assert_eq!(labels.len(), question.options().len());
    }
    assert_eq!(first.questions[1].subject(), "biology");
    assert!(first.questions[2].has_calculations() || first.questions[2].has_formulas());
}

/// Test that section markers and page footers between questions are
/// cleaned away instead of being glued onto the last option.
#[test]
fn test_cleaned_noise_lines_stay_out_of_options() {
    let raw = "\
1. What is the SI unit of force?
A) Newton
B) Joule
PHYSICS
Page 1 of 10
2. Which one is a vector quantity?
A) Speed
B) Velocity
";

    let result = pipeline().parse_document(&clean_text(raw), "paper.txt");

    assert_eq!(result.questions.len(), 2);
    assert_eq!(result.questions[0].options()[1].text, "Joule");
    assert_eq!(result.questions[1].options()[1].text, "Velocity");
}

/// Test that a document with no questions yields an empty result.
#[test]
fn test_document_without_questions() {
    let result = pipeline().parse_document("just some notes\nno questions here\n", "notes.txt");

    assert!(result.questions.is_empty());
    assert_eq!(result.rejected_blocks, 0);
    assert_eq!(result.summary().total_questions, 0);
}
