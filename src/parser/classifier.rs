//! Question boundary classification.
//!
//! The classifier is a sequential state machine: every line is classified
//! against the state left behind by the line before it, so lines must be fed
//! in strict document order. [`Classifier::step`] is the fold function
//! `(state, line) -> (state', emitted question?)`; the returned [`LineClass`]
//! makes every outcome explicit, including the low-confidence fallbacks where
//! a numbered line is absorbed as body text.
//!
//! Decision order per line (first match wins):
//!
//! 1. Numbered line whose numeral equals the expected counter and whose
//!    leading token matches the reference formatting (when one exists):
//!    opens a new question.
//! 2. Starter-phrase line while no question is open: opens a new question.
//! 3. Non-blank line while a question is open and fewer than the option
//!    budget's worth of choices have been seen: appended to the question.
//! 4. Anything else is noise.
//!
//! The option-row test is then re-applied to update the running option
//! count, whichever branch was taken.

use serde::{Deserialize, Serialize};

use crate::model::{BBox, QuestionRecord, ReferenceFormatting};

use super::accumulator::Accumulator;
use super::lines::Line;
use super::patterns;

/// Tunables for the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Choices' worth of option rows after which body capture stops
    pub option_budget: u32,

    /// Maximum font size difference still matching the reference formatting
    pub font_size_tolerance: f32,

    /// NFKC-normalise line text before pattern tests
    pub normalize_text: bool,
}

impl ClassifierConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the option budget.
    pub fn with_option_budget(mut self, budget: u32) -> Self {
        self.option_budget = budget;
        self
    }

    /// Set the font size tolerance.
    pub fn with_font_size_tolerance(mut self, tolerance: f32) -> Self {
        self.font_size_tolerance = tolerance;
        self
    }

    /// Enable or disable Unicode normalisation of line text.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize_text = normalize;
        self
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            option_budget: 4,
            font_size_tolerance: 1.0,
            normalize_text: true,
        }
    }
}

/// What opened a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingTrigger {
    /// A numeral matching the expected counter
    Numbered,
    /// An interrogative/imperative opening word
    StarterPhrase,
}

/// Why a line was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseReason {
    /// No question has opened yet
    NoOpenQuestion,
    /// Whitespace-only line
    Blank,
    /// The open question already saw its full set of choices
    OptionBudgetExhausted,
}

/// Per-line classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "snake_case")]
pub enum LineClass {
    /// The line starts question `number`.
    NewQuestion {
        number: u32,
        trigger: HeadingTrigger,
    },
    /// Appended to the open question as body text.
    ///
    /// `stray_number` is set when the line carried a numeral that was not
    /// accepted as a heading (counter desync or formatting mismatch).
    Body { stray_number: Option<u32> },
    /// Appended to the open question as an answer-choice row.
    Choice { weight: u32 },
    /// Discarded.
    Noise { reason: NoiseReason },
}

impl LineClass {
    /// Check if the line opened a question.
    pub fn is_new_question(&self) -> bool {
        matches!(self, LineClass::NewQuestion { .. })
    }

    /// Check if the line was appended to the open question.
    pub fn is_appended(&self) -> bool {
        matches!(self, LineClass::Body { .. } | LineClass::Choice { .. })
    }
}

/// Result of feeding one line.
#[derive(Debug, Clone)]
pub struct Step {
    /// How the line was classified
    pub class: LineClass,
    /// The question finalized by this line, if it opened a new one
    pub emitted: Option<QuestionRecord>,
}

/// Classifier state threaded through a document's lines.
#[derive(Debug)]
pub struct Classifier {
    expected_question: u32,
    accumulator: Accumulator,
    reference: Option<ReferenceFormatting>,
    option_count: u32,
    config: ClassifierConfig,
}

impl Classifier {
    /// Create a classifier expecting question 1.
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            expected_question: 1,
            accumulator: Accumulator::new(),
            reference: None,
            option_count: 0,
            config,
        }
    }

    /// Number the next heading must carry.
    pub fn expected_question(&self) -> u32 {
        self.expected_question
    }

    /// Choices seen since the open question started.
    pub fn option_count(&self) -> u32 {
        self.option_count
    }

    /// Formatting captured from the first numbered heading.
    pub fn reference(&self) -> Option<&ReferenceFormatting> {
        self.reference.as_ref()
    }

    /// Check if a question is open.
    pub fn has_open_question(&self) -> bool {
        self.accumulator.is_open()
    }

    /// Classify one line and advance the state.
    pub fn step(&mut self, line: &Line) -> Step {
        let raw = line.text();
        let text = if self.config.normalize_text {
            patterns::normalize(&raw)
        } else {
            raw
        };

        let number = patterns::numbering(&text);
        let starter = patterns::starts_with_starter(&text);
        let option = patterns::option_row(&text);
        let formatting_ok = self.formatting_matches(line);

        let mut emitted = None;
        let class = if number == Some(self.expected_question) && formatting_ok {
            if self.reference.is_none() {
                self.reference = line.leading_token().map(ReferenceFormatting::from_token);
            }
            emitted = self.open_question(line);
            LineClass::NewQuestion {
                number: self.expected_question - 1,
                trigger: HeadingTrigger::Numbered,
            }
        } else if starter && !self.accumulator.is_open() && formatting_ok {
            emitted = self.open_question(line);
            LineClass::NewQuestion {
                number: self.expected_question - 1,
                trigger: HeadingTrigger::StarterPhrase,
            }
        } else if !self.accumulator.is_open() {
            LineClass::Noise {
                reason: NoiseReason::NoOpenQuestion,
            }
        } else if line.is_blank() {
            LineClass::Noise {
                reason: NoiseReason::Blank,
            }
        } else if self.option_count >= self.config.option_budget {
            LineClass::Noise {
                reason: NoiseReason::OptionBudgetExhausted,
            }
        } else {
            self.accumulator.append_line(line);
            match option {
                Some(row) => LineClass::Choice {
                    weight: row.weight(),
                },
                None => LineClass::Body {
                    stray_number: number,
                },
            }
        };

        if let Some(found) = number {
            if !class.is_new_question() {
                log::debug!(
                    "Page {}: numbered line {} not accepted (expecting {}): {:?}",
                    line.page,
                    found,
                    self.expected_question,
                    class
                );
            }
        }

        if let Some(row) = option {
            self.option_count += row.weight();
        }

        Step { class, emitted }
    }

    /// Attach an image to the open question when it sits at or below the
    /// question's heading.
    ///
    /// Returns whether the image was attached.
    pub fn associate_image(&mut self, page: u32, bbox: BBox) -> bool {
        match self.accumulator.open_start() {
            Some(start) if bbox.top >= start.top => self.accumulator.append_image(page, bbox),
            _ => false,
        }
    }

    /// End of document: finalize the open question, if any.
    pub fn finish(mut self) -> Option<QuestionRecord> {
        self.accumulator.finish()
    }

    fn open_question(&mut self, line: &Line) -> Option<QuestionRecord> {
        let number = self.expected_question;
        log::debug!(
            "Page {}: question {} starts at {:.1}: {}",
            line.page,
            number,
            line.bbox().top,
            line.text()
        );
        let previous = self.accumulator.open(number, line);
        self.option_count = 0;
        self.expected_question += 1;
        previous
    }

    /// No reference yet means no formatting constraint.
    fn formatting_matches(&self, line: &Line) -> bool {
        match (&self.reference, line.leading_token()) {
            (None, _) => true,
            (Some(reference), Some(token)) => {
                reference.matches(token, self.config.font_size_tolerance)
            }
            (Some(_), None) => false,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Token;

    fn line_with_font(text: &str, top: f32, font: &str, size: f32) -> Line {
        Line {
            page: 1,
            tokens: vec![Token::new(
                text,
                BBox::new(50.0, top, 50.0 + 6.0 * text.len() as f32, top + 12.0),
                font,
                size,
                1,
            )],
        }
    }

    fn line(text: &str, top: f32) -> Line {
        line_with_font(text, top, "Arial", 12.0)
    }

    #[test]
    fn test_numbered_heading_opens_question() {
        let mut classifier = Classifier::default();
        let step = classifier.step(&line("1. What is X?", 100.0));

        assert_eq!(
            step.class,
            LineClass::NewQuestion {
                number: 1,
                trigger: HeadingTrigger::Numbered
            }
        );
        assert!(step.emitted.is_none());
        assert_eq!(classifier.expected_question(), 2);
        assert_eq!(classifier.reference().unwrap().fontname, "Arial");
    }

    #[test]
    fn test_next_heading_emits_previous() {
        let mut classifier = Classifier::default();
        classifier.step(&line("1. What is X?", 100.0));
        classifier.step(&line("A) foo", 120.0));
        let step = classifier.step(&line("2. What is Y?", 200.0));

        let emitted = step.emitted.unwrap();
        assert_eq!(emitted.number, 1);
        assert_eq!(emitted.content.len(), 2);
        assert_eq!(classifier.option_count(), 0);
    }

    #[test]
    fn test_lines_before_first_question_are_noise() {
        let mut classifier = Classifier::default();
        let step = classifier.step(&line("Instructions: answer all", 50.0));
        assert_eq!(
            step.class,
            LineClass::Noise {
                reason: NoiseReason::NoOpenQuestion
            }
        );
    }

    #[test]
    fn test_counter_desync_is_body_not_heading() {
        let mut classifier = Classifier::default();
        classifier.step(&line("1. What is X?", 100.0));
        classifier.step(&line("2. What is Y?", 150.0));

        let step = classifier.step(&line("5. Which of these applies?", 200.0));
        assert_eq!(
            step.class,
            LineClass::Body {
                stray_number: Some(5)
            }
        );
        assert!(step.emitted.is_none());
        assert_eq!(classifier.expected_question(), 3);
    }

    #[test]
    fn test_lower_number_is_absorbed() {
        let mut classifier = Classifier::default();
        classifier.step(&line("1. What is X?", 100.0));
        let step = classifier.step(&line("1. What is X again?", 120.0));
        assert_eq!(
            step.class,
            LineClass::Body {
                stray_number: Some(1)
            }
        );
    }

    #[test]
    fn test_formatting_mismatch_rejects_heading() {
        let mut classifier = Classifier::default();
        classifier.step(&line_with_font("1. What is X?", 100.0, "Arial-Bold", 12.0));

        let wrong_font = classifier.step(&line_with_font("2 apples and pears", 120.0, "Arial", 12.0));
        assert_eq!(
            wrong_font.class,
            LineClass::Body {
                stray_number: Some(2)
            }
        );

        let close_size =
            classifier.step(&line_with_font("2. What is Y?", 200.0, "Arial-Bold", 12.8));
        assert!(close_size.class.is_new_question());
    }

    #[test]
    fn test_starter_phrase_only_opens_first_question() {
        let mut classifier = Classifier::default();
        let first = classifier.step(&line("Which of the following is a mammal?", 100.0));
        assert_eq!(
            first.class,
            LineClass::NewQuestion {
                number: 1,
                trigger: HeadingTrigger::StarterPhrase
            }
        );
        assert!(classifier.reference().is_none());

        let second = classifier.step(&line("What is the boiling point here?", 150.0));
        assert_eq!(second.class, LineClass::Body { stray_number: None });
    }

    #[test]
    fn test_reference_captured_after_starter_phrase_heading() {
        let mut classifier = Classifier::default();
        let first = classifier.step(&line("Which of these is a prime number?", 100.0));
        assert!(first.class.is_new_question());
        assert!(classifier.reference().is_none());

        let second = classifier.step(&line_with_font("2. What is Y?", 150.0, "Courier", 10.0));
        assert_eq!(
            second.class,
            LineClass::NewQuestion {
                number: 2,
                trigger: HeadingTrigger::Numbered
            }
        );
        assert_eq!(second.emitted.map(|q| q.number), Some(1));
        let reference = classifier.reference().unwrap();
        assert_eq!(reference.fontname, "Courier");
        assert_eq!(reference.size, 10.0);

        let third = classifier.step(&line("3. What is Z?", 200.0));
        assert_eq!(
            third.class,
            LineClass::Body {
                stray_number: Some(3)
            }
        );
        assert_eq!(classifier.expected_question(), 3);
    }

    #[test]
    fn test_option_budget_caps_body() {
        let mut classifier = Classifier::default();
        classifier.step(&line("1. What is X?", 100.0));
        for (i, text) in ["A) foo", "B) bar", "C) baz", "D) qux"].iter().enumerate() {
            let step = classifier.step(&line(text, 120.0 + 15.0 * i as f32));
            assert_eq!(step.class, LineClass::Choice { weight: 1 });
        }
        assert_eq!(classifier.option_count(), 4);

        let step = classifier.step(&line("Preamble for the next question", 200.0));
        assert_eq!(
            step.class,
            LineClass::Noise {
                reason: NoiseReason::OptionBudgetExhausted
            }
        );
    }

    #[test]
    fn test_four_choice_row_fills_budget_at_once() {
        let mut classifier = Classifier::default();
        classifier.step(&line("1. What is X?", 100.0));
        let step = classifier.step(&line("A) 1 B) 2 C) 3 D) 4", 120.0));
        assert_eq!(step.class, LineClass::Choice { weight: 4 });
        assert_eq!(classifier.option_count(), 4);
    }

    #[test]
    fn test_blank_line_is_noise() {
        let mut classifier = Classifier::default();
        classifier.step(&line("1. What is X?", 100.0));
        let step = classifier.step(&line("   ", 120.0));
        assert_eq!(
            step.class,
            LineClass::Noise {
                reason: NoiseReason::Blank
            }
        );
    }

    #[test]
    fn test_image_association() {
        let mut classifier = Classifier::default();
        assert!(!classifier.associate_image(1, BBox::new(0.0, 300.0, 100.0, 400.0)));

        classifier.step(&line("1. What is X?", 100.0));
        assert!(!classifier.associate_image(1, BBox::new(0.0, 50.0, 100.0, 90.0)));
        assert!(classifier.associate_image(1, BBox::new(0.0, 100.0, 100.0, 180.0)));

        let record = classifier.finish().unwrap();
        assert_eq!(record.image_count(), 1);
        assert_eq!(record.end_bbox.bottom, 180.0);
    }

    #[test]
    fn test_full_width_numeral_with_normalization() {
        let mut classifier = Classifier::default();
        let step = classifier.step(&line("１． What is X?", 100.0));
        assert!(step.class.is_new_question());

        let mut raw = Classifier::new(ClassifierConfig::new().with_normalization(false));
        let step = raw.step(&line("１． What is X?", 100.0));
        assert!(!step.class.is_new_question());
    }
}
