//! Text pattern tests applied to every assembled line.
//!
//! The three tests are independent of each other and of classifier state:
//! numbering (`12.` / `12 `), starter phrase (an interrogative or imperative
//! opening word) and option row (lettered answer choices).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Leading integer followed by a period or whitespace.
static NUMBERING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)[.\s]").unwrap());

/// Closed set of words that open a question without a numeral. Whole words
/// only: "Theory" does not match "the".
static STARTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:which|what|how|why|where|when|whose|who|in|the|if|define|state|calculate)\b",
    )
    .unwrap()
});

/// A lettered choice marker: `A.`, `B)`, `(C)`.
static CHOICE_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)\(?[A-D][.)]").unwrap());

/// Line opens with a lettered choice marker.
static LEADING_CHOICE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\(?[A-D][.)]").unwrap());

/// Bare answer-grid header.
static BARE_CHOICES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:A B C D|ABCD)\s*$").unwrap());

/// Starter phrases only count on lines longer than this many words.
const STARTER_MIN_WORDS: usize = 3;

/// Kind of option row, ordered from widest to narrowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionRow {
    /// "A B C D" or "ABCD"
    Bare,
    /// Four lettered choices on one line
    Four,
    /// Two or three lettered choices on one line
    Pair,
    /// A single lettered choice
    Single,
}

impl OptionRow {
    /// How many choices this row contributes to the running option count.
    pub fn weight(self) -> u32 {
        match self {
            OptionRow::Bare | OptionRow::Four => 4,
            OptionRow::Pair => 2,
            OptionRow::Single => 1,
        }
    }
}

/// Extract the leading question numeral, if the line starts with one.
///
/// Numerals too large for `u32` are treated as no match.
pub fn numbering(text: &str) -> Option<u32> {
    NUMBERING_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Check whether the line opens with a starter word and is long enough.
pub fn starts_with_starter(text: &str) -> bool {
    STARTER_REGEX.is_match(text) && text.split_whitespace().count() > STARTER_MIN_WORDS
}

/// Classify the line as an option row.
pub fn option_row(text: &str) -> Option<OptionRow> {
    if BARE_CHOICES_REGEX.is_match(text) {
        return Some(OptionRow::Bare);
    }
    if !LEADING_CHOICE_REGEX.is_match(text) {
        return None;
    }

    match CHOICE_MARKER_REGEX.find_iter(text).count() {
        0 => None,
        1 => Some(OptionRow::Single),
        2 | 3 => Some(OptionRow::Pair),
        _ => Some(OptionRow::Four),
    }
}

/// NFKC-normalise text so full-width digits and letters test as ASCII.
pub fn normalize(text: &str) -> String {
    text.nfkc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering() {
        assert_eq!(numbering("1. What is X?"), Some(1));
        assert_eq!(numbering("  12 Which of"), Some(12));
        assert_eq!(numbering("40.Define"), Some(40));
        assert_eq!(numbering("12"), None);
        assert_eq!(numbering("1a. nope"), None);
        assert_eq!(numbering("Q1. nope"), None);
        assert_eq!(numbering("99999999999. overflow"), None);
    }

    #[test]
    fn test_starter_requires_whole_word_and_length() {
        assert!(starts_with_starter("Which of the following is true?"));
        assert!(starts_with_starter("define the term osmosis here"));
        assert!(!starts_with_starter("What is X?"));
        assert!(!starts_with_starter("Theory of everything is long"));
        assert!(!starts_with_starter("Instructions: answer every question below"));
        assert!(!starts_with_starter("Whichever choice you make counts"));
        assert!(!starts_with_starter("Answer the following questions now"));
    }

    #[test]
    fn test_option_rows() {
        assert_eq!(option_row("A) foo"), Some(OptionRow::Single));
        assert_eq!(option_row("(B) bar"), Some(OptionRow::Single));
        assert_eq!(option_row("A. 12 B. 14"), Some(OptionRow::Pair));
        assert_eq!(
            option_row("A) 1 B) 2 C) 3 D) 4"),
            Some(OptionRow::Four)
        );
        assert_eq!(option_row("A B C D"), Some(OptionRow::Bare));
        assert_eq!(option_row("ABCD"), Some(OptionRow::Bare));
        assert_eq!(option_row("1. What is X?"), None);
        assert_eq!(option_row("E) not a choice"), None);
        assert_eq!(option_row("Vitamin A) deficiency"), None);
    }

    #[test]
    fn test_option_weights() {
        assert_eq!(OptionRow::Bare.weight(), 4);
        assert_eq!(OptionRow::Four.weight(), 4);
        assert_eq!(OptionRow::Pair.weight(), 2);
        assert_eq!(OptionRow::Single.weight(), 1);
    }

    #[test]
    fn test_normalize_full_width() {
        assert_eq!(normalize("１．Ｗｈａｔ"), "1.What");
        assert_eq!(numbering(&normalize("３． Which")), Some(3));
    }
}
