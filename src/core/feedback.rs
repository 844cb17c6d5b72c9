//! Per-letter feedback for a committed guess
//!
//! Each position of a guess is classified as one of:
//! - Missing (letter not in the target)
//! - Found (letter in the target, different position)
//! - Matched (letter in the correct position)
//!
//! The variants are declared in rank order so that `Ord` gives
//! Missing < Found < Matched, and `Option<Feedback>` ranks an unknown
//! (`None`) letter below all of them.

use super::word::{WORD_LEN, Word};
use serde::{Deserialize, Serialize};

/// Classification of one letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feedback {
    Missing,
    Found,
    Matched,
}

/// How repeated letters in a guess are classified
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationRule {
    /// Every position is judged on its own: a letter present anywhere in the
    /// target is Found (or Matched), however many times it is repeated.
    #[default]
    Naive,
    /// Wordle rules: matches are taken first, then Found marks are limited to
    /// the number of unmatched occurrences left in the target.
    Strict,
}

/// Classify every position of `guess` against `target`
///
/// # Examples
/// ```
/// use turbl::core::{ClassificationRule, Feedback, Word, classify};
///
/// let guess = Word::new("slate").unwrap();
/// let target = Word::new("crane").unwrap();
/// let feedback = classify(&guess, &target, ClassificationRule::Naive);
///
/// use Feedback::{Matched, Missing};
/// assert_eq!(feedback, [Missing, Missing, Matched, Missing, Matched]);
/// ```
#[must_use]
pub fn classify(guess: &Word, target: &Word, rule: ClassificationRule) -> [Feedback; WORD_LEN] {
    match rule {
        ClassificationRule::Naive => classify_naive(guess, target),
        ClassificationRule::Strict => classify_strict(guess, target),
    }
}

fn classify_naive(guess: &Word, target: &Word) -> [Feedback; WORD_LEN] {
    let mut result = [Feedback::Missing; WORD_LEN];

    for (i, (&letter, &expected)) in guess.chars().iter().zip(target.chars()).enumerate() {
        if target.has_letter(letter) {
            result[i] = if letter == expected {
                Feedback::Matched
            } else {
                Feedback::Found
            };
        }
    }

    result
}

fn classify_strict(guess: &Word, target: &Word) -> [Feedback; WORD_LEN] {
    let mut result = [Feedback::Missing; WORD_LEN];
    let mut target_available = target.char_counts();

    // First pass: exact position matches
    for (i, (&letter, &expected)) in guess.chars().iter().zip(target.chars()).enumerate() {
        if letter == expected {
            result[i] = Feedback::Matched;
            if let Some(count) = target_available.get_mut(&letter) {
                *count = count.saturating_sub(1);
            }
        }
    }

    // Second pass: present elsewhere, from the remaining pool
    for (i, &letter) in guess.chars().iter().enumerate() {
        if result[i] == Feedback::Matched {
            continue;
        }
        if let Some(count) = target_available.get_mut(&letter)
            && *count > 0
        {
            result[i] = Feedback::Found;
            *count -= 1;
        }
    }

    result
}
