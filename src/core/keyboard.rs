//! Best-known feedback per letter, used to color the keyboard

use super::feedback::Feedback;

const ALPHABET_LEN: usize = 26;

/// Key feedback aggregator
///
/// A pure reducer over `(letter, feedback)` pairs: each letter keeps the
/// highest-ranked feedback it has received. `None` means the letter has not
/// been guessed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFeedback {
    best: [Option<Feedback>; ALPHABET_LEN],
}

impl KeyFeedback {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classification into the aggregate and return the letter's
    /// resulting best feedback
    ///
    /// Letters outside `a-z` are ignored.
    ///
    /// # Examples
    /// ```
    /// use turbl::core::{Feedback, KeyFeedback};
    ///
    /// let mut keys = KeyFeedback::new();
    /// keys.record(b'e', Feedback::Matched);
    /// keys.record(b'e', Feedback::Missing);
    /// assert_eq!(keys.get(b'e'), Some(Feedback::Matched));
    /// ```
    pub fn record(&mut self, letter: u8, feedback: Feedback) -> Option<Feedback> {
        let slot = self.best.get_mut(index_of(letter)?)?;
        *slot = (*slot).max(Some(feedback));
        *slot
    }

    /// Best feedback recorded for `letter`, or `None` if unknown
    #[must_use]
    pub fn get(&self, letter: u8) -> Option<Feedback> {
        index_of(letter).and_then(|i| self.best[i])
    }

    /// Letters with known feedback, in alphabetical order
    #[must_use]
    pub fn snapshot(&self) -> Vec<(char, Feedback)> {
        (b'a'..=b'z')
            .zip(self.best.iter())
            .filter_map(|(letter, best)| best.map(|fb| (char::from(letter), fb)))
            .collect()
    }
}

fn index_of(letter: u8) -> Option<usize> {
    let lower = letter.to_ascii_lowercase();
    lower.is_ascii_lowercase().then(|| usize::from(lower - b'a'))
}
