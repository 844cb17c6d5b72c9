//! Dictionary provider: accepted guesses and the target pool

use crate::core::Word;
use rand::Rng;
use rustc_hash::FxHashSet;
use std::fmt;

/// Read-only word source consulted by the game session
pub trait Dictionary {
    /// Whether `word` is an accepted guess
    fn is_valid(&self, word: &Word) -> bool;

    /// Draw a target word uniformly at random from the target pool
    fn pick_target(&self) -> Word;
}

/// Error type for dictionary construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    EmptyTargetPool,
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTargetPool => write!(f, "Target word pool is empty"),
        }
    }
}

impl std::error::Error for DictionaryError {}

/// Dictionary backed by in-memory word lists
///
/// Every target word is also an accepted guess.
#[derive(Debug, Clone)]
pub struct WordList {
    targets: Vec<Word>,
    accepted: FxHashSet<Word>,
}

impl WordList {
    /// Build a dictionary from a target pool plus extra accepted guesses
    ///
    /// # Errors
    /// Returns `DictionaryError::EmptyTargetPool` if `targets` is empty.
    ///
    /// # Examples
    /// ```
    /// use turbl::core::Word;
    /// use turbl::wordlists::{Dictionary, WordList};
    ///
    /// let targets = vec![Word::new("crane").unwrap()];
    /// let extra = vec![Word::new("slate").unwrap()];
    /// let dict = WordList::new(targets, extra).unwrap();
    ///
    /// assert!(dict.is_valid(&Word::new("SLATE").unwrap()));
    /// assert_eq!(dict.pick_target().as_str(), "crane");
    /// ```
    pub fn new(
        targets: Vec<Word>,
        extra_guesses: impl IntoIterator<Item = Word>,
    ) -> Result<Self, DictionaryError> {
        if targets.is_empty() {
            return Err(DictionaryError::EmptyTargetPool);
        }

        let mut accepted: FxHashSet<Word> = targets.iter().cloned().collect();
        accepted.extend(extra_guesses);

        Ok(Self { targets, accepted })
    }

    #[must_use]
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }
}

impl Dictionary for WordList {
    fn is_valid(&self, word: &Word) -> bool {
        self.accepted.contains(word)
    }

    fn pick_target(&self) -> Word {
        let index = rand::rng().random_range(0..self.targets.len());
        self.targets[index].clone()
    }
}
