//! Word lists and the dictionary provider
//!
//! Provides embedded word lists compiled into the binary for zero-cost access,
//! plus the `Dictionary` the game session validates guesses against.

mod dictionary;
mod embedded;
pub mod loader;

pub use dictionary::{Dictionary, DictionaryError, WordList};
pub use embedded::{ALLOWED, ALLOWED_COUNT, ANSWERS, ANSWERS_COUNT};

use loader::words_from_slice;

/// Dictionary over the embedded lists: every answer is a possible target,
/// answers plus allowed words are accepted guesses
///
/// # Errors
/// Returns `DictionaryError::EmptyTargetPool` if the embedded answer list is empty.
pub fn embedded_dictionary() -> Result<WordList, DictionaryError> {
    WordList::new(words_from_slice(ANSWERS), words_from_slice(ALLOWED))
}
