//! Core domain types
//!
//! Words, per-letter classification and the keyboard feedback aggregator.
//! Everything here is pure and has no I/O.

mod feedback;
mod keyboard;
mod word;

pub use feedback::{ClassificationRule, Feedback, classify};
pub use keyboard::KeyFeedback;
pub use word::{WORD_LEN, Word, WordError};
