//! Terminal output
//!
//! Display utilities for the text front end and the audio cue players.

pub mod display;
pub mod formatters;
pub mod sound;

pub use display::{message_text, print_board, print_keyboard, print_message};
pub use sound::{BellPlayer, CuePlayer, LoggingPlayer};
