//! Turbl
//!
//! A five-letter word guessing game: five attempts to find a hidden word, with
//! per-letter feedback on every guess. The game logic is a pure state machine
//! that turns inputs into effects; the TUI and text front ends render them.
//!
//! # Quick Start
//!
//! ```rust
//! use turbl::core::{ClassificationRule, Feedback, Word, classify};
//!
//! let guess = Word::new("slate").unwrap();
//! let target = Word::new("crane").unwrap();
//!
//! let feedback = classify(&guess, &target, ClassificationRule::Naive);
//! assert_eq!(feedback[4], Feedback::Matched);
//! ```

// Core domain types
pub mod core;

// Game session state machine
pub mod game;

// Word lists and dictionary
pub mod wordlists;

// Settings file and keyboard layout
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

// Start-game relay over TCP
pub mod relay;
