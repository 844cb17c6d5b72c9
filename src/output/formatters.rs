//! Formatting utilities for terminal output

use crate::core::Feedback;
use crate::game::GuessRow;
use colored::{ColoredString, Colorize};

/// Format one row of feedback as an emoji string
#[must_use]
pub fn feedback_to_emoji(feedback: &[Feedback]) -> String {
    feedback
        .iter()
        .map(|fb| match fb {
            Feedback::Matched => '🟩',
            Feedback::Found => '🟨',
            Feedback::Missing => '⬜',
        })
        .collect()
}

/// Emoji grid of every committed row, one line per row
#[must_use]
pub fn share_grid(rows: &[GuessRow]) -> String {
    rows.iter()
        .filter_map(GuessRow::feedback)
        .map(|fb| feedback_to_emoji(&fb))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Uppercase letter tile colored by its classification
#[must_use]
pub fn letter_tile(letter: char, feedback: Option<Feedback>) -> ColoredString {
    let tile = format!(" {} ", letter.to_ascii_uppercase());
    match feedback {
        Some(Feedback::Matched) => tile.black().on_green().bold(),
        Some(Feedback::Found) => tile.black().on_yellow().bold(),
        Some(Feedback::Missing) => tile.white().on_bright_black(),
        None => tile.bold(),
    }
}
