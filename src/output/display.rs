//! Display functions for the text front end

use super::formatters::letter_tile;
use crate::config::{KeyCap, KeyboardLayout};
use crate::core::{KeyFeedback, Word};
use crate::game::{CueTable, GuessRow, MessageCue};
use colored::Colorize;

/// Print the guess grid
pub fn print_board(rows: &[GuessRow]) {
    println!("{}", "─".repeat(21).cyan());
    for row in rows {
        let line: Vec<String> = row
            .cells()
            .iter()
            .map(|cell| match cell.letter() {
                Some(letter) => letter_tile(letter, cell.classification()).to_string(),
                None => " · ".bright_black().to_string(),
            })
            .collect();
        println!(" {}", line.join(" "));
    }
    println!("{}", "─".repeat(21).cyan());
}

/// Print the letters of the keyboard layout colored by key feedback
pub fn print_keyboard(layout: &KeyboardLayout, keys: &KeyFeedback) {
    for (indent, row) in layout.rows().iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .filter_map(|key| match key {
                KeyCap::Letter(ch) => {
                    let best = u8::try_from(*ch).ok().and_then(|l| keys.get(l));
                    Some(letter_tile(*ch, best).to_string())
                }
                KeyCap::Backspace | KeyCap::Enter => None,
            })
            .collect();
        println!("{}{}", " ".repeat(indent * 2), line.join(""));
    }
}

/// Render a message cue as text, appending the revealed word if any
#[must_use]
pub fn message_text(cues: &CueTable, cue: MessageCue, reveal: Option<&Word>) -> String {
    let mut text = cues.message(cue).to_string();
    if let Some(word) = reveal {
        text.push_str(&word.as_str().to_uppercase());
    }
    text
}

/// Print a message cue, colored by how good the news is
pub fn print_message(cues: &CueTable, cue: MessageCue, reveal: Option<&Word>) {
    let text = message_text(cues, cue, reveal);
    let styled = match cue {
        MessageCue::Won => text.green().bold(),
        MessageCue::Lost | MessageCue::NoExist => text.red().bold(),
        MessageCue::Start | MessageCue::Confirm | MessageCue::EnterWord => text.normal(),
    };
    println!("{styled}");
}
