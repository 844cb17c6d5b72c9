//! Simple text mode
//!
//! Plays the game without the TUI: each input line is typed into the session
//! as a whole word and submitted.

use crate::config::Settings;
use crate::core::{WORD_LEN, Word};
use crate::game::{Effect, GameSession, Input, MessageCue, SoundCue};
use crate::output::formatters::share_grid;
use crate::output::{CuePlayer, print_board, print_keyboard, print_message};
use crate::wordlists::WordList;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::thread;

/// What a text line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    NewGame,
    Guess(String),
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim().to_lowercase();
        match line.as_str() {
            "" => None,
            "quit" | "q" | "exit" => Some(Self::Quit),
            "new" | "n" => Some(Self::NewGame),
            _ => Some(Self::Guess(line)),
        }
    }
}

/// Whether a line can be typed as a guess: exactly five ASCII letters
#[must_use]
pub fn is_typable(word: &str) -> bool {
    word.len() == WORD_LEN && word.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Type `word` into the session the way a keyboard would, replacing whatever
/// is left in the buffer, then press enter
pub fn type_word(session: &mut GameSession<'_, WordList>, word: &str) -> Vec<Effect> {
    let mut effects = Vec::new();
    for _ in 0..session.buffer().len() {
        effects.extend(session.handle(Input::Backspace));
    }
    for ch in word.chars() {
        effects.extend(session.handle(Input::Letter(ch)));
    }
    effects.extend(session.handle(Input::Enter));
    effects
}

/// Play sounds, wait out any input lock, and return the last message shown
fn settle(
    session: &mut GameSession<'_, WordList>,
    effects: Vec<Effect>,
    player: &mut dyn CuePlayer,
) -> Option<(MessageCue, Option<Word>)> {
    let mut message = None;
    let mut pending = effects;

    while !pending.is_empty() {
        let mut unlocks = Vec::new();
        for effect in pending {
            match effect {
                Effect::Sound(cue) => player.play(cue),
                Effect::Message { cue, reveal } => message = Some((cue, reveal)),
                Effect::ScheduleUnlock { ticket, after } => unlocks.push((ticket, after)),
                Effect::Cell { .. }
                | Effect::Key { .. }
                | Effect::RowFlag { .. }
                | Effect::BoardCleared => {}
            }
        }

        pending = Vec::new();
        for (ticket, after) in unlocks {
            thread::sleep(after);
            pending.extend(session.unlock(ticket));
        }
    }

    message
}

/// Run the text mode game loop over `input`
///
/// # Errors
///
/// Returns an error if reading input or flushing stdout fails, or if the
/// configured keyboard layout is invalid.
pub fn run_simple<R: BufRead>(
    dictionary: &WordList,
    settings: &Settings,
    input: R,
    player: &mut dyn CuePlayer,
) -> Result<()> {
    let layout = settings.keyboard_layout()?;
    let cues = &settings.cues;
    let mut session = GameSession::new(dictionary, settings.session_options());

    println!("\n{}", "T U R B L".bright_cyan().bold());
    println!("Type a {WORD_LEN} letter word per line. Commands: 'new', 'quit'\n");
    print_message(cues, MessageCue::Start, None);
    prompt(session.row_number())?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let Some(command) = Command::parse(&line) else {
            prompt(session.row_number())?;
            continue;
        };

        match command {
            Command::Quit => break,
            Command::NewGame => {
                let effects = session.reset();
                if let Some((cue, reveal)) = settle(&mut session, effects, player) {
                    print_message(cues, cue, reveal.as_ref());
                }
            }
            Command::Guess(_) if session.is_over() => {
                player.play(SoundCue::Error);
                println!("Type 'new' to play again or 'quit' to leave.");
            }
            Command::Guess(word) if !is_typable(&word) => {
                player.play(SoundCue::Error);
                print_message(cues, MessageCue::EnterWord, None);
            }
            Command::Guess(word) => {
                let effects = type_word(&mut session, &word);
                let message = settle(&mut session, effects, player);

                print_board(session.rows());
                print_keyboard(&layout, session.keys());
                if let Some((cue, reveal)) = message {
                    print_message(cues, cue, reveal.as_ref());
                }
                if session.is_over() {
                    println!("\n{}\n", share_grid(session.rows()));
                }
            }
        }

        prompt(session.row_number())?;
    }

    println!("\nBye!\n");
    Ok(())
}

fn prompt(row: usize) -> Result<()> {
    print!("{row}> ");
    io::stdout().flush().context("failed to flush stdout")
}
