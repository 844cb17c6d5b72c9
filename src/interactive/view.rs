//! What the screen shows, rebuilt only from session effects

use crate::core::{Feedback, WORD_LEN, Word};
use crate::game::{Effect, MAX_ATTEMPTS, MessageCue, RowFlag, SoundCue};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewCell {
    pub letter: Option<char>,
    pub classification: Option<Feedback>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowFlags {
    pub full: bool,
    pub error: bool,
    pub winner: bool,
}

impl RowFlags {
    fn set(&mut self, flag: RowFlag, on: bool) {
        match flag {
            RowFlag::Full => self.full = on,
            RowFlag::Error => self.error = on,
            RowFlag::Winner => self.winner = on,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub cells: [[ViewCell; WORD_LEN]; MAX_ATTEMPTS],
    pub flags: [RowFlags; MAX_ATTEMPTS],
    pub keys: FxHashMap<char, Feedback>,
    pub message: MessageCue,
    pub reveal: Option<Word>,
    pub last_sound: Option<SoundCue>,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cells: Default::default(),
            flags: Default::default(),
            keys: FxHashMap::default(),
            message: MessageCue::Start,
            reveal: None,
            last_sound: None,
        }
    }
}

impl BoardView {
    /// Apply one effect; scheduling effects are not part of the view
    pub fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::Cell {
                row,
                col,
                letter,
                classification,
            } => {
                if let Some(cell) = self.cells.get_mut(*row).and_then(|r| r.get_mut(*col)) {
                    *cell = ViewCell {
                        letter: *letter,
                        classification: *classification,
                    };
                }
            }
            Effect::Key { letter, best } => {
                self.keys.insert(*letter, *best);
            }
            Effect::RowFlag { row, flag, set } => {
                if let Some(flags) = self.flags.get_mut(*row) {
                    flags.set(*flag, *set);
                }
            }
            Effect::Message { cue, reveal } => {
                self.message = *cue;
                self.reveal.clone_from(reveal);
            }
            Effect::Sound(cue) => self.last_sound = Some(*cue),
            Effect::BoardCleared => *self = Self::default(),
            Effect::ScheduleUnlock { .. } => {}
        }
    }
}
