//! Instructions emitted by the session for the display, audio and timer
//! collaborators

use super::cues::{MessageCue, SoundCue};
use crate::core::{Feedback, Word};
use std::time::Duration;

/// Row-level visual flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowFlag {
    /// All five letters typed, waiting for Enter
    Full,
    /// The typed word was rejected by the dictionary
    Error,
    /// The row guessed the target
    Winner,
}

/// Token identifying one lock episode of one session generation
///
/// Handed out with `Effect::ScheduleUnlock` and given back to
/// `GameSession::unlock` when the delay elapses. A ticket from before a
/// reset, or from an earlier lock, no longer matches and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnlockTicket {
    pub(crate) generation: u64,
    pub(crate) episode: u64,
}

/// One state-change instruction
///
/// Rows and columns are 0-based here; `GameSession::row_number` is the
/// 1-based row pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Cell {
        row: usize,
        col: usize,
        letter: Option<char>,
        classification: Option<Feedback>,
    },
    Key {
        letter: char,
        best: Feedback,
    },
    RowFlag {
        row: usize,
        flag: RowFlag,
        set: bool,
    },
    Message {
        cue: MessageCue,
        /// Target word revealed by the `Lost` message
        reveal: Option<Word>,
    },
    Sound(SoundCue),
    ScheduleUnlock {
        ticket: UnlockTicket,
        after: Duration,
    },
    /// Every cell, key and row flag returns to its initial state
    BoardCleared,
}

impl Effect {
    pub(crate) const fn message(cue: MessageCue) -> Self {
        Self::Message { cue, reveal: None }
    }

    pub(crate) const fn flag(row: usize, flag: RowFlag, set: bool) -> Self {
        Self::RowFlag { row, flag, set }
    }
}
