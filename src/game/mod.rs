//! Game engine
//!
//! The session state machine and the vocabulary it uses to talk to the
//! display, audio and timer collaborators.

mod cues;
mod effect;
mod session;

pub use cues::{CueTable, MessageCue, SoundCue, SoundResource};
pub use effect::{Effect, RowFlag, UnlockTicket};
pub use session::{
    Cell, DEFAULT_UNLOCK_DELAY, GameSession, GuessRow, Input, MAX_ATTEMPTS, SessionOptions, Status,
};
