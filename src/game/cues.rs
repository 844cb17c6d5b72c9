//! Closed vocabulary of messages and sound cues
//!
//! The session only ever names a cue; the text or sound resource behind it
//! comes from a `CueTable`, which is configuration data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Message shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCue {
    Start,
    Confirm,
    EnterWord,
    NoExist,
    Won,
    Lost,
}

impl MessageCue {
    pub const ALL: [Self; 6] = [
        Self::Start,
        Self::Confirm,
        Self::EnterWord,
        Self::NoExist,
        Self::Won,
        Self::Lost,
    ];

    #[must_use]
    pub const fn default_text(self) -> &'static str {
        match self {
            Self::Start => "Enter a 5 letter word for a first guess.",
            Self::Confirm => "Confirm word by pressing Enter or correct word with backspace.",
            Self::EnterWord => "Enter a 5 letter word.",
            Self::NoExist => "Word does not exist.",
            Self::Won => "You won. You THE hero! Play again?",
            Self::Lost => "You lost. Play again? The word was: ",
        }
    }
}

/// Sound played on a game event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    Keystroke,
    Error,
    Delete,
    Won,
    Lost,
}

impl SoundCue {
    pub const ALL: [Self; 5] = [
        Self::Keystroke,
        Self::Error,
        Self::Delete,
        Self::Won,
        Self::Lost,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Keystroke => "keystroke",
            Self::Error => "error",
            Self::Delete => "delete",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    #[must_use]
    pub fn default_resource(self) -> SoundResource {
        let (url, volume) = match self {
            Self::Keystroke => ("https://cdn.freesound.org/previews/352/352501_269279-lq.mp3", 1.0),
            Self::Error => ("https://cdn.freesound.org/previews/44/44395_485825-lq.mp3", 1.0),
            Self::Delete => ("https://cdn.freesound.org/previews/366/366105_6687700-lq.mp3", 0.1),
            Self::Won => ("https://cdn.freesound.org/previews/270/270333_5123851-lq.mp3", 1.0),
            Self::Lost => ("https://cdn.freesound.org/previews/652/652328_13478074-lq.mp3", 1.0),
        };
        SoundResource {
            url: url.to_string(),
            volume,
        }
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a sound lives and how loud to play it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundResource {
    pub url: String,
    pub volume: f32,
}

/// Text and sound resources for every cue
///
/// Entries missing from a loaded table fall back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CueTable {
    pub messages: BTreeMap<MessageCue, String>,
    pub sounds: BTreeMap<SoundCue, SoundResource>,
}

impl Default for CueTable {
    fn default() -> Self {
        Self {
            messages: MessageCue::ALL
                .into_iter()
                .map(|cue| (cue, cue.default_text().to_string()))
                .collect(),
            sounds: SoundCue::ALL
                .into_iter()
                .map(|cue| (cue, cue.default_resource()))
                .collect(),
        }
    }
}

impl CueTable {
    #[must_use]
    pub fn message(&self, cue: MessageCue) -> &str {
        self.messages
            .get(&cue)
            .map_or_else(|| cue.default_text(), String::as_str)
    }

    #[must_use]
    pub fn sound(&self, cue: SoundCue) -> SoundResource {
        self.sounds
            .get(&cue)
            .cloned()
            .unwrap_or_else(|| cue.default_resource())
    }
}
