//! Audio cue players
//!
//! Sound playback is fire-and-forget: a player is told which cue happened and
//! never reports back.

use crate::game::{CueTable, SoundCue};
use std::io::{self, Write};

/// Receives sound cues from a front end
pub trait CuePlayer {
    fn play(&mut self, cue: SoundCue);
}

/// Logs each cue with its configured resource
#[derive(Debug, Clone, Default)]
pub struct LoggingPlayer {
    table: CueTable,
}

impl LoggingPlayer {
    #[must_use]
    pub const fn new(table: CueTable) -> Self {
        Self { table }
    }
}

impl CuePlayer for LoggingPlayer {
    fn play(&mut self, cue: SoundCue) {
        let resource = self.table.sound(cue);
        tracing::debug!(%cue, url = %resource.url, volume = resource.volume, "sound cue");
    }
}

/// Rings the terminal bell for the loud cues, logging everything
pub struct BellPlayer<W: Write> {
    inner: LoggingPlayer,
    out: W,
}

impl BellPlayer<io::Stdout> {
    #[must_use]
    pub fn stdout(table: CueTable) -> Self {
        Self::new(table, io::stdout())
    }
}

impl<W: Write> BellPlayer<W> {
    pub const fn new(table: CueTable, out: W) -> Self {
        Self {
            inner: LoggingPlayer::new(table),
            out,
        }
    }

    const fn rings_for(cue: SoundCue) -> bool {
        matches!(cue, SoundCue::Error | SoundCue::Won | SoundCue::Lost)
    }
}

impl<W: Write> CuePlayer for BellPlayer<W> {
    fn play(&mut self, cue: SoundCue) {
        self.inner.play(cue);
        if Self::rings_for(cue) {
            let rung = self.out.write_all(b"\x07").and_then(|()| self.out.flush());
            if let Err(err) = rung {
                tracing::warn!(%err, "failed to ring terminal bell");
            }
        }
    }
}
