//! Multiplayer start-signal relay
//!
//! Newline-delimited text over TCP. The relay carries no game state: a peer
//! saying `startGame` only means someone started a game.

mod client;
mod server;

pub use client::{RelayClient, RelayEvent};
pub use server::RelayServer;

use std::fmt;
use std::str::FromStr;

/// Line understood by the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Broadcast by the relay when a peer connects
    Connection,
    /// Sent by a peer when it starts a game, broadcast verbatim
    StartGame,
}

impl Signal {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connection => "connection",
            Self::StartGame => "startGame",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Signal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "connection" => Ok(Self::Connection),
            "startGame" => Ok(Self::StartGame),
            _ => Err(format!("Unknown signal: {s}")),
        }
    }
}
