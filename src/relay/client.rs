//! Blocking relay client used by the game front ends
//!
//! Writes happen on the caller's thread. Every connection also gets a reader
//! thread that drains the relay's broadcasts into a channel, so the socket
//! never backs up and the front end can poll for what other players did.

use super::Signal;
use anyhow::{Context, Result, anyhow};
use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Something the relay told us about other players
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayEvent {
    /// A player (possibly this one) joined the relay
    PeerConnected,
    /// Another player started a game
    PeerStarted,
}

/// Announces new games to a relay and reports other players' announcements
pub struct RelayClient {
    addr: String,
    stream: Option<TcpStream>,
    inbox: Option<mpsc::UnboundedReceiver<Signal>>,
    /// Our own `startGame` lines not yet echoed back by the relay
    unechoed: usize,
}

impl RelayClient {
    #[must_use]
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            stream: None,
            inbox: None,
            unechoed: 0,
        }
    }

    /// Announce a new game; failures are logged and otherwise ignored
    pub fn notify(&mut self) {
        match self.try_notify() {
            Ok(()) => self.unechoed += 1,
            Err(err) => {
                tracing::warn!(addr = %self.addr, "failed to send start signal: {err:#}");
                self.disconnect();
            }
        }
    }

    /// Drain everything the relay sent since the last call, without blocking
    ///
    /// The relay echoes our own `startGame` back; those are not reported.
    pub fn poll(&mut self) -> Vec<RelayEvent> {
        let mut events = Vec::new();
        let Some(inbox) = self.inbox.as_mut() else {
            return events;
        };

        while let Ok(signal) = inbox.try_recv() {
            match signal {
                Signal::Connection => {
                    tracing::info!("a player connected to the relay");
                    events.push(RelayEvent::PeerConnected);
                }
                Signal::StartGame if self.unechoed > 0 => self.unechoed -= 1,
                Signal::StartGame => {
                    tracing::info!("another player started a game");
                    events.push(RelayEvent::PeerStarted);
                }
            }
        }
        events
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn try_notify(&mut self) -> Result<()> {
        let frame = format!("{}\n", Signal::StartGame);

        // A kept connection may have gone stale; retry once on a fresh one
        if let Some(stream) = self.stream.as_mut()
            && stream.write_all(frame.as_bytes()).is_ok()
        {
            return Ok(());
        }

        self.disconnect();
        let mut stream = self.connect()?;
        stream
            .write_all(frame.as_bytes())
            .context("failed to write start signal")?;
        self.stream = Some(stream);
        Ok(())
    }

    fn connect(&mut self) -> Result<TcpStream> {
        let addr = self
            .addr
            .to_socket_addrs()
            .with_context(|| format!("cannot resolve {}", self.addr))?
            .next()
            .ok_or_else(|| anyhow!("no address for {}", self.addr))?;
        let stream = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)
            .with_context(|| format!("cannot connect to {addr}"))?;
        stream.set_write_timeout(Some(CONNECT_TIMEOUT))?;

        let reader = stream.try_clone().context("failed to clone relay socket")?;
        let (tx, rx) = mpsc::unbounded_channel();
        thread::Builder::new()
            .name("relay-reader".into())
            .spawn(move || read_signals(reader, &tx))
            .context("failed to spawn relay reader")?;
        self.inbox = Some(rx);

        tracing::info!(%addr, "connected to relay");
        Ok(stream)
    }

    fn disconnect(&mut self) {
        if let Some(stream) = self.stream.take() {
            // Unblocks the reader thread
            let _ = stream.shutdown(Shutdown::Both);
        }
        self.inbox = None;
        self.unechoed = 0;
    }
}

impl Drop for RelayClient {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn read_signals(stream: TcpStream, signals: &mpsc::UnboundedSender<Signal>) {
    for line in BufReader::new(stream).lines() {
        let Ok(line) = line else { break };
        match line.trim().parse::<Signal>() {
            Ok(signal) => {
                if signals.send(signal).is_err() {
                    break;
                }
            }
            Err(_) => tracing::debug!(%line, "ignoring unknown relay line"),
        }
    }
    tracing::info!("relay connection closed");
}
