//! Broadcast relay for "game started" notifications

use super::Signal;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::sync::broadcast;

/// Capacity of the broadcast channel; slower peers skip older signals
const CHANNEL_CAPACITY: usize = 64;

/// TCP relay: every signal a peer sends is forwarded to all connected peers
pub struct RelayServer {
    listener: TcpListener,
    signals: broadcast::Sender<Signal>,
}

impl RelayServer {
    /// Bind the relay to `addr`
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn bind<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .context("failed to bind relay listener")?;
        let (signals, _) = broadcast::channel(CHANNEL_CAPACITY);
        Ok(Self { listener, signals })
    }

    /// Address the relay is listening on
    ///
    /// # Errors
    ///
    /// Returns an error if the socket address cannot be queried.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept peers until the listener fails
    ///
    /// # Errors
    ///
    /// Returns an error if accepting a connection fails.
    pub async fn run(self) -> Result<()> {
        tracing::info!(addr = %self.local_addr()?, "relay is up");

        loop {
            let (socket, peer) = self
                .listener
                .accept()
                .await
                .context("failed to accept connection")?;
            tracing::info!(%peer, "a user just connected");

            // Subscribe first so the new peer also sees its own connection notice
            let inbox = self.signals.subscribe();
            let _ = self.signals.send(Signal::Connection);

            tokio::spawn(serve_peer(socket, peer, self.signals.clone(), inbox));
        }
    }
}

async fn serve_peer(
    socket: TcpStream,
    peer: SocketAddr,
    signals: broadcast::Sender<Signal>,
    mut inbox: broadcast::Receiver<Signal>,
) {
    let (reader, mut writer) = socket.into_split();
    let mut lines = BufReader::new(reader).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => match line.trim().parse::<Signal>() {
                    Ok(Signal::StartGame) => {
                        tracing::info!(%peer, "received: startGame");
                        let _ = signals.send(Signal::StartGame);
                    }
                    _ => tracing::debug!(%peer, %line, "ignoring unknown line"),
                },
                Ok(None) => break,
                Err(err) => {
                    tracing::debug!(%peer, %err, "read failed");
                    break;
                }
            },
            signal = inbox.recv() => match signal {
                Ok(signal) => {
                    let frame = format!("{signal}\n");
                    if let Err(err) = writer.write_all(frame.as_bytes()).await {
                        tracing::debug!(%peer, %err, "write failed");
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(%peer, skipped, "peer fell behind, signals dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    tracing::info!(%peer, "a user has disconnected");
}
