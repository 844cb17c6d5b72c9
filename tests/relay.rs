use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;
use turbl::config::Settings;
use turbl::interactive::App;
use turbl::output::LoggingPlayer;
use turbl::relay::{RelayClient, RelayEvent, RelayServer};
use turbl::wordlists::WordList;
use turbl::wordlists::loader::words_from_slice;

const WAIT: Duration = Duration::from_secs(2);

struct Peer {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Peer {
    async fn connect(addr: SocketAddr) -> anyhow::Result<Self> {
        let (reader, writer) = TcpStream::connect(addr).await?.into_split();
        Ok(Self {
            lines: BufReader::new(reader).lines(),
            writer,
        })
    }

    async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(format!("{line}\n").as_bytes()).await?;
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<String> {
        let line = timeout(WAIT, self.lines.next_line()).await??;
        line.ok_or_else(|| anyhow::anyhow!("relay closed the connection"))
    }
}

async fn start_relay() -> anyhow::Result<SocketAddr> {
    let server = RelayServer::bind("127.0.0.1:0").await?;
    let addr = server.local_addr()?;
    tokio::spawn(server.run());
    Ok(addr)
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_is_announced_to_everyone() -> anyhow::Result<()> {
    let addr = start_relay().await?;

    let mut first = Peer::connect(addr).await?;
    assert_eq!(first.recv().await?, "connection");

    let mut second = Peer::connect(addr).await?;
    assert_eq!(second.recv().await?, "connection");
    assert_eq!(first.recv().await?, "connection");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn start_game_reaches_all_peers_including_sender() -> anyhow::Result<()> {
    let addr = start_relay().await?;

    let mut first = Peer::connect(addr).await?;
    assert_eq!(first.recv().await?, "connection");
    let mut second = Peer::connect(addr).await?;
    assert_eq!(second.recv().await?, "connection");
    assert_eq!(first.recv().await?, "connection");

    first.send("startGame").await?;
    assert_eq!(first.recv().await?, "startGame");
    assert_eq!(second.recv().await?, "startGame");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_lines_are_ignored() -> anyhow::Result<()> {
    let addr = start_relay().await?;

    let mut first = Peer::connect(addr).await?;
    assert_eq!(first.recv().await?, "connection");
    let mut second = Peer::connect(addr).await?;
    assert_eq!(second.recv().await?, "connection");
    assert_eq!(first.recv().await?, "connection");

    second.send("hello").await?;
    second.send("connection").await?;
    second.send("startGame").await?;
    assert_eq!(first.recv().await?, "startGame");
    assert_eq!(second.recv().await?, "startGame");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn dropped_peer_does_not_stop_the_relay() -> anyhow::Result<()> {
    let addr = start_relay().await?;

    let mut first = Peer::connect(addr).await?;
    assert_eq!(first.recv().await?, "connection");
    let mut second = Peer::connect(addr).await?;
    assert_eq!(second.recv().await?, "connection");
    assert_eq!(first.recv().await?, "connection");
    drop(second);

    first.send("startGame").await?;
    assert_eq!(first.recv().await?, "startGame");
    Ok(())
}

/// Poll `client` until `done` holds for the events seen so far
async fn poll_until<F>(client: &mut RelayClient, done: F) -> anyhow::Result<Vec<RelayEvent>>
where
    F: Fn(&[RelayEvent]) -> bool,
{
    let deadline = Instant::now() + WAIT;
    let mut events = Vec::new();
    while !done(&events) {
        anyhow::ensure!(Instant::now() < deadline, "timed out, saw {events:?}");
        events.extend(client.poll());
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    Ok(events)
}

#[tokio::test(flavor = "multi_thread")]
async fn client_announces_games() -> anyhow::Result<()> {
    let addr = start_relay().await?;

    let mut watcher = Peer::connect(addr).await?;
    assert_eq!(watcher.recv().await?, "connection");

    let client = tokio::task::spawn_blocking(move || {
        let mut client = RelayClient::new(addr.to_string());
        client.notify();
        client.notify();
        client
    })
    .await?;
    assert!(client.is_connected());

    assert_eq!(watcher.recv().await?, "connection");
    assert_eq!(watcher.recv().await?, "startGame");
    assert_eq!(watcher.recv().await?, "startGame");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn client_reports_other_players_but_not_its_own_echo() -> anyhow::Result<()> {
    let addr = start_relay().await?;

    let mut peer = Peer::connect(addr).await?;
    assert_eq!(peer.recv().await?, "connection");

    let mut client = tokio::task::spawn_blocking(move || {
        let mut client = RelayClient::new(addr.to_string());
        client.notify();
        client
    })
    .await?;
    assert_eq!(peer.recv().await?, "connection");
    assert_eq!(peer.recv().await?, "startGame");

    peer.send("startGame").await?;
    assert_eq!(peer.recv().await?, "startGame");

    let events = poll_until(&mut client, |events| {
        events.contains(&RelayEvent::PeerStarted)
    })
    .await?;

    // Our own startGame came back first, but only the peer's is reported
    assert_eq!(events, vec![RelayEvent::PeerConnected, RelayEvent::PeerStarted]);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(client.poll().is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn tui_shows_peer_start_until_next_reset() -> anyhow::Result<()> {
    let addr = start_relay().await?;
    let dict = WordList::new(words_from_slice(&["crane"]), Vec::new())?;
    let settings = Settings::default();

    let mut peer = Peer::connect(addr).await?;
    assert_eq!(peer.recv().await?, "connection");

    // Creating the app announces its first game
    let client = RelayClient::new(addr.to_string());
    let mut app = App::new(&dict, &settings, Box::new(LoggingPlayer::default()), Some(client))?;
    assert!(!app.peer_started);
    assert_eq!(peer.recv().await?, "connection");
    assert_eq!(peer.recv().await?, "startGame");

    peer.send("startGame").await?;
    assert_eq!(peer.recv().await?, "startGame");

    let deadline = Instant::now() + WAIT;
    while !app.peer_started {
        anyhow::ensure!(Instant::now() < deadline, "peer start never shown");
        app.tick(Instant::now());
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    app.new_game(Instant::now());
    assert!(!app.peer_started);
    assert_eq!(peer.recv().await?, "startGame");
    Ok(())
}

#[test]
fn client_without_relay_only_logs() {
    // Port 1 on localhost is closed; notify must not panic or block for long
    let mut client = RelayClient::new("127.0.0.1:1");
    client.notify();
    assert!(!client.is_connected());
    assert!(client.poll().is_empty());
}
