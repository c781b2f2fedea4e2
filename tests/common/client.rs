//! Test chat client.
//!
//! Speaks the line protocol over a raw TCP stream and asserts on what the
//! server sends back.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// Default wait for an expected line.
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A test chat client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    name: String,
}

impl TestClient {
    /// Connect without identifying.
    pub async fn connect(address: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;

        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
            name: String::new(),
        })
    }

    /// Connect, send `name` as the identity line and wait for the welcome.
    pub async fn join(address: &str, name: &str) -> anyhow::Result<Self> {
        let mut client = Self::connect(address).await?;
        client.identify(name).await?;
        Ok(client)
    }

    /// Send the identity line and wait for the welcome. Records the name the
    /// server assigned.
    pub async fn identify(&mut self, name: &str) -> anyhow::Result<()> {
        self.send_line(name).await?;

        let welcome = self.recv_line().await?;
        let assigned = welcome
            .strip_prefix("Welcome ")
            .and_then(|rest| rest.strip_suffix('!'))
            .ok_or_else(|| anyhow::anyhow!("Expected welcome, got {welcome:?}"))?;
        self.name = assigned.to_string();
        Ok(())
    }

    /// The name from the last welcome.
    #[allow(dead_code)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Send raw bytes exactly as given.
    #[allow(dead_code)]
    pub async fn send_raw(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Send one line, adding the `\n` terminator.
    pub async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one line with the terminator removed.
    pub async fn recv_line(&mut self) -> anyhow::Result<String> {
        self.recv_line_timeout(RECV_TIMEOUT).await
    }

    /// Receive one line with a timeout.
    pub async fn recv_line_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let read = timeout(dur, self.reader.read_line(&mut line)).await??;
        anyhow::ensure!(read > 0, "Connection closed");
        Ok(line.trim_end_matches('\n').to_string())
    }

    /// Receive a `SVR:who` reply listing `count` clients.
    #[allow(dead_code)]
    pub async fn recv_who(&mut self, count: usize) -> anyhow::Result<Vec<String>> {
        anyhow::ensure!(self.recv_line().await? == "FROM SERVER", "Missing who header");
        anyhow::ensure!(
            self.recv_line().await? == "Connected clients:",
            "Missing who header"
        );

        let mut names = Vec::with_capacity(count);
        for _ in 0..count {
            names.push(self.recv_line().await?);
        }
        Ok(names)
    }

    /// Assert nothing arrives for `dur`.
    #[allow(dead_code)]
    pub async fn expect_silence(&mut self, dur: Duration) -> anyhow::Result<()> {
        let mut line = String::new();
        match timeout(dur, self.reader.read_line(&mut line)).await {
            Err(_) => Ok(()),
            Ok(Ok(0)) => anyhow::bail!("Connection closed while expecting silence"),
            Ok(Ok(_)) => anyhow::bail!("Unexpected line: {line:?}"),
            Ok(Err(e)) => Err(e.into()),
        }
    }

    /// Assert the server closes the connection without sending anything else.
    #[allow(dead_code)]
    pub async fn expect_eof(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        match timeout(RECV_TIMEOUT, self.reader.read_line(&mut line)).await? {
            Ok(0) => Ok(()),
            Ok(_) => anyhow::bail!("Expected EOF, got {line:?}"),
            // A reset still means the server closed us.
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionReset => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Wait for a chat line from `sender` and return its text.
    ///
    /// Chat lines look like `<name> [HH:MM]: <text>`.
    #[allow(dead_code)]
    pub async fn recv_chat(&mut self, sender: &str) -> anyhow::Result<String> {
        let line = self.recv_line().await?;
        parse_chat(&line, sender)
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Expected chat from {sender}, got {line:?}"))
    }
}

/// Split a chat line from `sender` into its text, checking the timestamp shape.
fn parse_chat<'a>(line: &'a str, sender: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(sender)?.strip_prefix(" [")?;
    let (stamp, text) = rest.split_at_checked(5)?;
    let text = text.strip_prefix("]: ")?;

    let (hours, minutes) = stamp.split_once(':')?;
    let valid = hours.len() == 2
        && minutes.len() == 2
        && hours.parse::<u8>().is_ok_and(|h| h < 24)
        && minutes.parse::<u8>().is_ok_and(|m| m < 60);
    valid.then_some(text)
}
