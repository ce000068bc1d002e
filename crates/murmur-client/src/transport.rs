//! TCP transport for the engine.
//!
//! Provides [`TcpEngine`] which handles socket I/O for line transport. This
//! is a thin layer that frames and writes lines; protocol logic remains in
//! the Sans-IO [`Client`].
//!
//! Each session runs two tasks. The reader frames inbound lines, feeds them
//! to the [`Client`] and forwards the resulting events in wire order. The
//! writer drains the command queue onto the socket. Commands are queued on an
//! unbounded channel so [`Engine::issue`] never blocks the caller.

use std::time::Duration;

use murmur_proto::{Command, Event};
use tokio::{
    io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    sync::mpsc,
    task::AbortHandle,
};

use crate::{Client, ClientAction, ConnectConfig, ConnectionError, Engine, EngineError, EventFeed};

/// Transport tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Events buffered between the reader task and the consumer.
    pub event_buffer: usize,
    /// Longest inbound line accepted, terminator included. Longer lines are
    /// discarded.
    pub max_line: usize,
    /// How long to wait for the TCP handshake.
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { event_buffer: 256, max_line: 8192, connect_timeout: Duration::from_secs(10) }
    }
}

/// Live session handles.
struct Connection {
    commands: mpsc::UnboundedSender<Command>,
    reader: AbortHandle,
    writer: AbortHandle,
}

/// [`Engine`] over a plaintext TCP connection.
pub struct TcpEngine {
    config: TransportConfig,
    connection: Option<Connection>,
}

impl TcpEngine {
    /// Create an idle engine.
    pub fn new(config: TransportConfig) -> Self {
        Self { config, connection: None }
    }
}

impl Default for TcpEngine {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

impl Engine for TcpEngine {
    type Error = EngineError;

    async fn connect(&mut self, config: &ConnectConfig) -> Result<EventFeed, ConnectionError> {
        if config.server.trim().is_empty() {
            return Err(ConnectionError::InvalidAddress("empty server name".to_string()));
        }
        if config.port == 0 {
            return Err(ConnectionError::InvalidAddress(format!("bad port in {}", config.addr())));
        }
        if self.is_connected() {
            return Err(ConnectionError::AlreadyConnected);
        }
        self.stop();

        let addr = config.addr();
        tracing::info!(%addr, "Connecting");

        let dial = TcpStream::connect((config.server.as_str(), config.port));
        let stream = match tokio::time::timeout(self.config.connect_timeout, dial).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(ConnectionError::Unreachable { addr, reason: e.to_string() }),
            Err(_) => {
                return Err(ConnectionError::Unreachable { addr, reason: "connect timed out".to_string() });
            },
        };
        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!(error = %e, "Could not set TCP_NODELAY");
        }
        let (read_half, write_half) = stream.into_split();

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(self.config.event_buffer);

        // Registration goes out before anything the caller issues
        let _ = command_tx.send(Command::Register(config.identity.clone()));

        let client = Client::new(&config.identity);
        let reader = tokio::spawn(run_reader(
            read_half,
            client,
            event_tx,
            command_tx.clone(),
            self.config.max_line,
        ));
        let writer = tokio::spawn(run_writer(write_half, command_rx));

        tracing::info!(%addr, "Connected");
        self.connection = Some(Connection {
            commands: command_tx,
            reader: reader.abort_handle(),
            writer: writer.abort_handle(),
        });

        Ok(event_rx)
    }

    fn issue(&mut self, command: Command) -> Result<(), EngineError> {
        let connection = self.connection.as_ref().ok_or(EngineError::NotConnected)?;
        if connection.reader.is_finished() {
            return Err(EngineError::Closed);
        }
        connection.commands.send(command).map_err(|_| EngineError::Closed)
    }

    fn is_connected(&self) -> bool {
        self.connection
            .as_ref()
            .is_some_and(|c| !c.reader.is_finished() && !c.commands.is_closed())
    }

    fn stop(&mut self) {
        if let Some(connection) = self.connection.take() {
            // Writer exits on its own once the queue drains and every sender
            // is gone, so a queued QUIT still reaches the server.
            connection.reader.abort();
            if connection.commands.is_closed() {
                connection.writer.abort();
            }
            tracing::debug!("Engine stopped");
        }
    }
}

impl Drop for TcpEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Read lines, translate them, and forward events until the socket closes.
async fn run_reader(
    read_half: OwnedReadHalf,
    mut client: Client,
    events: mpsc::Sender<Event>,
    commands: mpsc::UnboundedSender<Command>,
    max_line: usize,
) {
    let mut reader = BufReader::new(read_half);
    let mut line = Vec::with_capacity(512);
    let limit = u64::try_from(max_line).unwrap_or(u64::MAX);

    loop {
        line.clear();
        match (&mut reader).take(limit).read_until(b'\n', &mut line).await {
            Ok(0) => {
                tracing::info!("Server closed connection");
                break;
            },
            Ok(_) => {},
            Err(e) => {
                tracing::warn!(error = %e, "Read failed");
                break;
            },
        }

        if line.last() != Some(&b'\n') && line.len() >= max_line {
            tracing::warn!(max_line, "Discarding oversized line");
            if let Err(e) = discard_rest_of_line(&mut reader).await {
                tracing::warn!(error = %e, "Read failed");
                break;
            }
            continue;
        }

        for action in client.handle_line(&line) {
            match action {
                ClientAction::Deliver(event) => {
                    if events.send(event).await.is_err() {
                        tracing::debug!("Event consumer gone, stopping reader");
                        return;
                    }
                },
                ClientAction::Send(command) => {
                    let _ = commands.send(command);
                },
            }
        }
    }
}

/// Skip input up to and including the next line feed.
async fn discard_rest_of_line(reader: &mut BufReader<OwnedReadHalf>) -> std::io::Result<()> {
    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            return Ok(());
        }
        if let Some(pos) = buf.iter().position(|b| *b == b'\n') {
            reader.consume(pos + 1);
            return Ok(());
        }
        let len = buf.len();
        reader.consume(len);
    }
}

/// Write queued commands as CRLF-terminated lines.
async fn run_writer(mut write_half: OwnedWriteHalf, mut commands: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = commands.recv().await {
        for mut line in command.to_lines() {
            tracing::trace!(line = %String::from_utf8_lossy(&line), "Send");
            line.extend_from_slice(b"\r\n");
            if let Err(e) = write_half.write_all(&line).await {
                tracing::warn!(error = %e, "Write failed");
                return;
            }
        }
    }

    let _ = write_half.shutdown().await;
}
