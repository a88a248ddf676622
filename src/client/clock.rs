//! Clock client implementation
//!
//! A single task drives the whole connection cycle:
//!
//! 1. attach the display with "Connecting..." and open a connection
//! 2. on open show "Connected...", then render every pushed time update
//! 3. on a transport error show "Connection error"
//! 4. on closure show "Reconnecting...", wait the fixed delay, go to 1
//!
//! Every wait point races against the stop signal, so [`ClockClient::stop`]
//! cancels a pending reconnect as well as an open connection.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::{
    connect_async, tungstenite, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, error, info, warn};

use super::{ClientState, TimeUpdate, CONNECTING_TEXT};
use crate::config::ClientConfig;
use crate::display::Display;

type ClockStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Errors that can occur while running the clock client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("Connection attempt timed out after {0:?}")]
    ConnectTimeout(Duration),

    #[error("Client is already running")]
    AlreadyRunning,
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Clears the running flag when `run` returns or its future is dropped
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// How a connected session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    Closed,
    Stopped,
}

/// WebSocket clock client bound to one display surface
///
/// Construct once, then drive it with [`run`](Self::run) or
/// [`start`](Self::start). At most one connection is open per client at any
/// time: the connection lives inside the run loop and is dropped before the
/// next attempt begins, and a second concurrent `run` is rejected.
pub struct ClockClient {
    config: ClientConfig,
    display: Arc<dyn Display>,
    state_tx: watch::Sender<ClientState>,
    stop_tx: watch::Sender<bool>,
    attempts: AtomicU64,
    running: AtomicBool,
}

impl ClockClient {
    /// Create a new client in the `Idle` state
    pub fn new(config: ClientConfig, display: Arc<dyn Display>) -> Self {
        let (state_tx, _) = watch::channel(ClientState::Idle);
        let (stop_tx, _) = watch::channel(false);
        Self {
            config,
            display,
            state_tx,
            stop_tx,
            attempts: AtomicU64::new(0),
            running: AtomicBool::new(false),
        }
    }

    /// Current lifecycle state
    #[allow(dead_code)]
    pub fn state(&self) -> ClientState {
        *self.state_tx.borrow()
    }

    /// Get a receiver that observes every state change
    #[allow(dead_code)]
    pub fn subscribe_state(&self) -> watch::Receiver<ClientState> {
        self.state_tx.subscribe()
    }

    /// Number of connection attempts made so far
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Spawn the run loop on the current runtime
    pub fn start(self: Arc<Self>) -> JoinHandle<ClientResult<()>> {
        tokio::spawn(async move { self.run().await })
    }

    /// Stop the client
    ///
    /// Cancels a pending reconnect, closes an open connection and makes `run`
    /// return. A stopped client stays stopped.
    pub fn stop(&self) {
        if !self.stop_tx.send_replace(true) {
            info!("Stopping clock client");
        }
    }

    /// Run the connection cycle until [`stop`](Self::stop) is called
    pub async fn run(&self) -> ClientResult<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(ClientError::AlreadyRunning);
        }
        let _running = RunningGuard(&self.running);

        let mut stop_rx = self.stop_tx.subscribe();
        let delay = self.config.reconnect_delay();

        while !*stop_rx.borrow() {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            info!("Connecting to {} (attempt {})", self.config.url, attempt);
            self.state_tx.send_replace(ClientState::Connecting);
            self.display.attach(CONNECTING_TEXT);

            let connected = tokio::select! {
                result = self.connect() => result,
                _ = stopped(&mut stop_rx) => break,
            };

            match connected {
                Ok(stream) => {
                    info!("Connected to {}", self.config.url);
                    self.enter(ClientState::Connected);
                    if self.drive(stream, &mut stop_rx).await == SessionEnd::Stopped {
                        break;
                    }
                }
                Err(e) => {
                    error!("Connection to {} failed: {}", self.config.url, e);
                    self.enter(ClientState::Errored);
                }
            }

            self.enter(ClientState::Closed);
            info!("Reconnecting in {}ms", delay.as_millis());

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = stopped(&mut stop_rx) => break,
            }
        }

        self.state_tx.send_replace(ClientState::Stopped);
        info!("Clock client stopped after {} attempts", self.attempts());
        Ok(())
    }

    /// Open a new connection, bounded by the configured timeout if any
    async fn connect(&self) -> ClientResult<ClockStream> {
        let connecting = connect_async(self.config.url.as_str());
        let (stream, _response) = match self.config.connect_timeout() {
            Some(limit) => tokio::time::timeout(limit, connecting)
                .await
                .map_err(|_| ClientError::ConnectTimeout(limit))??,
            None => connecting.await?,
        };
        Ok(stream)
    }

    /// Pump frames from an open connection until it closes or the client stops
    async fn drive(&self, stream: ClockStream, stop_rx: &mut watch::Receiver<bool>) -> SessionEnd {
        let (mut ws_sender, mut ws_receiver) = stream.split();

        loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            self.handle_text(&text);
                        }
                        Some(Ok(Message::Binary(data))) => {
                            warn!("Received binary message ({} bytes), ignoring", data.len());
                        }
                        Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {
                            // tungstenite queues the pong reply itself
                        }
                        Some(Ok(Message::Close(frame))) => {
                            info!("Server closed the connection: {:?}", frame);
                            return SessionEnd::Closed;
                        }
                        Some(Ok(Message::Frame(_))) => {
                            // Raw frame, ignore
                        }
                        Some(Err(e)) => {
                            error!("WebSocket error: {}", e);
                            self.enter(ClientState::Errored);
                            return SessionEnd::Closed;
                        }
                        None => {
                            info!("Connection closed");
                            return SessionEnd::Closed;
                        }
                    }
                }
                _ = stopped(stop_rx) => {
                    debug!("Stop requested, closing connection");
                    let _ = ws_sender.send(Message::Close(None)).await;
                    return SessionEnd::Stopped;
                }
            }
        }
    }

    /// Render a pushed update; malformed payloads leave the display untouched
    fn handle_text(&self, text: &str) {
        match TimeUpdate::from_json(text) {
            Ok(update) => {
                debug!("Time update: {}", update.time);
                self.display.set_text(&update.time);
            }
            Err(e) => {
                warn!("Ignoring malformed message {:?}: {}", text, e);
            }
        }
    }

    /// Move to `state` and show its status text
    fn enter(&self, state: ClientState) {
        debug!("Client state: {}", state);
        self.state_tx.send_replace(state);
        if let Some(text) = state.status_text() {
            self.display.set_text(text);
        }
    }
}

/// Resolve once the stop flag is raised
async fn stopped(stop_rx: &mut watch::Receiver<bool>) {
    let _ = stop_rx.wait_for(|stop| *stop).await;
}
