//! Transport: the single duplex channel to Janus, with reconnect/failover
//! and the WebSocket liveness probe (spec §4.2).

pub mod unix;
pub mod websocket;

pub use websocket::WebSocketOptions;

use crate::address_iterator::AddressIterator;
use crate::config::{Endpoint, PING_INTERVAL_SECS, PING_WAIT_SECS};
use crate::error::Error;
use crate::util::delay_secs;
use futures::StreamExt;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, Notify};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransportState {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Clone)]
enum Sink {
    WebSocket(Arc<websocket::WebSocketSink>),
    Unix(Arc<unix::UnixSink>),
}

struct Inner {
    state: TransportState,
    sink: Option<Sink>,
    reader_task: Option<JoinHandle<()>>,
    ping_task: Option<JoinHandle<()>>,
}

/// Owns the single link to Janus for one [`crate::connection::Connection`].
/// Reconnects across the configured [`AddressIterator`] on open failure;
/// does not transparently reopen after a successful connection is lost —
/// that is the Connection's job to signal upward (spec §4.2).
pub(crate) struct Transport {
    conn_id: String,
    iterator: Mutex<AddressIterator>,
    retry_time_secs: u64,
    max_retries: u32,
    is_admin: bool,
    inner: Mutex<Inner>,
    pong_notify: Notify,
}

impl Transport {
    pub(crate) fn new(
        endpoints: Vec<Endpoint>,
        retry_time_secs: u64,
        max_retries: u32,
        is_admin: bool,
        conn_id: String,
    ) -> Arc<Self> {
        Arc::new(Self {
            conn_id,
            iterator: Mutex::new(AddressIterator::new(endpoints)),
            retry_time_secs,
            max_retries,
            is_admin,
            inner: Mutex::new(Inner {
                state: TransportState::Closed,
                sink: None,
                reader_task: None,
                ping_task: None,
            }),
            pong_notify: Notify::new(),
        })
    }

    pub(crate) fn state(&self) -> TransportState {
        self.inner.lock().state
    }

    /// Runs the `attemptOpen` reconnect/failover algorithm: try the current
    /// endpoint, advance and sleep `retry_time_secs` on failure, give up
    /// with [`Error::AttemptLimitExceeded`] after `max_retries` attempts (P3).
    pub(crate) async fn open(
        self: &Arc<Self>,
        inbound_tx: mpsc::UnboundedSender<serde_json::Value>,
        closed_tx: broadcast::Sender<()>,
    ) -> Result<(), Error> {
        self.inner.lock().state = TransportState::Opening;
        let mut attempts = 0u32;
        loop {
            let endpoint = self.iterator.lock().current().clone();
            match self
                .try_connect(&endpoint, inbound_tx.clone(), closed_tx.clone())
                .await
            {
                Ok(()) => {
                    self.inner.lock().state = TransportState::Open;
                    return Ok(());
                }
                Err(err) => {
                    tracing::debug!(attempts, endpoint = %endpoint.url, %err, "transport attempt failed");
                    attempts += 1;
                    if attempts >= self.max_retries {
                        self.inner.lock().state = TransportState::Closed;
                        return Err(Error::AttemptLimitExceeded);
                    }
                    delay_secs(self.retry_time_secs).await;
                    self.iterator.lock().next();
                }
            }
        }
    }

    async fn try_connect(
        self: &Arc<Self>,
        endpoint: &Endpoint,
        inbound_tx: mpsc::UnboundedSender<serde_json::Value>,
        closed_tx: broadcast::Sender<()>,
    ) -> Result<(), Error> {
        if endpoint.url.starts_with("ws://") || endpoint.url.starts_with("wss://") {
            let (sink, stream) = websocket::connect(&endpoint.url, self.is_admin).await?;
            self.inner.lock().sink = Some(Sink::WebSocket(Arc::new(sink)));
            self.spawn_websocket_reader(stream, inbound_tx, closed_tx.clone());
            self.spawn_ping_loop(closed_tx);
            Ok(())
        } else if let Some(path) = endpoint.url.strip_prefix("file://") {
            let (sink, socket) = unix::connect(path, &self.conn_id).await?;
            self.inner.lock().sink = Some(Sink::Unix(Arc::new(sink)));
            self.spawn_unix_reader(socket, inbound_tx, closed_tx);
            Ok(())
        } else {
            Err(Error::ConfigInvalid(format!(
                "unsupported endpoint scheme: {}",
                endpoint.url
            )))
        }
    }

    fn spawn_websocket_reader(
        self: &Arc<Self>,
        mut stream: websocket::WebSocketStream,
        inbound_tx: mpsc::UnboundedSender<serde_json::Value>,
        closed_tx: broadcast::Sender<()>,
    ) {
        let this = self.clone();
        let handle = tokio::spawn(async move {
            while let Some(msg) = stream.next().await {
                match msg {
                    Ok(Message::Text(text)) => match serde_json::from_str(&text) {
                        Ok(value) => {
                            let _ = inbound_tx.send(value);
                        }
                        Err(err) => tracing::warn!(%err, "dropping malformed frame"),
                    },
                    Ok(Message::Pong(_)) => this.pong_notify.notify_one(),
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(err) => {
                        tracing::debug!(%err, "websocket stream error");
                        break;
                    }
                }
            }
            this.mark_closed(&closed_tx);
        });
        self.inner.lock().reader_task = Some(handle);
    }

    fn spawn_unix_reader(
        self: &Arc<Self>,
        socket: Arc<tokio::net::UnixDatagram>,
        inbound_tx: mpsc::UnboundedSender<serde_json::Value>,
        closed_tx: broadcast::Sender<()>,
    ) {
        let this = self.clone();
        let handle = tokio::spawn(async move {
            let mut buf = vec![0u8; 64 * 1024];
            loop {
                match socket.recv(&mut buf).await {
                    Ok(0) => break,
                    Ok(n) => match serde_json::from_slice(&buf[..n]) {
                        Ok(value) => {
                            let _ = inbound_tx.send(value);
                        }
                        Err(err) => tracing::warn!(%err, "dropping malformed datagram"),
                    },
                    Err(err) => {
                        tracing::debug!(%err, "unix datagram read error");
                        break;
                    }
                }
            }
            this.mark_closed(&closed_tx);
        });
        self.inner.lock().reader_task = Some(handle);
    }

    /// Only the WebSocket variant carries a liveness probe (spec §4.2).
    fn spawn_ping_loop(self: &Arc<Self>, closed_tx: broadcast::Sender<()>) {
        let this = self.clone();
        let handle = tokio::spawn(async move {
            loop {
                delay_secs(PING_INTERVAL_SECS).await;
                let sink = match this.current_sink() {
                    Some(Sink::WebSocket(sink)) => sink,
                    _ => break,
                };
                if sink.ping().await.is_err() {
                    this.mark_closed(&closed_tx);
                    break;
                }
                let wait = tokio::time::timeout(
                    Duration::from_secs(PING_WAIT_SECS),
                    this.pong_notify.notified(),
                )
                .await;
                if wait.is_err() {
                    tracing::warn!("no pong within ping_wait_secs, force-closing transport");
                    this.mark_closed(&closed_tx);
                    break;
                }
            }
        });
        self.inner.lock().ping_task = Some(handle);
    }

    fn current_sink(&self) -> Option<Sink> {
        self.inner.lock().sink.clone()
    }

    /// Transitions to CLOSED and fires the closed notification exactly once
    /// (R2), whether triggered by a read error or a missed pong.
    fn mark_closed(&self, closed_tx: &broadcast::Sender<()>) {
        let mut inner = self.inner.lock();
        if inner.state == TransportState::Closed {
            return;
        }
        inner.state = TransportState::Closed;
        drop(inner);
        let _ = closed_tx.send(());
    }

    pub(crate) async fn send(&self, frame: String) -> Result<(), Error> {
        let sink = {
            let inner = self.inner.lock();
            if inner.state != TransportState::Open {
                return Err(Error::ConnectionClosed);
            }
            inner.sink.clone()
        };
        match sink {
            Some(Sink::WebSocket(sink)) => sink.send(frame).await,
            Some(Sink::Unix(sink)) => sink.send(frame).await,
            None => Err(Error::ConnectionClosed),
        }
    }

    /// Idempotent graceful shutdown.
    pub(crate) async fn close(&self) -> Result<(), Error> {
        let (sink, reader, ping) = {
            let mut inner = self.inner.lock();
            if inner.state == TransportState::Closed {
                return Ok(());
            }
            inner.state = TransportState::Closing;
            (inner.sink.take(), inner.reader_task.take(), inner.ping_task.take())
        };

        if let Some(sink) = sink {
            let result = match &sink {
                Sink::WebSocket(sink) => sink.close().await,
                Sink::Unix(sink) => sink.close().await,
            };
            if let Err(err) = result {
                tracing::debug!(%err, "error closing transport sink");
            }
        }
        if let Some(handle) = ping {
            handle.abort();
        }
        if let Some(handle) = reader {
            handle.abort();
        }
        self.inner.lock().state = TransportState::Closed;
        Ok(())
    }
}
