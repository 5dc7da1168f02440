//! The top-level handle to a Janus server: owns the [`Transport`] and the
//! [`TransactionManager`], and demultiplexes inbound frames down to
//! [`Session`]s (spec §4.4).

use crate::config::{self, ConnectKey, IntoConfigurations};
use crate::envelope::Envelope;
use crate::error::Error;
use crate::event_bus::EventBus;
use crate::events::ConnectionEvent;
use crate::session::Session;
use crate::transaction::{Owner, TransactionManager};
use crate::transport::Transport;
use crate::types::outgoing::JanusRequest;
use crate::types::{SessionId, TransactionId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectionState {
    Open,
    Closing,
    Closed,
}

pub struct Connection {
    id: String,
    ka_interval_secs: u64,
    transport: Arc<Transport>,
    tm: Arc<TransactionManager>,
    sessions: Mutex<HashMap<SessionId, Arc<Session>>>,
    state: Mutex<ConnectionState>,
    events: EventBus<ConnectionEvent>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection").field("id", &self.id).finish()
    }
}

/// Opens a connection to one of the selected configuration's endpoints,
/// reconnecting across all of them per [`Transport::open`]'s failover
/// algorithm (spec §6.3). `configs` is either a single [`Configuration`] or
/// a `Vec<Configuration>`; `key` picks which one to use by index or
/// `server_key`, defaulting to index 0 when omitted.
pub async fn connect(
    configs: impl IntoConfigurations,
    key: Option<ConnectKey>,
) -> Result<Arc<Connection>, Error> {
    let config = config::select_configuration(configs.into_configurations(), key)?;
    config.validate()?;
    let id = uuid_like_id();
    let transport = Transport::new(
        config.endpoints,
        config.retry_time_secs,
        config.max_retries,
        config.is_admin,
        id.clone(),
    );
    let tm = Arc::new(TransactionManager::new());

    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
    let (closed_tx, closed_rx) = broadcast::channel(1);
    transport.open(inbound_tx, closed_tx).await?;

    let connection = Arc::new(Connection {
        id,
        ka_interval_secs: config.ka_interval_secs,
        transport,
        tm,
        sessions: Mutex::new(HashMap::new()),
        state: Mutex::new(ConnectionState::Open),
        events: EventBus::new(),
    });

    connection.clone().spawn_inbound_loop(inbound_rx);
    connection.clone().spawn_closed_watcher(closed_rx);
    Ok(connection)
}

/// Not a cryptographic identifier — only used to namespace the UNIX
/// transport's sibling socket path per connection (spec §6.2).
fn uuid_like_id() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..16).map(|_| format!("{:x}", rng.gen_range(0..16u8))).collect()
}

impl Connection {
    pub fn on(&self, callback: impl FnMut(ConnectionEvent) + Send + 'static) -> crate::event_bus::Subscription {
        self.events.on(callback)
    }

    pub fn once(&self, callback: impl FnOnce(ConnectionEvent) + Send + 'static) -> crate::event_bus::Subscription {
        self.events.once(callback)
    }

    fn spawn_inbound_loop(
        self: Arc<Self>,
        mut inbound_rx: mpsc::UnboundedReceiver<serde_json::Value>,
    ) {
        tokio::spawn(async move {
            while let Some(value) = inbound_rx.recv().await {
                match serde_json::from_value::<Envelope>(value) {
                    Ok(envelope) => self.dispatch(envelope),
                    Err(err) => tracing::warn!(%err, "dropping envelope with unrecognised shape"),
                }
            }
        });
    }

    fn spawn_closed_watcher(self: Arc<Self>, mut closed_rx: broadcast::Receiver<()>) {
        tokio::spawn(async move {
            if closed_rx.recv().await.is_ok() {
                self.signal_close();
            }
        });
    }

    /// Connection-level inbound routing (spec §4.4): session-addressed
    /// messages go to the session; connection-owned transactions resolve
    /// here; a server-pushed `timeout` destroys the named session; anything
    /// else is logged and dropped.
    fn dispatch(&self, envelope: Envelope) {
        if let Some(session_id) = envelope.session_id() {
            if let Some(session) = self.sessions.lock().get(&session_id).cloned() {
                session.dispatch(envelope);
                return;
            }
        }

        if let Some(transaction) = envelope.transaction() {
            if self.tm.owner_of(transaction) == Some(Owner::Connection) {
                match envelope {
                    Envelope::Ack { transaction } => {
                        self.tm
                            .close_with_success(&transaction, Owner::Connection, serde_json::json!({}));
                    }
                    Envelope::Error {
                        transaction: Some(t),
                        error,
                        ..
                    } => {
                        self.tm
                            .close_with_error(&t, Owner::Connection, Error::JanusError(error));
                    }
                    Envelope::Success {
                        transaction: Some(t),
                        data,
                        ..
                    } => {
                        self.tm.close_with_success(
                            &t,
                            Owner::Connection,
                            data.unwrap_or(serde_json::Value::Null),
                        );
                    }
                    _ => tracing::debug!("dropping unroutable connection-owned reply"),
                }
                return;
            }
        }

        if let Envelope::Timeout {
            session_id: Some(session_id),
        } = envelope
        {
            if let Some(session) = self.sessions.lock().remove(&SessionId::new(session_id)) {
                session.dispatch(Envelope::Timeout {
                    session_id: Some(session_id),
                });
            }
            return;
        }

        tracing::debug!("dropping unroutable inbound message");
    }

    async fn send_request(&self, id: String, request: JanusRequest) -> Result<serde_json::Value, Error> {
        let rx = self.tm.create(id.clone(), Owner::Connection)?;
        let frame = serde_json::to_string(&request)?;
        if let Err(err) = self.transport.send(frame).await {
            self.tm.close_with_error(&id, Owner::Connection, err);
        }
        rx.await.map_err(|_| Error::ConnectionClosed)?
    }

    /// `{ janus: "info" }`, connection-scoped.
    pub async fn server_info(&self) -> Result<serde_json::Value, Error> {
        let id = self.tm.generate_id();
        let request = JanusRequest::Info {
            transaction: TransactionId::new(id.clone()),
        };
        self.send_request(id, request).await
    }

    /// `{ janus: "create" }` → a new [`Session`], its keep-alive loop
    /// started immediately.
    pub async fn create_session(self: &Arc<Self>) -> Result<Arc<Session>, Error> {
        let id = self.tm.generate_id();
        let request = JanusRequest::CreateSession(crate::types::outgoing::CreateSession {
            transaction: TransactionId::new(id.clone()),
        });
        let reply = self.send_request(id, request).await?;
        let session_id = reply
            .get("id")
            .and_then(serde_json::Value::as_u64)
            .ok_or(Error::FailedToCreateSession)?;
        let session_id = SessionId::new(session_id);
        let session = Session::new(
            session_id,
            self.transport.clone(),
            self.tm.clone(),
            self.ka_interval_secs,
        );
        self.sessions.lock().insert(session_id, session.clone());
        Ok(session)
    }

    /// Idempotent graceful shutdown. Closing the Transport triggers
    /// [`Self::signal_close`] via the closed-watcher task, so the teardown
    /// logic lives in one place regardless of whether the close was
    /// caller-initiated or the link dropped out from under us.
    pub async fn close(&self) -> Result<(), Error> {
        {
            let mut state = self.state.lock();
            if *state != ConnectionState::Open {
                return Err(Error::ConnectionClosed);
            }
            *state = ConnectionState::Closing;
        }
        self.transport.close().await?;
        self.signal_close();
        Ok(())
    }

    /// Destroys every session locally, fails every connection-owned
    /// transaction, and emits `CONNECTION_CLOSED` exactly once (R2).
    fn signal_close(&self) {
        let mut state = self.state.lock();
        if *state == ConnectionState::Closed {
            return;
        }
        *state = ConnectionState::Closed;
        drop(state);

        let sessions: Vec<Arc<Session>> = self.sessions.lock().drain().map(|(_, s)| s).collect();
        for session in &sessions {
            session.destroy_locally(Error::SessionDestroyed);
        }
        self.tm
            .close_all_with_error(|owner| owner == Owner::Connection, || Error::ConnectionClosed);
        self.events.emit(ConnectionEvent::Closed);
    }
}
