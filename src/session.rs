//! A server-side session, multiplexing one or more plugin [`Handle`]s
//! over the owning [`crate::connection::Connection`]'s single Transport
//! (spec §4.5).

use crate::envelope::Envelope;
use crate::error::Error;
use crate::event_bus::EventBus;
use crate::events::SessionEvent;
use crate::handle::Handle;
use crate::plugin::PluginAdapter;
use crate::transaction::{Owner, TransactionManager};
use crate::transport::Transport;
use crate::types::outgoing::{AttachToPlugin, JanusRequest, KeepAlive};
use crate::types::{HandleId, JanusPlugin, SessionId, TransactionId};
use crate::util::delay_secs;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Active,
    Destroying,
    Destroyed,
}

pub struct Session {
    id: SessionId,
    transport: Arc<Transport>,
    tm: Arc<TransactionManager>,
    ka_interval_secs: u64,
    handles: Mutex<HashMap<HandleId, Arc<Handle>>>,
    state: Mutex<SessionState>,
    ka_task: Mutex<Option<JoinHandle<()>>>,
    events: EventBus<SessionEvent>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("id", &self.id).finish()
    }
}

impl Session {
    pub(crate) fn new(
        id: SessionId,
        transport: Arc<Transport>,
        tm: Arc<TransactionManager>,
        ka_interval_secs: u64,
    ) -> Arc<Self> {
        let session = Arc::new(Self {
            id,
            transport,
            tm,
            ka_interval_secs,
            handles: Mutex::new(HashMap::new()),
            state: Mutex::new(SessionState::Active),
            ka_task: Mutex::new(None),
            events: EventBus::new(),
        });
        session.clone().spawn_keepalive_loop();
        session
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn on(&self, callback: impl FnMut(SessionEvent) + Send + 'static) -> crate::event_bus::Subscription {
        self.events.on(callback)
    }

    pub fn once(&self, callback: impl FnOnce(SessionEvent) + Send + 'static) -> crate::event_bus::Subscription {
        self.events.once(callback)
    }

    fn spawn_keepalive_loop(self: Arc<Self>) {
        let handle = tokio::spawn(async move {
            loop {
                delay_secs(self.ka_interval_secs).await;
                if *self.state.lock() != SessionState::Active {
                    return;
                }
                let timeout = Duration::from_secs(self.ka_interval_secs.max(1) / 2);
                let outcome = tokio::time::timeout(timeout, self.send_keepalive()).await;
                match outcome {
                    Ok(Ok(())) => continue,
                    Ok(Err(_)) | Err(_) => {
                        self.destroy_locally(Error::Timeout);
                        return;
                    }
                }
            }
        });
        *self.ka_task.lock() = Some(handle);
    }

    async fn send_keepalive(&self) -> Result<(), Error> {
        let id = self.tm.generate_id();
        let request = JanusRequest::KeepAlive(KeepAlive {
            session_id: self.id,
            transaction: TransactionId::new(id.clone()),
        });
        self.send_request(id, request).await?;
        Ok(())
    }

    async fn send_request(&self, id: String, request: JanusRequest) -> Result<serde_json::Value, Error> {
        let rx = self.tm.create(id.clone(), Owner::Session(self.id))?;
        let frame = serde_json::to_string(&request)?;
        if let Err(err) = self.transport.send(frame).await {
            self.tm.close_with_error(&id, Owner::Session(self.id), err);
        }
        rx.await.map_err(|_| Error::ConnectionClosed)?
    }

    /// `session.attach({id: "janus.plugin.echotest"})` → new [`Handle`].
    pub async fn attach(
        self: &Arc<Self>,
        plugin: JanusPlugin,
        adapter: Arc<dyn PluginAdapter>,
    ) -> Result<Arc<Handle>, Error> {
        let id = self.tm.generate_id();
        let request = JanusRequest::AttachToPlugin(AttachToPlugin {
            plugin,
            session_id: self.id,
            transaction: TransactionId::new(id.clone()),
        });
        let reply = self.send_request(id, request).await?;
        let handle_id = reply
            .get("id")
            .and_then(serde_json::Value::as_u64)
            .ok_or(Error::InvalidResponse)?;
        let handle_id = HandleId::new(handle_id);
        let handle = Handle::new(
            handle_id,
            self.id,
            Arc::downgrade(self),
            self.transport.clone(),
            self.tm.clone(),
            adapter,
        );
        self.handles.lock().insert(handle_id, handle.clone());
        Ok(handle)
    }

    /// `{ janus: "destroy" }`; on success runs the local teardown sequence.
    pub async fn destroy(self: &Arc<Self>) -> Result<(), Error> {
        {
            let mut state = self.state.lock();
            if *state != SessionState::Active {
                return Err(Error::AlreadyDestroyed);
            }
            *state = SessionState::Destroying;
        }
        let id = self.tm.generate_id();
        let request = JanusRequest::Destroy {
            session_id: self.id,
            transaction: TransactionId::new(id.clone()),
        };
        let result = self.send_request(id, request).await;
        self.destroy_locally(Error::SessionDestroyed);
        result.map(|_| ())
    }

    pub(crate) fn forget_handle(&self, handle_id: HandleId) {
        self.handles.lock().remove(&handle_id);
    }

    /// Local-only teardown shared by a server-acked `destroy`, a
    /// server-pushed `timeout`, a keep-alive failure, and the owning
    /// connection's own close sequence.
    pub(crate) fn destroy_locally(&self, err_template: Error) {
        let mut state = self.state.lock();
        if *state == SessionState::Destroyed {
            return;
        }
        *state = SessionState::Destroyed;
        drop(state);

        if let Some(task) = self.ka_task.lock().take() {
            task.abort();
        }
        let handles: Vec<Arc<Handle>> = self.handles.lock().drain().map(|(_, h)| h).collect();
        let handle_ids: std::collections::HashSet<HandleId> =
            handles.iter().map(|h| h.id()).collect();
        for handle in handles {
            handle.run_local_detach();
        }
        self.tm.close_all_with_error(
            |owner| owner == Owner::Session(self.id) || matches!(owner, Owner::Handle(id) if handle_ids.contains(&id)),
            || match &err_template {
                Error::Timeout => Error::Timeout,
                _ => Error::SessionDestroyed,
            },
        );
        self.events.emit(SessionEvent::Destroyed);
    }

    /// Called by [`crate::connection::Connection`] once it has routed an
    /// inbound message to this session (spec §4.5's dispatch algorithm).
    pub(crate) fn dispatch(self: &Arc<Self>, envelope: Envelope) {
        if let Some(sender) = envelope.sender() {
            if let Some(handle) = self.handles.lock().get(&sender).cloned() {
                handle.dispatch(envelope);
                return;
            }
        }

        if let Some(transaction) = envelope.transaction() {
            if let Some(Owner::Handle(id)) = self.tm.owner_of(transaction) {
                if let Some(handle) = self.handles.lock().get(&id).cloned() {
                    handle.dispatch(envelope);
                    return;
                }
            }
            if self.tm.owner_of(transaction) == Some(Owner::Session(self.id)) {
                match envelope {
                    Envelope::Ack { transaction } => {
                        self.tm.close_with_success(
                            &transaction,
                            Owner::Session(self.id),
                            serde_json::json!({}),
                        );
                    }
                    Envelope::Error { transaction: Some(t), error, .. } => {
                        self.tm
                            .close_with_error(&t, Owner::Session(self.id), Error::JanusError(error));
                    }
                    Envelope::Success { transaction: Some(t), sender, data, .. } => {
                        let payload = serde_json::json!({ "id": sender, "data": data });
                        self.tm.close_with_success(&t, Owner::Session(self.id), payload);
                    }
                    _ => {
                        tracing::debug!("dropping unroutable session-owned reply");
                    }
                }
                return;
            }
        }

        if let Envelope::Timeout { .. } = envelope {
            self.destroy_locally(Error::SessionDestroyed);
            return;
        }

        tracing::debug!(session_id = %self.id, "dropping unroutable inbound message");
    }
}
