//! A plugin attachment within a [`crate::session::Session`] (spec §4.6).

use crate::envelope::Envelope;
use crate::error::Error;
use crate::events::HandleEvent;
use crate::event_bus::EventBus;
use crate::plugin::{DecodeOutcome, PluginAdapter};
use crate::session::Session;
use crate::transaction::{Owner, TransactionManager};
use crate::transport::Transport;
use crate::types::outgoing::{JanusRequest, PluginBody, PluginMessage, TrickleMessage};
use crate::types::{HandleId, Jsep, SessionId, TransactionId, TrickleCandidate};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandleState {
    Attached,
    Detaching,
    Detached,
}

/// What kind of request a pending handle-owned transaction was for —
/// decides how an `ack`/`success` reply is interpreted (spec §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Message,
    Trickle,
    Hangup,
    Detach,
}

pub struct Handle {
    id: HandleId,
    session_id: SessionId,
    session: Weak<Session>,
    transport: Arc<Transport>,
    tm: Arc<TransactionManager>,
    adapter: Arc<dyn PluginAdapter>,
    pending_kinds: Mutex<HashMap<String, RequestKind>>,
    pending_register: Mutex<Option<String>>,
    state: Mutex<HandleState>,
    events: EventBus<HandleEvent>,
}

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("id", &self.id)
            .field("session_id", &self.session_id)
            .field("plugin_id", &self.adapter.plugin_id())
            .finish()
    }
}

impl Handle {
    pub(crate) fn new(
        id: HandleId,
        session_id: SessionId,
        session: Weak<Session>,
        transport: Arc<Transport>,
        tm: Arc<TransactionManager>,
        adapter: Arc<dyn PluginAdapter>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id,
            session_id,
            session,
            transport,
            tm,
            adapter,
            pending_kinds: Mutex::new(HashMap::new()),
            pending_register: Mutex::new(None),
            state: Mutex::new(HandleState::Attached),
            events: EventBus::new(),
        })
    }

    pub fn id(&self) -> HandleId {
        self.id
    }

    pub fn plugin_id(&self) -> &'static str {
        self.adapter.plugin_id()
    }

    pub fn on(&self, callback: impl FnMut(HandleEvent) + Send + 'static) -> crate::event_bus::Subscription {
        self.events.on(callback)
    }

    pub fn once(&self, callback: impl FnOnce(HandleEvent) + Send + 'static) -> crate::event_bus::Subscription {
        self.events.once(callback)
    }

    async fn send_request(
        &self,
        id: String,
        kind: RequestKind,
        request: JanusRequest,
    ) -> Result<serde_json::Value, Error> {
        let rx = self.tm.create(id.clone(), Owner::Handle(self.id))?;
        self.pending_kinds.lock().insert(id.clone(), kind);
        let frame = serde_json::to_string(&request)?;
        if let Err(err) = self.transport.send(frame).await {
            self.tm.close_with_error(&id, Owner::Handle(self.id), err);
        }
        let result = rx.await.map_err(|_| Error::ConnectionClosed)?;
        self.pending_kinds.lock().remove(&id);
        result
    }

    /// The universal plugin RPC: `{ janus: "message", body, jsep? }`.
    pub async fn message(
        &self,
        body: serde_json::Value,
        jsep: Option<Jsep>,
    ) -> Result<serde_json::Value, Error> {
        let id = self.tm.generate_id();
        if self.adapter.plugin_id() == "janus.plugin.sip"
            && body.get("request").and_then(serde_json::Value::as_str) == Some("register")
        {
            *self.pending_register.lock() = Some(id.clone());
        }
        let request = JanusRequest::PluginMessage(PluginMessage {
            handle_id: self.id,
            session_id: self.session_id,
            transaction: TransactionId::new(id.clone()),
            body: PluginBody::Generic(body),
            jsep,
        });
        self.send_request(id, RequestKind::Message, request).await
    }

    pub async fn trickle(&self, candidates: &[TrickleCandidate]) -> Result<(), Error> {
        let id = self.tm.generate_id();
        let trickle = TrickleMessage::new(candidates)?;
        let request = JanusRequest::TrickleMessage {
            handle_id: self.id,
            session_id: self.session_id,
            transaction: TransactionId::new(id.clone()),
            trickle,
        };
        self.send_request(id, RequestKind::Trickle, request).await?;
        Ok(())
    }

    pub async fn trickle_complete(&self) -> Result<(), Error> {
        let id = self.tm.generate_id();
        let request = JanusRequest::TrickleMessage {
            handle_id: self.id,
            session_id: self.session_id,
            transaction: TransactionId::new(id.clone()),
            trickle: TrickleMessage::end(),
        };
        self.send_request(id, RequestKind::Trickle, request).await?;
        Ok(())
    }

    pub async fn hangup(&self) -> Result<(), Error> {
        let id = self.tm.generate_id();
        let request = JanusRequest::Hangup {
            session_id: self.session_id,
            handle_id: self.id,
            transaction: TransactionId::new(id.clone()),
        };
        self.send_request(id, RequestKind::Hangup, request).await?;
        Ok(())
    }

    /// Idempotent: a second call rejects with [`Error::AlreadyDetached`] (R1).
    pub async fn detach(self: &Arc<Self>) -> Result<(), Error> {
        {
            let mut state = self.state.lock();
            if *state != HandleState::Attached {
                return Err(Error::AlreadyDetached);
            }
            *state = HandleState::Detaching;
        }
        let id = self.tm.generate_id();
        let request = JanusRequest::Detach {
            session_id: self.session_id,
            handle_id: self.id,
            transaction: TransactionId::new(id.clone()),
        };
        let result = self.send_request(id, RequestKind::Detach, request).await;
        self.run_local_detach();
        if let Some(session) = self.session.upgrade() {
            session.forget_handle(self.id);
        }
        result.map(|_| ())
    }

    /// Local-only teardown shared by a server-acked `detach`, a
    /// server-pushed `detached` event, and the owning session's own
    /// destruction sequence.
    pub(crate) fn run_local_detach(&self) {
        let mut state = self.state.lock();
        if *state == HandleState::Detached {
            return;
        }
        *state = HandleState::Detached;
        drop(state);
        self.tm.close_all_with_error(
            |owner| owner == Owner::Handle(self.id),
            || Error::HandleDetached,
        );
        self.events.emit(HandleEvent::Detached);
    }

    fn is_ours(&self, transaction: Option<&str>) -> Option<String> {
        let transaction = transaction?;
        if self.tm.owner_of(transaction) == Some(Owner::Handle(self.id)) {
            Some(transaction.to_owned())
        } else {
            None
        }
    }

    fn request_kind(&self, transaction: &str) -> Option<RequestKind> {
        self.pending_kinds.lock().get(transaction).copied()
    }

    /// Called by [`Session`] once it has routed an inbound message to this
    /// handle (spec §4.6's dispatch algorithm).
    pub(crate) fn dispatch(self: &Arc<Self>, envelope: Envelope) {
        match envelope {
            Envelope::Ack { transaction } => {
                if let Some(id) = self.is_ours(Some(&transaction)) {
                    if self.request_kind(&id) == Some(RequestKind::Trickle) {
                        self.tm
                            .close_with_success(&id, Owner::Handle(self.id), serde_json::json!({}));
                    }
                    // Otherwise: interim ack for a definitive request, keep waiting.
                }
            }
            Envelope::Error {
                transaction, error, ..
            } => {
                if let Some(id) = self.is_ours(transaction.as_deref()) {
                    self.tm.close_with_error(
                        &id,
                        Owner::Handle(self.id),
                        Error::JanusError(error),
                    );
                }
            }
            Envelope::Success {
                transaction,
                plugindata,
                jsep,
                data,
                ..
            } => {
                if let Some(id) = self.is_ours(transaction.as_deref()) {
                    let payload = plugindata
                        .map(|p| p.data)
                        .or(data)
                        .unwrap_or(serde_json::Value::Null);
                    let payload = match jsep {
                        Some(jsep) => serde_json::json!({ "data": payload, "jsep": jsep }),
                        None => payload,
                    };
                    self.tm
                        .close_with_success(&id, Owner::Handle(self.id), payload);
                }
            }
            Envelope::Event {
                transaction,
                plugindata,
                jsep,
                ..
            } => self.dispatch_event(transaction, plugindata.map(|p| p.data), jsep),
            Envelope::Detached { .. } => self.run_local_detach(),
            Envelope::Hangup { reason, .. } => {
                self.events.emit(HandleEvent::Hangup {
                    reason: Some(reason),
                });
            }
            Envelope::Media { kind, receiving, .. } => {
                self.events.emit(HandleEvent::media(kind, receiving));
            }
            Envelope::WebRtcUp { .. } => self.events.emit(HandleEvent::WebrtcUp),
            Envelope::SlowLink { uplink, nacks, .. } => {
                self.events.emit(HandleEvent::SlowLink { uplink, nacks });
            }
            Envelope::Trickle { candidate, .. } => match candidate {
                crate::envelope::TrickleCandidateEnvelope::Completed { .. } => {
                    self.events.emit(HandleEvent::TrickleComplete);
                }
                crate::envelope::TrickleCandidateEnvelope::Candidate(candidate) => {
                    self.events.emit(HandleEvent::Trickle {
                        sdp_m_id: candidate.sdp_m_id,
                        sdp_m_line_index: candidate.sdp_m_line_index,
                        candidate: candidate.candidate,
                    });
                }
            },
            Envelope::KeepAlive { .. } | Envelope::Timeout { .. } => {}
        }
    }

    fn dispatch_event(
        self: &Arc<Self>,
        transaction: Option<String>,
        plugin_data: Option<serde_json::Value>,
        jsep: Option<Jsep>,
    ) {
        let outcome = plugin_data
            .as_ref()
            .map(|data| self.adapter.decode(data, jsep.clone()))
            .unwrap_or(DecodeOutcome::Unhandled);

        if let Some(id) = self.is_ours(transaction.as_deref()) {
            match outcome {
                DecodeOutcome::PluginError { error, .. } => {
                    self.tm.close_with_error(
                        &id,
                        Owner::Handle(self.id),
                        Error::JanusPluginError(error),
                    );
                }
                DecodeOutcome::Event(event) => {
                    self.tm
                        .close_with_success(&id, Owner::Handle(self.id), event.data);
                }
                DecodeOutcome::Unhandled => {
                    let payload = plugin_data.unwrap_or(serde_json::Value::Null);
                    self.tm
                        .close_with_success(&id, Owner::Handle(self.id), payload);
                }
            }
            return;
        }

        self.settle_pending_sip_register(plugin_data.as_ref());

        match outcome {
            DecodeOutcome::Event(event) | DecodeOutcome::PluginError { event, .. } => {
                self.events.emit(HandleEvent::Plugin {
                    name: event.name,
                    data: event.data,
                    jsep: event.jsep,
                });
            }
            DecodeOutcome::Unhandled => {}
        }
    }

    #[cfg(feature = "sip")]
    fn settle_pending_sip_register(&self, plugin_data: Option<&serde_json::Value>) {
        use crate::plugins::sip::SipAdapter;

        let Some(plugin_data) = plugin_data else {
            return;
        };
        let Some(sip) = self.adapter.as_any().downcast_ref::<SipAdapter>() else {
            return;
        };
        let Some(outcome) = sip.register_outcome(plugin_data) else {
            return;
        };
        let Some(id) = self.pending_register.lock().take() else {
            return;
        };
        match outcome {
            crate::plugins::sip::RegisterOutcome::Registered => {
                self.tm
                    .close_with_success(&id, Owner::Handle(self.id), plugin_data.clone());
            }
            crate::plugins::sip::RegisterOutcome::Failed(reason) => {
                self.tm.close_with_error(
                    &id,
                    Owner::Handle(self.id),
                    Error::UnexpectedResponse(reason),
                );
            }
        }
    }

    #[cfg(not(feature = "sip"))]
    fn settle_pending_sip_register(&self, _plugin_data: Option<&serde_json::Value>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Endpoint;

    fn test_transport() -> Arc<Transport> {
        Transport::new(vec![Endpoint::new("ws://unused")], 1, 1, false, "test".into())
    }

    #[tokio::test]
    async fn double_detach_rejects_with_already_detached() {
        let transport = test_transport();
        let tm = Arc::new(TransactionManager::new());
        let handle = Handle::new(
            HandleId::new(1),
            SessionId::new(1),
            Weak::new(),
            transport,
            tm,
            Arc::new(crate::plugins::echotest::EchoTestAdapter),
        );
        // Not connected, so detach fails to reach the server, but state must
        // still flip to Detached and the second call must see AlreadyDetached.
        let _ = handle.detach().await;
        assert_eq!(handle.detach().await.unwrap_err().to_string(), Error::AlreadyDetached.to_string());
    }
}
