//! Closed-sum event types published on each entity's [`crate::event_bus::EventBus`]
//! (spec §9: "render events as a closed sum, not string-keyed names").

use crate::error::Error;
use crate::types::Jsep;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum ConnectionEvent {
    /// The connection closed, either locally initiated or by the remote end.
    Closed,
    /// The connection errored and could not be recovered by the reconnect loop.
    Error(Arc<Error>),
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The session was torn down, either by `destroy()` or a server-pushed timeout.
    Destroyed,
}

#[derive(Debug, Clone)]
pub enum HandleEvent {
    /// `detached` was received or the local detach sequence ran.
    Detached,
    /// `hangup`, with the server-supplied reason if present.
    Hangup { reason: Option<String> },
    /// `media`.
    Media { kind: String, receiving: bool },
    /// `webrtcup`.
    WebrtcUp,
    /// `slowlink`.
    SlowLink { uplink: bool, nacks: u64 },
    /// An incremental ICE candidate pushed back by the server.
    Trickle {
        sdp_m_id: String,
        sdp_m_line_index: u64,
        candidate: String,
    },
    /// Trickle candidates for this handle are complete.
    TrickleComplete,
    /// A plugin-decoded event that was not consumed by a pending transaction
    /// (spec §4.6: unsolicited `event` verbs delegated to the adapter).
    Plugin {
        name: String,
        data: serde_json::Value,
        jsep: Option<Jsep>,
    },
}

impl HandleEvent {
    pub(crate) fn media(kind: String, receiving: bool) -> Self {
        Self::Media { kind, receiving }
    }
}
