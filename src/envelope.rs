//! The generic inbound message shape dispatch actually routes on.
//!
//! The teacher's `types::incoming::JanusMessage` ties `plugindata.data` to a
//! closed `PluginData` enum with one variant per compiled-in plugin
//! feature — fine for a crate that only ever talks to `echotest` and
//! `videoroom`, but it hard-fails deserialization of any message from a
//! plugin without a dedicated variant (spec §4.7's generic adapter
//! contract requires exactly the opposite). [`Envelope`] captures only the
//! fields every Janus message shares plus the handful of per-verb fields,
//! leaving `plugindata.data` as a raw [`serde_json::Value`] for the
//! attached [`crate::plugin::PluginAdapter`] to interpret.

use crate::error::JanusError;
use crate::types::{HandleId, Jsep, SessionId, TrickleCandidate};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PluginDataEnvelope {
    pub plugin: String,
    pub data: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum TrickleCandidateEnvelope {
    Completed { completed: bool },
    Candidate(TrickleCandidate),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "janus")]
pub(crate) enum Envelope {
    #[serde(rename = "ack")]
    Ack { transaction: String },
    #[serde(rename = "keepalive")]
    KeepAlive {
        session_id: SessionId,
        transaction: String,
    },
    #[serde(rename = "success")]
    Success {
        #[serde(default)]
        transaction: Option<String>,
        sender: Option<HandleId>,
        session_id: Option<SessionId>,
        plugindata: Option<PluginDataEnvelope>,
        jsep: Option<Jsep>,
        data: Option<Value>,
    },
    #[serde(rename = "event")]
    Event {
        sender: HandleId,
        session_id: SessionId,
        #[serde(default)]
        transaction: Option<String>,
        plugindata: Option<PluginDataEnvelope>,
        jsep: Option<Jsep>,
    },
    #[serde(rename = "error")]
    Error {
        session_id: Option<SessionId>,
        #[serde(default)]
        transaction: Option<String>,
        error: JanusError,
    },
    #[serde(rename = "timeout")]
    Timeout { session_id: Option<u64> },
    #[serde(rename = "hangup")]
    Hangup {
        session_id: SessionId,
        sender: HandleId,
        reason: String,
    },
    #[serde(rename = "trickle")]
    Trickle {
        session_id: SessionId,
        sender: HandleId,
        candidate: TrickleCandidateEnvelope,
    },
    #[serde(rename = "webrtcup")]
    WebRtcUp {
        session_id: SessionId,
        sender: HandleId,
    },
    #[serde(rename = "media")]
    Media {
        session_id: SessionId,
        sender: HandleId,
        #[serde(rename = "type")]
        kind: String,
        receiving: bool,
    },
    #[serde(rename = "detached")]
    Detached {
        session_id: SessionId,
        sender: HandleId,
    },
    #[serde(rename = "slowlink")]
    SlowLink {
        session_id: SessionId,
        sender: HandleId,
        uplink: bool,
        nacks: u64,
    },
}

impl Envelope {
    /// The `transaction` this message is correlated to, if any. Most verbs
    /// other than `event`/`success` always carry one; `event` may omit it
    /// entirely when it's an unsolicited plugin notification.
    pub(crate) fn transaction(&self) -> Option<&str> {
        match self {
            Envelope::Ack { transaction } => Some(transaction),
            Envelope::KeepAlive { transaction, .. } => Some(transaction),
            Envelope::Success { transaction, .. } => transaction.as_deref(),
            Envelope::Event { transaction, .. } => transaction.as_deref(),
            Envelope::Error { transaction, .. } => transaction.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn session_id(&self) -> Option<SessionId> {
        match self {
            Envelope::KeepAlive { session_id, .. }
            | Envelope::Event { session_id, .. }
            | Envelope::Hangup { session_id, .. }
            | Envelope::Trickle { session_id, .. }
            | Envelope::WebRtcUp { session_id, .. }
            | Envelope::Media { session_id, .. }
            | Envelope::Detached { session_id, .. }
            | Envelope::SlowLink { session_id, .. } => Some(*session_id),
            Envelope::Success { session_id, .. } => *session_id,
            Envelope::Error { session_id, .. } => *session_id,
            Envelope::Timeout { .. } | Envelope::Ack { .. } => None,
        }
    }

    pub(crate) fn sender(&self) -> Option<HandleId> {
        match self {
            Envelope::Event { sender, .. }
            | Envelope::Hangup { sender, .. }
            | Envelope::Trickle { sender, .. }
            | Envelope::WebRtcUp { sender, .. }
            | Envelope::Media { sender, .. }
            | Envelope::Detached { sender, .. }
            | Envelope::SlowLink { sender, .. } => Some(*sender),
            Envelope::Success { sender, .. } => *sender,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generic_plugin_event_with_no_typed_counterpart() {
        let json = r#"{
            "janus": "event",
            "sender": 1,
            "session_id": 2,
            "transaction": "t1",
            "plugindata": {
                "plugin": "janus.plugin.audiobridge",
                "data": { "audiobridge": "event", "room": 42 }
            }
        }"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        match envelope {
            Envelope::Event {
                plugindata: Some(plugindata),
                ..
            } => {
                assert_eq!(plugindata.plugin, "janus.plugin.audiobridge");
                assert_eq!(plugindata.data["room"], 42);
            }
            _ => panic!("expected an Event with plugindata"),
        }
    }

    #[test]
    fn parses_ack() {
        let json = r#"{"janus":"ack","transaction":"t1"}"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.transaction(), Some("t1"));
    }

    #[test]
    fn parses_trickle_completed() {
        let json = r#"{
            "janus": "trickle",
            "session_id": 1,
            "sender": 2,
            "candidate": { "completed": true }
        }"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        assert!(matches!(
            envelope,
            Envelope::Trickle {
                candidate: TrickleCandidateEnvelope::Completed { completed: true },
                ..
            }
        ));
    }

    #[test]
    fn success_without_plugindata_carries_session_fields() {
        let json = r#"{
            "janus": "success",
            "transaction": "t2",
            "session_id": 9,
            "data": { "id": 9 }
        }"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.session_id(), Some(SessionId::new(9)));
        assert_eq!(envelope.transaction(), Some("t2"));
    }
}
