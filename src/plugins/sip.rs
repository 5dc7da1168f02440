//! Adapter for `janus.plugin.sip`. Shares the generic pass-through shape of
//! `plugins::audiobridge`/`plugins::streaming`, plus [`SipAdapterExt`]: the
//! one documented exception to the stateless adapter contract (see
//! `plugin::PluginAdapter`).
//!
//! Janus acks a `register` request immediately but reports success or
//! failure later as an async `registered`/`registration_failed` event that
//! carries no `transaction` field. The owning `Handle` is expected to
//! remember the `register` call's transaction id while it's in flight and,
//! on the next inbound sip event, ask [`SipAdapterExt::register_outcome`]
//! whether this event settles it — the adapter itself holds no state.

use crate::plugin::{DecodeOutcome, PluginAdapter, PluginEvent};
use crate::types::Jsep;
use serde_json::Value;

const EVENT_NAMES: &[&str] = &["sip_event", "sip_registered", "sip_registration_failed"];

/// Outcome of a pending `register` transaction, as reported by a later
/// async sip event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    Failed(String),
}

/// Extra capability only the sip adapter exposes. The `Handle` downcasts
/// to this when it knows it is attached to `janus.plugin.sip` and has a
/// pending register transaction id stashed.
pub trait SipAdapterExt: PluginAdapter {
    /// Returns `Some` if `plugin_data` is a `registered`/`registration_failed`
    /// event settling an in-flight `register` call.
    fn register_outcome(&self, plugin_data: &Value) -> Option<RegisterOutcome>;
}

#[derive(Debug, Default)]
pub struct SipAdapter;

impl PluginAdapter for SipAdapter {
    fn plugin_id(&self) -> &'static str {
        "janus.plugin.sip"
    }

    fn decode(&self, plugin_data: &Value, jsep: Option<Jsep>) -> DecodeOutcome {
        let result = plugin_data.get("result").and_then(Value::as_object);
        let event = result.and_then(|r| r.get("event")).and_then(Value::as_str);
        let name = match event {
            Some("registered") => "sip_registered",
            Some("registration_failed") => "sip_registration_failed",
            _ if plugin_data.is_object() => "sip_event",
            _ => return DecodeOutcome::Unhandled,
        };
        DecodeOutcome::Event(PluginEvent {
            name: name.into(),
            data: plugin_data.clone(),
            jsep,
        })
    }

    fn event_names(&self) -> &'static [&'static str] {
        EVENT_NAMES
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl SipAdapterExt for SipAdapter {
    fn register_outcome(&self, plugin_data: &Value) -> Option<RegisterOutcome> {
        let result = plugin_data.get("result")?.as_object()?;
        match result.get("event").and_then(Value::as_str)? {
            "registered" => Some(RegisterOutcome::Registered),
            "registration_failed" => {
                let reason = result
                    .get("reason")
                    .and_then(Value::as_str)
                    .unwrap_or("registration failed")
                    .to_owned();
                Some(RegisterOutcome::Failed(reason))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_registered_event() {
        let value = serde_json::json!({ "result": { "event": "registered" } });
        assert_eq!(
            SipAdapter.register_outcome(&value),
            Some(RegisterOutcome::Registered)
        );
        match SipAdapter.decode(&value, None) {
            DecodeOutcome::Event(event) => assert_eq!(event.name, "sip_registered"),
            _ => panic!("expected an event"),
        }
    }

    #[test]
    fn recognises_registration_failure_with_reason() {
        let value = serde_json::json!({
            "result": { "event": "registration_failed", "code": 403, "reason": "Forbidden" }
        });
        assert_eq!(
            SipAdapter.register_outcome(&value),
            Some(RegisterOutcome::Failed("Forbidden".into()))
        );
    }

    #[test]
    fn unrelated_events_do_not_settle_registration() {
        let value = serde_json::json!({ "result": { "event": "incomingcall" } });
        assert_eq!(SipAdapter.register_outcome(&value), None);
        match SipAdapter.decode(&value, None) {
            DecodeOutcome::Event(event) => assert_eq!(event.name, "sip_event"),
            _ => panic!("expected an event"),
        }
    }
}
