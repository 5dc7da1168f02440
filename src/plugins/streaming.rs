//! Thin adapter for `janus.plugin.streaming`. See `plugins::audiobridge` for
//! the rationale behind the generic pass-through shape.

use crate::plugin::{DecodeOutcome, PluginAdapter, PluginEvent};
use crate::types::Jsep;
use serde_json::Value;

const EVENT_NAMES: &[&str] = &["streaming_event"];

#[derive(Debug, Default)]
pub struct StreamingAdapter;

impl PluginAdapter for StreamingAdapter {
    fn plugin_id(&self) -> &'static str {
        "janus.plugin.streaming"
    }

    fn decode(&self, plugin_data: &Value, jsep: Option<Jsep>) -> DecodeOutcome {
        if !plugin_data.is_object() {
            return DecodeOutcome::Unhandled;
        }
        DecodeOutcome::Event(PluginEvent {
            name: "streaming_event".into(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surfaces_any_object_payload() {
        let value = serde_json::json!({ "streaming": "event", "id": 1 });
        match StreamingAdapter.decode(&value, None) {
            DecodeOutcome::Event(event) => assert_eq!(event.name, "streaming_event"),
            _ => panic!("expected an event"),
        }
    }
}
