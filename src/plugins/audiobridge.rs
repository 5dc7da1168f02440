//! Thin adapter for `janus.plugin.audiobridge`. No room/mixer semantics are
//! modelled (spec §4.7.1) — only enough shape recognition to surface plugin
//! events generically, the same minimal contract `streaming` and `sip` follow.

use crate::plugin::{DecodeOutcome, PluginAdapter, PluginEvent};
use crate::types::Jsep;
use serde_json::Value;

const EVENT_NAMES: &[&str] = &["audiobridge_event"];

#[derive(Debug, Default)]
pub struct AudioBridgeAdapter;

impl PluginAdapter for AudioBridgeAdapter {
    fn plugin_id(&self) -> &'static str {
        "janus.plugin.audiobridge"
    }

    fn decode(&self, plugin_data: &Value, jsep: Option<Jsep>) -> DecodeOutcome {
        if !plugin_data.is_object() {
            return DecodeOutcome::Unhandled;
        }
        DecodeOutcome::Event(PluginEvent {
            name: "audiobridge_event".into(),
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
