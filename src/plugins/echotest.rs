//! Adapter for `janus.plugin.echotest`, the simplest stock Janus plugin.
//! Grounded directly on the teacher's `types::incoming::echotest` wire types.

use crate::plugin::{DecodeOutcome, PluginAdapter, PluginEvent};
use crate::types::incoming::echotest::{EchoPluginData, EchoPluginDataEvent};
use crate::types::Jsep;
use serde_json::Value;

const EVENT_NAMES: &[&str] = &["echotest_result", "echotest_error"];

#[derive(Debug, Default)]
pub struct EchoTestAdapter;

impl PluginAdapter for EchoTestAdapter {
    fn plugin_id(&self) -> &'static str {
        "janus.plugin.echotest"
    }

    fn decode(&self, plugin_data: &Value, jsep: Option<Jsep>) -> DecodeOutcome {
        let parsed: EchoPluginData = match serde_json::from_value(plugin_data.clone()) {
            Ok(parsed) => parsed,
            Err(_) => return DecodeOutcome::Unhandled,
        };
        let (name, data) = match parsed {
            EchoPluginData::Event(EchoPluginDataEvent::Ok { result }) => {
                ("echotest_result", serde_json::json!({ "result": result }))
            }
            EchoPluginData::Event(EchoPluginDataEvent::Error(err)) => {
                let data =
                    serde_json::json!({ "code": err.error_code() as u32, "reason": err.reason() });
                return DecodeOutcome::PluginError {
                    event: PluginEvent {
                        name: "echotest_error".into(),
                        data,
                        jsep,
                    },
                    error: err,
                };
            }
            EchoPluginData::Unnamed(_) => return DecodeOutcome::Unhandled,
        };
        DecodeOutcome::Event(PluginEvent {
            name: name.into(),
            data,
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
