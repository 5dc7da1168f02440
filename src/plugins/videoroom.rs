//! Adapter for `janus.plugin.videoroom`. Grounded on the teacher's
//! `types::incoming::videoroom` wire types; only the async-event side is
//! decoded here; `created`/`joined`/`success` replies travel back to the
//! caller as a normal request/response body via `Handle::message`, not as
//! plugin events.

use crate::plugin::{DecodeOutcome, PluginAdapter, PluginEvent};
use crate::types::incoming::videoroom::{VideoRoomPluginData, VideoRoomPluginEvent};
use crate::types::Jsep;
use serde_json::Value;

const EVENT_NAMES: &[&str] = &[
    "videoroom_configured",
    "videoroom_started",
    "videoroom_leaving",
    "videoroom_destroyed",
    "videoroom_slow_link",
    "videoroom_talking",
    "videoroom_stopped_talking",
    "videoroom_error",
];

#[derive(Debug, Default)]
pub struct VideoRoomAdapter;

impl PluginAdapter for VideoRoomAdapter {
    fn plugin_id(&self) -> &'static str {
        "janus.plugin.videoroom"
    }

    fn decode(&self, plugin_data: &Value, jsep: Option<Jsep>) -> DecodeOutcome {
        let parsed: VideoRoomPluginData = match serde_json::from_value(plugin_data.clone()) {
            Ok(parsed) => parsed,
            Err(_) => return DecodeOutcome::Unhandled,
        };
        let (name, data) = match parsed {
            VideoRoomPluginData::Event(VideoRoomPluginEvent::Configured(event)) => (
                "videoroom_configured",
                serde_json::json!({ "room": event.room, "video_codec": event.video_codec }),
            ),
            VideoRoomPluginData::Event(VideoRoomPluginEvent::Started(event)) => {
                ("videoroom_started", serde_json::json!({ "room": event.room }))
            }
            VideoRoomPluginData::Event(VideoRoomPluginEvent::Leaving(_)) => {
                ("videoroom_leaving", serde_json::json!({}))
            }
            VideoRoomPluginData::Event(VideoRoomPluginEvent::Notification(_)) => {
                return DecodeOutcome::Unhandled
            }
            VideoRoomPluginData::Event(VideoRoomPluginEvent::Error(err)) => {
                let data =
                    serde_json::json!({ "code": err.error_code() as u32, "reason": err.reason() });
                return DecodeOutcome::PluginError {
                    event: PluginEvent {
                        name: "videoroom_error".into(),
                        data,
                        jsep,
                    },
                    error: err,
                };
            }
            VideoRoomPluginData::Destroyed(event) => (
                "videoroom_destroyed",
                serde_json::json!({ "room": event.room, "permanent": event.permanent }),
            ),
            VideoRoomPluginData::SlowLink(event) => (
                "videoroom_slow_link",
                serde_json::json!({ "current_bitrate": event.current_bitrate }),
            ),
            VideoRoomPluginData::Talking(event) => (
                "videoroom_talking",
                serde_json::json!({ "room": event.room, "id": event.id, "audio_level_avg": event.audio_level_avg }),
            ),
            VideoRoomPluginData::StoppedTalking(event) => (
                "videoroom_stopped_talking",
                serde_json::json!({ "room": event.room, "id": event.id }),
            ),
            VideoRoomPluginData::Created(_)
            | VideoRoomPluginData::Success(_)
            | VideoRoomPluginData::Joined(_)
            | VideoRoomPluginData::Attached(_) => return DecodeOutcome::Unhandled,
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
