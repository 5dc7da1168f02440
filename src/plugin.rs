//! The plugin extensibility contract (spec §4.7).
//!
//! Plugins are pure decoders over `plugindata.data`: no sockets, no timers,
//! no transaction state. A concrete adapter is handed the raw inbound
//! message by the owning [`crate::handle::Handle`] and returns either a
//! normalised [`PluginEvent`] or [`DecodeOutcome::Unhandled`].

use crate::error::JanusPluginError;
use crate::types::Jsep;
use serde_json::Value;

/// A plugin-specific notification, normalised to the one shape every plugin
/// adapter emits (spec §3: `PluginEvent`).
#[derive(Debug, Clone)]
pub struct PluginEvent {
    pub name: String,
    pub data: Value,
    pub jsep: Option<Jsep>,
}

/// Result of handing a raw message to a [`PluginAdapter::decode`].
#[derive(Debug, Clone)]
pub enum DecodeOutcome {
    Event(PluginEvent),
    /// The payload embeds a plugin-level error (`error`/`error_code`, spec
    /// §4.7). Still surfaced as `event` when unsolicited, but a Handle that
    /// finds this under a transaction it owns must reject that transaction
    /// with `error` rather than resolve it.
    PluginError {
        event: PluginEvent,
        error: JanusPluginError,
    },
    /// The adapter does not recognise this payload shape. The Handle falls
    /// back to surfacing the raw payload (spec §4.6, step 1) or drops it.
    Unhandled,
}

/// One implementation per Janus plugin. Stateless by contract: the adapter
/// itself is `Send + Sync` and shared across every `Handle` attached to that
/// plugin, so it must not carry connection-, session- or handle-specific
/// state (the `sip` adapter's `pending_register` tracking in
/// `plugins::sip` is the one documented exception, scoped per-handle by the
/// caller rather than inside the adapter — see that module).
pub trait PluginAdapter: std::fmt::Debug + Send + Sync {
    /// The stable plugin id Janus expects in `attach`, e.g. `janus.plugin.videoroom`.
    fn plugin_id(&self) -> &'static str;

    /// Decodes a plugin payload (`plugindata.data`, plus any `jsep` carried
    /// alongside it) into a [`PluginEvent`], or reports it unhandled.
    fn decode(&self, plugin_data: &Value, jsep: Option<Jsep>) -> DecodeOutcome;

    /// The event names this adapter is allowed to emit. The Handle does not
    /// enforce this beyond debug assertions — it documents the adapter's
    /// contract for callers building their own adapters.
    fn event_names(&self) -> &'static [&'static str];

    /// Lets the `Handle` recover the concrete adapter type behind this trait
    /// object — used only to reach [`crate::plugins::sip::SipAdapterExt`].
    fn as_any(&self) -> &dyn std::any::Any;
}
