//! Concrete [`crate::plugin::PluginAdapter`] implementations.
//!
//! None of these encode room/SDP/RTP-forwarder domain semantics — that is
//! explicitly out of scope (spec §1). They exist to prove the adapter
//! contract against real Janus payload shapes, reusing the wire types the
//! teacher crate already carries for `echotest` and `videoroom`.

#[cfg(feature = "echotest")]
pub mod echotest;

#[cfg(feature = "videoroom")]
pub mod videoroom;

#[cfg(feature = "audiobridge")]
pub mod audiobridge;

#[cfg(feature = "streaming")]
pub mod streaming;

#[cfg(feature = "sip")]
pub mod sip;
