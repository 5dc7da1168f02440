//! An async client for the Janus WebRTC signalling server's JSON API.
//!
//! `janode` multiplexes sessions, plugin handles and request/response
//! transactions over a single persistent WebSocket or UNIX-datagram
//! connection. The transport and multiplexing core is generic; plugin
//! semantics (rooms, SDP, RTP forwarders) are supplied by a small
//! [`plugin::PluginAdapter`] implementation per plugin — this crate ships
//! thin ones for `echotest`, `videoroom`, `audiobridge`, `streaming` and
//! `sip` to prove out the contract.
//!
//! ```no_run
//! # async fn run() -> Result<(), janode::error::Error> {
//! use janode::config::{Configuration, Endpoint};
//!
//! let config = Configuration::new(vec![Endpoint::new("ws://localhost:8188")])?;
//! let connection = janode::connect(config, None).await?;
//! let session = connection.create_session().await?;
//! let handle = session
//!     .attach(
//!         janode::types::JanusPlugin::Echotest,
//!         std::sync::Arc::new(janode::plugins::echotest::EchoTestAdapter),
//!     )
//!     .await?;
//! handle.message(serde_json::json!({ "audio": true, "video": true }), None).await?;
//! # Ok(())
//! # }
//! ```

mod address_iterator;
pub mod config;
pub mod connection;
mod envelope;
pub mod error;
pub mod event_bus;
pub mod events;
pub mod handle;
#[macro_use]
mod macros;
pub mod plugin;
pub mod plugins;
pub mod session;
mod transaction;
pub mod transport;
pub mod types;
mod util;

pub use connection::{connect, Connection};
pub use handle::Handle;
pub use session::Session;
