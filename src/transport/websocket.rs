//! WebSocket transport variant (spec §4.2, §6.2).
//!
//! Subprotocol is `janus-protocol` for the regular API, `janus-admin-protocol`
//! for the admin API, selected by [`Configuration::is_admin`](crate::config::Configuration).

use crate::error::Error;
use futures::prelude::*;
use futures::stream::{SplitSink, SplitStream};
use std::borrow::Cow;
use std::convert::TryInto;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::MaybeTlsStream;

const JANUS_PROTOCOL: &str = "janus-protocol";
const JANUS_ADMIN_PROTOCOL: &str = "janus-admin-protocol";

pub(crate) type WebSocketStream =
    SplitStream<tokio_tungstenite::WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Per-endpoint overrides for the WebSocket variant. Currently empty; kept
/// as an extension point mirroring [`crate::config::Configuration::ws_options`].
#[derive(Debug, Clone, Default)]
pub struct WebSocketOptions {}

pub(crate) async fn connect(
    url: &str,
    is_admin: bool,
) -> Result<(WebSocketSink, WebSocketStream), Error> {
    let mut req = url.into_client_request()?;
    let subprotocol = if is_admin {
        JANUS_ADMIN_PROTOCOL
    } else {
        JANUS_PROTOCOL
    };
    req.headers_mut().insert(
        SEC_WEBSOCKET_PROTOCOL,
        subprotocol
            .try_into()
            .expect("subprotocol name to be a valid header value"),
    );

    let (stream, _) = tokio_tungstenite::connect_async(req).await?;
    let (sink, stream) = stream.split();

    Ok((
        WebSocketSink {
            sink: Mutex::new(sink),
        },
        stream,
    ))
}

#[derive(Debug)]
pub(crate) struct WebSocketSink {
    sink: Mutex<SplitSink<tokio_tungstenite::WebSocketStream<MaybeTlsStream<TcpStream>>, Message>>,
}

impl WebSocketSink {
    pub(crate) async fn send(&self, msg: String) -> Result<(), Error> {
        self.sink.lock().await.send(Message::Text(msg)).await?;
        Ok(())
    }

    /// Sends the liveness ping frame (spec §4.2: `ping_interval_secs`).
    pub(crate) async fn ping(&self) -> Result<(), Error> {
        self.sink.lock().await.send(Message::Ping(Vec::new())).await?;
        Ok(())
    }

    pub(crate) async fn close(&self) -> Result<(), Error> {
        let mut sink = self.sink.lock().await;

        sink.send(Message::Close(Some(CloseFrame {
            code: CloseCode::Away,
            reason: Cow::Borrowed("going away"),
        })))
        .await?;

        sink.close().await?;

        Ok(())
    }
}
