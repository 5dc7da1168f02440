//! UNIX datagram transport variant (spec §4.2, §6.2).
//!
//! No counterpart exists in the transport this crate is otherwise grounded
//! on; the shape follows `tokio::net::UnixDatagram`'s own bind/connect/send/recv
//! contract directly, kept symmetric with [`super::websocket`]'s sink/stream split.

use crate::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::UnixDatagram;

/// Binds the client's sibling socket at `/tmp/.janode-<conn_id>` and connects
/// it to the server's datagram socket named by the endpoint's `file://` path.
pub(crate) async fn connect(
    server_path: &str,
    conn_id: &str,
) -> Result<(UnixSink, Arc<UnixDatagram>), Error> {
    let bind_path = sibling_path(conn_id);
    // Best-effort: a stale socket file from a previous, uncleanly-terminated
    // run must not block the bind.
    let _ = std::fs::remove_file(&bind_path);

    let socket = UnixDatagram::bind(&bind_path)?;
    socket.connect(server_path)?;
    let socket = Arc::new(socket);

    Ok((
        UnixSink {
            socket: socket.clone(),
            bind_path,
        },
        socket,
    ))
}

pub(crate) fn sibling_path(conn_id: &str) -> PathBuf {
    Path::new("/tmp").join(format!(".janode-{conn_id}"))
}

#[derive(Debug)]
pub(crate) struct UnixSink {
    socket: Arc<UnixDatagram>,
    bind_path: PathBuf,
}

impl UnixSink {
    pub(crate) async fn send(&self, msg: String) -> Result<(), Error> {
        self.socket.send(msg.as_bytes()).await?;
        Ok(())
    }

    pub(crate) async fn close(&self) -> Result<(), Error> {
        let _ = std::fs::remove_file(&self.bind_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_path_is_namespaced_by_conn_id() {
        assert_eq!(
            sibling_path("abc123"),
            PathBuf::from("/tmp/.janode-abc123")
        );
    }
}
