use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tracing::{debug, info, trace, warn};

use super::constants::{CLOSE_ABNORMAL, CLOSE_NORMAL, CONNECTION_TIMEOUT};
use super::events::{DriverEvent, DriverSender};
use crate::domain::connection::{ConnectionEvent, ConnectionId};
use crate::domain::errors::TransportError;
use crate::domain::ports::TransportPort;

struct ConnectionTask {
    outbound: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
    /// Set once the handshake completed and the socket loop runs.
    established: Arc<AtomicBool>,
}

/// `TransportPort` backed by tokio-tungstenite.
///
/// Each connection runs in its own task and reports back through the driver
/// channel. Closing an established connection drops the outbound sender, which
/// shuts the socket down with a normal close frame. Closing one that is still
/// handshaking aborts its task.
pub struct WebSocketTransport {
    event_tx: DriverSender,
    next_id: u64,
    connections: HashMap<ConnectionId, ConnectionTask>,
}

impl WebSocketTransport {
    #[must_use]
    pub fn new(event_tx: DriverSender) -> Self {
        Self {
            event_tx,
            next_id: 0,
            connections: HashMap::new(),
        }
    }
}

impl TransportPort for WebSocketTransport {
    fn open(&mut self, url: &str) -> ConnectionId {
        self.connections.retain(|_, conn| !conn.task.is_finished());

        let connection = ConnectionId(self.next_id);
        self.next_id += 1;

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let established = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(run_connection(
            connection,
            url.to_string(),
            outbound_rx,
            Arc::clone(&established),
            self.event_tx.clone(),
        ));

        self.connections.insert(
            connection,
            ConnectionTask {
                outbound: outbound_tx,
                task,
                established,
            },
        );

        connection
    }

    fn close(&mut self, connection: ConnectionId) {
        let Some(conn) = self.connections.remove(&connection) else {
            return;
        };
        if conn.task.is_finished() {
            return;
        }

        if conn.established.load(Ordering::Acquire) {
            debug!(%connection, "Releasing connection");
        } else {
            debug!(%connection, "Abandoning handshake");
            conn.task.abort();
        }
    }

    fn send(&mut self, connection: ConnectionId, text: String) -> Result<(), TransportError> {
        let conn = self
            .connections
            .get(&connection)
            .ok_or(TransportError::NotConnected {
                connection: connection.0,
            })?;

        conn.outbound
            .send(text)
            .map_err(|_| TransportError::ChannelClosed)
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        for conn in self.connections.values() {
            conn.task.abort();
        }
    }
}

fn emit(event_tx: &DriverSender, connection: ConnectionId, event: ConnectionEvent) {
    if event_tx
        .send(DriverEvent::Connection { connection, event })
        .is_err()
    {
        trace!(%connection, "Driver channel closed, dropping event");
    }
}

fn fail(event_tx: &DriverSender, connection: ConnectionId, error: &TransportError) {
    warn!(%connection, error = %error, "WebSocket failure");
    emit(event_tx, connection, ConnectionEvent::Errored(error.to_string()));
    emit(
        event_tx,
        connection,
        ConnectionEvent::Closed {
            code: CLOSE_ABNORMAL,
            reason: error.to_string(),
        },
    );
}

fn close_details(frame: Option<CloseFrame>) -> (u16, String) {
    frame.map_or_else(
        || (CLOSE_NORMAL, "Normal closure".to_string()),
        |f| (f.code.into(), f.reason.to_string()),
    )
}

async fn run_connection(
    connection: ConnectionId,
    url: String,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
    established: Arc<AtomicBool>,
    event_tx: DriverSender,
) {
    debug!(%connection, url = %url, "Opening WebSocket");

    let stream = match timeout(CONNECTION_TIMEOUT, connect_async(url.as_str())).await {
        Ok(Ok((stream, _))) => stream,
        Ok(Err(e)) => {
            fail(
                &event_tx,
                connection,
                &TransportError::connection_failed(e.to_string()),
            );
            return;
        }
        Err(_) => {
            fail(&event_tx, connection, &TransportError::timeout("connection"));
            return;
        }
    };

    established.store(true, Ordering::Release);
    info!(%connection, url = %url, "WebSocket connected");
    emit(&event_tx, connection, ConnectionEvent::Opened);

    let (mut writer, mut reader) = stream.split();

    let (code, reason) = loop {
        tokio::select! {
            outbound = outbound_rx.recv() => {
                let Some(text) = outbound else {
                    debug!(%connection, "Connection released, closing socket");
                    let _ = writer.close().await;
                    break (CLOSE_NORMAL, "Closed by client".to_string());
                };

                if let Err(e) = writer.send(WsMessage::Text(text.into())).await {
                    let error = TransportError::websocket(e.to_string());
                    warn!(%connection, error = %error, "Write failed");
                    emit(&event_tx, connection, ConnectionEvent::Errored(error.to_string()));
                    break (CLOSE_ABNORMAL, error.to_string());
                }
            }

            incoming = reader.next() => match incoming {
                Some(Ok(WsMessage::Text(text))) => {
                    emit(
                        &event_tx,
                        connection,
                        ConnectionEvent::MessageReceived(text.as_str().to_owned()),
                    );
                }
                Some(Ok(WsMessage::Binary(data))) => {
                    emit(
                        &event_tx,
                        connection,
                        ConnectionEvent::MessageReceived(
                            String::from_utf8_lossy(&data).into_owned(),
                        ),
                    );
                }
                Some(Ok(WsMessage::Ping(data))) => {
                    let _ = writer.send(WsMessage::Pong(data)).await;
                }
                Some(Ok(WsMessage::Close(frame))) => break close_details(frame),
                Some(Ok(WsMessage::Pong(_) | WsMessage::Frame(_))) => {}
                Some(Err(e)) => {
                    let error = TransportError::websocket(e.to_string());
                    emit(&event_tx, connection, ConnectionEvent::Errored(error.to_string()));
                    break (CLOSE_ABNORMAL, error.to_string());
                }
                None => break (CLOSE_ABNORMAL, "Stream ended".to_string()),
            },
        }
    };

    emit(&event_tx, connection, ConnectionEvent::Closed { code, reason });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::net::TcpListener;

    use super::*;
    use crate::infrastructure::websocket::{DriverReceiver, driver_channel};

    async fn next_event(rx: &mut DriverReceiver) -> DriverEvent {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for driver event")
            .expect("driver channel closed")
    }

    #[tokio::test]
    async fn test_open_send_receive_close() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            if let Some(Ok(WsMessage::Text(text))) = ws.next().await {
                let reply = format!("echo {}", text.as_str());
                ws.send(WsMessage::Text(reply.into())).await.unwrap();
            }
            let _ = ws.close(None).await;
        });

        let (tx, mut rx) = driver_channel();
        let mut transport = WebSocketTransport::new(tx);
        let connection = transport.open(&format!("ws://{addr}"));

        assert_eq!(
            next_event(&mut rx).await,
            DriverEvent::Connection {
                connection,
                event: ConnectionEvent::Opened,
            }
        );

        transport
            .send(connection, r#"{"on_time":"08:00","off_time":"20:00"}"#.to_string())
            .unwrap();

        assert_eq!(
            next_event(&mut rx).await,
            DriverEvent::Connection {
                connection,
                event: ConnectionEvent::MessageReceived(
                    r#"echo {"on_time":"08:00","off_time":"20:00"}"#.to_string()
                ),
            }
        );

        assert!(matches!(
            next_event(&mut rx).await,
            DriverEvent::Connection {
                event: ConnectionEvent::Closed { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_close_during_handshake_drops_attempt() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Accepts TCP but never answers the upgrade request.
        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            loop {
                stream.readable().await.unwrap();
                match stream.try_read(&mut buf) {
                    Ok(0) => break,
                    Ok(_) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {}
                    Err(_) => break,
                }
            }
        });

        let (tx, mut rx) = driver_channel();
        let mut transport = WebSocketTransport::new(tx);
        let connection = transport.open(&format!("ws://{addr}"));
        tokio::time::sleep(Duration::from_millis(100)).await;

        transport.close(connection);

        tokio::time::timeout(Duration::from_secs(2), server)
            .await
            .expect("socket still held after close")
            .unwrap();
        assert!(rx.try_recv().is_err());
        assert_eq!(
            transport.send(connection, "late".to_string()),
            Err(TransportError::NotConnected { connection: 0 })
        );
    }

    #[tokio::test]
    async fn test_refused_connection_reports_error_then_close() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let (tx, mut rx) = driver_channel();
        let mut transport = WebSocketTransport::new(tx);
        let connection = transport.open(&format!("ws://{addr}"));

        assert!(matches!(
            next_event(&mut rx).await,
            DriverEvent::Connection {
                event: ConnectionEvent::Errored(_),
                ..
            }
        ));
        match next_event(&mut rx).await {
            DriverEvent::Connection {
                connection: closed,
                event: ConnectionEvent::Closed { code, .. },
            } => {
                assert_eq!(closed, connection);
                assert_eq!(code, CLOSE_ABNORMAL);
            }
            other => panic!("expected close, got {other:?}"),
        }

        transport.close(connection);
        assert_eq!(
            transport.send(connection, "late".to_string()),
            Err(TransportError::NotConnected { connection: 0 })
        );
    }
}
