//! Shared test doubles: in-memory transport pipe, mock collaborators, and a
//! one-response-per-connection HTTP server.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

use jackbox_client::resolver::RoomResolver;
use jackbox_client::transport::{Connector, Transport};
use jackbox_core::error::{JackboxError, Result};
use jackbox_core::model::{RoomInfo, UserId};

pub const TIMEOUT: Duration = Duration::from_secs(5);

pub fn room() -> RoomInfo {
    RoomInfo {
        room_id: "SANB".into(),
        server: "ecast.example.com".into(),
        app_tag: "drawful".into(),
        app_id: "fdac94cc-cade-41ff-b4aa-e52e29418e8a".into(),
        num_audience: 0,
        audience_enabled: false,
        join_as: "player".into(),
        requires_password: false,
    }
}

// --------------------
// In-memory transport
// --------------------

/// The service side of an in-memory transport.
pub struct Peer {
    pub to_client: mpsc::Sender<std::result::Result<Message, WsError>>,
    pub from_client: mpsc::Receiver<Message>,
}

impl Peer {
    pub async fn send_text(&self, s: &str) {
        self.to_client
            .send(Ok(Message::text(s.to_string())))
            .await
            .unwrap();
    }

    pub async fn recv_text(&mut self) -> String {
        let msg = tokio::time::timeout(TIMEOUT, self.from_client.recv())
            .await
            .expect("timed out waiting for client frame")
            .expect("client sink closed");
        msg.into_text().unwrap().as_str().to_string()
    }
}

pub fn pipe() -> (Transport, Peer) {
    let (to_client, client_rx) = mpsc::channel(64);
    let (client_tx, from_client) = mpsc::channel::<Message>(64);

    let stream = futures_util::stream::unfold(client_rx, |mut rx| async move {
        rx.recv().await.map(|m| (m, rx))
    });
    let sink = futures_util::sink::unfold(client_tx, |tx, msg: Message| async move {
        tx.send(msg).await.map_err(|_| WsError::ConnectionClosed)?;
        Ok::<_, WsError>(tx)
    });

    (
        Transport {
            sink: Box::pin(sink),
            stream: Box::pin(stream),
        },
        Peer {
            to_client,
            from_client,
        },
    )
}

// --------------------
// Mock collaborators
// --------------------

pub struct StaticResolver {
    pub room: Option<RoomInfo>,
    pub calls: AtomicUsize,
}

impl StaticResolver {
    pub fn found(room: RoomInfo) -> Self {
        Self {
            room: Some(room),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn not_found() -> Self {
        Self {
            room: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RoomResolver for StaticResolver {
    async fn resolve(&self, room_code: &str, _user_id: &UserId) -> Result<RoomInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.room
            .clone()
            .ok_or_else(|| JackboxError::NotFound(format!("room {room_code}")))
    }
}

pub struct MockConnector {
    transport: Mutex<Option<Transport>>,
    pub calls: AtomicUsize,
}

impl MockConnector {
    pub fn new(transport: Transport) -> Self {
        Self {
            transport: Mutex::new(Some(transport)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unused() -> Self {
        Self {
            transport: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self) -> Result<Transport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.transport
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| JackboxError::Fatal("no transport".into()))
    }
}

// --------------------
// Minimal HTTP server
// --------------------

/// Request lines seen by `http_server`, one per accepted connection.
pub type Seen = Arc<Mutex<Vec<String>>>;

/// Serve `status` + `body` to every connection. Returns `host:port`.
pub async fn http_server(status: &'static str, body: String) -> (String, Seen) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&seen);
    tokio::spawn(async move {
        loop {
            let Ok((mut sock, _)) = listener.accept().await else { return };
            let request_line = read_head(&mut sock).await;
            log.lock().unwrap().push(request_line);

            let resp = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = sock.write_all(resp.as_bytes()).await;
            let _ = sock.shutdown().await;
        }
    });

    (addr, seen)
}

/// Read request headers; returns the request line.
pub async fn read_head(sock: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = sock.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8_lossy(&buf)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}
