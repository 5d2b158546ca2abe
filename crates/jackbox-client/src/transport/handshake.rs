//! Session handshake.
//!
//! 1. `GET <scheme>://<ws_base>/socket.io/1/` and pull the session token out of
//!    the body.
//! 2. Connect to `<ws_scheme>://<ws_base>/socket.io/1/websocket/<token>` with
//!    the inbound message size capped.
//!
//! No retries. A body without exactly one token match never reaches step 2.

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::{Sink, Stream, StreamExt};
use regex::Regex;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

use jackbox_core::error::{JackboxError, Result};

use crate::config::{ServiceSection, SessionSection};
use crate::http::transport_error;

/// Bootstrap endpoint path.
pub const WS_INFO_PATH: &str = "/socket.io/1/";
/// Socket endpoint path; the session token is appended.
pub const WS_SOCKET_PATH: &str = "/socket.io/1/websocket/";
/// Session token + capability suffix in the bootstrap body.
pub const WS_INFO_PATTERN: &str = "([a-z0-9]{28}):60:60:websocket,flashsocket";

pub type FrameSink = Pin<Box<dyn Sink<Message, Error = WsError> + Send>>;
pub type FrameStream = Pin<Box<dyn Stream<Item = std::result::Result<Message, WsError>> + Send>>;

/// A live realtime connection, split into its write and read halves.
pub struct Transport {
    pub sink: FrameSink,
    pub stream: FrameStream,
}

/// Performs the handshake and opens the realtime connection.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Transport>;
}

/// Extract the session token from a bootstrap body.
///
/// Exactly one match is accepted; none or several is `Malformed`.
pub fn extract_session_token(body: &str) -> Result<String> {
    let re = Regex::new(WS_INFO_PATTERN)
        .map_err(|e| JackboxError::Fatal(format!("token pattern: {e}")))?;

    let mut caps = re.captures_iter(body);
    let token = match (caps.next(), caps.next()) {
        (Some(c), None) => c.get(1).map(|m| m.as_str().to_string()),
        _ => None,
    };

    token.ok_or_else(|| {
        JackboxError::Malformed("bootstrap body does not carry exactly one session token".into())
    })
}

/// Connector over tokio-tungstenite.
pub struct WsConnector {
    http: reqwest::Client,
    info_url: String,
    socket_base: String,
    max_frame_bytes: usize,
}

impl WsConnector {
    pub fn new(http: reqwest::Client, service: &ServiceSection, session: &SessionSection) -> Self {
        Self {
            http,
            info_url: format!("{}://{}{}", service.http_scheme(), service.ws_base, WS_INFO_PATH),
            socket_base: format!("{}://{}{}", service.ws_scheme(), service.ws_base, WS_SOCKET_PATH),
            max_frame_bytes: session.max_frame_bytes,
        }
    }

    pub fn socket_url(&self, token: &str) -> String {
        format!("{}{}", self.socket_base, token)
    }

    async fn fetch_token(&self) -> Result<String> {
        let body = self
            .http
            .get(&self.info_url)
            .send()
            .await
            .map_err(|e| transport_error("handshake", e))?
            .text()
            .await
            .map_err(|e| transport_error("handshake", e))?;
        extract_session_token(&body)
    }
}

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self) -> Result<Transport> {
        let token = self.fetch_token().await?;
        let url = self.socket_url(&token);

        let config = WebSocketConfig::default()
            .max_message_size(Some(self.max_frame_bytes))
            .max_frame_size(Some(self.max_frame_bytes));

        let (ws, _resp) =
            tokio_tungstenite::connect_async_with_config(url.as_str(), Some(config), false)
                .await
                .map_err(|e| JackboxError::Fatal(format!("websocket connect failed: {e}")))?;

        tracing::info!(%url, "websocket connected");

        let (sink, stream) = ws.split();
        Ok(Transport {
            sink: Box::pin(sink),
            stream: Box::pin(stream),
        })
    }
}
