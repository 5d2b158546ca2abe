//! Room lookup: room code -> `RoomInfo`.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use jackbox_core::error::{JackboxError, Result};
use jackbox_core::model::{RoomInfo, UserId};

use crate::config::ServiceSection;
use crate::http::transport_error;

/// Resolves a human-entered room code. One attempt, no retries.
#[async_trait]
pub trait RoomResolver: Send + Sync {
    async fn resolve(&self, room_code: &str, user_id: &UserId) -> Result<RoomInfo>;
}

/// `GET <scheme>://<room_base>/room/<code>?userId=<id>`.
pub struct HttpRoomResolver {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRoomResolver {
    pub fn new(http: reqwest::Client, service: &ServiceSection) -> Self {
        Self {
            http,
            base_url: format!("{}://{}/room", service.http_scheme(), service.room_base),
        }
    }

    /// The room code is one escaped path segment, never raw path text.
    pub fn room_url(&self, room_code: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| JackboxError::Malformed(format!("room lookup url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| JackboxError::Malformed("room lookup url cannot carry a path".into()))?
            .push(room_code);
        Ok(url)
    }
}

#[async_trait]
impl RoomResolver for HttpRoomResolver {
    async fn resolve(&self, room_code: &str, user_id: &UserId) -> Result<RoomInfo> {
        let url = self.room_url(room_code)?;
        tracing::debug!(%url, "resolving room");

        let resp = self
            .http
            .get(url)
            .query(&[("userId", user_id.as_str())])
            .send()
            .await
            .map_err(|e| transport_error("room lookup", e))?;

        match resp.status() {
            StatusCode::NOT_FOUND => {
                return Err(JackboxError::NotFound(format!("room {room_code}")));
            }
            s if !s.is_success() => {
                return Err(JackboxError::Transient(format!("room lookup returned {s}")));
            }
            _ => {}
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| transport_error("room lookup", e))?;
        let info: RoomInfo = serde_json::from_slice(&body)
            .map_err(|e| JackboxError::Malformed(format!("room info: {e}")))?;

        tracing::info!(
            room = %info.room_id,
            app = %info.app_tag,
            join_as = %info.join_as,
            "room resolved"
        );
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> HttpRoomResolver {
        let svc = ServiceSection {
            room_base: "rooms.example.com".into(),
            ws_base: "ws.example.com:1234".into(),
            tls: true,
        };
        HttpRoomResolver::new(reqwest::Client::new(), &svc)
    }

    #[test]
    fn room_url_uses_scheme_and_base() {
        let url = resolver().room_url("SANB").unwrap();
        assert_eq!(url.as_str(), "https://rooms.example.com/room/SANB");
    }

    #[test]
    fn room_code_cannot_change_the_request_target() {
        let url = resolver().room_url("../admin?x=1#frag").unwrap();
        assert_eq!(url.host_str(), Some("rooms.example.com"));
        assert_eq!(url.path(), "/room/..%2Fadmin%3Fx=1%23frag");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
        assert_eq!(url.path_segments().unwrap().count(), 2);
    }
}
