use std::path::PathBuf;
use std::time::Duration;

use jackbox_core::error::{JackboxError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    pub client: ClientSection,

    #[serde(default)]
    pub service: ServiceSection,

    #[serde(default)]
    pub session: SessionSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(JackboxError::Malformed(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.client.validate()?;
        self.service.validate()?;
        self.session.validate()?;

        Ok(())
    }
}

/// Who joins where, and what to send once joined.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    pub room_code: String,
    pub name: String,
    /// Drawing to push to the room owner after joining.
    #[serde(default)]
    pub picture: Option<PathBuf>,
}

impl ClientSection {
    pub fn validate(&self) -> Result<()> {
        if self.room_code.trim().is_empty() {
            return Err(JackboxError::Malformed("client.room_code must not be empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(JackboxError::Malformed("client.name must not be empty".into()));
        }
        Ok(())
    }
}

/// Service endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    #[serde(default = "default_room_base")]
    pub room_base: String,

    #[serde(default = "default_ws_base")]
    pub ws_base: String,

    /// `https`/`wss` when true, `http`/`ws` otherwise.
    #[serde(default = "default_tls")]
    pub tls: bool,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            room_base: default_room_base(),
            ws_base: default_ws_base(),
            tls: default_tls(),
        }
    }
}

impl ServiceSection {
    pub fn validate(&self) -> Result<()> {
        for (key, host) in [
            ("service.room_base", &self.room_base),
            ("service.ws_base", &self.ws_base),
        ] {
            if host.is_empty() || host.contains('/') {
                return Err(JackboxError::Malformed(format!(
                    "{key} must be a bare host[:port], got {host:?}"
                )));
            }
        }
        Ok(())
    }

    pub fn http_scheme(&self) -> &'static str {
        if self.tls {
            "https"
        } else {
            "http"
        }
    }

    pub fn ws_scheme(&self) -> &'static str {
        if self.tls {
            "wss"
        } else {
            "ws"
        }
    }
}

fn default_room_base() -> String {
    "ecast.jackboxgames.com".into()
}
fn default_ws_base() -> String {
    "ecast.jackboxgames.com:38203".into()
}
fn default_tls() -> bool {
    true
}

/// Session tuning. No retries; timeouts are off unless set.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,

    /// Applies to the room lookup and the handshake bootstrap request.
    #[serde(default)]
    pub http_timeout_ms: Option<u64>,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            max_frame_bytes: default_max_frame_bytes(),
            http_timeout_ms: None,
        }
    }
}

impl SessionSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=1024).contains(&self.queue_capacity) {
            return Err(JackboxError::Malformed(
                "session.queue_capacity must be between 1 and 1024".into(),
            ));
        }
        if !(64..=1 << 20).contains(&self.max_frame_bytes) {
            return Err(JackboxError::Malformed(
                "session.max_frame_bytes must be between 64 and 1048576".into(),
            ));
        }
        if self.http_timeout_ms == Some(0) {
            return Err(JackboxError::Malformed(
                "session.http_timeout_ms must be positive when set".into(),
            ));
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_ms.map(Duration::from_millis)
    }
}

fn default_queue_capacity() -> usize {
    20
}
fn default_max_frame_bytes() -> usize {
    2048
}
