//! Session data model: room metadata, user identity, drawings.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata returned by the room lookup for a given room code.
///
/// Fetched once per session and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    #[serde(rename = "roomid")]
    pub room_id: String,
    pub server: String,
    #[serde(rename = "apptag")]
    pub app_tag: String,
    #[serde(rename = "appid")]
    pub app_id: String,
    #[serde(rename = "numAudience")]
    pub num_audience: u32,
    #[serde(rename = "audienceEnabled")]
    pub audience_enabled: bool,
    #[serde(rename = "joinAs")]
    pub join_as: String,
    #[serde(rename = "requiresPassword")]
    pub requires_password: bool,
}

/// Opaque per-client user identifier attached to every outgoing action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Generate a fresh random identifier (UUID v4, hyphenated).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One stroke of a drawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureLine {
    pub thickness: i32,
    pub color: String,
    pub points: Vec<Point>,
}

/// Canvas coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}
