//! Typed sub-messages carried inside an envelope's `args`.
//!
//! Decoding is two-phase: read only the `type` discriminator, then re-parse
//! the same raw element as the matching record.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::{Map, Value};

use crate::error::{JackboxError, Result};
use crate::model::{PictureLine, RoomInfo, UserId};

/// Action name for joining a room.
pub const ACTION_JOIN_ROOM: &str = "JoinRoom";
/// Action name for messaging the room owner (host game).
pub const ACTION_SEND_TO_ROOM_OWNER: &str = "SendMessageToRoomOwner";

/// Known values of the `type` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Action,
    Result,
    Event,
}

#[derive(Deserialize)]
struct TypeTag<'a> {
    #[serde(rename = "type", borrow)]
    kind: Cow<'a, str>,
}

/// Common fields of every action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionHeader {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub action: String,
    pub app_id: String,
    pub room_id: String,
    pub user_id: String,
}

impl ActionHeader {
    /// Header for `action` bound to the given room and user.
    pub fn new(action: &str, room: &RoomInfo, user_id: &UserId) -> Self {
        Self {
            kind: MessageKind::Action,
            action: action.to_string(),
            app_id: room.app_id.clone(),
            room_id: room.room_id.clone(),
            user_id: user_id.to_string(),
        }
    }
}

/// `type: "Action"`. Action-specific fields are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(flatten)]
    pub header: ActionHeader,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `type: "Result"`: the service's answer to an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub action: String,
    pub success: bool,
    pub initial: bool,
    pub room_id: String,
    pub join_type: String,
    pub user_id: String,
}

/// `type: "Event"`. The blob schema is game-specific and left untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub event: String,
    pub room_id: String,
    #[serde(default)]
    pub blob: Map<String, Value>,
}

/// One decoded element of an envelope's `args`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubMessage {
    Action(Action),
    Result(ActionResult),
    Event(Event),
    /// Discriminator this client does not know about.
    Unknown(String),
}

impl SubMessage {
    /// Sniff `type`, then decode the full record.
    pub fn from_raw(raw: &RawValue) -> Result<Self> {
        let tag: TypeTag<'_> = serde_json::from_str(raw.get())?;
        let msg = match tag.kind.as_ref() {
            "Action" => SubMessage::Action(serde_json::from_str(raw.get())?),
            "Result" => SubMessage::Result(serde_json::from_str(raw.get())?),
            "Event" => SubMessage::Event(serde_json::from_str(raw.get())?),
            other => SubMessage::Unknown(other.to_string()),
        };
        Ok(msg)
    }

    /// Serialize back to a raw envelope arg.
    pub fn to_raw(&self) -> Result<Box<RawValue>> {
        let raw = match self {
            SubMessage::Action(a) => serde_json::value::to_raw_value(a)?,
            SubMessage::Result(r) => serde_json::value::to_raw_value(r)?,
            SubMessage::Event(e) => serde_json::value::to_raw_value(e)?,
            SubMessage::Unknown(kind) => {
                return Err(JackboxError::Malformed(format!(
                    "cannot encode sub-message of unknown type {kind:?}"
                )))
            }
        };
        Ok(raw)
    }
}

// --------------------
// Outbound requests
// --------------------

/// Options block of a join request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoomOptions {
    pub roomcode: String,
    pub name: String,
}

/// `JoinRoom` action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoom {
    #[serde(flatten)]
    pub header: ActionHeader,
    pub join_type: String,
    pub name: String,
    pub options: JoinRoomOptions,
}

impl JoinRoom {
    /// Build a join request strictly from the room snapshot and display name.
    pub fn new(room: &RoomInfo, user_id: &UserId, name: &str) -> Self {
        Self {
            header: ActionHeader::new(ACTION_JOIN_ROOM, room, user_id),
            join_type: room.join_as.clone(),
            name: name.to_string(),
            options: JoinRoomOptions {
                roomcode: room.room_id.clone(),
                name: name.to_string(),
            },
        }
    }
}

/// `SendMessageToRoomOwner` action. `message` is embedded as a JSON object.
#[derive(Debug, Serialize)]
pub struct SendMessageToRoomOwner {
    #[serde(flatten)]
    pub header: ActionHeader,
    pub message: Box<RawValue>,
}

impl SendMessageToRoomOwner {
    pub fn new<T: Serialize>(room: &RoomInfo, user_id: &UserId, message: &T) -> Result<Self> {
        Ok(Self {
            header: ActionHeader::new(ACTION_SEND_TO_ROOM_OWNER, room, user_id),
            message: serde_json::value::to_raw_value(message)?,
        })
    }
}

/// Owner message that sets the player's picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPlayerPicture {
    pub set_player_picture: bool,
    pub picture_lines: Vec<PictureLine>,
}

impl SetPlayerPicture {
    pub fn new(picture_lines: Vec<PictureLine>) -> Self {
        Self {
            set_player_picture: true,
            picture_lines,
        }
    }
}
