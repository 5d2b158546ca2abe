//! Generic `{name,args}` envelope carried behind the `5:::` frame prefix.
//!
//! `args` are kept as `RawValue` so each element can be type-sniffed and then
//! re-parsed independently (see [`SubMessage::from_raw`]).

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::Result;
use crate::protocol::frame::ENVELOPE_PREFIX;
use crate::protocol::message::SubMessage;

/// Envelope name used for every action/result/event carrier.
pub const ENVELOPE_NAME: &str = "msg";

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub name: String,
    /// Ordered sub-messages, stored as raw JSON (lazy parsing).
    #[serde(default)]
    pub args: Vec<Box<RawValue>>,
}

impl Envelope {
    /// Wrap pre-serialized sub-message payloads.
    pub fn new(args: Vec<Box<RawValue>>) -> Self {
        Self {
            name: ENVELOPE_NAME.to_string(),
            args,
        }
    }

    /// Serialize one sub-message and wrap it.
    pub fn single<T: Serialize>(arg: &T) -> Result<Self> {
        let raw = serde_json::value::to_raw_value(arg)?;
        Ok(Self::new(vec![raw]))
    }

    /// Parse the JSON body of a `5:::` frame (prefix already stripped).
    pub fn parse(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Encode as a ready-to-send text frame: `5:::{"name":"msg","args":[...]}`.
    pub fn encode(&self) -> Result<String> {
        let base = serde_json::to_string(self)?;
        Ok(format!("{ENVELOPE_PREFIX}{base}"))
    }

    /// Decode `args` in order.
    ///
    /// Each item is decoded independently; callers that must stop at the first
    /// bad arg should stop consuming on the first `Err`.
    pub fn sub_messages(&self) -> impl Iterator<Item = Result<SubMessage>> + '_ {
        self.args.iter().map(|raw| SubMessage::from_raw(raw))
    }
}
