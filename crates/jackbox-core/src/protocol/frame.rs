//! Frame vocabulary of the realtime transport.
//!
//! The service routes frames by literal prefix, so outbound envelopes must
//! carry `5:::` exactly and pings must be answered with `2::` exactly.

/// Initial connect acknowledgment sent by the service.
pub const HELLO: &str = "1::";
/// Keepalive ping from the service.
pub const PING: &str = "2:::";
/// Keepalive reply sent back to the service.
pub const PONG: &str = "2::";
/// Prefix of every enveloped message frame.
pub const ENVELOPE_PREFIX: &str = "5:::";

/// Classified inbound frame. Borrowed from the raw frame text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    /// `1::`
    Hello,
    /// `2:::`
    Ping,
    /// `5:::<json>`, holding the JSON remainder.
    Envelope(&'a str),
    /// Anything else. Ignored by the session.
    Other,
}

impl<'a> Frame<'a> {
    /// Classify a frame. Surrounding whitespace is trimmed first.
    ///
    /// Priority: exact hello, exact ping, envelope prefix, other.
    pub fn classify(raw: &'a str) -> Self {
        let msg = raw.trim();
        if msg == HELLO {
            Frame::Hello
        } else if msg == PING {
            Frame::Ping
        } else if let Some(body) = msg.strip_prefix(ENVELOPE_PREFIX) {
            Frame::Envelope(body)
        } else {
            Frame::Other
        }
    }
}
