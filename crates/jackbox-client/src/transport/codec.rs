//! Inbound frame codec.
//!
//! - `1::` => hello (no-op)
//! - `2:::` => ping (caller must answer `2::`)
//! - `5:::<json>` => envelope, decoded arg by arg
//! - anything else => ignored, silently

use jackbox_core::protocol::envelope::Envelope;
use jackbox_core::protocol::frame::Frame;
use jackbox_core::protocol::message::SubMessage;

#[derive(Debug, PartialEq)]
pub enum Inbound {
    Hello,
    Ping,
    /// Sub-messages decoded before the first bad arg, in order.
    Messages(Vec<SubMessage>),
    Ignored,
}

pub fn decode(text: &str) -> Inbound {
    match Frame::classify(text) {
        Frame::Hello => Inbound::Hello,
        Frame::Ping => Inbound::Ping,
        Frame::Envelope(body) => Inbound::Messages(decode_envelope(body)),
        Frame::Other => Inbound::Ignored,
    }
}

fn decode_envelope(body: &str) -> Vec<SubMessage> {
    let env = match Envelope::parse(body) {
        Ok(env) => env,
        Err(e) => {
            tracing::debug!(error = %e, "dropping undecodable envelope");
            return Vec::new();
        }
    };

    let mut out = Vec::with_capacity(env.args.len());
    for item in env.sub_messages() {
        match item {
            Ok(SubMessage::Unknown(kind)) => {
                tracing::trace!(%kind, "skipping sub-message of unknown type");
            }
            Ok(msg) => out.push(msg),
            Err(e) => {
                tracing::debug!(error = %e, decoded = out.len(), "stopping at undecodable arg");
                break;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_arg_keeps_earlier_args() {
        let frame = r#"5:::{"name":"msg","args":[{"type":"Event","event":"E","roomId":"R","blob":{}},{"type":"Event"},{"type":"Event","event":"F","roomId":"R"}]}"#;
        let Inbound::Messages(msgs) = decode(frame) else {
            unreachable!("envelope frame");
        };
        assert_eq!(msgs.len(), 1);
        assert!(matches!(&msgs[0], SubMessage::Event(e) if e.event == "E"));
    }

    #[test]
    fn unknown_types_are_skipped() {
        let frame = r#"5:::{"name":"msg","args":[{"type":"Nope"},{"type":"Event","event":"E","roomId":"R"}]}"#;
        let Inbound::Messages(msgs) = decode(frame) else {
            unreachable!("envelope frame");
        };
        assert_eq!(msgs.len(), 1);
    }

    #[test]
    fn malformed_envelope_yields_nothing() {
        assert_eq!(decode("5:::{malformed json"), Inbound::Messages(Vec::new()));
    }

    #[test]
    fn control_frames() {
        assert_eq!(decode("1::"), Inbound::Hello);
        assert_eq!(decode("2:::"), Inbound::Ping);
        assert_eq!(decode("2::"), Inbound::Ignored);
        assert_eq!(decode(""), Inbound::Ignored);
    }
}
