//! Frame classification + envelope decoding vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use jackbox_core::protocol::envelope::Envelope;
use jackbox_core::protocol::frame::Frame;
use jackbox_core::protocol::message::SubMessage;

mod vector_loader;
use vector_loader::load;

fn kind_name(m: &SubMessage) -> &'static str {
    match m {
        SubMessage::Action(_) => "Action",
        SubMessage::Result(_) => "Result",
        SubMessage::Event(_) => "Event",
        SubMessage::Unknown(_) => "Unknown",
    }
}

#[test]
fn frame_vectors() {
    let files = [
        "frame_hello.json",
        "frame_ping.json",
        "frame_pong.json",
        "frame_noise.json",
        "envelope_result.json",
        "envelope_event.json",
        "envelope_mixed.json",
        "envelope_malformed.json",
        "envelope_bad_second_arg.json",
    ];

    for f in files {
        let v = load(f);
        let ex = v.expect.as_ref().expect("missing expect block");
        let frame = Frame::classify(&v.frame);

        let body = match (frame, ex["frame"].as_str().unwrap()) {
            (Frame::Hello, "hello") | (Frame::Ping, "ping") | (Frame::Other, "other") => continue,
            (Frame::Envelope(body), "envelope") => body,
            (got, want) => panic!("vector={}: got {got:?}, want {want}", v.description),
        };

        let want: Vec<&str> = ex["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m.as_str().unwrap())
            .collect();

        let mut got = Vec::new();
        let mut err = None;
        match Envelope::parse(body) {
            Ok(env) => {
                for item in env.sub_messages() {
                    match item {
                        Ok(m) => got.push(kind_name(&m)),
                        Err(e) => {
                            err = Some(e);
                            break;
                        }
                    }
                }
            }
            Err(e) => err = Some(e),
        }

        assert_eq!(got, want, "vector={}", v.description);
        match (err, v.expect_error) {
            (Some(e), Some(ex)) => {
                assert_eq!(e.kind().as_str(), ex.code, "vector={}", v.description)
            }
            (None, None) => {}
            (e, ex) => panic!("vector={}: error {e:?}, expected {ex:?}", v.description),
        }
    }
}
